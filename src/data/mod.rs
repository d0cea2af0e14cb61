//! Data module - record loading, parsing and screening

mod loader;
mod processor;
mod record;

pub use loader::{load_in_background, CsvSource, InMemorySource, LoadResult, RecordSource};
pub use processor::{DataProcessor, Field};
pub use record::{
    parse_debut_year, parse_durability, parse_records, Item, ItemKind, RawRecord,
    REQUIRED_COLUMNS,
};
