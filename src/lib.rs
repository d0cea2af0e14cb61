//! Armory Glyphs - item table to glyph chart encoding
//!
//! Loads a table of tools and armors, screens out items without a numeric
//! durability, and encodes each remaining item as a positioned, shaped,
//! colored and sized mark ready for any render target.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;

pub use charts::{render, Encoding, Mark, Pipeline, RenderTarget};
pub use config::ChartConfig;
pub use data::{CsvSource, Item, ItemKind, RawRecord, RecordSource};
pub use error::{ConfigError, LoadError, ParseError, PipelineError, RenderError};
