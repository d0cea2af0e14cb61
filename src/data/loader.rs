//! CSV Data Loader Module
//! Reads the item table with Polars and hands rows over as raw records.

use crate::data::record::{RawRecord, FIELD_NAME, FIELD_TYPE, REQUIRED_COLUMNS};
use crate::error::LoadError;
use polars::prelude::*;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{debug, info};

/// Anything that can produce the full record set in one go.
pub trait RecordSource {
    fn load(&self) -> Result<Vec<RawRecord>, LoadError>;

    /// Short human readable description, used in logs and the status line.
    fn describe(&self) -> String;
}

/// CSV file source backed by Polars.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_frame(&self) -> Result<DataFrame, LoadError> {
        if !self.path.is_file() {
            return Err(LoadError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a readable file", self.path.display()),
            )));
        }

        // Schema inference off: every column comes back as text and coercion
        // is left to the record parser.
        let df = LazyCsvReader::new(&self.path)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;
        Ok(df)
    }
}

impl RecordSource for CsvSource {
    fn load(&self) -> Result<Vec<RawRecord>, LoadError> {
        let df = self.read_frame()?;
        debug!(rows = df.height(), path = %self.path.display(), "CSV read");

        let mut columns: Vec<(&'static str, StringChunked)> = Vec::with_capacity(4);
        for name in REQUIRED_COLUMNS {
            let column = df
                .column(name)
                .map_err(|_| LoadError::MissingColumn(name.to_string()))?;
            let text = column.cast(&DataType::String)?;
            columns.push((name, text.as_materialized_series().str()?.clone()));
        }

        let mut records = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let mut fields = HashMap::with_capacity(columns.len());
            for (name, values) in &columns {
                match values.get(row) {
                    Some(value) => {
                        fields.insert(name.to_string(), value.to_string());
                    }
                    // Blank label cells still count as present so the schema
                    // check reports them as empty rather than missing.
                    None if *name == FIELD_NAME || *name == FIELD_TYPE => {
                        fields.insert(name.to_string(), String::new());
                    }
                    None => {}
                }
            }
            let record = RawRecord::from_fields(&fields)
                .map_err(|source| LoadError::Record { row: row + 1, source })?;
            records.push(record);
        }

        info!(records = records.len(), path = %self.path.display(), "Loaded item table");
        Ok(records)
    }

    fn describe(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Rows held in memory as field-name to text mappings.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    rows: Vec<HashMap<String, String>>,
}

impl InMemorySource {
    pub fn new(rows: Vec<HashMap<String, String>>) -> Self {
        Self { rows }
    }
}

impl RecordSource for InMemorySource {
    fn load(&self) -> Result<Vec<RawRecord>, LoadError> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, fields)| {
                RawRecord::from_fields(fields)
                    .map_err(|source| LoadError::Record { row: i + 1, source })
            })
            .collect()
    }

    fn describe(&self) -> String {
        format!("{} in-memory rows", self.rows.len())
    }
}

/// Outcome of a background load. The whole table arrives or nothing does.
pub type LoadResult = Result<Vec<RawRecord>, LoadError>;

/// Load a source on a worker thread; the receiver yields exactly one result.
pub fn load_in_background<S>(source: S) -> Receiver<LoadResult>
where
    S: RecordSource + Send + 'static,
{
    let (tx, rx) = channel();
    thread::spawn(move || {
        debug!(source = %source.describe(), "Background load started");
        let _ = tx.send(source.load());
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn in_memory_source_validates_each_row() {
        let source = InMemorySource::new(vec![
            row(&[("name", "Iron Sword"), ("type", "Weapon"), ("durability", "250")]),
            row(&[("type", "Tool")]),
        ]);
        match source.load() {
            Err(LoadError::Record { row, source }) => {
                assert_eq!(row, 2);
                assert_eq!(source, ParseError::MissingField("name"));
            }
            other => panic!("expected record error, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = CsvSource::new("/definitely/not/here/items.csv");
        assert!(matches!(source.load(), Err(LoadError::Io(_))));
    }

    #[test]
    fn background_load_delivers_single_result() {
        let source = InMemorySource::new(vec![row(&[
            ("name", "Shears"),
            ("type", "Tool"),
            ("debutDate", "2011-10-06"),
            ("durability", "238"),
        ])]);
        let rx = load_in_background(source);
        let records = rx.recv().unwrap().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Shears");
        assert!(rx.recv().is_err());
    }
}
