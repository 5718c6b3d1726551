//! Writers for the tabular output artifact.
//!
//! CSV is the primary format; NDJSON writes the same columns as JSON keys.

use crate::entity::{Entity, EntityError};
use crate::runtime::config_loader::OutputFormat;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Error type for serialization operations
#[derive(Debug)]
pub enum SerializationError {
    JsonError(serde_json::Error),
    CsvError(csv::Error),
    IoError(std::io::Error),
    EntityError(EntityError),
}

impl From<serde_json::Error> for SerializationError {
    fn from(err: serde_json::Error) -> Self {
        SerializationError::JsonError(err)
    }
}

impl From<csv::Error> for SerializationError {
    fn from(err: csv::Error) -> Self {
        SerializationError::CsvError(err)
    }
}

impl From<std::io::Error> for SerializationError {
    fn from(err: std::io::Error) -> Self {
        SerializationError::IoError(err)
    }
}

impl From<EntityError> for SerializationError {
    fn from(err: EntityError) -> Self {
        SerializationError::EntityError(err)
    }
}

impl std::fmt::Display for SerializationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializationError::JsonError(e) => write!(f, "JSON error: {}", e),
            SerializationError::CsvError(e) => write!(f, "CSV error: {}", e),
            SerializationError::IoError(e) => write!(f, "IO error: {}", e),
            SerializationError::EntityError(e) => write!(f, "Entity error: {}", e),
        }
    }
}

impl std::error::Error for SerializationError {}

/// CSV writer
///
/// Writes a header row of the entity's columns, then one row per entity.
pub struct CsvWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvWriter<W> {
    /// Create a new CSV writer and write the header row for `T`
    pub fn new<T: Entity>(writer: W) -> Result<Self, SerializationError> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        writer.write_record(T::COLUMNS)?;
        Ok(Self { writer })
    }

    /// Write a single entity as a CSV row
    pub fn write<T: Entity>(&mut self, entity: &T) -> Result<(), SerializationError> {
        let row = entity.to_row()?;
        self.writer.write_record(row.values())?;
        Ok(())
    }

    /// Write multiple entities
    pub fn write_all<T: Entity>(&mut self, entities: &[T]) -> Result<(), SerializationError> {
        for entity in entities {
            self.write(entity)?;
        }
        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<(), SerializationError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// NDJSON (Newline Delimited JSON) writer
///
/// Writes entities as NDJSON, one JSON object per line.
pub struct NdjsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> NdjsonWriter<W> {
    /// Create a new NDJSON writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a single entity as an NDJSON line
    pub fn write<T: Serialize>(&mut self, entity: &T) -> Result<(), SerializationError> {
        let json = serde_json::to_string(entity)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    /// Write multiple entities
    pub fn write_all<T: Serialize>(&mut self, entities: &[T]) -> Result<(), SerializationError> {
        for entity in entities {
            self.write(entity)?;
        }
        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<(), SerializationError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Write `entities` to `writer` in the given format.
pub fn write_entities<T: Entity, W: Write>(
    writer: W,
    format: OutputFormat,
    entities: &[T],
) -> Result<(), SerializationError> {
    match format {
        OutputFormat::Csv => {
            let mut csv_writer = CsvWriter::new::<T>(writer)?;
            csv_writer.write_all(entities)?;
            csv_writer.flush()
        }
        OutputFormat::Ndjson => {
            let mut ndjson = NdjsonWriter::new(writer);
            ndjson.write_all(entities)?;
            ndjson.flush()
        }
    }
}

/// Create (or truncate) `path` and write `entities` to it.
pub fn write_to_path<T: Entity>(
    path: &Path,
    format: OutputFormat,
    entities: &[T],
) -> Result<(), SerializationError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_entities(BufWriter::new(file), format, entities)
}
