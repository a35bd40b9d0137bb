//! CSV Data Loader Module
//! Reads the obesity, household income and GDP sources using Polars.

use crate::data::model::{SourceKind, SourceRow, SourceTable, STATE_COLUMN};
use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Source unavailable: {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Schema error: {kind} source has no '{column}' column")]
    SchemaError { kind: SourceKind, column: String },
    #[error("Failed to parse CSV: {0}")]
    Malformed(#[from] PolarsError),
}

/// Loads source tables with every column read as text.
pub struct DataLoader;

impl DataLoader {
    /// Load one source file. The whole file is read up front so that an
    /// unreadable file is reported as unavailable rather than malformed.
    pub fn load_source(kind: SourceKind, path: &Path) -> Result<SourceTable, LoaderError> {
        let bytes = std::fs::read(path).map_err(|source| LoaderError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Read {} bytes of {} data from {}", bytes.len(), kind, path.display());
        Self::read_source(kind, bytes)
    }

    /// Parse an in-memory CSV document.
    pub fn read_source(kind: SourceKind, bytes: Vec<u8>) -> Result<SourceTable, LoaderError> {
        // Schema inference is disabled so the measure cells reach coercion untouched
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        let states = Self::text_column(&df, kind, STATE_COLUMN)?;
        let values = Self::text_column(&df, kind, kind.measure_column())?;

        let rows: Vec<SourceRow> = states
            .iter()
            .zip(values.iter())
            .map(|(state, value)| SourceRow::new(state.as_deref().unwrap_or(""), value.as_deref()))
            .collect();

        Ok(SourceTable::new(kind, rows))
    }

    /// Get a column as optional strings, failing with a schema error when absent.
    fn text_column(
        df: &DataFrame,
        kind: SourceKind,
        name: &str,
    ) -> Result<Vec<Option<String>>, LoaderError> {
        let column = df.column(name).map_err(|_| LoaderError::SchemaError {
            kind,
            column: name.to_string(),
        })?;

        let text = column.cast(&DataType::String)?;
        let values = text
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();

        Ok(values)
    }
}
