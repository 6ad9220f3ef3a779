// Copyright 2025 Benchmark Dashboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy shared by the loader, chart builder and front-ends.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while discovering, aggregating or loading benchmark results.
#[derive(Debug, Error)]
pub enum Error {
    /// No aggregate file exists and none could (or was allowed to) be generated.
    #[error("no benchmark results available in {}", directory.display())]
    MissingData {
        /// The result directory that was queried.
        directory: PathBuf,
    },

    /// Filesystem access failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being read, written or scanned.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A per-run JSON file could not be parsed into a record.
    #[error("malformed run record {}: {source}", path.display())]
    RunRecord {
        /// The offending `.bench.json` file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The aggregate CSV could not be read or written.
    #[error("malformed aggregate file {}: {source}", path.display())]
    Aggregate {
        /// The aggregate file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// The aggregate CSV lacks a required column.
    #[error("aggregate file {} has no '{column}' column", path.display())]
    MissingColumn {
        /// The aggregate file.
        path: PathBuf,
        /// Name of the absent column.
        column: &'static str,
    },

    /// A cell in the aggregate CSV does not hold a value of the expected type.
    #[error("aggregate file {} row {row}: invalid {column} value '{value}'", path.display())]
    InvalidValue {
        /// The aggregate file.
        path: PathBuf,
        /// 1-based data row number (header excluded).
        row: usize,
        /// Column being parsed.
        column: &'static str,
        /// Raw cell content.
        value: String,
    },
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns `true` for [`Error::MissingData`].
    pub fn is_missing_data(&self) -> bool {
        matches!(self, Error::MissingData { .. })
    }
}

/// Result type for benchmark dashboard operations.
pub type Result<T> = std::result::Result<T, Error>;
