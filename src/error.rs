//! Error types for loading expedition tables.
//!
//! Aggregation and rate computation cannot fail, so the only library errors
//! come from the input boundary. The binary wraps these in `anyhow`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("failed to read expedition table: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("no `{column}` column in the header row")]
    MissingColumn { column: &'static str },

    #[error("line {line}: column `{column}` is not a non-negative integer: {value:?}")]
    InvalidCount {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: column `{column}` is not a yes/no flag: {value:?}")]
    InvalidFlag {
        line: u64,
        column: &'static str,
        value: String,
    },
}
