//! tf-results: export of computed properties.
//!
//! Rows are appended to CSV files one state point at a time; a header line is
//! written only when the file is empty, so repeated runs accumulate into one
//! table.

pub mod csv;
pub mod types;

pub use csv::{CSV_HEADER, append_row, append_rows, read_rows};
pub use types::PropertyRow;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {reason}")]
    Parse { line: usize, reason: String },
}
