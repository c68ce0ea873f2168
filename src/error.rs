//! Errors that end a screening run before any report is produced.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ScreeningError {
    #[error("missing Telegram credentials in environment variables: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),

    #[error("invalid value for {key}: {reason}")]
    InvalidConfig { key: String, reason: String },

    #[error("ticker file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("column {column:?} not found in {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("cannot read ticker file {}: {reason}", .path.display())]
    Spreadsheet { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
