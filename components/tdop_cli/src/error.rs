//! Error types for the CLI

use core_types::ParseError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O error
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// Source text was rejected by the parser
    #[error("Syntax error: {0}")]
    Parse(#[from] ParseError),

    /// REPL error
    #[error("REPL error: {0}")]
    Repl(String),

    /// Tree could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
