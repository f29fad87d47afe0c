//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `WarrenError` as one
//! variant where they need to surface settings problems.

use thiserror::Error;

/// The top-level error type for `warren-core`.
#[derive(Debug, Error)]
pub enum WarrenError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `warren-core`.
pub type WarrenResult<T> = Result<T, WarrenError>;
