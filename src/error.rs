//! Error types for the simulation core
//!
//! These only signal programmer error (malformed construction or queries).
//! Absence is never an error: empty cells, missing players and free space are
//! all reported as `None`.

use thiserror::Error;

/// Errors raised synchronously by simulation operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A constructor or query received a value it cannot work with
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A vector operation received an unusable operand
    #[error("invalid operand: {0}")]
    InvalidOperand(String),
}

pub type SimResult<T> = Result<T, SimError>;

/// Errors reading level packs or settings from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level pack is empty")]
    Empty,
}
