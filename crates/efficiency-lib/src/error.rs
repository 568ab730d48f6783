//! Error types for the efficiency engine

use thiserror::Error;

/// Errors reported by the generator and analyzer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl EngineError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Returns true for caller-side input errors
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, EngineError::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
