//! Unified error type for the crate. Every fallible surface (parsing, generation, scheduling,
//! transformer execution) collapses into one enum so callers match on a single type instead of
//! threading several crate-specific error types through `obfuscate`.

use thiserror::Error;

use crate::transformer::TransformerName;

#[derive(Debug, Error)]
pub enum ObfuscationError {
    #[error("failed to parse source: {0}")]
    ParseError(String),

    #[error("failed to generate code: {0}")]
    GenerateError(String),

    #[error("transformer schedule has a dependency cycle involving: {involved:?}")]
    ScheduleCycle { involved: Vec<TransformerName> },

    #[error("transformer {name:?} failed during {stage}: {message}")]
    TransformerFailure {
        name: TransformerName,
        stage: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, ObfuscationError>;
