use std::path::PathBuf;
use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong in the policy core. Configuration errors are
/// construction-time and fatal; shape errors are fatal to the offending call
/// only. No variant is ever retried internally.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(&'static str),
    #[error("shape mismatch in {context}: expected {expected}, got {got}")]
    Shape {
        context: &'static str,
        expected: String,
        got: String,
    },
    #[error("policy was constructed with training disabled")]
    Frozen,
    #[error("non-finite {what} ({value}); optimizer step withheld")]
    NonFinite { what: &'static str, value: f32 },
    #[error("checkpoint not found at {path}")]
    CheckpointNotFound { path: PathBuf },
    #[error("checkpoint at {path} does not match the policy configuration: {source}")]
    CheckpointLoad {
        path: PathBuf,
        source: candle_core::Error,
    },
    #[error(transparent)]
    Candle(#[from] candle_core::Error),
}
