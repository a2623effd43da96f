use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown action: {0} (valid: start, stop)")]
    UnknownAction(String),

    #[error("unknown scheduling strategy: {0}")]
    UnknownScheduling(String),

    #[error("invalid model: {0}")]
    Invalid(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
