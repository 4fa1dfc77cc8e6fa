use thiserror::Error as ThisError;
use uniffi::Error;

#[derive(Debug, ThisError, Error)]
#[non_exhaustive]
pub enum FormaError {
    #[error("error: {0}")]
    Common(String),
}

impl From<anyhow::Error> for FormaError {
    fn from(e: anyhow::Error) -> Self {
        FormaError::Common(e.to_string())
    }
}

impl From<String> for FormaError {
    fn from(s: String) -> Self {
        FormaError::Common(s)
    }
}

impl From<&str> for FormaError {
    fn from(s: &str) -> Self {
        FormaError::Common(s.to_string())
    }
}
