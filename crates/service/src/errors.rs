use models::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ServiceError {
    /// The underlying message without the category prefix, as reported to
    /// API callers in the `detail` field.
    pub fn detail(&self) -> String {
        match self {
            Self::Storage(m) | Self::Parse(m) | Self::Upstream(m) => m.clone(),
            Self::Model(e) => e.to_string(),
        }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(e: std::io::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
