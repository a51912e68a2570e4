use thiserror::Error;

/// Rejections raised while reading payloads and spreadsheet exports.
///
/// The `Display` text of the payload variants is what the API echoes back in
/// its `{error}` body, so keep it stable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid payload")]
    InvalidPayload,
    #[error("payload must include days")]
    MissingDays,
    #[error("Invalid body")]
    InvalidBody,
    #[error("malformed reservation document: {0}")]
    MalformedStore(&'static str),
    #[error("invalid range: {0}")]
    Range(String),
    #[error("gviz: {0}")]
    Gviz(String),
}
