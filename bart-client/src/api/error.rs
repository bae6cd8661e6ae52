//! BART client error types.

use crate::domain::DomainError;

use super::convert::ConversionError;

/// Errors from the BART API client.
#[derive(Debug, thiserror::Error)]
pub enum BartError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status code
    #[error("HTTP status {status}: {message}")]
    Status { status: u16, message: String },

    /// The API reported an error in the response body
    #[error("API error: {message}")]
    Api { message: String },

    /// Response body did not match the expected shape
    #[error(
        "JSON parse error: {message}{}",
        .body.as_ref().map(|b| format!(" (body: {b})")).unwrap_or_default()
    )]
    Json {
        message: String,
        body: Option<String>,
    },

    /// A parameter was rejected before sending the request
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] DomainError),
}

impl From<ConversionError> for BartError {
    fn from(err: ConversionError) -> Self {
        BartError::Json {
            message: err.to_string(),
            body: None,
        }
    }
}
