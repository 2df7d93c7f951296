//! Error types for Accela API operations.

use thiserror::Error;

/// Errors that can occur during Accela API operations.
#[derive(Debug, Error)]
pub enum AccelaError {
    /// Configuration is missing or incomplete.
    #[error("Accela configuration required: {0}")]
    ConfigMissing(String),

    /// Configuration value cannot be used (e.g. non-ASCII header value).
    #[error("Invalid Accela configuration: {0}")]
    ConfigInvalid(String),

    /// HTTP transport error (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status other than 404.
    #[error("Accela API error ({status_code}): {message}")]
    Api { status_code: u16, message: String },

    /// The API answered 404.
    #[error("Resource not found: {path}")]
    NotFound { path: String },

    /// A payload could not be decoded into its model.
    #[error("Failed to decode '{field}': {reason}")]
    Decode { field: String, reason: String },

    /// Only read operations are implemented.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while writing downloaded content.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AccelaError {
    /// Build a decode error for `field`.
    pub fn decode(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// HTTP status reported by the API, if this error came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => Some(*status_code),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// True when the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for Accela operations.
pub type Result<T> = core::result::Result<T, AccelaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_reports_404() {
        let err = AccelaError::NotFound {
            path: "records/abc".to_string(),
        };
        assert_eq!(err.status_code(), Some(404));
        assert!(err.is_not_found());
        assert!(err.to_string().contains("records/abc"));
    }

    #[test]
    fn test_api_error_status() {
        let err = AccelaError::Api {
            status_code: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.status_code(), Some(500));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_decode_error_names_field() {
        let err = AccelaError::decode("modifiedDate", "bad date");
        assert_eq!(err.status_code(), None);
        assert_eq!(err.to_string(), "Failed to decode 'modifiedDate': bad date");
    }
}
