//! Error types for airvoice-devices

use thiserror::Error;

/// Device directory error type
#[derive(Debug, Error)]
pub enum Error {
    /// No token was supplied
    #[error("token must not be empty")]
    EmptyToken,

    /// The API rejected the token (any non-200 response)
    #[error("token rejected by AirGradient API (HTTP {status})")]
    InvalidToken {
        /// HTTP status returned by the API
        status: u16,
    },

    /// The requested device position does not exist
    #[error("device {index} not found")]
    NotFound {
        /// Requested 1-based position
        index: i64,
    },

    /// Network/connection error (including timeouts)
    #[error("network error: {0}")]
    Network(String),

    /// Response body was not a device array
    #[error("failed to decode device list: {0}")]
    Decode(String),

    /// HTTP client could not be constructed
    #[error("client configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Whether the failure came from the transport rather than the API's answer
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Network(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Network(format!("request timed out: {}", err.without_url()))
        } else {
            Error::Network(err.without_url().to_string())
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(Error::Network("connection refused".to_string()).is_transient());
        assert!(!Error::InvalidToken { status: 401 }.is_transient());
        assert!(!Error::NotFound { index: 3 }.is_transient());
        assert!(!Error::EmptyToken.is_transient());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidToken { status: 403 };
        assert!(err.to_string().contains("403"));

        let err = Error::NotFound { index: 0 };
        assert_eq!(err.to_string(), "device 0 not found");
    }
}
