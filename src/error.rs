//! Error types for App Store Connect API operations.

use thiserror::Error;

use crate::next_link::ValidationError;

/// Errors that can occur during App Store Connect API operations.
#[derive(Debug, Error)]
pub enum AscError {
    /// Configuration is missing or incomplete.
    #[error("App Store Connect configuration required: {0}")]
    ConfigMissing(String),

    /// Configuration is present but unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A server-supplied continuation link failed the trusted-origin check.
    ///
    /// No request was sent.
    #[error("{endpoint}: refusing to follow next link '{url}': {source}")]
    InvalidNextUrl {
        endpoint: &'static str,
        url: String,
        #[source]
        source: ValidationError,
    },

    /// The response body did not match the expected envelope.
    #[error("{endpoint}: failed to parse response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// API request failed with a non-success status.
    #[error("App Store Connect API error ({status_code}): {message}")]
    Api { message: String, status_code: u16 },

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Request body could not be serialized.
    #[error("Failed to serialize request: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Coarse classification of an [`AscError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Client configuration problem, raised before any request.
    Config,
    /// A continuation link was rejected.
    Validation,
    /// A response body could not be decoded.
    Decode,
    /// Anything raised by the HTTP layer, passed through unchanged.
    Transport,
    /// A request URL or body could not be built, so nothing was sent.
    Request,
}

impl AscError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigMissing(_) | Self::InvalidConfig(_) => ErrorKind::Config,
            Self::InvalidNextUrl { .. } => ErrorKind::Validation,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Api { .. } | Self::RateLimited { .. } | Self::Http(_) => ErrorKind::Transport,
            Self::Url(_) | Self::Serialize(_) => ErrorKind::Request,
        }
    }

    /// HTTP status code, if the server answered.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => Some(*status_code),
            Self::RateLimited { .. } => Some(429),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for App Store Connect operations.
pub type Result<T> = core::result::Result<T, AscError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_names_endpoint() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = AscError::Decode {
            endpoint: "apps",
            source,
        };
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.to_string().starts_with("apps: failed to parse response"));
    }

    #[test]
    fn test_invalid_next_url_is_validation() {
        let err = AscError::InvalidNextUrl {
            endpoint: "devices",
            url: "https://evil.example/v1/devices".to_string(),
            source: ValidationError::UntrustedHost {
                host: "evil.example".to_string(),
            },
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
        let msg = err.to_string();
        assert!(msg.contains("devices"));
        assert!(msg.contains("evil.example"));
    }

    #[test]
    fn test_local_build_failures_are_request_kind() {
        let err = AscError::from(url::Url::parse("no scheme").unwrap_err());
        assert_eq!(err.kind(), ErrorKind::Request);
        assert_eq!(err.status_code(), None);

        #[derive(Debug)]
        struct Unserializable;
        impl serde::Serialize for Unserializable {
            fn serialize<S>(&self, _: S) -> core::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                Err(serde::ser::Error::custom("unsupported"))
            }
        }
        let err = AscError::Serialize(serde_json::to_vec(&Unserializable).unwrap_err());
        assert_eq!(err.kind(), ErrorKind::Request);

        let err = AscError::InvalidConfig("bad base URL".to_string());
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_api_error_status() {
        let err = AscError::Api {
            message: "not found".to_string(),
            status_code: 404,
        };
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.status_code(), Some(404));
    }
}
