//! Validation of server-supplied continuation links.
//!
//! The transport attaches the bearer token to whatever URL it is handed, so a
//! `links.next` value must be checked against the configured API origin before
//! it is ever used as a request target. The check is an origin allow-list:
//! scheme, host and effective port must match exactly. Path and query are left
//! untouched.

use thiserror::Error;
use url::Url;

/// Reasons a continuation link is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The link is not an absolute URL.
    #[error("malformed URL: {reason}")]
    Malformed { reason: String },

    /// The link uses a scheme other than the trusted one.
    #[error("scheme '{scheme}' is not allowed, expected '{expected}'")]
    InsecureScheme { scheme: String, expected: String },

    /// The link points at a host other than the trusted API host.
    #[error("host '{host}' is not the trusted API host")]
    UntrustedHost { host: String },

    /// The link points at the trusted host on a different port.
    #[error("port {port:?} is not the trusted API port")]
    UntrustedPort { port: Option<u16> },
}

/// The single origin a client is allowed to send credentials to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedOrigin {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl TrustedOrigin {
    /// Derive the trusted origin from a client base URL.
    ///
    /// Returns `None` if the URL has no host.
    #[must_use]
    pub fn from_base_url(base_url: &Url) -> Option<Self> {
        let host = base_url.host_str()?;
        Some(Self {
            scheme: base_url.scheme().to_string(),
            host: host.to_string(),
            port: base_url.port_or_known_default(),
        })
    }

    /// The trusted scheme.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The trusted host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Whether an already-parsed URL targets this origin.
    #[must_use]
    pub fn matches(&self, url: &Url) -> bool {
        self.check(url).is_ok()
    }

    /// Validate a continuation link, returning the parsed URL on success.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the link cannot be parsed as an
    /// absolute URL or does not target this origin.
    pub fn validate(&self, raw: &str) -> Result<Url, ValidationError> {
        let url = Url::parse(raw.trim()).map_err(|e| ValidationError::Malformed {
            reason: e.to_string(),
        })?;
        self.check(&url)?;
        Ok(url)
    }

    fn check(&self, url: &Url) -> Result<(), ValidationError> {
        if url.scheme() != self.scheme {
            return Err(ValidationError::InsecureScheme {
                scheme: url.scheme().to_string(),
                expected: self.scheme.clone(),
            });
        }

        match url.host_str() {
            Some(host) if host == self.host => {}
            Some(host) => {
                return Err(ValidationError::UntrustedHost {
                    host: host.to_string(),
                })
            }
            None => {
                return Err(ValidationError::UntrustedHost {
                    host: String::new(),
                })
            }
        }

        if url.port_or_known_default() != self.port {
            return Err(ValidationError::UntrustedPort {
                port: url.port_or_known_default(),
            });
        }

        Ok(())
    }
}
