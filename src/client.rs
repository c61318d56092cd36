//! App Store Connect API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Paginated fetching lives in [`crate::fetch`]; entity operations are
//! implemented via traits on attribute types.

use std::env;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, Response};
use serde::Serialize;
use url::Url;

use crate::error::{AscError, Result};
use crate::next_link::TrustedOrigin;

/// Production API base URL.
pub const DEFAULT_API_URL: &str = "https://api.appstoreconnect.apple.com/";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("ascapi/", env!("CARGO_PKG_VERSION"));

/// Settings for constructing an [`AscClient`].
#[derive(Clone)]
pub struct ClientConfig {
    /// Pre-minted bearer token (an App Store Connect JWT).
    pub token: String,
    /// API base URL; its origin is the only one credentials are sent to.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    /// Config for the production API with the default timeout.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read configuration from environment variables.
    ///
    /// - `ASC_BEARER_TOKEN` (required)
    /// - `ASC_API_URL` (optional, defaults to the production API)
    /// - `ASC_TIMEOUT` or `ASC_TIMEOUT_SECONDS` (optional)
    ///
    /// # Errors
    ///
    /// Returns an error if `ASC_BEARER_TOKEN` is not set or empty.
    pub fn from_env() -> Result<Self> {
        let token = env::var("ASC_BEARER_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AscError::ConfigMissing("ASC_BEARER_TOKEN environment variable not set".to_string())
            })?;

        let base_url = env::var("ASC_API_URL")
            .ok()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = resolve_timeout(
            env::var("ASC_TIMEOUT").ok().as_deref(),
            env::var("ASC_TIMEOUT_SECONDS").ok().as_deref(),
        );

        Ok(Self {
            token,
            base_url,
            timeout,
        })
    }
}

/// Pick the request timeout from the two override variables.
///
/// `ASC_TIMEOUT` accepts a bare number of seconds or a duration like `1m30s`
/// and wins over `ASC_TIMEOUT_SECONDS`. An unparseable or zero value falls
/// back to the default.
pub fn resolve_timeout(timeout: Option<&str>, timeout_seconds: Option<&str>) -> Duration {
    let from_timeout = timeout
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(parse_duration);
    if let Some(parsed) = from_timeout {
        return parsed.unwrap_or(DEFAULT_TIMEOUT);
    }

    timeout_seconds
        .map(str::trim)
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT)
}

/// Parse a timeout such as `90`, `1500ms`, `1.5s`, `1h` or `1m30s`.
///
/// A bare integer is seconds. Otherwise every number needs one of the units
/// `ns`, `us`, `µs`, `ms`, `s`, `m` or `h`.
fn parse_duration(value: &str) -> Option<Duration> {
    if let Ok(secs) = value.parse::<u64>() {
        return (secs > 0).then(|| Duration::from_secs(secs));
    }

    let is_number = |c: char| c.is_ascii_digit() || c == '.';
    let mut rest = value;
    let mut total: u64 = 0;
    while !rest.is_empty() {
        let number_end = rest.find(|c: char| !is_number(c)).unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_end);
        let unit_end = tail.find(is_number).unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);
        let unit_nanos: u64 = match unit {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60_000_000_000,
            "h" => 3_600_000_000_000,
            _ => return None,
        };

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let mut nanos = whole.checked_mul(unit_nanos)?;
        let mut scale = unit_nanos;
        for digit in fraction.chars() {
            scale /= 10;
            nanos = nanos.checked_add(u64::from(digit.to_digit(10)?) * scale)?;
        }

        total = total.checked_add(nanos)?;
        rest = tail;
    }

    (total > 0).then(|| Duration::from_nanos(total))
}

/// Low-level App Store Connect API client.
///
/// Sends requests and attaches the bearer token only to URLs on the trusted
/// origin derived from the configured base URL.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use ascapi::AscClient;
///
/// # fn example() -> ascapi::Result<()> {
/// // Create from environment variables
/// let client = AscClient::from_env()?;
///
/// // Or configure manually
/// let client = AscClient::new("eyJhbGciOi...", "https://api.appstoreconnect.apple.com")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AscClient {
    http: Client,
    base_url: Arc<Url>,
    origin: Arc<TrustedOrigin>,
    token: String,
}

impl std::fmt::Debug for AscClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AscClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl AscClient {
    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `ASC_BEARER_TOKEN` is not set or the base URL is
    /// unusable.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a new client with the provided token and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or not `https` (plain
    /// `http` is accepted for loopback hosts only).
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig {
            token: token.to_string(),
            base_url: base_url.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Create a client from an explicit config.
    ///
    /// # Errors
    ///
    /// See [`AscClient::new`].
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };

        let base_url = Url::parse(&base_url_str).map_err(|e| {
            AscError::InvalidConfig(format!("invalid base URL '{}': {e}", config.base_url))
        })?;
        check_base_scheme(&base_url)?;

        let origin = TrustedOrigin::from_base_url(&base_url).ok_or_else(|| {
            AscError::InvalidConfig(format!("base URL '{base_url}' has no host"))
        })?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout)
            .build()
            .map_err(AscError::Http)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            origin: Arc::new(origin),
            token: config.token,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The origin continuation links must match.
    pub fn trusted_origin(&self) -> &TrustedOrigin {
        &self.origin
    }

    /// Resolve an endpoint path against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be joined.
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// GET an absolute URL and return the raw body.
    pub async fn get_url(&self, url: Url) -> Result<Vec<u8>> {
        self.send(Method::GET, url, None::<&()>).await
    }

    /// GET an endpoint path and return the raw body.
    pub async fn get(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.endpoint_url(path)?;
        self.get_url(url).await
    }

    /// POST a JSON body to an endpoint path.
    pub async fn post<B: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Vec<u8>> {
        let url = self.endpoint_url(path)?;
        self.send(Method::POST, url, Some(body)).await
    }

    /// PATCH a JSON body to an endpoint path.
    pub async fn patch<B: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Vec<u8>> {
        let url = self.endpoint_url(path)?;
        self.send(Method::PATCH, url, Some(body)).await
    }

    /// DELETE an endpoint path.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.endpoint_url(path)?;
        self.send(Method::DELETE, url, None::<&()>).await?;
        Ok(())
    }

    /// Issue one request and return the body of a successful response.
    ///
    /// The bearer token is attached only when `url` is on the trusted origin.
    #[tracing::instrument(skip(self, url, body), fields(url = %url))]
    pub async fn send<B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Vec<u8>> {
        let authorized = self.origin.matches(&url);
        if !authorized {
            tracing::debug!("target is off the trusted origin, sending without credentials");
        }

        let mut request = self.http.request(method, url);
        if authorized {
            request = request.bearer_auth(&self.token);
        }
        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body).map_err(AscError::Serialize)?);
        }

        let response = request.send().await.map_err(AscError::Http)?;
        let response = Self::check_response(response).await?;
        let bytes = response.bytes().await.map_err(AscError::Http)?;
        Ok(bytes.to_vec())
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(AscError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(AscError::Api {
            message,
            status_code: status.as_u16(),
        })
    }

    /// Extract error message from a failed response.
    ///
    /// App Store Connect reports failures as `{"errors": [{"title", "detail"}]}`.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(first) = json.get("errors").and_then(|e| e.get(0)) {
                let detail = first.get("detail").and_then(|d| d.as_str());
                let title = first.get("title").and_then(|t| t.as_str());
                match (title, detail) {
                    (Some(title), Some(detail)) => return format!("{title}: {detail}"),
                    (Some(msg), None) | (None, Some(msg)) => return msg.to_string(),
                    (None, None) => {}
                }
            }
        }

        if body.trim().is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

fn check_base_scheme(base_url: &Url) -> Result<()> {
    match base_url.scheme() {
        "https" => Ok(()),
        "http" if is_loopback(base_url) => Ok(()),
        other => Err(AscError::InvalidConfig(format!(
            "base URL must use https, got '{other}'"
        ))),
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(url::Host::Ipv4(ip)) => IpAddr::V4(ip).is_loopback(),
        Some(url::Host::Ipv6(ip)) => IpAddr::V6(ip).is_loopback(),
        None => false,
    }
}
