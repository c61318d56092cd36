//! App Store Connect API client library.
//!
//! A Rust library for fetching paginated App Store Connect resources. All
//! endpoints share one JSON:API envelope, one query builder and one page
//! fetcher; each resource type plugs in its attribute shape through the
//! [`Get`], [`List`] and [`Update`] traits.
//!
//! # Quick Start
//!
//! ```no_run
//! use ascapi::{AscClient, DeviceAttributes, DevicesQuery, List, ListOptions, Platform};
//!
//! #[tokio::main]
//! async fn main() -> ascapi::Result<()> {
//!     // Create client from environment variables
//!     let client = AscClient::from_env()?;
//!
//!     // First page of iOS devices
//!     let query = DevicesQuery::new()
//!         .filter_platforms(&[Platform::Ios])
//!         .limit(50);
//!     let page = DeviceAttributes::list_page(&client, &(), &query).await?;
//!     println!("Found {} devices", page.len());
//!
//!     // Explicitly follow the next link
//!     if let Some(next) = page.next_url() {
//!         let query = DevicesQuery::new().next_url(next);
//!         let more = DeviceAttributes::list_page(&client, &(), &query).await?;
//!         println!("...and {} more", more.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Continuation links
//!
//! A `links.next` value is only ever followed after it has been checked
//! against the client's trusted origin (scheme, host and port of the
//! configured base URL). Anything else fails with
//! [`AscError::InvalidNextUrl`] before a request is made, so the bearer
//! token never leaves the API host.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `ASC_BEARER_TOKEN` (required) - A pre-minted App Store Connect JWT
//! - `ASC_API_URL` (optional) - Base URL (defaults to `https://api.appstoreconnect.apple.com`)
//! - `ASC_TIMEOUT` / `ASC_TIMEOUT_SECONDS` (optional) - Request timeout

pub mod cli;
mod client;
mod envelope;
mod error;
mod fetch;
mod models;
mod next_link;
pub mod output;
mod query;
mod traits;

// Re-export core types
pub use client::{resolve_timeout, AscClient, ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use envelope::{
    Attributes, Links, Meta, Paging, Resource, ResourceLinks, ResourceType, Response,
    SingleResponse,
};
pub use error::{AscError, ErrorKind, Result};
pub use fetch::{decode, RequestTarget, MAX_PAGES};
pub use next_link::{TrustedOrigin, ValidationError};
pub use query::{normalize_list, ListOptions, Query, QueryTarget};

// Re-export traits
pub use traits::{Get, List, Update};

// Re-export models
pub use models::{
    // App types
    AppAttributes,
    AppsQuery,
    // Beta group types
    BetaGroupAttributes,
    BetaGroupUpdate,
    BetaGroupsQuery,
    // Beta tester types
    BetaInviteType,
    BetaTesterAttributes,
    BetaTesterState,
    BetaTestersQuery,
    // Build types
    BuildAttributes,
    BuildsQuery,
    // Device types
    DeviceAttributes,
    DevicesQuery,
    Platform,
    // Review types
    ReviewAttributes,
    ReviewsQuery,
};

// Re-export convenience functions
pub use models::{get_app, get_apps, get_reviews};
