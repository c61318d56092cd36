//! Update trait for modifying resources.

use async_trait::async_trait;

use crate::client::AscClient;
use crate::envelope::{Attributes, SingleResponse};
use crate::error::Result;

/// Update an existing resource.
///
/// # Example
///
/// ```ignore
/// use ascapi::{AscClient, BetaGroupAttributes, BetaGroupUpdate, Update};
///
/// let client = AscClient::from_env()?;
/// let updated = BetaGroupAttributes::update(
///     &client,
///     "group-id",
///     BetaGroupUpdate {
///         name: Some("Internal QA".to_string()),
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Update: Attributes {
    /// Attribute changes accepted by the update endpoint.
    type Params: Send + Sync;

    /// Update the resource and return the server's version of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    async fn update(
        client: &AscClient,
        id: &str,
        params: Self::Params,
    ) -> Result<SingleResponse<Self>>;
}
