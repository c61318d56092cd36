//! Get trait for fetching single resources.

use async_trait::async_trait;

use crate::client::AscClient;
use crate::envelope::{Attributes, SingleResponse};
use crate::error::Result;

/// Fetch a single resource by ID.
///
/// # Example
///
/// ```ignore
/// use ascapi::{AscClient, AppAttributes, Get};
///
/// let client = AscClient::from_env()?;
/// let app = AppAttributes::get(&client, "1234567890").await?;
/// println!("{}", app.data.attributes.name);
/// ```
#[async_trait]
pub trait Get: Attributes {
    /// Fetch the resource by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    async fn get(client: &AscClient, id: &str) -> Result<SingleResponse<Self>>;
}
