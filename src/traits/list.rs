//! List trait for fetching paginated collections.

use async_trait::async_trait;

use crate::client::AscClient;
use crate::envelope::{Attributes, Resource, Response};
use crate::error::Result;
use crate::query::ListOptions;

/// List resources one page at a time.
///
/// `list_page` issues exactly one request. To continue, pass the previous
/// page's `links.next` back through the family's `next_url` option.
///
/// # Example
///
/// ```ignore
/// use ascapi::{AscClient, DeviceAttributes, DevicesQuery, List, ListOptions};
///
/// let client = AscClient::from_env()?;
///
/// // First page
/// let page = DeviceAttributes::list_page(&client, &(), &DevicesQuery::new().limit(50)).await?;
///
/// // Following page
/// if let Some(next) = page.next_url() {
///     let query = DevicesQuery::new().next_url(next);
///     let more = DeviceAttributes::list_page(&client, &(), &query).await?;
/// }
/// ```
#[async_trait]
pub trait List: Attributes {
    /// Name used for this collection in errors.
    const ENDPOINT: &'static str;

    /// The resource the collection hangs off (`str` app ID for nested
    /// collections, `()` for top-level ones).
    type Parent: Send + Sync + ?Sized;

    /// Query options for this endpoint family.
    type Query: ListOptions + Default + Send + Sync;

    /// Collection path relative to the API base URL.
    fn path(parent: &Self::Parent) -> String;

    /// Fetch one page.
    ///
    /// # Errors
    ///
    /// Returns an error if a continuation link is rejected, the request fails,
    /// or the body cannot be decoded.
    async fn list_page(
        client: &AscClient,
        parent: &Self::Parent,
        query: &Self::Query,
    ) -> Result<Response<Self>> {
        client
            .get_page(Self::ENDPOINT, &Self::path(parent), query.query())
            .await
    }

    /// Fetch every page, following continuation links.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fails.
    async fn list_all(
        client: &AscClient,
        parent: &Self::Parent,
        query: &Self::Query,
    ) -> Result<Vec<Resource<Self>>> {
        client
            .get_all_pages(Self::ENDPOINT, &Self::path(parent), query.query())
            .await
    }
}
