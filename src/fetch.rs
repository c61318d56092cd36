//! Paginated fetching and response decoding.
//!
//! A list call requests exactly one page. It either builds a fresh URL from the
//! endpoint path and the encoded query, or follows a continuation link from a
//! previous page after the link has passed the trusted-origin check. Callers
//! walk further pages explicitly by feeding `links.next` back in.

use serde::de::DeserializeOwned;
use url::Url;

use crate::client::AscClient;
use crate::envelope::{Resource, Response, SingleResponse};
use crate::error::{AscError, Result};
use crate::query::{Query, QueryTarget};

/// Maximum pages [`AscClient::get_all_pages`] will walk.
pub const MAX_PAGES: usize = 1000;

/// The single URL a list call will request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTarget {
    /// Endpoint path plus encoded query.
    Fresh(Url),
    /// A validated continuation link, used verbatim.
    FollowingLink(Url),
}

impl RequestTarget {
    /// The URL to request.
    pub fn url(&self) -> &Url {
        match self {
            Self::Fresh(url) | Self::FollowingLink(url) => url,
        }
    }

    fn into_url(self) -> Url {
        match self {
            Self::Fresh(url) | Self::FollowingLink(url) => url,
        }
    }
}

/// Decode a response body into `T`.
///
/// # Errors
///
/// Returns [`AscError::Decode`] naming `endpoint` if the body does not match.
pub fn decode<T: DeserializeOwned>(endpoint: &'static str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| AscError::Decode { endpoint, source })
}

impl AscClient {
    /// Decide which URL a list call should request.
    ///
    /// # Errors
    ///
    /// Returns [`AscError::InvalidNextUrl`] if the query carries a continuation
    /// link that is not on the trusted origin.
    pub fn plan_request(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &Query,
    ) -> Result<RequestTarget> {
        match query.target() {
            QueryTarget::Continuation(next) => {
                let url = self.trusted_origin().validate(next).map_err(|source| {
                    AscError::InvalidNextUrl {
                        endpoint,
                        url: next.to_string(),
                        source,
                    }
                })?;
                Ok(RequestTarget::FollowingLink(url))
            }
            QueryTarget::Fresh(encoded) => {
                let mut url = self.endpoint_url(path)?;
                if !encoded.is_empty() {
                    url.set_query(Some(&encoded));
                }
                Ok(RequestTarget::Fresh(url))
            }
        }
    }

    /// Fetch one page of a collection endpoint.
    ///
    /// `endpoint` names the call in errors; `path` is the endpoint path
    /// relative to the base URL (e.g. `v1/apps`).
    ///
    /// # Errors
    ///
    /// Fails without sending anything if a continuation link is rejected;
    /// otherwise propagates transport and decode errors.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_page<A: DeserializeOwned + Default>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &Query,
    ) -> Result<Response<A>> {
        let target = self.plan_request(endpoint, path, query)?;
        tracing::debug!(url = %target.url(), "requesting page");

        let body = self.get_url(target.into_url()).await?;
        decode(endpoint, &body)
    }

    /// Fetch a single resource.
    ///
    /// # Errors
    ///
    /// Propagates transport and decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn get_resource<A: DeserializeOwned + Default>(
        &self,
        endpoint: &'static str,
        path: &str,
    ) -> Result<SingleResponse<A>> {
        let body = self.get(path).await?;
        decode(endpoint, &body)
    }

    /// Fetch a page, then keep following `links.next` until the last page.
    ///
    /// Each continuation link is validated like any other. Stops after
    /// [`MAX_PAGES`] pages.
    ///
    /// # Errors
    ///
    /// Returns the first error from any page; resources gathered so far are
    /// discarded.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_all_pages<A: DeserializeOwned + Default>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &Query,
    ) -> Result<Vec<Resource<A>>> {
        let mut page: Response<A> = self.get_page(endpoint, path, query).await?;
        let mut all = Vec::new();
        let mut fetched = 1;

        loop {
            let next = page.next_url().map(str::to_string);
            all.append(&mut page.data);

            let Some(next) = next else {
                break;
            };

            if fetched >= MAX_PAGES {
                tracing::warn!(
                    "Reached pagination limit of {} pages, stopping",
                    MAX_PAGES
                );
                break;
            }

            let mut follow = Query::new();
            follow.set_next_url(&next);
            page = self.get_page(endpoint, path, &follow).await?;
            fetched += 1;
        }

        Ok(all)
    }
}
