//! Customer review model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::AscClient;
use crate::envelope::{Attributes, ResourceType, Response, SingleResponse};
use crate::error::Result;
use crate::query::{ListOptions, Query};
use crate::traits::{Get, List};

/// An App Store customer review.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAttributes {
    /// Star rating, 1 to 5.
    #[serde(default)]
    pub rating: u8,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub reviewer_nickname: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,

    /// ISO 3166-1 alpha-3 territory code.
    #[serde(default)]
    pub territory: String,
}

impl Attributes for ReviewAttributes {
    const RESOURCE_TYPE: ResourceType = ResourceType::CustomerReviews;
}

/// Query options for `GET /v1/apps/{id}/customerReviews`.
#[derive(Debug, Clone, Default)]
pub struct ReviewsQuery {
    query: Query,
}

impl ReviewsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only reviews with these star ratings. Values outside 1..=5 are dropped.
    #[must_use]
    pub fn filter_ratings(mut self, ratings: &[u8]) -> Self {
        let ratings: Vec<String> = ratings
            .iter()
            .filter(|r| (1..=5).contains(*r))
            .map(u8::to_string)
            .collect();
        self.query.set_filter("rating", ratings);
        self
    }

    /// Only reviews from these territories.
    #[must_use]
    pub fn filter_territories<I, S>(mut self, territories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let territories: Vec<String> = territories
            .into_iter()
            .map(|t| t.as_ref().trim().to_ascii_uppercase())
            .collect();
        self.query.set_filter("territory", territories);
        self
    }
}

impl ListOptions for ReviewsQuery {
    fn query(&self) -> &Query {
        &self.query
    }

    fn query_mut(&mut self) -> &mut Query {
        &mut self.query
    }
}

#[async_trait]
impl Get for ReviewAttributes {
    async fn get(client: &AscClient, id: &str) -> Result<SingleResponse<Self>> {
        let path = format!("v1/customerReviews/{}", urlencoding::encode(id.trim()));
        client.get_resource("customerReview", &path).await
    }
}

#[async_trait]
impl List for ReviewAttributes {
    const ENDPOINT: &'static str = "customerReviews";
    type Parent = str;
    type Query = ReviewsQuery;

    fn path(app_id: &str) -> String {
        format!("v1/apps/{}/customerReviews", urlencoding::encode(app_id.trim()))
    }
}

/// Fetch one page of reviews for an app.
pub async fn get_reviews(
    client: &AscClient,
    app_id: &str,
    query: &ReviewsQuery,
) -> Result<Response<ReviewAttributes>> {
    ReviewAttributes::list_page(client, app_id, query).await
}
