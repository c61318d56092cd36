//! App model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::AscClient;
use crate::envelope::{Attributes, ResourceType, Response, SingleResponse};
use crate::error::Result;
use crate::query::{ListOptions, Query};
use crate::traits::{Get, List};

/// An app registered in App Store Connect.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppAttributes {
    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Bundle identifier (e.g. `com.example.app`).
    #[serde(default)]
    pub bundle_id: String,

    /// Stock keeping unit.
    #[serde(default)]
    pub sku: String,

    /// Primary locale (e.g. `en-US`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_locale: Option<String>,
}

impl Attributes for AppAttributes {
    const RESOURCE_TYPE: ResourceType = ResourceType::Apps;
}

/// Query options for `GET /v1/apps`.
#[derive(Debug, Clone, Default)]
pub struct AppsQuery {
    query: Query,
}

impl AppsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only apps with these bundle IDs.
    #[must_use]
    pub fn filter_bundle_ids<I, S>(mut self, bundle_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query.set_filter("bundleId", bundle_ids);
        self
    }

    /// Only apps with these names.
    #[must_use]
    pub fn filter_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query.set_filter("name", names);
        self
    }

    /// Only apps with these SKUs.
    #[must_use]
    pub fn filter_skus<I, S>(mut self, skus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query.set_filter("sku", skus);
        self
    }
}

impl ListOptions for AppsQuery {
    fn query(&self) -> &Query {
        &self.query
    }

    fn query_mut(&mut self) -> &mut Query {
        &mut self.query
    }
}

#[async_trait]
impl Get for AppAttributes {
    async fn get(client: &AscClient, id: &str) -> Result<SingleResponse<Self>> {
        let path = format!("v1/apps/{}", urlencoding::encode(id.trim()));
        client.get_resource("app", &path).await
    }
}

#[async_trait]
impl List for AppAttributes {
    const ENDPOINT: &'static str = "apps";
    type Parent = ();
    type Query = AppsQuery;

    fn path(_parent: &()) -> String {
        "v1/apps".to_string()
    }
}

/// Fetch one page of apps.
pub async fn get_apps(client: &AscClient, query: &AppsQuery) -> Result<Response<AppAttributes>> {
    AppAttributes::list_page(client, &(), query).await
}

/// Get a single app by ID.
pub async fn get_app(client: &AscClient, app_id: &str) -> Result<SingleResponse<AppAttributes>> {
    AppAttributes::get(client, app_id).await
}
