//! Build model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::AscClient;
use crate::envelope::{Attributes, ResourceType, SingleResponse};
use crate::error::Result;
use crate::query::{ListOptions, Query};
use crate::traits::{Get, List};

/// An uploaded build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildAttributes {
    /// Build number (`CFBundleVersion`).
    #[serde(default)]
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub expired: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_os_version: Option<String>,

    /// `PROCESSING`, `FAILED`, `INVALID` or `VALID`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_state: Option<String>,
}

impl Attributes for BuildAttributes {
    const RESOURCE_TYPE: ResourceType = ResourceType::Builds;
}

/// Query options for `GET /v1/builds`.
#[derive(Debug, Clone, Default)]
pub struct BuildsQuery {
    query: Query,
}

impl BuildsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only builds of these apps.
    #[must_use]
    pub fn filter_apps<I, S>(mut self, app_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query.set_filter("app", app_ids);
        self
    }

    /// Only builds with these build numbers.
    #[must_use]
    pub fn filter_versions<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query.set_filter("version", versions);
        self
    }

    /// Only builds for these marketing versions.
    #[must_use]
    pub fn filter_pre_release_versions<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query.set_filter("preReleaseVersion.version", versions);
        self
    }

    /// Only builds in these processing states.
    #[must_use]
    pub fn filter_processing_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query.set_filter("processingState", states);
        self
    }
}

impl ListOptions for BuildsQuery {
    fn query(&self) -> &Query {
        &self.query
    }

    fn query_mut(&mut self) -> &mut Query {
        &mut self.query
    }
}

#[async_trait]
impl Get for BuildAttributes {
    async fn get(client: &AscClient, id: &str) -> Result<SingleResponse<Self>> {
        let path = format!("v1/builds/{}", urlencoding::encode(id.trim()));
        client.get_resource("build", &path).await
    }
}

#[async_trait]
impl List for BuildAttributes {
    const ENDPOINT: &'static str = "builds";
    type Parent = ();
    type Query = BuildsQuery;

    fn path(_parent: &()) -> String {
        "v1/builds".to_string()
    }
}
