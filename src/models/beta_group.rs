//! Beta group model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::AscClient;
use crate::envelope::{Attributes, ResourceType, SingleResponse};
use crate::error::Result;
use crate::fetch::decode;
use crate::query::{ListOptions, Query};
use crate::traits::{Get, List, Update};

/// A TestFlight beta group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetaGroupAttributes {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub is_internal_group: bool,

    #[serde(default)]
    pub has_access_to_all_builds: bool,

    #[serde(default)]
    pub public_link_enabled: bool,

    #[serde(default)]
    pub public_link_limit_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_link_limit: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_link: Option<String>,

    #[serde(default)]
    pub feedback_enabled: bool,
}

impl Attributes for BetaGroupAttributes {
    const RESOURCE_TYPE: ResourceType = ResourceType::BetaGroups;
}

/// Attribute changes for `PATCH /v1/betaGroups/{id}`. Unset fields are left
/// untouched on the server.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BetaGroupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_link_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_link_limit_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_link_limit: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_enabled: Option<bool>,
}

#[derive(Serialize)]
struct UpdateRequest<'a> {
    data: UpdateData<'a>,
}

#[derive(Serialize)]
struct UpdateData<'a> {
    #[serde(rename = "type")]
    resource_type: ResourceType,
    id: &'a str,
    attributes: &'a BetaGroupUpdate,
}

/// Query options for `GET /v1/betaGroups`.
#[derive(Debug, Clone, Default)]
pub struct BetaGroupsQuery {
    query: Query,
}

impl BetaGroupsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only groups belonging to these apps.
    #[must_use]
    pub fn filter_apps<I, S>(mut self, app_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query.set_filter("app", app_ids);
        self
    }

    #[must_use]
    pub fn filter_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query.set_filter("name", names);
        self
    }

    #[must_use]
    pub fn filter_internal(mut self, internal: bool) -> Self {
        self.query
            .set_filter("isInternalGroup", [if internal { "true" } else { "false" }]);
        self
    }
}

impl ListOptions for BetaGroupsQuery {
    fn query(&self) -> &Query {
        &self.query
    }

    fn query_mut(&mut self) -> &mut Query {
        &mut self.query
    }
}

#[async_trait]
impl Get for BetaGroupAttributes {
    async fn get(client: &AscClient, id: &str) -> Result<SingleResponse<Self>> {
        let path = format!("v1/betaGroups/{}", urlencoding::encode(id.trim()));
        client.get_resource("betaGroup", &path).await
    }
}

#[async_trait]
impl List for BetaGroupAttributes {
    const ENDPOINT: &'static str = "betaGroups";
    type Parent = ();
    type Query = BetaGroupsQuery;

    fn path(_parent: &()) -> String {
        "v1/betaGroups".to_string()
    }
}

#[async_trait]
impl Update for BetaGroupAttributes {
    type Params = BetaGroupUpdate;

    #[tracing::instrument(skip(client, params))]
    async fn update(
        client: &AscClient,
        id: &str,
        params: Self::Params,
    ) -> Result<SingleResponse<Self>> {
        let id = id.trim();
        let body = UpdateRequest {
            data: UpdateData {
                resource_type: Self::RESOURCE_TYPE,
                id,
                attributes: &params,
            },
        };
        let path = format!("v1/betaGroups/{}", urlencoding::encode(id));

        let response = client.patch(&path, &body).await?;
        decode("betaGroup update", &response)
    }
}
