//! Beta tester model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::AscClient;
use crate::envelope::{Attributes, ResourceType, SingleResponse};
use crate::error::Result;
use crate::query::{ListOptions, Query};
use crate::traits::{Get, List};

/// How a tester was invited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BetaInviteType {
    Email,
    PublicLink,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Where a tester is in the invitation flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BetaTesterState {
    NotInvited,
    Invited,
    Accepted,
    Installed,
    Revoked,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A TestFlight beta tester.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetaTesterAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default)]
    pub invite_type: BetaInviteType,

    #[serde(default)]
    pub state: BetaTesterState,
}

impl BetaTesterAttributes {
    /// "First Last", falling back to the email address.
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.email.clone().unwrap_or_default()
        } else {
            name
        }
    }
}

impl Attributes for BetaTesterAttributes {
    const RESOURCE_TYPE: ResourceType = ResourceType::BetaTesters;
}

/// Query options for `GET /v1/betaTesters`.
#[derive(Debug, Clone, Default)]
pub struct BetaTestersQuery {
    query: Query,
}

impl BetaTestersQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only testers of these apps.
    #[must_use]
    pub fn filter_apps<I, S>(mut self, app_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query.set_filter("apps", app_ids);
        self
    }

    /// Only testers in these beta groups.
    #[must_use]
    pub fn filter_beta_groups<I, S>(mut self, group_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query.set_filter("betaGroups", group_ids);
        self
    }

    #[must_use]
    pub fn filter_emails<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query.set_filter("email", emails);
        self
    }
}

impl ListOptions for BetaTestersQuery {
    fn query(&self) -> &Query {
        &self.query
    }

    fn query_mut(&mut self) -> &mut Query {
        &mut self.query
    }
}

#[async_trait]
impl Get for BetaTesterAttributes {
    async fn get(client: &AscClient, id: &str) -> Result<SingleResponse<Self>> {
        let path = format!("v1/betaTesters/{}", urlencoding::encode(id.trim()));
        client.get_resource("betaTester", &path).await
    }
}

#[async_trait]
impl List for BetaTesterAttributes {
    const ENDPOINT: &'static str = "betaTesters";
    type Parent = ();
    type Query = BetaTestersQuery;

    fn path(_parent: &()) -> String {
        "v1/betaTesters".to_string()
    }
}
