//! Device model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::AscClient;
use crate::envelope::{Attributes, ResourceType, SingleResponse};
use crate::error::Result;
use crate::query::{ListOptions, Query};
use crate::traits::{Get, List};

/// Bundle ID / device platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    Ios,
    MacOs,
    Universal,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "IOS",
            Self::MacOs => "MAC_OS",
            Self::Universal => "UNIVERSAL",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// A registered development device.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceAttributes {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub udid: String,

    #[serde(default)]
    pub platform: Platform,

    /// `ENABLED` or `DISABLED`.
    #[serde(default)]
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_date: Option<String>,
}

impl Attributes for DeviceAttributes {
    const RESOURCE_TYPE: ResourceType = ResourceType::Devices;
}

/// Query options for `GET /v1/devices`.
#[derive(Debug, Clone, Default)]
pub struct DevicesQuery {
    query: Query,
}

impl DevicesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filter_platforms(mut self, platforms: &[Platform]) -> Self {
        self.query
            .set_filter("platform", platforms.iter().map(Platform::as_str));
        self
    }

    /// `ENABLED` or `DISABLED`.
    #[must_use]
    pub fn filter_status(mut self, status: &str) -> Self {
        self.query.set_filter("status", [status]);
        self
    }

    #[must_use]
    pub fn filter_udids<I, S>(mut self, udids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query.set_filter("udid", udids);
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
}

impl ListOptions for DevicesQuery {
    fn query(&self) -> &Query {
        &self.query
    }

    fn query_mut(&mut self) -> &mut Query {
        &mut self.query
    }
}

#[async_trait]
impl Get for DeviceAttributes {
    async fn get(client: &AscClient, id: &str) -> Result<SingleResponse<Self>> {
        let path = format!("v1/devices/{}", urlencoding::encode(id.trim()));
        client.get_resource("device", &path).await
    }
}

#[async_trait]
impl List for DeviceAttributes {
    const ENDPOINT: &'static str = "devices";
    type Parent = ();
    type Query = DevicesQuery;

    fn path(_parent: &()) -> String {
        "v1/devices".to_string()
    }
}
