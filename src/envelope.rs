//! JSON:API-style response envelopes.
//!
//! Every endpoint shares these generic containers; only the attribute payload
//! differs. Decoding is deliberately permissive at the resource level: a
//! resource missing its `type` or `id` still decodes (with empty defaults) so
//! one partial entry does not lose the rest of the page.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;

/// Resource type tags for the endpoint families this crate models.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    #[serde(rename = "apps")]
    Apps,
    #[serde(rename = "betaGroups")]
    BetaGroups,
    #[serde(rename = "betaTesters")]
    BetaTesters,
    #[serde(rename = "builds")]
    Builds,
    #[serde(rename = "customerReviews")]
    CustomerReviews,
    #[serde(rename = "devices")]
    Devices,
    /// Missing or unrecognised type tag.
    #[default]
    #[serde(rename = "", other)]
    Unknown,
}

impl ResourceType {
    /// The wire name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apps => "apps",
            Self::BetaGroups => "betaGroups",
            Self::BetaTesters => "betaTesters",
            Self::Builds => "builds",
            Self::CustomerReviews => "customerReviews",
            Self::Devices => "devices",
            Self::Unknown => "",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attribute payload bound to exactly one resource type.
pub trait Attributes: DeserializeOwned + Default + Send {
    /// The resource type carrying these attributes.
    const RESOURCE_TYPE: ResourceType;
}

/// Decode a field, treating an explicit `null` the same as a missing one.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single API entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de> + Default"))]
pub struct Resource<A> {
    /// The resource type tag (`type` on the wire).
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub resource_type: ResourceType,

    /// Stable resource identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    /// Typed attribute payload.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: A,

    /// Relationship sub-document, kept raw until an endpoint asks for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Box<RawValue>>,

    /// Per-resource links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<ResourceLinks>,
}

impl<A> Resource<A> {
    /// Decode the raw relationships into an endpoint-specific shape.
    ///
    /// Returns `Ok(None)` when the resource carried no relationships.
    pub fn relationships_as<R: DeserializeOwned>(&self) -> serde_json::Result<Option<R>> {
        self.relationships
            .as_deref()
            .map(|raw| serde_json::from_str(raw.get()))
            .transpose()
    }
}

/// The `self` link attached to an individual resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLinks {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

/// Pagination links on a collection response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

impl Links {
    /// The continuation link, treating a blank value as absent.
    pub fn next(&self) -> Option<&str> {
        self.next
            .as_deref()
            .map(str::trim)
            .filter(|next| !next.is_empty())
    }
}

/// Collection metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

/// Paging totals reported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// One page of a resource collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de> + Default"))]
pub struct Response<A> {
    /// The resources on this page, in server order.
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub data: Vec<Resource<A>>,

    /// Pagination links.
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Links,

    /// Paging metadata, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl<A> Response<A> {
    /// The link to the next page, if any.
    pub fn next_url(&self) -> Option<&str> {
        self.links.next()
    }

    /// Whether this is the final page.
    pub fn is_last_page(&self) -> bool {
        self.next_url().is_none()
    }

    /// Total number of resources across all pages, if reported.
    pub fn total(&self) -> Option<u64> {
        self.meta.as_ref()?.paging?.total
    }

    /// Returns true if this page has no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of resources on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns an iterator over the resources on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, Resource<A>> {
        self.data.iter()
    }
}

impl<A> IntoIterator for Response<A> {
    type Item = Resource<A>;
    type IntoIter = std::vec::IntoIter<Resource<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, A> IntoIterator for &'a Response<A> {
    type Item = &'a Resource<A>;
    type IntoIter = std::slice::Iter<'a, Resource<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// A response carrying exactly one resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de> + Default"))]
pub struct SingleResponse<A> {
    pub data: Resource<A>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<ResourceLinks>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
    struct Named {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
    }

    #[test]
    fn test_empty_page_has_no_next() {
        let page: Response<Named> = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(page.is_empty());
        assert!(page.next_url().is_none());
        assert!(page.is_last_page());
    }

    #[test]
    fn test_partial_resources_keep_defaults() {
        let body = r#"{
            "data": [
                {"type": "apps", "id": "1", "attributes": {"name": "One"}},
                {"attributes": {"name": "Orphan"}},
                {"type": "apps", "id": "3"}
            ],
            "links": {"self": "https://api.appstoreconnect.apple.com/v1/apps"}
        }"#;
        let page: Response<Named> = serde_json::from_str(body).unwrap();

        assert_eq!(page.len(), 3);
        assert_eq!(page.data[0].resource_type, ResourceType::Apps);
        assert_eq!(page.data[1].id, "");
        assert_eq!(page.data[1].resource_type, ResourceType::Unknown);
        assert_eq!(page.data[1].attributes.name, "Orphan");
        assert_eq!(page.data[2].attributes, Named::default());
    }

    #[test]
    fn test_unknown_type_and_fields_are_ignored() {
        let body = r#"{
            "data": [{"type": "somethingNew", "id": "9", "extra": true}],
            "included": [{"type": "builds", "id": "2"}],
            "links": {"self": "x", "next": "https://api.appstoreconnect.apple.com/v1/apps?cursor=2"},
            "meta": {"paging": {"total": 42, "limit": 1}}
        }"#;
        let page: Response<Named> = serde_json::from_str(body).unwrap();

        assert_eq!(page.data[0].resource_type, ResourceType::Unknown);
        assert_eq!(
            page.next_url(),
            Some("https://api.appstoreconnect.apple.com/v1/apps?cursor=2")
        );
        assert_eq!(page.total(), Some(42));
    }

    #[test]
    fn test_null_fields_keep_defaults() {
        let body = r#"{
            "data": [
                {"type": "apps", "id": null, "attributes": {"name": "One"}},
                {"type": null, "id": "2", "attributes": null},
                {"type": "apps", "id": "3", "attributes": {"name": null}, "links": null}
            ],
            "links": null,
            "meta": null
        }"#;
        let page: Response<Named> = serde_json::from_str(body).unwrap();

        assert_eq!(page.len(), 3);
        assert_eq!(page.data[0].id, "");
        assert_eq!(page.data[0].attributes.name, "One");
        assert_eq!(page.data[1].resource_type, ResourceType::Unknown);
        assert_eq!(page.data[1].id, "2");
        assert_eq!(page.data[1].attributes, Named::default());
        assert_eq!(page.data[2].id, "3");
        assert!(page.is_last_page());
        assert!(page.total().is_none());
    }

    #[test]
    fn test_null_data_is_empty_page() {
        let page: Response<Named> = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_blank_next_is_last_page() {
        let page: Response<Named> =
            serde_json::from_str(r#"{"data": [], "links": {"next": "  "}}"#).unwrap();
        assert!(page.is_last_page());
    }

    #[test]
    fn test_relationships_decode_on_demand() {
        #[derive(Deserialize)]
        struct Rels {
            app: Linkage,
        }
        #[derive(Deserialize)]
        struct Linkage {
            data: Ident,
        }
        #[derive(Deserialize)]
        struct Ident {
            id: String,
        }

        let body = r#"{
            "data": {
                "type": "builds",
                "id": "b1",
                "attributes": {},
                "relationships": {"app": {"data": {"type": "apps", "id": "a1"}}}
            }
        }"#;
        let single: SingleResponse<Named> = serde_json::from_str(body).unwrap();
        let rels: Rels = single.data.relationships_as().unwrap().unwrap();
        assert_eq!(rels.app.data.id, "a1");
    }

    #[test]
    fn test_unknown_type_serializes_as_empty() {
        assert_eq!(
            serde_json::to_string(&ResourceType::Unknown).unwrap(),
            r#""""#
        );
        assert_eq!(ResourceType::BetaGroups.to_string(), "betaGroups");
    }
}
