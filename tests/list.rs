//! Execution tests for paginated list calls
//!
//! Uses wiremock to stand in for the App Store Connect API.

use ascapi::{
    AppAttributes, AppsQuery, AscClient, AscError, DeviceAttributes, DevicesQuery, ErrorKind,
    List, ListOptions, Platform, Query, ResourceType, ReviewAttributes, ReviewsQuery,
    ValidationError,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "apps",
        "id": id,
        "attributes": {"name": name, "bundleId": format!("com.example.{id}"), "sku": id}
    })
}

#[tokio::test]
async fn test_fresh_query_sends_limit_and_filter() {
    let mock_server = MockServer::start().await;

    let response = serde_json::json!({
        "data": [app("a", "Alpha"), app("b", "Beta")],
        "links": {"self": format!("{}/v1/apps", mock_server.uri())}
    });

    Mock::given(method("GET"))
        .and(path("/v1/apps"))
        .and(query_param("limit", "5"))
        .and(query_param("filter[id]", "a,b"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();
    let mut query = AppsQuery::new().limit(5);
    query.query_mut().set_filter("id", ["a", "a", "b"]);

    let page = AppAttributes::list_page(&client, &(), &query).await.unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.data[0].resource_type, ResourceType::Apps);
    assert_eq!(page.data[0].attributes.name, "Alpha");
    assert_eq!(page.data[1].attributes.bundle_id, "com.example.b");
    assert!(page.is_last_page());
}

#[tokio::test]
async fn test_typed_filters_reach_the_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/devices"))
        .and(query_param("filter[platform]", "IOS,MAC_OS"))
        .and(query_param("filter[status]", "ENABLED"))
        .and(query_param("sort", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{
                "type": "devices",
                "id": "d1",
                "attributes": {
                    "name": "Test iPhone",
                    "udid": "0000",
                    "platform": "IOS",
                    "status": "ENABLED"
                }
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();
    let query = DevicesQuery::new()
        .filter_platforms(&[Platform::Ios, Platform::MacOs, Platform::Ios])
        .filter_status("ENABLED")
        .sort("name");

    let page = DeviceAttributes::list_page(&client, &(), &query).await.unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page.data[0].attributes.platform, Platform::Ios);
}

#[tokio::test]
async fn test_follows_same_origin_next_link_verbatim() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/v1/apps?cursor=2&limit=1", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/v1/apps"))
        .and(query_param("cursor", "2"))
        .and(query_param("limit", "1"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [app("c", "Gamma")],
            "links": {"self": next}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();
    // The continuation link overrides the limit and filters set here.
    let query = AppsQuery::new()
        .filter_names(["ignored"])
        .limit(200)
        .next_url(&next);

    let page = AppAttributes::list_page(&client, &(), &query).await.unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page.data[0].id, "c");
}

#[tokio::test]
async fn test_rejects_off_host_next_link_without_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();
    let query = AppsQuery::new().next_url("https://evil.example/v1/apps?cursor=2");

    let err = AppAttributes::list_page(&client, &(), &query)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    match err {
        AscError::InvalidNextUrl {
            endpoint,
            url,
            source,
        } => {
            assert_eq!(endpoint, "apps");
            assert_eq!(url, "https://evil.example/v1/apps?cursor=2");
            // The mock server is plain http, so the scheme check fires first.
            assert!(matches!(source, ValidationError::InsecureScheme { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_rejects_next_link_on_other_port() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();
    let port = mock_server.address().port();
    let other_port = if port == 1 { 2 } else { port - 1 };
    let next = format!("http://127.0.0.1:{other_port}/v1/apps?cursor=2");

    let err = AppAttributes::list_page(&client, &(), &AppsQuery::new().next_url(&next))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AscError::InvalidNextUrl {
            source: ValidationError::UntrustedPort { .. },
            ..
        }
    ));
}

#[tokio::test]
async fn test_rejects_malformed_next_link() {
    let mock_server = MockServer::start().await;
    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();

    let query = AppsQuery::new().next_url("/v1/apps?cursor=2");

    let err = AppAttributes::list_page(&client, &(), &query)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AscError::InvalidNextUrl {
            source: ValidationError::Malformed { .. },
            ..
        }
    ));
}

#[tokio::test]
async fn test_empty_page_without_links() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();
    let page = AppAttributes::list_page(&client, &(), &AppsQuery::new())
        .await
        .unwrap();

    assert!(page.is_empty());
    assert!(page.next_url().is_none());
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/apps/42/customerReviews"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"data\": ["))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();
    let err = ReviewAttributes::list_page(&client, "42", &ReviewsQuery::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(err.to_string().starts_with("customerReviews:"));
}

#[tokio::test]
async fn test_list_all_walks_every_page() {
    let mock_server = MockServer::start().await;
    let base = format!("{}/v1/apps/42/customerReviews", mock_server.uri());

    let review = |id: &str, rating: u8| {
        serde_json::json!({
            "type": "customerReviews",
            "id": id,
            "attributes": {"rating": rating, "title": format!("Review {id}"), "territory": "USA"}
        })
    };

    Mock::given(method("GET"))
        .and(path("/v1/apps/42/customerReviews"))
        .and(query_param("filter[rating]", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [review("r1", 5), review("r2", 5)],
            "links": {"self": base, "next": format!("{base}?cursor=Mg")},
            "meta": {"paging": {"total": 3, "limit": 2}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/apps/42/customerReviews"))
        .and(query_param("cursor", "Mg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [review("r3", 5)],
            "links": {"self": format!("{base}?cursor=Mg"), "next": ""},
            "meta": {"paging": {"total": 3, "limit": 2}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();
    let query = ReviewsQuery::new().filter_ratings(&[5]).limit(2);

    let reviews = ReviewAttributes::list_all(&client, "42", &query).await.unwrap();

    let ids: Vec<&str> = reviews.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["r1", "r2", "r3"]);
    assert_eq!(reviews[2].attributes.territory, "USA");
}

#[tokio::test]
async fn test_list_all_stops_on_off_host_link() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [app("a", "Alpha")],
            "links": {"next": "https://evil.example/v1/apps?cursor=2"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();
    let err = AppAttributes::list_all(&client, &(), &AppsQuery::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_get_page_with_plain_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/builds"))
        .and(query_param("include", "app"))
        .and(query_param("fields[builds]", "version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"type": "builds", "id": "b1", "attributes": {"version": "17"}}],
            "included": [{"type": "apps", "id": "a1"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();
    let query = Query::new()
        .include(["app"])
        .fields("builds", ["version", "version"]);

    let page = client
        .get_page::<serde_json::Value>("builds", "/v1/builds", &query)
        .await
        .unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page.data[0].attributes["version"], "17");
}
