//! End-to-end dispatch tests against a mock server.
//!
//! These exercise the full engine path — encode, URL construction, the
//! network call, classification, and decoding — with local descriptor
//! types standing in for real resources.

use digitalocean_core::{
    ApiResponse, DigitalOceanClient, Error, Method, NoContent, PagedRequest, Request,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Widget {
    name: String,
    count: u32,
}

#[derive(Debug, Deserialize, PartialEq)]
struct WidgetResponse {
    widget: Widget,
}

impl ApiResponse for WidgetResponse {}

/// GET widgets/{id}
struct GetWidget {
    id: u64,
}

impl Request for GetWidget {
    type Body = NoContent;
    type Response = WidgetResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("widgets/{}", self.id)
    }
}

/// GET widgets?page=…&per_page=…
struct ListWidgets {
    page: u32,
    per_page: u32,
}

#[derive(Debug, Deserialize)]
struct WidgetsResponse {
    widgets: Vec<Widget>,
}

impl ApiResponse for WidgetsResponse {}

impl Request for ListWidgets {
    type Body = NoContent;
    type Response = WidgetsResponse;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "widgets".to_string()
    }

    fn query(&self) -> Option<BTreeMap<String, String>> {
        let mut query = BTreeMap::new();
        query.insert("page".to_string(), self.page.to_string());
        query.insert("per_page".to_string(), self.per_page.to_string());
        Some(query)
    }
}

impl PagedRequest for ListWidgets {
    fn page(&self) -> u32 {
        self.page
    }

    fn per_page(&self) -> u32 {
        self.per_page
    }
}

/// POST widgets
struct CreateWidget {
    widget: Widget,
}

impl Request for CreateWidget {
    type Body = Widget;
    type Response = WidgetResponse;

    fn method(&self) -> Method {
        Method::POST
    }

    fn path(&self) -> String {
        "widgets".to_string()
    }

    fn body(&self) -> Option<&Widget> {
        Some(&self.widget)
    }
}

/// DELETE widgets/{id}
struct DeleteWidget {
    id: u64,
}

impl Request for DeleteWidget {
    type Body = NoContent;
    type Response = NoContent;

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        format!("widgets/{}", self.id)
    }
}

async fn test_client(server: &MockServer) -> DigitalOceanClient {
    DigitalOceanClient::builder("fakeapi")
        .with_base_url(format!("{}/v2/", server.uri()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn decodes_a_typed_response_and_sends_the_bearer_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/widgets/7"))
        .and(header("Authorization", "Bearer fakeapi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"widget":{"name":"anvil","count":3}}"#),
        )
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let response = client.send(&GetWidget { id: 7 }).await.unwrap();
    assert_eq!(
        response.widget,
        Widget {
            name: "anvil".to_string(),
            count: 3
        }
    );
}

#[tokio::test]
async fn query_pairs_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/widgets"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"widgets":[]}"#))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let response = client
        .send(&ListWidgets {
            page: 1,
            per_page: 50,
        })
        .await
        .unwrap();
    assert!(response.widgets.is_empty());
}

#[tokio::test]
async fn request_bodies_are_sent_as_json() {
    let server = MockServer::start().await;
    let widget = Widget {
        name: "anvil".to_string(),
        count: 3,
    };
    Mock::given(method("POST"))
        .and(path("/v2/widgets"))
        .and(body_json(&widget))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_string(r#"{"widget":{"name":"anvil","count":3}}"#),
        )
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let response = client.send(&CreateWidget { widget }).await.unwrap();
    assert_eq!(response.widget.count, 3);
}

#[tokio::test]
async fn no_content_succeeds_on_any_2xx_regardless_of_bytes() {
    for (status, body) in [
        (204, ""),
        (200, ""),
        (200, "not json at all"),
        (202, r#"{"unrelated":true}"#),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v2/widgets/7"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        client.send(&DeleteWidget { id: 7 }).await.unwrap();
    }
}

#[tokio::test]
async fn structured_4xx_surfaces_the_remote_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/widgets/7"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"id":"not_found","message":"nope"}"#),
        )
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let err = client.send(&GetWidget { id: 7 }).await.unwrap_err();
    match err {
        Error::Remote(remote) => {
            assert_eq!(remote.id, "not_found");
            assert_eq!(remote.message, "nope");
            assert_eq!(remote.status, Some(404));
        }
        other => panic!("expected Remote, got {other:?}"),
    }
}

#[tokio::test]
async fn unstructured_4xx_is_unclassified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/widgets/7"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let err = client.send(&GetWidget { id: 7 }).await.unwrap_err();
    assert!(matches!(err, Error::UnclassifiedRemote(429)));
}

#[tokio::test]
async fn server_errors_are_unacceptable_statuses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/widgets/7"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let err = client.send(&GetWidget { id: 7 }).await.unwrap_err();
    assert!(matches!(err, Error::UnacceptableStatus(500)));
}

#[tokio::test]
async fn empty_body_for_a_decodable_type_is_missing_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/widgets/7"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let err = client.send(&GetWidget { id: 7 }).await.unwrap_err();
    assert!(matches!(err, Error::MissingBody { .. }));
}

#[tokio::test]
async fn mismatched_body_is_a_decode_failure_naming_the_target() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/widgets/7"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"widget":{"name":7}}"#))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let err = client.send(&GetWidget { id: 7 }).await.unwrap_err();
    match err {
        Error::Decode { target, .. } => assert!(target.ends_with("WidgetResponse")),
        other => panic!("expected Decode, got {other:?}"),
    }
}

#[tokio::test]
async fn connection_refused_is_a_transport_failure() {
    // Grab a port the OS considers free, then release it before dialing.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let client = DigitalOceanClient::builder("fakeapi")
        .with_base_url(format!("http://{addr}/v2/"))
        .build()
        .unwrap();
    let err = client.send(&GetWidget { id: 7 }).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn a_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/widgets/7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"widget":{"name":"anvil","count":3}}"#)
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = DigitalOceanClient::builder("fakeapi")
        .with_base_url(format!("{}/v2/", server.uri()))
        .with_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let err = client.send(&GetWidget { id: 7 }).await.unwrap_err();
    assert!(matches!(err, Error::Timeout(_)));
}

#[tokio::test]
async fn concurrent_sends_complete_independently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/widgets/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"widget":{"name":"first","count":1}}"#),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/widgets/2"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"id":"not_found","message":"gone"}"#),
        )
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let (first, second) = tokio::join!(
        client.send(&GetWidget { id: 1 }),
        client.send(&GetWidget { id: 2 }),
    );
    assert_eq!(first.unwrap().widget.name, "first");
    assert!(second.unwrap_err().is_remote());
}
