//! End-to-end exchanges for real resource descriptors against a mock server.

use digitalocean_api::account::GetAccount;
use digitalocean_api::droplet::{DeleteDroplet, GetDroplet, ListDroplets};
use digitalocean_api::droplet_action::RebootDroplet;
use digitalocean_api::{DigitalOceanClient, Error};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn test_client(server: &MockServer) -> DigitalOceanClient {
    DigitalOceanClient::builder("fakeapi")
        .with_base_url(format!("{}/v2/", server.uri()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn get_account_decodes_the_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .and(header("Authorization", "Bearer fakeapi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "account": {
                    "droplet_limit": 25,
                    "floating_ip_limit": 5,
                    "email": "sammy@digitalocean.com",
                    "uuid": "b6fr89dbf6d9156cace5f3c78dc9851d957381ef",
                    "email_verified": true,
                    "status": "active",
                    "status_message": ""
                }
            }"#,
        ))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let response = client.send(&GetAccount).await.unwrap();
    assert_eq!(response.account.droplet_limit, 25);
    assert_eq!(response.account.email, "sammy@digitalocean.com");
    assert!(response.account.email_verified);
}

#[tokio::test]
async fn delete_droplet_succeeds_on_204_with_no_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/droplets/3164444"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    client.send(&DeleteDroplet { id: 3164444 }).await.unwrap();
}

#[tokio::test]
async fn a_structured_404_surfaces_the_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/droplets/3164444"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"id":"not_found","message":"nope"}"#),
        )
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let err = client.send(&GetDroplet { id: 3164444 }).await.unwrap_err();
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
async fn an_empty_500_is_an_unacceptable_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let err = client.send(&GetAccount).await.unwrap_err();
    assert!(matches!(err, Error::UnacceptableStatus(500)));
}

#[tokio::test]
async fn list_droplets_folds_paging_into_the_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/droplets"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "50"))
        .and(query_param("tag", "web"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"droplets":[]}"#))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let response = client
        .send(&ListDroplets {
            tag: Some("web".to_string()),
            page: 1,
            per_page: 50,
        })
        .await
        .unwrap();
    assert!(response.droplets.is_empty());
}

#[tokio::test]
async fn droplet_actions_post_their_type_tag() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/droplets/3164450/actions"))
        .and(body_json(serde_json::json!({"type": "reboot"})))
        .respond_with(ResponseTemplate::new(201).set_body_string(
            r#"{
                "action": {
                    "id": 36804748,
                    "status": "in-progress",
                    "type": "reboot",
                    "started_at": "2014-11-14T16:31:00Z",
                    "completed_at": "2014-11-14T16:31:00Z",
                    "resource_id": 3164450,
                    "resource_type": "droplet",
                    "region": {
                        "slug": "nyc3",
                        "name": "New York 3",
                        "sizes": ["s-1vcpu-1gb"],
                        "available": true,
                        "features": ["metadata"]
                    },
                    "region_slug": "nyc3"
                }
            }"#,
        ))
        .mount(&server)
        .await;

    let client = test_client(&server).await;
    let response = client.send(&RebootDroplet::new(3164450)).await.unwrap();
    assert_eq!(response.action.id, 36804748);
    assert_eq!(response.action.resource_id, Some(3164450));
}
