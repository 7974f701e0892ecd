//! Tests for the auth module

use super::*;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_credentials(server_uri: &str) -> Credentials {
    Credentials {
        token_url: format!("{server_uri}/oauth/token"),
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
        scope: "manage_project:test".to_string(),
    }
}

#[tokio::test]
async fn test_fetches_and_applies_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("manage_project%3Atest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok_1",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/resource"))
        .and(wiremock::matchers::header("Authorization", "Bearer tok_1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let auth = Authenticator::new(test_credentials(&server.uri()));
    let client = reqwest::Client::new();
    let req = client.get(format!("{}/resource", server.uri()));
    let req = auth.apply(req).await.unwrap();
    let response = req.send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_token_is_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok_cached",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = Authenticator::new(test_credentials(&server.uri()));
    let client = reqwest::Client::new();

    // Two applications, one token fetch
    for _ in 0..2 {
        let req = client.get(format!("{}/resource", server.uri()));
        auth.apply(req).await.unwrap();
    }
}

#[tokio::test]
async fn test_token_failure_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
        .mount(&server)
        .await;

    let auth = Authenticator::new(test_credentials(&server.uri()));
    let client = reqwest::Client::new();
    let req = client.get(format!("{}/resource", server.uri()));
    let err = auth.apply(req).await.unwrap_err();

    assert!(err.to_string().contains("401"));
}
