//! Mock backend tests for the HTTP API client.
//!
//! These tests use wiremock to stand in for the dashboard backend.

use std::sync::Arc;

use arona_core::{
    ApiUrl, AuthToken, DashboardApi, Navigation, NewRepository, RepositoryList, Route,
    SessionManager, SessionState, TokenService,
};
use arona_core::error::StorageError;
use arona_core::traits::TokenStore;
use arona_http::HttpApi;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn tokens_with(token: &str) -> TokenService {
    let tokens = TokenService::in_memory();
    tokens.set(AuthToken::new(token)).unwrap();
    tokens
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_validate_token_sends_bearer_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/validate-token"))
        .and(header("authorization", "Bearer good-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "username": "arona", "avatar": null, "isOwner": true }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpApi::new(mock_api_url(&server), tokens_with("good-token")).unwrap();
    let profile = api.validate_token().await.unwrap();

    assert_eq!(profile.username(), "arona");
    assert!(profile.is_owner());
}

#[tokio::test]
async fn test_no_header_without_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bot-stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "commandCount": 1,
            "uptime": 5,
            "serverCount": 1,
            "userCount": 1,
            "guildMemberCount": 1
        })))
        .mount(&server)
        .await;

    let api = HttpApi::new(mock_api_url(&server), TokenService::in_memory()).unwrap();
    api.bot_stats().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

/// Store that cannot be read, like a token file on an unreadable volume.
struct UnreadableStore;

impl TokenStore for UnreadableStore {
    fn load(&self) -> arona_core::Result<Option<AuthToken>> {
        Err(StorageError::Io {
            path: "storage.json".to_string(),
            message: "permission denied".to_string(),
        }
        .into())
    }

    fn save(&self, _token: &AuthToken) -> arona_core::Result<()> {
        Ok(())
    }

    fn remove(&self) -> arona_core::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_unreadable_token_storage_sends_anonymous_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bot-stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "commandCount": 1,
            "uptime": 5,
            "serverCount": 1,
            "userCount": 1,
            "guildMemberCount": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpApi::new(mock_api_url(&server), TokenService::new(UnreadableStore)).unwrap();
    api.bot_stats().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_rejected_token_is_cleared_by_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/validate-token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid token"
        })))
        .mount(&server)
        .await;

    let tokens = tokens_with("expired");
    let api = Arc::new(HttpApi::new(mock_api_url(&server), tokens.clone()).unwrap());
    let session = SessionManager::bearer(api, tokens.clone());

    assert_eq!(session.initialize().await, SessionState::Unauthenticated);
    assert_eq!(tokens.get().unwrap(), None);
}

#[tokio::test]
async fn test_error_message_is_taken_from_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Not authenticated"
        })))
        .mount(&server)
        .await;

    let api = HttpApi::anonymous(mock_api_url(&server)).unwrap();
    let err = api.current_user().await.unwrap_err();

    assert!(err.is_auth_error());
    assert!(err.to_string().contains("HTTP 401: Not authenticated"));
}

#[tokio::test]
async fn test_cookie_session_logout_calls_backend() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "sensei",
            "isOwner": false
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = TokenService::in_memory();
    let api = Arc::new(HttpApi::new(mock_api_url(&server), tokens.clone()).unwrap());
    let session = SessionManager::cookie(api, tokens);

    assert!(session.initialize().await.is_authenticated().unwrap());
    assert_eq!(session.logout().await.unwrap(), Navigation::Hard(Route::Root));
    assert_eq!(session.state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn test_backend_logout_failure_still_logs_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let tokens = tokens_with("t");
    let api = Arc::new(HttpApi::new(mock_api_url(&server), tokens.clone()).unwrap());
    let session = SessionManager::cookie(api, tokens.clone());

    session.logout().await.unwrap();
    assert_eq!(tokens.get().unwrap(), None);
    assert_eq!(session.state(), SessionState::Unauthenticated);
}

// ============================================================================
// Repositories
// ============================================================================

#[tokio::test]
async fn test_create_posts_body_then_refetches() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/repositories"))
        .and(header("authorization", "Bearer owner-token"))
        .and(body_json(json!({
            "link": "https://github.com/arona-bot/arona",
            "title": "Arona",
            "description": "The bot"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "title": "Arona",
                "link": "https://github.com/arona-bot/arona",
                "description": "The bot"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = Arc::new(HttpApi::new(mock_api_url(&server), tokens_with("owner-token")).unwrap());
    let mut list = RepositoryList::new(api);

    list.create("https://github.com/arona-bot/arona", "Arona", Some("The bot"))
        .await
        .unwrap();

    assert_eq!(list.state().entries().len(), 1);
    assert_eq!(list.state().entries()[0].title, "Arona");
}

#[tokio::test]
async fn test_invalid_link_makes_no_request() {
    let server = MockServer::start().await;

    let api = Arc::new(HttpApi::anonymous(mock_api_url(&server)).unwrap());
    let mut list = RepositoryList::new(api);

    assert!(list.create("not-a-url", "Broken", None).await.is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_encodes_title_as_one_segment() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/repositories/My%20Repo%2Fv2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpApi::anonymous(mock_api_url(&server)).unwrap();
    api.delete_repository("My Repo/v2").await.unwrap();
}

#[tokio::test]
async fn test_list_accepts_backend_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "65f0", "title": "A", "link": "https://a.example" },
            { "title": "B", "link": "https://b.example", "description": null }
        ])))
        .mount(&server)
        .await;

    let api = HttpApi::anonymous(mock_api_url(&server)).unwrap();
    let entries = api.list_repositories().await.unwrap();

    assert_eq!(entries[0].key(), "65f0");
    assert_eq!(entries[1].key(), "B");
}

#[tokio::test]
async fn test_list_failure_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/repositories"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let api = Arc::new(HttpApi::anonymous(mock_api_url(&server)).unwrap());
    let mut list = RepositoryList::new(api);

    assert!(list.list().await.is_err());
    assert!(list.state().is_failed());
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bot-stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let api = HttpApi::anonymous(mock_api_url(&server)).unwrap();
    let err = api.bot_stats().await.unwrap_err();
    assert!(matches!(err, arona_core::Error::Decode(_)));
}

#[tokio::test]
async fn test_new_repository_serializes_blank_description_as_null() {
    let entry = NewRepository::new("https://a.example", "A", Some("  ".into())).unwrap();
    assert_eq!(
        serde_json::to_value(&entry).unwrap(),
        json!({ "link": "https://a.example", "title": "A", "description": null })
    );
}
