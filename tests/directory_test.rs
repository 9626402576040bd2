#![cfg(feature = "directory")]

use bulletin::directory::{Directory, HttpDirectory};
use bulletin::store::{MemoryStore, UserStore};
use bulletin::sync::{sync_all, sync_user};
use bulletin::Error;
use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json(id: u64, roles: &[&str]) -> serde_json::Value {
    json!({
        "id": id,
        "email": format!("user{}@example.com", id),
        "login": format!("user{}", id),
        "display_name": format!("User {}", id),
        "first_name": "User",
        "last_name": id.to_string(),
        "roles": roles,
    })
}

fn client(server: &MockServer) -> HttpDirectory {
    HttpDirectory::new(server.uri(), "service", "service-password")
}

#[tokio::test]
async fn authenticate_success_returns_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(basic_auth("ana@example.com", "hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(7, &["subscriber"])))
        .mount(&server)
        .await;

    let outcome = client(&server)
        .authenticate("ana@example.com", "hunter2")
        .await
        .unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.user.unwrap().id, 7);
}

#[tokio::test]
async fn authenticate_wrong_password_is_denied_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let outcome = client(&server)
        .authenticate("ana@example.com", "wrong")
        .await
        .unwrap();
    assert!(!outcome.success);
    assert!(outcome.user.is_none());
    assert!(outcome.message.is_some());
}

#[tokio::test]
async fn authenticate_server_error_is_upstream_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server)
        .authenticate("ana@example.com", "hunter2")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UpstreamUnavailable(_)));
}

#[tokio::test]
async fn user_by_id_uses_service_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/7"))
        .and(basic_auth("service", "service-password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(7, &["administrator"])))
        .mount(&server)
        .await;

    let user = client(&server).user_by_id(7).await.unwrap();
    assert_eq!(user.email, "user7@example.com");
    assert_eq!(user.roles, vec!["administrator"]);
}

#[tokio::test]
async fn user_by_id_missing_maps_to_user_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server).user_by_id(99).await.unwrap_err();
    assert!(matches!(err, Error::UserNotFound(ref id) if id == "99"));
}

#[tokio::test]
async fn bad_service_credentials_map_to_upstream_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/7"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client(&server).user_by_id(7).await.unwrap_err();
    assert!(matches!(err, Error::UpstreamAuth));
}

#[tokio::test]
async fn list_users_passes_paging_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "50"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([user_json(51, &[]), user_json(52, &[])])),
        )
        .mount(&server)
        .await;

    let users = client(&server).list_users(2, 50).await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id, 51);
}

#[tokio::test]
async fn sync_user_end_to_end_mirrors_admin_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(7, &["Administrator"])))
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let now = Utc.with_ymd_and_hms(2025, 1, 5, 9, 0, 0).unwrap();
    let stored = sync_user(&client(&server), &store, 7, now).await.unwrap();
    assert!(stored.fields.is_admin);
    assert_eq!(stored.synced_at, now);
}

#[tokio::test]
async fn sync_all_stops_on_short_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([user_json(1, &[]), user_json(2, &[]), user_json(3, &[])])),
        )
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let now = Utc.with_ymd_and_hms(2025, 1, 5, 9, 0, 0).unwrap();
    let total = sync_all(&client(&server), &store, now).await.unwrap();
    assert_eq!(total, 3);
    assert_eq!(store.count().await.unwrap(), 3);
}
