//! Remote client and pagination against a mock Mailbox server

use mailbox::api::{load_all_entries, ApiClient, EntryApi, NewEntry};
use mailbox::cmd::{self, Exit};
use mailbox::config::ApiConfig;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let config = ApiConfig::new(
        &format!("{}/", server.uri()),
        Some("admin".to_string()),
        Some("secret".to_string()),
    )
    .unwrap();
    ApiClient::new(config)
}

fn entries(range: std::ops::Range<usize>) -> Vec<Value> {
    range
        .map(|i| {
            json!({
                "id": format!("id{i}"),
                "from": format!("user{i}@example.com"),
                "subject": "Hi",
                "message": "test",
            })
        })
        .collect()
}

fn page_body(page: i64, page_count: i64, entry_count: i64, rows: Vec<Value>) -> Value {
    json!({
        "page": page,
        "page_count": page_count,
        "entry_count": entry_count,
        "entries": rows,
    })
}

async fn mount_page(server: &MockServer, page: i64, body: Value) {
    Mock::given(method("GET"))
        .and(path("/entries/"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn list_page_should_send_basic_auth_and_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entries/"))
        .and(query_param("page", "0"))
        .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(0, 1, 2, entries(0..2))))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).list_page(0).await.unwrap();

    assert_eq!(page.entries.len(), 2);
    assert_eq!(page.entries[1].from, "user1@example.com");
    assert_eq!(page.next_page(), None);
}

#[tokio::test]
async fn sweep_should_collect_every_page_in_order() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page_body(0, 2, 25, entries(0..20))).await;
    mount_page(&server, 1, page_body(1, 2, 25, entries(20..25))).await;

    let rows = load_all_entries(&client_for(&server)).await.unwrap();

    assert_eq!(rows.len(), 25);
    let ids: Vec<_> = rows.iter().map(|e| e.id.clone()).collect();
    let expected: Vec<_> = (0..25).map(|i| format!("id{i}")).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn sweep_of_empty_collection_should_make_one_call() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page_body(0, 0, 0, Vec::new())).await;

    let rows = load_all_entries(&client_for(&server)).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn sweep_should_fail_on_server_error() {
    let server = MockServer::start().await;
    mount_page(&server, 0, page_body(0, 3, 60, entries(0..20))).await;
    Mock::given(method("GET"))
        .and(path("/entries/"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "database unavailable"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = load_all_entries(&client_for(&server)).await.unwrap_err();

    assert!(err.is_server());
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(err.to_string(), "database unavailable");
}

#[tokio::test]
async fn delete_of_missing_entry_should_carry_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/entry/nope"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "document not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).delete_entry("nope").await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.to_string(), "document not found");
}

#[tokio::test]
async fn error_without_body_should_fall_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/entry/x"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server).delete_entry("x").await.unwrap_err();
    assert_eq!(err.to_string(), "401 Unauthorized");
}

#[tokio::test]
async fn get_entry_should_return_raw_body() {
    let server = MockServer::start().await;
    let record = r#"{"id":"a1","from":"a@b.com","subject":"Hi","message":"test"}"#;
    Mock::given(method("GET"))
        .and(path("/entry/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(record))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.get_entry("a1").await.unwrap(), record);
    assert_eq!(cmd::print_entry(&client, "a1").await, Exit::Success);
}

#[tokio::test]
async fn malformed_page_should_be_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entries/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_page(0).await.unwrap_err();
    assert!(err.is_decode());
    assert!(err.is_transport());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn unreachable_server_should_be_a_transport_failure() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = ApiConfig::new(&format!("http://127.0.0.1:{port}"), None, None).unwrap();
    let err = ApiClient::new(config).list_page(0).await.unwrap_err();

    assert!(err.is_transport());
    assert!(err.to_string().starts_with("server failed to respond"));
}

#[tokio::test]
async fn all_fields_given_should_submit_once_without_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "from": "a@b.com",
            "subject": "Hi",
            "message": "test",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let exit = cmd::new_entry(&client_for(&server), Some("a@b.com"), Some("Hi"), Some("test"))
        .await
        .unwrap();
    assert_eq!(exit, Exit::Success);
}

#[tokio::test]
async fn rejected_submission_should_fail_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "invalid email address"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let entry = NewEntry::new("nope", "Hi", "test");
    assert_eq!(cmd::submit_entry(&client_for(&server), &entry).await, Exit::Failure);
}
