mod common;

use common::*;
use rollcall_core::RollcallError;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_member(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .respond_with(ok(user("u1", "Ada Lovelace")))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_creates_sheet_with_table() {
    let server = MockServer::start().await;
    mount_member(&server).await;

    Mock::given(method("POST"))
        .and(path("/pages"))
        .and(body_partial_json(json!({
            "parent": {"database_id": ATTENDANCE_DB},
            "properties": {
                "Title": {"title": [{"text": {"content": "Ada Lovelace's Attendance"}}]},
                "Person": {"people": [{"id": "u1"}]},
                "Attended": {"number": 0},
                "Unexcused Absence": {"number": 0}
            }
        })))
        .respond_with(ok(json!({"object": "page", "id": "sheet-1", "properties": {}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/blocks/sheet-1/children"))
        .and(body_partial_json(json!({
            "children": [{
                "type": "table",
                "table": {"table_width": 5, "has_column_header": true}
            }]
        })))
        .respond_with(ok(list(vec![table_block("table-1")], None)))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = test_session(&server);
    let sheet = session.create_attendance_sheet("u1").await.unwrap();

    assert_eq!(sheet.id, "sheet-1");
    assert_eq!(session.sheet("u1").unwrap().id, "sheet-1");
    assert_eq!(session.table("u1").unwrap().id, "table-1");

    let bodies = request_bodies(&server, "PATCH", "/blocks/sheet-1/children").await;
    let header = &bodies[0]["children"][0]["table"]["children"][0]["table_row"]["cells"];
    let labels: Vec<&str> = header
        .as_array()
        .unwrap()
        .iter()
        .map(|cell| cell[0]["text"]["content"].as_str().unwrap())
        .collect();
    assert_eq!(
        labels,
        vec!["Event Name", "Event ID", "Date", "Attendance Status", "Comments"]
    );
}

#[tokio::test]
async fn test_second_provision_is_rejected_without_remote_calls() {
    let server = MockServer::start().await;
    mount_member(&server).await;
    Mock::given(method("POST"))
        .and(path("/pages"))
        .respond_with(ok(json!({"object": "page", "id": "sheet-1", "properties": {}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/blocks/sheet-1/children"))
        .respond_with(ok(list(vec![table_block("table-1")], None)))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = test_session(&server);
    session.create_attendance_sheet("u1").await.unwrap();

    let err = session.create_attendance_sheet("u1").await.unwrap_err();
    assert!(matches!(err, RollcallError::AlreadyExists(_)));
}

#[tokio::test]
async fn test_existing_sheet_blocks_provisioning() {
    let server = MockServer::start().await;
    mount_workspace(
        &server,
        vec![],
        vec![user("u1", "Ada Lovelace")],
        vec![("sheet-1", "u1", "Ada Lovelace", "table-1")],
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/pages"))
        .respond_with(ok(json!({"object": "page", "id": "sheet-2", "properties": {}})))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = test_session(&server);
    session.load_sheets().await.unwrap();

    let err = session.create_attendance_sheet("u1").await.unwrap_err();
    assert!(matches!(err, RollcallError::AlreadyExists(_)));
}

#[tokio::test]
async fn test_page_creation_failure() {
    let server = MockServer::start().await;
    mount_member(&server).await;
    Mock::given(method("POST"))
        .and(path("/pages"))
        .respond_with(ResponseTemplate::new(400).set_body_json(api_error(
            400,
            "validation_error",
            "Title is not a property that exists.",
        )))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/blocks/sheet-1/children"))
        .respond_with(ok(list(vec![table_block("table-1")], None)))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = test_session(&server);
    let err = session.create_attendance_sheet("u1").await.unwrap_err();

    assert!(matches!(err, RollcallError::Remote(_)));
    assert!(err.to_string().contains("Ada Lovelace"));
    assert!(session.sheet("u1").is_none());
}

#[tokio::test]
async fn test_table_creation_failure_leaves_no_cache_entry() {
    let server = MockServer::start().await;
    mount_member(&server).await;
    Mock::given(method("POST"))
        .and(path("/pages"))
        .respond_with(ok(json!({"object": "page", "id": "sheet-1", "properties": {}})))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/blocks/sheet-1/children"))
        .respond_with(ResponseTemplate::new(500).set_body_json(api_error(
            500,
            "internal_server_error",
            "Unexpected error.",
        )))
        .mount(&server)
        .await;

    let mut session = test_session(&server);
    let err = session.create_attendance_sheet("u1").await.unwrap_err();

    assert!(matches!(err, RollcallError::Remote(_)));
    assert!(err.to_string().contains("sheet-1"));
    assert!(session.sheet("u1").is_none());
    assert!(session.table("u1").is_none());
}

#[tokio::test]
async fn test_unknown_member_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ghost"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(api_error(404, "object_not_found", "Could not find user.")),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/pages"))
        .respond_with(ok(json!({"object": "page", "id": "sheet-1", "properties": {}})))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = test_session(&server);
    let err = session.create_attendance_sheet("ghost").await.unwrap_err();
    assert!(matches!(err, RollcallError::NotFound(_)));
}
