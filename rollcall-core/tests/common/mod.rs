#![allow(dead_code)]

use rollcall_core::{RollcallConfig, Session};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "secret_test";
pub const EVENTS_DB: &str = "events-db";
pub const ATTENDANCE_DB: &str = "attendance-db";

pub fn test_config(server: &MockServer) -> RollcallConfig {
    RollcallConfig {
        notion_token: TOKEN.to_string(),
        events_database_id: EVENTS_DB.to_string(),
        attendance_database_id: ATTENDANCE_DB.to_string(),
        ignored_members: Vec::new(),
        api_base_url: server.uri(),
        notion_version: "2022-06-28".to_string(),
        page_size: 100,
        max_pages: 5,
    }
}

pub fn test_session(server: &MockServer) -> Session {
    Session::new(test_config(server))
}

pub fn list(results: Vec<Value>, next_cursor: Option<&str>) -> Value {
    json!({
        "object": "list",
        "results": results,
        "has_more": next_cursor.is_some(),
        "next_cursor": next_cursor,
    })
}

pub fn api_error(status: u16, code: &str, message: &str) -> Value {
    json!({
        "object": "error",
        "status": status,
        "code": code,
        "message": message,
    })
}

pub fn user(id: &str, name: &str) -> Value {
    json!({"object": "user", "id": id, "name": name, "type": "person"})
}

pub fn bot(id: &str, name: &str) -> Value {
    json!({"object": "user", "id": id, "name": name, "type": "bot"})
}

pub fn event_page(id: &str, title: &str, date: &str) -> Value {
    json!({
        "object": "page",
        "id": id,
        "properties": {
            "Name": {"type": "title", "title": [
                {"type": "text", "text": {"content": title}, "plain_text": title}
            ]},
            "Date": {"type": "date", "date": {"start": date, "end": null}}
        }
    })
}

pub fn sheet_page(id: &str, member_id: &str, member_name: &str) -> Value {
    json!({
        "object": "page",
        "id": id,
        "properties": {
            "Title": {"type": "title", "title": [
                {"type": "text", "text": {"content": format!("{member_name}'s Attendance")}}
            ]},
            "Person": {"type": "people", "people": [user(member_id, member_name)]},
            "Attended": {"type": "number", "number": 0}
        }
    })
}

pub fn table_block(id: &str) -> Value {
    json!({
        "object": "block",
        "id": id,
        "type": "table",
        "table": {"table_width": 5, "has_column_header": true, "has_row_header": true}
    })
}

pub fn paragraph_block(id: &str) -> Value {
    json!({"object": "block", "id": id, "type": "paragraph", "paragraph": {"rich_text": []}})
}

pub fn row_block(id: &str, cells: [&str; 5]) -> Value {
    let cells: Vec<Value> = cells
        .iter()
        .map(|c| json!([{"type": "text", "text": {"content": c}, "plain_text": c}]))
        .collect();
    json!({"object": "block", "id": id, "type": "table_row", "table_row": {"cells": cells}})
}

pub fn header_row() -> Value {
    row_block(
        "row-header",
        ["Event Name", "Event ID", "Date", "Attendance Status", "Comments"],
    )
}

pub fn ok(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

/// Mount the three listings a reconciling session loads up front: the events
/// database, the roster and the attendance database with each sheet's
/// table.
pub async fn mount_workspace(
    server: &MockServer,
    events: Vec<Value>,
    members: Vec<Value>,
    sheets: Vec<(&str, &str, &str, &str)>,
) {
    Mock::given(method("POST"))
        .and(path(format!("/databases/{EVENTS_DB}/query")))
        .respond_with(ok(list(events, None)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ok(list(members, None)))
        .mount(server)
        .await;

    let sheet_pages = sheets
        .iter()
        .map(|(sheet_id, member_id, name, _)| sheet_page(sheet_id, member_id, name))
        .collect();
    Mock::given(method("POST"))
        .and(path(format!("/databases/{ATTENDANCE_DB}/query")))
        .respond_with(ok(list(sheet_pages, None)))
        .mount(server)
        .await;

    for (sheet_id, _, _, table_id) in sheets {
        Mock::given(method("GET"))
            .and(path(format!("/blocks/{sheet_id}/children")))
            .respond_with(ok(list(vec![paragraph_block("p1"), table_block(table_id)], None)))
            .mount(server)
            .await;
    }
}

pub async fn load_workspace(session: &mut Session) {
    session.load_events().await.unwrap();
    session.load_members().await.unwrap();
    session.load_sheets().await.unwrap();
}

/// Bodies of every request received for `http_method` on `request_path`.
pub async fn request_bodies(
    server: &MockServer,
    http_method: &str,
    request_path: &str,
) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == http_method && r.url.path() == request_path)
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

/// Cell text of every row appended in `body`, as `[name, id, date, status, comments]`.
pub fn appended_rows(body: &Value) -> Vec<Vec<String>> {
    body["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|block| {
            block["table_row"]["cells"]
                .as_array()
                .unwrap()
                .iter()
                .map(|cell| cell[0]["text"]["content"].as_str().unwrap_or_default().to_string())
                .collect()
        })
        .collect()
}
