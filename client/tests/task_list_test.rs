//! Integration tests for the task list view model.
//!
//! These tests drive `TaskList` against a mock task backend and verify
//! that the cache always mirrors what the server returned, and that
//! failures set the error message without touching the cache.

use serde_json::{json, Value};
use taskpad_client::api::TaskApi;
use taskpad_client::task_list::{
    TaskList, TaskTitles, ADD_FAILED, DELETE_FAILED, FETCH_FAILED, UPDATE_FAILED,
};
use taskpad_client::types::TaskId;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Test Helpers
// =============================================================================

fn task_json(id: i64, title: &str, completed: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": null,
        "completed": completed,
        "createdAt": "2024-01-01T00:00:00",
        "updatedAt": "2024-01-01T00:00:00"
    })
}

fn api_for(server: &MockServer) -> TaskApi {
    TaskApi::new(&format!("{}/api/todos", server.uri()), None).unwrap()
}

/// Mounts a list endpoint returning `tasks` and loads them into a fresh list.
async fn loaded_list(server: &MockServer, tasks: Value) -> TaskList {
    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tasks))
        .mount(server)
        .await;

    let mut list = TaskList::new();
    assert!(list.load(&api_for(server)).await);
    list
}

fn titles(list: &TaskList) -> Vec<&str> {
    list.tasks().iter().map(|t| t.title.as_str()).collect()
}

// =============================================================================
// Load
// =============================================================================

#[tokio::test]
async fn test_load_replaces_cache_and_clears_flags() {
    let server = MockServer::start().await;
    let list = loaded_list(&server, json!([task_json(1, "Buy milk", false)])).await;

    assert_eq!(list.len(), 1);
    assert_eq!(list.tasks()[0].title, "Buy milk");
    assert!(!list.tasks()[0].completed);
    assert!(!list.is_loading());
    assert!(list.error().is_none());
}

#[tokio::test]
async fn test_consecutive_loads_yield_identical_cache() {
    let server = MockServer::start().await;
    let mut list = loaded_list(
        &server,
        json!([task_json(1, "Buy milk", false), task_json(2, "Walk dog", true)]),
    )
    .await;
    let first = list.tasks().to_vec();

    assert!(list.load(&api_for(&server)).await);
    assert_eq!(list.tasks(), first.as_slice());
}

#[tokio::test]
async fn test_failed_load_sets_error_and_keeps_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([task_json(1, "Buy milk", false)])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut list = TaskList::new();
    assert!(list.load(&api).await);
    assert!(!list.load(&api).await);

    assert_eq!(list.error(), Some(FETCH_FAILED));
    assert_eq!(titles(&list), vec!["Buy milk"]);
    assert!(!list.is_loading());
}

#[tokio::test]
async fn test_successful_load_clears_previous_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut list = TaskList::new();
    assert!(!list.load(&api).await);
    assert!(list.error().is_some());

    assert!(list.load(&api).await);
    assert!(list.error().is_none());
    assert!(list.is_empty());
}

#[tokio::test]
async fn test_unrecognised_created_at_does_not_hide_the_list() {
    let server = MockServer::start().await;
    let mut list = loaded_list(
        &server,
        json!([
            {"id": 1, "title": "Buy milk", "completed": false, "createdAt": "2024-01-01T00:00:00Z"},
            {"id": 2, "title": "Walk dog", "completed": false, "createdAt": 1_704_067_200_000_i64}
        ]),
    )
    .await;
    assert_eq!(titles(&list), vec!["Buy milk", "Walk dog"]);
    assert!(list.error().is_none());

    Mock::given(method("PUT"))
        .and(path("/api/todos/2"))
        .and(body_partial_json(json!({
            "completed": true,
            "createdAt": 1_704_067_200_000_i64
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2,
            "title": "Walk dog",
            "completed": true,
            "createdAt": 1_704_067_200_000_i64
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(list.toggle(&api_for(&server), &TaskId::Number(2)).await);
    assert!(list.tasks()[1].completed);
}

#[tokio::test]
async fn test_fetched_titles_match_loaded_tasks() {
    let server = MockServer::start().await;
    let list = loaded_list(
        &server,
        json!([task_json(1, "Buy milk", false), task_json(2, "Walk dog", true)]),
    )
    .await;

    let titles = TaskTitles::fetch(&api_for(&server)).await;
    assert_eq!(titles, list.titles());
    assert_eq!(titles.title_for(&TaskId::Number(2)), "Walk dog");
}

// =============================================================================
// Add
// =============================================================================

#[tokio::test]
async fn test_add_prepends_server_record() {
    let server = MockServer::start().await;
    let mut list = loaded_list(&server, json!([task_json(1, "Walk dog", false)])).await;

    Mock::given(method("POST"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2,
            "title": "Buy milk",
            "description": "2 liters",
            "completed": false,
            "createdAt": "2024-03-01T12:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(list.add(&api_for(&server), "Buy milk", "2 liters").await);
    assert_eq!(titles(&list), vec!["Buy milk", "Walk dog"]);
    assert_eq!(list.tasks()[0].id, TaskId::Number(2));
    assert_eq!(list.tasks()[0].description.as_deref(), Some("2 liters"));
}

#[tokio::test]
async fn test_blank_title_makes_no_request() {
    let server = MockServer::start().await;
    let mut list = loaded_list(&server, json!([task_json(1, "Walk dog", false)])).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let before = list.tasks().to_vec();
    assert!(!list.add(&api_for(&server), "   ", "description").await);
    assert_eq!(list.tasks(), before.as_slice());
    assert!(list.error().is_none());
}

#[tokio::test]
async fn test_failed_add_keeps_cache() {
    let server = MockServer::start().await;
    let mut list = loaded_list(&server, json!([task_json(1, "Walk dog", false)])).await;

    Mock::given(method("POST"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(!list.add(&api_for(&server), "Buy milk", "").await);
    assert_eq!(list.error(), Some(ADD_FAILED));
    assert_eq!(titles(&list), vec!["Walk dog"]);
}

// =============================================================================
// Toggle
// =============================================================================

#[tokio::test]
async fn test_toggle_replaces_record_in_place() {
    let server = MockServer::start().await;
    let mut list = loaded_list(
        &server,
        json!([
            task_json(1, "First", false),
            task_json(2, "Second", false),
            task_json(3, "Third", false)
        ]),
    )
    .await;

    Mock::given(method("PUT"))
        .and(path("/api/todos/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2,
            "title": "Second",
            "completed": true,
            "updatedAt": "2024-03-02T08:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(list.toggle(&api_for(&server), &TaskId::Number(2)).await);
    assert_eq!(titles(&list), vec!["First", "Second", "Third"]);
    let completed: Vec<bool> = list.tasks().iter().map(|t| t.completed).collect();
    assert_eq!(completed, vec![false, true, false]);
    assert_eq!(
        list.tasks()[1].extra.get("updatedAt"),
        Some(&json!("2024-03-02T08:00:00"))
    );
}

#[tokio::test]
async fn test_toggle_unknown_id_makes_no_request() {
    let server = MockServer::start().await;
    let mut list = loaded_list(&server, json!([task_json(1, "First", false)])).await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    assert!(!list.toggle(&api_for(&server), &TaskId::Number(42)).await);
    assert!(list.error().is_none());
}

#[tokio::test]
async fn test_failed_toggle_keeps_record() {
    let server = MockServer::start().await;
    let mut list = loaded_list(&server, json!([task_json(1, "First", false)])).await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Todo not found: 1"))
        .mount(&server)
        .await;

    assert!(!list.toggle(&api_for(&server), &TaskId::Number(1)).await);
    assert_eq!(list.error(), Some(UPDATE_FAILED));
    assert!(!list.tasks()[0].completed);
}

// =============================================================================
// Remove
// =============================================================================

#[tokio::test]
async fn test_remove_drops_exactly_that_id() {
    let server = MockServer::start().await;
    let mut list = loaded_list(
        &server,
        json!([
            task_json(1, "First", false),
            task_json(2, "Second", true),
            task_json(3, "Third", false)
        ]),
    )
    .await;

    Mock::given(method("DELETE"))
        .and(path("/api/todos/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert!(list.remove(&api_for(&server), &TaskId::Number(2)).await);
    assert_eq!(titles(&list), vec!["First", "Third"]);
}

#[tokio::test]
async fn test_failed_remove_keeps_cache() {
    let server = MockServer::start().await;
    let mut list = loaded_list(&server, json!([task_json(1, "First", false)])).await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(!list.remove(&api_for(&server), &TaskId::Number(1)).await);
    assert_eq!(list.error(), Some(DELETE_FAILED));
    assert_eq!(list.len(), 1);
}
