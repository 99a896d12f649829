//! Integration tests for the AI assistant view model.
//!
//! These tests verify that each action replaces only its own result,
//! that summary and answer failures are shown inline, and that analysis
//! failures keep the previous results.

use serde_json::json;
use taskpad_client::api::{AssistantApi, TaskApi};
use taskpad_client::assistant::{AiAction, AssistantState, ANSWER_FAILED, SUMMARY_FAILED};
use taskpad_client::task_list::{TaskList, TaskTitles, UNKNOWN_TASK};
use taskpad_client::types::{AnalysisKind, TaskId};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Test Helpers
// =============================================================================

fn api_for(server: &MockServer) -> AssistantApi {
    AssistantApi::new(&format!("{}/api/ai", server.uri()), None).unwrap()
}

async fn mount_json(server: &MockServer, http_method: &str, route: &str, body: serde_json::Value) {
    Mock::given(method(http_method))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// =============================================================================
// Summary and Q&A
// =============================================================================

#[tokio::test]
async fn test_summarize_sets_summary() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        "/api/ai/summarize",
        json!({"answer": "Two tasks, one done.", "type": "summary"}),
    )
    .await;

    let mut state = AssistantState::new();
    assert!(state.summarize(&api_for(&server)).await);
    assert_eq!(state.summary(), "Two tasks, one done.");
    assert!(!state.is_busy(AiAction::Summarize));
}

#[tokio::test]
async fn test_failed_summarize_shows_inline_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ai/summarize"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model offline"))
        .mount(&server)
        .await;

    let mut state = AssistantState::new();
    state.summarize(&api_for(&server)).await;
    assert!(state.summary().starts_with(SUMMARY_FAILED));
    assert!(state.summary().contains("model offline"));
}

#[tokio::test]
async fn test_ask_shows_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ai/question"))
        .and(body_json(json!({"question": "What's pending?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "2 tasks pending",
            "type": "qna"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut state = AssistantState::new();
    assert!(state.ask(&api_for(&server), "What's pending?").await);
    assert_eq!(state.answer(), "2 tasks pending");
    assert_eq!(state.question(), "What's pending?");
}

#[tokio::test]
async fn test_blank_question_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut state = AssistantState::new();
    assert!(!state.ask(&api_for(&server), "   ").await);
    assert_eq!(state.answer(), "");
    assert!(!state.is_busy(AiAction::Ask));
}

#[tokio::test]
async fn test_failed_ask_shows_inline_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ai/question"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let mut state = AssistantState::new();
    state.ask(&api_for(&server), "Anything urgent?").await;
    assert!(state.answer().starts_with(ANSWER_FAILED));
}

// =============================================================================
// Analyses
// =============================================================================

#[tokio::test]
async fn test_categorize_resolves_titles() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        "/api/todos",
        json!([{"id": 1, "title": "Buy milk", "completed": false}]),
    )
    .await;
    mount_json(
        &server,
        "GET",
        "/api/ai/categorize",
        json!([
            {"taskId": 1, "category": "Shopping"},
            {"taskId": 99, "category": "Misc"}
        ]),
    )
    .await;

    let tasks = TaskApi::new(&format!("{}/api/todos", server.uri()), None).unwrap();
    let mut list = TaskList::new();
    assert!(list.load(&tasks).await);
    let titles = list.titles();

    let mut state = AssistantState::new();
    assert!(state.categorize(&api_for(&server)).await);

    let categories = state.analysis(AnalysisKind::Category);
    assert_eq!(categories.len(), 2);
    assert_eq!(titles.title_for(&categories[0].task_id), "Buy milk");
    assert_eq!(categories[0].payload, "Shopping");
    assert_eq!(titles.title_for(&categories[1].task_id), UNKNOWN_TASK);
}

#[tokio::test]
async fn test_failed_categorize_keeps_previous_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ai/categorize"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"taskId": 1, "category": "Shopping"}])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/ai/categorize"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut state = AssistantState::new();
    state.categorize(&api).await;
    state.categorize(&api).await;

    let categories = state.analysis(AnalysisKind::Category);
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].task_id, TaskId::Number(1));
    assert_eq!(categories[0].payload, "Shopping");
    assert_eq!(state.summary(), "");
    assert!(!state.is_busy(AiAction::Categorize));
}

#[tokio::test]
async fn test_each_analysis_replaces_only_its_own_set() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        "/api/ai/prioritize",
        json!([{"taskId": 1, "priority": "HIGH"}, {"taskId": 2, "priority": "low"}]),
    )
    .await;
    mount_json(
        &server,
        "GET",
        "/api/ai/recommend",
        json!([{"taskId": 2, "recommendation": "Do it after lunch"}]),
    )
    .await;

    let api = api_for(&server);
    let mut state = AssistantState::new();
    assert!(state.prioritize(&api).await);
    assert!(state.recommend(&api).await);

    assert_eq!(state.analysis(AnalysisKind::Priority).len(), 2);
    assert_eq!(
        state.analysis(AnalysisKind::Recommendation)[0].payload,
        "Do it after lunch"
    );
    assert!(state.analysis(AnalysisKind::Category).is_empty());
}

#[tokio::test]
async fn test_in_flight_action_is_refused_until_applied() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/api/ai/summarize", json!({"answer": "ok"})).await;

    let api = api_for(&server);
    let mut state = AssistantState::new();

    let request = state.begin(AiAction::Summarize).unwrap();
    assert!(state.begin(AiAction::Summarize).is_none());
    assert!(state.begin(AiAction::Categorize).is_some());

    state.apply(request.execute(&api).await);
    assert!(!state.is_busy(AiAction::Summarize));
    assert!(state.is_busy(AiAction::Categorize));
    assert_eq!(state.summary(), "ok");
}

// =============================================================================
// Plain-text results
// =============================================================================

#[tokio::test]
async fn test_failed_summary_lines_carry_inline_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ai/summarize"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model offline"))
        .mount(&server)
        .await;

    let mut state = AssistantState::new();
    state.summarize(&api_for(&server)).await;

    assert_eq!(
        state.result_lines(AiAction::Summarize, &TaskTitles::default()),
        vec![format!("{SUMMARY_FAILED}server error: 500 - model offline")]
    );
}

#[tokio::test]
async fn test_failed_analysis_has_no_lines() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ai/recommend"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut state = AssistantState::new();
    state.recommend(&api_for(&server)).await;

    assert!(state
        .result_lines(AiAction::Recommend, &TaskTitles::default())
        .is_empty());
    assert_eq!(state.summary(), "");
}

#[tokio::test]
async fn test_unreachable_task_backend_labels_items_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/todos"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_json(
        &server,
        "GET",
        "/api/ai/categorize",
        json!([{"taskId": 1, "category": "Shopping"}]),
    )
    .await;

    let tasks = TaskApi::new(&format!("{}/api/todos", server.uri()), None).unwrap();
    let titles = TaskTitles::fetch(&tasks).await;
    assert!(titles.is_empty());

    let mut state = AssistantState::new();
    assert!(state.categorize(&api_for(&server)).await);
    assert_eq!(
        state.result_lines(AiAction::Categorize, &titles),
        vec![format!("{UNKNOWN_TASK}: Shopping")]
    );
}
