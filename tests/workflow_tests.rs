mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use gift_recommender::{
    models::SelectedFile,
    render::{cards, ResultsView},
    services::HttpAnalysisClient,
    workflow::{
        NoticeLevel, SubmitOutcome, WorkflowSession, WorkflowState, GENERIC_FAILURE_MESSAGE,
    },
};

use common::{closed_port_url, spawn_stub, success_body};

fn session_for(base_url: &str) -> WorkflowSession {
    let client = HttpAnalysisClient::new(base_url, Duration::from_secs(5)).unwrap();
    WorkflowSession::new(Arc::new(client))
}

fn chat(name: &str) -> SelectedFile {
    SelectedFile::new(name, b"[07/08/2024, 12:00] Bob: my headphones died".to_vec())
}

#[tokio::test]
async fn test_full_flow_renders_in_server_order() {
    let body = success_body(
        "Bob listens to podcasts on his commute",
        &[
            ("Headphones", "Noise cancelling over-ear", "https://example.com/hp"),
            ("Podcast mic", "If he ever starts his own", ""),
        ],
    );
    let stub = spawn_stub(StatusCode::OK, &body).await;
    let session = session_for(&stub.base_url);

    session.set_user_name("Alice").await;
    session.set_friend_name("Bob").await;
    session
        .on_drop(vec![chat("chat.txt"), chat("ignored.txt")])
        .await;

    let submission = session.submit().await;
    assert_eq!(submission.outcome, SubmitOutcome::Succeeded);
    assert!(submission.notices.is_empty());

    let snapshot = session.snapshot().await;
    let result = snapshot.state.result().unwrap();
    let names: Vec<&str> = cards(result).iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Headphones", "Podcast mic"]);

    let text = ResultsView::new(&snapshot.identity.friend_name, result).to_string();
    assert!(text.find("1. Headphones").unwrap() < text.find("2. Podcast mic").unwrap());

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].file_name.as_deref(), Some("chat.txt"));
}

#[tokio::test]
async fn test_empty_recommendations_show_info_notice() {
    let stub = spawn_stub(StatusCode::OK, &success_body("Too short a chat", &[])).await;
    let session = session_for(&stub.base_url);

    session.set_user_name("Alice").await;
    session.set_friend_name("Bob").await;
    session.on_pick(vec![chat("chat.txt")]).await;

    let submission = session.submit().await;
    assert_eq!(submission.outcome, SubmitOutcome::Succeeded);
    assert_eq!(submission.notices.len(), 1);
    assert_eq!(submission.notices[0].level, NoticeLevel::Info);
    assert!(session.snapshot().await.state.result().unwrap().is_empty());
}

#[tokio::test]
async fn test_service_error_yields_generic_failure() {
    let stub = spawn_stub(StatusCode::BAD_GATEWAY, "upstream timed out").await;
    let session = session_for(&stub.base_url);

    session.set_user_name("Alice").await;
    session.set_friend_name("Bob").await;
    session.on_pick(vec![chat("chat.txt")]).await;

    let submission = session.submit().await;
    assert_eq!(submission.outcome, SubmitOutcome::Failed);
    assert_eq!(submission.notices[0].level, NoticeLevel::Error);
    assert_eq!(submission.notices[0].description, GENERIC_FAILURE_MESSAGE);
    assert!(!submission.notices[0].description.contains("upstream"));
}

#[tokio::test]
async fn test_unreachable_service_yields_generic_failure() {
    let session = session_for(&closed_port_url().await);

    session.set_user_name("Alice").await;
    session.set_friend_name("Bob").await;
    session.on_pick(vec![chat("chat.txt")]).await;

    session.submit().await;
    assert_eq!(
        session.snapshot().await.state,
        WorkflowState::Failed(GENERIC_FAILURE_MESSAGE.to_string())
    );
}

#[tokio::test]
async fn test_blank_friend_name_sends_nothing() {
    let stub = spawn_stub(StatusCode::OK, &success_body("", &[])).await;
    let session = session_for(&stub.base_url);

    session.set_user_name("Alice").await;
    session.set_friend_name("  ").await;
    session.on_pick(vec![chat("chat.txt")]).await;

    let submission = session.submit().await;
    assert_eq!(submission.notices[0].level, NoticeLevel::Warning);
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_concurrent_submits_send_one_request() {
    let stub = spawn_stub(StatusCode::OK, &success_body("", &[("Mug", "For tea", "")])).await;
    let session = session_for(&stub.base_url);

    session.set_user_name("Alice").await;
    session.set_friend_name("Bob").await;
    session.on_pick(vec![chat("chat.txt")]).await;

    let (first, second) = tokio::join!(session.submit(), session.submit());
    let mut outcomes = vec![first.outcome, second.outcome];
    outcomes.sort_by_key(|o| matches!(o, SubmitOutcome::Ignored));

    assert_eq!(outcomes, vec![SubmitOutcome::Succeeded, SubmitOutcome::Ignored]);
    assert_eq!(stub.requests().len(), 1);
}

#[tokio::test]
async fn test_session_is_reusable_after_new_file() {
    let stub = spawn_stub(StatusCode::OK, &success_body("", &[("Mug", "For tea", "")])).await;
    let session = session_for(&stub.base_url);

    session.set_user_name("Alice").await;
    session.set_friend_name("Bob").await;
    session.on_pick(vec![chat("first.txt")]).await;
    session.submit().await;
    assert!(session.snapshot().await.state.result().is_some());

    session.on_drop(vec![chat("second.json")]).await;
    assert_eq!(session.snapshot().await.state, WorkflowState::Idle);

    assert_eq!(session.submit().await.outcome, SubmitOutcome::Succeeded);

    let files: Vec<Option<String>> = stub.requests().into_iter().map(|r| r.file_name).collect();
    assert_eq!(
        files,
        vec![Some("first.txt".to_string()), Some("second.json".to_string())]
    );
}
