#![allow(dead_code)]

//! In-process stand-in for the chat analysis service

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};

/// What the stub saw in one multipart request
#[derive(Debug, Clone, Default)]
pub struct CapturedRequest {
    pub file_name: Option<String>,
    pub file: Vec<u8>,
    pub user_name: String,
    pub friend_name: String,
    pub request_id: Option<String>,
}

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

pub struct StubService {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubService {
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn analyze_chat(
    State(stub): State<Stub>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut captured = CapturedRequest {
        request_id: headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        ..Default::default()
    };

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                captured.file_name = field.file_name().map(str::to_string);
                captured.file = field.bytes().await.unwrap().to_vec();
            }
            "user_name" => captured.user_name = field.text().await.unwrap(),
            "friend_name" => captured.friend_name = field.text().await.unwrap(),
            _ => {}
        }
    }

    stub.requests.lock().unwrap().push(captured);

    if !stub.delay.is_zero() {
        tokio::time::sleep(stub.delay).await;
    }

    (
        stub.status,
        [(header::CONTENT_TYPE, "application/json")],
        stub.body.clone(),
    )
}

/// Starts a stub that answers every analysis request with `status` and `body`
pub async fn spawn_stub(status: StatusCode, body: &str) -> StubService {
    spawn_stub_with_delay(status, body, Duration::ZERO).await
}

pub async fn spawn_stub_with_delay(status: StatusCode, body: &str, delay: Duration) -> StubService {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let stub = Stub {
        status,
        body: body.to_string(),
        delay,
        requests: requests.clone(),
    };

    let app = Router::new()
        .route("/api/analyze-chat", post(analyze_chat))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubService {
        base_url: format!("http://{}", addr),
        requests,
    }
}

/// A base URL nothing is listening on
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn success_body(notes: &str, ideas: &[(&str, &str, &str)]) -> String {
    let gift_ideas: Vec<serde_json::Value> = ideas
        .iter()
        .map(|(name, description, link)| {
            serde_json::json!({ "name": name, "description": description, "link": link })
        })
        .collect();

    serde_json::json!({
        "recommendations": {
            "notes": notes,
            "gift_ideas": gift_ideas
        }
    })
    .to_string()
}
