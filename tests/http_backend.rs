//! Wire-format tests for the HTTP backend against an in-process server.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;

use rpchat::{
    ChatBackend, ChatClient, ChatLogger, ChatRequest, ChatResponse, ERROR_PREFIX, Error,
    HttpChatBackend, InputControl, Message, MessageLog, SessionId, SubmitOutcome, TextInput,
};

/// What the server saw for one request.
#[derive(Debug, Clone, PartialEq)]
struct Seen {
    session: String,
    content_type: Option<String>,
    body: String,
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Seen>>>);

impl Recorder {
    fn seen(&self) -> Vec<Seen> {
        self.0.lock().unwrap().clone()
    }
}

async fn echo_handler(
    State(recorder): State<Recorder>,
    Path(session): Path<String>,
    headers: HeaderMap,
    body: String,
) -> axum::Json<serde_json::Value> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let parsed: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
    recorder.0.lock().unwrap().push(Seen {
        session,
        content_type,
        body,
    });
    let reply = match parsed["message"].as_str() {
        Some("hello") => "hi there".to_string(),
        Some(other) => format!("you said: {other}"),
        None => "no message".to_string(),
    };
    axum::Json(serde_json::json!({ "response": reply, "image_prompt": null }))
}

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn echo_server() -> (String, Recorder) {
    let recorder = Recorder::default();
    let router = Router::new()
        .route("/api/chat/{id}", post(echo_handler))
        .with_state(recorder.clone());
    (spawn_server(router).await, recorder)
}

#[tokio::test]
async fn hello_round_trip_matches_wire_format() {
    let (base_url, recorder) = echo_server().await;
    let backend = HttpChatBackend::new(Some(base_url)).unwrap();
    let mut client = ChatClient::new(
        backend,
        SessionId::new(424242),
        MessageLog::new(),
        TextInput::with_value("hello"),
    );

    let outcome = client.activate().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Replied("hi there".to_string()));
    assert_eq!(
        client.list().messages(),
        &[Message::user("hello"), Message::bot("hi there")]
    );
    assert_eq!(client.input().value(), "");
    assert_eq!(
        recorder.seen(),
        vec![Seen {
            session: "424242".to_string(),
            content_type: Some("application/json".to_string()),
            body: r#"{"message":"hello"}"#.to_string(),
        }]
    );
}

#[tokio::test]
async fn session_id_is_reused_across_submits() {
    let (base_url, recorder) = echo_server().await;
    let backend = HttpChatBackend::new(Some(base_url)).unwrap();
    let session = SessionId::generate();
    let mut client = ChatClient::new(backend, session, MessageLog::new(), TextInput::new());

    client.submit("one").await.unwrap();
    client.submit("   ").await.unwrap();
    client.submit("two").await.unwrap();

    let seen = recorder.seen();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|s| s.session == session.to_string()));
    assert_eq!(client.list().messages()[3], Message::bot("you said: two"));
}

#[tokio::test]
async fn unparseable_body_is_shown_as_error() {
    let router = Router::new().route("/api/chat/{id}", post(|| async { "not json" }));
    let backend = HttpChatBackend::new(Some(spawn_server(router).await)).unwrap();
    let mut client = ChatClient::new(backend, SessionId::new(1), MessageLog::new(), TextInput::new());

    let err = client.submit("hello").await.unwrap_err();

    assert!(err.is_serialization());
    let placeholder = &client.list().messages()[1];
    assert!(placeholder.text.starts_with(ERROR_PREFIX));
    assert!(!client.is_busy());
}

#[tokio::test]
async fn error_status_is_an_api_error() {
    let router = Router::new().route(
        "/api/chat/{id}",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let backend = HttpChatBackend::new(Some(spawn_server(router).await)).unwrap();

    let err = backend
        .send(SessionId::new(3), &ChatRequest::new("hello"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert!(err.to_string().contains("boom"));
}

#[tokio::test]
async fn refused_connection_is_a_connection_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let backend = HttpChatBackend::new(Some(format!("http://{addr}"))).unwrap();

    let err = backend
        .send(SessionId::new(3), &ChatRequest::new("hello"))
        .await
        .unwrap_err();

    assert!(err.is_connection(), "unexpected error: {err}");
}

#[derive(Default)]
struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl ChatLogger for RecordingLogger {
    fn log_request(&self, session: SessionId, request: &ChatRequest) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("request {session} {}", request.message));
    }

    fn log_response(&self, session: SessionId, response: &ChatResponse) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("response {session} {}", response.response));
    }

    fn log_error(&self, session: SessionId, error: &Error) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("error {session} {}", error.status_code().unwrap_or(0)));
    }
}

#[tokio::test]
async fn logger_sees_every_exchange() {
    let (base_url, _recorder) = echo_server().await;
    let logger = Arc::new(RecordingLogger::default());
    let backend = HttpChatBackend::new(Some(base_url))
        .unwrap()
        .with_logger(logger.clone());

    backend
        .send(SessionId::new(9), &ChatRequest::new("hello"))
        .await
        .unwrap();

    let router = Router::new().route(
        "/api/chat/{id}",
        post(|| async { (StatusCode::BAD_GATEWAY, "") }),
    );
    let failing = HttpChatBackend::new(Some(spawn_server(router).await))
        .unwrap()
        .with_logger(logger.clone());
    failing
        .send(SessionId::new(9), &ChatRequest::new("x"))
        .await
        .unwrap_err();

    assert_eq!(
        *logger.lines.lock().unwrap(),
        vec![
            "request 9 hello".to_string(),
            "response 9 hi there".to_string(),
            "request 9 x".to_string(),
            "error 9 502".to_string(),
        ]
    );
}
