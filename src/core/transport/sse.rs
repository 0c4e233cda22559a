//! SSE transport implementation.
//!
//! Server-Sent Events push channel paired with JSON-RPC over POST.
//! A client opens `GET /sse` and receives an `endpoint` event naming the
//! POST URL for its session; every JSON-RPC response is then pushed down
//! the stream as a `message` event. Each session owns its own channel, so
//! any number of clients can be connected at once.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
};
use futures::{Stream, StreamExt, stream};
use serde::Deserialize;
use tokio::sync::mpsc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::rpc::{JsonRpcRequest, JsonRpcResponse, process_request};
use super::{TransportError, TransportResult, config::SseConfig};
use crate::core::McpServer;

/// Live SSE sessions, keyed by session id.
///
/// The store holds only the response senders; each event stream owns its
/// receiver and removes its entry on disconnect through [`SessionGuard`].
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, mpsc::Sender<JsonRpcResponse>>>>,
}

impl SessionStore {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, mpsc::Sender<JsonRpcResponse>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new session.
    pub fn register(&self, id: String, tx: mpsc::Sender<JsonRpcResponse>) {
        self.lock().insert(id, tx);
    }

    /// Look up the response sender for a session.
    pub fn sender(&self, id: &str) -> Option<mpsc::Sender<JsonRpcResponse>> {
        self.lock().get(id).cloned()
    }

    /// Drop a session.
    pub fn remove(&self, id: &str) {
        self.lock().remove(id);
    }

    /// Number of connected sessions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no session is connected.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Removes the session from the store when its event stream is dropped.
struct SessionGuard {
    id: String,
    store: SessionStore,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.store.remove(&self.id);
        info!("SSE session closed: {}", self.id);
    }
}

/// Application state shared across SSE handlers.
#[derive(Clone)]
struct AppState {
    /// The MCP server instance.
    server: McpServer,
    /// Connected sessions.
    sessions: SessionStore,
}

/// SSE transport handler.
pub struct SseTransport {
    config: SseConfig,
}

impl SseTransport {
    /// Create a new SSE transport with the given config.
    pub fn new(config: SseConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the SSE transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let state = AppState {
            server,
            sessions: SessionStore::default(),
        };

        let mut app = router(state);

        // Add CORS if enabled
        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (SSE, CORS {})", addr, cors_status);
        info!("  → Stream:   GET /sse");
        info!("  → Messages: POST /messages?sessionId=<id>");
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the SSE router over the given state.
fn router(state: AppState) -> Router {
    Router::new()
        .route("/sse", get(handle_sse))
        .route("/messages", post(handle_message))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Open an event stream and mint a session.
async fn handle_sse(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let session_id = Uuid::new_v4().to_string();
    info!("New SSE session: {}", session_id);

    let (tx, rx) = mpsc::channel::<JsonRpcResponse>(32);
    state.sessions.register(session_id.clone(), tx);
    let guard = SessionGuard {
        id: session_id.clone(),
        store: state.sessions.clone(),
    };

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("/messages?sessionId={}", session_id));

    // The guard rides along in the stream state so the session lives
    // exactly as long as the connection.
    let responses = stream::unfold((rx, guard), |(mut rx, guard)| async move {
        let response = rx.recv().await?;
        let event = match Event::default().event("message").json_data(&response) {
            Ok(event) => event,
            Err(e) => {
                error!("Failed to encode SSE event: {}", e);
                return None;
            }
        };
        Some((Ok::<_, Infallible>(event), (rx, guard)))
    });

    Sse::new(stream::once(async move { Ok(endpoint) }).chain(responses)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

/// Query parameters for POST /messages.
#[derive(Debug, Deserialize)]
struct MessageQuery {
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

/// Accept a JSON-RPC request for an existing session.
///
/// The session is resolved before the body is parsed. Processing happens
/// on a spawned task and the response goes out over the event stream, so
/// the POST itself only acknowledges receipt.
async fn handle_message(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
    body: String,
) -> impl IntoResponse {
    let Some(session_id) = query.session_id else {
        warn!("POST /messages without sessionId");
        return (
            StatusCode::BAD_REQUEST,
            "No transport found for sessionId".to_string(),
        );
    };

    let Some(tx) = state.sessions.sender(&session_id) else {
        warn!("No transport found for session {}", session_id);
        return (
            StatusCode::BAD_REQUEST,
            "No transport found for sessionId".to_string(),
        );
    };

    let request: JsonRpcRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => return (StatusCode::BAD_REQUEST, format!("invalid json: {}", e)),
    };

    info!("Received JSON-RPC request: {}", request.method);

    let server = state.server.clone();
    tokio::spawn(async move {
        if let Some(response) = process_request(&server, request).await {
            if tx.send(response).await.is_err() {
                warn!("Session {} closed before response delivery", session_id);
            }
        }
    });

    (StatusCode::ACCEPTED, "Accepted".to_string())
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::domains::tools::{
        JsonObject, ParameterSchema, ToolDescriptor, ToolFailure, ToolInvoke, ToolRegistry,
    };
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    struct CountingTool {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ToolInvoke for CountingTool {
        async fn invoke(&self, _args: JsonObject) -> Result<Value, ToolFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "ok": true }))
        }
    }

    fn state_with_counter(calls: Arc<AtomicUsize>) -> AppState {
        let tools = vec![ToolDescriptor::new(
            "probe",
            "Counting probe.",
            ParameterSchema::object(json!({}), &[]),
            Arc::new(CountingTool { calls }),
        )];

        AppState {
            server: McpServer::from_parts(Arc::new(Config::default()), ToolRegistry::new(tools)),
            sessions: SessionStore::default(),
        }
    }

    fn test_state() -> AppState {
        state_with_counter(Arc::new(AtomicUsize::new(0)))
    }

    fn post_message(session: Option<&str>, body: &str) -> Request<Body> {
        let uri = match session {
            Some(id) => format!("/messages?sessionId={}", id),
            None => "/messages".to_string(),
        };
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(body: Body) -> String {
        let bytes = to_bytes(body, usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_post_to_unknown_session_is_rejected_before_dispatch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = router(state_with_counter(calls.clone()));

        let request = post_message(
            Some("missing"),
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"probe","arguments":{}}}"#,
        );
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_string(response.into_body()).await,
            "No transport found for sessionId"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_post_without_session_id_is_rejected() {
        let app = router(test_state());

        let response = app
            .oneshot(post_message(None, r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_string(response.into_body()).await,
            "No transport found for sessionId"
        );
    }

    #[tokio::test]
    async fn test_post_with_invalid_json_is_rejected() {
        let state = test_state();
        let (tx, _rx) = mpsc::channel(8);
        state.sessions.register("s1".to_string(), tx);
        let app = router(state);

        let response = app
            .oneshot(post_message(Some("s1"), "not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(response.into_body()).await.starts_with("invalid json"));
    }

    #[tokio::test]
    async fn test_post_acknowledges_and_pushes_response() {
        let state = test_state();
        let (tx, mut rx) = mpsc::channel(8);
        state.sessions.register("s1".to_string(), tx);
        let app = router(state);

        let response = app
            .oneshot(post_message(
                Some("s1"),
                r#"{"jsonrpc":"2.0","id":7,"method":"initialize"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(body_string(response.into_body()).await, "Accepted");

        let pushed = rx.recv().await.unwrap();
        assert_eq!(pushed.id, Some(json!(7)));
        assert_eq!(pushed.result.unwrap()["protocolVersion"], "2024-11-05");
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let state = test_state();
        let (tx1, mut rx1) = mpsc::channel(8);
        let (tx2, mut rx2) = mpsc::channel(8);
        state.sessions.register("s1".to_string(), tx1);
        state.sessions.register("s2".to_string(), tx2);
        let app = router(state);

        let response = app
            .oneshot(post_message(
                Some("s1"),
                r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let pushed = rx1.recv().await.unwrap();
        assert_eq!(pushed.id, Some(json!(1)));
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_notifications_push_nothing() {
        let state = test_state();
        let (tx, mut rx) = mpsc::channel(8);
        state.sessions.register("s1".to_string(), tx);
        let app = router(state);

        let response = app
            .oneshot(post_message(
                Some("s1"),
                r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_sse_stream_mints_and_cleans_up_session() {
        let state = test_state();
        let sessions = state.sessions.clone();
        let app = router(state);

        let response = app
            .oneshot(Request::builder().uri("/sse").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("text/event-stream"));
        assert_eq!(sessions.len(), 1);

        let mut body = response.into_body();
        let frame = body.frame().await.unwrap().unwrap();
        let first = String::from_utf8(frame.into_data().ok().unwrap().to_vec()).unwrap();
        assert!(first.contains("event: endpoint"));
        assert!(first.contains("data: /messages?sessionId="));

        let session_id = first.split("sessionId=").nth(1).unwrap().trim().to_string();
        assert!(sessions.sender(&session_id).is_some());

        drop(body);
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = router(test_state());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload: Value =
            serde_json::from_str(&body_string(response.into_body()).await).unwrap();
        assert_eq!(payload["status"], "healthy");
        assert!(payload["timestamp"].is_string());
    }
}
