use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Response, StatusCode},
    routing::post,
    Json, Router,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::net::TcpListener;

pub const SYNTHESIS_PATH: &str = "/api/tts";

/// Fake MP3 frame header followed by padding
pub const MP3_BYTES: &[u8] = &[0xFF, 0xFB, 0x90, 0x64, 0x00, 0x00, 0x00, 0x00];

/// What the server answers with
#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl ScriptedResponse {
    pub fn audio() -> Self {
        Self {
            status: StatusCode::OK,
            content_type: Some("audio/mpeg".to_string()),
            body: MP3_BYTES.to_vec(),
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: br#"{"error":"synthesis unavailable"}"#.to_vec(),
        }
    }

    pub fn json_ok() -> Self {
        Self {
            status: StatusCode::OK,
            content_type: Some("application/json".to_string()),
            body: br#"{"message":"not audio"}"#.to_vec(),
        }
    }
}

/// One request the server received
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub body: serde_json::Value,
    pub authorization: Option<String>,
}

#[derive(Debug)]
struct ServerState {
    response: Mutex<ScriptedResponse>,
    received: Mutex<Vec<ReceivedRequest>>,
}

pub struct SynthesisServer {
    pub endpoint: String,
    state: Arc<ServerState>,
}

impl SynthesisServer {
    pub async fn start() -> Self {
        let state = Arc::new(ServerState {
            response: Mutex::new(ScriptedResponse::audio()),
            received: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route(SYNTHESIS_PATH, post(synthesize))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            endpoint: format!("http://{}{}", addr, SYNTHESIS_PATH),
            state,
        }
    }

    pub fn respond_with(&self, response: ScriptedResponse) {
        *self.state.response.lock() = response;
    }

    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.state.received.lock().clone()
    }
}

async fn synthesize(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response<Body> {
    state.received.lock().push(ReceivedRequest {
        body,
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    let scripted = state.response.lock().clone();
    let mut builder = Response::builder().status(scripted.status);
    if let Some(content_type) = &scripted.content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(scripted.body)).unwrap()
}
