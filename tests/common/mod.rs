use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Clone)]
#[allow(dead_code)]
pub enum MockPage {
    Json(Value),
    Delayed(Duration, Value),
    Status(StatusCode),
    Garbage,
}

#[derive(Default)]
struct Recorded {
    page_requests: Vec<(u32, String)>,
    description_requests: Vec<String>,
}

#[derive(Clone)]
struct MockState {
    pages: Arc<HashMap<u32, MockPage>>,
    descriptions: Arc<HashMap<String, String>>,
    recorded: Arc<Mutex<Recorded>>,
}

async fn page_handler(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let page: u32 = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    let query = params.get("q").cloned().unwrap_or_default();
    state.recorded.lock().unwrap().page_requests.push((page, query));

    match state.pages.get(&page).cloned() {
        Some(MockPage::Json(body)) => Json(body).into_response(),
        Some(MockPage::Delayed(delay, body)) => {
            tokio::time::sleep(delay).await;
            Json(body).into_response()
        }
        Some(MockPage::Status(status)) => status.into_response(),
        Some(MockPage::Garbage) => (StatusCode::OK, "<html>not json</html>").into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn description_handler(State(state): State<MockState>, Path(id): Path<String>) -> Response {
    state
        .recorded
        .lock()
        .unwrap()
        .description_requests
        .push(id.clone());

    match state.descriptions.get(&id) {
        Some(text) => Json(json!({ "courseDescription": text })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub struct MockCatalogServer {
    addr: SocketAddr,
    recorded: Arc<Mutex<Recorded>>,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

#[allow(dead_code)]
impl MockCatalogServer {
    pub async fn start(pages: Vec<(u32, MockPage)>, descriptions: Vec<(&str, &str)>) -> Self {
        let state = MockState {
            pages: Arc::new(pages.into_iter().collect()),
            descriptions: Arc::new(
                descriptions
                    .into_iter()
                    .map(|(id, text)| (id.to_string(), text.to_string()))
                    .collect(),
            ),
            recorded: Arc::new(Mutex::new(Recorded::default())),
        };
        let recorded = state.recorded.clone();

        let app = Router::new()
            .route("/api/courses-min-structured", get(page_handler))
            .route("/api/courses/{id}", get(description_handler))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        MockCatalogServer {
            addr,
            recorded,
            shutdown_tx,
        }
    }

    pub fn address(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn page_requests(&self) -> Vec<(u32, String)> {
        self.recorded.lock().unwrap().page_requests.clone()
    }

    pub fn description_requests(&self) -> Vec<String> {
        self.recorded.lock().unwrap().description_requests.clone()
    }

    pub fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
    }
}

#[allow(dead_code)]
pub fn course(faculty: &str, subject: &str, as_string: &str, id: u32) -> Value {
    json!({
        "faculty": faculty,
        "subject": subject,
        "asString": as_string,
        "id": id,
    })
}

#[allow(dead_code)]
pub fn page(objects: Vec<Value>, total_pages: u32) -> MockPage {
    MockPage::Json(json!({ "objects": objects, "total_pages": total_pages }))
}
