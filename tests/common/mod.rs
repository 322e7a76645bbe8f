#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use evac_portal::backend::api::{ApiRequest, ApiResponse, Transport};
use evac_portal::backend::session::{MemoryStore, SharedStore};
use evac_portal::backend::utils::config::AppConfig;
use evac_portal::frontend::Portal;
use evac_portal::utils::Result;
use evac_portal::utils::logging::ChannelLogger;
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};

type Responder = Box<dyn Fn(&ApiRequest) -> Result<ApiResponse> + Send + Sync>;

/// Answers requests from a closure and keeps every request it saw.
pub struct MockTransport {
    responder: Responder,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new(
        responder: impl Fn(&ApiRequest) -> Result<ApiResponse> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> ApiRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(&request)
    }
}

pub fn status(code: u16, body: Value) -> ApiResponse {
    ApiResponse::new(StatusCode::from_u16(code).unwrap(), body)
}

/// A backend that accepts any login and echoes a fixed area list.
pub fn admin_backend() -> Arc<MockTransport> {
    MockTransport::new(|request| {
        let path = request.url.trim_start_matches("http://127.0.0.1:8000/api");
        Ok(match (&request.method, path) {
            (&Method::POST, "/login") => ApiResponse::ok(json!({"token": "abc123"})),
            (&Method::GET, "/evacuation-areas") => {
                ApiResponse::ok(json!([{"id": 1, "name": "Area A"}]))
            }
            _ => status(404, json!({"message": "not found"})),
        })
    })
}

pub fn rejecting_backend() -> Arc<MockTransport> {
    MockTransport::new(|_| Ok(status(401, json!({"message": "Unauthenticated."}))))
}

pub struct Harness {
    pub store: SharedStore,
    pub admin: Arc<MockTransport>,
    pub resident: Arc<MockTransport>,
    pub portal: Portal,
}

pub fn harness(admin: Arc<MockTransport>, resident: Arc<MockTransport>) -> Harness {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let portal = Portal::with_transports(
        AppConfig::default(),
        store.clone(),
        Arc::new(ChannelLogger::default()),
        Some(admin.clone()),
        Some(resident.clone()),
    )
    .unwrap();
    Harness {
        store,
        admin,
        resident,
        portal,
    }
}
