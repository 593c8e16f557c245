#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use eventra_client::{Context, PageController};
use eventra_core::{
    ApiRequest, ApiResponse, CoreError, CoreResult, MemoryTokenStore, SimulatedPayment,
    TokenStore, Transport, Ui,
};
use eventra_shared::models::Role;
use serde_json::Value;

pub const PAYMENT_DELAY: Duration = Duration::from_millis(1500);

/// In-memory backend keyed by `"METHOD /path"`.
///
/// Replies for a route are consumed in order; the last one keeps answering.
#[derive(Default)]
pub struct FakeBackend {
    routes: Mutex<HashMap<String, VecDeque<CoreResult<ApiResponse>>>>,
    latency: Mutex<HashMap<String, Duration>>,
    sent: Mutex<Vec<ApiRequest>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, route: &str, status: u16, body: Value) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry(route.to_string())
            .or_default()
            .push_back(Ok(ApiResponse::new(status, body)));
        self
    }

    pub fn fail(&self, route: &str) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry(route.to_string())
            .or_default()
            .push_back(Err(CoreError::Transport("connection reset".to_string())));
        self
    }

    /// Holds every reply on `route` back for `delay`.
    pub fn slow(&self, route: &str, delay: Duration) -> &Self {
        self.latency.lock().unwrap().insert(route.to_string(), delay);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn calls(&self, route: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| format!("{} {}", r.method, r.path) == route)
            .collect()
    }
}

#[async_trait]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> CoreResult<ApiResponse> {
        self.sent.lock().unwrap().push(request.clone());
        let key = format!("{} {}", request.method, request.path);
        let delay = self.latency.lock().unwrap().get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let mut routes = self.routes.lock().unwrap();
        let queue = routes
            .get_mut(&key)
            .unwrap_or_else(|| panic!("unexpected request {}", key));
        let reply = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().map(|r| match r {
                Ok(res) => Ok(res.clone()),
                Err(e) => Err(CoreError::Transport(e.to_string())),
            })
        };
        reply.unwrap_or_else(|| panic!("no reply queued for {}", key))
    }
}

pub struct RecordingUi {
    pub alerts: Mutex<Vec<String>>,
    pub confirms: Mutex<Vec<String>>,
    pub locations: Mutex<Vec<String>>,
    pub answer: bool,
}

impl RecordingUi {
    pub fn new(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            alerts: Mutex::new(Vec::new()),
            confirms: Mutex::new(Vec::new()),
            locations: Mutex::new(Vec::new()),
            answer,
        })
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }

    pub fn locations(&self) -> Vec<String> {
        self.locations.lock().unwrap().clone()
    }
}

impl Ui for RecordingUi {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answer
    }

    fn navigate(&self, location: &str) {
        self.locations.lock().unwrap().push(location.to_string());
    }
}

pub struct Harness {
    pub backend: Arc<FakeBackend>,
    pub store: Arc<MemoryTokenStore>,
    pub ui: Arc<RecordingUi>,
    pub page: Arc<PageController>,
}

pub fn harness(role: Option<Role>) -> Harness {
    harness_with(role, true)
}

pub fn harness_with(role: Option<Role>, answer: bool) -> Harness {
    let backend = FakeBackend::new();
    let store = Arc::new(MemoryTokenStore::new());
    if let Some(role) = role {
        store.set("access-1", Some("refresh-1"), Some(role));
    }
    let ui = RecordingUi::new(answer);
    let ctx = Arc::new(Context::new(
        backend.clone(),
        store.clone(),
        ui.clone(),
        Arc::new(SimulatedPayment::new(PAYMENT_DELAY)),
    ));
    Harness {
        backend,
        store,
        ui,
        page: Arc::new(PageController::new(ctx)),
    }
}

pub fn seat(id: i64, row: &str, number: u32, price: f64, status: &str) -> Value {
    serde_json::json!({
        "id": id,
        "row": row,
        "number": number,
        "type": "Standard",
        "price": price,
        "status": status,
    })
}

pub fn event_details(id: i64) -> Value {
    serde_json::json!({
        "id": id,
        "title": "Jazz Night",
        "description": "Live quartet",
        "date_time": "2025-03-01T20:00:00",
        "venue_name": "Blue Hall",
        "venue_address": "1 Main St",
        "base_price": 10.0,
        "status": "Active",
    })
}
