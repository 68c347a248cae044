//! Local stand-in for the timetable HTTP API, used by tests.
//!
//! Serves `route.json` on an ephemeral port. Scripted connections are
//! filtered by the requested date and time like the real service, but the
//! `num` parameter is ignored so callers must enforce the count themselves.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDateTime;
use serde_json::{Value, json};

#[derive(Clone)]
enum Reply {
    Connections(Vec<Value>),
    Status(u16),
    Raw(String),
}

#[derive(Default)]
struct Shared {
    routes: HashMap<(String, String), Reply>,
    requests: Vec<HashMap<String, String>>,
}

/// A running stub server.
pub(crate) struct StubUpstream {
    pub base_url: String,
    shared: Arc<Mutex<Shared>>,
}

impl StubUpstream {
    pub async fn spawn() -> Self {
        let shared = Arc::new(Mutex::new(Shared::default()));

        let app = Router::new()
            .route("/route.json", get(route))
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            shared,
        }
    }

    pub fn route(&self, from: &str, to: &str, connections: Vec<Value>) {
        self.insert(from, to, Reply::Connections(connections));
    }

    pub fn fail(&self, from: &str, to: &str, status: u16) {
        self.insert(from, to, Reply::Status(status));
    }

    pub fn raw(&self, from: &str, to: &str, body: &str) {
        self.insert(from, to, Reply::Raw(body.to_string()));
    }

    /// Query parameters of every request received, in order.
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.shared.lock().unwrap().requests.clone()
    }

    /// Requests received for one route.
    pub fn requests_for(&self, from: &str, to: &str) -> Vec<HashMap<String, String>> {
        self.requests()
            .into_iter()
            .filter(|p| {
                p.get("from").map(String::as_str) == Some(from)
                    && p.get("to").map(String::as_str) == Some(to)
            })
            .collect()
    }

    fn insert(&self, from: &str, to: &str, reply: Reply) {
        self.shared
            .lock()
            .unwrap()
            .routes
            .insert((from.to_string(), to.to_string()), reply);
    }
}

/// One-leg connection in upstream JSON form.
pub(crate) fn connection(
    departure: &str,
    arrival: &str,
    line: &str,
    kind: &str,
    track: Option<&str>,
) -> Value {
    let mut leg = json!({
        "departure": departure,
        "type": kind,
        "line": line,
        "terminal": format!("{line} terminal"),
    });
    if let Some(track) = track {
        leg["track"] = json!(track);
    }

    json!({
        "departure": departure,
        "arrival": arrival,
        "legs": [leg, {"arrival": arrival}],
    })
}

async fn route(
    State(shared): State<Arc<Mutex<Shared>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let reply = {
        let mut shared = shared.lock().unwrap();
        shared.requests.push(params.clone());
        let from = params.get("from").cloned().unwrap_or_default();
        let to = params.get("to").cloned().unwrap_or_default();
        shared.routes.get(&(from, to)).cloned()
    };

    match reply {
        None => Json(json!({"count": 0, "connections": []})).into_response(),
        Some(Reply::Status(status)) => (
            StatusCode::from_u16(status).unwrap(),
            "upstream unavailable",
        )
            .into_response(),
        Some(Reply::Raw(body)) => body.into_response(),
        Some(Reply::Connections(connections)) => {
            let after = requested_time(&params);
            let connections: Vec<Value> = connections
                .into_iter()
                .filter(|c| match (after, c["departure"].as_str()) {
                    (Some(after), Some(dep)) => {
                        NaiveDateTime::parse_from_str(dep, "%Y-%m-%d %H:%M:%S")
                            .is_ok_and(|dep| dep >= after)
                    }
                    _ => true,
                })
                .collect();
            Json(json!({"count": connections.len(), "connections": connections})).into_response()
        }
    }
}

fn requested_time(params: &HashMap<String, String>) -> Option<NaiveDateTime> {
    let date = params.get("date")?;
    let time = params.get("time")?;
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%m/%d/%Y %H:%M").ok()
}
