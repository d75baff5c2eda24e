//! Local stand-in for the 25Live availability endpoint.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

pub const PATH: &str = "/25live/data/umd/run/availability/availabilitydata.json";

/// Space ids with special behaviour; everything else gets an empty schedule.
pub const MERGED_SPACE: &str = "1";
pub const SERVER_ERROR_SPACE: &str = "2";
pub const BAD_JSON_SPACE: &str = "3";
pub const SLOW_SPACE: &str = "4";

pub type Requests = Arc<Mutex<Vec<HashMap<String, String>>>>;

async fn availability(
    State(requests): State<Requests>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let space = params.get("space_id").cloned().unwrap_or_default();
    requests.lock().unwrap().push(params);

    match space.as_str() {
        MERGED_SPACE => Json(json!({
            "subjects": [{
                "item_date": "2024-01-01",
                "items": [
                    {"start": "0900", "end": "1000", "itemName": "Math101", "type_id": "1", "itemId2": 501},
                    {"start": "0900", "end": "1000", "itemName": "CS101", "type_id": "1", "itemId2": 502},
                    {"start": "1100", "end": "1200", "itemName": "Closed", "type_id": "4"}
                ]
            }]
        }))
        .into_response(),
        SERVER_ERROR_SPACE => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        BAD_JSON_SPACE => (StatusCode::OK, "<html>not json</html>").into_response(),
        SLOW_SPACE => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({"subjects": []})).into_response()
        }
        _ => Json(json!({"subjects": []})).into_response(),
    }
}

/// Starts the fake service and returns its endpoint URL plus a request log.
pub async fn spawn_server() -> (String, Requests) {
    let requests: Requests = Arc::default();
    let router = Router::new()
        .route(PATH, get(availability))
        .with_state(requests.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}{PATH}"), requests)
}
