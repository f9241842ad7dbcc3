//! An in-process marketplace service answering scripted JSON replies.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use nftm_common::USER_ADDRESS_HEADER;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::{collections::HashMap, sync::Arc};

/// A request received by the [`MockService`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Recorded {
    pub(crate) method: String,
    /// Path and query, e.g. `/api/v1/orders?page=1&page_size=20`.
    pub(crate) uri: String,
    pub(crate) user: Option<String>,
    pub(crate) body: Value,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct MockService {
    replies: Arc<Mutex<HashMap<String, (StatusCode, Value)>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockService {
    /// Answers `method path` (e.g. `GET /orders/1`, relative to `/api/v1`) with `reply`.
    pub(crate) fn reply(self, route: &str, reply: Value) -> Self {
        self.reply_with(route, StatusCode::OK, reply)
    }

    pub(crate) fn reply_with(self, route: &str, status: StatusCode, reply: Value) -> Self {
        self.replies.lock().insert(route.to_string(), (status, reply));
        self
    }

    pub(crate) fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().clone()
    }

    pub(crate) fn last(&self) -> Recorded {
        self.requests.lock().last().cloned().expect("no request received")
    }

    /// Serves on a random local port and returns the API base URL.
    pub(crate) async fn spawn(&self) -> String {
        let app = Router::new().fallback(handle).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}/api/v1")
    }
}

async fn handle(
    State(service): State<MockService>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    service.requests.lock().push(Recorded {
        method: method.to_string(),
        uri: uri.to_string(),
        user: headers
            .get(USER_ADDRESS_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    let path = uri.path().strip_prefix("/api/v1").unwrap_or(uri.path());
    let reply = service.replies.lock().get(&format!("{method} {path}")).cloned();
    match reply {
        Some((status, body)) => (status, Json(body)).into_response(),
        None => {
            let body = json!({ "error": "not_found", "message": format!("no route {path}") });
            (StatusCode::NOT_FOUND, Json(body)).into_response()
        }
    }
}

pub(crate) const COLLECTION: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub(crate) const MAKER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

pub(crate) fn order_json(id: u64) -> Value {
    json!({
        "id": id,
        "marketplace_id": 0,
        "order_id": format!("0x{id:064x}"),
        "order_status": 0,
        "order_type": 1,
        "collection_address": COLLECTION,
        "token_id": "1",
        "expire_time": 1767225600,
        "price": 1.5,
        "maker": MAKER,
        "taker": null,
        "quantity_remaining": 1,
        "size": 1,
        "salt": null,
        "currency_address": "0x0",
        "create_time": 1700000000,
        "update_time": 1700000000
    })
}

pub(crate) fn item_json(id: u64) -> Value {
    json!({
        "id": id,
        "chain_id": 1,
        "token_id": id.to_string(),
        "name": format!("Token #{id}"),
        "owner": MAKER,
        "collection_address": COLLECTION,
        "creator": MAKER,
        "supply": 1,
        "list_price": 2.0,
        "list_time": null,
        "sale_price": null,
        "create_time": 1700000000,
        "update_time": null
    })
}

pub(crate) fn collection_json(id: u64) -> Value {
    json!({
        "id": id,
        "chain_id": 1,
        "symbol": "PUNK",
        "name": "Punks",
        "creator": MAKER,
        "address": COLLECTION,
        "owner_amount": 3,
        "item_amount": 10,
        "floor_price": 0.5,
        "sale_price": null,
        "description": null,
        "website": "https://punks.example",
        "volume_total": 12.5,
        "image_uri": null,
        "create_time": 1700000000,
        "update_time": null
    })
}

pub(crate) fn activity_json(id: u64) -> Value {
    json!({
        "id": id,
        "activity_type": 8,
        "maker": MAKER,
        "taker": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
        "marketplace_id": 0,
        "collection_address": COLLECTION,
        "token_id": "1",
        "currency_address": "1",
        "price": 0,
        "block_number": 42,
        "tx_hash": format!("0x{id:064x}"),
        "event_time": 1700000000,
        "create_time": 1700000000,
        "update_time": null
    })
}
