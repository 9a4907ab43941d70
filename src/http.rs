//! HTTP transport for the inventory workflow.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /api/v1/inventory` - create a record.
//! - `GET /api/v1/inventory` - list every record.
//! - `GET|PUT|PATCH|DELETE /api/v1/inventory/:id` - get, full update, partial update, delete.
//! - `PUT /api/v1/inventory/:id/stock` - stock-only update.
//! - `GET /api/v1/inventory/:id/sufficient?quantity=N` - stock sufficiency check.
//! - `GET /api/v1/inventory/location/:location` - search by warehouse location.
//! - `GET /api/v1/inventory/stock?min=A&max=B` - search by stock range.
//! - `GET /health` - health check returning `{ "ok": true }`.
//! - `GET /api-docs/openapi.json` - OpenAPI 3 description of the routes above.
//!
//! A body that does not decode (missing `stockQuantity`, a string where a
//! number belongs, malformed JSON) is answered with 400 and an
//! `{ "error": .. }` body, the same shape as a failed validation.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use inventory_service::{http, InMemoryRecordStore, InventoryWorkflow};
//!
//! let workflow = Arc::new(InventoryWorkflow::new(InMemoryRecordStore::new()));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(workflow.clone());
//!
//! // Or serve directly
//! http::serve(workflow, "0.0.0.0:8080").await?;
//! ```

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::openapi;
use crate::record::{NewRecord, RecordUpdate};
use crate::store::RecordStore;
use crate::workflow::{FieldSet, InventoryWorkflow, Outcome, WorkflowError};

type Shared<S> = State<Arc<InventoryWorkflow<S>>>;

/// Build an axum `Router` serving the given workflow.
pub fn router<S: RecordStore + 'static>(workflow: Arc<InventoryWorkflow<S>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api-docs/openapi.json", get(openapi_handler))
        .route(
            "/api/v1/inventory",
            get(list_handler::<S>).post(create_handler::<S>),
        )
        .route("/api/v1/inventory/stock", get(stock_range_handler::<S>))
        .route(
            "/api/v1/inventory/location/:location",
            get(location_handler::<S>),
        )
        .route(
            "/api/v1/inventory/:id",
            get(get_handler::<S>)
                .put(update_full_handler::<S>)
                .patch(update_partial_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .route(
            "/api/v1/inventory/:id/stock",
            put(update_stock_handler::<S>),
        )
        .route(
            "/api/v1/inventory/:id/sufficient",
            get(sufficient_handler::<S>),
        )
        .with_state(workflow)
}

/// Serve the workflow over HTTP at the given address (e.g. `"0.0.0.0:8080"`).
pub async fn serve<S: RecordStore + 'static>(
    workflow: Arc<InventoryWorkflow<S>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(workflow);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "inventory service listening");
    axum::serve(listener, app).await
}

/// `GET /health` - returns `{ "ok": true }`.
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

async fn openapi_handler() -> impl IntoResponse {
    Json(openapi::document())
}

async fn create_handler<S: RecordStore + 'static>(
    State(workflow): Shared<S>,
    body: Result<Json<NewRecord>, JsonRejection>,
) -> Response {
    write_response(decode(body).and_then(|record| workflow.create(record)))
}

async fn list_handler<S: RecordStore + 'static>(State(workflow): Shared<S>) -> Response {
    Json(workflow.list_all()).into_response()
}

async fn get_handler<S: RecordStore + 'static>(
    State(workflow): Shared<S>,
    Path(id): Path<u64>,
) -> Response {
    match workflow.get(id) {
        Ok(record) => Json(record).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn update_full_handler<S: RecordStore + 'static>(
    State(workflow): Shared<S>,
    Path(id): Path<u64>,
    body: Result<Json<RecordUpdate>, JsonRejection>,
) -> Response {
    write_response(decode(body).and_then(|update| workflow.update_full(id, update)))
}

async fn update_stock_handler<S: RecordStore + 'static>(
    State(workflow): Shared<S>,
    Path(id): Path<u64>,
    body: Result<Json<RecordUpdate>, JsonRejection>,
) -> Response {
    write_response(decode(body).and_then(|update| workflow.update_stock_only(id, update)))
}

async fn update_partial_handler<S: RecordStore + 'static>(
    State(workflow): Shared<S>,
    Path(id): Path<u64>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Response {
    write_response(
        decode(body).and_then(|fields| workflow.update_partial(id, &FieldSet::from(fields))),
    )
}

async fn delete_handler<S: RecordStore + 'static>(
    State(workflow): Shared<S>,
    Path(id): Path<u64>,
) -> Response {
    write_response(workflow.delete(id))
}

/// `GET /api/v1/inventory/location/:location` - 404 with a message when nothing matches.
async fn location_handler<S: RecordStore + 'static>(
    State(workflow): Shared<S>,
    Path(location): Path<String>,
) -> Response {
    let records = workflow.find_by_location(&location);
    if records.is_empty() {
        let body = json!({ "message": format!("no inventory records at location: {}", location) });
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    }
    Json(records).into_response()
}

#[derive(Debug, Deserialize)]
struct StockRange {
    #[serde(default)]
    min: i64,
    #[serde(default = "default_max")]
    max: i64,
}

fn default_max() -> i64 {
    i64::from(u32::MAX)
}

async fn stock_range_handler<S: RecordStore + 'static>(
    State(workflow): Shared<S>,
    Query(range): Query<StockRange>,
) -> Response {
    Json(workflow.find_by_stock_range(range.min, range.max)).into_response()
}

#[derive(Debug, Deserialize)]
struct Sufficiency {
    quantity: u32,
}

async fn sufficient_handler<S: RecordStore + 'static>(
    State(workflow): Shared<S>,
    Path(id): Path<u64>,
    Query(query): Query<Sufficiency>,
) -> Response {
    let sufficient = workflow.check_stock_sufficient(id, query.quantity);
    Json(json!({ "id": id, "quantity": query.quantity, "sufficient": sufficient })).into_response()
}

/// Turn a body rejection into a validation failure.
fn decode<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, WorkflowError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| WorkflowError::Validation(rejection.body_text()))
}

fn write_response(result: Result<Outcome, WorkflowError>) -> Response {
    match result {
        Ok(outcome) => {
            let status = StatusCode::from_u16(outcome.status_code()).unwrap_or(StatusCode::OK);
            let body = match &outcome {
                Outcome::Created(record) | Outcome::Updated(record) => {
                    json!({ "message": outcome.message(), "record": record })
                }
                Outcome::Deleted(id) => json!({ "message": outcome.message(), "id": id }),
            };
            (status, Json(body)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

fn error_response(e: &WorkflowError) -> Response {
    debug!(error = %e, "request rejected");
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}
