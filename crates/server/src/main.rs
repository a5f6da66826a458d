// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use item_service::{BatchProcessor, DEFAULT_POOL_SIZE, ProcessorConfig};
use item_service_api::{
    ApiError, ItemRequest, ItemResponse, create_item, delete_item, get_item, list_items,
    process_items, update_item,
};
use item_service_persistence::SqliteItemStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Item Service Server - HTTP server for items and batch status processing
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Maximum number of items processed concurrently by a batch run
    #[arg(long, default_value_t = DEFAULT_POOL_SIZE)]
    pool_size: usize,

    /// Artificial delay applied to each item during batch processing, in milliseconds
    #[arg(long, default_value_t = 0)]
    unit_delay_ms: u64,

    /// How long a batch processing request waits before giving up, in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    process_timeout_secs: u64,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The item store.
    store: Arc<SqliteItemStore>,
    /// The batch processor, sharing the same store.
    processor: BatchProcessor<SqliteItemStore>,
    /// How long the processing endpoint waits for a run.
    process_timeout: Duration,
}

impl AppState {
    fn new(store: SqliteItemStore, config: ProcessorConfig, process_timeout: Duration) -> Self {
        let store: Arc<SqliteItemStore> = Arc::new(store);
        Self {
            processor: BatchProcessor::new(Arc::clone(&store), config),
            store,
            process_timeout,
        }
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Per-field validation messages. When present, these form the body.
    field_errors: Option<BTreeMap<String, String>>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        if let Some(field_errors) = self.field_errors {
            return (self.status, Json(field_errors)).into_response();
        }
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid request body: {}", rejection.body_text()),
            field_errors: None,
        }
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        match err {
            ApiError::ValidationFailed { errors } => Self {
                status: StatusCode::BAD_REQUEST,
                message,
                field_errors: Some(errors),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message,
                field_errors: None,
            },
            ApiError::Timeout { .. } => Self {
                status: StatusCode::REQUEST_TIMEOUT,
                message,
                field_errors: None,
            },
            ApiError::ProcessingFailed { .. } | ApiError::Internal { .. } => {
                error!(error = %message, "Request failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message,
                    field_errors: None,
                }
            }
        }
    }
}

/// Handler for GET `/api/items` endpoint.
///
/// Lists every item.
async fn handle_list_items(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<ItemResponse>>, HttpError> {
    info!("Handling list_items request");

    let items: Vec<ItemResponse> = list_items(app_state.store.as_ref())?;
    Ok(Json(items))
}

/// Handler for POST `/api/items` endpoint.
///
/// Creates an item and returns it with `201 Created`.
async fn handle_create_item(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemResponse>), HttpError> {
    let Json(req) = payload?;
    info!(name = ?req.name, "Handling create_item request");

    let created: ItemResponse = create_item(app_state.store.as_ref(), req)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET `/api/items/{id}` endpoint.
async fn handle_get_item(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ItemResponse>, HttpError> {
    info!(item_id = id, "Handling get_item request");

    let item: ItemResponse = get_item(app_state.store.as_ref(), id)?;
    Ok(Json(item))
}

/// Handler for PUT `/api/items/{id}` endpoint.
///
/// Replaces an existing item's fields. Never creates an item.
async fn handle_update_item(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<Json<ItemResponse>, HttpError> {
    let Json(req) = payload?;
    info!(item_id = id, "Handling update_item request");

    let updated: ItemResponse = update_item(app_state.store.as_ref(), id, req)?;
    Ok(Json(updated))
}

/// Handler for DELETE `/api/items/{id}` endpoint.
async fn handle_delete_item(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(item_id = id, "Handling delete_item request");

    delete_item(app_state.store.as_ref(), id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/api/items/process` endpoint.
///
/// Runs batch processing over every item and waits for it to finish, up to
/// the configured timeout.
async fn handle_process_items(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<ItemResponse>>, HttpError> {
    info!("Handling process_items request");

    let processed: Vec<ItemResponse> =
        process_items(&app_state.processor, app_state.process_timeout).await?;
    Ok(Json(processed))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/items", get(handle_list_items).post(handle_create_item))
        .route("/api/items/process", get(handle_process_items))
        .route(
            "/api/items/{id}",
            get(handle_get_item)
                .put(handle_update_item)
                .delete(handle_delete_item),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Item Service Server");

    // Initialize the store (in-memory or file-based based on CLI argument)
    let store: SqliteItemStore = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqliteItemStore::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqliteItemStore::new_in_memory()?
    };

    let config: ProcessorConfig = ProcessorConfig::new()
        .with_pool_size(args.pool_size)
        .with_unit_delay(Duration::from_millis(args.unit_delay_ms));
    info!(
        pool_size = config.pool_size(),
        unit_delay_ms = args.unit_delay_ms,
        process_timeout_secs = args.process_timeout_secs,
        "Batch processor configured"
    );

    let app_state: AppState = AppState::new(
        store,
        config,
        Duration::from_secs(args.process_timeout_secs),
    );

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    /// Helper to create test app state with an in-memory store.
    fn create_test_app_state() -> AppState {
        create_test_app_state_with(ProcessorConfig::default(), Duration::from_secs(10))
    }

    fn create_test_app_state_with(config: ProcessorConfig, timeout: Duration) -> AppState {
        let store: SqliteItemStore =
            SqliteItemStore::new_in_memory().expect("Failed to create in-memory store");
        AppState::new(store, config, timeout)
    }

    fn create_test_item_request(name: &str) -> ItemRequest {
        ItemRequest::new(name, "Desc", "NEW", "test@test.com")
    }

    fn json_request(method: &str, uri: &str, body: &impl Serialize) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn read_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body_bytes).unwrap()
    }

    async fn create_via_http(app: &Router, name: &str) -> ItemResponse {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/items",
                &create_test_item_request(name),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::CREATED);
        read_body(response).await
    }

    #[tokio::test]
    async fn test_list_items_empty() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(empty_request("GET", "/api/items"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let items: Vec<ItemResponse> = read_body(response).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_create_item_returns_created() {
        let app: Router = build_router(create_test_app_state());

        let created: ItemResponse = create_via_http(&app, "Widget").await;

        assert!(created.id > 0);
        assert_eq!(created.name, "Widget");

        let response = app
            .oneshot(empty_request("GET", "/api/items"))
            .await
            .unwrap();
        let items: Vec<ItemResponse> = read_body(response).await;
        assert_eq!(items, vec![created]);
    }

    #[tokio::test]
    async fn test_create_invalid_item_returns_field_map() {
        let app: Router = build_router(create_test_app_state());
        let body: Value = serde_json::json!({
            "name": "",
            "description": "Desc",
            "status": "NEW",
            "email": "not-an-email"
        });

        let response = app
            .oneshot(json_request("POST", "/api/items", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
        let errors: BTreeMap<String, String> = read_body(response).await;
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["name"], "must not be empty");
        assert_eq!(errors["email"], "Invalid email format");
    }

    #[tokio::test]
    async fn test_create_with_mistyped_field_returns_bad_request() {
        let app: Router = build_router(create_test_app_state());
        let body: Value = serde_json::json!({
            "name": "a",
            "description": "d",
            "status": "s",
            "email": 5
        });

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/items", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
        let error_body: ErrorResponse = read_body(response).await;
        assert!(error_body.error);

        let response = app
            .oneshot(empty_request("GET", "/api/items"))
            .await
            .unwrap();
        let items: Vec<ItemResponse> = read_body(response).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_update_with_mistyped_field_returns_bad_request() {
        let app: Router = build_router(create_test_app_state());
        let created: ItemResponse = create_via_http(&app, "Widget").await;
        let body: Value = serde_json::json!({
            "name": ["not", "a", "string"],
            "description": "d",
            "status": "s",
            "email": "test@test.com"
        });

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/items/{}", created.id),
                &body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
        let error_body: ErrorResponse = read_body(response).await;
        assert!(error_body.error);
    }

    #[test]
    fn test_zero_process_timeout_is_rejected() {
        let result = Args::try_parse_from(["item-service-server", "--process-timeout-secs", "0"]);
        assert!(result.is_err());

        let args: Args =
            Args::try_parse_from(["item-service-server", "--process-timeout-secs", "1"]).unwrap();
        assert_eq!(args.process_timeout_secs, 1);
    }

    #[tokio::test]
    async fn test_get_item_round_trip() {
        let app: Router = build_router(create_test_app_state());
        let created: ItemResponse = create_via_http(&app, "Widget").await;

        let response = app
            .oneshot(empty_request("GET", &format!("/api/items/{}", created.id)))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let fetched: ItemResponse = read_body(response).await;
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_missing_item_returns_not_found() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(empty_request("GET", "/api/items/404"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
        let body: ErrorResponse = read_body(response).await;
        assert!(body.error);
        assert!(body.message.contains("404"));
    }

    #[tokio::test]
    async fn test_update_item_returns_updated_entity() {
        let app: Router = build_router(create_test_app_state());
        let created: ItemResponse = create_via_http(&app, "Widget").await;
        let update: ItemRequest =
            ItemRequest::new("Gadget", "Changed", "DONE", "gadget@example.com");

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/items/{}", created.id),
                &update,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let updated: ItemResponse = read_body(response).await;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Gadget");
        assert_eq!(updated.email, "gadget@example.com");
    }

    #[tokio::test]
    async fn test_update_missing_item_returns_not_found_and_creates_nothing() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/items/77",
                &create_test_item_request("Ghost"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);

        let response = app
            .oneshot(empty_request("GET", "/api/items"))
            .await
            .unwrap();
        let items: Vec<ItemResponse> = read_body(response).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_update_with_invalid_body_returns_bad_request() {
        let app: Router = build_router(create_test_app_state());
        let created: ItemResponse = create_via_http(&app, "Widget").await;
        let body: Value = serde_json::json!({
            "name": "Widget",
            "description": "Desc",
            "status": "NEW"
        });

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/items/{}", created.id),
                &body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
        let errors: BTreeMap<String, String> = read_body(response).await;
        assert_eq!(errors["email"], "Invalid email format");
    }

    #[tokio::test]
    async fn test_delete_item_then_get_returns_not_found() {
        let app: Router = build_router(create_test_app_state());
        let created: ItemResponse = create_via_http(&app, "Widget").await;
        let uri: String = format!("/api/items/{}", created.id);

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &uri))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::NO_CONTENT);

        let response = app.clone().oneshot(empty_request("GET", &uri)).await.unwrap();
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);

        let response = app.oneshot(empty_request("DELETE", &uri)).await.unwrap();
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_process_items_marks_everything_processed() {
        let app: Router = build_router(create_test_app_state());
        for i in 0..12 {
            create_via_http(&app, &format!("Item {i}")).await;
        }

        let response = app
            .clone()
            .oneshot(empty_request("GET", "/api/items/process"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let processed: Vec<ItemResponse> = read_body(response).await;
        assert_eq!(processed.len(), 12);
        assert!(processed.iter().all(|item| item.status == "PROCESSED"));

        let response = app
            .oneshot(empty_request("GET", "/api/items"))
            .await
            .unwrap();
        let items: Vec<ItemResponse> = read_body(response).await;
        assert!(items.iter().all(|item| item.status == "PROCESSED"));
    }

    #[tokio::test]
    async fn test_process_items_on_empty_store_returns_empty_list() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(empty_request("GET", "/api/items/process"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let processed: Vec<ItemResponse> = read_body(response).await;
        assert!(processed.is_empty());
    }

    #[tokio::test]
    async fn test_process_items_timeout_returns_request_timeout() {
        let config: ProcessorConfig = ProcessorConfig::new()
            .with_pool_size(1)
            .with_unit_delay(Duration::from_millis(50));
        let app: Router =
            build_router(create_test_app_state_with(config, Duration::from_millis(10)));
        for i in 0..3 {
            create_via_http(&app, &format!("Item {i}")).await;
        }

        let response = app
            .oneshot(empty_request("GET", "/api/items/process"))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::REQUEST_TIMEOUT);
        let body: ErrorResponse = read_body(response).await;
        assert!(body.error);
    }
}
