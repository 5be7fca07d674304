//! HTTP CRUD and search API over the book store.

use crate::books::{BookStore, DEFAULT_DB};
use crate::types::{Book, BookCreate, BookQuery, BookUpdate, ValidationError};
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use eyre::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

/// Default listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";

/// Configuration for the books server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite file backing the API
    pub db_path: PathBuf,

    /// Address to bind
    pub addr: SocketAddr,
}

impl ServerConfig {
    pub fn new(db_path: impl Into<PathBuf>, addr: SocketAddr) -> Self {
        Self {
            db_path: db_path.into(),
            addr,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        let addr = DEFAULT_ADDR.parse().unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8000)));
        Self::new(DEFAULT_DB, addr)
    }
}

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<BookStore>>,
}

impl AppState {
    pub fn new(store: BookStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, BookStore>, ApiError> {
        self.store
            .lock()
            .map_err(|_| ApiError::Internal("book store lock poisoned".to_string()))
    }
}

/// Errors surfaced to HTTP clients as `{"detail": ...}`.
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    /// Payload parsed but broke a field constraint.
    Validation(ValidationError),
    /// Body, path or query string could not be extracted.
    Malformed(String),
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::Malformed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "Book not found"),
            ApiError::Validation(e) => write!(f, "{}", e),
            ApiError::Malformed(msg) | ApiError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

impl From<eyre::Report> for ApiError {
    fn from(e: eyre::Report) -> Self {
        log::error!("Book store error: {:#}", e);
        ApiError::Internal(format!("{:#}", e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "detail": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

/// Build the router. Every route also answers with a trailing slash.
///
/// Extractor rejections are turned into `ApiError` so every failure has a
/// JSON `detail` body.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/", get(list_books).post(create_book))
        .route("/books/search", get(search_books))
        .route("/books/search/", get(search_books))
        .route("/books/{id}", get(get_book).put(update_book).delete(delete_book))
        .route("/books/{id}/", get(get_book).put(update_book).delete(delete_book))
        .with_state(state)
}

/// Open the store and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let store = BookStore::open(&config.db_path)?;
    let app = router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    log::info!("Books API listening on {}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Books API server error")?;

    log::info!("Books API shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<BookCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;
    let book = state.store()?.create(&payload)?;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(state.store()?.list()?))
}

async fn get_book(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Book>, ApiError> {
    let Path(id) = id?;
    state.store()?.get(id)?.map(Json).ok_or(ApiError::NotFound)
}

async fn update_book(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<BookUpdate>, JsonRejection>,
) -> Result<Json<Book>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    payload.validate()?;
    state
        .store()?
        .update(id, &payload)?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn delete_book(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    if state.store()?.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

async fn search_books(
    State(state): State<AppState>,
    query: Result<Query<BookQuery>, QueryRejection>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.store()?.search(&query)?))
}
