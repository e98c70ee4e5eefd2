//! ==============================================================================
//! server.rs - latest-reading http endpoint
//! ==============================================================================
//!
//! purpose:
//!     serves the newest row of the readings file as json.
//!
//! routes:
//!     GET /latest  -> 200 reading | 404 {"detail": ...} | 500 {"detail": ...}
//!
//! relationships:
//!     - used by: main.rs (serve subcommand)
//!     - uses: store.rs (re-reads the file on every request, no cache)
//!
//! ==============================================================================

use crate::domain::Reading;
use crate::error::StationError;
use crate::store;

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use std::path::PathBuf;
use tower_http::cors::CorsLayer;

pub const NO_DATA_DETAIL: &str = "No sensor data available";

// ==============================================================================
// state
// ==============================================================================
// only the location of the readings file; nothing is held in memory
// between requests.

#[derive(Clone, Debug)]
pub struct AppState {
    pub data_path: PathBuf,
}

impl AppState {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self { data_path: data_path.into() }
    }
}

// ==============================================================================
// errors
// ==============================================================================

#[derive(Debug)]
pub enum ApiError {
    /// file missing or without data rows
    NoData,
    /// readings file could not be parsed or read
    Internal(StationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NoData => (StatusCode::NOT_FOUND, NO_DATA_DETAIL.to_string()),
            ApiError::Internal(e) => {
                tracing::error!("[SERVER] failed to load latest reading: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

// ==============================================================================
// web server
// ==============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/latest", get(latest_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server(bind: &str, state: AppState) -> Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("[SERVER] ✓ Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// most recent reading as json
async fn latest_handler(State(state): State<AppState>) -> Result<Json<Reading>, ApiError> {
    match store::load_latest_reading(&state.data_path) {
        Ok(Some(reading)) => Ok(Json(reading)),
        Ok(None) => Err(ApiError::NoData),
        Err(e) => Err(ApiError::Internal(e)),
    }
}
