//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::error;

use crate::mbta::{Stop, UpstreamError};

use super::dto::{DepartureQuery, ErrorResponse, NextTrainsResponse};
use super::state::AppState;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory, served for any
/// path not claimed by the API.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/next_trains", get(next_trains).post(next_trains))
        .route("/api/nearby_stop", get(nearby_stop).post(nearby_stop))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Upcoming departures near a location.
async fn next_trains(
    State(state): State<AppState>,
    Query(query): Query<DepartureQuery>,
) -> Result<Json<NextTrainsResponse>, AppError> {
    let location = query.location().map_err(AppError::bad_request)?;
    let criteria = query.criteria().map_err(AppError::bad_request)?;

    let all_trains = state.resolver.next_trains(&location, &criteria).await?;

    Ok(Json(NextTrainsResponse { all_trains }))
}

/// The nearest stop satisfying the filters.
async fn nearby_stop(
    State(state): State<AppState>,
    Query(query): Query<DepartureQuery>,
) -> Result<Json<Stop>, AppError> {
    let location = query.location().map_err(AppError::bad_request)?;
    let criteria = query.criteria().map_err(AppError::bad_request)?;

    let stop = state
        .resolver
        .closest_stop(&location, &criteria)
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: "no matching stop near location".to_string(),
        })?;

    Ok(Json(stop))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream { message: String },
}

impl AppError {
    fn bad_request(message: String) -> Self {
        AppError::BadRequest { message }
    }
}

impl From<UpstreamError> for AppError {
    fn from(e: UpstreamError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_errors_map_to_bad_gateway() {
        let err = AppError::from(UpstreamError::Status {
            service: "stopsbylocation".to_string(),
            params: "lat=1&lon=2".to_string(),
            status: 503,
            message: "unavailable".to_string(),
        });

        match err {
            AppError::Upstream { message } => {
                assert!(message.contains("stopsbylocation"));
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }
}
