//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{InvalidId, StationId};
use crate::network::NetworkRepository;
use crate::planner::RouteError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<R: NetworkRepository + 'static>(state: AppState<R>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/route", get(find_route::<R>))
        .route("/stations/:id", get(get_station::<R>))
        .route("/distance", get(straight_line_distance::<R>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

fn parse_station(field: &str, value: &str) -> Result<StationId, AppError> {
    StationId::parse(value).map_err(|e: InvalidId| AppError::BadRequest {
        message: format!("Invalid {field} station: {e}"),
    })
}

/// Shortest route between two stations.
async fn find_route<R: NetworkRepository>(
    State(state): State<AppState<R>>,
    Query(req): Query<StationPairQuery>,
) -> Result<Json<RouteResponse>, AppError> {
    let from = parse_station("from", &req.from)?;
    let to = parse_station("to", &req.to)?;

    let route = state.planner().find_shortest_path(&from, &to).await?;

    Ok(Json(RouteResponse::from_route(&route)))
}

/// Look up a single station.
async fn get_station<R: NetworkRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<StationResult>, AppError> {
    let id = parse_station("requested", &id)?;

    let station = state
        .network
        .find_station_by_id(&id)
        .await
        .map_err(RouteError::from)?
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown station: {id}"),
        })?;

    Ok(Json(StationResult::from_station(&station)))
}

/// Straight-line distance between two stored stations.
async fn straight_line_distance<R: NetworkRepository>(
    State(state): State<AppState<R>>,
    Query(req): Query<StationPairQuery>,
) -> Result<Json<DistanceResponse>, AppError> {
    let from = parse_station("from", &req.from)?;
    let to = parse_station("to", &req.to)?;

    let distance_km = state
        .planner()
        .straight_line_distance(&from, &to)
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown station: {from} or {to}"),
        })?;

    Ok(Json(DistanceResponse {
        from: from.to_string(),
        to: to.to_string(),
        distance_km,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        let message = e.to_string();
        if e.is_absence() {
            AppError::NotFound { message }
        } else {
            AppError::Internal { message }
        }
    }
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Internal { message } => message,
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
