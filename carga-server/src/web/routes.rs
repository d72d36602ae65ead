//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::warn;

use crate::filter::{StationFilter, filter_stations};
use crate::planner::{PlanError, Terrain, TripRequest, UnknownTerrain, plan_trip};
use crate::sources::SourceError;
use crate::spatial;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `static_dir` is the path to the browser front end; it is served as
/// plain files, with the JSON API underneath `/api`.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/plan", post(plan))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List stations, filtered and optionally sorted by distance from a
/// reference point.
async fn list_stations(
    State(state): State<AppState>,
    Query(query): Query<StationsQuery>,
) -> Result<Json<StationsResponse>, AppError> {
    let standards = query
        .standards
        .as_deref()
        .map(parse_standards)
        .transpose()
        .map_err(|message| AppError::BadRequest { message })?
        .filter(|list| !list.is_empty());

    let power_types = query
        .power_types
        .as_deref()
        .map(parse_power_types)
        .transpose()
        .map_err(|message| AppError::BadRequest { message })?
        .filter(|list| !list.is_empty());

    let filter = StationFilter {
        standards,
        power_types,
        status: query.status,
    };

    let stations = state.stations.stations().await?;
    let filtered = filter_stations(&stations, &filter);

    let results = match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => {
            let reference = geo::Point::new(lon, lat);

            let mut rows: Vec<StationResult> = filtered
                .iter()
                .filter_map(|station| {
                    let coordinate = station.coordinate?;
                    let km = spatial::distance_km(reference, coordinate.point());

                    if let Some(radius) = query.radius_km
                        && km > radius
                    {
                        return None;
                    }

                    Some(StationResult::from_station(station, Some(km)))
                })
                .collect();

            rows.sort_by(|a, b| {
                a.distance_km
                    .unwrap_or(f64::INFINITY)
                    .total_cmp(&b.distance_km.unwrap_or(f64::INFINITY))
            });
            rows
        }
        _ => filtered
            .iter()
            .map(|station| StationResult::from_station(station, None))
            .collect(),
    };

    Ok(Json(StationsResponse {
        total: results.len(),
        stations: results,
    }))
}

/// Plan charging stops for a route.
async fn plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, AppError> {
    let terrain = request
        .terrain
        .as_deref()
        .map(str::parse::<Terrain>)
        .transpose()?
        .unwrap_or_default();

    let mut trip = TripRequest::new(
        request.route,
        request.distance_m / 1000.0,
        (request.duration_s / 60.0).round() as u32,
        request.battery_kwh,
    );
    trip.terrain = terrain;
    if let Some(soc) = request.start_soc_percent {
        trip.start_soc_percent = soc;
    }
    trip.corridor_km = request.corridor_km;

    let stations = state.stations.stations().await?;
    let plan = plan_trip(&stations, &trip, &state.config)?;

    Ok(Json(PlanResponse::from_plan(&plan)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream { message: String },
}

impl From<SourceError> for AppError {
    fn from(e: SourceError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<UnknownTerrain> for AppError {
    fn from(e: UnknownTerrain) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
