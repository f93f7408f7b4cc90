//! HTTP routes for the dashboard charts and headline numbers.

use axum::{Json, Router, extract::State, routing::get};

use crate::error::ApiError;
use crate::stats::{ColorCount, DashboardKpis, StatsStorage};
use crate::tables::AppState;

/// Creates the router for `/api/dashboard/*`.
pub fn dashboard_routes<S>() -> Router<AppState<S>>
where
    S: StatsStorage,
{
    Router::new()
        .route("/kpis", get(kpis::<S>))
        .route("/colors", get(colors::<S>))
        .route("/commander-identities", get(commander_identities::<S>))
}

async fn kpis<S: StatsStorage>(
    State(state): State<AppState<S>>,
) -> Result<Json<DashboardKpis>, ApiError> {
    let snapshot = state.stats.snapshot().await.map_err(ApiError::storage)?;
    Ok(Json(snapshot.kpis()))
}

/// Single mana colors across all decks.
async fn colors<S: StatsStorage>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<ColorCount>>, ApiError> {
    let snapshot = state.stats.snapshot().await.map_err(ApiError::storage)?;
    Ok(Json(snapshot.color_counts()))
}

async fn commander_identities<S: StatsStorage>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<ColorCount>>, ApiError> {
    let snapshot = state.stats.snapshot().await.map_err(ApiError::storage)?;
    Ok(Json(snapshot.commander_identities()))
}
