//! HTTP routes for stat table data and grid configuration.

use std::collections::BTreeMap;

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use mtgstats_grid::{EntityKind, LayoutVariant, TableConfig};
use serde::Deserialize;

use crate::config::Config;
use crate::dashboard::dashboard_routes;
use crate::error::ApiError;
use crate::stats::{DeckRow, GameSessionRow, PlayerRow, StatsStorage};
use crate::viewer::Viewer;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState<S> {
    pub stats: S,
}

impl<S> AppState<S> {
    pub fn new(stats: S) -> Self {
        Self { stats }
    }
}

/// Optional overrides for the table configuration endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct TableQuery {
    /// Layout variant name, e.g. `admin-only+responsive`.
    pub variant: Option<String>,
}

impl TableQuery {
    fn resolve_variant(&self, config: &Config) -> Result<LayoutVariant, ApiError> {
        match &self.variant {
            Some(name) => Ok(name.parse()?),
            None => Ok(config.grid_layout()),
        }
    }
}

/// Creates the router for `/api/*`, dashboard routes included.
pub fn api_routes<S>() -> Router<AppState<S>>
where
    S: StatsStorage,
{
    Router::new()
        .route("/decks", get(list_decks::<S>))
        .route("/players", get(list_players::<S>))
        .route("/game_sessions", get(list_game_sessions::<S>))
        .route("/tables", get(all_table_configs))
        .route("/tables/{kind}", get(table_config))
        .nest("/dashboard", dashboard_routes::<S>())
}

async fn list_decks<S: StatsStorage>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<DeckRow>>, ApiError> {
    let snapshot = state.stats.snapshot().await.map_err(ApiError::storage)?;
    Ok(Json(snapshot.deck_rows()))
}

async fn list_players<S: StatsStorage>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<PlayerRow>>, ApiError> {
    let snapshot = state.stats.snapshot().await.map_err(ApiError::storage)?;
    Ok(Json(snapshot.player_rows()))
}

async fn list_game_sessions<S: StatsStorage>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<GameSessionRow>>, ApiError> {
    let snapshot = state.stats.snapshot().await.map_err(ApiError::storage)?;
    Ok(Json(snapshot.session_rows()))
}

/// Grid configuration for one table as seen by the requesting viewer.
async fn table_config(
    Path(kind): Path<String>,
    Query(query): Query<TableQuery>,
    Extension(config): Extension<Config>,
    viewer: Viewer,
) -> Result<Json<TableConfig>, ApiError> {
    let entity: EntityKind = kind.parse()?;
    let variant = query.resolve_variant(&config)?;

    tracing::debug!(
        table = %entity,
        variant = %variant,
        viewer = viewer.username().unwrap_or("anonymous"),
        "Building table config"
    );

    Ok(Json(TableConfig::build(
        entity,
        viewer.capabilities(),
        variant,
    )))
}

/// Grid configuration for every table, keyed by the DOM element id the page
/// mounts it on.
async fn all_table_configs(
    Query(query): Query<TableQuery>,
    Extension(config): Extension<Config>,
    viewer: Viewer,
) -> Result<Json<BTreeMap<&'static str, TableConfig>>, ApiError> {
    let variant = query.resolve_variant(&config)?;
    let capabilities = viewer.capabilities();

    Ok(Json(
        EntityKind::ALL
            .into_iter()
            .map(|entity| {
                (
                    entity.element_id(),
                    TableConfig::build(entity, capabilities, variant),
                )
            })
            .collect(),
    ))
}
