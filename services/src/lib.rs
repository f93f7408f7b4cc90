use crate::config::Config;
use crate::stats::StatsStorage;
use crate::tables::AppState;
use axum::{
    Router,
    extract::{Extension, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{any, get},
};
use opentelemetry::{global, propagation::Extractor};
use tower_http::trace::TraceLayer;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub mod config;
pub mod dashboard;
pub mod database;
pub mod error;
pub mod stats;
pub mod tables;
pub mod telemetry;
pub mod viewer;

pub const BUILD_DATE: &str = env!("BUILD_DATE");
pub const BUILD_COMMIT: &str = env!("BUILD_COMMIT");
pub const BUILD_BRANCH: &str = env!("BUILD_BRANCH");

/// Version reported in the `x-service-version` header: `{version}:{commit}`.
pub fn service_version() -> String {
    format!("{}:{}", env!("CARGO_PKG_VERSION"), BUILD_COMMIT)
}

struct HeaderExtractor<'a>(&'a axum::http::HeaderMap);

impl<'a> Extractor for HeaderExtractor<'a> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

/// Creates the service router backed by `stats`.
pub fn routes<S>(stats: S, config: Config) -> Router
where
    S: StatsStorage,
{
    let state = AppState::new(stats);

    Router::new()
        .route("/is-health", get(health_check::<S>))
        .nest("/api", tables::api_routes::<S>())
        .fallback(any(catch_all))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                // Continue the caller's trace when it sent a context header
                let parent_context = global::get_text_map_propagator(|propagator| {
                    propagator.extract(&HeaderExtractor(request.headers()))
                });

                let span = tracing::info_span!(
                    "http_request",
                    http_request.method = ?request.method(),
                    http_request.uri = ?request.uri(),
                    http_request.version = ?request.version(),
                    http_request.user_agent = ?request.headers().get(axum::http::header::USER_AGENT),
                );

                span.set_parent(parent_context);

                span
            }),
        )
        .layer(Extension(config))
        .with_state(state)
}

async fn health_check<S>(
    State(state): State<AppState<S>>,
    Extension(config): Extension<Config>,
) -> impl IntoResponse
where
    S: StatsStorage,
{
    let mut response = if state.stats.is_connected().await {
        (StatusCode::OK, "OK").into_response()
    } else {
        (StatusCode::BAD_GATEWAY, "502").into_response()
    };

    if let Ok(env_value) = HeaderValue::from_str(&config.environment().to_string()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-service-env"), env_value);
    }

    if let Ok(version_value) = HeaderValue::from_str(&service_version()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-service-version"), version_value);
    }

    response
}

async fn catch_all() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}
