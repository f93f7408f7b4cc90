use axum::http::StatusCode;
use axum_test::TestServer;
use mtgstats_services::{
    config::Config,
    routes,
    stats::{StatsSnapshot, StatsStorage, StatsStorageError},
};
use std::future::Future;

#[derive(Clone)]
struct FixedStatsStorage {
    is_connected: bool,
}

impl StatsStorage for FixedStatsStorage {
    type Error = StatsStorageError;

    fn is_connected(&self) -> impl Future<Output = bool> + Send {
        let connected = self.is_connected;
        async move { connected }
    }

    fn snapshot(&self) -> impl Future<Output = Result<StatsSnapshot, Self::Error>> + Send {
        async { Ok(StatsSnapshot::default()) }
    }
}

#[tokio::test]
async fn test_health_check_integration() {
    // Case 1: Connected
    let app_connected = routes(FixedStatsStorage { is_connected: true }, Config::new_for_test());
    let server_connected = TestServer::new(app_connected).unwrap();

    let response = server_connected.get("/is-health").await;
    response.assert_status(StatusCode::OK);
    response.assert_text("OK");

    // Case 2: Disconnected
    let app_disconnected =
        routes(FixedStatsStorage { is_connected: false }, Config::new_for_test());
    let server_disconnected = TestServer::new(app_disconnected).unwrap();

    let response = server_disconnected.get("/is-health").await;
    response.assert_status(StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_health_check_reports_environment() {
    let app = routes(FixedStatsStorage { is_connected: true }, Config::new_for_test());
    let server = TestServer::new(app).unwrap();

    let response = server.get("/is-health").await;
    assert_eq!(response.header("x-service-env"), "local");
    assert!(
        response
            .header("x-service-version")
            .to_str()
            .unwrap()
            .starts_with(env!("CARGO_PKG_VERSION")),
        "version header should lead with the package version"
    );
}

#[tokio::test]
async fn test_empty_storage_serves_empty_tables() {
    let app = routes(FixedStatsStorage { is_connected: true }, Config::new_for_test());
    let server = TestServer::new(app).unwrap();

    let response = server.get("/api/decks").await;
    response.assert_status_ok();
    response.assert_json(&serde_json::json!([]));
}
