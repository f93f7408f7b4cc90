use mtgstats_services::{
    BUILD_BRANCH, BUILD_COMMIT, BUILD_DATE,
    config::Config,
    database::{self, PgStatsStorage},
    routes,
    stats::MemoryStatsStorage,
    telemetry,
};
use std::net::{IpAddr, SocketAddr};
use tracing::{info, warn};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config: Config = Config::init()?;

    // Initialize tracing
    telemetry::init_tracing(&config)?;

    // Print build information
    print_build_info();

    info!(
        environment = %config.environment(),
        server_addr = %config.server_addr(),
        port = %config.port(),
        grid_layout = %config.grid_layout(),
        "Configuration loaded"
    );

    // Build the application router
    let route = match config.database_url() {
        Some(url) => {
            let pool = database::create_pool(url).await?;
            routes(PgStatsStorage::new(pool), config.clone())
        }
        None => {
            warn!("DATABASE_URL not set, serving an empty in-memory stats store");
            routes(MemoryStatsStorage::new(), config.clone())
        }
    };

    // Create socket address
    let addr = SocketAddr::from((config.server_addr().parse::<IpAddr>()?, config.port()));

    info!("Starting server on {}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, route).await?;

    Ok(())
}

/// Print build information
fn print_build_info() {
    info!("===========================================");
    info!("  MTG Stats Services");
    info!("===========================================");
    info!("Build Date:   {}", BUILD_DATE);
    info!("Build Commit: {}", BUILD_COMMIT);
    info!("Build Branch: {}", BUILD_BRANCH);
    info!("===========================================");
}
