use std::net::SocketAddr;

use carga_server::cache::{CacheConfig, StationCache};
use carga_server::planner::PlannerConfig;
use carga_server::sources::ea::{EaClient, EaConfig};
use carga_server::sources::sec::{SecClient, SecConfig};
use carga_server::sources::{MergedSource, StationSource};
use carga_server::web::{AppState, create_router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Get credentials from environment
    let api_key = std::env::var("EA_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: EA_API_KEY not set. Listing requests will fail.");
        String::new()
    });

    // Create the upstream clients
    let ea_client =
        EaClient::new(EaConfig::new(&api_key)).expect("Failed to create Energia Abierta client");
    let sec_client = SecClient::new(SecConfig::default()).expect("Failed to create SEC client");

    // Merge them behind one cached source
    let source: Box<dyn StationSource> = Box::new(MergedSource::new(ea_client, sec_client));
    let stations = StationCache::new(source, &CacheConfig::default());

    // Build app state
    let state = AppState::new(stations, PlannerConfig::default());

    // Create router
    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());
    let app = create_router(state, &static_dir);

    // Bind and serve
    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));

    println!("EV route planner listening on http://{addr}");
    println!();
    println!("Open http://{addr} in your browser for the web interface.");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health        - Health check");
    println!("  GET  /api/stations  - Station listing with filters");
    println!("  POST /api/plan      - Plan charging stops for a route");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
