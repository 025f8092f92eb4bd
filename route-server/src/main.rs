use route_server::config::ServerConfig;
use route_server::network::{StoredNetwork, SyntheticNetwork};
use route_server::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("route_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    // Pick the network source
    let state = match &config.network_path {
        Some(path) => {
            let stored = StoredNetwork::from_path(path).expect("Failed to load network");
            AppState::new(stored, config.rank.clone())
        }
        None => {
            info!("Using built-in prototype network");
            AppState::new(SyntheticNetwork, config.rank.clone())
        }
    };

    let app = create_router(state);

    let addr = config.addr;
    info!(%addr, default_k = config.rank.default_k, "Route planner listening");
    info!("  GET  /health          - Health check");
    info!("  POST /optimize_route  - Rank routes for a shipment");
    info!("  POST /recalculate     - Rank again with closures");
    info!("  POST /batch_orders    - Group orders by lane and window");
    info!("  GET  /analytics       - Request counters");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
