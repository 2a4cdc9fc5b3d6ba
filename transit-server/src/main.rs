use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use transit_server::geocode::{GeocodeClient, GeocodeConfig};
use transit_server::mbta::{MbtaClient, MbtaConfig};
use transit_server::resolver::Resolver;
use transit_server::store::{Store, StoreConfig};
use transit_server::web::{AppState, create_router};

/// Default listen port.
const DEFAULT_PORT: u16 = 5000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Get credentials from environment
    let api_key = std::env::var("MBTA_API_KEY").unwrap_or_else(|_| {
        tracing::warn!("MBTA_API_KEY not set; upstream calls will fail");
        String::new()
    });

    // Open the persistent cache
    let db_path = std::env::var("TRANSIT_DB").unwrap_or_else(|_| "transit_cache.db".to_string());
    let store = Store::open(&StoreConfig::new(&db_path)).expect("Failed to open cache store");

    // Create the geocoding client
    let mut geocode_config = GeocodeConfig::new();
    if let Ok(endpoint) = std::env::var("GEOCODE_ENDPOINT") {
        geocode_config = geocode_config.with_base_url(endpoint);
    }
    let geocoder = GeocodeClient::new(geocode_config).expect("Failed to create geocoding client");

    // Create the MBTA client
    let mut mbta_config = MbtaConfig::new(&api_key);
    if let Ok(endpoint) = std::env::var("MBTA_ENDPOINT") {
        mbta_config = mbta_config.with_base_url(endpoint);
    }
    let client = MbtaClient::new(mbta_config, &store, geocoder).expect("Failed to create MBTA client");

    // Build the resolution pipeline and app state
    let resolver = Resolver::new(client);
    let state = AppState::new(resolver);

    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());
    let app = create_router(state, &static_dir);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, db = %db_path, "transit departures server listening");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
