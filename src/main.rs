use cabin_widget::api::AppState;
use cabin_widget::config::Config;
use cabin_widget::fetch::client::{AnalyticsClient, HttpTransport};
use cabin_widget::server;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cabin_widget=info,tower_http=info".into()),
        )
        .init();

    // Load configuration
    let config_path = std::env::args().nth(1);
    let config = Config::load(config_path.as_deref().map(std::path::Path::new));

    tracing::info!(
        host = %config.host,
        port = config.port,
        domain = %config.domain,
        display_mode = config.display_mode.as_str(),
        default_range = config.default_range.as_str(),
        "Starting Cabin widget service"
    );

    if config.api_key.is_empty() {
        tracing::warn!("No API key configured; widget requests will return a setup notice");
    }

    let transport = HttpTransport::new(Duration::from_secs(config.fetch_timeout_secs))
        .expect("Failed to build HTTP client");
    let client = AnalyticsClient::new(
        Arc::new(transport),
        config.api_url.clone(),
        config.cache_ttl_secs,
    );

    let state = Arc::new(AppState { config, client });
    let addr = format!("{}:{}", state.config.host, state.config.port);

    let app = server::build_router(Arc::clone(&state));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {addr}: {e}"));

    tracing::info!(addr = %addr, "Listening");
    axum::serve(listener, app).await.expect("Server error");
}
