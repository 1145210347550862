use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::middleware::{from_fn, Logger};
use actix_web::{web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zypto_gateway::{
    config::GatewayConfig, endpoints, metrics::register_metrics, middleware::require_admin_key,
    routes, state::AppState,
};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = GatewayConfig::from_env().expect("Failed to load configuration");
    let port = config.port;
    let allowed_origins = config.allowed_origins.clone();
    let rate_limit_rpm = config.rate_limit_rpm;

    tracing::info!("Starting zypto-gateway on port {}", port);
    tracing::info!("Upstream base: {}", config.base_url);
    tracing::info!(
        "Exposing {} provider operations under {}",
        endpoints::ENDPOINTS.len(),
        endpoints::LOCAL_NAMESPACE
    );
    if config.denied_states.is_empty() {
        tracing::info!("Jurisdiction denial: no states blocked");
    } else {
        let mut states: Vec<&str> = config.denied_states.iter().map(String::as_str).collect();
        states.sort_unstable();
        tracing::info!("Jurisdiction denial: blocking {}", states.join(", "));
    }
    tracing::info!(
        "Persistence: {}",
        if config.supabase_url.is_some() {
            "wired"
        } else {
            "not configured"
        }
    );

    // Register Prometheus metrics
    register_metrics();

    // Create shared state
    let state = AppState::new(config);
    let state_data = web::Data::new(state);

    // Configure rate limiter
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_minute(rate_limit_rpm as u64)
        .finish()
        .expect("Failed to create rate limiter config");

    // Start HTTP server
    HttpServer::new(move || {
        let cors = zypto_gateway::cors::build_cors(&allowed_origins);

        // Middleware executes in reverse registration order: CORS handles
        // preflight before the admin gate sees the request.
        App::new()
            .app_data(state_data.clone())
            .app_data(web::PayloadConfig::new(1024 * 1024)) // 1MB body limit
            .wrap(from_fn(require_admin_key))
            .wrap(Logger::default())
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .configure(routes::health::configure)
            .configure(routes::relay::configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
