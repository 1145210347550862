pub mod config;
pub mod cors;
pub mod db;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod proxy;
pub mod routes;
pub mod state;
pub mod validation;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use state::AppState;
