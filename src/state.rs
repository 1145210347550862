use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::db::SupabaseClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub http_client: reqwest::Client,
    /// Persistence client (when SUPABASE_URL is set). Constructed at startup;
    /// the relay pipeline does not call it.
    pub supabase: Option<Arc<SupabaseClient>>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("failed to create HTTP client");

        let supabase = match (&config.supabase_url, &config.supabase_service_key) {
            (Some(url), Some(key)) => Some(Arc::new(SupabaseClient::new(
                url.clone(),
                key.clone(),
                http_client.clone(),
            ))),
            _ => None,
        };

        Self {
            config: Arc::new(config),
            http_client,
            supabase,
        }
    }
}
