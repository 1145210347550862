use std::collections::HashSet;
use std::env;

use url::Url;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_RATE_LIMIT_RPM: u32 = 120;

#[derive(Clone)]
pub struct GatewayConfig {
    /// Upstream provider base URL, e.g. https://dash.zypto.com/api
    pub base_url: String,
    /// Upstream bearer API key
    pub api_key: String,
    /// Shared admin secret required on mutating calls
    pub admin_key: String,
    /// Uppercase two-letter US state codes where card issuance is denied
    pub denied_states: HashSet<String>,
    /// Supabase project URL (client is wired but not used by the relay pipeline)
    pub supabase_url: Option<String>,
    /// Supabase service-role credential
    pub supabase_service_key: Option<String>,
    /// Server port
    pub port: u16,
    /// CORS allowed origins
    pub allowed_origins: Vec<String>,
    /// Rate limit requests per minute
    pub rate_limit_rpm: u32,
    /// Bearer token required for /metrics endpoint (None = public)
    pub metrics_token: Option<String>,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("admin_key", &"[REDACTED]")
            .field("denied_states", &self.denied_states)
            .field("supabase_url", &self.supabase_url)
            .field(
                "supabase_service_key",
                &self.supabase_service_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("port", &self.port)
            .field("allowed_origins", &self.allowed_origins)
            .field("rate_limit_rpm", &self.rate_limit_rpm)
            .field(
                "metrics_token",
                &self.metrics_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Required: upstream base URL
        let base_url =
            env::var("ZYPTO_BASE").map_err(|_| ConfigError::MissingRequired("ZYPTO_BASE"))?;
        Url::parse(&base_url).map_err(|_| ConfigError::InvalidUrl(base_url.clone()))?;

        // Required: upstream API key
        let api_key = env::var("ZYPTO_API_KEY")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingRequired("ZYPTO_API_KEY"))?;

        // Required: local admin key
        let admin_key = env::var("ADMIN_KEY")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingRequired("ADMIN_KEY"))?;

        // Optional: denied US states, comma-separated
        let denied_states =
            parse_denied_states(&env::var("BLOCKED_US_STATES").unwrap_or_default());

        // Optional: Supabase pair (URL requires the credential)
        let supabase_url = env::var("SUPABASE_URL").ok().filter(|s| !s.is_empty());
        let supabase_service_key = env::var("SUPABASE_SERVICE_ROLE")
            .ok()
            .filter(|s| !s.is_empty());
        if supabase_url.is_some() && supabase_service_key.is_none() {
            return Err(ConfigError::MissingRequired("SUPABASE_SERVICE_ROLE"));
        }
        if let Some(ref url) = supabase_url {
            Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.clone()))?;
        }

        // Optional: port
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        // Optional: allowed origins
        let allowed_origins: Vec<String> = env::var("ALLOWED_ORIGINS")
            .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ]
            });

        // Optional: rate limit
        let rate_limit_rpm = env::var("RATE_LIMIT_RPM")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_RPM);

        // Optional: metrics token
        let metrics_token = env::var("METRICS_TOKEN").ok().filter(|s| !s.is_empty());

        if metrics_token.is_none() {
            tracing::warn!("METRICS_TOKEN not set — /metrics endpoint is publicly accessible");
        }

        Ok(Self {
            base_url,
            api_key,
            admin_key,
            denied_states,
            supabase_url,
            supabase_service_key,
            port,
            allowed_origins,
            rate_limit_rpm,
            metrics_token,
        })
    }
}

/// Parse the comma-separated denied-state list: entries are trimmed,
/// uppercased, and empty entries dropped.
pub fn parse_denied_states(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_denied_states() {
        let set = parse_denied_states("ny, tx ,FL");
        assert_eq!(set.len(), 3);
        assert!(set.contains("NY"));
        assert!(set.contains("TX"));
        assert!(set.contains("FL"));
    }

    #[test]
    fn test_parse_denied_states_drops_empty_entries() {
        let set = parse_denied_states(" , NY,, ");
        assert_eq!(set.len(), 1);
        assert!(set.contains("NY"));
    }

    #[test]
    fn test_parse_denied_states_empty_input() {
        assert!(parse_denied_states("").is_empty());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = GatewayConfig {
            base_url: "https://dash.zypto.com/api".to_string(),
            api_key: "secret-upstream-key".to_string(),
            admin_key: "secret-admin-key".to_string(),
            denied_states: HashSet::new(),
            supabase_url: None,
            supabase_service_key: Some("service-role-key".to_string()),
            port: 3000,
            allowed_origins: vec![],
            rate_limit_rpm: 120,
            metrics_token: None,
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-upstream-key"));
        assert!(!rendered.contains("secret-admin-key"));
        assert!(!rendered.contains("service-role-key"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
