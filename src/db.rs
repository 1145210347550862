//! Supabase REST client holder.
//!
//! The gateway constructs this at startup when SUPABASE_URL is configured,
//! matching the deployed setup, but no relay operation reads or writes
//! through it. Its contract is intentionally limited to connection wiring.

/// Handle to a Supabase project's REST surface.
#[derive(Clone)]
pub struct SupabaseClient {
    base_url: String,
    service_key: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url)
            .field("service_key", &"[REDACTED]")
            .finish()
    }
}

impl SupabaseClient {
    pub fn new(base_url: String, service_key: String, http: reqwest::Client) -> Self {
        Self {
            base_url,
            service_key,
            http,
        }
    }

    /// REST URL for a table, e.g. `<base>/rest/v1/card_holders`.
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    /// Request builder pre-authenticated with the service-role credential.
    pub fn request(&self, table: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.rest_url(table))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_url() {
        let client = SupabaseClient::new(
            "https://example.supabase.co/".to_string(),
            "service-key".to_string(),
            reqwest::Client::new(),
        );
        assert_eq!(
            client.rest_url("card_holders"),
            "https://example.supabase.co/rest/v1/card_holders"
        );
    }

    #[test]
    fn test_debug_redacts_service_key() {
        let client = SupabaseClient::new(
            "https://example.supabase.co".to_string(),
            "service-key".to_string(),
            reqwest::Client::new(),
        );
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("service-key"));
    }
}
