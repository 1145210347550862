//! Outbound forwarding to the provider and the best-effort response parse.

use serde_json::Value;
use uuid::Uuid;

use crate::endpoints::EndpointMethod;
use crate::error::GatewayError;

/// Raw upstream reply: status + text body, untranslated.
#[derive(Debug)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

/// Join the provider base URL and an operation path with exactly one
/// separator, whatever either side carries.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Fresh idempotency key for one outbound mutating call. UUIDv4 gives
/// collision-free keys across concurrent calls without coordination.
pub fn fresh_idempotency_key() -> String {
    Uuid::new_v4().to_string()
}

/// Issue the outbound call to the provider.
///
/// Every call carries `Accept: application/json` and the configured bearer
/// key. POST additionally carries a JSON content type, a fresh
/// `Idempotency-Key`, and the body (or `{}` when absent). No retries, no
/// status inspection; transport failures map to [`GatewayError::Proxy`].
pub async fn forward(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    method: EndpointMethod,
    path: &str,
    body: Option<&Value>,
) -> Result<UpstreamReply, GatewayError> {
    let url = join_url(base_url, path);

    let mut request = match method {
        EndpointMethod::Get => client.get(&url),
        EndpointMethod::Post => client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Idempotency-Key", fresh_idempotency_key())
            .json(body.unwrap_or(&Value::Object(serde_json::Map::new()))),
    };
    request = request
        .header("Accept", "application/json")
        .bearer_auth(api_key);

    let response = request.send().await.map_err(|e| {
        tracing::error!(path = %path, error = %e, "upstream request failed");
        GatewayError::Proxy("upstream request failed".to_string())
    })?;

    let status = response.status().as_u16();
    let body = response.text().await.map_err(|e| {
        tracing::error!(path = %path, error = %e, "failed to read upstream response body");
        GatewayError::Proxy("failed to read upstream response".to_string())
    })?;

    Ok(UpstreamReply { status, body })
}

/// Best-effort parse of the upstream body. Non-JSON text is wrapped as
/// `{"raw": <text>}` so the local API always answers with a JSON shape.
pub fn parse_relayed(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::json!({ "raw": text }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_url_single_separator() {
        assert_eq!(
            join_url("https://dash.zypto.com/api", "/virtual-cards/issue-card"),
            "https://dash.zypto.com/api/virtual-cards/issue-card"
        );
        assert_eq!(
            join_url("https://dash.zypto.com/api/", "/virtual-cards/issue-card"),
            "https://dash.zypto.com/api/virtual-cards/issue-card"
        );
        assert_eq!(
            join_url("https://dash.zypto.com/api", "virtual-cards/issue-card"),
            "https://dash.zypto.com/api/virtual-cards/issue-card"
        );
    }

    #[test]
    fn test_idempotency_keys_are_distinct() {
        let a = fresh_idempotency_key();
        let b = fresh_idempotency_key();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn test_parse_relayed_valid_json() {
        assert_eq!(
            parse_relayed(r#"{"success":true,"id":7}"#),
            json!({"success": true, "id": 7})
        );
    }

    #[test]
    fn test_parse_relayed_wraps_non_json() {
        assert_eq!(parse_relayed("OK"), json!({"raw": "OK"}));
        assert_eq!(parse_relayed(""), json!({"raw": ""}));
    }
}
