use actix_web::{HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug)]
pub enum GatewayError {
    /// Missing or mismatched admin key on a mutating call
    Unauthorized,
    /// Business rule rejected the request before forwarding
    Rejected(String),
    /// Inbound POST body is not valid JSON
    InvalidJson(String),
    /// Upstream unreachable or transport failure
    Proxy(String),
    /// Internal error
    Internal(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Unauthorized => write!(f, "unauthorized"),
            GatewayError::Rejected(msg) => write!(f, "rejected: {}", msg),
            GatewayError::InvalidJson(msg) => write!(f, "invalid JSON body: {}", msg),
            GatewayError::Proxy(msg) => write!(f, "proxy error: {}", msg),
            GatewayError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

impl ResponseError for GatewayError {
    fn error_response(&self) -> HttpResponse {
        match self {
            GatewayError::Unauthorized => HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "unauthorized"
            })),
            GatewayError::Rejected(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "message": msg
            })),
            GatewayError::InvalidJson(msg) => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "invalid_json",
                    "message": msg
                }))
            }
            GatewayError::Proxy(msg) => {
                tracing::error!("Proxy error: {}", msg);
                HttpResponse::BadGateway().json(serde_json::json!({
                    "error": "proxy_error",
                    "message": "Failed to reach upstream service"
                }))
            }
            GatewayError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "internal_error",
                    "message": "An internal error occurred"
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GatewayError::Unauthorized.error_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GatewayError::Rejected("nope".into()).error_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::InvalidJson("bad".into()).error_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::Proxy("down".into()).error_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
