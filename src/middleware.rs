//! Authorization gate: every mutating request must present the admin key.

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::middleware::Next;
use actix_web::{web, ResponseError};

use crate::error::GatewayError;
use crate::state::AppState;

const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Constant-time byte comparison that does not leak input lengths.
/// Both inputs are hashed to fixed-length digests before comparison.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    use sha2::{Digest, Sha256};
    let ha = Sha256::digest(a);
    let hb = Sha256::digest(b);
    let mut result = 0u8;
    for (x, y) in ha.iter().zip(hb.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Pre-dispatch gate applied to the whole app. GET requests are treated as
/// safe and pass ungated; anything else requires the `x-admin-key` header to
/// match the configured admin secret, otherwise the request short-circuits
/// with 401 and never reaches a handler.
pub async fn require_admin_key(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<EitherBody<impl MessageBody>>, actix_web::Error> {
    if req.method() != Method::GET {
        let authorized = match req.app_data::<web::Data<AppState>>() {
            Some(state) => req
                .headers()
                .get(ADMIN_KEY_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(|key| constant_time_eq(key.as_bytes(), state.config.admin_key.as_bytes()))
                .unwrap_or(false),
            None => false,
        };

        if !authorized {
            crate::metrics::UNAUTHORIZED_TOTAL.inc();
            let (req, _payload) = req.into_parts();
            let response = GatewayError::Unauthorized.error_response();
            return Ok(ServiceResponse::new(req, response).map_into_right_body());
        }
    }

    Ok(next.call(req).await?.map_into_left_body())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"secret", b"secret"));
        assert!(!constant_time_eq(b"secret", b"Secret"));
        assert!(!constant_time_eq(b"secret", b"secret-longer"));
        assert!(!constant_time_eq(b"", b"secret"));
        assert!(constant_time_eq(b"", b""));
    }
}
