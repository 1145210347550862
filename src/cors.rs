//! CORS configuration for the gateway binary.

use actix_cors::Cors;

/// Build the gateway CORS middleware from allowed origins.
///
/// A `*` entry permits any origin; production deployments should list the
/// front-end origins explicitly in ALLOWED_ORIGINS.
pub fn build_cors(allowed_origins: &[String]) -> Cors {
    let allowed = allowed_origins.to_vec();
    Cors::default()
        .allowed_origin_fn(move |origin, _req_head| {
            let origin_str = origin.to_str().unwrap_or("");
            allowed.iter().any(|a| a == "*" || a == origin_str)
        })
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::ACCEPT,
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::HeaderName::from_static("x-admin-key"),
        ])
        .max_age(3600)
}
