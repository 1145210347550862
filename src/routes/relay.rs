//! Table-driven registration and the relay handlers.
//!
//! One initialization pass over the endpoint table attaches a handler per
//! descriptor at `/api/zypto<path>`. The handlers validate (card-holder
//! creation only), forward, and mirror the upstream status and body.

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::endpoints::{
    EndpointDescriptor, EndpointMethod, CREATE_CARD_HOLDER_PATH, ENDPOINTS, LOCAL_NAMESPACE,
};
use crate::error::GatewayError;
use crate::metrics::{REJECTED_TOTAL, RELAYED_TOTAL, UPSTREAM_FAILURES, UPSTREAM_LATENCY};
use crate::proxy::{forward, parse_relayed};
use crate::state::AppState;
use crate::validation::validate_card_holder;

/// Register every operation in the endpoint table.
pub fn configure(cfg: &mut web::ServiceConfig) {
    for ep in ENDPOINTS {
        let ep = *ep;
        let local = format!("{}{}", LOCAL_NAMESPACE, ep.path);
        match ep.method {
            EndpointMethod::Get => {
                cfg.route(
                    &local,
                    web::get().to(move |state: web::Data<AppState>| relay_get(ep, state)),
                );
            }
            EndpointMethod::Post => {
                cfg.route(
                    &local,
                    web::post().to(move |body: web::Bytes, state: web::Data<AppState>| {
                        relay_post(ep, body, state)
                    }),
                );
            }
        }
    }
}

/// GET relay: no body is read or forwarded.
async fn relay_get(
    ep: EndpointDescriptor,
    state: web::Data<AppState>,
) -> Result<HttpResponse, GatewayError> {
    relay(ep, None, &state).await
}

/// POST relay: parse the body, apply business rules where they exist, forward.
async fn relay_post(
    ep: EndpointDescriptor,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, GatewayError> {
    let payload: Value = if body.is_empty() {
        Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_slice(&body).map_err(|e| GatewayError::InvalidJson(e.to_string()))?
    };

    if ep.path == CREATE_CARD_HOLDER_PATH {
        validate_card_holder(&payload, &state.config.denied_states).map_err(|e| {
            REJECTED_TOTAL.inc();
            tracing::info!(path = %ep.path, "request rejected: {}", e);
            e
        })?;
    }

    relay(ep, Some(&payload), &state).await
}

/// Forward to the provider and mirror its status code and (parsed or
/// raw-wrapped) body back to the caller.
async fn relay(
    ep: EndpointDescriptor,
    body: Option<&Value>,
    state: &AppState,
) -> Result<HttpResponse, GatewayError> {
    let timer = UPSTREAM_LATENCY.start_timer();
    let reply = forward(
        &state.http_client,
        &state.config.base_url,
        &state.config.api_key,
        ep.method,
        ep.path,
        body,
    )
    .await
    .map_err(|e| {
        UPSTREAM_FAILURES.inc();
        e
    })?;
    timer.observe_duration();

    RELAYED_TOTAL
        .with_label_values(&[ep.path, &reply.status.to_string()])
        .inc();

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::OK);
    Ok(HttpResponse::build(status)
        .content_type("application/json")
        .json(parse_relayed(&reply.body)))
}
