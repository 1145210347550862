//! Pre-forward business rules for card-holder creation.
//!
//! Only `/virtual-cards/create-card-holder` is checked; every other operation
//! forwards untouched. Rules run in fixed order and each short-circuits with
//! a 400 rejection. Country/state are taken from the request body as declared
//! by the caller — there is no network-level geolocation here.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::GatewayError;

/// Country declared in the body (`country` or `Country`), uppercased.
/// Missing or non-string fields normalize to the empty string.
pub fn country_of(body: &Value) -> String {
    field_of(body, "country", "Country")
}

/// State declared in the body (`state` or `State`), uppercased.
pub fn state_of(body: &Value) -> String {
    field_of(body, "state", "State")
}

fn field_of(body: &Value, lower: &str, capitalized: &str) -> String {
    body.get(lower)
        .or_else(|| body.get(capitalized))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_uppercase()
}

/// Truthiness of an optional body field: absent, null, false, empty string
/// and zero all count as absent.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(_) => true,
    }
}

/// Validate a create-card-holder body. Rule order matters: jurisdiction
/// denial is checked before the sharedToken/ipAddress requirement.
pub fn validate_card_holder(
    body: &Value,
    denied_states: &HashSet<String>,
) -> Result<(), GatewayError> {
    let state = state_of(body);
    if country_of(body) == "US" && !state.is_empty() && denied_states.contains(&state) {
        return Err(GatewayError::Rejected(format!(
            "Card unavailable in {}",
            state
        )));
    }

    if is_truthy(body.get("sharedToken")) && !is_truthy(body.get("ipAddress")) {
        return Err(GatewayError::Rejected(
            "ipAddress required when sharedToken is used".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn denied(states: &[&str]) -> HashSet<String> {
        states.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_field_normalization() {
        assert_eq!(country_of(&json!({"country": "us"})), "US");
        assert_eq!(country_of(&json!({"Country": "Us"})), "US");
        assert_eq!(state_of(&json!({"State": "ny"})), "NY");
        assert_eq!(state_of(&json!({})), "");
        assert_eq!(state_of(&json!({"state": 42})), "");
    }

    #[test]
    fn test_denied_state_rejected() {
        let err = validate_card_holder(
            &json!({"country": "US", "state": "ny"}),
            &denied(&["NY"]),
        )
        .unwrap_err();
        match err {
            GatewayError::Rejected(msg) => assert_eq!(msg, "Card unavailable in NY"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_allowed_state_passes() {
        assert!(validate_card_holder(
            &json!({"country": "US", "state": "CA"}),
            &denied(&["NY"]),
        )
        .is_ok());
    }

    #[test]
    fn test_non_us_country_ignores_denied_set() {
        assert!(validate_card_holder(
            &json!({"country": "CA", "state": "NY"}),
            &denied(&["NY"]),
        )
        .is_ok());
    }

    #[test]
    fn test_missing_state_never_triggers_denial() {
        assert!(validate_card_holder(&json!({"country": "US"}), &denied(&["NY"])).is_ok());
    }

    #[test]
    fn test_shared_token_requires_ip_address() {
        let err = validate_card_holder(
            &json!({"sharedToken": "tok_abc"}),
            &denied(&[]),
        )
        .unwrap_err();
        match err {
            GatewayError::Rejected(msg) => {
                assert_eq!(msg, "ipAddress required when sharedToken is used")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_shared_token_with_ip_address_passes() {
        assert!(validate_card_holder(
            &json!({"sharedToken": "tok_abc", "ipAddress": "203.0.113.7"}),
            &denied(&[]),
        )
        .is_ok());
    }

    #[test]
    fn test_empty_shared_token_is_not_used() {
        assert!(validate_card_holder(&json!({"sharedToken": ""}), &denied(&[])).is_ok());
        assert!(validate_card_holder(&json!({"sharedToken": null}), &denied(&[])).is_ok());
    }

    #[test]
    fn test_jurisdiction_checked_before_shared_token() {
        // Both rules would fire; the jurisdiction message must win.
        let err = validate_card_holder(
            &json!({"country": "US", "state": "NY", "sharedToken": "tok_abc"}),
            &denied(&["NY"]),
        )
        .unwrap_err();
        match err {
            GatewayError::Rejected(msg) => assert!(msg.contains("NY")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
