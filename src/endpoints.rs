//! The fixed set of provider operations the gateway exposes.
//!
//! The path string is the provider-operation identifier, used verbatim both
//! for the local route (under [`LOCAL_NAMESPACE`]) and for the outbound URL.
//! Nothing outside this table is reachable or forwarded.

/// Local route prefix for every registered operation.
pub const LOCAL_NAMESPACE: &str = "/api/zypto";

/// The one operation with pre-forward business rules.
pub const CREATE_CARD_HOLDER_PATH: &str = "/virtual-cards/create-card-holder";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointMethod {
    Get,
    Post,
}

/// One exposed provider operation: method + provider path.
#[derive(Debug, Clone, Copy)]
pub struct EndpointDescriptor {
    pub method: EndpointMethod,
    pub path: &'static str,
}

const fn post(path: &'static str) -> EndpointDescriptor {
    EndpointDescriptor {
        method: EndpointMethod::Post,
        path,
    }
}

const fn get(path: &'static str) -> EndpointDescriptor {
    EndpointDescriptor {
        method: EndpointMethod::Get,
        path,
    }
}

/// Closed registry of provider operations, defined at startup.
pub const ENDPOINTS: &[EndpointDescriptor] = &[
    post("/virtual-cards/create-card-holder"),
    post("/virtual-cards/check-card-holder-status"),
    post("/virtual-cards/check-user-email"),
    post("/virtual-cards/create-card-order-deposit"),
    post("/virtual-cards/create-card-order-deposit-physical"),
    post("/virtual-cards/issue-card"),
    post("/virtual-cards/update-zip"),
    post("/virtual-cards/issue-card-physical"),
    post("/virtual-cards/load-card"),
    post("/virtual-cards/unload-card"),
    post("/virtual-cards/check-fee"),
    post("/virtual-cards/activate-card"),
    post("/virtual-cards/check-card"),
    post("/virtual-cards/check-card-status"),
    post("/virtual-cards/get-sumsub-link"),
    post("/virtual-cards/load-deposit"),
    post("/virtual-cards/get-balance"),
    post("/virtual-cards/get-transactions"),
    post("/virtual-cards/get-duplicates"),
    post("/virtual-cards/block-card"),
    post("/virtual-cards/set-pin"),
    post("/virtual-cards/get-pin"),
    post("/virtual-cards/import-cardholder"),
    post("/virtual-cards/send-code"),
    post("/virtual-cards/delete-cardholder"),
    post("/virtual-cards/send-code-delete-cardholder"),
    post("/virtual-cards/move-cardholder"),
    post("/virtual-cards/set-agreements"),
    get("/virtual-cards/get-allowance-balance"),
    post("/virtual-cards/send-declined-email"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_unique() {
        let paths: HashSet<&str> = ENDPOINTS.iter().map(|ep| ep.path).collect();
        assert_eq!(paths.len(), ENDPOINTS.len());
    }

    #[test]
    fn test_paths_are_rooted() {
        for ep in ENDPOINTS {
            assert!(ep.path.starts_with('/'), "path not rooted: {}", ep.path);
        }
    }

    #[test]
    fn test_single_get_operation() {
        let gets: Vec<&EndpointDescriptor> = ENDPOINTS
            .iter()
            .filter(|ep| ep.method == EndpointMethod::Get)
            .collect();
        assert_eq!(gets.len(), 1);
        assert_eq!(gets[0].path, "/virtual-cards/get-allowance-balance");
    }

    #[test]
    fn test_create_card_holder_is_registered() {
        assert!(ENDPOINTS
            .iter()
            .any(|ep| ep.path == CREATE_CARD_HOLDER_PATH
                && ep.method == EndpointMethod::Post));
    }
}
