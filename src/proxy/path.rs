//! Outbound path transformation.
//!
//! The inbound path loses its leading slash and then every literal "api"
//! substring before being appended verbatim to the backend base URL. This
//! reproduces the gateway's historical external contract: `/api/create`
//! becomes `/create`, while a path without an `/api` prefix produces an
//! invalid target and fails over the transport path. Query strings are not
//! carried over.

/// Transform an inbound request path into the outbound suffix.
pub fn transform_path(inbound: &str) -> String {
    let trimmed = inbound.strip_prefix('/').unwrap_or(inbound);
    trimmed.replace("api", "")
}

/// Build the full outbound target for a backend base URL.
pub fn target_url(base_url: &str, inbound_path: &str) -> String {
    format!("{}{}", base_url, transform_path(inbound_path))
}
