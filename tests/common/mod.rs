//! Shared helpers for the wiremock-backed integration tests.

#![allow(dead_code)]

use accela::{AccelaClient, ClientConfig};
use wiremock::MockServer;

/// A client pointed at `{server}/v4` with fixed test credentials.
pub fn client_for(server: &MockServer) -> AccelaClient {
    let config = ClientConfig::new("test-token", "CHARLOTTE", "PROD")
        .with_base_url(format!("{}/v4", server.uri()));
    AccelaClient::new(config).unwrap()
}

/// Minimal record payload with the given ID.
pub fn record_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "customId": format!("BLD-{id}"),
        "module": "Building",
        "status": {"value": "Issued", "text": "Issued"}
    })
}
