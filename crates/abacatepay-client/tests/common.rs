//! Common test utilities for client integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::time::Duration;

use abacatepay_client::{
    AbacatePay, BillingProduct, ClientConfig, CreateBillingBody, CreateCustomerBody,
    CustomerMetadata, Transport,
};
use wiremock::{MockServer, ResponseTemplate};

/// API key every test client authenticates with.
pub const API_KEY: &str = "test-key";

/// Version tag passed to test transports.
pub const TEST_VERSION: &str = "1.0.0";

/// Transport pointed at the mock server with a generous default timeout.
pub fn transport(server: &MockServer) -> Transport {
    transport_with_timeout(server, Duration::from_secs(10))
}

/// Transport pointed at the mock server with the given default timeout.
pub fn transport_with_timeout(server: &MockServer, timeout: Duration) -> Transport {
    Transport::new(API_KEY, server.uri(), TEST_VERSION, timeout)
        .expect("Failed to create transport")
}

/// Top-level client pointed at the mock server.
pub fn client(server: &MockServer) -> AbacatePay {
    AbacatePay::new(
        ClientConfig::new(API_KEY)
            .with_base_url(server.uri())
            .with_timeout(Duration::from_secs(10)),
    )
    .expect("Failed to create client")
}

/// Customer contact details used across tests.
pub fn seiya() -> CustomerMetadata {
    CustomerMetadata {
        name: "Seiya de Pegasus".into(),
        cellphone: "11 4002-8922".into(),
        tax_id: "42066612369".into(),
        email: "seiya@pegasus.com".into(),
    }
}

/// A customer body that passes validation.
pub fn customer_body() -> CreateCustomerBody {
    CreateCustomerBody::from_metadata(seiya())
}

/// A billing body that passes validation.
pub fn billing_body() -> CreateBillingBody {
    CreateBillingBody::one_time(
        "https://example.com/return",
        "https://example.com/completion",
    )
    .with_product(BillingProduct::new("pix-1234", "PIX", 1, 100).with_description("PIX"))
}

/// A 200 response wrapping `data` in the API envelope.
pub fn enveloped(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": data, "error": null}))
}

/// A 200 response whose envelope carries an error message.
pub fn rejected(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": null, "error": message}))
}

/// A billing payload as the API returns it.
pub fn billing_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "url": format!("https://abacatepay.com/pay/{id}"),
        "amount": 100,
        "status": "PENDING",
        "devMode": true,
        "methods": ["PIX"],
        "products": [{"productId": "pix-1234", "quantity": 1}],
        "frequency": "ONE_TIME",
        "nextBilling": null,
        "createdAt": "2024-11-04T18:38:28.573Z",
        "updatedAt": "2024-11-04T18:38:28.573Z"
    })
}
