//! AbacatePay Client SDK.
//!
//! This crate provides an async client for the AbacatePay payments API.
//! Every call goes through one [`Transport`], which applies the bearer
//! token, `User-Agent`, JSON encoding and timeouts, and classifies the
//! response into a typed result or a [`ClientError`].
//!
//! # Example
//!
//! ```no_run
//! use abacatepay_client::{AbacatePay, BillingProduct, ClientConfig, CreateBillingBody};
//!
//! # async fn example() -> Result<(), abacatepay_client::ClientError> {
//! let client = AbacatePay::new(ClientConfig::new("your-api-key"))?;
//!
//! let billing = client
//!     .billing()
//!     .create(
//!         &CreateBillingBody::one_time(
//!             "https://example.com/return",
//!             "https://example.com/completion",
//!         )
//!         .with_product(BillingProduct::new("pix-1234", "PIX", 1, 100)),
//!     )
//!     .await?;
//!
//! println!("Checkout at {}", billing.url);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod billing;
mod client;
mod config;
pub mod customer;
mod error;
pub mod response;
mod transport;

pub use abacatepay_core::{
    Billing, BillingCustomer, BillingProduct, CreateBillingBody, CreateCustomerBody, Customer,
    CustomerMetadata, FieldValue, Fields, Frequency, ListParams, Method, ProductItem, Rule,
    Validate, ValidationErrors, Validator, Violation, ViolationKind,
};
pub use billing::{BillingClient, CustomerRequirement};
pub use client::AbacatePay;
pub use config::{
    resolve_base_url, ClientConfig, API_KEY_ENV, API_URL_ENV, DEFAULT_API_URL, DEFAULT_TIMEOUT,
    TIMEOUT_MS_ENV, VERSION,
};
pub use customer::CustomerClient;
pub use error::ClientError;
pub use response::{decode, discard, Envelope, RawResponse};
pub use transport::{RequestOptions, Transport, CLIENT_NAME};
