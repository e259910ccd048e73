//! Top-level AbacatePay client.

use crate::billing::BillingClient;
use crate::config::{ClientConfig, VERSION};
use crate::customer::CustomerClient;
use crate::error::ClientError;
use crate::transport::Transport;

/// AbacatePay API client.
///
/// Owns one [`Transport`] shared by every resource client.
#[derive(Debug, Clone)]
pub struct AbacatePay {
    transport: Transport,
    billing: BillingClient,
    customer: CustomerClient,
}

impl AbacatePay {
    /// Create a client from configuration.
    ///
    /// The base URL is the configured one, else `ABACATEPAY_API_URL`, else
    /// the production host. A missing or zero timeout becomes 500ms.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the API key is empty.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        if config.api_key.trim().is_empty() {
            return Err(ClientError::Configuration("API key is required".into()));
        }

        let base_url = config.resolved_base_url();
        let timeout = config.resolved_timeout();
        tracing::debug!(base_url = %base_url, ?timeout, "Creating AbacatePay client");

        let transport = Transport::new(config.api_key, base_url, VERSION, timeout)?;
        Ok(Self::from_transport(transport))
    }

    /// Create a client with only an API key, using defaults for the rest.
    ///
    /// # Errors
    ///
    /// See [`AbacatePay::new`].
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::new(ClientConfig::new(api_key))
    }

    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if `ABACATEPAY_API_KEY` is unset.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env())
    }

    /// Create a client over an existing transport.
    #[must_use]
    pub fn from_transport(transport: Transport) -> Self {
        Self {
            billing: BillingClient::new(transport.clone()),
            customer: CustomerClient::new(transport.clone()),
            transport,
        }
    }

    /// Billing operations.
    #[must_use]
    pub fn billing(&self) -> &BillingClient {
        &self.billing
    }

    /// Customer operations.
    #[must_use]
    pub fn customer(&self) -> &CustomerClient {
        &self.customer
    }

    /// The shared transport, for endpoints without a typed client.
    #[must_use]
    pub fn transport(&self) -> &Transport {
        &self.transport
    }
}
