//! Customer resource client.

use abacatepay_core::{CreateCustomerBody, Customer, ListParams, Validate, Validator};

use crate::error::ClientError;
use crate::response::{decode, Envelope};
use crate::transport::{RequestOptions, Transport};

/// Endpoint for creating a customer.
pub const CREATE_PATH: &str = "/v1/customer/create";

/// Endpoint for listing customers.
pub const LIST_PATH: &str = "/v1/customer/list";

/// Client for `/v1/customer`.
#[derive(Debug, Clone)]
pub struct CustomerClient {
    transport: Transport,
    validator: Validator,
}

impl CustomerClient {
    /// Create a customer client over `transport`.
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        Self {
            transport,
            validator: Validator::new(),
        }
    }

    /// Create a customer.
    ///
    /// # Errors
    ///
    /// Returns `Validation` without sending anything if `body` fails its
    /// checks; otherwise any transport, status or decoding error.
    pub async fn create(&self, body: &CreateCustomerBody) -> Result<Customer, ClientError> {
        self.create_with(body, None).await
    }

    /// Create a customer with per-call options.
    ///
    /// # Errors
    ///
    /// See [`CustomerClient::create`].
    pub async fn create_with(
        &self,
        body: &CreateCustomerBody,
        options: Option<&RequestOptions>,
    ) -> Result<Customer, ClientError> {
        body.validate(&self.validator)?;

        let response = self.transport.post(CREATE_PATH, body, options).await?;

        decode::<Envelope<Customer>, _>(response).await?.into_result()
    }

    /// List all customers.
    ///
    /// # Errors
    ///
    /// Returns any transport, status or decoding error.
    pub async fn list(&self) -> Result<Vec<Customer>, ClientError> {
        self.list_with(&ListParams::default(), None).await
    }

    /// List one page of customers.
    ///
    /// # Errors
    ///
    /// See [`CustomerClient::list`].
    pub async fn list_page(&self, params: &ListParams) -> Result<Vec<Customer>, ClientError> {
        self.list_with(params, None).await
    }

    /// List customers with paging and per-call options.
    ///
    /// # Errors
    ///
    /// See [`CustomerClient::list`].
    pub async fn list_with(
        &self,
        params: &ListParams,
        options: Option<&RequestOptions>,
    ) -> Result<Vec<Customer>, ClientError> {
        let path = format!("{LIST_PATH}{}", params.to_query());
        let response = self.transport.get(&path, options).await?;

        decode::<Envelope<Vec<Customer>>, _>(response)
            .await?
            .into_result()
    }
}
