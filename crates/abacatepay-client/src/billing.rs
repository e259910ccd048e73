//! Billing resource client.

use abacatepay_core::{
    Billing, CreateBillingBody, ListParams, Validate, ValidationErrors, Validator,
};

use crate::error::ClientError;
use crate::response::{decode, Envelope};
use crate::transport::{RequestOptions, Transport};

/// Endpoint for creating a billing.
pub const CREATE_PATH: &str = "/v1/billing/create";

/// Endpoint for listing billings.
pub const LIST_PATH: &str = "/v1/billing/list";

/// Whether a billing must name its customer.
///
/// When `Required`, a body needs `customerId` or `customer.email` on top of
/// its declared field rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CustomerRequirement {
    /// Billings may be created without a customer.
    #[default]
    Optional,
    /// Billings must carry `customerId` or `customer.email`.
    Required,
}

/// Client for `/v1/billing`.
#[derive(Debug, Clone)]
pub struct BillingClient {
    transport: Transport,
    validator: Validator,
    customer_requirement: CustomerRequirement,
}

impl BillingClient {
    /// Create a billing client over `transport`.
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        Self {
            transport,
            validator: Validator::new(),
            customer_requirement: CustomerRequirement::default(),
        }
    }

    /// Require every billing to name its customer.
    #[must_use]
    pub fn require_customer(self) -> Self {
        self.with_customer_requirement(CustomerRequirement::Required)
    }

    /// Set the customer policy.
    #[must_use]
    pub fn with_customer_requirement(mut self, requirement: CustomerRequirement) -> Self {
        self.customer_requirement = requirement;
        self
    }

    /// The active customer policy.
    #[must_use]
    pub fn customer_requirement(&self) -> CustomerRequirement {
        self.customer_requirement
    }

    /// Run every client-side check on `body` without sending it.
    ///
    /// # Errors
    ///
    /// Returns every violation found, including the customer policy's.
    pub fn check(&self, body: &CreateBillingBody) -> Result<(), ValidationErrors> {
        let declared = body.validate(&self.validator);
        let customer = match self.customer_requirement {
            CustomerRequirement::Optional => Ok(()),
            CustomerRequirement::Required => body.check_customer_reference(),
        };

        match (declared, customer) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(mut errors), Err(more)) => {
                errors.extend(more);
                Err(errors)
            }
            (Err(errors), Ok(())) | (Ok(()), Err(errors)) => Err(errors),
        }
    }

    /// Create a billing.
    ///
    /// # Errors
    ///
    /// Returns `Validation` without sending anything if `body` fails its
    /// checks; otherwise any transport, status or decoding error.
    pub async fn create(&self, body: &CreateBillingBody) -> Result<Billing, ClientError> {
        self.create_with(body, None).await
    }

    /// Create a billing with per-call options.
    ///
    /// # Errors
    ///
    /// See [`BillingClient::create`].
    pub async fn create_with(
        &self,
        body: &CreateBillingBody,
        options: Option<&RequestOptions>,
    ) -> Result<Billing, ClientError> {
        self.check(body)?;

        let response = self.transport.post(CREATE_PATH, body, options).await?;

        decode::<Envelope<Billing>, _>(response).await?.into_result()
    }

    /// List all billings.
    ///
    /// # Errors
    ///
    /// Returns any transport, status or decoding error.
    pub async fn list(&self) -> Result<Vec<Billing>, ClientError> {
        self.list_with(&ListParams::default(), None).await
    }

    /// List one page of billings.
    ///
    /// # Errors
    ///
    /// See [`BillingClient::list`].
    pub async fn list_page(&self, params: &ListParams) -> Result<Vec<Billing>, ClientError> {
        self.list_with(params, None).await
    }

    /// List billings with paging and per-call options.
    ///
    /// # Errors
    ///
    /// See [`BillingClient::list`].
    pub async fn list_with(
        &self,
        params: &ListParams,
        options: Option<&RequestOptions>,
    ) -> Result<Vec<Billing>, ClientError> {
        let path = format!("{LIST_PATH}{}", params.to_query());
        let response = self.transport.get(&path, options).await?;

        decode::<Envelope<Vec<Billing>>, _>(response)
            .await?
            .into_result()
    }
}
