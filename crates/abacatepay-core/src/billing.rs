//! Billing types.
//!
//! A billing is a hosted checkout for one or more products. Prices are in
//! cents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::customer::CustomerMetadata;
use crate::error::{ValidationErrors, Violation};
use crate::payment::{Frequency, Method};
use crate::validation::{Fields, Rule, Validate};

/// Smallest accepted product price, in cents (R$ 1,00).
pub const MIN_PRODUCT_PRICE_CENTS: i64 = 100;

/// Smallest accepted product quantity.
pub const MIN_PRODUCT_QUANTITY: i64 = 1;

/// Request body for `POST /v1/billing/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillingBody {
    /// Charge frequency.
    pub frequency: Frequency,
    /// Accepted payment methods.
    pub methods: Vec<Method>,
    /// Where the payer goes when clicking "back".
    pub return_url: String,
    /// Where the payer goes after paying.
    pub completion_url: String,
    /// Products being charged.
    pub products: Vec<BillingProduct>,
    /// Existing customer to charge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Inline customer, created alongside the billing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerMetadata>,
}

impl CreateBillingBody {
    /// Create a one-time PIX billing with no products yet.
    #[must_use]
    pub fn one_time(return_url: impl Into<String>, completion_url: impl Into<String>) -> Self {
        Self {
            frequency: Frequency::OneTime,
            methods: vec![Method::Pix],
            return_url: return_url.into(),
            completion_url: completion_url.into(),
            products: Vec::new(),
            customer_id: None,
            customer: None,
        }
    }

    /// Add a product.
    #[must_use]
    pub fn with_product(mut self, product: BillingProduct) -> Self {
        self.products.push(product);
        self
    }

    /// Charge an existing customer.
    #[must_use]
    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    /// Charge an inline customer.
    #[must_use]
    pub fn with_customer(mut self, customer: CustomerMetadata) -> Self {
        self.customer = Some(customer);
        self
    }

    /// Total amount in cents.
    #[must_use]
    pub fn total_cents(&self) -> i64 {
        self.products
            .iter()
            .map(|p| p.price.saturating_mul(p.quantity))
            .sum()
    }

    /// Check that the billing names a customer, by id or inline email.
    ///
    /// This rule is not part of [`Validate`]; callers opt in to it.
    ///
    /// # Errors
    ///
    /// Returns a `RequiredOneOf` violation when neither `customerId` nor
    /// `customer.email` is set.
    pub fn check_customer_reference(&self) -> Result<(), ValidationErrors> {
        let has_id = self.customer_id.as_deref().is_some_and(|id| !id.is_empty());
        let has_email = self
            .customer
            .as_ref()
            .is_some_and(|c| !c.email.is_empty());

        if has_id || has_email {
            return Ok(());
        }

        match ValidationErrors::from_violations(vec![Violation::required_one_of(&[
            "customerId",
            "customer.email",
        ])]) {
            Some(errors) => Err(errors),
            None => Ok(()),
        }
    }
}

impl Validate for CreateBillingBody {
    fn rules(&self, fields: &mut Fields<'_>) {
        fields
            .field("frequency", &self.frequency, &[Rule::Required])
            .dive_each("methods", &self.methods, &[Rule::Required], &[Rule::Required])
            .field("returnUrl", &self.return_url, &[Rule::Required, Rule::Url])
            .field(
                "completionUrl",
                &self.completion_url,
                &[Rule::Required, Rule::Url],
            )
            .dive("products", &self.products, &[Rule::Required])
            .nested("customer", self.customer.as_ref());
    }
}

/// One product line of a billing request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingProduct {
    /// Merchant-side product identifier.
    pub external_id: String,
    /// Display name.
    pub name: String,
    /// Display description.
    #[serde(default)]
    pub description: String,
    /// Units charged.
    pub quantity: i64,
    /// Unit price in cents.
    pub price: i64,
}

impl BillingProduct {
    /// Create a product line.
    #[must_use]
    pub fn new(
        external_id: impl Into<String>,
        name: impl Into<String>,
        quantity: i64,
        price: i64,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            name: name.into(),
            description: String::new(),
            quantity,
            price,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Validate for BillingProduct {
    fn rules(&self, fields: &mut Fields<'_>) {
        fields
            .field("externalId", &self.external_id, &[Rule::Required])
            .field("name", &self.name, &[Rule::Required])
            .field(
                "quantity",
                &self.quantity,
                &[Rule::Required, Rule::Gte(MIN_PRODUCT_QUANTITY)],
            )
            .field(
                "price",
                &self.price,
                &[Rule::Required, Rule::Gte(MIN_PRODUCT_PRICE_CENTS)],
            );
    }
}

/// A product reference inside a returned billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductItem {
    /// Product identifier (the request's `externalId`).
    pub product_id: String,
    /// Units charged.
    pub quantity: i64,
}

/// Customer reference inside a returned billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingCustomer {
    /// Customer identifier.
    #[serde(alias = "_id")]
    pub id: String,
    /// Contact details.
    #[serde(default)]
    pub metadata: CustomerMetadata,
}

/// A billing as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    /// Billing identifier.
    #[serde(alias = "_id")]
    pub id: String,
    /// Hosted checkout URL.
    #[serde(default)]
    pub url: String,
    /// Total amount in cents.
    #[serde(default)]
    pub amount: i64,
    /// Payment status (`PENDING`, `PAID`, ...).
    #[serde(default)]
    pub status: String,
    /// Whether the billing was created with a dev-mode key.
    #[serde(default)]
    pub dev_mode: bool,
    /// Accepted payment methods.
    #[serde(default)]
    pub methods: Vec<Method>,
    /// Charged products.
    #[serde(default)]
    pub products: Vec<ProductItem>,
    /// Charge frequency.
    pub frequency: Frequency,
    /// Next charge date for recurring billings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_billing: Option<DateTime<Utc>>,
    /// Charged customer, when one is attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<BillingCustomer>,
    /// When the billing was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the billing was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
