//! Customer types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{Fields, Rule, Validate};

/// Request body for `POST /v1/customer/create`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerBody {
    /// Full name.
    pub name: String,
    /// Phone number, free-form.
    pub cellphone: String,
    /// CPF or CNPJ.
    pub tax_id: String,
    /// Contact email (required).
    pub email: String,
}

impl CreateCustomerBody {
    /// Build a body from customer metadata.
    #[must_use]
    pub fn from_metadata(metadata: CustomerMetadata) -> Self {
        Self {
            name: metadata.name,
            cellphone: metadata.cellphone,
            tax_id: metadata.tax_id,
            email: metadata.email,
        }
    }
}

impl Validate for CreateCustomerBody {
    fn rules(&self, fields: &mut Fields<'_>) {
        fields.field("email", &self.email, &[Rule::Required, Rule::Email]);
    }
}

/// Contact details attached to a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMetadata {
    /// Full name.
    #[serde(default)]
    pub name: String,
    /// Phone number, free-form.
    #[serde(default)]
    pub cellphone: String,
    /// CPF or CNPJ.
    #[serde(default)]
    pub tax_id: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
}

impl Validate for CustomerMetadata {
    fn rules(&self, fields: &mut Fields<'_>) {
        fields.field("email", &self.email, &[Rule::Email]);
    }
}

/// A customer as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Customer identifier.
    #[serde(alias = "_id")]
    pub id: String,
    /// Contact details.
    #[serde(default)]
    pub metadata: CustomerMetadata,
    /// Owning account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Owning store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    /// Whether the customer was created with a dev-mode key.
    #[serde(default)]
    pub dev_mode: bool,
    /// When the customer was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the customer was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
