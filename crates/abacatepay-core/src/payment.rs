//! Payment enums and list parameters shared by the resource APIs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation::FieldValue;

/// How often a billing is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    /// A single charge.
    OneTime,
    /// The same billing link accepts several payments.
    MultiplePayments,
}

impl Frequency {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneTime => "ONE_TIME",
            Self::MultiplePayments => "MULTIPLE_PAYMENTS",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FieldValue for Frequency {
    fn is_zero(&self) -> bool {
        false
    }

    fn as_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

/// Accepted payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Method {
    /// Brazilian instant payment.
    Pix,
    /// Credit card.
    Card,
}

impl Method {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pix => "PIX",
            Self::Card => "CARD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FieldValue for Method {
    fn is_zero(&self) -> bool {
        false
    }

    fn as_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

/// Page selection for list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListParams {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Items per page.
    pub limit: Option<u32>,
}

impl ListParams {
    /// Create empty list parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render as a query string, including the leading `?`.
    ///
    /// Returns an empty string when no parameter is set.
    #[must_use]
    pub fn to_query(&self) -> String {
        let pairs: Vec<String> = [("page", self.page), ("limit", self.limit)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| format!("{key}={v}")))
            .collect();

        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}
