//! Validation error types.

use std::fmt;

use crate::validation::Rule;

/// What a single field violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// A declared per-field rule failed.
    Rule(Rule),

    /// None of the alternative fields carried a value.
    RequiredOneOf {
        /// The fields of which at least one must be non-empty.
        alternatives: Vec<String>,
    },
}

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Wire name of the field, with sequence indices (e.g. `products[0].price`).
    pub field: String,
    /// The failed check.
    pub kind: ViolationKind,
}

impl Violation {
    /// Create a violation for a declared rule.
    #[must_use]
    pub fn rule(field: impl Into<String>, rule: Rule) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::Rule(rule),
        }
    }

    /// Create a violation for a missing "one of" group.
    #[must_use]
    pub fn required_one_of(alternatives: &[&str]) -> Self {
        Self {
            field: alternatives.join("|"),
            kind: ViolationKind::RequiredOneOf {
                alternatives: alternatives.iter().map(|s| (*s).to_string()).collect(),
            },
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Rule(Rule::Required) => write!(f, "{}: is required", self.field),
            ViolationKind::Rule(Rule::Email) => {
                write!(f, "{}: must be a valid email address", self.field)
            }
            ViolationKind::Rule(Rule::Url) => write!(f, "{}: must be a valid URL", self.field),
            ViolationKind::Rule(Rule::Gte(min)) => {
                write!(f, "{}: must be greater than or equal to {min}", self.field)
            }
            ViolationKind::RequiredOneOf { alternatives } => {
                write!(f, "{} is required", alternatives.join(" or "))
            }
        }
    }
}

/// Every violation found while validating one request body.
///
/// Never empty: a body with no violations validates to `Ok(())`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed: {}", join_violations(.violations))]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

impl ValidationErrors {
    /// Wrap a set of violations, returning `None` if there are none.
    #[must_use]
    pub fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    /// The individual violations, in declaration order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether `field` has at least one violation.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Append violations from another report.
    pub fn extend(&mut self, other: ValidationErrors) {
        self.violations.extend(other.violations);
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_violations_are_not_an_error() {
        assert!(ValidationErrors::from_violations(Vec::new()).is_none());
    }

    #[test]
    fn display_joins_all_violations() {
        let errors = ValidationErrors::from_violations(vec![
            Violation::rule("email", Rule::Email),
            Violation::rule("products[0].price", Rule::Gte(100)),
        ])
        .unwrap();

        assert_eq!(
            errors.to_string(),
            "validation failed: email: must be a valid email address; \
             products[0].price: must be greater than or equal to 100"
        );
    }

    #[test]
    fn required_one_of_names_every_alternative() {
        let violation = Violation::required_one_of(&["customerId", "customer.email"]);
        assert_eq!(violation.to_string(), "customerId or customer.email is required");
        assert_eq!(
            violation.kind,
            ViolationKind::RequiredOneOf {
                alternatives: vec!["customerId".to_string(), "customer.email".to_string()],
            }
        );
    }
}
