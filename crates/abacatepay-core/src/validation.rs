//! Declarative, client-side validation of request bodies.
//!
//! Each request body implements [`Validate`] by declaring its rules field by
//! field. A [`Validator`] walks those declarations and collects every
//! violation into one [`ValidationErrors`] instead of stopping at the first.
//!
//! # Example
//!
//! ```
//! use abacatepay_core::{Fields, Rule, Validate, Validator};
//!
//! struct Signup {
//!     email: String,
//!     seats: i64,
//! }
//!
//! impl Validate for Signup {
//!     fn rules(&self, fields: &mut Fields<'_>) {
//!         fields
//!             .field("email", &self.email, &[Rule::Required, Rule::Email])
//!             .field("seats", &self.seats, &[Rule::Gte(1)]);
//!     }
//! }
//!
//! let validator = Validator::new();
//! let signup = Signup { email: "nope".into(), seats: 0 };
//! let errors = signup.validate(&validator).unwrap_err();
//! assert_eq!(errors.violations().len(), 2);
//! ```

use regex::Regex;

use crate::error::{ValidationErrors, Violation};

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// A single field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The value must be non-zero / non-empty.
    Required,
    /// The value must be a well-formed email address.
    Email,
    /// The value must be an absolute URL.
    Url,
    /// Inclusive lower bound. Numbers compare by value, strings by character
    /// count and sequences by length.
    Gte(i64),
}

/// A value that field rules can be applied to.
pub trait FieldValue {
    /// Whether the value is the zero value for its type.
    fn is_zero(&self) -> bool;

    /// The value as text, for format rules.
    fn as_text(&self) -> Option<&str> {
        None
    }

    /// The value's magnitude, for bound rules.
    fn magnitude(&self) -> Option<i64> {
        None
    }
}

impl FieldValue for str {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn as_text(&self) -> Option<&str> {
        Some(self)
    }

    fn magnitude(&self) -> Option<i64> {
        i64::try_from(self.chars().count()).ok()
    }
}

impl FieldValue for String {
    fn is_zero(&self) -> bool {
        self.as_str().is_zero()
    }

    fn as_text(&self) -> Option<&str> {
        Some(self)
    }

    fn magnitude(&self) -> Option<i64> {
        self.as_str().magnitude()
    }
}

impl FieldValue for i64 {
    fn is_zero(&self) -> bool {
        *self == 0
    }

    fn magnitude(&self) -> Option<i64> {
        Some(*self)
    }
}

impl FieldValue for i32 {
    fn is_zero(&self) -> bool {
        *self == 0
    }

    fn magnitude(&self) -> Option<i64> {
        Some(i64::from(*self))
    }
}

impl FieldValue for u32 {
    fn is_zero(&self) -> bool {
        *self == 0
    }

    fn magnitude(&self) -> Option<i64> {
        Some(i64::from(*self))
    }
}

impl FieldValue for bool {
    fn is_zero(&self) -> bool {
        !*self
    }
}

impl<T> FieldValue for [T] {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn magnitude(&self) -> Option<i64> {
        i64::try_from(self.len()).ok()
    }
}

impl<T> FieldValue for Vec<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn magnitude(&self) -> Option<i64> {
        self.as_slice().magnitude()
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn is_zero(&self) -> bool {
        self.as_ref().map_or(true, FieldValue::is_zero)
    }

    fn as_text(&self) -> Option<&str> {
        self.as_ref().and_then(FieldValue::as_text)
    }

    fn magnitude(&self) -> Option<i64> {
        self.as_ref().and_then(FieldValue::magnitude)
    }
}

/// A request body with declared field rules.
pub trait Validate {
    /// Declare this body's rules.
    fn rules(&self, fields: &mut Fields<'_>);

    /// Check every declared rule.
    ///
    /// # Errors
    ///
    /// Returns all violations found, aggregated into one error.
    fn validate(&self, validator: &Validator) -> Result<(), ValidationErrors> {
        validator.validate(self)
    }
}

/// Applies declared rules to request bodies.
///
/// Holds the compiled format checks. Owners (typically a resource client)
/// keep one instance and pass it to [`Validate::validate`].
#[derive(Debug, Clone)]
pub struct Validator {
    email: Regex,
}

impl Validator {
    /// Create a validator.
    ///
    /// # Panics
    ///
    /// Panics if the built-in email pattern fails to compile (it does not).
    #[must_use]
    pub fn new() -> Self {
        Self {
            email: Regex::new(EMAIL_PATTERN).expect("email pattern is valid"),
        }
    }

    /// Check every rule `body` declares.
    ///
    /// # Errors
    ///
    /// Returns all violations found, aggregated into one error.
    pub fn validate<T: Validate + ?Sized>(&self, body: &T) -> Result<(), ValidationErrors> {
        let mut fields = Fields {
            validator: self,
            prefix: String::new(),
            violations: Vec::new(),
        };
        body.rules(&mut fields);

        match ValidationErrors::from_violations(fields.violations) {
            Some(errors) => Err(errors),
            None => Ok(()),
        }
    }

    /// Whether `value` is a well-formed email address.
    #[must_use]
    pub fn is_email(&self, value: &str) -> bool {
        self.email.is_match(value)
    }

    /// Whether `value` parses as an absolute URL with a host.
    #[must_use]
    pub fn is_url(&self, value: &str) -> bool {
        url::Url::parse(value).is_ok_and(|u| u.has_host())
    }

    fn passes<V: FieldValue + ?Sized>(&self, value: &V, rule: Rule) -> bool {
        match rule {
            Rule::Required => !value.is_zero(),
            // Empty text is left to `Required`.
            Rule::Email => value
                .as_text()
                .map_or(true, |s| s.is_empty() || self.is_email(s)),
            Rule::Url => value
                .as_text()
                .map_or(true, |s| s.is_empty() || self.is_url(s)),
            Rule::Gte(min) => value.magnitude().map_or(true, |n| n >= min),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects violations while a body declares its rules.
#[derive(Debug)]
pub struct Fields<'v> {
    validator: &'v Validator,
    prefix: String,
    violations: Vec<Violation>,
}

impl Fields<'_> {
    /// Apply `rules` to one field, in order.
    ///
    /// Checking stops at the first rule the field fails, so an empty
    /// required URL reports `Required` only.
    pub fn field<V: FieldValue + ?Sized>(
        &mut self,
        name: &str,
        value: &V,
        rules: &[Rule],
    ) -> &mut Self {
        if let Some(rule) = rules
            .iter()
            .copied()
            .find(|rule| !self.validator.passes(value, *rule))
        {
            let path = self.path(name);
            self.violations.push(Violation::rule(path, rule));
        }
        self
    }

    /// Apply `rules` to a sequence, then validate each element's own rules.
    ///
    /// Element violations are reported as `name[i].field`.
    pub fn dive<T: Validate>(&mut self, name: &str, items: &[T], rules: &[Rule]) -> &mut Self {
        self.field(name, items, rules);

        for (i, item) in items.iter().enumerate() {
            let saved = self.prefix.len();
            self.prefix.push_str(&format!("{name}[{i}]."));
            item.rules(self);
            self.prefix.truncate(saved);
        }
        self
    }

    /// Apply `rules` to a sequence, then `element_rules` to each element.
    ///
    /// Element violations are reported as `name[i]`.
    pub fn dive_each<V: FieldValue>(
        &mut self,
        name: &str,
        items: &[V],
        rules: &[Rule],
        element_rules: &[Rule],
    ) -> &mut Self {
        self.field(name, items, rules);

        for (i, item) in items.iter().enumerate() {
            self.field(&format!("{name}[{i}]"), item, element_rules);
        }
        self
    }

    /// Validate a nested body under `name.`, if present.
    pub fn nested<T: Validate>(&mut self, name: &str, value: Option<&T>) -> &mut Self {
        if let Some(value) = value {
            let saved = self.prefix.len();
            self.prefix.push_str(name);
            self.prefix.push('.');
            value.rules(self);
            self.prefix.truncate(saved);
        }
        self
    }

    fn path(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }
}
