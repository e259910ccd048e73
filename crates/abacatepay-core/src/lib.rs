//! Core types for the AbacatePay SDK.
//!
//! This crate provides the data contracts shared by every resource client:
//!
//! - **Payments**: `Frequency`, `Method`
//! - **Billing**: `CreateBillingBody`, `BillingProduct`, `Billing`
//! - **Customers**: `CreateCustomerBody`, `CustomerMetadata`, `Customer`
//! - **Validation**: `Validate`, `Validator`, `Rule`, `ValidationErrors`
//!
//! # Amounts
//!
//! All monetary values are integer cents (`price: 100` is R$ 1,00).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod billing;
pub mod customer;
pub mod error;
pub mod payment;
pub mod validation;

pub use billing::{
    Billing, BillingCustomer, BillingProduct, CreateBillingBody, ProductItem,
    MIN_PRODUCT_PRICE_CENTS, MIN_PRODUCT_QUANTITY,
};
pub use customer::{CreateCustomerBody, Customer, CustomerMetadata};
pub use error::{ValidationErrors, Violation, ViolationKind};
pub use payment::{Frequency, ListParams, Method};
pub use validation::{FieldValue, Fields, Rule, Validate, Validator};
