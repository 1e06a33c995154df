//! # drogaria-core: Pure Business Logic for Drogaria POS
//!
//! This crate is the **heart** of Drogaria POS: the sales transaction and
//! discount-eligibility engine, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Drogaria POS Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    CLI shell (apps/cli)                         │   │
//! │  │    menus, prompts, console formatting, CSV export at exit       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               drogaria-store (Pharmacy facade)                  │   │
//! │  │    registries, sales log, catalog lookup                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ drogaria-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐  │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │ discount │ │ report │  │   │
//! │  │   │Customer │ │  Money  │ │  Cart   │ │ Policy   │ │ Stats  │  │   │
//! │  │   │  Drug   │ │         │ │  Alert  │ │ Outcome  │ │Listing │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO LOGGING • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Drug, Laboratory, Sale)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`dates`] - Birth date parsing and age in whole years
//! - [`cart`] - Cart assembly and prescription alerts
//! - [`discount`] - Senior and bulk discount rules
//! - [`report`] - Daily statistics and alphabetical listings
//! - [`validation`] - Field rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::{TimeZone, Utc};
//! use drogaria_core::{Cart, Customer, DiscountPolicy, Drug, DrugCategory, Money, NewDrug};
//!
//! let customer = Arc::new(Customer::new("123", "Dona Lurdes", "02/03/1948").unwrap());
//! let drug = Arc::new(Drug::new(NewDrug {
//!     name: "Tamoxifeno".into(),
//!     active_compound: "tamoxifen".into(),
//!     manufacturer: "EMS".into(),
//!     description: "20mg".into(),
//!     unit_price: Money::from_cents(10_000),
//!     category: DrugCategory::Chemotherapy,
//!     prescription_required: true,
//! }).unwrap());
//!
//! let now = Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap();
//! let mut cart = Cart::new(customer, now);
//! cart.add_item(Arc::clone(&drug));
//! cart.add_item(drug);
//! assert!(cart.prescription_alert().is_some());
//!
//! let sale = cart.checkout(&DiscountPolicy::default(), now);
//! assert_eq!(sale.total, Money::from_cents(14_400)); // 200 × 0.8 × 0.9
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod dates;
pub mod discount;
pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, PrescriptionAlert};
pub use discount::{apply_discounts, AppliedDiscount, DiscountKind, DiscountOutcome, DiscountPolicy};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use report::{DailyStatistics, DrugFilter, SalesReport};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Format of birth dates typed at the counter (`dd/mm/yyyy`).
pub const BIRTH_DATE_FORMAT: &str = "%d/%m/%Y";

/// Days per "year" in the age rule. Leap days are not accounted for.
pub const DAYS_PER_YEAR: i64 = 365;
