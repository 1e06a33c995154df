//! # drogaria-store: Session State for Drogaria POS
//!
//! Registries, catalog lookup, the sales log and the customer export.
//! Everything lives in memory for the length of one run.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Drogaria POS Data Flow                           │
//! │                                                                         │
//! │  CLI menu (make sale)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  drogaria-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Pharmacy    │    │  Registries   │    │   Export     │  │   │
//! │  │   │ (pharmacy.rs) │    │ (registry/)   │    │ (export.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ begin_sale    │───►│ Customers     │    │ clientes.csv │  │   │
//! │  │   │ finalize_sale │    │ Drugs         │───►│              │  │   │
//! │  │   │ statistics    │    │ Laboratories  │    │              │  │   │
//! │  │   │               │    │ SalesLog      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  drogaria-core (Cart, DiscountPolicy, SalesReport)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pharmacy`] - Session facade and configuration
//! - [`registry`] - Keyed repositories and the sales log
//! - [`export`] - Customer CSV writer
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use drogaria_core::{DrugCategory, Money, NewDrug};
//! use drogaria_store::Pharmacy;
//!
//! let pharmacy = Pharmacy::default();
//! pharmacy.register_customer("123", "Ana", "17/05/1990")?;
//! pharmacy.register_drug(NewDrug {
//!     name: "Camomila".into(),
//!     active_compound: "Matricaria recutita".into(),
//!     manufacturer: "Herbarium".into(),
//!     description: "chá".into(),
//!     unit_price: Money::from_cents(1_500),
//!     category: DrugCategory::Herbal,
//!     prescription_required: false,
//! })?;
//!
//! let mut cart = pharmacy.begin_sale("123")?;
//! pharmacy.add_item_by_name(&mut cart, "Camomila")?;
//! let sale = pharmacy.finalize_sale(cart)?;
//!
//! assert_eq!(sale.total, Money::from_cents(1_500));
//! assert_eq!(pharmacy.top_seller().as_deref(), Some("Camomila"));
//! # Ok::<(), drogaria_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod export;
pub mod pharmacy;
pub mod registry;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use pharmacy::{Pharmacy, PharmacyConfig};
pub use registry::DuplicatePolicy;

// Repository re-exports for convenience
pub use registry::customer::CustomerRepository;
pub use registry::drug::DrugRepository;
pub use registry::laboratory::LaboratoryRepository;
pub use registry::sales::SalesLog;
