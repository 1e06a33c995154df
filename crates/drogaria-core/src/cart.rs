//! # Cart
//!
//! Assembles the items of one transaction before it becomes a [`Sale`].
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  Cart::new(customer) ───────────► empty cart, subtotal R$0.00           │
//! │                                                                         │
//! │  add_item(drug) ────────────────► items.push(drug)                      │
//! │                                   if drug.prescription_required:        │
//! │                                       controlled.push(drug)             │
//! │                                                                         │
//! │  prescription_alert() ──────────► Some(names) if anything controlled    │
//! │                                                                         │
//! │  checkout(policy, now) ─────────► Sale (discounts applied)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unlike a shop cart, the same drug scanned twice is two entries, not a
//! quantity of two: each unit counts separately in the statistics.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::discount::DiscountPolicy;
use crate::money::Money;
use crate::types::{Customer, Drug, Sale};

/// The items of one in-progress transaction.
///
/// ## Invariants
/// - `controlled` holds exactly the entries of `items` that require a
///   prescription, in the same order
/// - Drugs are shared references; the cart never copies or mutates them
#[derive(Debug, Clone)]
pub struct Cart {
    customer: Arc<Customer>,
    items: Vec<Arc<Drug>>,
    controlled: Vec<Arc<Drug>>,
    opened_at: DateTime<Utc>,
}

impl Cart {
    /// Opens an empty cart for `customer`.
    pub fn new(customer: Arc<Customer>, opened_at: DateTime<Utc>) -> Self {
        Cart {
            customer,
            items: Vec::new(),
            controlled: Vec::new(),
            opened_at,
        }
    }

    /// Adds one unit of `drug`.
    pub fn add_item(&mut self, drug: Arc<Drug>) {
        if drug.prescription_required {
            self.controlled.push(Arc::clone(&drug));
        }
        self.items.push(drug);
    }

    pub fn customer(&self) -> &Arc<Customer> {
        &self.customer
    }

    pub fn items(&self) -> &[Arc<Drug>] {
        &self.items
    }

    /// Items that need a prescription check, in scan order.
    pub fn controlled_items(&self) -> &[Arc<Drug>] {
        &self.controlled
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Sum of unit prices, once per entry.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|d| d.unit_price).sum()
    }

    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The "verify prescription" notice, if any controlled item was added.
    pub fn prescription_alert(&self) -> Option<PrescriptionAlert> {
        if self.controlled.is_empty() {
            return None;
        }
        Some(PrescriptionAlert {
            drug_names: self.controlled.iter().map(|d| d.name.clone()).collect(),
        })
    }

    /// Closes the cart into a sale.
    ///
    /// The customer's age is taken on `now`'s calendar date. An empty cart
    /// still produces a (zero-value) sale; whether to record it is the
    /// caller's call.
    pub fn checkout(self, policy: &DiscountPolicy, now: DateTime<Utc>) -> Sale {
        let subtotal = self.subtotal();
        let age = self.customer.age_on(now.date_naive());
        let outcome = policy.apply(subtotal, age);

        Sale {
            id: Uuid::new_v4(),
            sold_at: now,
            customer: self.customer,
            items: self.items,
            subtotal,
            discounts: outcome.applied,
            total: outcome.total,
        }
    }
}

/// Drugs in the cart that must be checked against a prescription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionAlert {
    /// One name per controlled entry (repeats kept).
    pub drug_names: Vec<String>,
}

impl fmt::Display for PrescriptionAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Prescription verification required for: {}",
            self.drug_names.join(", ")
        )
    }
}
