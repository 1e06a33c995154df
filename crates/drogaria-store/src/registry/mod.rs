//! # Registry Module
//!
//! In-memory repositories for Drogaria POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Registries                                           │
//! │                                                                         │
//! │  Pharmacy facade                                                       │
//! │       │                                                                 │
//! │       │  pharmacy.drugs().find_by_name("Tamoxifeno")                   │
//! │       ▼                                                                 │
//! │  DrugRepository                                                        │
//! │  ├── insert(&self, drug)      ← duplicate check + push, one lock       │
//! │  ├── find_by_name(&self, name)← first exact match                      │
//! │  └── all(&self)               ← snapshot in registration order         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Mutex<Vec<Arc<Drug>>>                                                 │
//! │                                                                         │
//! │  Records are immutable once registered. Sales and carts hold the same  │
//! │  Arc, never a copy.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository) - keyed by CPF
//! - [`DrugRepository`](drug::DrugRepository) - keyed by drug name
//! - [`LaboratoryRepository`](laboratory::LaboratoryRepository) - keyed by name
//! - [`SalesLog`](sales::SalesLog) - append-only finalized sales

pub mod customer;
pub mod drug;
pub mod laboratory;
pub mod sales;

use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use drogaria_core::{CoreResult, ValidationError};
use serde::{Deserialize, Serialize};

// =============================================================================
// Duplicate Policy
// =============================================================================

/// What to do when a record arrives with a key that is already registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Refuse the second record with a `Duplicate` validation error.
    #[default]
    Reject,
    /// Keep both; lookups return the first one registered.
    Allow,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "allow" => Ok(DuplicatePolicy::Allow),
            other => Err(format!("unknown duplicate policy '{}'", other)),
        }
    }
}

// =============================================================================
// Keyed list shared by the repositories
// =============================================================================

/// Ordered records looked up by an exact, case-sensitive string key.
#[derive(Debug)]
pub(crate) struct KeyedList<T> {
    field: &'static str,
    key: fn(&T) -> &str,
    policy: DuplicatePolicy,
    entries: Mutex<Vec<Arc<T>>>,
}

impl<T> KeyedList<T> {
    pub(crate) fn new(field: &'static str, key: fn(&T) -> &str, policy: DuplicatePolicy) -> Self {
        KeyedList {
            field,
            key,
            policy,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Checks the key and appends under the same lock.
    pub(crate) fn insert(&self, record: T) -> CoreResult<Arc<T>> {
        let mut entries = lock(&self.entries);

        if self.policy == DuplicatePolicy::Reject {
            let key = (self.key)(&record);
            if entries.iter().any(|e| (self.key)(e) == key) {
                return Err(ValidationError::duplicate(self.field, key).into());
            }
        }

        let record = Arc::new(record);
        entries.push(Arc::clone(&record));
        Ok(record)
    }

    pub(crate) fn find(&self, key: &str) -> Option<Arc<T>> {
        lock(&self.entries)
            .iter()
            .find(|e| (self.key)(e) == key)
            .cloned()
    }

    pub(crate) fn all(&self) -> Vec<Arc<T>> {
        lock(&self.entries).clone()
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.entries).len()
    }
}

/// Locks a list, recovering from poisoning.
///
/// The only mutation is a single `push`, so a list left behind by a
/// panicking holder is still well-formed.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
