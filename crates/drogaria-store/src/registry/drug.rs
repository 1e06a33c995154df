//! # Drug Repository
//!
//! The catalog. Drugs are looked up by exact name, the way the operator
//! types it at the counter.

use std::sync::Arc;

use drogaria_core::{CoreResult, Drug};
use tracing::debug;

use super::{DuplicatePolicy, KeyedList};

fn name(drug: &Drug) -> &str {
    &drug.name
}

/// Registered drugs, in registration order.
#[derive(Debug)]
pub struct DrugRepository {
    list: KeyedList<Drug>,
}

impl DrugRepository {
    pub fn new(policy: DuplicatePolicy) -> Self {
        DrugRepository {
            list: KeyedList::new("name", name, policy),
        }
    }

    /// Adds a drug to the catalog.
    pub fn insert(&self, drug: Drug) -> CoreResult<Arc<Drug>> {
        let drug = self.list.insert(drug)?;
        debug!(
            name = %drug.name,
            category = %drug.category,
            price = %drug.unit_price,
            prescription_required = drug.prescription_required,
            "Registered drug"
        );
        Ok(drug)
    }

    /// First drug named exactly `name` (case-sensitive, no trimming).
    pub fn find_by_name(&self, name: &str) -> Option<Arc<Drug>> {
        let found = self.list.find(name);
        debug!(name = %name, found = found.is_some(), "Catalog lookup");
        found
    }

    pub fn all(&self) -> Vec<Arc<Drug>> {
        self.list.all()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
