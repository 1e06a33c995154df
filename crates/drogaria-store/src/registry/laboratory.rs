//! # Laboratory Repository

use std::sync::Arc;

use drogaria_core::{CoreResult, Laboratory};
use tracing::debug;

use super::{DuplicatePolicy, KeyedList};

fn name(lab: &Laboratory) -> &str {
    &lab.name
}

/// Registered laboratories, keyed by name.
#[derive(Debug)]
pub struct LaboratoryRepository {
    list: KeyedList<Laboratory>,
}

impl LaboratoryRepository {
    pub fn new(policy: DuplicatePolicy) -> Self {
        LaboratoryRepository {
            list: KeyedList::new("name", name, policy),
        }
    }

    pub fn insert(&self, lab: Laboratory) -> CoreResult<Arc<Laboratory>> {
        let lab = self.list.insert(lab)?;
        debug!(name = %lab.name, city = %lab.city, "Registered laboratory");
        Ok(lab)
    }

    pub fn find_by_name(&self, name: &str) -> Option<Arc<Laboratory>> {
        self.list.find(name)
    }

    pub fn all(&self) -> Vec<Arc<Laboratory>> {
        self.list.all()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
