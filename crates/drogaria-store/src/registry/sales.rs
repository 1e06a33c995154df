//! # Sales Log
//!
//! Append-only record of finalized sales for the session.
//!
//! ```text
//! finalize ──► append(sale) ──► [sale₁, sale₂, ...] ──► SalesReport
//! ```
//!
//! There is no update or delete; a sale is final the moment it lands here.

use std::sync::{Arc, Mutex};

use drogaria_core::Sale;

use super::lock;

#[derive(Debug, Default)]
pub struct SalesLog {
    sales: Mutex<Vec<Arc<Sale>>>,
}

impl SalesLog {
    pub fn new() -> Self {
        SalesLog::default()
    }

    /// Records a finalized sale.
    pub fn append(&self, sale: Sale) -> Arc<Sale> {
        let sale = Arc::new(sale);
        lock(&self.sales).push(Arc::clone(&sale));
        sale
    }

    /// All sales so far, oldest first.
    pub fn snapshot(&self) -> Vec<Arc<Sale>> {
        lock(&self.sales).clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.sales).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
