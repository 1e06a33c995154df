//! # Customer Repository
//!
//! Customers keyed by CPF.

use std::sync::Arc;

use drogaria_core::{CoreResult, Customer};
use tracing::debug;

use super::{DuplicatePolicy, KeyedList};

fn cpf(customer: &Customer) -> &str {
    &customer.cpf
}

/// Registered customers, in registration order.
///
/// ## Usage
/// ```rust
/// use drogaria_core::Customer;
/// use drogaria_store::{CustomerRepository, DuplicatePolicy};
///
/// let repo = CustomerRepository::new(DuplicatePolicy::Reject);
/// repo.insert(Customer::new("123", "Ana", "01/02/1990").unwrap()).unwrap();
/// assert_eq!(repo.find_by_cpf("123").unwrap().name, "Ana");
/// ```
#[derive(Debug)]
pub struct CustomerRepository {
    list: KeyedList<Customer>,
}

impl CustomerRepository {
    pub fn new(policy: DuplicatePolicy) -> Self {
        CustomerRepository {
            list: KeyedList::new("cpf", cpf, policy),
        }
    }

    /// Registers a customer.
    ///
    /// ## Errors
    /// `Duplicate` if the CPF is taken and the policy is `Reject`.
    pub fn insert(&self, customer: Customer) -> CoreResult<Arc<Customer>> {
        let customer = self.list.insert(customer)?;
        debug!(cpf = %customer.cpf, id = %customer.id, "Registered customer");
        Ok(customer)
    }

    /// First customer whose CPF equals `cpf` exactly.
    pub fn find_by_cpf(&self, cpf: &str) -> Option<Arc<Customer>> {
        let found = self.list.find(cpf);
        debug!(cpf = %cpf, found = found.is_some(), "Customer lookup");
        found
    }

    pub fn all(&self) -> Vec<Arc<Customer>> {
        self.list.all()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
