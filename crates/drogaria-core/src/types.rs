//! # Domain Types
//!
//! Core domain types used throughout Drogaria POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │      Drug       │   │   Laboratory    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  cpf (business) │   │  name (business)│   │  name (business)│       │
//! │  │  birth_date     │   │  unit_price     │   │  address, phone │       │
//! │  └────────┬────────┘   │  category       │   └─────────────────┘       │
//! │           │            │  prescription_  │                             │
//! │           │            │    required     │                             │
//! │           │            └────────┬────────┘                             │
//! │           │ Arc                 │ Arc (shared, read-only)              │
//! │           ▼                     ▼                                      │
//! │  ┌──────────────────────────────────────────┐                          │
//! │  │  Sale: customer + items + subtotal/total │                          │
//! │  └──────────────────────────────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 assigned at registration, used for identity
//!   ("distinct customers served" counts UUIDs, not names)
//! - Business key: CPF, drug name or laboratory name, used for lookup

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates::{age_in_years, parse_birth_date};
use crate::discount::AppliedDiscount;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_cpf, validate_name, validate_price};

// =============================================================================
// Customer
// =============================================================================

/// A registered pharmacy customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Identity (UUID v4).
    pub id: Uuid,

    /// Taxpayer ID (CPF) - business key, only checked for non-emptiness.
    pub cpf: String,

    /// Full name, used for alphabetical listings.
    pub name: String,

    /// Always present: unparseable dates are refused at registration.
    pub birth_date: NaiveDate,
}

impl Customer {
    /// Builds a customer from raw registration input.
    ///
    /// ## Errors
    /// - `Validation` when the CPF or name is empty
    /// - `DateParse` when `birth_date` is not `dd/mm/yyyy`
    pub fn new(cpf: &str, name: &str, birth_date: &str) -> CoreResult<Self> {
        validate_cpf(cpf)?;
        validate_name("customer name", name)?;
        let birth_date = parse_birth_date(birth_date)?;

        Ok(Customer {
            id: Uuid::new_v4(),
            cpf: cpf.trim().to_string(),
            name: name.trim().to_string(),
            birth_date,
        })
    }

    /// Whole years of age on `today` (elapsed days / 365, floored).
    #[inline]
    pub fn age_on(&self, today: NaiveDate) -> i64 {
        age_in_years(self.birth_date, today)
    }
}

// =============================================================================
// Drug Category
// =============================================================================

/// The two drug families the pharmacy stocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrugCategory {
    /// Synthetic drugs; may require a prescription.
    Chemotherapy,
    /// Plant-based remedies; never require a prescription.
    Herbal,
}

impl DrugCategory {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DrugCategory::Chemotherapy => "chemotherapy",
            DrugCategory::Herbal => "herbal",
        }
    }
}

impl fmt::Display for DrugCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; also accepts the Portuguese terms used at the counter.
impl FromStr for DrugCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chemotherapy" | "quimioterápico" | "quimioterapico" => {
                Ok(DrugCategory::Chemotherapy)
            }
            "herbal" | "fitoterápico" | "fitoterapico" => Ok(DrugCategory::Herbal),
            _ => Err(CoreError::InvalidCategory(s.trim().to_string())),
        }
    }
}

// =============================================================================
// Drug
// =============================================================================

/// Registration input for a drug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDrug {
    pub name: String,
    pub active_compound: String,
    pub manufacturer: String,
    pub description: String,
    pub unit_price: Money,
    pub category: DrugCategory,
    /// Ignored for herbal drugs.
    pub prescription_required: bool,
}

/// A drug available for sale. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drug {
    /// Identity (UUID v4).
    pub id: Uuid,

    /// Business key; lookups are exact and case-sensitive.
    pub name: String,

    /// Main active compound.
    pub active_compound: String,

    /// Manufacturer name. Matches `Laboratory.name` by convention only.
    pub manufacturer: String,

    pub description: String,

    /// Price per unit, never negative.
    pub unit_price: Money,

    pub category: DrugCategory,

    /// Controlled item: the sale must be checked against a prescription.
    pub prescription_required: bool,
}

impl Drug {
    /// Validates the input and builds the drug.
    ///
    /// Herbal drugs never require a prescription, whatever the input says.
    pub fn new(input: NewDrug) -> CoreResult<Self> {
        validate_name("drug name", &input.name)?;
        validate_price(input.unit_price)?;

        let prescription_required = match input.category {
            DrugCategory::Chemotherapy => input.prescription_required,
            DrugCategory::Herbal => false,
        };

        Ok(Drug {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            active_compound: input.active_compound.trim().to_string(),
            manufacturer: input.manufacturer.trim().to_string(),
            description: input.description.trim().to_string(),
            unit_price: input.unit_price,
            category: input.category,
            prescription_required,
        })
    }
}

// =============================================================================
// Laboratory
// =============================================================================

/// Registration input for a laboratory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLaboratory {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub city: String,
    pub state: String,
}

/// A drug manufacturer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Laboratory {
    pub id: Uuid,
    /// Business key.
    pub name: String,
    pub address: String,
    pub phone: String,
    pub city: String,
    pub state: String,
}

impl Laboratory {
    pub fn new(input: NewLaboratory) -> CoreResult<Self> {
        validate_name("laboratory name", &input.name)?;

        Ok(Laboratory {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            address: input.address.trim().to_string(),
            phone: input.phone.trim().to_string(),
            city: input.city.trim().to_string(),
            state: input.state.trim().to_string(),
        })
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A finalized sale. Immutable once appended to the sales log.
///
/// Drugs and the customer are shared references into the registries;
/// the sale never owns them.
#[derive(Debug, Clone, Serialize)]
pub struct Sale {
    pub id: Uuid,
    pub sold_at: DateTime<Utc>,
    pub customer: Arc<Customer>,
    /// One entry per unit sold, in the order scanned. Repeats allowed.
    pub items: Vec<Arc<Drug>>,
    /// Sum of unit prices before discounts.
    pub subtotal: Money,
    /// Discounts in the order they were applied.
    pub discounts: Vec<AppliedDiscount>,
    /// Subtotal after discounts, rounded to cents.
    pub total: Money,
}

impl Sale {
    /// True if at least one item requires a prescription.
    pub fn has_controlled_item(&self) -> bool {
        self.items.iter().any(|d| d.prescription_required)
    }

    /// True if at least one item does NOT require a prescription.
    ///
    /// A mixed sale is both controlled and non-controlled.
    pub fn has_non_controlled_item(&self) -> bool {
        self.items.iter().any(|d| !d.prescription_required)
    }

    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Labels of the applied discounts, e.g. `["20% senior discount"]`.
    pub fn discount_labels(&self) -> Vec<String> {
        self.discounts.iter().map(|d| d.label()).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
