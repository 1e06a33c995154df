//! # Reports
//!
//! Read-only views over the sales log and the registries.
//!
//! ## Daily Statistics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sales log ──► SalesReport ──┬──► top_seller()            Option<name>  │
//! │  (&[Arc<Sale>])              ├──► distinct_customers_served()  usize    │
//! │                              ├──► controlled_sales_count()      usize   │
//! │                              ├──► non_controlled_sales_count()  usize   │
//! │                              ├──► total_revenue()               Money   │
//! │                              └──► total_sales_count()           usize   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is recomputed from the log on every call; there is no cached
//! or incremental state, so two calls without a sale in between agree.
//!
//! Two counts deserve a note:
//! - a sale with both prescription and non-prescription items counts
//!   toward BOTH `controlled_sales_count` and `non_controlled_sales_count`
//! - `total_revenue` sums undiscounted unit prices item by item; it is
//!   not the sum of `Sale::total`

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;

use crate::money::Money;
use crate::types::{Customer, Drug, DrugCategory, Laboratory, Sale};

// =============================================================================
// Sales statistics
// =============================================================================

/// Statistics over a slice of completed sales.
#[derive(Debug, Clone, Copy)]
pub struct SalesReport<'a> {
    sales: &'a [Arc<Sale>],
}

impl<'a> SalesReport<'a> {
    pub fn new(sales: &'a [Arc<Sale>]) -> Self {
        SalesReport { sales }
    }

    /// Name of the drug sold the most units.
    ///
    /// Ties go to the drug that first appeared in the log. `None` when
    /// nothing was sold.
    pub fn top_seller(&self) -> Option<String> {
        // (name, count) in first-seen order; the index keeps lookups O(1)
        let mut counts: Vec<(&str, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for drug in self.sales.iter().flat_map(|s| s.items.iter()) {
            match index.get(drug.name.as_str()).copied() {
                Some(i) => counts[i].1 += 1,
                None => {
                    index.insert(drug.name.as_str(), counts.len());
                    counts.push((drug.name.as_str(), 1));
                }
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for (name, count) in counts {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((name, count));
            }
        }
        best.map(|(name, _)| name.to_string())
    }

    /// Number of different customers (by identity) with at least one sale.
    pub fn distinct_customers_served(&self) -> usize {
        self.sales
            .iter()
            .map(|s| s.customer.id)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Sales containing at least one prescription item.
    pub fn controlled_sales_count(&self) -> usize {
        self.sales.iter().filter(|s| s.has_controlled_item()).count()
    }

    /// Sales containing at least one non-prescription item.
    pub fn non_controlled_sales_count(&self) -> usize {
        self.sales
            .iter()
            .filter(|s| s.has_non_controlled_item())
            .count()
    }

    /// Undiscounted unit prices of every item of every sale.
    pub fn total_revenue(&self) -> Money {
        self.sales
            .iter()
            .flat_map(|s| s.items.iter())
            .map(|d| d.unit_price)
            .sum()
    }

    pub fn total_sales_count(&self) -> usize {
        self.sales.len()
    }

    /// All six figures at once.
    pub fn statistics(&self) -> DailyStatistics {
        DailyStatistics {
            top_seller: self.top_seller(),
            distinct_customers_served: self.distinct_customers_served(),
            controlled_sales_count: self.controlled_sales_count(),
            non_controlled_sales_count: self.non_controlled_sales_count(),
            total_sales_count: self.total_sales_count(),
            total_revenue: self.total_revenue(),
        }
    }
}

/// Snapshot of the day's figures, as printed by the reports menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyStatistics {
    /// `None` means "no medication sold".
    pub top_seller: Option<String>,
    pub distinct_customers_served: usize,
    pub controlled_sales_count: usize,
    pub non_controlled_sales_count: usize,
    pub total_sales_count: usize,
    pub total_revenue: Money,
}

// =============================================================================
// Listings
// =============================================================================

/// Entities listed alphabetically.
pub trait Named {
    fn sort_name(&self) -> &str;
}

impl Named for Customer {
    fn sort_name(&self) -> &str {
        &self.name
    }
}

impl Named for Drug {
    fn sort_name(&self) -> &str {
        &self.name
    }
}

impl Named for Laboratory {
    fn sort_name(&self) -> &str {
        &self.name
    }
}

/// Copies of the references sorted by name (byte-wise, ascending).
///
/// The sort is stable: equal names keep registration order.
pub fn sorted_by_name<T: Named>(items: &[Arc<T>]) -> Vec<Arc<T>> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| a.sort_name().cmp(b.sort_name()));
    sorted
}

/// Which drugs a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrugFilter {
    #[default]
    All,
    Chemotherapy,
    Herbal,
}

impl DrugFilter {
    pub fn matches(&self, drug: &Drug) -> bool {
        match self {
            DrugFilter::All => true,
            DrugFilter::Chemotherapy => drug.category == DrugCategory::Chemotherapy,
            DrugFilter::Herbal => drug.category == DrugCategory::Herbal,
        }
    }
}

/// Drugs passing `filter`, sorted by name.
pub fn drug_listing(drugs: &[Arc<Drug>], filter: DrugFilter) -> Vec<Arc<Drug>> {
    let mut selected: Vec<Arc<Drug>> = drugs
        .iter()
        .filter(|d| filter.matches(d))
        .cloned()
        .collect();
    selected.sort_by(|a, b| a.name.cmp(&b.name));
    selected
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::discount::DiscountPolicy;
    use crate::types::NewDrug;
    use chrono::{TimeZone, Utc};

    fn customer(cpf: &str, name: &str) -> Arc<Customer> {
        Arc::new(Customer::new(cpf, name, "01/01/1980").unwrap())
    }

    fn drug(name: &str, cents: i64, category: DrugCategory, rx: bool) -> Arc<Drug> {
        Arc::new(
            Drug::new(NewDrug {
                name: name.to_string(),
                active_compound: String::new(),
                manufacturer: String::new(),
                description: String::new(),
                unit_price: Money::from_cents(cents),
                category,
                prescription_required: rx,
            })
            .unwrap(),
        )
    }

    fn sale(customer: &Arc<Customer>, items: &[&Arc<Drug>]) -> Arc<Sale> {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();
        let mut cart = Cart::new(Arc::clone(customer), now);
        for item in items {
            cart.add_item(Arc::clone(item));
        }
        Arc::new(cart.checkout(&DiscountPolicy::default(), now))
    }

    #[test]
    fn test_empty_log_yields_zeroes() {
        let report = SalesReport::new(&[]);
        assert_eq!(report.total_revenue(), Money::zero());
        assert_eq!(report.total_sales_count(), 0);
        assert_eq!(report.top_seller(), None);
        assert_eq!(report.distinct_customers_served(), 0);
        assert_eq!(report.controlled_sales_count(), 0);
        assert_eq!(report.non_controlled_sales_count(), 0);
    }

    #[test]
    fn test_controlled_and_non_controlled_counts() {
        let ana = customer("1", "Ana");
        let rx = drug("Metotrexato", 5000, DrugCategory::Chemotherapy, true);
        let otc = drug("Guaco", 900, DrugCategory::Herbal, false);

        let sales = vec![sale(&ana, &[&rx]), sale(&ana, &[&otc])];
        let report = SalesReport::new(&sales);
        assert_eq!(report.controlled_sales_count(), 1);
        assert_eq!(report.non_controlled_sales_count(), 1);
    }

    #[test]
    fn test_mixed_sale_counts_toward_both() {
        let ana = customer("1", "Ana");
        let rx = drug("Metotrexato", 5000, DrugCategory::Chemotherapy, true);
        let chemo_otc = drug("Paracetamol", 700, DrugCategory::Chemotherapy, false);

        let sales = vec![sale(&ana, &[&rx, &chemo_otc])];
        let report = SalesReport::new(&sales);
        assert_eq!(report.controlled_sales_count(), 1);
        assert_eq!(report.non_controlled_sales_count(), 1);
        assert_eq!(report.total_sales_count(), 1);
    }

    #[test]
    fn test_revenue_ignores_discounts() {
        let ana = customer("1", "Ana");
        let pricey = drug("Imatinibe", 20_000, DrugCategory::Chemotherapy, true);

        let sales = vec![sale(&ana, &[&pricey])];
        assert_eq!(sales[0].total, Money::from_cents(18_000));
        assert_eq!(SalesReport::new(&sales).total_revenue(), Money::from_cents(20_000));
    }

    #[test]
    fn test_top_seller_counts_units_and_breaks_ties_by_first_seen() {
        let ana = customer("1", "Ana");
        let guaco = drug("Guaco", 900, DrugCategory::Herbal, false);
        let boldo = drug("Boldo", 600, DrugCategory::Herbal, false);

        let tied = vec![sale(&ana, &[&guaco, &boldo]), sale(&ana, &[&boldo, &guaco])];
        assert_eq!(SalesReport::new(&tied).top_seller().as_deref(), Some("Guaco"));

        let boldo_wins = vec![sale(&ana, &[&guaco]), sale(&ana, &[&boldo, &boldo])];
        assert_eq!(SalesReport::new(&boldo_wins).top_seller().as_deref(), Some("Boldo"));
    }

    #[test]
    fn test_distinct_customers_by_identity_not_name() {
        let ana = customer("1", "Ana");
        let other_ana = customer("2", "Ana");
        let guaco = drug("Guaco", 900, DrugCategory::Herbal, false);

        let sales = vec![
            sale(&ana, &[&guaco]),
            sale(&ana, &[&guaco]),
            sale(&other_ana, &[&guaco]),
        ];
        assert_eq!(SalesReport::new(&sales).distinct_customers_served(), 2);
    }

    #[test]
    fn test_statistics_are_idempotent() {
        let ana = customer("1", "Ana");
        let guaco = drug("Guaco", 900, DrugCategory::Herbal, false);
        let sales = vec![sale(&ana, &[&guaco, &guaco])];

        let report = SalesReport::new(&sales);
        let first = report.statistics();
        assert_eq!(first, report.statistics());
        assert_eq!(first.total_revenue, Money::from_cents(1_800));

        let json = serde_json::to_value(&first).unwrap();
        assert_eq!(json["top_seller"], "Guaco");
        assert_eq!(json["total_revenue"], 1_800);
    }

    #[test]
    fn test_listings_sort_by_ordinal_name() {
        let customers = vec![customer("1", "bruno"), customer("2", "Carla"), customer("3", "Ana")];
        let names: Vec<_> = sorted_by_name(&customers)
            .iter()
            .map(|c| c.name.clone())
            .collect();
        // ordinal: uppercase sorts before lowercase
        assert_eq!(names, vec!["Ana", "Carla", "bruno"]);
    }

    #[test]
    fn test_drug_listing_filters_by_category() {
        let drugs = vec![
            drug("Tamoxifeno", 4000, DrugCategory::Chemotherapy, true),
            drug("Guaco", 900, DrugCategory::Herbal, false),
            drug("Anastrozol", 8000, DrugCategory::Chemotherapy, false),
        ];

        let chemo: Vec<_> = drug_listing(&drugs, DrugFilter::Chemotherapy)
            .iter()
            .map(|d| d.name.clone())
            .collect();
        assert_eq!(chemo, vec!["Anastrozol", "Tamoxifeno"]);

        assert_eq!(drug_listing(&drugs, DrugFilter::Herbal).len(), 1);
        assert_eq!(drug_listing(&drugs, DrugFilter::All)[0].name, "Anastrozol");
    }
}
