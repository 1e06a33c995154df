//! # Pharmacy
//!
//! The session facade: registries, catalog lookup, sale finalization and
//! reporting behind one handle.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Sale                                             │
//! │                                                                         │
//! │  begin_sale("123.456.789-00")                                          │
//! │       │  customer lookup ──✗──► CustomerNotFound (no cart opened)      │
//! │       ▼                                                                 │
//! │  Cart                                                                  │
//! │       │                                                                 │
//! │  add_item_by_name(&mut cart, "Tamoxifeno")   (repeat)                  │
//! │       │  catalog lookup ──✗──► DrugNotFound (cart unchanged)           │
//! │       ▼                                                                 │
//! │  finalize_sale(cart)                                                   │
//! │       │  empty ──✗──► EmptyCart (nothing recorded)                     │
//! │       │  DiscountPolicy::apply(subtotal, age today)                    │
//! │       ▼                                                                 │
//! │  SalesLog.append(sale) ──► Arc<Sale>                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use drogaria_core::report::{drug_listing, sorted_by_name};
use drogaria_core::{
    Cart, CoreError, CoreResult, Customer, DailyStatistics, DiscountPolicy, Drug, DrugFilter,
    Laboratory, Money, NewDrug, NewLaboratory, Sale, SalesReport,
};
use tracing::{debug, info, warn};

use crate::error::StoreResult;
use crate::export;
use crate::registry::customer::CustomerRepository;
use crate::registry::drug::DrugRepository;
use crate::registry::laboratory::LaboratoryRepository;
use crate::registry::sales::SalesLog;
use crate::registry::DuplicatePolicy;

// =============================================================================
// Configuration
// =============================================================================

/// Pharmacy configuration.
///
/// ## Example
/// ```rust
/// use drogaria_store::{DuplicatePolicy, PharmacyConfig};
///
/// let config = PharmacyConfig::new().duplicate_policy(DuplicatePolicy::Allow);
/// assert_eq!(config.duplicates, DuplicatePolicy::Allow);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PharmacyConfig {
    /// Applies to all three registries.
    pub duplicates: DuplicatePolicy,

    /// Discount rules applied at finalization.
    pub discounts: DiscountPolicy,
}

impl PharmacyConfig {
    pub fn new() -> Self {
        PharmacyConfig::default()
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn discount_policy(mut self, policy: DiscountPolicy) -> Self {
        self.discounts = policy;
        self
    }
}

// =============================================================================
// Pharmacy
// =============================================================================

/// Main handle for one session's state.
///
/// Every method takes `&self`; each registry serializes its own writers,
/// so a `Pharmacy` can be shared behind an `Arc`.
#[derive(Debug)]
pub struct Pharmacy {
    customers: CustomerRepository,
    drugs: DrugRepository,
    laboratories: LaboratoryRepository,
    sales: SalesLog,
    discounts: DiscountPolicy,
}

impl Default for Pharmacy {
    fn default() -> Self {
        Pharmacy::new(PharmacyConfig::default())
    }
}

impl Pharmacy {
    pub fn new(config: PharmacyConfig) -> Self {
        info!(
            duplicates = ?config.duplicates,
            senior_age = config.discounts.senior_age_threshold,
            bulk_threshold = %config.discounts.bulk_threshold,
            "Opening pharmacy session"
        );

        Pharmacy {
            customers: CustomerRepository::new(config.duplicates),
            drugs: DrugRepository::new(config.duplicates),
            laboratories: LaboratoryRepository::new(config.duplicates),
            sales: SalesLog::new(),
            discounts: config.discounts,
        }
    }

    // -------------------------------------------------------------------------
    // Repository access
    // -------------------------------------------------------------------------

    pub fn customers(&self) -> &CustomerRepository {
        &self.customers
    }

    pub fn drugs(&self) -> &DrugRepository {
        &self.drugs
    }

    pub fn laboratories(&self) -> &LaboratoryRepository {
        &self.laboratories
    }

    pub fn sales(&self) -> &SalesLog {
        &self.sales
    }

    pub fn discount_policy(&self) -> &DiscountPolicy {
        &self.discounts
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    /// Registers a customer from counter input.
    ///
    /// ## Errors
    /// - `DateParse` if `birth_date` is not `dd/mm/yyyy`
    /// - `Validation` for an empty or oversized CPF or name, or a duplicate CPF
    pub fn register_customer(
        &self,
        cpf: &str,
        name: &str,
        birth_date: &str,
    ) -> CoreResult<Arc<Customer>> {
        let customer = Customer::new(cpf, name, birth_date)?;
        self.customers.insert(customer)
    }

    pub fn register_drug(&self, input: NewDrug) -> CoreResult<Arc<Drug>> {
        let drug = Drug::new(input)?;
        self.drugs.insert(drug)
    }

    pub fn register_laboratory(&self, input: NewLaboratory) -> CoreResult<Arc<Laboratory>> {
        let lab = Laboratory::new(input)?;
        self.laboratories.insert(lab)
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    pub fn find_customer(&self, cpf: &str) -> CoreResult<Arc<Customer>> {
        self.customers
            .find_by_cpf(cpf)
            .ok_or_else(|| CoreError::CustomerNotFound(cpf.to_string()))
    }

    pub fn find_drug(&self, name: &str) -> CoreResult<Arc<Drug>> {
        self.drugs
            .find_by_name(name)
            .ok_or_else(|| CoreError::DrugNotFound(name.to_string()))
    }

    pub fn find_laboratory(&self, name: &str) -> CoreResult<Arc<Laboratory>> {
        self.laboratories
            .find_by_name(name)
            .ok_or_else(|| CoreError::LaboratoryNotFound(name.to_string()))
    }

    // -------------------------------------------------------------------------
    // Sales
    // -------------------------------------------------------------------------

    /// Opens a cart for the customer with this CPF.
    pub fn begin_sale(&self, cpf: &str) -> CoreResult<Cart> {
        let customer = self.find_customer(cpf)?;
        debug!(cpf = %cpf, customer = %customer.name, "Opened cart");
        Ok(Cart::new(customer, Utc::now()))
    }

    /// Looks `name` up in the catalog and adds one unit to `cart`.
    ///
    /// On `DrugNotFound` the cart is left untouched so the operator can
    /// retype the name.
    pub fn add_item_by_name(&self, cart: &mut Cart, name: &str) -> CoreResult<Arc<Drug>> {
        let drug = self.find_drug(name)?;
        cart.add_item(Arc::clone(&drug));
        Ok(drug)
    }

    /// Finalizes `cart` at the current time.
    pub fn finalize_sale(&self, cart: Cart) -> CoreResult<Arc<Sale>> {
        self.finalize_sale_at(cart, Utc::now())
    }

    /// Finalizes `cart` as of `now`.
    ///
    /// The customer's age for the senior rule is taken on `now`'s date.
    ///
    /// ## Errors
    /// `EmptyCart` if no item was added; nothing is recorded.
    pub fn finalize_sale_at(&self, cart: Cart, now: DateTime<Utc>) -> CoreResult<Arc<Sale>> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        if let Some(alert) = cart.prescription_alert() {
            warn!(
                cpf = %cart.customer().cpf,
                drugs = ?alert.drug_names,
                "Sale includes prescription-controlled items"
            );
        }

        let sale = self.sales.append(cart.checkout(&self.discounts, now));
        info!(
            sale_id = %sale.id,
            cpf = %sale.customer.cpf,
            items = sale.item_count(),
            subtotal = %sale.subtotal,
            total = %sale.total,
            discounts = ?sale.discount_labels(),
            "Sale finalized"
        );
        Ok(sale)
    }

    // -------------------------------------------------------------------------
    // Reporting
    // -------------------------------------------------------------------------

    /// Runs `f` over a report of the sales recorded so far.
    pub fn with_report<R>(&self, f: impl FnOnce(&SalesReport<'_>) -> R) -> R {
        let sales = self.sales.snapshot();
        f(&SalesReport::new(&sales))
    }

    pub fn statistics(&self) -> DailyStatistics {
        self.with_report(|r| r.statistics())
    }

    pub fn top_seller(&self) -> Option<String> {
        self.with_report(|r| r.top_seller())
    }

    pub fn distinct_customers_served(&self) -> usize {
        self.with_report(|r| r.distinct_customers_served())
    }

    pub fn controlled_sales_count(&self) -> usize {
        self.with_report(|r| r.controlled_sales_count())
    }

    pub fn non_controlled_sales_count(&self) -> usize {
        self.with_report(|r| r.non_controlled_sales_count())
    }

    /// Sum of undiscounted unit prices over every item sold.
    pub fn total_revenue(&self) -> Money {
        self.with_report(|r| r.total_revenue())
    }

    pub fn total_sales_count(&self) -> usize {
        self.sales.len()
    }

    /// Customers sorted by name.
    pub fn customer_listing(&self) -> Vec<Arc<Customer>> {
        sorted_by_name(&self.customers.all())
    }

    /// Drugs in `filter`, sorted by name.
    pub fn drug_listing(&self, filter: DrugFilter) -> Vec<Arc<Drug>> {
        drug_listing(&self.drugs.all(), filter)
    }

    /// Laboratories sorted by name.
    pub fn laboratory_listing(&self) -> Vec<Arc<Laboratory>> {
        sorted_by_name(&self.laboratories.all())
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    /// Writes every registered customer to a CSV file at `path`.
    ///
    /// Returns the number of rows written.
    pub fn export_customers(&self, path: impl AsRef<Path>) -> StoreResult<usize> {
        export::export_customers_to_path(path.as_ref(), &self.customers.all())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use drogaria_core::{DrugCategory, ValidationError};

    fn new_drug(name: &str, cents: i64, category: DrugCategory, rx: bool) -> NewDrug {
        NewDrug {
            name: name.to_string(),
            active_compound: "composto".to_string(),
            manufacturer: "EMS".to_string(),
            description: String::new(),
            unit_price: Money::from_cents(cents),
            category,
            prescription_required: rx,
        }
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 15, 30, 0).unwrap()
    }

    fn seeded() -> Pharmacy {
        let pharmacy = Pharmacy::default();
        pharmacy.register_customer("111", "Ana", "05/05/1990").unwrap();
        pharmacy.register_customer("222", "Bento", "10/10/1950").unwrap();
        pharmacy
            .register_drug(new_drug("Tamoxifeno", 10_000, DrugCategory::Chemotherapy, true))
            .unwrap();
        pharmacy
            .register_drug(new_drug("Camomila", 1_500, DrugCategory::Herbal, false))
            .unwrap();
        pharmacy
    }

    #[test]
    fn test_registered_customer_found_unchanged() {
        let pharmacy = seeded();
        let found = pharmacy.find_customer("111").unwrap();
        assert_eq!(found.name, "Ana");
        assert_eq!(
            found.birth_date,
            chrono::NaiveDate::from_ymd_opt(1990, 5, 5).unwrap()
        );
    }

    #[test]
    fn test_price_above_cap_rejected() {
        let pharmacy = seeded();
        let huge: Money = "92233720368547758.07".parse().unwrap();
        let mut input = new_drug("Ouro", 0, DrugCategory::Herbal, false);
        input.unit_price = huge;

        let err = pharmacy.register_drug(input).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert!(pharmacy.find_drug("Ouro").is_err());
    }

    #[test]
    fn test_capped_prices_total_without_overflow() {
        let pharmacy = seeded();
        pharmacy
            .register_drug(new_drug(
                "Ouro",
                drogaria_core::validation::MAX_PRICE.cents(),
                DrugCategory::Herbal,
                false,
            ))
            .unwrap();

        let mut cart = pharmacy.begin_sale("111").unwrap();
        pharmacy.add_item_by_name(&mut cart, "Ouro").unwrap();
        pharmacy.add_item_by_name(&mut cart, "Ouro").unwrap();
        pharmacy.finalize_sale_at(cart, at(2026, 10, 19)).unwrap();

        assert_eq!(pharmacy.total_revenue(), Money::from_cents(200_000_000));
    }

    #[test]
    fn test_begin_sale_unknown_customer() {
        let pharmacy = seeded();
        let err = pharmacy.begin_sale("999").unwrap_err();
        assert!(matches!(err, CoreError::CustomerNotFound(cpf) if cpf == "999"));
    }

    #[test]
    fn test_unknown_drug_leaves_cart_unchanged() {
        let pharmacy = seeded();
        let mut cart = pharmacy.begin_sale("111").unwrap();
        pharmacy.add_item_by_name(&mut cart, "Camomila").unwrap();

        let err = pharmacy.add_item_by_name(&mut cart, "camomila").unwrap_err();
        assert!(matches!(err, CoreError::DrugNotFound(_)));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_empty_cart_is_not_recorded() {
        let pharmacy = seeded();
        let cart = pharmacy.begin_sale("111").unwrap();
        let err = pharmacy.finalize_sale(cart).unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
        assert!(pharmacy.sales().is_empty());
    }

    #[test]
    fn test_finalize_applies_discounts_and_records() {
        let pharmacy = seeded();
        let mut cart = pharmacy.begin_sale("222").unwrap();
        pharmacy.add_item_by_name(&mut cart, "Tamoxifeno").unwrap();
        pharmacy.add_item_by_name(&mut cart, "Tamoxifeno").unwrap();
        assert!(cart.prescription_alert().is_some());

        let sale = pharmacy.finalize_sale_at(cart, at(2026, 10, 19)).unwrap();
        assert_eq!(sale.total, Money::from_cents(14_400));
        assert_eq!(
            sale.discount_labels(),
            vec!["20% senior discount", "10% bulk discount"]
        );
        assert_eq!(pharmacy.total_sales_count(), 1);
        assert!(Arc::ptr_eq(&pharmacy.sales().snapshot()[0], &sale));
    }

    #[test]
    fn test_custom_discount_policy_is_used() {
        let config = PharmacyConfig::new().discount_policy(DiscountPolicy {
            bulk_threshold: Money::from_cents(1_000),
            ..DiscountPolicy::default()
        });
        let pharmacy = Pharmacy::new(config);
        pharmacy.register_customer("1", "Caio", "01/01/2000").unwrap();
        pharmacy
            .register_drug(new_drug("Camomila", 1_500, DrugCategory::Herbal, false))
            .unwrap();

        let mut cart = pharmacy.begin_sale("1").unwrap();
        pharmacy.add_item_by_name(&mut cart, "Camomila").unwrap();
        let sale = pharmacy.finalize_sale_at(cart, at(2026, 1, 1)).unwrap();
        assert_eq!(sale.total, Money::from_cents(1_350));
    }

    #[test]
    fn test_duplicate_cpf_rejected_by_default() {
        let pharmacy = seeded();
        let err = pharmacy.register_customer("111", "Outra Ana", "01/01/1991").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
        assert_eq!(pharmacy.find_customer("111").unwrap().name, "Ana");
    }

    #[test]
    fn test_duplicate_allowed_first_match_wins() {
        let pharmacy =
            Pharmacy::new(PharmacyConfig::new().duplicate_policy(DuplicatePolicy::Allow));
        pharmacy.register_customer("111", "Ana", "01/01/1990").unwrap();
        pharmacy.register_customer("111", "Outra Ana", "01/01/1991").unwrap();

        assert_eq!(pharmacy.customers().len(), 2);
        assert_eq!(pharmacy.find_customer("111").unwrap().name, "Ana");
    }

    #[test]
    fn test_bad_birth_date_registers_nothing() {
        let pharmacy = Pharmacy::default();
        let err = pharmacy.register_customer("1", "Dora", "1990-01-01").unwrap_err();
        assert!(matches!(err, CoreError::DateParse { .. }));
        assert!(pharmacy.customers().is_empty());
    }

    #[test]
    fn test_statistics_over_session() {
        let pharmacy = seeded();
        let now = at(2026, 10, 19);

        let mut cart = pharmacy.begin_sale("111").unwrap();
        pharmacy.add_item_by_name(&mut cart, "Camomila").unwrap();
        pharmacy.finalize_sale_at(cart, now).unwrap();

        let mut cart = pharmacy.begin_sale("111").unwrap();
        pharmacy.add_item_by_name(&mut cart, "Camomila").unwrap();
        pharmacy.add_item_by_name(&mut cart, "Tamoxifeno").unwrap();
        pharmacy.finalize_sale_at(cart, now).unwrap();

        let stats = pharmacy.statistics();
        assert_eq!(stats.top_seller.as_deref(), Some("Camomila"));
        assert_eq!(stats.distinct_customers_served, 1);
        assert_eq!(stats.controlled_sales_count, 1);
        assert_eq!(stats.non_controlled_sales_count, 2);
        assert_eq!(stats.total_sales_count, 2);
        assert_eq!(stats.total_revenue, Money::from_cents(13_000));

        assert_eq!(pharmacy.top_seller().as_deref(), Some("Camomila"));
        assert_eq!(pharmacy.total_revenue(), Money::from_cents(13_000));
    }

    #[test]
    fn test_empty_session_statistics() {
        let pharmacy = Pharmacy::default();
        assert_eq!(pharmacy.top_seller(), None);
        assert_eq!(pharmacy.distinct_customers_served(), 0);
        assert_eq!(pharmacy.controlled_sales_count(), 0);
        assert_eq!(pharmacy.non_controlled_sales_count(), 0);
        assert_eq!(pharmacy.total_revenue(), Money::zero());
    }

    #[test]
    fn test_listings_are_sorted() {
        let pharmacy = seeded();
        pharmacy
            .register_laboratory(NewLaboratory {
                name: "Medley".into(),
                ..NewLaboratory::default()
            })
            .unwrap();
        pharmacy
            .register_laboratory(NewLaboratory {
                name: "Eurofarma".into(),
                ..NewLaboratory::default()
            })
            .unwrap();

        let names: Vec<_> = pharmacy.drug_listing(DrugFilter::All).iter().map(|d| d.name.clone()).collect();
        assert_eq!(names, vec!["Camomila", "Tamoxifeno"]);

        let chemo = pharmacy.drug_listing(DrugFilter::Chemotherapy);
        assert_eq!(chemo.len(), 1);
        assert_eq!(chemo[0].name, "Tamoxifeno");

        let labs: Vec<_> = pharmacy.laboratory_listing().iter().map(|l| l.name.clone()).collect();
        assert_eq!(labs, vec!["Eurofarma", "Medley"]);

        let customers: Vec<_> = pharmacy.customer_listing().iter().map(|c| c.name.clone()).collect();
        assert_eq!(customers, vec!["Ana", "Bento"]);
        assert!(pharmacy.find_laboratory("Medley").is_ok());
        assert!(matches!(
            pharmacy.find_laboratory("Cristália"),
            Err(CoreError::LaboratoryNotFound(_))
        ));
    }
}
