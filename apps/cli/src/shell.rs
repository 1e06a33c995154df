//! # Menu Shell
//!
//! The operator-facing loop. Reads choices and form fields line by line,
//! calls the [`Pharmacy`] facade, prints results.
//!
//! ## Menus
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MAIN                              REPORTS                              │
//! │  1. Register customer              1. Customers (A-Z)                   │
//! │  2. Register drug                  2. Drugs (A-Z)                       │
//! │  3. Make a sale ──► drug loop      3. Chemotherapy drugs                │
//! │  4. Reports ────────────────────►  4. Herbal drugs                      │
//! │  5. Register laboratory            5. Daily statistics                  │
//! │  6. Exit                           6. Laboratories                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bad input never ends the session: the error is printed and the shell
//! prompts again. End of input ends it like option 6.
//!
//! The shell is generic over `BufRead`/`Write` so tests drive it with
//! byte slices instead of a terminal.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;

use drogaria_core::{Drug, DrugCategory, DrugFilter, Money, NewDrug, NewLaboratory, Sale};
use drogaria_store::Pharmacy;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Closes the drug-entry loop of a sale, in any letter case.
const FINISH_WORD: &str = "sair";

// =============================================================================
// Menu choices
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenu {
    RegisterCustomer,
    RegisterDrug,
    MakeSale,
    Reports,
    RegisterLaboratory,
    Exit,
}

impl MainMenu {
    const ENTRIES: [(MainMenu, &'static str); 6] = [
        (MainMenu::RegisterCustomer, "Register customer"),
        (MainMenu::RegisterDrug, "Register drug"),
        (MainMenu::MakeSale, "Make a sale"),
        (MainMenu::Reports, "Reports"),
        (MainMenu::RegisterLaboratory, "Register laboratory"),
        (MainMenu::Exit, "Exit"),
    ];
}

impl FromStr for MainMenu {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        select(&MainMenu::ENTRIES, s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMenu {
    Customers,
    AllDrugs,
    Chemotherapy,
    Herbal,
    DailyStatistics,
    Laboratories,
}

impl ReportMenu {
    const ENTRIES: [(ReportMenu, &'static str); 6] = [
        (ReportMenu::Customers, "Customers in alphabetical order"),
        (ReportMenu::AllDrugs, "Drugs in alphabetical order"),
        (ReportMenu::Chemotherapy, "Chemotherapy drugs"),
        (ReportMenu::Herbal, "Herbal drugs"),
        (ReportMenu::DailyStatistics, "Today's sales statistics"),
        (ReportMenu::Laboratories, "Registered laboratories"),
    ];
}

impl FromStr for ReportMenu {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        select(&ReportMenu::ENTRIES, s)
    }
}

/// 1-based lookup into a menu table.
fn select<T: Copy>(entries: &[(T, &'static str)], input: &str) -> CliResult<T> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| entries.get(i))
        .map(|(choice, _)| *choice)
        .ok_or_else(|| CliError::invalid_selection(input))
}

/// Whether the session goes on after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    /// Input ran out mid-action.
    Eof,
}

// =============================================================================
// Shell
// =============================================================================

/// Interactive session over an input/output pair.
pub struct Shell<'a, R, W> {
    pharmacy: &'a Pharmacy,
    config: &'a AppConfig,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(pharmacy: &'a Pharmacy, config: &'a AppConfig, input: R, output: W) -> Self {
        Shell {
            pharmacy,
            config,
            input,
            output,
        }
    }

    /// Runs until the operator picks Exit or input ends.
    ///
    /// Only I/O failures on the terminal itself are returned; every
    /// domain error is printed and the loop continues.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "=== {} ===", self.config.store.name)?;

        loop {
            self.print_menu("Main menu", &MainMenu::ENTRIES)?;
            let Some(line) = self.prompt("Choose an option: ")? else {
                break;
            };

            let flow = match line.parse::<MainMenu>() {
                Ok(MainMenu::Exit) => break,
                Ok(MainMenu::RegisterCustomer) => self.register_customer()?,
                Ok(MainMenu::RegisterDrug) => self.register_drug()?,
                Ok(MainMenu::MakeSale) => self.make_sale()?,
                Ok(MainMenu::Reports) => self.reports()?,
                Ok(MainMenu::RegisterLaboratory) => self.register_laboratory()?,
                Err(e) => {
                    self.report(&e)?;
                    Flow::Continue
                }
            };

            if flow == Flow::Eof {
                break;
            }
        }

        writeln!(self.output, "Goodbye!")?;
        self.output.flush()
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    fn register_customer(&mut self) -> io::Result<Flow> {
        let Some(cpf) = self.prompt("Customer CPF: ")? else {
            return Ok(Flow::Eof);
        };
        let Some(name) = self.prompt("Customer name: ")? else {
            return Ok(Flow::Eof);
        };
        let Some(birth) = self.prompt("Birth date (dd/mm/yyyy): ")? else {
            return Ok(Flow::Eof);
        };

        match self.pharmacy.register_customer(&cpf, &name, &birth) {
            Ok(_) => writeln!(self.output, "Customer registered successfully!")?,
            Err(e) => self.report(&e.into())?,
        }
        Ok(Flow::Continue)
    }

    fn register_drug(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Drug name: ")? else {
            return Ok(Flow::Eof);
        };
        let Some(active_compound) = self.prompt("Active compound: ")? else {
            return Ok(Flow::Eof);
        };
        let Some(manufacturer) = self.prompt("Laboratory: ")? else {
            return Ok(Flow::Eof);
        };
        let Some(description) = self.prompt("Description: ")? else {
            return Ok(Flow::Eof);
        };
        let Some(category) = self.prompt("Category (chemotherapy/herbal): ")? else {
            return Ok(Flow::Eof);
        };

        // Reject a bad category before asking anything else.
        let category = match category.parse::<DrugCategory>() {
            Ok(category) => category,
            Err(e) => {
                self.report(&e.into())?;
                return Ok(Flow::Continue);
            }
        };

        let Some(price) = self.prompt("Price (e.g. 12.50): ")? else {
            return Ok(Flow::Eof);
        };
        let unit_price = match price.trim().parse::<Money>() {
            Ok(price) => price,
            Err(e) => {
                self.report(&e.into())?;
                return Ok(Flow::Continue);
            }
        };

        let prescription_required = match category {
            DrugCategory::Chemotherapy => {
                let Some(answer) = self.prompt("Requires prescription? (y/n): ")? else {
                    return Ok(Flow::Eof);
                };
                is_yes(&answer)
            }
            DrugCategory::Herbal => false,
        };

        let input = NewDrug {
            name,
            active_compound,
            manufacturer,
            description,
            unit_price,
            category,
            prescription_required,
        };
        match self.pharmacy.register_drug(input) {
            Ok(_) => writeln!(self.output, "Drug registered successfully!")?,
            Err(e) => self.report(&e.into())?,
        }
        Ok(Flow::Continue)
    }

    fn register_laboratory(&mut self) -> io::Result<Flow> {
        let mut fields = Vec::with_capacity(5);
        for label in ["Laboratory name: ", "Address: ", "Phone: ", "City: ", "State: "] {
            let Some(value) = self.prompt(label)? else {
                return Ok(Flow::Eof);
            };
            fields.push(value);
        }
        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();

        let input = NewLaboratory {
            name: next(),
            address: next(),
            phone: next(),
            city: next(),
            state: next(),
        };
        match self.pharmacy.register_laboratory(input) {
            Ok(_) => writeln!(self.output, "Laboratory registered successfully!")?,
            Err(e) => self.report(&e.into())?,
        }
        Ok(Flow::Continue)
    }

    // -------------------------------------------------------------------------
    // Sale
    // -------------------------------------------------------------------------

    fn make_sale(&mut self) -> io::Result<Flow> {
        let Some(cpf) = self.prompt("Customer CPF: ")? else {
            return Ok(Flow::Eof);
        };
        let mut cart = match self.pharmacy.begin_sale(&cpf) {
            Ok(cart) => cart,
            Err(e) => {
                self.report(&e.into())?;
                return Ok(Flow::Continue);
            }
        };

        loop {
            let Some(name) = self.prompt("Drug name (or 'sair' to finish): ")? else {
                debug!(items = cart.item_count(), "Input ended during sale, cart dropped");
                return Ok(Flow::Eof);
            };
            if is_finish_word(&name) {
                break;
            }
            match self.pharmacy.add_item_by_name(&mut cart, &name) {
                Ok(drug) => {
                    let price = self.config.format_currency(drug.unit_price);
                    writeln!(self.output, "Added {} ({})", drug.name, price)?;
                }
                Err(e) => self.report(&e.into())?,
            }
        }

        if let Some(alert) = cart.prescription_alert() {
            writeln!(
                self.output,
                "Alert: check the prescription for these controlled drugs:"
            )?;
            for name in &alert.drug_names {
                writeln!(self.output, "  - {}", name)?;
            }
        }

        match self.pharmacy.finalize_sale(cart) {
            Ok(sale) => self.print_sale(&sale)?,
            Err(e) => self.report(&e.into())?,
        }
        Ok(Flow::Continue)
    }

    fn print_sale(&mut self, sale: &Sale) -> io::Result<()> {
        let labels = sale.discount_labels();
        let discounts = if labels.is_empty() {
            "none".to_string()
        } else {
            labels.join(", ")
        };
        let subtotal = self.config.format_currency(sale.subtotal);
        let total = self.config.format_currency(sale.total);

        writeln!(self.output, "Sale completed!")?;
        writeln!(self.output, "Subtotal: {}", subtotal)?;
        writeln!(self.output, "Discounts applied: {}", discounts)?;
        writeln!(self.output, "Total: {}", total)
    }

    // -------------------------------------------------------------------------
    // Reports
    // -------------------------------------------------------------------------

    fn reports(&mut self) -> io::Result<Flow> {
        let choice = loop {
            self.print_menu("Reports", &ReportMenu::ENTRIES)?;
            let Some(line) = self.prompt("Choose an option: ")? else {
                return Ok(Flow::Eof);
            };
            match line.parse::<ReportMenu>() {
                Ok(choice) => break choice,
                Err(e) => self.report(&e)?,
            }
        };

        match choice {
            ReportMenu::Customers => self.list_customers()?,
            ReportMenu::AllDrugs => self.list_drugs(DrugFilter::All)?,
            ReportMenu::Chemotherapy => self.list_drugs(DrugFilter::Chemotherapy)?,
            ReportMenu::Herbal => self.list_drugs(DrugFilter::Herbal)?,
            ReportMenu::DailyStatistics => self.print_statistics()?,
            ReportMenu::Laboratories => self.list_laboratories()?,
        }
        Ok(Flow::Continue)
    }

    fn list_customers(&mut self) -> io::Result<()> {
        let customers = self.pharmacy.customer_listing();
        if customers.is_empty() {
            return writeln!(self.output, "No customers registered.");
        }
        for customer in customers {
            writeln!(self.output, "CPF: {}", customer.cpf)?;
            writeln!(self.output, "Name: {}", customer.name)?;
            writeln!(
                self.output,
                "Birth date: {}\n",
                customer.birth_date.format(drogaria_core::BIRTH_DATE_FORMAT)
            )?;
        }
        Ok(())
    }

    fn list_drugs(&mut self, filter: DrugFilter) -> io::Result<()> {
        let drugs = self.pharmacy.drug_listing(filter);
        if drugs.is_empty() {
            return writeln!(self.output, "No drugs registered.");
        }
        for drug in &drugs {
            self.print_drug(drug, filter)?;
        }
        Ok(())
    }

    fn print_drug(&mut self, drug: &Arc<Drug>, filter: DrugFilter) -> io::Result<()> {
        writeln!(self.output, "Name: {}", drug.name)?;
        writeln!(self.output, "Active compound: {}", drug.active_compound)?;
        writeln!(self.output, "Laboratory: {}", drug.manufacturer)?;
        writeln!(self.output, "Description: {}", drug.description)?;

        // The full catalog listing stays short; category listings add detail.
        if filter == DrugFilter::Chemotherapy {
            let answer = if drug.prescription_required { "yes" } else { "no" };
            writeln!(self.output, "Requires prescription: {}", answer)?;
        }
        if filter != DrugFilter::All {
            let price = self.config.format_currency(drug.unit_price);
            writeln!(self.output, "Price: {}", price)?;
        }
        writeln!(self.output)
    }

    fn print_statistics(&mut self) -> io::Result<()> {
        let stats = self.pharmacy.statistics();
        let revenue = self.config.format_currency(stats.total_revenue);
        writeln!(
            self.output,
            "Top seller: {}",
            stats.top_seller.as_deref().unwrap_or("no medication sold")
        )?;
        writeln!(self.output, "Customers served: {}", stats.distinct_customers_served)?;
        writeln!(
            self.output,
            "Sales with prescription drugs: {}",
            stats.controlled_sales_count
        )?;
        writeln!(
            self.output,
            "Sales with non-prescription drugs: {}",
            stats.non_controlled_sales_count
        )?;
        writeln!(self.output, "Total sales: {}", stats.total_sales_count)?;
        writeln!(self.output, "Revenue (before discounts): {}", revenue)
    }

    fn list_laboratories(&mut self) -> io::Result<()> {
        let labs = self.pharmacy.laboratory_listing();
        if labs.is_empty() {
            return writeln!(self.output, "No laboratories registered.");
        }
        for lab in labs {
            writeln!(self.output, "Laboratory: {}", lab.name)?;
            if !lab.city.is_empty() || !lab.state.is_empty() {
                writeln!(self.output, "Location: {}/{}", lab.city, lab.state)?;
            }
            writeln!(self.output)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Terminal helpers
    // -------------------------------------------------------------------------

    /// Prints `label`, reads one line. `None` at end of input.
    ///
    /// Only the line terminator is stripped; everything else is kept as
    /// typed, since catalog lookups are exact.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn print_menu<T>(&mut self, title: &str, entries: &[(T, &'static str)]) -> io::Result<()> {
        writeln!(self.output, "\n--- {} ---", title)?;
        for (i, (_, label)) in entries.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, label)?;
        }
        Ok(())
    }

    fn report(&mut self, err: &CliError) -> io::Result<()> {
        debug!(code = %err.code, "Shell action failed");
        writeln!(self.output, "Error: {}", err)
    }
}

impl<R, W> fmt::Debug for Shell<'_, R, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("store", &self.config.store.name)
            .finish_non_exhaustive()
    }
}

/// Matched as typed: " sair" is a drug name, not the finish word.
fn is_finish_word(input: &str) -> bool {
    input.eq_ignore_ascii_case(FINISH_WORD)
}

fn is_yes(input: &str) -> bool {
    matches!(
        input.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CUSTOMER: &str = "1\n111\nAna\n10/10/1950\n";
    const CHEMO: &str = "2\nTamoxifeno\ntamoxifen\nEMS\n20mg\nchemotherapy\n100.00\ny\n";
    const HERBAL: &str = "2\nGuaco\nMikania\nHerbarium\nxarope\nfitoterápico\n20,50\n";

    fn run_with(pharmacy: &Pharmacy, script: &str) -> String {
        let config = AppConfig::default();
        let mut out = Vec::new();
        Shell::new(pharmacy, &config, script.as_bytes(), &mut out)
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn run(script: &str) -> (Pharmacy, String) {
        let pharmacy = Pharmacy::default();
        let out = run_with(&pharmacy, script);
        (pharmacy, out)
    }

    #[test]
    fn test_menu_selection_parsing() {
        assert_eq!("1".parse::<MainMenu>().unwrap(), MainMenu::RegisterCustomer);
        assert_eq!(" 6 ".parse::<MainMenu>().unwrap(), MainMenu::Exit);
        assert!("0".parse::<MainMenu>().is_err());
        assert!("7".parse::<MainMenu>().is_err());
        assert!("one".parse::<MainMenu>().is_err());
        assert_eq!("5".parse::<ReportMenu>().unwrap(), ReportMenu::DailyStatistics);
    }

    #[test]
    fn test_full_sale_session() {
        let script = format!(
            "{}{}3\n111\nTamoxifeno\nDipirona\nTamoxifeno\nsair\n6\n",
            CUSTOMER, CHEMO
        );
        let (pharmacy, out) = run(&script);

        assert!(out.contains("Customer registered successfully!"));
        assert!(out.contains("Drug registered successfully!"));
        assert!(out.contains("Error: [NOT_FOUND] Drug not found: Dipirona"));
        assert!(out.contains("Alert: check the prescription"));
        assert!(out.contains("  - Tamoxifeno\n  - Tamoxifeno\n"));
        assert!(out.contains("Discounts applied: 20% senior discount, 10% bulk discount"));
        assert!(out.contains("Total: R$144.00"));
        assert!(out.ends_with("Goodbye!\n"));
        assert_eq!(pharmacy.total_sales_count(), 1);
    }

    #[test]
    fn test_invalid_selection_reprompts() {
        let (_, out) = run("9\nabc\n6\n");
        assert!(out.contains("Error: [INVALID_MENU_SELECTION] Invalid option '9'"));
        assert!(out.contains("Error: [INVALID_MENU_SELECTION] Invalid option 'abc'"));
        assert_eq!(out.matches("--- Main menu ---").count(), 3);
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let (_, out) = run("");
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_end_of_input_mid_sale_records_nothing() {
        let script = format!("{}{}3\n111\nTamoxifeno\n", CUSTOMER, CHEMO);
        let (pharmacy, out) = run(&script);
        assert!(out.contains("Added Tamoxifeno (R$100.00)"));
        assert_eq!(pharmacy.total_sales_count(), 0);
    }

    #[test]
    fn test_unknown_customer_returns_to_menu() {
        let (pharmacy, out) = run("3\n999\n6\n");
        assert!(out.contains("Error: [NOT_FOUND] Customer not found: 999"));
        assert_eq!(pharmacy.total_sales_count(), 0);
    }

    #[test]
    fn test_empty_sale_is_refused() {
        let script = format!("{}3\n111\nSAIR\n6\n", CUSTOMER);
        let (pharmacy, out) = run(&script);
        assert!(out.contains("Error: [BUSINESS_LOGIC] Cart is empty"));
        assert_eq!(pharmacy.total_sales_count(), 0);
    }

    #[test]
    fn test_invalid_category_stops_before_price() {
        let (pharmacy, out) = run("2\nX\nc\nm\nd\ngenérico\n6\n");
        assert!(out.contains("Error: [INVALID_CATEGORY] Invalid drug category 'genérico'"));
        assert!(!out.contains("Price (e.g. 12.50)"));
        assert!(pharmacy.drugs().is_empty());
    }

    #[test]
    fn test_malformed_price_is_refused() {
        let (pharmacy, out) = run("2\nGuaco\nm\nl\nd\nherbal\ndoze\n6\n");
        assert!(out.contains("Error: [VALIDATION_ERROR] "));
        assert!(pharmacy.drugs().is_empty());
    }

    #[test]
    fn test_bad_birth_date_is_refused() {
        let (pharmacy, out) = run("1\n111\nAna\n1950-10-10\n6\n");
        assert!(out.contains("dd/mm/yyyy"));
        assert!(pharmacy.customers().is_empty());
    }

    #[test]
    fn test_herbal_listing_shows_price_only() {
        let script = format!("{}{}4\n4\n6\n", CHEMO, HERBAL);
        let (_, out) = run(&script);
        let listing = out
            .split("Choose an option: ")
            .nth(4)
            .unwrap_or_default();

        assert!(listing.contains("Name: Guaco"));
        assert!(listing.contains("Price: R$20.50"));
        assert!(!listing.contains("Tamoxifeno"));
        assert!(!listing.contains("Requires prescription"));
    }

    #[test]
    fn test_statistics_report() {
        let pharmacy = Pharmacy::default();
        let out = run_with(&pharmacy, "4\n0\n5\n6\n");
        assert!(out.contains("Error: [INVALID_MENU_SELECTION] Invalid option '0'"));
        assert!(out.contains("Top seller: no medication sold"));
        assert!(out.contains("Customers served: 0"));
        assert!(out.contains("Sales with prescription drugs: 0"));
        assert!(out.contains("Sales with non-prescription drugs: 0"));
        assert!(out.contains("Total sales: 0"));
        assert!(out.contains("Revenue (before discounts): R$0.00"));

        let script = format!(
            "{}{}{}3\n111\nGuaco\nTamoxifeno\nGuaco\nsair\n4\n5\n6\n",
            CUSTOMER, CHEMO, HERBAL
        );
        let out = run_with(&pharmacy, &script);
        assert!(out.contains("Top seller: Guaco"));
        assert!(out.contains("Customers served: 1"));
        assert!(out.contains("Sales with prescription drugs: 1"));
        assert!(out.contains("Sales with non-prescription drugs: 1"));
        assert!(out.contains("Total sales: 1"));
        assert!(out.contains("Revenue (before discounts): R$141.00"));
    }

    #[test]
    fn test_customer_and_laboratory_listings_sorted() {
        let script = "1\n2\nZélia\n01/01/1980\n1\n1\nAna\n02/02/1990\n\
                      5\nMedley\nRua A\n1234\nCampinas\nSP\n\
                      5\nEurofarma\nRua B\n5678\nSão Paulo\nSP\n\
                      4\n1\n4\n6\n6\n";
        let (_, out) = run(script);

        let ana = out.find("Name: Ana").unwrap();
        let zelia = out.find("Name: Zélia").unwrap();
        assert!(ana < zelia);
        assert!(out.contains("Birth date: 02/02/1990"));

        let eurofarma = out.find("Laboratory: Eurofarma").unwrap();
        let medley = out.find("Laboratory: Medley").unwrap();
        assert!(eurofarma < medley);
        assert!(out.contains("Location: Campinas/SP"));
    }

    #[test]
    fn test_finish_words() {
        assert!(is_finish_word("sair"));
        assert!(is_finish_word("SAIR"));
        assert!(!is_finish_word(" sair"));
        assert!(!is_finish_word("done"));
        assert!(!is_finish_word("Dipirona"));
    }

    #[test]
    fn test_drug_named_like_finish_word_can_be_sold() {
        let script = format!(
            "{}2\nDone\nm\nl\nd\nherbal\n5.00\n3\n111\nDone\nsair\n6\n",
            CUSTOMER
        );
        let (pharmacy, out) = run(&script);
        assert!(out.contains("Added Done (R$5.00)"));
        assert_eq!(pharmacy.total_sales_count(), 1);
    }
}
