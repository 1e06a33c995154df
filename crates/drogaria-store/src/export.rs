//! # Customer Export
//!
//! Writes the customer registry as CSV at the end of a session.
//!
//! ## Format
//! ```text
//! Name,ID,BirthDate
//! Ana Souza,123.456.789-00,1990-05-17
//! "Silva, Bento",987.654.321-00,1950-10-10
//! ```
//!
//! - Header row is always written, even with no customers
//! - `ID` is the CPF; `BirthDate` is ISO `YYYY-MM-DD`
//! - Rows follow registration order
//! - Fields with commas or quotes are quoted by the CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use drogaria_core::Customer;
use serde::Serialize;
use tracing::info;

use crate::error::{StoreError, StoreResult};

/// Column names, in order.
pub const CUSTOMER_HEADER: [&str; 3] = ["Name", "ID", "BirthDate"];

#[derive(Debug, Serialize)]
struct CustomerRow<'a> {
    name: &'a str,
    id: &'a str,
    birth_date: String,
}

impl<'a> From<&'a Customer> for CustomerRow<'a> {
    fn from(customer: &'a Customer) -> Self {
        CustomerRow {
            name: &customer.name,
            id: &customer.cpf,
            birth_date: customer.birth_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Writes `customers` as CSV to `writer`. Returns the number of data rows.
pub fn write_customers<W: Write>(writer: W, customers: &[Arc<Customer>]) -> StoreResult<usize> {
    // Header is written by hand so an empty registry still gets one.
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv.write_record(CUSTOMER_HEADER)?;
    for customer in customers {
        csv.serialize(CustomerRow::from(customer.as_ref()))?;
    }
    csv.flush().map_err(csv::Error::from)?;

    Ok(customers.len())
}

/// Creates (or truncates) `path` and writes the customer CSV into it.
pub fn export_customers_to_path(path: &Path, customers: &[Arc<Customer>]) -> StoreResult<usize> {
    let file = File::create(path).map_err(|e| StoreError::export_io(path, e))?;
    let rows = write_customers(file, customers)?;
    info!(path = %path.display(), rows, "Exported customers");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(cpf: &str, name: &str, birth: &str) -> Arc<Customer> {
        Arc::new(Customer::new(cpf, name, birth).unwrap())
    }

    fn render(customers: &[Arc<Customer>]) -> String {
        let mut buf = Vec::new();
        write_customers(&mut buf, customers).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_only_when_empty() {
        assert_eq!(render(&[]), "Name,ID,BirthDate\n");
    }

    #[test]
    fn test_rows_in_registration_order_with_iso_dates() {
        let out = render(&[
            customer("222", "Zélia", "01/12/1980"),
            customer("111", "Ana", "17/05/1990"),
        ]);
        assert_eq!(
            out,
            "Name,ID,BirthDate\nZélia,222,1980-12-01\nAna,111,1990-05-17\n"
        );
    }

    #[test]
    fn test_commas_are_quoted() {
        let out = render(&[customer("1", "Silva, Bento", "10/10/1950")]);
        assert_eq!(out, "Name,ID,BirthDate\n\"Silva, Bento\",1,1950-10-10\n");
    }

    #[test]
    fn test_export_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clientes.csv");

        let rows = export_customers_to_path(&path, &[customer("1", "Ana", "17/05/1990")]).unwrap();
        assert_eq!(rows, 1);

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Name,ID,BirthDate\nAna,1,1990-05-17\n");
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("clientes.csv");

        let err = export_customers_to_path(&path, &[]).unwrap_err();
        assert!(matches!(err, StoreError::ExportIo { .. }));
    }
}
