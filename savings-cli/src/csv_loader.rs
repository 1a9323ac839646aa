//! CSV loader for batch salary sacrifice scenarios.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive.
//!
//! | Column                     | Required | Type     | Notes                                      |
//! |----------------------------|----------|----------|--------------------------------------------|
//! | `label`                    | no       | string   | Shown in the report; defaults to `row N`   |
//! | `tax_year`                 | no       | tax year | e.g. `2025-26`; empty uses the default year |
//! | `gross_salary`             | yes      | currency | e.g. `40000`, `"£40,000.00"`               |
//! | `employees`                | yes      | integer  |                                            |
//! | `sacrifice_percentage`     | yes      | percent  | e.g. `5` or `5%`                           |
//! | `participation_percentage` | no       | percent  | Empty means 100                            |
//!
//! ### Example
//!
//! ```csv
//! label,tax_year,gross_salary,employees,sacrifice_percentage,participation_percentage
//! Warehouse,2025-26,"£24,000",120,4,55
//! Head office,,48000,40,6%,
//! ```
use std::path::Path;

use rust_decimal::Decimal;
use savings_core::TaxYear;
use savings_core::calculations::SalarySacrificeInput;
use serde::Deserialize;

use crate::utils::{ParseAmountError, parse_currency, parse_percentage};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    tax_year: Option<String>,
    gross_salary: String,
    employees: u32,
    sacrifice_percentage: String,
    #[serde(default)]
    participation_percentage: Option<String>,
}

/// One labelled scenario from a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub label: String,
    pub input: SalarySacrificeInput,
}

/// Errors that can occur while loading a batch file. Row numbers are
/// 1-based data rows (the header is row 0).
#[derive(Debug, thiserror::Error)]
pub enum BatchLoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Bad structure, a missing required column, or a non-integer headcount.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("row {row}, column {column}: {source}")]
    InvalidAmount {
        row: usize,
        column: &'static str,
        #[source]
        source: ParseAmountError,
    },

    #[error("row {row}: unrecognised tax year '{value}'")]
    InvalidTaxYear { row: usize, value: String },
}

fn non_empty(cell: Option<String>) -> Option<String> {
    cell.filter(|value| !value.trim().is_empty())
}

fn amount(
    row: usize,
    column: &'static str,
    value: &str,
    parse: fn(&str) -> Result<Decimal, ParseAmountError>,
) -> Result<Decimal, BatchLoadError> {
    parse(value).map_err(|source| BatchLoadError::InvalidAmount {
        row,
        column,
        source,
    })
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
    default_year: TaxYear,
) -> Result<BatchEntry, BatchLoadError> {
    let tax_year = match non_empty(row.tax_year) {
        Some(value) => TaxYear::parse(&value).map_err(|_| BatchLoadError::InvalidTaxYear {
            row: row_number,
            value,
        })?,
        None => default_year,
    };

    let participation_percentage = match non_empty(row.participation_percentage) {
        Some(value) => amount(
            row_number,
            "participation_percentage",
            &value,
            parse_percentage,
        )?,
        None => Decimal::ONE_HUNDRED,
    };

    Ok(BatchEntry {
        label: non_empty(row.label).unwrap_or_else(|| format!("row {row_number}")),
        input: SalarySacrificeInput {
            tax_year,
            gross_salary: amount(row_number, "gross_salary", &row.gross_salary, parse_currency)?,
            employees: row.employees,
            sacrifice_percentage: amount(
                row_number,
                "sacrifice_percentage",
                &row.sacrifice_percentage,
                parse_percentage,
            )?,
            participation_percentage,
        },
    })
}

/// Parse CSV text and return the scenarios in file order. Rows without a
/// `tax_year` use `default_year`.
///
/// # Errors
///
/// * [`BatchLoadError::Parse`] if the CSV is structurally invalid.
/// * [`BatchLoadError::InvalidAmount`] or [`BatchLoadError::InvalidTaxYear`]
///   naming the first bad row.
pub fn load_from_str(
    input: &str,
    default_year: TaxYear,
) -> Result<Vec<BatchEntry>, BatchLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1, default_year))
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(
    path: &Path,
    default_year: TaxYear,
) -> Result<Vec<BatchEntry>, BatchLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| BatchLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents, default_year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const DEFAULT_YEAR: TaxYear = TaxYear::starting(2025);

    const MINIMAL_CSV: &str = "\
gross_salary,employees,sacrifice_percentage
40000,100,5
";

    const FULL_CSV: &str = "\
label,tax_year,gross_salary,employees,sacrifice_percentage,participation_percentage
Warehouse,2024-25,\"£24,000\",120,4,55
Head office,,48000.50,40,6%,
";

    #[test]
    fn test_minimal_csv_uses_defaults() {
        let entries = load_from_str(MINIMAL_CSV, DEFAULT_YEAR).expect("should parse");

        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.label, "row 1");
        assert_eq!(e.input.tax_year, DEFAULT_YEAR);
        assert_eq!(e.input.gross_salary, dec!(40000));
        assert_eq!(e.input.employees, 100);
        assert_eq!(e.input.sacrifice_percentage, dec!(5));
        assert_eq!(e.input.participation_percentage, dec!(100));
    }

    #[test]
    fn test_full_csv_rows_in_order() {
        let entries = load_from_str(FULL_CSV, DEFAULT_YEAR).expect("should parse");

        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].label, "Warehouse");
        assert_eq!(entries[0].input.tax_year, TaxYear::starting(2024));
        assert_eq!(entries[0].input.gross_salary, dec!(24000));
        assert_eq!(entries[0].input.participation_percentage, dec!(55));

        assert_eq!(entries[1].label, "Head office");
        assert_eq!(entries[1].input.tax_year, DEFAULT_YEAR);
        assert_eq!(entries[1].input.gross_salary, dec!(48000.50));
        assert_eq!(entries[1].input.sacrifice_percentage, dec!(6));
        assert_eq!(entries[1].input.participation_percentage, dec!(100));
    }

    #[test]
    fn test_bad_salary_reports_row_and_column() {
        let csv = "\
gross_salary,employees,sacrifice_percentage
40000,10,5
forty,10,5
";
        match load_from_str(csv, DEFAULT_YEAR).unwrap_err() {
            BatchLoadError::InvalidAmount { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "gross_salary");
            }
            other => panic!("expected InvalidAmount, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_tax_year_returns_error() {
        let csv = "tax_year,gross_salary,employees,sacrifice_percentage\n2025,40000,10,5\n";

        match load_from_str(csv, DEFAULT_YEAR).unwrap_err() {
            BatchLoadError::InvalidTaxYear { row, value } => {
                assert_eq!(row, 1);
                assert_eq!(value, "2025");
            }
            other => panic!("expected InvalidTaxYear, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_column_returns_parse_error() {
        let csv = "gross_salary,employees\n40000,10\n";

        assert!(matches!(
            load_from_str(csv, DEFAULT_YEAR),
            Err(BatchLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_non_integer_headcount_returns_parse_error() {
        let csv = "gross_salary,employees,sacrifice_percentage\n40000,ten,5\n";

        assert!(matches!(
            load_from_str(csv, DEFAULT_YEAR),
            Err(BatchLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_header_only_returns_empty_vec() {
        let csv = "gross_salary,employees,sacrifice_percentage\n";

        let entries = load_from_str(csv, DEFAULT_YEAR).expect("header-only CSV is valid");

        assert!(entries.is_empty());
    }
}
