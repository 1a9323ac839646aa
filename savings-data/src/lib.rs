//! CSV-backed tax-year constants.

mod factory;
mod loader;

pub use factory::CsvSourceFactory;
pub use loader::{CsvTaxYearError, CsvTaxYears};
