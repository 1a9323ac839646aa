use std::fs::File;
use std::io::Read;
use std::path::Path;

use savings_core::{TaxYearConstants, TaxYearTable, ValidationError};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a tax-year table.
#[derive(Debug, Error)]
pub enum CsvTaxYearError {
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("CSV parse error on line {line}: {message}")]
    CsvParse { line: u64, message: String },

    #[error("Invalid constants on line {line}: {source}")]
    InvalidRow {
        line: u64,
        #[source]
        source: ValidationError,
    },

    #[error("Invalid table: {0}")]
    InvalidTable(#[from] ValidationError),

    #[error("No tax years found")]
    Empty,
}

/// Loader for tax-year constants stored as CSV.
///
/// The header row names the [`TaxYearConstants`] fields, one tax year per
/// row. Rates are fractions (`0.15`), amounts are annual pounds, and the
/// `tax_year` column uses the `2025-2026` form.
pub struct CsvTaxYears;

impl CsvTaxYears {
    /// Parse and validate every row from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or a
    /// string slice. Reported line numbers count the header as line 1.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxYearConstants>, CsvTaxYearError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut rows = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let line = index as u64 + 2;
            let constants: TaxYearConstants = result.map_err(|err| CsvTaxYearError::CsvParse {
                line: err.position().map_or(line, |pos| pos.line()),
                message: err.to_string(),
            })?;
            constants
                .validate()
                .map_err(|source| CsvTaxYearError::InvalidRow { line, source })?;
            rows.push(constants);
        }

        debug!(rows = rows.len(), "parsed tax-year rows");
        Ok(rows)
    }

    /// Parse a reader into a ready-to-query table.
    ///
    /// Fails on an empty file or on a tax year listed twice.
    pub fn load<R: Read>(reader: R) -> Result<TaxYearTable, CsvTaxYearError> {
        let rows = Self::parse(reader)?;
        if rows.is_empty() {
            return Err(CsvTaxYearError::Empty);
        }
        Ok(TaxYearTable::new(rows)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<TaxYearTable, CsvTaxYearError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| CsvTaxYearError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::load(file)
    }
}
