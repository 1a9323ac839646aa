use std::collections::BTreeMap;

use thiserror::Error;

use crate::error::ValidationError;
use crate::{TaxYear, TaxYearConstants};

#[derive(Debug, Error)]
pub enum SourceError {
    /// The source was asked for something it cannot provide, such as an
    /// unregistered backend or a missing location.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The source exists but its contents could not be read.
    #[error("Load error: {0}")]
    Load(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Read-only lookup of constants by tax year.
pub trait TaxYearRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownTaxYear`] when no table exists for
    /// `year`.
    fn get_constants(
        &self,
        year: TaxYear,
    ) -> Result<&TaxYearConstants, ValidationError>;

    /// Every known tax year, oldest first.
    fn list_tax_years(&self) -> Vec<TaxYear>;

    fn latest_tax_year(&self) -> Option<TaxYear> {
        self.list_tax_years().into_iter().max()
    }
}

/// In-memory tax-year table. Every entry has passed
/// [`TaxYearConstants::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxYearTable {
    pub(super) years: BTreeMap<TaxYear, TaxYearConstants>,
}

impl TaxYearTable {
    /// Builds a table, validating every entry.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConstants`] if an entry is invalid or
    /// a tax year appears twice.
    pub fn new(entries: Vec<TaxYearConstants>) -> Result<Self, ValidationError> {
        let mut years = BTreeMap::new();
        for constants in entries {
            constants.validate()?;
            let year = constants.tax_year;
            if years.insert(year, constants).is_some() {
                return Err(ValidationError::InvalidConstants(format!(
                    "duplicate entry for tax year {year}"
                )));
            }
        }
        Ok(Self { years })
    }

    pub fn get(
        &self,
        year: TaxYear,
    ) -> Option<&TaxYearConstants> {
        self.years.get(&year)
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl TaxYearRepository for TaxYearTable {
    fn get_constants(
        &self,
        year: TaxYear,
    ) -> Result<&TaxYearConstants, ValidationError> {
        self.get(year)
            .ok_or_else(|| ValidationError::UnknownTaxYear(year.to_string()))
    }

    fn list_tax_years(&self) -> Vec<TaxYear> {
        self.years.keys().copied().collect()
    }
}
