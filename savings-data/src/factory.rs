use savings_core::source::{SourceConfig, SourceError, TaxYearRepository, TaxYearSourceFactory};
use tracing::info;

use crate::loader::{CsvTaxYearError, CsvTaxYears};

/// Reads tax-year constants from the CSV file named by
/// [`SourceConfig::location`].
pub struct CsvSourceFactory;

impl TaxYearSourceFactory for CsvSourceFactory {
    fn backend_name(&self) -> &'static str {
        "csv"
    }

    fn create(
        &self,
        config: &SourceConfig,
    ) -> Result<Box<dyn TaxYearRepository>, SourceError> {
        let path = config.location.as_deref().ok_or_else(|| {
            SourceError::Configuration("the csv backend requires a location".to_string())
        })?;

        let table = CsvTaxYears::from_path(path).map_err(|err| match err {
            CsvTaxYearError::InvalidTable(source) => SourceError::Invalid(source),
            other => SourceError::Load(other.to_string()),
        })?;

        info!(path, years = table.len(), "loaded tax-year constants");
        Ok(Box::new(table))
    }
}
