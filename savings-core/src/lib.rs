pub mod calculations;
pub mod engine;
pub mod error;
pub mod models;
pub mod source;

pub use engine::{CalculationEngine, CalculationResult, CalculatorInput};
pub use error::ValidationError;
pub use models::*;
pub use source::{SourceError, TaxYearRepository, TaxYearTable};
