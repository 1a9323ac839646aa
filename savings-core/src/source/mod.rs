//! Where tax-year constants come from.
//!
//! Calculators only ever see a [`TaxYearRepository`]. The built-in table is
//! always available; other backends (e.g. CSV files) register a
//! [`TaxYearSourceFactory`] with a [`SourceRegistry`].

mod builtin;
mod factory;
mod repository;

pub use factory::{BuiltinSourceFactory, SourceConfig, SourceRegistry, TaxYearSourceFactory};
pub use repository::{SourceError, TaxYearRepository, TaxYearTable};
