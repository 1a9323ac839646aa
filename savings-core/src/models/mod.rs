mod band;
mod benchmark;
mod constants;
mod tax_year;

pub use band::Band;
pub use benchmark::{Benchmark, BenchmarkComparison, BenchmarkPosition, BenchmarkUnit};
pub use constants::TaxYearConstants;
pub use tax_year::TaxYear;
