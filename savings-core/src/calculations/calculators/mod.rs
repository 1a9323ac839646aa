//! One module per calculator. Each pairs an input record, a result record and
//! a calculator bound to a single year's constants.

pub mod ev_scheme;
pub mod hris_roi;
pub mod payroll;
pub mod salary_sacrifice;

pub use ev_scheme::{EvSchemeCalculator, EvSchemeInput, EvSchemeResult};
pub use hris_roi::{HrisRoiCalculator, HrisRoiInput, HrisRoiResult};
pub use payroll::{PayrollCalculator, PayrollInput, PayrollResult, PayslipBreakdown};
pub use salary_sacrifice::{
    SalarySacrificeCalculator, SalarySacrificeInput, SalarySacrificeResult,
};
