//! Payroll savings and ROI calculations.
//!
//! [`Statutory`] wraps a year's constants as band schedules; the calculators
//! in [`calculators`] combine those primitives into the individual tools.

pub mod calculators;
pub mod common;
pub mod schedule;
pub mod statutory;

pub use calculators::{
    EvSchemeCalculator, EvSchemeInput, EvSchemeResult, HrisRoiCalculator, HrisRoiInput,
    HrisRoiResult, PayrollCalculator, PayrollInput, PayrollResult, PayslipBreakdown,
    SalarySacrificeCalculator, SalarySacrificeInput, SalarySacrificeResult,
};
pub use schedule::BandSchedule;
pub use statutory::Statutory;
