use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use savings_core::TaxYear;

use crate::report::OutputFormat;
use crate::utils::{parse_currency, parse_percentage};

/// UK payroll savings and ROI calculator.
///
/// Amounts accept a pound sign and thousands separators (`£45,000.50`);
/// percentages are on the 0–100 scale (`5` or `5%`).
#[derive(Debug, Parser)]
#[command(name = "payroll-savings", version, about)]
pub struct Cli {
    /// Config file. Defaults to payroll-savings.toml in the working directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive. RUST_LOG takes precedence.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Employer and employee savings from pension salary sacrifice.
    Sacrifice(SacrificeArgs),
    /// Return on investment and payback for an HR information system.
    Hris(HrisArgs),
    /// Net pay arrangement compared with salary sacrifice, payslip by payslip.
    Payroll(PayrollArgs),
    /// Electric vehicle salary sacrifice including the benefit-in-kind charge.
    Ev(EvArgs),
    /// Run salary sacrifice for every row of a CSV file.
    Batch(BatchArgs),
    /// List known tax years, or print the constants for one.
    TaxYears(TaxYearsArgs),
    /// Print the reference ranges results are compared against.
    Benchmarks,
}

#[derive(Debug, Args)]
pub struct TaxYearArg {
    /// Tax year such as 2025-26. Defaults to the configured year, then the
    /// latest known year.
    #[arg(long)]
    pub tax_year: Option<TaxYear>,
}

#[derive(Debug, Args)]
pub struct SacrificeArgs {
    #[command(flatten)]
    pub year: TaxYearArg,

    #[arg(long, value_parser = parse_currency)]
    pub salary: Decimal,

    #[arg(long)]
    pub employees: u32,

    /// Share of salary sacrificed.
    #[arg(long, value_parser = parse_percentage)]
    pub sacrifice: Decimal,

    /// Share of employees who join.
    #[arg(long, value_parser = parse_percentage, default_value = "100")]
    pub participation: Decimal,
}

#[derive(Debug, Args)]
pub struct HrisArgs {
    #[command(flatten)]
    pub year: TaxYearArg,

    #[arg(long)]
    pub employees: u32,

    #[arg(long)]
    pub hr_staff: u32,

    #[arg(long, value_parser = parse_currency)]
    pub hr_salary: Decimal,

    /// Hours each HR staff member saves per week.
    #[arg(long, value_parser = parse_currency)]
    pub hours_saved: Decimal,

    #[arg(long, value_parser = parse_currency, default_value = "37.5")]
    pub contracted_hours: Decimal,

    #[arg(long, value_parser = parse_currency, default_value = "0")]
    pub error_cost: Decimal,

    #[arg(long, value_parser = parse_percentage, default_value = "0")]
    pub error_reduction: Decimal,

    #[arg(long, value_parser = parse_currency)]
    pub implementation_cost: Decimal,

    /// Annual licence cost per employee.
    #[arg(long, value_parser = parse_currency)]
    pub cost_per_employee: Decimal,

    #[arg(long, default_value_t = 3)]
    pub years: u32,
}

#[derive(Debug, Args)]
pub struct PayrollArgs {
    #[command(flatten)]
    pub year: TaxYearArg,

    #[arg(long, value_parser = parse_currency)]
    pub salary: Decimal,

    #[arg(long)]
    pub employees: u32,

    #[arg(long, value_parser = parse_percentage, default_value = "5")]
    pub employee_pension: Decimal,

    #[arg(long, value_parser = parse_percentage, default_value = "3")]
    pub employer_pension: Decimal,

    #[arg(long)]
    pub employment_allowance: bool,
}

#[derive(Debug, Args)]
pub struct EvArgs {
    #[command(flatten)]
    pub year: TaxYearArg,

    #[arg(long, value_parser = parse_currency)]
    pub salary: Decimal,

    #[arg(long, default_value_t = 1)]
    pub participants: u32,

    /// List price of the car.
    #[arg(long, value_parser = parse_currency)]
    pub p11d: Decimal,

    #[arg(long, value_parser = parse_currency)]
    pub monthly_lease: Decimal,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    #[command(flatten)]
    pub year: TaxYearArg,

    /// CSV of salary sacrifice scenarios.
    #[arg(long)]
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct TaxYearsArgs {
    /// Print every constant for this year instead of listing years.
    pub year: Option<TaxYear>,
}
