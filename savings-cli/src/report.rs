//! Text and JSON rendering of calculator results.

use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;
use rust_decimal::Decimal;
use savings_core::calculations::{
    EvSchemeResult, HrisRoiResult, PayrollResult, PayslipBreakdown, SalarySacrificeResult,
};
use savings_core::{
    Benchmark, BenchmarkComparison, BenchmarkPosition, BenchmarkUnit, CalculationResult,
    TaxYearConstants,
};
use serde::Serialize;

use crate::csv_loader::BatchEntry;
use crate::utils::{format_gbp, format_percent, opt_display};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

const LABEL_WIDTH: usize = 44;

/// Two-column text report built up line by line.
#[derive(Default)]
struct TextReport {
    out: String,
}

impl TextReport {
    fn heading(
        &mut self,
        title: &str,
    ) -> &mut Self {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        let _ = writeln!(self.out, "{title}");
        let _ = writeln!(self.out, "{}", "-".repeat(title.chars().count()));
        self
    }

    fn line(
        &mut self,
        label: &str,
        value: impl AsRef<str>,
    ) -> &mut Self {
        let _ = writeln!(self.out, "{label:<LABEL_WIDTH$}{:>16}", value.as_ref());
        self
    }

    fn money(
        &mut self,
        label: &str,
        amount: Decimal,
    ) -> &mut Self {
        self.line(label, format_gbp(amount))
    }

    fn benchmark(
        &mut self,
        comparison: Option<&BenchmarkComparison>,
    ) -> &mut Self {
        if let Some(comparison) = comparison {
            let position = match comparison.position {
                BenchmarkPosition::Below => "below",
                BenchmarkPosition::Within => "within",
                BenchmarkPosition::Above => "above",
            };
            let _ = writeln!(
                self.out,
                "  {} {position} typical range {}",
                comparison.benchmark.label,
                range(&comparison.benchmark)
            );
        }
        self
    }

    fn finish(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}

fn range(benchmark: &Benchmark) -> String {
    match benchmark.unit {
        BenchmarkUnit::Percent => format!("{}–{}%", benchmark.low, benchmark.high),
        BenchmarkUnit::Months => format!("{}–{} months", benchmark.low, benchmark.high),
    }
}

fn months(value: Decimal) -> String {
    format!("{value:.2} months")
}

pub fn salary_sacrifice_text(r: &SalarySacrificeResult) -> String {
    TextReport::default()
        .heading(&format!("Salary sacrifice ({})", r.tax_year))
        .money("Sacrifice per participant", r.sacrifice_amount)
        .money("Salary after sacrifice", r.salary_after_sacrifice)
        .money("Employer NI before", r.employer_ni_before)
        .money("Employer NI after", r.employer_ni_after)
        .money("Employer NI saving per participant", r.employer_ni_saving)
        .line(
            "Employer marginal NI rate",
            format_percent(r.employer_marginal_rate * Decimal::ONE_HUNDRED),
        )
        .money("Employee NI saving", r.employee_ni_saving)
        .money("Income tax saving", r.income_tax_saving)
        .money("Employee net cost", r.employee_net_cost)
        .line("Participants", r.participants.to_string())
        .money("Total employer saving", r.total_employer_saving)
        .money("Total employee saving", r.total_employee_saving)
        .line(
            "Saving as share of employer NI bill",
            opt_display(r.employer_saving_percentage, format_percent),
        )
        .benchmark(Some(&r.participation_benchmark))
        .finish()
}

pub fn hris_roi_text(r: &HrisRoiResult) -> String {
    TextReport::default()
        .heading(&format!("HRIS return on investment ({})", r.tax_year))
        .money("Loaded HR cost per head", r.loaded_hr_cost)
        .money("Hourly HR cost", r.hourly_cost)
        .money("Annual time saving", r.annual_time_saving)
        .money("Annual error saving", r.annual_error_saving)
        .money("Annual benefit", r.annual_benefit)
        .money("Annual subscription", r.annual_subscription)
        .money("Total cost", r.total_cost)
        .money("Total benefit", r.total_benefit)
        .money("Net benefit", r.net_benefit)
        .line("ROI", opt_display(r.roi_percentage, format_percent))
        .line("Payback", opt_display(r.payback_months, months))
        .benchmark(r.roi_benchmark.as_ref())
        .benchmark(r.payback_benchmark.as_ref())
        .finish()
}

fn payslip(
    report: &mut TextReport,
    title: &str,
    p: &PayslipBreakdown,
) {
    report
        .heading(title)
        .money("Gross pay", p.gross_pay)
        .money("Employee pension", p.employee_pension)
        .money("Employer pension", p.employer_pension)
        .money("Taxable pay", p.taxable_pay)
        .money("Income tax", p.income_tax)
        .money("Employee NI", p.employee_ni)
        .money("Net pay", p.net_pay)
        .money("Employer NI", p.employer_ni)
        .money("Total employer cost", p.total_employer_cost);
}

pub fn payroll_text(r: &PayrollResult) -> String {
    let mut report = TextReport::default();
    report
        .heading(&format!("Payroll comparison ({})", r.tax_year))
        .money("Qualifying earnings", r.qualifying_earnings);
    payslip(&mut report, "Net pay arrangement", &r.net_pay_arrangement);
    payslip(&mut report, "Salary sacrifice", &r.salary_sacrifice);
    report
        .heading("Workforce")
        .money("Employer saving per employee", r.employer_saving_per_employee)
        .money("Take-home gain per employee", r.take_home_gain_per_employee)
        .money("Employer NI (net pay)", r.workforce_employer_ni_standard)
        .money("Employer NI (sacrifice)", r.workforce_employer_ni_sacrifice)
        .money("Employment allowance applied", r.employment_allowance_applied)
        .money("Employer cost (net pay)", r.workforce_cost_standard)
        .money("Employer cost (sacrifice)", r.workforce_cost_sacrifice)
        .money("Employer saving", r.workforce_employer_saving)
        .money("Take-home gain", r.workforce_take_home_gain)
        .finish()
}

pub fn ev_scheme_text(r: &EvSchemeResult) -> String {
    TextReport::default()
        .heading(&format!("Electric vehicle scheme ({})", r.tax_year))
        .money("Annual sacrifice", r.annual_sacrifice)
        .money("Benefit in kind", r.bik_value)
        .money("Tax on benefit in kind", r.bik_tax)
        .money("Income tax saving", r.income_tax_saving)
        .money("Employee NI saving", r.employee_ni_saving)
        .money("Employee net cost", r.employee_net_cost)
        .money("Employee saving", r.employee_saving)
        .line(
            "Employee saving vs paying from net pay",
            opt_display(r.employee_saving_percentage, format_percent),
        )
        .money("Employer NI saving", r.employer_ni_saving)
        .money("Class 1A NI", r.class_1a_ni)
        .money("Employer net saving per car", r.employer_net_saving)
        .money("Total employee saving", r.total_employee_saving)
        .money("Total employer saving", r.total_employer_saving)
        .finish()
}

pub fn result_text(result: &CalculationResult) -> String {
    match result {
        CalculationResult::SalarySacrifice(r) => salary_sacrifice_text(r),
        CalculationResult::HrisRoi(r) => hris_roi_text(r),
        CalculationResult::Payroll(r) => payroll_text(r),
        CalculationResult::EvScheme(r) => ev_scheme_text(r),
    }
}

pub fn constants_text(c: &TaxYearConstants) -> String {
    let pct = |rate: Decimal| format_percent(rate * Decimal::ONE_HUNDRED);
    TextReport::default()
        .heading(&format!("Tax year {}", c.tax_year))
        .money("Personal allowance", c.personal_allowance)
        .money("Allowance taper threshold", c.allowance_taper_threshold)
        .money("Basic rate band", c.basic_rate_band)
        .money("Additional rate threshold", c.additional_rate_threshold)
        .line("Basic / higher / additional rate", format!(
            "{} / {} / {}",
            pct(c.basic_rate),
            pct(c.higher_rate),
            pct(c.additional_rate)
        ))
        .money("Primary threshold", c.primary_threshold)
        .money("Upper earnings limit", c.upper_earnings_limit)
        .line("Employee NI main / upper rate", format!(
            "{} / {}",
            pct(c.employee_main_rate),
            pct(c.employee_upper_rate)
        ))
        .money("Secondary threshold", c.secondary_threshold)
        .line("Employer NI rate", pct(c.employer_rate))
        .money("Employment allowance", c.employment_allowance)
        .money("Pension lower qualifying earnings", c.pension_lower_qualifying)
        .money("Pension upper qualifying earnings", c.pension_upper_qualifying)
        .line("Pension minimum employee / employer", format!(
            "{} / {}",
            pct(c.pension_employee_rate),
            pct(c.pension_employer_rate)
        ))
        .line("EV benefit-in-kind rate", pct(c.ev_bik_rate))
        .finish()
}

pub fn benchmarks_text(benchmarks: &[Benchmark]) -> String {
    let mut report = TextReport::default();
    report.heading("Benchmarks");
    for benchmark in benchmarks {
        report.line(&benchmark.label, range(benchmark));
    }
    report.finish()
}

/// One line per batch row: label, employer saving, employee saving.
pub fn batch_text(rows: &[(BatchEntry, SalarySacrificeResult)]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24}{:>10}{:>8}{:>18}{:>18}",
        "Scenario", "Year", "People", "Employer saving", "Employee saving"
    );
    let mut employer = Decimal::ZERO;
    let mut employee = Decimal::ZERO;
    for (entry, result) in rows {
        let _ = writeln!(
            out,
            "{:<24}{:>10}{:>8}{:>18}{:>18}",
            entry.label,
            result.tax_year.to_string(),
            result.participants,
            format_gbp(result.total_employer_saving),
            format_gbp(result.total_employee_saving)
        );
        employer += result.total_employer_saving;
        employee += result.total_employee_saving;
    }
    let _ = writeln!(
        out,
        "{:<42}{:>18}{:>18}",
        "Total",
        format_gbp(employer),
        format_gbp(employee)
    );
    out
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
