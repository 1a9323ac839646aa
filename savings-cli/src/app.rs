use anyhow::{Context, Result, anyhow};
use savings_core::calculations::{
    EvSchemeInput, HrisRoiInput, PayrollInput, SalarySacrificeInput,
};
use savings_core::source::SourceRegistry;
use savings_core::{Benchmark, CalculationEngine, CalculatorInput, TaxYear};
use savings_data::CsvSourceFactory;
use serde::Serialize;
use tracing::info;

use crate::cli::{BatchArgs, Cli, Command, TaxYearArg, TaxYearsArgs};
use crate::config::AppConfig;
use crate::csv_loader;
use crate::report::{self, OutputFormat};

/// Registry with every constants backend this binary ships.
pub fn build_registry() -> SourceRegistry {
    let mut registry = SourceRegistry::new();
    registry.register(Box::new(CsvSourceFactory));
    registry
}

pub fn build_engine(config: &AppConfig) -> Result<CalculationEngine> {
    let repository = build_registry()
        .create(&config.constants)
        .with_context(|| format!("loading constants from '{}' backend", config.constants.backend))?;
    Ok(CalculationEngine::new(repository))
}

/// `--tax-year`, else `[calculator] default_tax_year`, else the latest year
/// the engine knows.
pub fn resolve_tax_year(
    arg: &TaxYearArg,
    config: &AppConfig,
    engine: &CalculationEngine,
) -> Result<TaxYear> {
    arg.tax_year
        .or(config.calculator.default_tax_year)
        .or_else(|| engine.repository().latest_tax_year())
        .ok_or_else(|| anyhow!("no tax years available from the constants source"))
}

fn render<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text(value)),
        OutputFormat::Json => report::to_json(value),
    }
}

fn to_input(
    command: &Command,
    config: &AppConfig,
    engine: &CalculationEngine,
) -> Result<CalculatorInput> {
    let input = match command {
        Command::Sacrifice(args) => CalculatorInput::SalarySacrifice(SalarySacrificeInput {
            tax_year: resolve_tax_year(&args.year, config, engine)?,
            gross_salary: args.salary,
            employees: args.employees,
            sacrifice_percentage: args.sacrifice,
            participation_percentage: args.participation,
        }),
        Command::Hris(args) => CalculatorInput::HrisRoi(HrisRoiInput {
            tax_year: resolve_tax_year(&args.year, config, engine)?,
            employees: args.employees,
            hr_staff: args.hr_staff,
            average_hr_salary: args.hr_salary,
            hours_saved_per_week: args.hours_saved,
            contracted_hours_per_week: args.contracted_hours,
            annual_error_cost: args.error_cost,
            error_reduction_percentage: args.error_reduction,
            implementation_cost: args.implementation_cost,
            annual_cost_per_employee: args.cost_per_employee,
            analysis_years: args.years,
        }),
        Command::Payroll(args) => CalculatorInput::Payroll(PayrollInput {
            tax_year: resolve_tax_year(&args.year, config, engine)?,
            gross_salary: args.salary,
            employees: args.employees,
            employee_pension_percentage: args.employee_pension,
            employer_pension_percentage: args.employer_pension,
            claim_employment_allowance: args.employment_allowance,
        }),
        Command::Ev(args) => CalculatorInput::EvScheme(EvSchemeInput {
            tax_year: resolve_tax_year(&args.year, config, engine)?,
            gross_salary: args.salary,
            participants: args.participants,
            p11d_value: args.p11d,
            monthly_lease_cost: args.monthly_lease,
        }),
        Command::Batch(_) | Command::TaxYears(_) | Command::Benchmarks => {
            return Err(anyhow!("{command:?} is not a calculator command"));
        }
    };
    Ok(input)
}

fn run_batch(
    args: &BatchArgs,
    format: OutputFormat,
    config: &AppConfig,
    engine: &CalculationEngine,
) -> Result<String> {
    let default_year = resolve_tax_year(&args.year, config, engine)?;
    let entries = csv_loader::load_from_file(&args.file, default_year)
        .with_context(|| format!("loading batch file {}", args.file.display()))?;
    info!(rows = entries.len(), "loaded batch scenarios");

    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        let result = engine
            .salary_sacrifice(&entry.input)
            .with_context(|| format!("scenario '{}'", entry.label))?;
        rows.push((entry, result));
    }

    match format {
        OutputFormat::Text => Ok(report::batch_text(&rows)),
        OutputFormat::Json => {
            let results: Vec<_> = rows
                .iter()
                .map(|(entry, result)| serde_json::json!({ "label": entry.label, "result": result }))
                .collect();
            report::to_json(&results)
        }
    }
}

fn run_tax_years(
    args: &TaxYearsArgs,
    format: OutputFormat,
    engine: &CalculationEngine,
) -> Result<String> {
    match args.year {
        Some(year) => {
            let constants = engine.constants(year)?;
            render(format, constants, report::constants_text)
        }
        None => {
            let years = engine.repository().list_tax_years();
            render(format, &years, |years| {
                years.iter().map(|year| format!("{year}\n")).collect()
            })
        }
    }
}

/// Runs one command and returns the rendered output.
pub fn execute(
    cli: &Cli,
    config: &AppConfig,
) -> Result<String> {
    if let Command::Benchmarks = cli.command {
        return render(cli.format, &Benchmark::all(), |b| report::benchmarks_text(b));
    }

    let engine = build_engine(config)?;

    match &cli.command {
        Command::Batch(args) => run_batch(args, cli.format, config, &engine),
        Command::TaxYears(args) => run_tax_years(args, cli.format, &engine),
        command => {
            let input = to_input(command, config, &engine)?;
            let result = engine.calculate(&input)?;
            render(cli.format, &result, report::result_text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn run(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(args)?;
        execute(&cli, &AppConfig::default())
    }

    #[test]
    fn registry_knows_builtin_and_csv() {
        assert_eq!(build_registry().available_backends(), vec!["builtin", "csv"]);
    }

    #[test]
    fn tax_year_falls_back_to_latest() {
        let engine = CalculationEngine::builtin();
        let arg = TaxYearArg { tax_year: None };

        let year = resolve_tax_year(&arg, &AppConfig::default(), &engine).unwrap();

        assert_eq!(year, TaxYear::starting(2026));
    }

    #[test]
    fn configured_year_beats_latest() {
        let engine = CalculationEngine::builtin();
        let mut config = AppConfig::default();
        config.calculator.default_tax_year = Some(TaxYear::starting(2024));

        let from_config = resolve_tax_year(&TaxYearArg { tax_year: None }, &config, &engine);
        let from_flag = resolve_tax_year(
            &TaxYearArg {
                tax_year: Some(TaxYear::starting(2025)),
            },
            &config,
            &engine,
        );

        assert_eq!(from_config.unwrap(), TaxYear::starting(2024));
        assert_eq!(from_flag.unwrap(), TaxYear::starting(2025));
    }

    #[test]
    fn ev_command_renders_text() {
        let out = run(&[
            "payroll-savings",
            "ev",
            "--tax-year",
            "2025-26",
            "--salary",
            "£45,000",
            "--p11d",
            "40000",
            "--monthly-lease",
            "500",
            "--participants",
            "20",
        ])
        .unwrap();

        assert!(out.contains("Electric vehicle scheme (2025-2026)"));
        assert!(out.contains("£4,560.00"));
        assert!(out.contains("£14,400.00"));
    }

    #[test]
    fn payroll_command_renders_json() {
        let out = run(&[
            "payroll-savings",
            "--format",
            "json",
            "payroll",
            "--tax-year",
            "2025-26",
            "--salary",
            "30000",
            "--employees",
            "10",
            "--employment-allowance",
        ])
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["calculator"], "payroll");
        let saving: Decimal = value["employer_saving_per_employee"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(saving, dec!(178.20));
    }

    #[test]
    fn validation_error_surfaces() {
        let err = run(&[
            "payroll-savings",
            "sacrifice",
            "--salary",
            "40000",
            "--employees",
            "10",
            "--sacrifice",
            "150",
        ])
        .unwrap_err();

        assert!(err.to_string().contains("sacrifice_percentage"), "{err}");
    }

    #[test]
    fn unknown_tax_year_surfaces() {
        let err = run(&["payroll-savings", "tax-years", "2010-11"]).unwrap_err();

        assert_eq!(err.to_string(), "no constants available for tax year 2010-2011");
    }

    #[test]
    fn tax_years_lists_builtin_years() {
        let out = run(&["payroll-savings", "tax-years"]).unwrap();

        assert_eq!(out, "2024-2025\n2025-2026\n2026-2027\n");
    }

    #[test]
    fn unknown_backend_is_configuration_error() {
        let cli = Cli::try_parse_from(["payroll-savings", "tax-years"]).unwrap();
        let mut config = AppConfig::default();
        config.constants.backend = "postgres".to_string();

        let err = execute(&cli, &config).unwrap_err();

        assert!(format!("{err:#}").contains("unknown backend 'postgres'"), "{err:#}");
    }
}
