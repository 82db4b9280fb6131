//! Run the lifecycle simulation for a loan portfolio CSV
//!
//! Prints the base-vs-custom repayment breakdown and optionally writes the
//! custom scenario's monthly series to CSV.

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use loan_lifecycle::{
    load_loans, AllocationPolicy, LifecycleConfig, LifecycleEngine, ScenarioRunner,
};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    None,
    HiInterest,
    LoBalance,
}

impl From<PolicyArg> for AllocationPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::None => AllocationPolicy::None,
            PolicyArg::HiInterest => AllocationPolicy::HiInterest,
            PolicyArg::LoBalance => AllocationPolicy::LoBalance,
        }
    }
}

#[derive(Debug, Parser)]
#[command(about = "Simulate loan portfolio repayment month by month")]
struct Args {
    /// Input CSV: balance,interestRate,minimumPayment,dueDate
    input: PathBuf,

    /// Extra-funds allocation policy
    #[arg(long, value_enum, default_value_t = PolicyArg::None)]
    policy: PolicyArg,

    /// Extra funds applied per month
    #[arg(long, default_value_t = Decimal::ZERO)]
    extra: Decimal,

    /// Sort HI_INTEREST descending (highest rate gets first claim)
    #[arg(long)]
    avalanche: bool,

    /// Month ceiling before the run is treated as non-converging
    #[arg(long, default_value_t = loan_lifecycle::lifecycle::DEFAULT_MAX_MONTHS)]
    max_months: u32,

    /// Write the custom scenario's monthly series to this CSV path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the comparison as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let loans = load_loans(&args.input)
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    println!("Loaded {} loans in {:?}", loans.len(), start.elapsed());

    let config = LifecycleConfig {
        policy: args.policy.into(),
        extra: args.extra,
        avalanche_order: args.avalanche,
        max_months: args.max_months,
        start_date: None,
    };

    let sim_start = Instant::now();
    let runner = ScenarioRunner::new(loans.clone(), config.clone());
    let comparison = runner.compare()?;
    println!("Scenarios complete in {:?}", sim_start.elapsed());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        println!("\nRepayment Breakdown:");
        println!(
            "  Base:   principal=${} interest=${} total=${}",
            comparison.base.total_principal_paid,
            comparison.base.total_interest_paid,
            comparison.base.total_paid
        );
        println!(
            "  Custom: principal=${} (+${} extra) interest=${} (+${} extra) total=${}",
            comparison.custom.total_principal_paid,
            comparison.custom.total_principal_paid_by_extra,
            comparison.custom.total_interest_paid,
            comparison.custom.total_interest_paid_by_extra,
            comparison.custom.total_paid
        );
    }

    if let Some(output) = &args.output {
        let series = LifecycleEngine::simulate(&loans, config)?;
        let mut writer = csv::Writer::from_path(output)
            .with_context(|| format!("failed to create {}", output.display()))?;
        for bucket in series.buckets() {
            writer.serialize(bucket)?;
        }
        writer.flush()?;
        println!(
            "\nSeries written to {} ({} buckets, {} to {})",
            output.display(),
            series.len(),
            series
                .start_date()
                .map(|d| d.to_string())
                .unwrap_or_default(),
            series
                .end_date()
                .map(|d| d.to_string())
                .unwrap_or_default(),
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
