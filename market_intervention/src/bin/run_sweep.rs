//! Parameter Sweep Runner
//!
//! Re-solves one market while stepping a single parameter (tax, subsidy, control
//! price or a curve coefficient) through a list of values, and tabulates how the
//! equilibrium, surplus and price-control gap respond.
//!
//! Usage:
//!   cargo run --release --bin run_sweep -- scenarios/tax_sweep.toml

use clap::Parser;
use market_intervention::config::SweepFile;
use market_intervention::sweep::{self, SweepRow, SweepSummary};
use market_intervention::Result;
use std::io;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "run_sweep")]
#[command(about = "Sweep one market parameter and tabulate the outcomes")]
struct Args {
    /// Sweep definition (scenario sections plus [experiment] and [sweep])
    config: PathBuf,

    /// Base directory for results
    #[arg(long, default_value = "results")]
    results_dir: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    println!("=== Market Intervention Sweep Runner ===\n");
    println!("Loading sweep config: {}\n", args.config.display());

    let sweep_file = SweepFile::from_path(&args.config)?;
    let parameter = sweep_file.sweep.parameter.name();

    println!("Experiment: {}", sweep_file.experiment.name);
    if !sweep_file.experiment.description.is_empty() {
        println!("Description: {}", sweep_file.experiment.description);
    }
    println!(
        "Sweep: {} ∈ {:?} ({} points)\n",
        parameter,
        sweep_file.sweep.values,
        sweep_file.sweep.values.len()
    );

    let rows = sweep::run_sweep(&sweep_file);
    print_table(parameter, &rows);

    let summary = SweepSummary::new(&sweep_file, rows);
    let output_dir = args.results_dir.join(&sweep_file.experiment.name);
    sweep::write_all(&output_dir, &summary)?;

    println!(
        "\n✓ Sweep complete: {}/{} points solved",
        summary.successful_points, summary.num_points
    );
    println!("Results saved to: {}", output_dir.display());
    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.3}", v))
        .unwrap_or_else(|| "-".to_string())
}

fn print_table(parameter: &str, rows: &[SweepRow]) {
    println!(
        "{:<18} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>24}",
        parameter, "P base", "Q base", "P post", "Q post", "CS", "PS", "Gap"
    );
    println!(
        "{:-<18} {:->10} {:->10} {:->10} {:->10} {:->10} {:->10} {:->24}",
        "", "", "", "", "", "", "", ""
    );

    for row in rows {
        if !row.ok {
            println!(
                "{:<18.3} failed: {}",
                row.value,
                row.error.as_deref().unwrap_or("unknown error")
            );
            continue;
        }
        let gap = match (&row.shortage_kind, row.shortage_magnitude) {
            (Some(kind), Some(magnitude)) => format!("{} {:.3}", kind, magnitude),
            _ => "-".to_string(),
        };
        println!(
            "{:<18.3} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>24}",
            row.value,
            fmt_opt(row.baseline_price),
            fmt_opt(row.baseline_quantity),
            fmt_opt(row.post_price),
            fmt_opt(row.post_quantity),
            fmt_opt(row.consumer_surplus),
            fmt_opt(row.producer_surplus),
            gap
        );
    }
}
