//! Market Intervention Simulator
//!
//! Reads a linear market (interactively or from a TOML scenario), solves it with
//! and without a tax/subsidy, reports surpluses and any price-control gap, and draws
//! the chart.
//!
//! Usage:
//!   cargo run --bin market_intervention
//!   cargo run --bin market_intervention -- --config scenarios/textbook_tax.toml --output results/tax

use clap::Parser;
use market_intervention::chart::{ChartStyle, LabelLanguage, SvgRenderer};
use market_intervention::config::ScenarioFile;
use market_intervention::input::PromptReader;
use market_intervention::{output, MarketSimulation, Result};
use std::io;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "market_intervention")]
#[command(about = "Linear supply/demand equilibrium with taxes, subsidies and price controls")]
#[command(version)]
struct Args {
    /// TOML scenario file; prompts on stdin when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the chart
    #[arg(long, default_value = "market.svg")]
    svg: PathBuf,

    /// Skip drawing the chart
    #[arg(long)]
    no_chart: bool,

    /// Directory for summary.json and curves.csv
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Label and prompt language, overriding the scenario file
    #[arg(long, value_enum)]
    labels: Option<LabelLanguage>,
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
    let (params, price_control, mut style) = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading scenario");
            let scenario = ScenarioFile::from_path(path)?;
            (
                scenario.parameters()?,
                scenario.price_control()?,
                scenario.chart_style(),
            )
        }
        None => {
            println!("=== Market for Good A: Intervention Simulator ===\n");
            let language = args.labels.unwrap_or(LabelLanguage::English);
            let stdin = io::stdin();
            let mut reader =
                PromptReader::new(stdin.lock(), io::stdout()).with_language(language);
            let (params, control) = reader.read_scenario()?;
            (params, control, ChartStyle::for_language(language))
        }
    };

    if let Some(language) = args.labels {
        let overridden = ChartStyle::for_language(language);
        style.labels = overridden.labels;
        style.font_family = overridden.font_family;
        style.unicode_minus = overridden.unicode_minus;
    }

    let simulation = MarketSimulation::new(params, price_control);
    let result = if args.no_chart {
        simulation.run()?
    } else {
        let mut renderer = SvgRenderer::new(&args.svg);
        simulation.run_and_render(&mut renderer, &style)?
    };

    result.print_summary();

    if let Some(dir) = &args.output {
        output::write_all(dir, &result, &style)?;
        println!("\nResults saved to: {}", dir.display());
    }
    if !args.no_chart {
        println!("Chart saved to: {}", args.svg.display());
    }

    Ok(())
}
