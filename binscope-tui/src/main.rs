mod tui;

use binscope_common::{Binning, Config};
use binscope_core::{
    assess, fmt_ratio, load_sample, recompute, source_files, BinningState, Sample, SampleSource,
};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tui::app::App;
use tui::console::TerminalConsole;

fn parse_edge(s: &str) -> Result<f64, String> { // validate edges at CLI parse time
    let v: f64 = s.parse().map_err(|_| format!("not a float: {s}"))?;
    if v.is_finite() && v >= 0.0 { Ok(v) } else { Err(format!("edge must be finite and >= 0, got {v}")) }
}

#[derive(Parser)]
#[command(name = "binscope", version, about = "Interactive histogram binning explorer")]
struct Cli {
    /// write tracing output here; filter via $BINSCOPE_LOG (default: info)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// data sample: .parquet, .json or text file, or a glob pattern
    data: String,
    /// acceptance sample, same formats as the data sample
    acceptance: String,
    #[arg(long)] column: Option<String>,
    #[arg(long)] weight_column: Option<String>,
    #[arg(long)] acceptance_column: Option<String>,
    #[arg(long)] acceptance_weight_column: Option<String>,
    #[arg(long)] bins: Option<usize>,
    #[arg(long, value_parser = parse_edge)] left: Option<f64>,
    #[arg(long, value_parser = parse_edge)] right: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// choose a binning interactively and print it on confirm
    Explore {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)] json: bool,
    },
    /// print the histogram table and quality metrics for the initial binning
    Inspect {
        #[command(flatten)]
        input: InputArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("warning: {e}; using default config");
        Config::default()
    });
    match cli.command {
        Commands::Explore { input, json } => run_explore(&input, json, &config)?,
        Commands::Inspect { input } => run_inspect(&input, &config)?,
    }
    Ok(())
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else { return Ok(()) }; // the TUI owns stdout; log only on request
    let file = std::fs::File::create(path)?;
    let filter = EnvFilter::try_from_env("BINSCOPE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_inputs(input: &InputArgs) -> anyhow::Result<(Sample, Sample)> {
    let data_src = SampleSource { path: input.data.clone(), column: input.column.clone(), weight_column: input.weight_column.clone() };
    let acc_src = SampleSource { path: input.acceptance.clone(), column: input.acceptance_column.clone(), weight_column: input.acceptance_weight_column.clone() };
    let data = load_sample(&data_src).map_err(|e| anyhow::anyhow!("data sample {}: {e}", input.data))?;
    let acceptance = load_sample(&acc_src).map_err(|e| anyhow::anyhow!("acceptance sample {}: {e}", input.acceptance))?;
    if data.is_empty() { anyhow::bail!("data sample {} has no events", input.data); }
    Ok((data, acceptance))
}

/// initial state from the data range, with any CLI overrides applied on top
fn initial_state(input: &InputArgs, data: &Sample, config: &Config) -> anyhow::Result<BinningState> {
    let base = BinningState::from_sample(data, config.binning.initial_bins)?;
    if input.bins.is_none() && input.left.is_none() && input.right.is_none() {
        return Ok(base);
    }
    let state = BinningState::new(
        input.bins.unwrap_or(base.n_bins()),
        input.left.unwrap_or(base.left()),
        input.right.unwrap_or(base.right()),
    )?;
    Ok(state)
}

fn run_explore(input: &InputArgs, json: bool, config: &Config) -> anyhow::Result<()> {
    let (data, acceptance) = load_inputs(input)?;
    let state = initial_state(input, &data, config)?;
    let mut app = App::new(state, data, acceptance, config);
    let binning = {
        let mut console = TerminalConsole::open(&config.display)?;
        app.run(&mut console)?
    }; // console dropped here, terminal restored before printing
    print_binning(&binning, json)?;
    Ok(())
}

fn format_binning(b: &Binning, json: bool) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string(b)?)
    } else {
        Ok(format!("{} {} {}", b.n_bins, b.left, b.right))
    }
}

fn print_binning(b: &Binning, json: bool) -> anyhow::Result<()> {
    println!("{}", format_binning(b, json)?);
    Ok(())
}

fn run_inspect(input: &InputArgs, config: &Config) -> anyhow::Result<()> {
    for (label, path) in [("data", &input.data), ("acceptance", &input.acceptance)] {
        let files = source_files(&SampleSource::new(path.as_str())).map_err(|e| anyhow::anyhow!("{e}"))?;
        println!("{:<24} {} file(s)", format!("{label}:"), files.len());
    }
    let (data, acceptance) = load_inputs(input)?;
    let state = initial_state(input, &data, config)?;
    let snapshot = recompute(&state, &data, &acceptance);
    let metrics = assess(&snapshot, config.binning.ratio_target);
    println!("{:<24} {} (total weight {:.3})", "data_events:", data.len(), data.total_weight());
    println!("{:<24} {} (total weight {:.3})", "acceptance_events:", acceptance.len(), acceptance.total_weight());
    println!("{:<24} {} [{}, {}]", "binning:", state.n_bins(), state.left(), state.right());
    println!();
    println!("{:>12} {:>12} {:>12} {:>8} {:>12} {:>8} {:>10}", "lo", "hi", "data_w", "data_n", "acc_w", "acc_n", "ratio");
    for i in 0..snapshot.n_bins() {
        println!(
            "{:>12.4} {:>12.4} {:>12.3} {:>8} {:>12.3} {:>8} {:>10}",
            snapshot.edges[i], snapshot.edges[i + 1],
            snapshot.data_weighted[i], snapshot.data_unweighted[i],
            snapshot.acceptance_weighted[i], snapshot.acceptance_unweighted[i],
            fmt_ratio(Some(metrics.ratios[i])),
        );
    }
    println!();
    println!("{:<24} {}", "min_data_count:", metrics.min_data_count);
    println!("{:<24} {}", "min_ratio:", fmt_ratio(metrics.min_ratio));
    println!("{:<24} {}", format!("ratio > {}:", metrics.ratio_target), if metrics.meets_target() { "yes" } else { "no" });
    Ok(())
}
