// SimHist - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading (platform default or --config)
// 3. Logging initialisation (debug mode support)
// 4. Dispatch to the run or single-file extract command

use clap::{Args, Parser, Subcommand};
use simhist::app::run::{self, RunOptions};
use simhist::core::{collection, export};
use simhist::platform::config::{self, AppConfig, PlatformPaths};
use simhist::ui::chart;
use simhist::util;
use std::path::PathBuf;

/// SimHist - energy histogram over a directory of simulation logs.
///
/// Reads the value under the "Atoms Step" header of every log, collects the
/// values into an output file, and prints a histogram over fixed bins.
#[derive(Parser, Debug)]
#[command(name = "simhist", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (defaults to the platform config directory).
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process every log in the input directory and print the histogram.
    Run(RunArgs),

    /// Extract the value from one log and append it to an output file.
    Extract(ExtractArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Output collection file (deleted and recreated on every run).
    output_name: PathBuf,

    /// Directory holding the simulation logs.
    #[arg(short = 'i', long = "input-dir")]
    input_dir: Option<PathBuf>,

    /// Number of leading directory entries that are not logs.
    #[arg(short = 's', long = "skip")]
    skip: Option<usize>,

    /// Also write the histogram to this .csv or .json file.
    #[arg(short = 'e', long = "export")]
    export: Option<PathBuf>,

    /// Record logs that fail to parse as missing instead of aborting.
    #[arg(short = 'k', long = "keep-going")]
    keep_going: bool,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Log file name, resolved under the input directory.
    log_name: PathBuf,

    /// Output collection file to append to.
    output_name: PathBuf,

    /// Directory holding the simulation logs.
    #[arg(short = 'i', long = "input-dir")]
    input_dir: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // Config is loaded before tracing exists; its warnings are replayed below.
    let loaded = match cli.config {
        Some(ref path) => config::load_config_strict(path),
        None => Ok(config::load_config(&PlatformPaths::resolve().config_file())),
    };
    let (app_config, config_warnings) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "SimHist starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    let result = match cli.command {
        Command::Run(args) => run_command(&app_config, args),
        Command::Extract(args) => extract_command(&app_config, args),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Run failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_command(app_config: &AppConfig, args: RunArgs) -> util::error::Result<()> {
    let (mut options, warnings) = RunOptions::from_config(app_config, args.output_name);
    for warning in &warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }
    if let Some(dir) = args.input_dir {
        options.input_dir = dir;
    }
    if let Some(skip) = args.skip {
        options.discovery.skip_leading = skip;
    }
    options.keep_going = args.keep_going;

    let report = run::run_pipeline(&options)?;

    print!(
        "{}",
        chart::render_text(&report.summary.histogram, app_config.bar_width)
    );
    println!(
        "files: {}  values: {}  missing: {}  failed: {}",
        report.summary.files_processed,
        report.summary.values_extracted,
        report.summary.missing,
        report.summary.failed
    );

    if let Some(ref path) = args.export {
        export::export_to_file(&report.summary, path)?;
    }
    Ok(())
}

fn extract_command(app_config: &AppConfig, args: ExtractArgs) -> util::error::Result<()> {
    let input_dir = args.input_dir.unwrap_or_else(|| app_config.input_dir.clone());
    let log_path = input_dir.join(&args.log_name);
    let extract_config = run::extract_config(app_config);

    let extraction =
        run::extract_to_collection(&log_path, &args.output_name, &extract_config)?;
    println!("{}", collection::format_entry(extraction.value));
    Ok(())
}
