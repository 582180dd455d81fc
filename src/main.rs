// TimeScan - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and CLI overrides
// 3. Logging initialisation (debug mode support)
// 4. Grid scan and output to stdout

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use timescan::app::scan::Scanner;
use timescan::core::discovery;
use timescan::core::export;
use timescan::core::model::OutputFormat;
use timescan::platform::config::{self, AppConfig, Overrides, PlatformPaths};
use timescan::util::{
    self,
    error::{Result, TimeScanError},
};

/// TimeScan - benchmark timing extractor.
///
/// Walks `<BASE_DIR>/<language>/thread_<N>_<size>_<power>.log` for every
/// combination of the configured grid and prints the value of each line
/// containing the marker, grouped for plotting.
#[derive(Parser, Debug)]
#[command(name = "timescan", version, about)]
struct Cli {
    /// Directory containing one sub-directory of logs per language.
    base_dir: Option<PathBuf>,

    /// Path to config.toml (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Language to scan; repeat to scan several. Replaces the configured list.
    #[arg(short = 'l', long = "language")]
    languages: Vec<String>,

    /// Power flag to scan; repeatable.
    #[arg(short = 'p', long = "power")]
    power_flags: Vec<String>,

    /// Input size to scan; repeatable.
    #[arg(short = 's', long = "size")]
    sizes: Vec<String>,

    /// Thread count to scan; repeatable.
    #[arg(short = 't', long = "threads")]
    thread_counts: Vec<u32>,

    /// Substring selecting timing lines (default "par").
    #[arg(short = 'm', long = "marker")]
    marker: Option<String>,

    /// Output format: text, csv or json.
    #[arg(short = 'f', long = "format", value_parser = parse_format)]
    format: Option<OutputFormat>,

    /// Infer the grid from the files present under BASE_DIR.
    #[arg(long = "discover")]
    discover: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    OutputFormat::from_str_loose(s).ok_or_else(|| format!("unknown format '{s}' (text, csv, json)"))
}

fn main() {
    let cli = Cli::parse();

    // Config is loaded before logging so its level can take part in the
    // filter; its outcome is reported once the subscriber exists.
    let (config_path, required) = match cli.config {
        Some(ref p) => (p.clone(), true),
        None => (PlatformPaths::resolve().config_file(), false),
    };
    let loaded = config::load_config(&config_path, required);

    let level = loaded
        .as_ref()
        .ok()
        .and_then(|(c, _)| c.log_level.clone());
    util::logging::init(cli.debug, level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        config_found = config_path.is_file(),
        "TimeScan starting"
    );

    let result = loaded
        .map_err(TimeScanError::from)
        .and_then(|(app_config, warnings)| {
            if !warnings.is_empty() {
                tracing::warn!(count = warnings.len(), "Config validation produced warnings");
            }
            for w in &warnings {
                tracing::warn!(warning = %w, "Config warning");
            }
            run(cli, app_config)
        });

    if let Err(e) = result {
        tracing::error!(error = %e, "Run aborted");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, mut app_config: AppConfig) -> Result<()> {
    if cli.discover {
        let base = cli
            .base_dir
            .clone()
            .unwrap_or_else(|| app_config.grid.base_dir.clone());
        app_config.grid = discovery::discover_grid(&base)?;
    }

    app_config.apply_overrides(Overrides {
        base_dir: cli.base_dir,
        languages: cli.languages,
        power_flags: cli.power_flags,
        sizes: cli.sizes,
        thread_counts: cli.thread_counts,
        marker: cli.marker,
        format: cli.format,
    })?;

    tracing::debug!(
        grid = ?app_config.grid,
        marker = %app_config.marker,
        format = app_config.format.label(),
        "Effective configuration"
    );

    let scanner = Scanner::new(&app_config.grid, &app_config.marker);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match app_config.format {
        OutputFormat::Text => scanner.run(&mut out)?,
        OutputFormat::Csv => {
            let samples = scanner.collect()?;
            export::export_csv(&samples, &mut out)?;
        }
        OutputFormat::Json => {
            let samples = scanner.collect()?;
            export::export_json(&samples, &mut out)?;
        }
    }

    out.flush().map_err(|source| TimeScanError::Io {
        path: PathBuf::from("<stdout>"),
        operation: "flush",
        source,
    })?;
    Ok(())
}
