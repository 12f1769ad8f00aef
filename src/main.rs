//! Logo Thicken CLI
//!
//! Usage:
//!   logo-thicken [OPTIONS] <INPUT> <OUTPUT>
//!
//! Options:
//!   -c, --config <FILE>            Thickening config (TOML format)
//!   -w, --stroke-width <WIDTH>     Stroke width added to each path
//!       --background-fill <COLOR>  Fill treated as background (repeatable)
//!       --keep-prefixes            Leave a prefixed SVG namespace as is
//!   -q, --quiet                    Only print warnings and errors
//!   -v, --verbose                  Print every change made
//!   -h, --help                     Print help

use std::path::PathBuf;

use clap::Parser;
use log::{Level, LevelFilter, Log, Metadata, Record};

use logo_thicken::{transform_with_config, ThickenConfig, TransformConfig};

#[derive(Parser)]
#[command(name = "logo-thicken")]
#[command(about = "Remove the background from an SVG logo and thicken its shapes")]
struct Cli {
    /// Input SVG file
    input: PathBuf,

    /// Output SVG file (may be the same as the input)
    output: PathBuf,

    /// Thickening config file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stroke width added to each path
    #[arg(short = 'w', long)]
    stroke_width: Option<String>,

    /// Fill color treated as background; replaces the default list
    #[arg(long = "background-fill", value_name = "COLOR")]
    background_fills: Vec<String>,

    /// Leave a prefixed SVG namespace as is
    #[arg(long)]
    keep_prefixes: bool,

    /// Only print warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print every change made
    #[arg(short, long)]
    verbose: bool,
}

/// Writes log records to stderr, without timestamps
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            Level::Info => eprintln!("{}", record.args()),
            level => eprintln!("{}: {}", level.to_string().to_lowercase(), record.args()),
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LevelFilter::Warn
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }

    // Load config, then let flags override it
    let mut thicken = match &cli.config {
        Some(path) => match ThickenConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ThickenConfig::default(),
    };
    if let Some(width) = cli.stroke_width {
        thicken = thicken.with_stroke_width(width);
    }
    if !cli.background_fills.is_empty() {
        thicken = thicken.with_background_fills(cli.background_fills);
    }

    let config = TransformConfig::new()
        .with_thicken(thicken)
        .with_namespace_normalization(!cli.keep_prefixes);

    match transform_with_config(&cli.input, &cli.output, &config) {
        Ok(report) => {
            log::debug!("{}", report);
            println!("Successfully processed logo to {}", cli.output.display());
        }
        Err(e) => {
            eprintln!("Error processing SVG: {}", e);
            if let Some(diagnostic) = e.diagnostic(&cli.input.display().to_string()) {
                eprint!("{}", diagnostic);
            }
            std::process::exit(1);
        }
    }
}
