//! rustcoinc CLI
//!
//! Runs coincidence / anti-coincidence matching and count-rate histograms on
//! recorded detector channels.
#![allow(clippy::uninlined_format_args, clippy::too_many_lines)]

use clap::{Parser, Subcommand};

use rustcoinc_algorithms::{
    assemble_table, count_rate, find_coincidences, Coincidences, MatcherKind,
};
use rustcoinc_core::{
    parse_roles, ChannelId, ChannelRole, ChannelSet, CoincidenceConfig, CoincidenceTable,
};
use rustcoinc_io::{load_channels, TableFileWriter};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error: {0}")]
    RustcoincIo(#[from] rustcoinc_io::Error),

    #[error("Core error: {0}")]
    Core(#[from] rustcoinc_core::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("either --roles and --window or --config is required")]
    MissingConfig,
}

/// Coincidence processing for multi-channel detector telescopes.
#[derive(Parser)]
#[command(name = "rustcoinc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find coincident events across channels A-D
    Coincidence {
        /// Input channel file (.json, or .h5/.hdf5 with the hdf5 feature)
        input: PathBuf,

        /// Roles of channels A-D, e.g. "CCAI" (I = ignore, C = coincidence, A = anti)
        #[arg(short, long)]
        roles: Option<String>,

        /// Coincidence window (seconds)
        #[arg(short, long)]
        window: Option<f64>,

        /// JSON file with a serialized configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output file (.csv or .json); CSV on stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Histogram the count rate of one channel
    Rate {
        /// Input channel file
        input: PathBuf,

        /// Channel to histogram (A-D)
        #[arg(short, long)]
        channel: ChannelId,

        /// Bin width (seconds)
        #[arg(short, long)]
        bin_width: f64,

        /// Output CSV file; stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show event counts and time ranges per channel
    Info {
        /// Input channel file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Coincidence {
            input,
            roles,
            window,
            config,
            output,
        } => {
            let config = resolve_config(roles.as_deref(), window, config.as_deref())?;
            let channels = load_channels(&input)?;

            let start = Instant::now();
            let found = run_matcher(&channels, &config)?;
            let table = assemble_table(&found.matched, !found.kind.uses_veto());
            let elapsed = start.elapsed();

            let summary = format!(
                "{} [{}]: {} coincidences in {:.3}s (window {} s)",
                found.kind,
                role_codes(&config),
                table.num_rows(),
                elapsed.as_secs_f64(),
                config.window
            );
            match output {
                Some(path) => {
                    write_table(&table, &path)?;
                    println!("{}", summary);
                    println!("Output: {}", path.display());
                }
                None => {
                    TableFileWriter::from_writer(std::io::stdout().lock())
                        .write_table_csv(&table)?;
                    eprintln!("{}", summary);
                }
            }
        }

        Commands::Rate {
            input,
            channel,
            bin_width,
            output,
        } => {
            let channels = load_channels(&input)?;
            let events = channels.get(channel);
            events.validate(channel)?;

            let rate = count_rate(&events.timestamps, bin_width)?;
            log::debug!("channel {}: {} bins of {} s", channel, rate.len(), bin_width);
            match output {
                Some(path) => {
                    TableFileWriter::create(&path)?.write_rate_csv(&rate)?;
                    println!("Wrote {} bins to {}", rate.len(), path.display());
                }
                None => {
                    TableFileWriter::from_writer(std::io::stdout().lock()).write_rate_csv(&rate)?;
                }
            }
        }

        Commands::Info { input } => {
            let channels = load_channels(&input)?;
            println!("File: {}", input.display());
            print_channel_summary(&channels);
        }
    }

    Ok(())
}

/// `-v` lowers the default filter to `debug`; `RUST_LOG` always wins.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Builds the run configuration from a config file and/or flags.
///
/// Flags override the corresponding config file entries.
fn resolve_config(
    roles: Option<&str>,
    window: Option<f64>,
    config_path: Option<&Path>,
) -> Result<CoincidenceConfig> {
    let mut config = match config_path {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            serde_json::from_reader(reader)?
        }
        None => {
            if roles.is_none() || window.is_none() {
                return Err(CliError::MissingConfig);
            }
            CoincidenceConfig::new()
        }
    };

    if let Some(roles) = roles {
        config = config.with_roles(parse_roles(roles)?);
    }
    if let Some(window) = window {
        config = config.with_window(window);
    }
    Ok(config)
}

/// Checks the role layout, then the participating channels, then matches.
fn run_matcher(channels: &ChannelSet, config: &CoincidenceConfig) -> Result<Coincidences> {
    MatcherKind::for_config(config)?;
    for id in config
        .coincidence_channels()
        .into_iter()
        .chain(config.anti_channels())
    {
        channels.get(id).validate(id)?;
    }
    Ok(find_coincidences(channels, config)?)
}

/// Roles of channels A-D as a code string such as `CCAI`.
fn role_codes(config: &CoincidenceConfig) -> String {
    config.roles.iter().copied().map(ChannelRole::code).collect()
}

fn write_table(table: &CoincidenceTable, path: &Path) -> Result<()> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or_else(|| "csv".to_string(), |ext| ext.to_lowercase());

    let mut writer = TableFileWriter::create(path)?;
    match format.as_str() {
        "json" => writer.write_table_json(table)?,
        "csv" => writer.write_table_csv(table)?,
        other => {
            log::warn!("Unknown extension '{}', defaulting to CSV", other);
            writer.write_table_csv(table)?;
        }
    }
    Ok(())
}

fn print_channel_summary(channels: &ChannelSet) {
    println!("{:<8} | {:>10} | {:>14} | {:>14}", "Channel", "Events", "First (s)", "Last (s)");
    println!("{:-<55}", "");
    for channel in channels.iter() {
        match channel.events.time_range() {
            Some((first, last)) => println!(
                "{:<8} | {:>10} | {:>14.6} | {:>14.6}",
                channel.id.label(),
                channel.events.len(),
                first,
                last
            ),
            None => println!("{:<8} | {:>10} | {:>14} | {:>14}", channel.id.label(), 0, "-", "-"),
        }
    }
}
