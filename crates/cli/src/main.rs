use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use mapsize::commands::*;
use mapsize::logging::init_logging;
use mapsize_core::config::{OutputTargets, DEFAULT_CONFIG_FILE};

/// Per-module memory usage from GCC and GHS linker map files.
///
/// This CLI is a thin wrapper around `mapsize-core`. Parsing, aggregation and
/// report rendering live in the library so they can be tested on their own.
#[derive(Parser, Debug)]
#[command(
    name = "mapsize",
    version,
    about = "Per-module memory usage from linker map files",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a map file and print sizes per module, largest first.
    Analyze {
        /// Path to the map file.
        #[arg(long)]
        file: String,

        /// Map format: gcc or ghs. Defaults to the config value, then gcc.
        #[arg(long)]
        format: Option<String>,

        /// Skip sections whose name starts with `.debug`.
        #[arg(long)]
        ignore_debug: bool,

        /// Only show the largest N modules.
        #[arg(long)]
        top: Option<usize>,

        /// Print the full report as JSON instead of tables.
        #[arg(long)]
        json: bool,

        /// Config file (YAML or JSON). Defaults to ./mapsize.yaml when present.
        #[arg(long)]
        config: Option<String>,
    },

    /// Print the memory regions declared in a GCC map's Memory Configuration.
    Regions {
        /// Path to the map file.
        #[arg(long)]
        file: String,

        /// Print regions as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Parse a map file and write CSV, text and/or JSON reports.
    ///
    /// If a target file is not writable, the report is written next to it with a
    /// `_new` suffix instead.
    Export {
        /// Path to the map file.
        #[arg(long)]
        file: String,

        /// Map format: gcc or ghs.
        #[arg(long)]
        format: Option<String>,

        /// Skip sections whose name starts with `.debug`.
        #[arg(long)]
        ignore_debug: bool,

        /// Limit the text report to the largest N modules.
        #[arg(long)]
        top: Option<usize>,

        /// CSV output path.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Text report output path.
        #[arg(long)]
        text: Option<PathBuf>,

        /// JSON output path (report plus provenance).
        #[arg(long)]
        json: Option<PathBuf>,

        /// Config file (YAML or JSON). Defaults to ./mapsize.yaml when present.
        #[arg(long)]
        config: Option<String>,
    },

    /// Copy the Module Summary block of a GHS map into its own file.
    ExtractSummary {
        /// Path to the GHS map file.
        #[arg(long)]
        file: String,

        /// Output path.
        #[arg(long, default_value = "module_summary.txt")]
        out: String,
    },

    /// Write a default config file.
    InitConfig {
        /// Destination; `.yaml`, `.yml` or `.json`.
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        path: String,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Print the effective config as JSON.
    ShowConfig {
        /// Config file (YAML or JSON). Defaults to ./mapsize.yaml when present.
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    match cli.command {
        Command::Analyze { file, format, ignore_debug, top, json, config } => {
            analyze_command(&file, format.as_deref(), ignore_debug, top, json, config.as_deref())?
        }
        Command::Regions { file, json } => regions_command(&file, json)?,
        Command::Export { file, format, ignore_debug, top, csv, text, json, config } => {
            export_command(
                &file,
                format.as_deref(),
                ignore_debug,
                top,
                OutputTargets { csv, text, json },
                config.as_deref(),
            )?
        }
        Command::ExtractSummary { file, out } => extract_summary_command(&file, &out)?,
        Command::InitConfig { path, force } => init_config_command(&path, force)?,
        Command::ShowConfig { config } => show_config_command(config.as_deref())?,
    }

    Ok(())
}
