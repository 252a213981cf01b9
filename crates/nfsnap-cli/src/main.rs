mod channel_cmd;
mod check_cmd;
mod info_cmd;
mod normalize_cmd;
mod verify_cmd;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use nfsnap::config;
use nfsnap_common::options::FilterOptions;
use nfsnap_filter::Diagnostic;

#[derive(Parser)]
#[command(
    name = "nfsnap",
    version,
    about = "Normalize Nextflow logs and outputs into stable, diffable snapshots"
)]
struct Cli {
    /// Options file (TOML, or JSON when the name ends in .json)
    #[arg(long, global = true, env = "NFSNAP_CONFIG")]
    config: Option<PathBuf>,

    /// Show option resolution details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Option flags shared by `normalize` and `run`. They are layered over the
/// options file.
#[derive(Args, Debug, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
struct FilterArgs {
    /// Keep the original line order and duplicates
    #[arg(long)]
    unsorted: bool,
    /// Keep ANSI color sequences
    #[arg(long)]
    keep_ansi: bool,
    /// Drop lines containing SUBSTRING (repeatable)
    #[arg(long, value_name = "SUBSTRING")]
    ignore: Vec<String>,
    /// Keep only lines containing SUBSTRING (repeatable)
    #[arg(long, value_name = "SUBSTRING")]
    include: Vec<String>,
    /// Replace matches of REGEX with [FILTERED] (repeatable)
    #[arg(long = "pattern", value_name = "REGEX")]
    patterns: Vec<String>,
}

impl FilterArgs {
    fn overlay(&self, base: FilterOptions) -> FilterOptions {
        base.merged_with(&FilterOptions {
            additional_patterns: self.patterns.clone(),
            sorted: !self.unsorted,
            keep_ansi: self.keep_ansi,
            ignore: self.ignore.clone(),
            include: self.include.clone(),
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a log file (or stdin) and print the canonical lines
    Normalize {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,
        #[command(flatten)]
        filter: FilterArgs,
        /// Print the canonical lines as a JSON array
        #[arg(long)]
        json: bool,
        /// Parse the input as JSON (string, array of lines or any value)
        #[arg(long)]
        json_input: bool,
    },
    /// Run a command and print its normalized output
    Run {
        #[command(flatten)]
        filter: FilterArgs,
        /// Print the canonical lines as a JSON array
        #[arg(long)]
        json: bool,
        #[arg(trailing_var_arg = true, required = true)]
        command_args: Vec<String>,
    },
    /// Run declarative snapshot cases
    Verify {
        /// Directory holding case files (searched recursively)
        #[arg(default_value = "tests/snapshots")]
        dir: PathBuf,
        /// Only run cases whose name matches REGEX
        #[arg(long, value_name = "REGEX")]
        case: Option<String>,
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate an options file or a snapshot case file
    Check {
        /// Path to the file
        path: PathBuf,
    },
    /// Sanitize a channel output map (JSON) for snapshotting
    Channel {
        /// JSON file holding the channel map
        file: PathBuf,
        /// Key whose values hold unstable paths (repeatable)
        #[arg(long = "unstable-key", value_name = "KEY")]
        unstable_keys: Vec<String>,
    },
    /// Show version, options search paths and the active scrub set
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn or_exit(r: anyhow::Result<i32>) -> i32 {
    r.unwrap_or_else(|e| {
        eprintln!("[nfsnap] error: {e:#}");
        1
    })
}

/// Options file resolution followed by the command-line overlay.
fn resolve_options(cli: &Cli, filter: &FilterArgs) -> anyhow::Result<FilterOptions> {
    let resolved =
        config::resolve_options(cli.config.as_deref(), &config::default_search_paths())?;
    if cli.verbose {
        match &resolved.source {
            Some(path) => eprintln!("[nfsnap] options from {}", path.display()),
            None => eprintln!("[nfsnap] no options file found, using defaults"),
        }
    }
    Ok(filter.overlay(resolved.options))
}

fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        eprintln!("[nfsnap] warning: {d}");
    }
}

fn cmd_normalize(
    cli: &Cli,
    file: Option<&Path>,
    filter: &FilterArgs,
    json: bool,
    json_input: bool,
) -> anyhow::Result<i32> {
    let opts = resolve_options(cli, filter)?;
    normalize_cmd::cmd_normalize(file, &opts, json, json_input)
}

fn cmd_run(cli: &Cli, command_args: &[String], filter: &FilterArgs, json: bool) -> anyhow::Result<i32> {
    let opts = resolve_options(cli, filter)?;
    normalize_cmd::cmd_run(command_args, &opts, json, cli.verbose)
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match &cli.command {
        Commands::Normalize {
            file,
            filter,
            json,
            json_input,
        } => or_exit(cmd_normalize(&cli, file.as_deref(), filter, *json, *json_input)),
        Commands::Run {
            filter,
            json,
            command_args,
        } => or_exit(cmd_run(&cli, command_args, filter, *json)),
        Commands::Verify { dir, case, json } => {
            or_exit(verify_cmd::cmd_verify(dir, case.as_deref(), *json))
        }
        Commands::Check { path } => check_cmd::cmd_check(path),
        Commands::Channel {
            file,
            unstable_keys,
        } => or_exit(channel_cmd::cmd_channel(file, unstable_keys)),
        Commands::Info { json } => info_cmd::cmd_info(cli.config.as_deref(), *json),
    };
    std::process::exit(exit_code);
}
