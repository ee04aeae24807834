use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "resgraph - Builds residue-level spatial graphs of protein structures and exports them as validated arrays.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for the pair search.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the residue graph of a structure, validate its encoding, and export it as CSV.
    Build(BuildArgs),
    /// Print the residue feature table.
    Table,
}

/// Structure file formats accepted by `build`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Pdb,
    Csv,
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    // --- Core Arguments ---
    /// Path to the input structure file (PDB, or CSV with name,x,y,z columns).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Directory to write nodes.csv and edges.csv into.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Input format. Inferred from the file extension when omitted.
    #[arg(long, value_enum)]
    pub format: Option<InputFormat>,

    // --- Graph Overrides ---
    /// Override the distance cutoff in Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Override the neighbor count used in k-nearest mode.
    #[arg(short = 'k', long, value_name = "INT")]
    pub k_neighbors: Option<usize>,

    /// Override the neighbor mode ('cutoff' or 'k-nearest').
    #[arg(long, value_name = "MODE")]
    pub neighbor_mode: Option<String>,

    /// Override the pair search strategy ('brute-force' or 'cell-list').
    #[arg(long, value_name = "STRATEGY")]
    pub search: Option<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S graph.distance-cutoff=6.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
