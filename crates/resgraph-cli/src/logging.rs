use crate::cli::Cli;
use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt,
    prelude::*,
};

/// Target prefix shared by events from the library and from this binary.
const RESGRAPH_TARGET: &str = "resgraph";

/// Dependencies never log above this level, whatever `-v` asks for.
const DEPENDENCY_CEILING: LevelFilter = LevelFilter::WARN;

#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub file: Option<PathBuf>,
}

impl LogSettings {
    pub fn from_cli(cli: &Cli) -> Self {
        let level = if cli.quiet {
            LevelFilter::ERROR
        } else {
            match cli.verbose {
                0 => LevelFilter::WARN,
                1 => LevelFilter::INFO,
                2 => LevelFilter::DEBUG,
                _ => LevelFilter::TRACE,
            }
        };
        Self {
            level,
            file: cli.log_file.clone(),
        }
    }

    fn targets(&self) -> Targets {
        Targets::new()
            .with_target(RESGRAPH_TARGET, self.level)
            .with_default(self.level.min(DEPENDENCY_CEILING))
    }
}

/// Installs the global subscriber: compact stderr output, plus a plain-text file
/// with thread ids when `--log-file` is given.
pub fn init(settings: &LogSettings) -> Result<()> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let file_layer = match &settings.file {
        Some(path) => Some(
            fmt::layer()
                .with_writer(File::create(path)?)
                .with_ansi(false)
                .with_thread_ids(true),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(settings.targets())
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {}", e)))
}
