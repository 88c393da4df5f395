// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::DEFAULT_CONFIG_FILE;
use crate::driver::DEFAULT_OUTPUT_DIR;

/// Command-line arguments for `stargate`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stargate",
    version,
    about = "Run checkpointed hardware build flows for project targets.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the project file (TOML).
    ///
    /// Default: `stargate.toml` in the current working directory.
    #[arg(short = 'c', long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Output directory for status records and file lists.
    #[arg(short = 'o', long, value_name = "PATH", default_value = DEFAULT_OUTPUT_DIR)]
    pub out_dir: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STARGATE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the loaded file sets and targets.
    #[arg(long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Remove the output directory.
    Clean,

    /// Write the file list of every target without running anything.
    Files,

    /// Run the full flow (build, then run) of a target.
    Run {
        target: String,
        /// Skip tasks that already succeeded.
        #[arg(long)]
        resume: bool,
    },

    /// Run every task of one section of a target's flow.
    Section {
        target: String,
        section: String,
        /// Skip tasks that already succeeded.
        #[arg(long)]
        resume: bool,
    },

    /// Run a single task of a target's flow.
    Task { target: String, task: String },

    /// Run the tasks from START to END (inclusive) of one section.
    Range {
        target: String,
        start: String,
        end: String,
        /// Skip tasks that already succeeded.
        #[arg(long)]
        resume: bool,
    },

    /// Show the recorded status of every task of a target's flow.
    Status { target: String },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
