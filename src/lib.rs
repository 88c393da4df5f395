// src/lib.rs

pub mod cli;
pub mod config;
pub mod driver;
pub mod errors;
pub mod files;
pub mod flow;
pub mod fs;
pub mod logging;
pub mod project;
pub mod types;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::cli::{CliArgs, Command};
use crate::config::{ProjectConfig, dump_config, load_and_validate};
use crate::driver::Stargate;
use crate::errors::Result;
use crate::flow::{ExecuteOptions, TaskStatusEntry};
use crate::fs::RealFileSystem;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - project config loading (skipped for `clean`)
/// - the built-in and project-declared flows
/// - the requested target-level operation
pub fn run(args: CliArgs) -> Result<()> {
    let mut stargate = Stargate::new(Arc::new(RealFileSystem), &args.out_dir)?;

    match args.command {
        Command::Clean => {
            stargate.clean()?;
        }
        Command::Files => {
            let project = load_project(&mut stargate, &args.config, args.verbose)?;
            stargate.write_file_lists(&project)?;
        }
        Command::Run { target, resume } => {
            let project = load_project(&mut stargate, &args.config, args.verbose)?;
            stargate
                .with_options(ExecuteOptions { resume })
                .run(&project, &target)?;
        }
        Command::Section {
            target,
            section,
            resume,
        } => {
            let project = load_project(&mut stargate, &args.config, args.verbose)?;
            stargate
                .with_options(ExecuteOptions { resume })
                .run_section(&project, &target, &section)?;
        }
        Command::Task { target, task } => {
            let project = load_project(&mut stargate, &args.config, args.verbose)?;
            stargate.execute_task(&project, &target, &task)?;
        }
        Command::Range {
            target,
            start,
            end,
            resume,
        } => {
            let project = load_project(&mut stargate, &args.config, args.verbose)?;
            stargate
                .with_options(ExecuteOptions { resume })
                .execute_range(&project, &target, &start, &end)?;
        }
        Command::Status { target } => {
            let project = load_project(&mut stargate, &args.config, args.verbose)?;
            print_status(&stargate, &project, &target)?;
        }
    }

    Ok(())
}

/// Load and validate the project file, then register its command flows.
fn load_project(stargate: &mut Stargate, config: &str, verbose: bool) -> Result<ProjectConfig> {
    let project = load_and_validate(PathBuf::from(config))?;
    if verbose {
        dump_config(&project);
    }
    stargate.register_project_flows(&project)?;
    Ok(project)
}

/// Print one line per task of the target's flow, in execution order.
fn print_status(stargate: &Stargate, project: &ProjectConfig, target: &str) -> Result<()> {
    let (flow, entries) = stargate.status(project, target)?;

    println!("target {target} (flow {flow})");
    for entry in &entries {
        println!("  {}", format_status_line(entry));
    }

    debug!(tasks = entries.len(), "status report complete");
    Ok(())
}

fn format_status_line(entry: &TaskStatusEntry) -> String {
    let mut line = format!("{:<12} {:<16} {:<12}", entry.section, entry.task, entry.status());
    if let Some(record) = &entry.record {
        line.push_str(&format!(" {} ({} ms)", record.timestamp, record.duration_ms));
        if !record.error.is_empty() {
            line.push_str(&format!(" exit {}: {}", record.exit_code, record.error));
        }
    }
    line
}
