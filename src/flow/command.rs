// src/flow/command.rs

//! Shell-command task bodies for flows declared in the project config.

use std::process::Command;

use anyhow::Context;
use tracing::{info, warn};

use crate::config::model::FlowConfig;
use crate::errors::Result;
use crate::flow::model::{Flow, Task, TaskContext};
use crate::types::TaskOutcome;

/// A task that runs one shell command and reports its exit status.
///
/// The command runs in the project directory with stdout/stderr inherited,
/// so tool output goes straight to the terminal.
#[derive(Debug, Clone)]
pub struct CommandTask {
    name: String,
    cmd: String,
}

impl CommandTask {
    pub fn new(name: impl Into<String>, cmd: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cmd: cmd.into(),
        }
    }

    fn shell_command(&self) -> Command {
        if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&self.cmd);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&self.cmd);
            c
        }
    }
}

impl Task for CommandTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, ctx: &TaskContext) -> anyhow::Result<TaskOutcome> {
        info!(task = %self.name, cmd = %self.cmd, "starting task process");

        let mut cmd = self.shell_command();
        cmd.current_dir(&ctx.project_dir)
            .env("STARGATE_FLOW", &ctx.flow_name)
            .env("STARGATE_SECTION", &ctx.section_name)
            .env("STARGATE_TASK", &ctx.task_name)
            .env("STARGATE_TASK_DIR", &ctx.output_dir)
            .env("STARGATE_PROJECT_DIR", &ctx.project_dir);
        if let Some(target) = &ctx.target_name {
            cmd.env("STARGATE_TARGET", target);
        }
        if let Some(file_list) = &ctx.file_list {
            cmd.env("STARGATE_FILE_LIST", file_list);
        }

        let status = cmd
            .status()
            .with_context(|| format!("spawning process for task '{}'", self.name))?;

        let code = status.code().unwrap_or(-1);
        info!(task = %self.name, exit_code = code, success = status.success(), "task process exited");

        if status.success() {
            Ok(TaskOutcome::Success)
        } else {
            warn!(task = %self.name, exit_code = code, "task command failed");
            Ok(TaskOutcome::failed(
                code,
                format!("command `{}` exited with {}", self.cmd, status),
            ))
        }
    }
}

/// Build a flow of [`CommandTask`]s from its config declaration.
pub fn command_flow(name: &str, cfg: &FlowConfig) -> Result<Flow> {
    let mut flow = Flow::new(name);
    for section_cfg in &cfg.sections {
        let section = flow.add_section(section_cfg.name.as_str())?;
        for task_cfg in &section_cfg.tasks {
            flow.add_task(
                section,
                Box::new(CommandTask::new(task_cfg.name.as_str(), task_cfg.cmd.as_str())),
            )?;
        }
    }
    Ok(flow)
}
