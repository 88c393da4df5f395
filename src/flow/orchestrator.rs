// src/flow/orchestrator.rs

//! Ordered, checkpointed execution of flow tasks.
//!
//! Every task has a global position `(section rank, task rank)`. Before
//! anything runs, all tasks in front of the first task to execute must have a
//! `success` record in the [`StatusStore`]. Records are re-read from disk at
//! check time, so progress made by an earlier invocation counts and stale
//! in-memory state can never let a task jump the queue.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, error, info};

use crate::errors::{LookupKind, Result, StargateError};
use crate::flow::model::{Flow, Section, Task, TaskContext, TaskId};
use crate::flow::status::{StatusRecord, StatusStore};
use crate::types::{TaskOutcome, TaskStatus};

/// Invocation-wide facts handed to every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunContext {
    pub project_dir: PathBuf,
    pub target_name: Option<String>,
    pub file_list: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Skip tasks that already have a `success` record when executing a
    /// section, a range or a whole flow. Single-task execution ignores this.
    pub resume: bool,
}

/// One row of a flow status report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatusEntry {
    pub id: TaskId,
    pub section: String,
    pub task: String,
    pub record: Option<StatusRecord>,
}

impl TaskStatusEntry {
    pub fn status(&self) -> TaskStatus {
        self.record.as_ref().map(|r| r.status).unwrap_or_default()
    }
}

pub struct Orchestrator<'a> {
    store: &'a StatusStore,
    run: RunContext,
    options: ExecuteOptions,
}

impl<'a> Orchestrator<'a> {
    pub fn new(store: &'a StatusStore, run: RunContext) -> Self {
        Self {
            store,
            run,
            options: ExecuteOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ExecuteOptions) -> Self {
        self.options = options;
        self
    }

    /// Execute exactly one task once everything in front of it succeeded.
    pub fn execute_task(&self, flow: &Flow, task_name: &str) -> Result<()> {
        let id = flow
            .locate_task(task_name)
            .ok_or_else(|| StargateError::not_found(LookupKind::Task, task_name))?;
        let section = &flow.sections()[id.section];

        self.require_section_ready(flow, section)?;
        self.require_task_ready(flow, section, id.task)?;

        self.run_one(flow, section, id.task)
    }

    /// Execute every task of a section, in order.
    pub fn execute_section(&self, flow: &Flow, section_name: &str) -> Result<()> {
        let section = flow
            .section(section_name)
            .ok_or_else(|| StargateError::not_found(LookupKind::Section, section_name))?;

        self.require_section_ready(flow, section)?;
        self.run_ranks(flow, section, 0, section.len())
    }

    /// Execute the tasks from `start` to `end` (inclusive) of one section.
    pub fn execute_range(&self, flow: &Flow, start: &str, end: &str) -> Result<()> {
        let start_id = flow
            .locate_task(start)
            .ok_or_else(|| StargateError::not_found(LookupKind::Task, start))?;
        let section = &flow.sections()[start_id.section];

        let end_rank = match section.task_rank(end) {
            Some(rank) => rank,
            None => {
                return Err(match flow.locate_task(end) {
                    Some(end_id) => StargateError::InvalidRange(format!(
                        "'{}' is in section '{}' but '{}' is in section '{}'",
                        start,
                        section.name(),
                        end,
                        flow.sections()[end_id.section].name()
                    )),
                    None => StargateError::not_found(LookupKind::Task, end),
                });
            }
        };

        if start_id.task > end_rank {
            return Err(StargateError::InvalidRange(format!(
                "'{start}' (position {}) comes after '{end}' (position {end_rank}) in section '{}'",
                start_id.task,
                section.name()
            )));
        }

        self.require_section_ready(flow, section)?;
        self.require_task_ready(flow, section, start_id.task)?;
        self.run_ranks(flow, section, start_id.task, end_rank + 1)
    }

    /// Execute the `build` section, then the `run` section. Missing sections
    /// are skipped.
    pub fn execute_flow(&self, flow: &Flow) -> Result<()> {
        info!(flow = flow.name(), "executing flow");

        for section in [flow.build_section(), flow.run_section()].into_iter().flatten() {
            self.execute_section(flow, section.name())?;
        }

        info!(flow = flow.name(), "flow complete");
        Ok(())
    }

    /// Every task of every section before `section_name` must have succeeded.
    pub fn check_section_dependencies(&self, flow: &Flow, section_name: &str) -> Result<()> {
        let section = flow
            .section(section_name)
            .ok_or_else(|| StargateError::not_found(LookupKind::Section, section_name))?;
        self.require_section_ready(flow, section)
    }

    /// Every task in front of `task_name`, in this and earlier sections, must
    /// have succeeded.
    pub fn check_task_dependencies(&self, flow: &Flow, task_name: &str) -> Result<()> {
        let id = flow
            .locate_task(task_name)
            .ok_or_else(|| StargateError::not_found(LookupKind::Task, task_name))?;
        let section = &flow.sections()[id.section];
        self.require_section_ready(flow, section)?;
        self.require_task_ready(flow, section, id.task)
    }

    /// `section` must belong to `flow`.
    fn require_section_ready(&self, flow: &Flow, section: &Section) -> Result<()> {
        let blocked = format!("section '{}'", section.name());
        for previous in flow.sections().iter().take(section.rank()) {
            self.require_success(flow, previous, previous.len(), &blocked)?;
        }
        Ok(())
    }

    /// Every task of `section` ranked before `task_rank` must have succeeded.
    fn require_task_ready(&self, flow: &Flow, section: &Section, task_rank: usize) -> Result<()> {
        let blocked = match section.task(task_rank) {
            Some(task) => format!("task '{}'", task.name()),
            None => format!("section '{}'", section.name()),
        };
        self.require_success(flow, section, task_rank, &blocked)
    }

    /// Status of every task of `flow`, in global order.
    pub fn status_report(&self, flow: &Flow) -> Vec<TaskStatusEntry> {
        flow.tasks_in_order()
            .map(|(id, section, task)| TaskStatusEntry {
                id,
                section: section.name().to_string(),
                task: task.name().to_string(),
                record: self.store.read_record(flow.name(), task.name()),
            })
            .collect()
    }

    /// The first `count` tasks of `section` must have a `success` record.
    fn require_success(
        &self,
        flow: &Flow,
        section: &Section,
        count: usize,
        blocked: &str,
    ) -> Result<()> {
        for task in section.tasks().take(count) {
            let status = self.store.read(flow.name(), task.name());
            if !status.is_success() {
                error!(
                    flow = flow.name(),
                    section = section.name(),
                    dependency = task.name(),
                    %status,
                    blocked,
                    "dependency not satisfied"
                );
                return Err(StargateError::UnmetDependency {
                    blocked: blocked.to_string(),
                    dependency_section: section.name().to_string(),
                    dependency: task.name().to_string(),
                    status,
                });
            }
        }
        Ok(())
    }

    fn run_ranks(&self, flow: &Flow, section: &Section, from: usize, to: usize) -> Result<()> {
        info!(
            flow = flow.name(),
            section = section.name(),
            tasks = to.saturating_sub(from),
            "executing section"
        );

        for rank in from..to {
            if self.options.resume {
                if let Some(task) = section.task(rank) {
                    if self.store.read(flow.name(), task.name()).is_success() {
                        info!(
                            flow = flow.name(),
                            section = section.name(),
                            task = task.name(),
                            "task already succeeded; skipping"
                        );
                        continue;
                    }
                }
            }
            self.run_one(flow, section, rank)?;
        }
        Ok(())
    }

    /// Execute one task and persist its terminal status.
    fn run_one(&self, flow: &Flow, section: &Section, rank: usize) -> Result<()> {
        let task = section.task(rank).ok_or_else(|| {
            StargateError::not_found(LookupKind::Task, format!("{}#{}", section.name(), rank))
        })?;
        let flow_name = flow.name();
        let task_name = task.name();

        info!(flow = flow_name, section = section.name(), task = task_name, "executing task");
        self.store.write(
            flow_name,
            task_name,
            &StatusRecord::new(TaskStatus::InProgress, 0, ""),
        )?;

        let ctx = self.task_context(flow, section, task);
        let started = Instant::now();
        let result = task.execute(&ctx);
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let (exit_code, error) = match result {
            Ok(TaskOutcome::Success) => {
                self.store.write(
                    flow_name,
                    task_name,
                    &StatusRecord::new(TaskStatus::Success, 0, "").with_duration_ms(elapsed_ms),
                )?;
                info!(flow = flow_name, task = task_name, elapsed_ms, "task succeeded");
                return Ok(());
            }
            Ok(TaskOutcome::Failed { exit_code, error }) => (exit_code, error),
            Err(err) => (-1, format!("{err:#}")),
        };

        self.store.write(
            flow_name,
            task_name,
            &StatusRecord::new(TaskStatus::Failed, exit_code, error.as_str())
                .with_duration_ms(elapsed_ms),
        )?;
        error!(flow = flow_name, task = task_name, exit_code, %error, "task failed");

        Err(StargateError::TaskFailed {
            flow: flow_name.to_string(),
            task: task_name.to_string(),
            exit_code,
            error,
        })
    }

    fn task_context(&self, flow: &Flow, section: &Section, task: &dyn Task) -> TaskContext {
        let ctx = TaskContext {
            flow_name: flow.name().to_string(),
            section_name: section.name().to_string(),
            task_name: task.name().to_string(),
            output_dir: self.store.task_dir(flow.name(), task.name()),
            project_dir: self.run.project_dir.clone(),
            target_name: self.run.target_name.clone(),
            file_list: self.run.file_list.clone(),
        };
        debug!(?ctx, "task context");
        ctx
    }
}
