use std::sync::{Arc, Mutex};

use stargate::flow::{StatusStore, Task, TaskContext};
use stargate::types::{TaskOutcome, TaskStatus};

/// What a [`RecordingTask`] does when it is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Script {
    Succeed,
    /// Report a failed outcome with this exit code.
    Fail(i32),
    /// Return an `Err` from `execute`.
    Error(String),
}

/// One recorded execution.
#[derive(Debug, Clone)]
pub struct Execution {
    pub task: String,
    pub ctx: TaskContext,
    /// Status found on disk while the task body was running, if the task was
    /// given a store to look at.
    pub status_during: Option<TaskStatus>,
}

/// Shared, append-only log of task executions.
#[derive(Debug, Clone, Default)]
pub struct ExecutionLog {
    entries: Arc<Mutex<Vec<Execution>>>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, execution: Execution) {
        self.entries.lock().unwrap().push(execution);
    }

    pub fn entries(&self) -> Vec<Execution> {
        self.entries.lock().unwrap().clone()
    }

    /// Names of executed tasks, in execution order.
    pub fn names(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.task).collect()
    }

    pub fn count(&self, task: &str) -> usize {
        self.entries().iter().filter(|e| e.task == task).count()
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

/// A task that records every execution and then follows its [`Script`].
pub struct RecordingTask {
    name: String,
    script: Script,
    log: ExecutionLog,
    observer: Option<StatusStore>,
}

impl RecordingTask {
    pub fn new(name: &str, log: &ExecutionLog) -> Self {
        Self {
            name: name.to_string(),
            script: Script::Succeed,
            log: log.clone(),
            observer: None,
        }
    }

    pub fn with_script(mut self, script: Script) -> Self {
        self.script = script;
        self
    }

    /// Read this task's own status from `store` while executing.
    pub fn observing(mut self, store: StatusStore) -> Self {
        self.observer = Some(store);
        self
    }
}

impl Task for RecordingTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, ctx: &TaskContext) -> anyhow::Result<TaskOutcome> {
        let status_during = self
            .observer
            .as_ref()
            .map(|store| store.read(&ctx.flow_name, &ctx.task_name));

        self.log.push(Execution {
            task: self.name.clone(),
            ctx: ctx.clone(),
            status_during,
        });

        match &self.script {
            Script::Succeed => Ok(TaskOutcome::Success),
            Script::Fail(code) => Ok(TaskOutcome::failed(
                *code,
                format!("{} failed on purpose", self.name),
            )),
            Script::Error(msg) => Err(anyhow::anyhow!("{msg}")),
        }
    }
}
