#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;

use stargate::config::{CommandTaskConfig, FlowConfig, ProjectConfig, RawProjectConfig, SectionConfig};
use stargate::flow::{Flow, StatusStore};
use stargate::types::TaskStatus;

use crate::recording_task::{ExecutionLog, RecordingTask, Script};

/// Builder for `ProjectConfig` to simplify test setup.
///
/// Goes through `RawProjectConfig` and `TryFrom`, so the result has passed
/// the same validation as a loaded project file.
pub struct ProjectConfigBuilder {
    config: RawProjectConfig,
}

impl ProjectConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawProjectConfig::default(),
        }
    }

    pub fn with_fileset(mut self, name: &str, patterns: &[&str]) -> Self {
        self.config.filesets.insert(
            name.to_string(),
            patterns.iter().map(|p| p.to_string()).collect(),
        );
        self
    }

    pub fn with_target(mut self, name: &str, filesets: &[&str], flow: &str) -> Self {
        let mut table = toml::Table::new();
        table.insert(
            "filesets".to_string(),
            toml::Value::Array(
                filesets
                    .iter()
                    .map(|f| toml::Value::String(f.to_string()))
                    .collect(),
            ),
        );
        table.insert("flow".to_string(), toml::Value::String(flow.to_string()));
        self.config
            .targets
            .insert(name.to_string(), toml::Value::Table(table));
        self
    }

    /// Declare a command flow; `sections` is `(section, [(task, cmd)])`.
    pub fn with_command_flow(mut self, name: &str, sections: &[(&str, &[(&str, &str)])]) -> Self {
        let sections = sections
            .iter()
            .map(|(section, tasks)| SectionConfig {
                name: section.to_string(),
                tasks: tasks
                    .iter()
                    .map(|(task, cmd)| CommandTaskConfig {
                        name: task.to_string(),
                        cmd: cmd.to_string(),
                    })
                    .collect(),
            })
            .collect();
        self.config
            .flows
            .insert(name.to_string(), FlowConfig { sections });
        self
    }

    pub fn build(self) -> ProjectConfig {
        ProjectConfig::try_from(self.config).expect("Failed to build valid project from builder")
    }

    /// Build and place the project in `project_dir`.
    pub fn build_in(self, project_dir: &Path) -> ProjectConfig {
        self.build()
            .with_location(project_dir.join("stargate.toml"), project_dir.to_path_buf())
    }
}

impl Default for ProjectConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for flows made of [`RecordingTask`]s.
pub struct FlowBuilder {
    name: String,
    sections: Vec<(String, Vec<String>)>,
    scripts: HashMap<String, Script>,
    observer: Option<StatusStore>,
}

impl FlowBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sections: Vec::new(),
            scripts: HashMap::new(),
            observer: None,
        }
    }

    pub fn section(mut self, name: &str, tasks: &[&str]) -> Self {
        self.sections.push((
            name.to_string(),
            tasks.iter().map(|t| t.to_string()).collect(),
        ));
        self
    }

    pub fn script(mut self, task: &str, script: Script) -> Self {
        self.scripts.insert(task.to_string(), script);
        self
    }

    pub fn fail(self, task: &str, exit_code: i32) -> Self {
        self.script(task, Script::Fail(exit_code))
    }

    /// Every task reads its own status from `store` while it runs.
    pub fn observing(mut self, store: &StatusStore) -> Self {
        self.observer = Some(store.clone());
        self
    }

    pub fn build(self, log: &ExecutionLog) -> Flow {
        let mut flow = Flow::new(self.name.as_str());
        for (section_name, tasks) in &self.sections {
            let section = flow
                .add_section(section_name.as_str())
                .expect("duplicate section in FlowBuilder");
            for task_name in tasks {
                let mut task = RecordingTask::new(task_name, log);
                if let Some(script) = self.scripts.get(task_name) {
                    task = task.with_script(script.clone());
                }
                if let Some(store) = &self.observer {
                    task = task.observing(store.clone());
                }
                flow.add_task(section, Box::new(task))
                    .expect("duplicate task in FlowBuilder");
            }
        }
        flow
    }
}

/// Per-task summary of a flow's status records, in global order.
pub fn statuses(store: &StatusStore, flow: &Flow) -> Vec<(String, TaskStatus)> {
    flow.tasks_in_order()
        .map(|(_, _, task)| (task.name().to_string(), store.read(flow.name(), task.name())))
        .collect()
}
