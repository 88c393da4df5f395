// src/driver.rs

//! Target-level operations: everything the CLI can ask for.
//!
//! A [`Stargate`] ties one output directory to a set of flows. Each
//! target-level operation resolves the target's flow, writes the target's
//! `files.list` and then hands over to the [`Orchestrator`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, anyhow};
use tracing::{debug, info};

use crate::config::ProjectConfig;
use crate::errors::Result;
use crate::files::FileSetCollector;
use crate::flow::{
    ExecuteOptions, Flow, FlowManager, Orchestrator, RunContext, StatusStore, TaskStatusEntry,
    command_flow,
};
use crate::fs::FileSystem;
use crate::project::ProjectTarget;

/// Default output directory, relative to the current working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "sgc.out";

/// Directory below the output root that holds per-target artifacts.
pub const PROJECT_DIR_NAME: &str = "project";

/// File name of a target's file list.
pub const FILE_LIST_NAME: &str = "files.list";

#[derive(Debug)]
pub struct Stargate {
    fs: Arc<dyn FileSystem>,
    output_dir: PathBuf,
    flows: FlowManager,
    store: StatusStore,
    options: ExecuteOptions,
}

impl Stargate {
    /// Create a driver with the built-in flows registered.
    pub fn new(fs: Arc<dyn FileSystem>, output_dir: impl AsRef<Path>) -> Result<Self> {
        Self::with_flows(fs, output_dir, FlowManager::with_builtin_flows()?)
    }

    pub fn with_flows(
        fs: Arc<dyn FileSystem>,
        output_dir: impl AsRef<Path>,
        flows: FlowManager,
    ) -> Result<Self> {
        let output_dir = fs.absolute(output_dir.as_ref())?;
        let store = StatusStore::new(Arc::clone(&fs), output_dir.clone());
        Ok(Self {
            fs,
            output_dir,
            flows,
            store,
            options: ExecuteOptions::default(),
        })
    }

    pub fn with_options(mut self, options: ExecuteOptions) -> Self {
        self.options = options;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn flows(&self) -> &FlowManager {
        &self.flows
    }

    pub fn status_store(&self) -> &StatusStore {
        &self.store
    }

    pub fn register_flow(&mut self, flow: Flow) -> Result<()> {
        self.flows.register(flow)?;
        Ok(())
    }

    /// Register the command flows declared in the project file.
    pub fn register_project_flows(&mut self, project: &ProjectConfig) -> Result<()> {
        for (name, cfg) in project.flows() {
            self.flows.register(command_flow(name, cfg)?)?;
        }
        Ok(())
    }

    /// Remove the output directory and everything in it.
    pub fn clean(&self) -> Result<()> {
        if self.fs.exists(&self.output_dir) {
            self.fs.remove_dir_all(&self.output_dir)?;
            info!(dir = %self.output_dir.display(), "removed stargate output directory");
        } else {
            debug!(dir = %self.output_dir.display(), "output directory does not exist; nothing to clean");
        }
        Ok(())
    }

    /// `<output>/project/<target>/files.list`
    pub fn file_list_path(&self, target_name: &str) -> PathBuf {
        self.output_dir
            .join(PROJECT_DIR_NAME)
            .join(target_name)
            .join(FILE_LIST_NAME)
    }

    /// Collect the files of `target` and write them, one absolute path per
    /// line, to its file list.
    pub fn write_target_file_list(
        &self,
        project: &ProjectConfig,
        target: &ProjectTarget,
    ) -> Result<PathBuf> {
        let mut collector = FileSetCollector::new(project.project_dir());
        for fileset in project.target_filesets(target)? {
            collector.add_fileset(fileset);
        }

        let paths = collector.collect(self.fs.as_ref())?;

        let mut contents = String::new();
        for path in &paths {
            let line = path.to_str().ok_or_else(|| {
                anyhow!(
                    "file {} of target '{}' has a non UTF-8 path",
                    path.display(),
                    target.name()
                )
            })?;
            contents.push_str(line);
            contents.push('\n');
        }

        let list_path = self.file_list_path(target.name());
        self.fs
            .write(&list_path, contents.as_bytes())
            .with_context(|| format!("writing file list for target '{}'", target.name()))?;

        info!(
            target_name = target.name(),
            files = paths.len(),
            path = %list_path.display(),
            "wrote target file list"
        );
        Ok(list_path)
    }

    /// Write the file list of every target without executing anything.
    pub fn write_file_lists(&self, project: &ProjectConfig) -> Result<Vec<PathBuf>> {
        self.ensure_output_dir()?;
        project
            .targets()
            .map(|target| self.write_target_file_list(project, target))
            .collect()
    }

    /// Build `target`: its `build` section, then its `run` section.
    pub fn run(&self, project: &ProjectConfig, target_name: &str) -> Result<()> {
        let (flow, run) = self.prepare(project, target_name)?;
        self.orchestrator(run).execute_flow(flow)
    }

    pub fn run_section(
        &self,
        project: &ProjectConfig,
        target_name: &str,
        section_name: &str,
    ) -> Result<()> {
        let (flow, run) = self.prepare(project, target_name)?;
        self.orchestrator(run).execute_section(flow, section_name)
    }

    pub fn execute_task(
        &self,
        project: &ProjectConfig,
        target_name: &str,
        task_name: &str,
    ) -> Result<()> {
        let (flow, run) = self.prepare(project, target_name)?;
        self.orchestrator(run).execute_task(flow, task_name)
    }

    pub fn execute_range(
        &self,
        project: &ProjectConfig,
        target_name: &str,
        start_task: &str,
        end_task: &str,
    ) -> Result<()> {
        let (flow, run) = self.prepare(project, target_name)?;
        self.orchestrator(run).execute_range(flow, start_task, end_task)
    }

    /// Status of every task in the flow of `target`. Nothing is written.
    pub fn status(
        &self,
        project: &ProjectConfig,
        target_name: &str,
    ) -> Result<(String, Vec<TaskStatusEntry>)> {
        let target = project.target(target_name)?;
        let flow = self.flows.require(target.require_flow_name()?)?;
        let run = RunContext {
            project_dir: project.project_dir().to_path_buf(),
            target_name: Some(target.name().to_string()),
            file_list: None,
        };
        Ok((flow.name().to_string(), self.orchestrator(run).status_report(flow)))
    }

    /// Resolve the flow of a target and write its file list.
    fn prepare(&self, project: &ProjectConfig, target_name: &str) -> Result<(&Flow, RunContext)> {
        let target = project.target(target_name)?;
        let flow = self.flows.require(target.require_flow_name()?)?;

        self.ensure_output_dir()?;
        let file_list = self.write_target_file_list(project, target)?;

        debug!(target_name, flow = flow.name(), "prepared target");
        let run = RunContext {
            project_dir: project.project_dir().to_path_buf(),
            target_name: Some(target.name().to_string()),
            file_list: Some(file_list),
        };
        Ok((flow, run))
    }

    fn ensure_output_dir(&self) -> Result<()> {
        self.fs.create_dir_all(&self.output_dir)?;
        info!(dir = %self.output_dir.display(), "using stargate output directory");
        Ok(())
    }

    fn orchestrator(&self, run: RunContext) -> Orchestrator<'_> {
        Orchestrator::new(&self.store, run).with_options(self.options)
    }
}
