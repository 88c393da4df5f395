// src/flow/model.rs

//! Static pipeline structure: a [`Flow`] owns ordered [`Section`]s, each of
//! which owns ordered [`Task`]s.
//!
//! Children never point back at their parents. Positions are expressed as
//! index handles ([`SectionId`], [`TaskId`]) and the ordering of [`TaskId`] is
//! the global execution order of the flow.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::errors::{LookupKind, Result, StargateError};
use crate::types::TaskOutcome;

/// Name of the section executed first by a full flow run.
pub const BUILD_SECTION: &str = "build";
/// Name of the section executed after [`BUILD_SECTION`] by a full flow run.
pub const RUN_SECTION: &str = "run";

/// Everything a task body gets to know about the step it is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskContext {
    pub flow_name: String,
    pub section_name: String,
    pub task_name: String,
    /// `<output root>/<flow>/<task>`; holds the status record.
    pub output_dir: PathBuf,
    /// Directory the project config lives in.
    pub project_dir: PathBuf,
    pub target_name: Option<String>,
    /// `files.list` of the target being built, if any.
    pub file_list: Option<PathBuf>,
}

/// One executable step of a flow.
///
/// `execute` may block for as long as the wrapped tool runs. A returned
/// `Err` is treated like a failed outcome with exit code `-1`.
pub trait Task {
    fn name(&self) -> &str;
    fn execute(&self, ctx: &TaskContext) -> anyhow::Result<TaskOutcome>;
}

/// Position of a section within its flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionId(pub usize);

/// Global order key of a task: `(section rank, task rank)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId {
    pub section: usize,
    pub task: usize,
}

pub struct Section {
    name: String,
    rank: usize,
    tasks: Vec<Box<dyn Task>>,
    task_index: HashMap<String, usize>,
}

impl fmt::Debug for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("name", &self.name)
            .field("rank", &self.rank)
            .field("tasks", &self.task_names().collect::<Vec<_>>())
            .finish()
    }
}

impl Section {
    fn new(name: String, rank: usize) -> Self {
        Self {
            name,
            rank,
            tasks: Vec::new(),
            task_index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of this section in its flow.
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn tasks(&self) -> impl Iterator<Item = &dyn Task> {
        self.tasks.iter().map(as_task)
    }

    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|t| t.name())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn task(&self, rank: usize) -> Option<&dyn Task> {
        self.tasks.get(rank).map(as_task)
    }

    pub fn task_rank(&self, name: &str) -> Option<usize> {
        self.task_index.get(name).copied()
    }
}

#[allow(clippy::borrowed_box)]
fn as_task(task: &Box<dyn Task>) -> &dyn Task {
    task.as_ref()
}

/// A named, ordered pipeline of sections.
pub struct Flow {
    name: String,
    sections: Vec<Section>,
    section_index: HashMap<String, usize>,
}

impl fmt::Debug for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flow")
            .field("name", &self.name)
            .field("sections", &self.sections)
            .finish()
    }
}

impl Flow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: Vec::new(),
            section_index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a section. Its rank is the number of sections added before it.
    pub fn add_section(&mut self, name: impl Into<String>) -> Result<SectionId> {
        let name = name.into();
        if self.section_index.contains_key(&name) {
            return Err(StargateError::duplicate(
                LookupKind::Section,
                format!("{}/{}", self.name, name),
            ));
        }

        let rank = self.sections.len();
        self.section_index.insert(name.clone(), rank);
        self.sections.push(Section::new(name, rank));
        Ok(SectionId(rank))
    }

    /// Append a task to a section.
    ///
    /// Task names must be unique across the whole flow: status records are
    /// keyed by flow and task name only.
    pub fn add_task(&mut self, section: SectionId, task: Box<dyn Task>) -> Result<TaskId> {
        let task_name = task.name().to_string();
        if self.locate_task(&task_name).is_some() {
            return Err(StargateError::duplicate(
                LookupKind::Task,
                format!("{}/{}", self.name, task_name),
            ));
        }

        let flow_name = &self.name;
        let section = self.sections.get_mut(section.0).ok_or_else(|| {
            StargateError::not_found(LookupKind::Section, format!("{flow_name}/#{}", section.0))
        })?;

        let rank = section.tasks.len();
        section.task_index.insert(task_name, rank);
        section.tasks.push(task);
        Ok(TaskId {
            section: section.rank,
            task: rank,
        })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.section_index.get(name).map(|&rank| &self.sections[rank])
    }

    pub fn build_section(&self) -> Option<&Section> {
        self.section(BUILD_SECTION)
    }

    pub fn run_section(&self) -> Option<&Section> {
        self.section(RUN_SECTION)
    }

    /// Find the first section, in flow order, that contains a task `name`.
    pub fn locate_task(&self, name: &str) -> Option<TaskId> {
        self.sections.iter().find_map(|section| {
            section.task_rank(name).map(|rank| TaskId {
                section: section.rank,
                task: rank,
            })
        })
    }

    pub fn task(&self, id: TaskId) -> Option<&dyn Task> {
        self.sections.get(id.section)?.task(id.task)
    }

    /// All tasks in global order.
    pub fn tasks_in_order(&self) -> impl Iterator<Item = (TaskId, &Section, &dyn Task)> {
        self.sections.iter().flat_map(|section| {
            section.tasks().enumerate().map(move |(rank, task)| {
                (
                    TaskId {
                        section: section.rank,
                        task: rank,
                    },
                    section,
                    task,
                )
            })
        })
    }
}
