// src/flow/mod.rs

//! Flows, their checkpointed execution, and the task bodies shipped with
//! stargate.
//!
//! - [`model`] holds the static `Flow` → `Section` → `Task` structure.
//! - [`manager`] owns every flow known to an invocation.
//! - [`status`] persists per-task status records below the output root.
//! - [`orchestrator`] gates and runs tasks in global order.
//! - [`vivado`] and [`command`] provide concrete task bodies.

pub mod command;
pub mod manager;
pub mod model;
pub mod orchestrator;
pub mod status;
pub mod vivado;

pub use command::{CommandTask, command_flow};
pub use manager::{FlowId, FlowManager};
pub use model::{BUILD_SECTION, Flow, RUN_SECTION, Section, SectionId, Task, TaskContext, TaskId};
pub use orchestrator::{ExecuteOptions, Orchestrator, RunContext, TaskStatusEntry};
pub use status::{STATUS_FILE_NAME, StatusRecord, StatusStore};
pub use vivado::{VIVADO_FLOW, vivado_flow};
