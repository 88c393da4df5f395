// src/flow/vivado.rs

//! Built-in Xilinx Vivado flow: `build = [synth, impl, bitstream]`.
//!
//! The steps only checkpoint progress. The toolchain itself is driven by the
//! project's own scripts, which read the target's `files.list`.

use tracing::info;

use crate::errors::Result;
use crate::flow::model::{BUILD_SECTION, Flow, Task, TaskContext};
use crate::types::TaskOutcome;

pub const VIVADO_FLOW: &str = "vivado";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VivadoStep {
    Synth,
    Impl,
    Bitstream,
}

impl VivadoStep {
    pub const ALL: [VivadoStep; 3] = [VivadoStep::Synth, VivadoStep::Impl, VivadoStep::Bitstream];

    fn description(&self) -> &'static str {
        match self {
            VivadoStep::Synth => "synthesis",
            VivadoStep::Impl => "implementation",
            VivadoStep::Bitstream => "bitstream generation",
        }
    }
}

#[derive(Debug, Clone)]
pub struct VivadoTask {
    step: VivadoStep,
}

impl VivadoTask {
    pub fn new(step: VivadoStep) -> Self {
        Self { step }
    }
}

impl Task for VivadoTask {
    fn name(&self) -> &str {
        match self.step {
            VivadoStep::Synth => "synth",
            VivadoStep::Impl => "impl",
            VivadoStep::Bitstream => "bitstream",
        }
    }

    fn execute(&self, ctx: &TaskContext) -> anyhow::Result<TaskOutcome> {
        info!(
            target_name = ctx.target_name.as_deref().unwrap_or("-"),
            "Executing Vivado {} task",
            self.step.description()
        );
        Ok(TaskOutcome::Success)
    }
}

pub fn vivado_flow() -> Result<Flow> {
    let mut flow = Flow::new(VIVADO_FLOW);
    let build = flow.add_section(BUILD_SECTION)?;
    for step in VivadoStep::ALL {
        flow.add_task(build, Box::new(VivadoTask::new(step)))?;
    }
    Ok(flow)
}
