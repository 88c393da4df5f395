// src/flow/manager.rs

use std::collections::HashMap;

use tracing::debug;

use crate::errors::{LookupKind, Result, StargateError};
use crate::flow::model::Flow;

/// Handle of a flow registered in a [`FlowManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowId(pub usize);

/// Registry owning every flow known to this invocation.
#[derive(Debug, Default)]
pub struct FlowManager {
    flows: Vec<Flow>,
    flow_index: HashMap<String, FlowId>,
}

impl FlowManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager pre-populated with the flows shipped with stargate.
    pub fn with_builtin_flows() -> Result<Self> {
        let mut manager = Self::new();
        manager.register(crate::flow::vivado::vivado_flow()?)?;
        Ok(manager)
    }

    pub fn register(&mut self, flow: Flow) -> Result<FlowId> {
        if self.flow_index.contains_key(flow.name()) {
            return Err(StargateError::duplicate(LookupKind::Flow, flow.name()));
        }

        let id = FlowId(self.flows.len());
        debug!(flow = flow.name(), sections = flow.sections().len(), "registered flow");
        self.flow_index.insert(flow.name().to_string(), id);
        self.flows.push(flow);
        Ok(id)
    }

    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    pub fn get(&self, id: FlowId) -> Option<&Flow> {
        self.flows.get(id.0)
    }

    pub fn flow_id(&self, name: &str) -> Option<FlowId> {
        self.flow_index.get(name).copied()
    }

    pub fn flow(&self, name: &str) -> Option<&Flow> {
        self.flow_id(name).and_then(|id| self.get(id))
    }

    /// Like [`FlowManager::flow`], but a missing flow is an error.
    pub fn require(&self, name: &str) -> Result<&Flow> {
        self.flow(name)
            .ok_or_else(|| StargateError::not_found(LookupKind::Flow, name))
    }
}
