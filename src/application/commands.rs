//! Assemble command - wires the engine together for one invocation

use std::path::PathBuf;
use std::sync::Arc;

use crate::core::{AssemblyConfig, Context, Result};
use crate::generation::{AssemblyOrchestrator, OutputSink};
use crate::infrastructure::{DollarTemplateRenderer, ProcedureRegistry, builtin_dispatcher};

/// Request to assemble one entry file
#[derive(Debug, Clone)]
pub struct AssembleCommand {
    pub entry: PathBuf,
    pub variables: Vec<(String, String)>,
    pub config: AssemblyConfig,
}

impl AssembleCommand {
    pub fn new(entry: PathBuf, variables: Vec<(String, String)>, config: AssemblyConfig) -> Self {
        Self {
            entry,
            variables,
            config,
        }
    }

    /// Run the assembly, writing blocks to `sink` as they are rendered
    pub fn execute(&self, sink: &mut dyn OutputSink) -> Result<()> {
        let orchestrator = build_orchestrator(self.config.clone())?;
        let initial = Context::from_pairs(self.variables.iter().cloned());
        orchestrator.assemble(&self.entry, initial, sink)?;
        Ok(())
    }
}

/// Orchestrator with the built-in handlers, `$` renderer and configured procedures
pub fn build_orchestrator(config: AssemblyConfig) -> Result<AssemblyOrchestrator> {
    config.validate()?;
    let procedures = Arc::new(ProcedureRegistry::from_config(&config)?);
    let dispatcher = builtin_dispatcher(&config, procedures);
    Ok(AssemblyOrchestrator::new(
        dispatcher,
        Arc::new(DollarTemplateRenderer::new()),
        config,
    ))
}
