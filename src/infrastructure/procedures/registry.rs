//! Registry for procedure plugins

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::core::{AssemblyConfig, AssemblyError, Result};
use crate::generation::Procedure;

use super::TimestampProcedure;

/// Names accepted in the `[procedures]` config table
pub const BUILTIN_PROCEDURES: &[&str] = &["timestamp"];

/// Maps module references (e.g. `example.index`) to procedures
#[derive(Default)]
pub struct ProcedureRegistry {
    procedures: HashMap<String, Arc<dyn Procedure>>,
}

impl ProcedureRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from the `[procedures]` table of a config
    pub fn from_config(config: &AssemblyConfig) -> Result<Self> {
        let mut registry = Self::new();
        for (module, name) in &config.procedures {
            let procedure = Self::builtin(name).ok_or_else(|| {
                AssemblyError::config(format!(
                    "unknown procedure '{name}' for '{module}' (available: {})",
                    BUILTIN_PROCEDURES.join(", ")
                ))
            })?;
            registry.register(module.clone(), procedure);
        }
        Ok(registry)
    }

    /// Look up a built-in procedure by name
    pub fn builtin(name: &str) -> Option<Arc<dyn Procedure>> {
        match name {
            "timestamp" => Some(Arc::new(TimestampProcedure::new())),
            _ => None,
        }
    }

    /// Register (or replace) the procedure for a module reference
    pub fn register(&mut self, module: impl Into<String>, procedure: Arc<dyn Procedure>) {
        self.procedures.insert(module.into(), procedure);
    }

    pub fn get(&self, module: &str) -> Option<Arc<dyn Procedure>> {
        self.procedures.get(module).cloned()
    }

    pub fn has_procedure(&self, module: &str) -> bool {
        self.procedures.contains_key(module)
    }

    pub fn modules(&self) -> Vec<String> {
        let mut modules: Vec<String> = self.procedures.keys().cloned().collect();
        modules.sort();
        modules
    }
}

/// Module reference of a fragment: its path relative to `root`, extension
/// removed, components joined with dots
pub fn module_reference(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .with_extension("")
        .components()
        .filter_map(|component| match component {
            std::path::Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(".")
}
