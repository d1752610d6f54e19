//! Procedural fragment handler

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::core::{AssemblyError, Context, Result};
use crate::generation::{FileHandler, HandlerRequest, Procedure, Session};
use crate::infrastructure::procedures::{CommandProcedure, ProcedureRegistry, module_reference};

/// Runs the procedure behind a fragment and hands its context to later siblings.
///
/// The fragment file must exist. Registered procedures take precedence;
/// otherwise the fragment is executed with the interpreter configured for its
/// extension.
pub struct ProceduralHandler {
    registry: Arc<ProcedureRegistry>,
    interpreters: BTreeMap<String, String>,
}

impl ProceduralHandler {
    pub fn new(registry: Arc<ProcedureRegistry>, interpreters: BTreeMap<String, String>) -> Self {
        Self {
            registry,
            interpreters,
        }
    }
}

impl FileHandler for ProceduralHandler {
    fn handle(
        &self,
        request: &HandlerRequest,
        context: &Context,
        session: &mut Session<'_>,
    ) -> Result<Option<Context>> {
        let path = &request.path;
        let module = module_reference(path, session.root_dir());

        if !path.is_file() {
            return Err(AssemblyError::file_not_found(path));
        }

        if let Some(procedure) = self.registry.get(&module) {
            debug!(module = %module, "Running registered procedure");
            return procedure.process(context.clone()).map(Some);
        }

        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let program = self.interpreters.get(&extension).ok_or_else(|| {
            AssemblyError::config(format!(
                "no interpreter configured for '.{extension}' procedures ({module})"
            ))
        })?;

        CommandProcedure::new(program.clone(), path.clone())
            .process(context.clone())
            .map(Some)
    }
}
