//! Assembly orchestration - owns the registry and runs one assembly per call

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::core::{AssemblyConfig, AssemblyError, Context, Result};
use crate::generation::{Dispatcher, OutputSink, Session, TemplateRenderer};
use crate::infrastructure::files;

/// Entry point of the engine: dispatches an entry file with an initial context
pub struct AssemblyOrchestrator {
    dispatcher: Dispatcher,
    renderer: Arc<dyn TemplateRenderer>,
    config: AssemblyConfig,
}

impl AssemblyOrchestrator {
    pub fn new(
        dispatcher: Dispatcher,
        renderer: Arc<dyn TemplateRenderer>,
        config: AssemblyConfig,
    ) -> Self {
        Self {
            dispatcher,
            renderer,
            config,
        }
    }

    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Assemble `entry`, writing each rendered block to `sink` as it is produced.
    ///
    /// Relative paths inside the tree resolve against the file that names
    /// them; the process working directory only matters for `entry` itself.
    pub fn assemble(
        &self,
        entry: &Path,
        initial: Context,
        sink: &mut dyn OutputSink,
    ) -> Result<Context> {
        if !entry.is_file() {
            return Err(AssemblyError::file_not_found(entry));
        }

        info!(
            entry = %entry.display(),
            policy = %self.config.policy,
            variables = initial.len(),
            "Starting assembly"
        );

        let mut session = Session::new(
            &self.dispatcher,
            self.renderer.as_ref(),
            &self.config,
            files::base_dir(entry),
            sink,
        );
        let context = session.dispatch_all(&[entry.to_path_buf()], initial)?;

        info!(entry = %entry.display(), "Assembly finished");
        Ok(context)
    }
}
