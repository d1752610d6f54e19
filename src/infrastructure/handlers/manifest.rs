//! Manifest handler - nested child lists and document-shaped manifests

use tracing::debug;

use crate::core::{Context, Result};
use crate::generation::{DocumentAssembler, FileHandler, HandlerRequest, Manifest, Session};
use crate::infrastructure::files;

/// Handles `.json` manifests
pub struct ManifestHandler {
    child_list_keys: Vec<String>,
}

impl ManifestHandler {
    pub fn new(child_list_keys: Vec<String>) -> Self {
        Self { child_list_keys }
    }
}

impl FileHandler for ManifestHandler {
    fn handle(
        &self,
        request: &HandlerRequest,
        context: &Context,
        session: &mut Session<'_>,
    ) -> Result<Option<Context>> {
        let path = &request.path;
        let value = files::load_json(path)?;
        let manifest = Manifest::parse(path, value, &self.child_list_keys)?;

        session.enter_manifest(path)?;
        let result = match manifest {
            Manifest::Document(document) => {
                DocumentAssembler::assemble(path, &document, context, session)
            }
            Manifest::Nested { body, children } => {
                let merged = context.merge(&Context::from_json_object(body));
                let base = files::base_dir(path);
                let children: Vec<_> = children.iter().map(|child| base.join(child)).collect();

                debug!(path = %path.display(), children = children.len(), "Processing nested manifest");
                session.dispatch_all(&children, merged).map(|_| ())
            }
        };
        session.leave_manifest();
        result?;

        // Whatever a manifest merges stays below it
        Ok(None)
    }
}
