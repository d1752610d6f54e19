//! Content record handler - expands references and renders the part template

use tracing::{debug, warn};

use crate::core::{Context, Result};
use crate::generation::{FileHandler, HandlerRequest, ReferenceResolver, Session};
use crate::infrastructure::files;

/// Handles the JSON content files listed by a document part
pub struct ContentRecordHandler {
    resolver: ReferenceResolver,
}

impl ContentRecordHandler {
    pub fn new(sigil: char) -> Self {
        Self {
            resolver: ReferenceResolver::new(sigil),
        }
    }
}

impl FileHandler for ContentRecordHandler {
    fn handle(
        &self,
        request: &HandlerRequest,
        context: &Context,
        session: &mut Session<'_>,
    ) -> Result<Option<Context>> {
        let record = files::load_json_object(&request.path)?;
        let resolved = self
            .resolver
            .resolve(&record, &request.path, context, session)?;
        let merged = context.merge(&Context::from_json_object(resolved));

        match &request.template {
            Some(template) => {
                debug!(
                    path = %request.path.display(),
                    template = %template.display(),
                    "Rendering content record"
                );
                let text = files::read_text(template)?;
                let rendered = session.render(&text, &merged)?;
                session.emit(&rendered)?;
            }
            None => {
                warn!(path = %request.path.display(), "No template for content record, nothing emitted");
            }
        }

        Ok(Some(merged))
    }
}
