//! Markdown fragment handler

use crate::core::{Context, Result};
use crate::generation::{FileHandler, HandlerRequest, Session};
use crate::infrastructure::files;
use crate::infrastructure::templates::TeraTemplateRenderer;

/// Renders a Markdown fragment against the context and emits it
pub struct MarkdownHandler;

impl FileHandler for MarkdownHandler {
    fn handle(
        &self,
        request: &HandlerRequest,
        context: &Context,
        session: &mut Session<'_>,
    ) -> Result<Option<Context>> {
        let text = files::read_text(&request.path)?;
        let rendered = session.render(&text, context)?;
        session.emit(&rendered)?;
        Ok(None)
    }
}

/// Renders a Tera fragment against the context and emits it
pub struct TeraFragmentHandler {
    renderer: TeraTemplateRenderer,
}

impl TeraFragmentHandler {
    pub fn new() -> Self {
        Self {
            renderer: TeraTemplateRenderer::new(),
        }
    }
}

impl Default for TeraFragmentHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHandler for TeraFragmentHandler {
    fn handle(
        &self,
        request: &HandlerRequest,
        context: &Context,
        session: &mut Session<'_>,
    ) -> Result<Option<Context>> {
        let text = files::read_text(&request.path)?;
        let rendered = self.renderer.render(&text, context)?;
        session.emit(&rendered)?;
        Ok(None)
    }
}
