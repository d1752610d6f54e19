//! Processor dispatcher - maps file extensions to handlers

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::core::{AssemblyError, Context, Result};
use crate::generation::{FileHandler, FileKind, HandlerRequest, Session};

/// Extensions recognised out of the box
pub fn builtin_extensions() -> [(&'static str, FileKind); 6] {
    [
        ("json", FileKind::Manifest),
        ("md", FileKind::Markdown),
        ("markdown", FileKind::Markdown),
        ("py", FileKind::Procedural),
        ("sh", FileKind::Procedural),
        ("tera", FileKind::TeraFragment),
    ]
}

/// Registry of file handlers keyed by [`FileKind`].
///
/// Built once at startup and only read afterwards.
pub struct Dispatcher {
    handlers: HashMap<FileKind, Arc<dyn FileHandler>>,
    extensions: HashMap<String, FileKind>,
}

impl Dispatcher {
    /// Create a dispatcher with the built-in extension table and no handlers
    pub fn new() -> Self {
        let extensions = builtin_extensions()
            .into_iter()
            .map(|(ext, kind)| (ext.to_string(), kind))
            .collect();

        Self {
            handlers: HashMap::new(),
            extensions,
        }
    }

    /// Register (or replace) the handler for a kind
    pub fn register(&mut self, kind: FileKind, handler: Arc<dyn FileHandler>) {
        self.handlers.insert(kind, handler);
    }

    /// Classify an additional extension (without the dot) as `kind`
    pub fn map_extension(&mut self, extension: &str, kind: FileKind) {
        self.extensions
            .insert(extension.trim_start_matches('.').to_lowercase(), kind);
    }

    pub fn has_handler(&self, kind: &FileKind) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Extensions that map to a registered handler, sorted
    pub fn supported_extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self
            .extensions
            .iter()
            .filter(|(_, kind)| self.has_handler(kind))
            .map(|(ext, _)| ext.clone())
            .collect();
        extensions.sort();
        extensions
    }

    /// Classify a file by its extension
    pub fn classify(&self, path: &Path) -> Result<FileKind> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        self.extensions
            .get(&extension)
            .filter(|kind| self.has_handler(kind))
            .cloned()
            .ok_or_else(|| AssemblyError::unknown_file_type(path, extension))
    }

    /// Run the handler registered for `kind`
    pub fn dispatch_as(
        &self,
        kind: &FileKind,
        request: &HandlerRequest,
        context: &Context,
        session: &mut Session<'_>,
    ) -> Result<Option<Context>> {
        let handler = self.handlers.get(kind).ok_or_else(|| {
            AssemblyError::unknown_file_type(&request.path, kind.as_str())
        })?;

        debug!(path = %request.path.display(), kind = %kind, "Dispatching file");
        handler.handle(request, context, session)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
