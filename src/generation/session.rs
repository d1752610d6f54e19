//! Per-run state threaded through recursive dispatch

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{AssemblyConfig, AssemblyError, Context, Result, SubstitutionPolicy};
use crate::generation::{Dispatcher, FileKind, HandlerRequest, OutputSink, TemplateRenderer};

/// Borrowed view of everything a handler needs during one assembly run
pub struct Session<'a> {
    dispatcher: &'a Dispatcher,
    renderer: &'a dyn TemplateRenderer,
    config: &'a AssemblyConfig,
    root_dir: PathBuf,
    sink: &'a mut dyn OutputSink,
    manifests: Vec<PathBuf>,
}

impl<'a> Session<'a> {
    pub fn new(
        dispatcher: &'a Dispatcher,
        renderer: &'a dyn TemplateRenderer,
        config: &'a AssemblyConfig,
        root_dir: PathBuf,
        sink: &'a mut dyn OutputSink,
    ) -> Self {
        Self {
            dispatcher,
            renderer,
            config,
            root_dir,
            sink,
            manifests: Vec::new(),
        }
    }

    pub fn config(&self) -> &AssemblyConfig {
        self.config
    }

    /// Directory of the entry file
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn dispatcher(&self) -> &'a Dispatcher {
        self.dispatcher
    }

    /// Render with the configured policy
    pub fn render(&self, template: &str, context: &Context) -> Result<String> {
        let policy = self.config.policy;
        match policy {
            SubstitutionPolicy::Lenient => {
                self.renderer
                    .render(template, &context.as_substitution_source(), policy)
            }
            SubstitutionPolicy::Strict => self.renderer.render(template, context, policy),
        }
    }

    /// Render with empty-string defaults whatever the configured policy
    pub fn render_lenient(&self, template: &str, context: &Context) -> Result<String> {
        self.renderer.render(
            template,
            &context.as_substitution_source(),
            SubstitutionPolicy::Lenient,
        )
    }

    /// Mark `path` as being processed; a manifest already on the stack is a cycle
    pub fn enter_manifest(&mut self, path: &Path) -> Result<()> {
        let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if self.manifests.contains(&canonical) {
            return Err(AssemblyError::malformed_manifest(
                path,
                "manifest includes itself",
            ));
        }
        self.manifests.push(canonical);
        Ok(())
    }

    pub fn leave_manifest(&mut self) {
        self.manifests.pop();
    }

    pub fn emit(&mut self, block: &str) -> Result<()> {
        self.sink.emit(block)
    }

    /// Classify `request.path` by extension and run its handler
    pub fn dispatch(
        &mut self,
        request: &HandlerRequest,
        context: &Context,
    ) -> Result<Option<Context>> {
        let dispatcher = self.dispatcher;
        let kind = dispatcher.classify(&request.path)?;
        dispatcher.dispatch_as(&kind, request, context, self)
    }

    /// Run the handler for `kind` regardless of the file's extension
    pub fn dispatch_as(
        &mut self,
        kind: &FileKind,
        request: &HandlerRequest,
        context: &Context,
    ) -> Result<Option<Context>> {
        let dispatcher = self.dispatcher;
        dispatcher.dispatch_as(kind, request, context, self)
    }

    /// Dispatch `paths` in order, threading replaced contexts to later siblings
    pub fn dispatch_all(&mut self, paths: &[PathBuf], context: Context) -> Result<Context> {
        let mut context = context;
        for path in paths {
            if let Some(next) = self.dispatch(&HandlerRequest::new(path.clone()), &context)? {
                context = next;
            }
        }
        Ok(context)
    }
}
