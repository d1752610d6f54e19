//! Port interfaces for the assembly domain

use crate::core::{Context, Lookup, Result, SubstitutionPolicy};
use crate::generation::{HandlerRequest, Session};

/// Substitutes placeholders in template text
pub trait TemplateRenderer: Send + Sync {
    /// Render `template` against `lookup`, applying `policy` to unbound names
    fn render(
        &self,
        template: &str,
        lookup: &dyn Lookup,
        policy: SubstitutionPolicy,
    ) -> Result<String>;
}

/// Processes one classified file.
///
/// Returning `Some(context)` replaces the running context for the files that
/// follow in the same list; `None` leaves it untouched.
pub trait FileHandler: Send + Sync {
    fn handle(
        &self,
        request: &HandlerRequest,
        context: &Context,
        session: &mut Session<'_>,
    ) -> Result<Option<Context>>;
}

/// Plugin capability behind a procedural fragment
pub trait Procedure: Send + Sync {
    /// Receive the current context and return the context to continue with
    fn process(&self, context: Context) -> Result<Context>;
}

/// Destination for rendered blocks, written as soon as they are produced
pub trait OutputSink {
    fn emit(&mut self, block: &str) -> Result<()>;
}
