//! Infrastructure layer: file access, template engines, handlers, procedures and output

pub mod files;
pub mod handlers;
pub mod output;
pub mod procedures;
pub mod templates;

pub use handlers::builtin_dispatcher;
pub use output::{BufferSink, StdoutSink, WriterSink};
pub use procedures::ProcedureRegistry;
pub use templates::{DollarTemplateRenderer, TeraTemplateRenderer};
