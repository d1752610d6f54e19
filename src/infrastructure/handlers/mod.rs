//! Built-in file handlers

pub mod content_record;
pub mod manifest;
pub mod markdown;
pub mod procedural;

pub use content_record::*;
pub use manifest::*;
pub use markdown::*;
pub use procedural::*;

use std::sync::Arc;

use crate::core::AssemblyConfig;
use crate::generation::{Dispatcher, FileKind};
use crate::infrastructure::procedures::ProcedureRegistry;

/// Dispatcher with every built-in handler registered
pub fn builtin_dispatcher(config: &AssemblyConfig, procedures: Arc<ProcedureRegistry>) -> Dispatcher {
    let mut dispatcher = Dispatcher::new();

    dispatcher.register(
        FileKind::Manifest,
        Arc::new(ManifestHandler::new(config.child_list_keys.clone())),
    );
    dispatcher.register(FileKind::Markdown, Arc::new(MarkdownHandler));
    dispatcher.register(
        FileKind::Procedural,
        Arc::new(ProceduralHandler::new(procedures, config.interpreters.clone())),
    );
    dispatcher.register(
        FileKind::ContentRecord,
        Arc::new(ContentRecordHandler::new(config.reference_sigil)),
    );
    dispatcher.register(FileKind::TeraFragment, Arc::new(TeraFragmentHandler::new()));

    dispatcher
}
