//! docsmith - document assembly from JSON manifests and Markdown fragments
//!
//! A manifest names child files (nested manifests, Markdown fragments,
//! procedural fragments) or document parts (a template plus content records).
//! Each level merges its variables into a flat [`Context`], content records
//! expand their `@file` references, and every fragment or part template is
//! rendered with `${name}` substitution and written out as soon as it is done.
//!
//! ```no_run
//! use docsmith::application::build_orchestrator;
//! use docsmith::infrastructure::StdoutSink;
//! use docsmith::{AssemblyConfig, Context};
//!
//! let orchestrator = build_orchestrator(AssemblyConfig::default())?;
//! let initial = Context::from_pairs([("title", "Demo")]);
//! orchestrator.assemble("docs/index.json".as_ref(), initial, &mut StdoutSink::new())?;
//! # Ok::<(), docsmith::AssemblyError>(())
//! ```
#![deny(unsafe_code)]

pub mod application;
pub mod core;
pub mod generation;
pub mod infrastructure;

pub use crate::core::{AssemblyConfig, AssemblyError, Context, Result, SubstitutionPolicy};
pub use crate::generation::{AssemblyOrchestrator, Dispatcher, FileHandler, FileKind, Procedure};
