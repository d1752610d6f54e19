//! Assembly domain module - the context-merge-and-dispatch engine
//!
//! This module classifies files, threads the context through recursive
//! dispatch, expands `@file` references and drives document parts through
//! their templates. Concrete handlers, template engines and procedures live
//! in [`crate::infrastructure`].

pub mod assembler;
pub mod dispatcher;
pub mod orchestrator;
pub mod references;
pub mod session;
pub mod traits;
pub mod types;

pub use assembler::*;
pub use dispatcher::*;
pub use orchestrator::*;
pub use references::*;
pub use session::*;
pub use traits::*;
pub use types::*;
