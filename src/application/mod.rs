//! Application layer - turns a command-line invocation into an assembly run

pub mod commands;
pub mod invocation;

pub use commands::*;
pub use invocation::*;
