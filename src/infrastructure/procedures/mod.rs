//! Procedure plugins: registered in-process procedures and external scripts

pub mod command;
pub mod registry;
pub mod timestamp;

pub use command::*;
pub use registry::*;
pub use timestamp::*;
