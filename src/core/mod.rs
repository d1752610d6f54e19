//! Core types shared by every layer: errors, configuration and the context store.

pub mod config;
pub mod context;
pub mod error;

pub use config::{AssemblyConfig, SubstitutionPolicy};
pub use context::{Context, LenientLookup, Lookup};
pub use error::{AssemblyError, Result};
