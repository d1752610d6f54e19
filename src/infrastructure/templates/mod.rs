//! Template engines: the `$`-placeholder renderer and a Tera alternative

pub mod dollar_renderer;
pub mod tera_renderer;

pub use dollar_renderer::*;
pub use tera_renderer::*;
