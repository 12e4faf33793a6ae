//! CLI command implementations

pub mod companion;
pub mod project;
pub mod scheme;
pub mod window;
