//! Core domain types for termtag

mod mapping;
mod scheme;

pub use mapping::{
    InvalidWindowId, ProjectMapping, TerminalMapping, TitleStyle, WindowId, WindowInfo,
};
pub use scheme::NamingScheme;
