//! termtag - create, label and find Terminal.app windows by project name
//!
//! Terminal.app has no durable notion of "project": window ids are assigned
//! at creation time and die with the window. termtag drives the app through
//! AppleScript (the [`bridge`] module), gives each window a human-readable
//! name, and persists the id-to-name association (the [`store`] module) so
//! windows can later be listed, focused, renamed, closed, or forgotten by
//! name. The [`manager`] module orchestrates the two and owns the mapping
//! lifecycle, including bulk naming schemes and pruning of mappings whose
//! window has gone away.

pub mod bridge;
pub mod companion;
pub mod domain;
pub mod manager;
pub mod store;

pub use domain::*;
