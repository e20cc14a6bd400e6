//! fOS Accessibility
//!
//! Accessibility APIs for the fOS browser engine.
//!
//! Features:
//! - Hide everything but a set of targets from assistive technology
//!   (`aria-hidden`) or from interaction (`inert`), with layered undo
//! - `MaskTree` trait so any tree can be masked; implemented for the fOS DOM

pub mod aria;
pub mod config;
mod dom;
pub mod hide_others;
pub mod tree;

pub use config::{HideOthersConfig, DEFAULT_HIDDEN_MARKER, DEFAULT_INERT_MARKER, DEFAULT_SUPPRESSED_MARKER};
pub use hide_others::{AriaHiddenManager, Undo};
pub use tree::MaskTree;

/// Accessibility error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum A11yError {
    #[error("Invalid attribute name for {field}: {name:?}")]
    InvalidAttributeName { field: &'static str, name: String },
}
