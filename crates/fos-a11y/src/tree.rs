//! Tree access needed for masking
//!
//! The masking engine never owns nodes. It sees the tree only through this
//! trait, so any arena, DOM binding or test double can be masked.

use std::fmt::Debug;
use std::hash::Hash;

/// Capabilities a tree must offer to be masked
pub trait MaskTree {
    /// Stable node identity. Must not keep the node alive.
    type Node: Copy + Eq + Hash + Debug;

    /// Error returned when an attribute cannot be written
    type Error: std::error::Error;

    /// Direct children that can carry attributes, in document order
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Whether `node` is `ancestor` itself or one of its descendants
    fn contains(&self, ancestor: Self::Node, node: Self::Node) -> bool;

    fn get_attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str) -> Result<(), Self::Error>;

    fn remove_attribute(&mut self, node: Self::Node, name: &str) -> Result<(), Self::Error>;

    /// Root to scan when the caller gives none, usually the owning
    /// document's body. `None` means there is no document context.
    fn default_root(&self, _node: Self::Node) -> Option<Self::Node> {
        None
    }

    /// Whether the `inert` attribute is honoured
    fn supports_inert(&self) -> bool {
        false
    }

    /// Lowercased tag name, if known
    fn local_name(&self, _node: Self::Node) -> Option<&str> {
        None
    }
}
