//! fOS DOM - Document Object Model
//!
//! Arena-based DOM tree with attribute storage, used by the accessibility
//! layer to mark and unmark subtrees.

mod attributes;
mod document;
mod error;
mod node;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use document::Document;
pub use error::{DomError, DomResult};
pub use node::{ElementData, Node, NodeData};
pub use tree::{Children, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID (the document node of every tree)
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this ID is not the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
