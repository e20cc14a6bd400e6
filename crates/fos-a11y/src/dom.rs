//! `MaskTree` for the fOS DOM
//!
//! A bare [`DomTree`] has no document context, so masking it without an
//! explicit root is a no-op. A [`Document`] defaults to its `<body>`.

use fos_dom::{Document, DomError, DomTree, NodeId};

use crate::MaskTree;

impl MaskTree for DomTree {
    type Node = NodeId;
    type Error = DomError;

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.element_children(node).collect()
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        DomTree::contains(self, ancestor, node)
    }

    fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        DomTree::get_attribute(self, node, name)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        DomTree::set_attribute(self, node, name, value)
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<(), DomError> {
        DomTree::remove_attribute(self, node, name).map(|_| ())
    }

    fn supports_inert(&self) -> bool {
        true
    }

    fn local_name(&self, node: NodeId) -> Option<&str> {
        DomTree::local_name(self, node)
    }
}

impl MaskTree for Document {
    type Node = NodeId;
    type Error = DomError;

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        MaskTree::children(&self.tree, node)
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.tree.contains(ancestor, node)
    }

    fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.tree.get_attribute(node, name)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.tree.set_attribute(node, name, value)
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<(), DomError> {
        MaskTree::remove_attribute(&mut self.tree, node, name)
    }

    // Every node in the arena is owned by this document, attached or not.
    fn default_root(&self, node: NodeId) -> Option<NodeId> {
        self.tree.get(node).map(|_| self.body())
    }

    fn supports_inert(&self) -> bool {
        self.tree.supports_inert()
    }

    fn local_name(&self, node: NodeId) -> Option<&str> {
        self.tree.local_name(node)
    }
}
