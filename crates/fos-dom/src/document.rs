//! Document - High-level document API

use crate::{DomResult, DomTree, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a document with the `html`/`head`/`body` skeleton
    pub fn new() -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes under the document node cannot form a cycle.
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Whether a node is attached somewhere under the document node
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.tree.contains(self.tree.root(), id)
    }

    /// Create an element and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, local_name: &str) -> DomResult<NodeId> {
        let id = self.tree.create_element(local_name);
        self.tree.append_child(parent, id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
