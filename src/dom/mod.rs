//! DOM snapshot module
//!
//! This module provides the read-only view of the live page that every capture
//! works from. It includes:
//! - ElementNode / DomNode: elements and text nodes with their resolved style and geometry
//! - DomTree: a snapshot of the document body plus the page extents

pub mod element;
pub mod tree;

pub use element::{BoundingBox, ComputedStyle, DomNode, ElementNode, TextNode};
pub use tree::{DomTree, LogicalSize, ScrollMetrics};

use crate::error::Result;
use headless_chrome::Tab;
use std::sync::Arc;

/// Snapshot the document body of a browser tab
pub fn extract_dom(tab: &Arc<Tab>) -> Result<DomTree> {
    DomTree::from_tab(tab)
}

/// Snapshot a single element of a browser tab
pub fn extract_element(tab: &Arc<Tab>, selector: &str) -> Result<ElementNode> {
    Ok(DomTree::from_tab_selector(tab, selector)?.root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node_export() {
        let element = ElementNode::new("div");
        assert_eq!(element.tag_name, "div");
    }

    #[test]
    fn test_dom_tree_export() {
        let root = ElementNode::new("body");
        let tree = DomTree::new(root);
        assert_eq!(tree.root.tag_name, "body");
    }
}
