//! Detached markup tree produced by cloning a live element, and its HTML writer

use crate::dom::element::{DomNode, ElementNode};
use indexmap::IndexMap;

/// Elements that never have content or a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// Elements whose text is written without escaping
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// A node of the detached clone
#[derive(Debug, Clone, PartialEq)]
pub enum FragmentNode {
    Element(FragmentElement),
    Text(String),
}

/// A cloned element: structure only, no presentation
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentElement {
    pub tag_name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<FragmentNode>,
}

impl FragmentElement {
    /// Create an empty element
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Deep-clone tags, attributes and text of a live element.
    ///
    /// Content of elements that could not be read (cross-origin frames) is
    /// left empty.
    pub fn clone_from_live(live: &ElementNode) -> Self {
        let children = if live.content_unreadable {
            Vec::new()
        } else {
            live.children
                .iter()
                .map(|child| match child {
                    DomNode::Element(element) => FragmentNode::Element(Self::clone_from_live(element)),
                    DomNode::Text(text) => FragmentNode::Text(text.text.clone()),
                })
                .collect()
        };

        Self {
            tag_name: live.tag_name.to_ascii_lowercase(),
            attributes: live.attributes.clone(),
            children,
        }
    }

    /// Iterate mutably over element children only, in document order
    pub fn element_children_mut(&mut self) -> impl Iterator<Item = &mut FragmentElement> {
        self.children.iter_mut().filter_map(|child| match child {
            FragmentNode::Element(element) => Some(element),
            FragmentNode::Text(_) => None,
        })
    }

    /// Iterate over element children only, in document order
    pub fn element_children(&self) -> impl Iterator<Item = &FragmentElement> {
        self.children.iter().filter_map(|child| match child {
            FragmentNode::Element(element) => Some(element),
            FragmentNode::Text(_) => None,
        })
    }

    /// Serialize this element and its subtree as HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag_name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag_name.as_str()) {
            return;
        }

        let raw_text = RAW_TEXT_ELEMENTS.contains(&self.tag_name.as_str());
        for child in &self.children {
            match child {
                FragmentNode::Element(element) => element.write_html(out),
                FragmentNode::Text(text) if raw_text => out.push_str(text),
                FragmentNode::Text(text) => out.push_str(&escape_text(text)),
            }
        }

        out.push_str("</");
        out.push_str(&self.tag_name);
        out.push('>');
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}
