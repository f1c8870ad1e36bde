use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node of the live page snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DomNode {
    Element(ElementNode),
    Text(TextNode),
}

/// A text node and its raw character data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextNode {
    pub text: String,
}

/// Represents a DOM element as it was rendered in the live page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// HTML tag name (e.g., "div", "img", "a")
    pub tag_name: String,

    /// Element attributes in authoring order
    #[serde(default)]
    pub attributes: IndexMap<String, String>,

    /// Child nodes (elements and text) in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DomNode>,

    /// Bounding box in document coordinates (logical pixels)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,

    /// Resolved (computed) presentation values
    #[serde(default)]
    pub computed_style: ComputedStyle,

    /// Absolute `src` as resolved by the browser (images only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_src: Option<String>,

    /// Absolute `href` as resolved by the browser (links only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_href: Option<String>,

    /// Set when the element's content could not be read, e.g. a cross-origin frame
    #[serde(default)]
    pub content_unreadable: bool,
}

/// Bounding box coordinates for an element
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Computed style values keyed by hyphen-case property name.
///
/// Lookups accept either the hyphen-case form (`background-color`) or the
/// camel-case form used by the style object (`backgroundColor`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ComputedStyle(IndexMap<String, String>);

impl ComputedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property value
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        self.0.insert(to_hyphen_case(property), value.into());
    }

    /// Get the resolved value of a property, if present
    pub fn get(&self, property: &str) -> Option<&str> {
        if property.contains(|c: char| c.is_ascii_uppercase()) {
            self.0.get(&to_hyphen_case(property)).map(String::as_str)
        } else {
            self.0.get(property).map(String::as_str)
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Translate a camel-case property name to hyphen-case (`backgroundColor` -> `background-color`)
pub fn to_hyphen_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

impl DomNode {
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            DomNode::Element(element) => Some(element),
            DomNode::Text(_) => None,
        }
    }
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            bounding_box: None,
            computed_style: ComputedStyle::new(),
            resolved_src: None,
            resolved_href: None,
            content_unreadable: false,
        }
    }

    /// Builder method: add a single attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(key, value);
        self
    }

    /// Builder method: append a text child
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(DomNode::Text(TextNode { text: text.into() }));
        self
    }

    /// Builder method: append an element child
    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.add_child(child);
        self
    }

    /// Builder method: set a computed style value
    pub fn with_style(mut self, property: &str, value: impl Into<String>) -> Self {
        self.computed_style.set(property, value);
        self
    }

    /// Builder method: set bounding box
    pub fn with_bounding_box(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.bounding_box = Some(BoundingBox { x, y, width, height });
        self
    }

    /// Add a single attribute
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Add a child element
    pub fn add_child(&mut self, child: ElementNode) {
        self.children.push(DomNode::Element(child));
    }

    /// Get attribute value by key
    pub fn get_attribute(&self, key: &str) -> Option<&String> {
        self.attributes.get(key)
    }

    /// Get element ID
    pub fn id(&self) -> Option<&String> {
        self.attributes.get("id")
    }

    /// Check if element is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Iterate over element children only, in document order
    pub fn element_children(&self) -> impl Iterator<Item = &ElementNode> {
        self.children.iter().filter_map(DomNode::as_element)
    }

    /// Count this element and all element descendants
    pub fn count_elements(&self) -> usize {
        1 + self.element_children().map(ElementNode::count_elements).sum::<usize>()
    }
}

impl BoundingBox {
    /// Check if the bounding box is visible (has non-zero dimensions)
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}
