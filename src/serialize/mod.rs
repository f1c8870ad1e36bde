//! Subtree serialization
//!
//! Turns a live element into a self-contained HTML fragment: the subtree is
//! cloned structurally, every clone node receives the live node's allowlisted
//! computed style inline, image and link references are made absolute, and the
//! result is wrapped together with a single `box-sizing` reset rule.

pub mod markup;

pub use markup::{FragmentElement, FragmentNode};

use crate::dom::element::ElementNode;
use crate::error::{CaptureError, Result};
use crate::style;
use serde::{Deserialize, Serialize};
use url::Url;

/// Universal reset shipped with every fragment
pub const RESET_RULE: &str = "*, *::before, *::after { box-sizing: border-box; }";

/// Attribute marking the wrapper element of a fragment
const CONTAINER_ATTRIBUTE: &str = "data-page-capture";

/// Serialized markup ready to hand to the upload collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerializedFragment {
    /// Container markup: reset rule followed by the style-inlined clone
    pub content: String,

    /// The reset rule embedded in `content`
    pub reset_rule: String,
}

/// Serializes live subtrees into style-inlined fragments
#[derive(Debug, Clone, Default)]
pub struct SubtreeSerializer {
    base_url: Option<Url>,
}

impl SubtreeSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: base URL for references the browser did not resolve
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Builder method: parse and set the base URL, ignoring unparseable input
    pub fn with_base_url_str(self, base_url: Option<&str>) -> Self {
        match base_url.map(Url::parse) {
            Some(Ok(url)) => self.with_base_url(url),
            Some(Err(e)) => {
                log::debug!("Ignoring unparseable base URL: {}", e);
                self
            }
            None => self,
        }
    }

    /// Serialize `root` and its subtree.
    ///
    /// The live tree is only read. Missing style values are omitted rather
    /// than reported; the only error is a clone whose element children do not
    /// line up with the live node's.
    pub fn serialize(&self, root: &ElementNode) -> Result<SerializedFragment> {
        let mut clone = FragmentElement::clone_from_live(root);
        self.inline_subtree(root, &mut clone)?;

        let mut container = FragmentElement::new("div");
        container.attributes.insert(CONTAINER_ATTRIBUTE.to_string(), String::new());
        let mut reset = FragmentElement::new("style");
        reset.children.push(FragmentNode::Text(RESET_RULE.to_string()));
        container.children.push(FragmentNode::Element(reset));
        container.children.push(FragmentNode::Element(clone));

        let content = container.to_html();
        log::debug!("Serialized <{}> into {} bytes of markup", root.tag_name, content.len());

        Ok(SerializedFragment {
            content,
            reset_rule: RESET_RULE.to_string(),
        })
    }

    /// Walk (live, clone) pairs and apply styles and references to each clone node.
    ///
    /// The Nth element child of a live node corresponds to the Nth element
    /// child of its clone. Both come from the same deterministic clone, but the
    /// counts are re-checked for every pair before descending.
    fn inline_subtree(&self, root: &ElementNode, clone: &mut FragmentElement) -> Result<()> {
        let mut work: Vec<(&ElementNode, &mut FragmentElement)> = vec![(root, clone)];

        while let Some((live, node)) = work.pop() {
            inline_style(live, node);
            self.absolutize_references(live, node);

            if live.content_unreadable {
                continue;
            }

            let live_children: Vec<&ElementNode> = live.element_children().collect();
            let clone_children: Vec<&mut FragmentElement> = node.element_children_mut().collect();
            if live_children.len() != clone_children.len() {
                return Err(CaptureError::CloneMismatch {
                    tag: live.tag_name.clone(),
                    live: live_children.len(),
                    clone: clone_children.len(),
                });
            }
            work.extend(live_children.into_iter().zip(clone_children));
        }

        Ok(())
    }

    /// Copy the absolute `src`/`href` of images and links onto the clone
    fn absolutize_references(&self, live: &ElementNode, clone: &mut FragmentElement) {
        let (attribute, resolved) = if live.is_tag("img") {
            ("src", live.resolved_src.as_deref())
        } else if live.is_tag("a") {
            ("href", live.resolved_href.as_deref())
        } else {
            return;
        };

        let absolute = match resolved {
            Some(resolved) => Some(resolved.to_string()),
            None => live
                .get_attribute(attribute)
                .and_then(|relative| self.resolve(relative)),
        };

        if let Some(absolute) = absolute {
            clone.attributes.insert(attribute.to_string(), absolute);
        }
    }

    fn resolve(&self, reference: &str) -> Option<String> {
        let base = self.base_url.as_ref()?;
        base.join(reference).ok().map(String::from)
    }
}

/// Append the live node's extracted style after any inline style the clone already has
fn inline_style(live: &ElementNode, clone: &mut FragmentElement) {
    let extracted = style::to_inline(&style::extract(live));
    if extracted.is_empty() {
        return;
    }

    let merged = match clone.attributes.get("style").map(|s| s.trim()) {
        Some(existing) if existing.ends_with(';') => format!("{} {}", existing, extracted),
        Some(existing) if !existing.is_empty() => format!("{}; {}", existing, extracted),
        _ => extracted,
    };
    clone.attributes.insert("style".to_string(), merged);
}

/// Serialize `root` without a base URL
pub fn serialize(root: &ElementNode) -> Result<SerializedFragment> {
    SubtreeSerializer::new().serialize(root)
}
