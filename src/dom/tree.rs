use crate::dom::element::ElementNode;
use crate::error::{CaptureError, Result};
use crate::style;
use headless_chrome::Tab;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Scroll, offset and client extents of one of the document's root elements
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_width: f64,
    pub scroll_height: f64,
    pub offset_width: f64,
    pub offset_height: f64,
    pub client_width: f64,
    pub client_height: f64,
}

/// Logical size of the visible viewport
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct LogicalSize {
    pub width: f64,
    pub height: f64,
}

/// Snapshot of a live page: the body (or a selected element) plus the page extents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomTree {
    /// Root element of the snapshot (the document body for full snapshots)
    pub root: ElementNode,

    /// Extents of `<html>` and `<body>`, used to size full-page captures
    #[serde(default)]
    pub root_metrics: Vec<ScrollMetrics>,

    /// Document base URL, used to absolutize references the browser did not resolve
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Raw shape returned by the snapshot script
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SnapshotResponse {
    Failed { error: String },
    Tree(DomTree),
}

impl DomTree {
    /// Create a new DomTree around a root element
    pub fn new(root: ElementNode) -> Self {
        Self {
            root,
            root_metrics: Vec::new(),
            base_url: None,
        }
    }

    /// Builder method: add the extents of a root element
    pub fn with_root_metrics(mut self, metrics: ScrollMetrics) -> Self {
        self.root_metrics.push(metrics);
        self
    }

    /// Builder method: set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Snapshot the whole document body of a browser tab
    pub fn from_tab(tab: &Arc<Tab>) -> Result<Self> {
        Self::snapshot(tab, None)
    }

    /// Snapshot the first element matching `selector` in a browser tab
    pub fn from_tab_selector(tab: &Arc<Tab>, selector: &str) -> Result<Self> {
        Self::snapshot(tab, Some(selector))
    }

    fn snapshot(tab: &Arc<Tab>, selector: Option<&str>) -> Result<Self> {
        let js_code = snapshot_expression(selector)?;

        let result = tab
            .evaluate(&js_code, false)
            .map_err(|e| CaptureError::EvaluationFailed(format!("Failed to execute DOM snapshot script: {}", e)))?;

        let json_value = result
            .value
            .ok_or_else(|| CaptureError::DomParseFailed("No value returned from DOM snapshot".to_string()))?;

        // The script returns a JSON string, so unwrap the string first
        let json_str: String = serde_json::from_value(json_value)
            .map_err(|e| CaptureError::DomParseFailed(format!("Failed to get JSON string: {}", e)))?;

        match Self::from_json(&json_str)? {
            SnapshotResponse::Tree(tree) => {
                log::debug!("Snapshot of <{}> holds {} elements", tree.root.tag_name, tree.count_elements());
                Ok(tree)
            }
            SnapshotResponse::Failed { error } => Err(CaptureError::ElementNotFound(error)),
        }
    }

    fn from_json(json: &str) -> Result<SnapshotResponse> {
        serde_json::from_str(json)
            .map_err(|e| CaptureError::DomParseFailed(format!("Failed to parse DOM JSON: {}", e)))
    }

    /// Convert the snapshot to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CaptureError::DomParseFailed(format!("Failed to serialize DOM to JSON: {}", e)))
    }

    /// Count total elements in the tree
    pub fn count_elements(&self) -> usize {
        self.root.count_elements()
    }

    /// Find the first element with the given id attribute
    pub fn find_by_id(&self, id: &str) -> Option<&ElementNode> {
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            if node.id().map(String::as_str) == Some(id) {
                return Some(node);
            }
            // Reverse so the walk stays in document order
            stack.extend(node.element_children().collect::<Vec<_>>().into_iter().rev());
        }
        None
    }
}

/// Build the JavaScript expression that snapshots the page (or one element)
fn snapshot_expression(selector: Option<&str>) -> Result<String> {
    let selector_arg = serde_json::to_string(&selector)
        .map_err(|e| CaptureError::EvaluationFailed(format!("Failed to encode selector: {}", e)))?;
    let properties_arg = serde_json::to_string(&style::snapshot_properties())
        .map_err(|e| CaptureError::EvaluationFailed(format!("Failed to encode property list: {}", e)))?;

    Ok(format!(
        "{}({}, {})",
        include_str!("snapshot_dom.js").trim_end(),
        selector_arg,
        properties_arg
    ))
}
