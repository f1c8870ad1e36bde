//! Style extraction
//!
//! Narrows an element's resolved style to the fixed set of presentation
//! properties needed to reproduce it statically. Pseudo-elements, animations
//! and interaction states are never read.

use crate::dom::element::{ElementNode, to_hyphen_case};

/// Presentation properties kept when inlining styles, in emission order.
pub const STYLE_ALLOWLIST: &[&str] = &[
    // layout and box model
    "display",
    "position",
    "top",
    "right",
    "bottom",
    "left",
    "width",
    "height",
    "minWidth",
    "minHeight",
    "maxWidth",
    "maxHeight",
    "margin",
    "padding",
    "boxSizing",
    "flexDirection",
    "flexWrap",
    "justifyContent",
    "alignItems",
    "gap",
    "gridTemplateColumns",
    "gridTemplateRows",
    // background
    "backgroundColor",
    "backgroundImage",
    "backgroundSize",
    "backgroundPosition",
    "backgroundRepeat",
    // border
    "border",
    "borderTop",
    "borderRight",
    "borderBottom",
    "borderLeft",
    "borderRadius",
    "boxShadow",
    // typography
    "color",
    "fontFamily",
    "fontSize",
    "fontWeight",
    "fontStyle",
    "lineHeight",
    "letterSpacing",
    "textAlign",
    "textDecoration",
    "textTransform",
    "whiteSpace",
    // effects
    "opacity",
    "transform",
    "transition",
    // overflow and replaced content
    "overflow",
    "overflowX",
    "overflowY",
    "objectFit",
];

/// Extra properties the page rasterizer reads on top of the allowlist
const RASTER_PROPERTIES: &[&str] = &[
    "visibility",
    "borderColor",
    "borderWidth",
    "borderTopColor",
    "borderTopWidth",
];

/// One extracted `property: value` pair, property in hyphen-case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDeclaration {
    pub property: String,
    pub value: String,
}

/// Read the allowlisted properties of `element` in allowlist order, dropping empty values
pub fn extract(element: &ElementNode) -> Vec<StyleDeclaration> {
    STYLE_ALLOWLIST
        .iter()
        .filter_map(|name| {
            let property = to_hyphen_case(name);
            let value = element.computed_style.get(&property)?.trim();
            if value.is_empty() {
                return None;
            }
            Some(StyleDeclaration {
                property,
                value: value.to_string(),
            })
        })
        .collect()
}

/// Format declarations as the body of an inline `style` attribute
pub fn to_inline(declarations: &[StyleDeclaration]) -> String {
    declarations
        .iter()
        .map(|d| format!("{}: {};", d.property, d.value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every hyphen-case property a page snapshot has to read
pub fn snapshot_properties() -> Vec<String> {
    STYLE_ALLOWLIST
        .iter()
        .chain(RASTER_PROPERTIES)
        .map(|name| to_hyphen_case(name))
        .collect()
}
