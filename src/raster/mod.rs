//! Full-page rasterization
//!
//! Rebuilds a bitmap of the whole page from a DOM snapshot instead of a native
//! screenshot: every rendered element paints its background and border, text
//! nodes are wrapped greedily into the parent's width, and everything is drawn
//! in document order. This approximates the browser's paint; stacking
//! contexts and z-index are not modelled.

pub mod color;
pub mod paint;
pub mod text;

pub use paint::{DisplayList, PaintCommand, PaintRect};
pub use text::{TextMeasurer, wrap_lines};

use crate::canvas::RasterCanvas;
use crate::dom::{ComputedStyle, DomNode, DomTree, ElementNode, ScrollMetrics};
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Largest canvas side the rasterizer will allocate
pub const MAX_CANVAS_DIMENSION: u32 = 32_767;

const DEFAULT_FONT_SIZE: f32 = 16.0;
const DEFAULT_TEXT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Size of the full page in logical pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageDimensions {
    pub width: u32,
    pub height: u32,
}

impl PageDimensions {
    /// Largest scroll, offset or client extent across the root elements, per axis.
    ///
    /// This errs towards overestimating the content size.
    pub fn from_metrics(metrics: &[ScrollMetrics]) -> Self {
        let extent = |f: fn(&ScrollMetrics) -> [f64; 3]| {
            metrics
                .iter()
                .flat_map(f)
                .filter(|v| v.is_finite())
                .fold(0.0_f64, f64::max)
                .ceil()
                .clamp(1.0, MAX_CANVAS_DIMENSION as f64) as u32
        };

        Self {
            width: extent(|m| [m.scroll_width, m.offset_width, m.client_width]),
            height: extent(|m| [m.scroll_height, m.offset_height, m.client_height]),
        }
    }
}

/// Options for the page rasterizer
#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Font used for text; system fonts are tried when unset
    pub font_path: Option<PathBuf>,

    /// Opaque base layer painted before anything else
    pub background: Rgba<u8>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            font_path: None,
            background: Rgba([255, 255, 255, 255]),
        }
    }
}

impl RasterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the font file
    pub fn font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    /// Builder method: set the base layer color
    pub fn background(mut self, color: Rgba<u8>) -> Self {
        self.background = color;
        self
    }
}

/// Why a single node could not be painted
#[derive(Debug, Error, PartialEq)]
pub enum PaintFault {
    #[error("unsupported color {0:?}")]
    InvalidColor(String),

    #[error("unsupported {property} value {value:?}")]
    InvalidLength { property: &'static str, value: String },

    #[error("element has no layout box")]
    MissingGeometry,
}

/// Paints a DOM snapshot onto a page-sized canvas
#[derive(Debug)]
pub struct PageRasterizer {
    options: RasterOptions,
    measurer: TextMeasurer,
}

impl PageRasterizer {
    /// Create a rasterizer, loading the configured or a system font
    pub fn new(options: RasterOptions) -> Self {
        let measurer = TextMeasurer::discover(options.font_path.as_deref());
        Self { options, measurer }
    }

    /// Create a rasterizer with an explicit text measurer
    pub fn with_measurer(options: RasterOptions, measurer: TextMeasurer) -> Self {
        Self { options, measurer }
    }

    /// Rasterize the whole page and return the canvas with the page size
    pub fn rasterize_full_page(&self, document: &DomTree) -> (RasterCanvas, PageDimensions) {
        let (list, dimensions) = self.build_display_list(document);
        let canvas = RasterCanvas::new(dimensions.width, dimensions.height);
        let canvas = list.execute(canvas, &self.measurer);

        log::info!(
            "Rasterized {}x{} page with {} paint commands",
            dimensions.width,
            dimensions.height,
            list.len()
        );
        (canvas, dimensions)
    }

    /// Walk the document and collect paint commands, base layer first
    pub fn build_display_list(&self, document: &DomTree) -> (DisplayList, PageDimensions) {
        let dimensions = page_dimensions(document);
        let mut list = DisplayList::new();
        list.push(PaintCommand::Fill {
            color: self.options.background,
        });
        self.paint_element(&document.root, &mut list);
        (list, dimensions)
    }

    fn paint_element(&self, element: &ElementNode, list: &mut DisplayList) {
        // Hidden ancestors suppress their whole subtree
        if !is_rendered(element) {
            log::trace!("Skipping hidden <{}> subtree", element.tag_name);
            return;
        }

        if let Err(fault) = paint_box(element, list) {
            log::debug!("Stopped painting <{}>: {}", element.tag_name, fault);
        }

        for child in &element.children {
            match child {
                DomNode::Element(child) => self.paint_element(child, list),
                DomNode::Text(text) => match self.paint_text(element, &text.text) {
                    Ok(commands) => list.extend(commands),
                    Err(fault) => log::debug!("Skipping text in <{}>: {}", element.tag_name, fault),
                },
            }
        }
    }

    /// Wrap a text node into its parent's width, one command per line
    fn paint_text(&self, parent: &ElementNode, text: &str) -> Result<Vec<PaintCommand>, PaintFault> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let bounds = parent.bounding_box.ok_or(PaintFault::MissingGeometry)?;
        let style = &parent.computed_style;
        let font_size = match style.get("font-size") {
            Some(value) => parse_px("font-size", value)? as f32,
            None => DEFAULT_FONT_SIZE,
        };
        let color = match style.get("color") {
            Some(value) => parse_color(value)?,
            None => DEFAULT_TEXT_COLOR,
        };
        let line_height = resolve_line_height(style.get("line-height"), font_size);

        let lines = wrap_lines(text, bounds.width as f32, |line| self.measurer.measure(line, font_size));

        let mut baseline = bounds.y + font_size as f64;
        let mut commands = Vec::with_capacity(lines.len());
        for line in lines {
            commands.push(PaintCommand::Text {
                x: bounds.x,
                baseline,
                text: line,
                font_size,
                color,
            });
            baseline += line_height as f64;
        }
        Ok(commands)
    }
}

/// Page dimensions from the root metrics, falling back to the root's box
fn page_dimensions(document: &DomTree) -> PageDimensions {
    if !document.root_metrics.is_empty() {
        return PageDimensions::from_metrics(&document.root_metrics);
    }

    let fallback = document
        .root
        .bounding_box
        .map(|b| ScrollMetrics {
            scroll_width: b.x + b.width,
            scroll_height: b.y + b.height,
            ..Default::default()
        })
        .unwrap_or_default();
    PageDimensions::from_metrics(&[fallback])
}

/// Whether the element (and therefore its subtree) is painted at all
fn is_rendered(element: &ElementNode) -> bool {
    let style = &element.computed_style;
    if style.get("display").map(str::trim) == Some("none") {
        return false;
    }
    if matches!(style.get("visibility").map(str::trim), Some("hidden") | Some("collapse")) {
        return false;
    }
    !matches!(style.get("opacity").and_then(|o| o.trim().parse::<f64>().ok()), Some(o) if o <= 0.0)
}

/// Background fill then border stroke for one element.
///
/// A fault stops the element's paint where it occurs; a fill already pushed
/// stays on the list. Elements without area paint nothing.
fn paint_box(element: &ElementNode, list: &mut DisplayList) -> Result<(), PaintFault> {
    let style = &element.computed_style;
    let bounds = element.bounding_box.ok_or(PaintFault::MissingGeometry)?;
    if !bounds.is_visible() {
        return Ok(());
    }
    let rect = PaintRect {
        x: bounds.x,
        y: bounds.y,
        width: bounds.width,
        height: bounds.height,
    };

    if let Some(value) = style.get("background-color") {
        let color = parse_color(value)?;
        if !color::is_transparent(&color) {
            list.push(PaintCommand::FillRect { rect, color });
        }
    }

    list.extend(border_commands(style, rect)?);
    Ok(())
}

/// Stroke for a uniform border, one band per painted side otherwise
fn border_commands(style: &ComputedStyle, rect: PaintRect) -> Result<Vec<PaintCommand>, PaintFault> {
    let widths = match style.get("border-width") {
        Some(value) => side_values("border-width", value)?,
        None => match style.get("border-top-width") {
            Some(value) => [value; 4],
            None => return Ok(Vec::new()),
        },
    };
    let widths = [
        parse_px("border-width", widths[0])?,
        parse_px("border-width", widths[1])?,
        parse_px("border-width", widths[2])?,
        parse_px("border-width", widths[3])?,
    ];
    if widths.iter().all(|w| *w <= 0.0) {
        return Ok(Vec::new());
    }

    let colors = match style.get("border-color").or_else(|| style.get("border-top-color")) {
        Some(value) => side_values("border-color", value)?,
        None => [""; 4],
    };
    let mut sides = [(0.0, DEFAULT_TEXT_COLOR); 4];
    for (side, (width, color)) in sides.iter_mut().zip(widths.into_iter().zip(colors)) {
        // Colors of unpainted sides are never read
        if width > 0.0 && !color.is_empty() {
            *side = (width, parse_color(color)?);
        } else {
            side.0 = width;
        }
    }

    if sides.iter().all(|side| *side == sides[0]) {
        let (line_width, color) = sides[0];
        return Ok(vec![PaintCommand::StrokeRect { rect, line_width, color }]);
    }

    let [(top, top_color), (right, right_color), (bottom, bottom_color), (left, left_color)] = sides;
    let bands = [
        (PaintRect { height: top, ..rect }, top_color),
        (
            PaintRect {
                x: rect.x + rect.width - right,
                width: right,
                ..rect
            },
            right_color,
        ),
        (
            PaintRect {
                y: rect.y + rect.height - bottom,
                height: bottom,
                ..rect
            },
            bottom_color,
        ),
        (PaintRect { width: left, ..rect }, left_color),
    ];
    Ok(bands
        .into_iter()
        .filter(|(band, _)| band.width > 0.0 && band.height > 0.0)
        .map(|(rect, color)| PaintCommand::FillRect { rect, color })
        .collect())
}

/// Expand a one to four value box property to top, right, bottom, left
fn side_values<'a>(property: &'static str, value: &'a str) -> Result<[&'a str; 4], PaintFault> {
    match color::split_components(value).as_slice() {
        &[all] => Ok([all; 4]),
        &[vertical, horizontal] => Ok([vertical, horizontal, vertical, horizontal]),
        &[top, horizontal, bottom] => Ok([top, horizontal, bottom, horizontal]),
        &[top, right, bottom, left] => Ok([top, right, bottom, left]),
        _ => Err(PaintFault::InvalidLength {
            property,
            value: value.to_string(),
        }),
    }
}

fn parse_color(value: &str) -> Result<Rgba<u8>, PaintFault> {
    color::parse_css_color(value).ok_or_else(|| PaintFault::InvalidColor(value.to_string()))
}

/// Parse the first component of a pixel length (`"2px"`, `"2px 0px"`, `"0"`)
fn parse_px(property: &'static str, value: &str) -> Result<f64, PaintFault> {
    let first = value.split_whitespace().next().unwrap_or("");
    let number = first.strip_suffix("px").unwrap_or(first);
    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| PaintFault::InvalidLength {
            property,
            value: value.to_string(),
        })
}

/// `Npx` as is, a unitless factor times the font size, anything else the font size
fn resolve_line_height(value: Option<&str>, font_size: f32) -> f32 {
    let Some(value) = value.map(str::trim) else {
        return font_size;
    };
    if let Some(px) = value.strip_suffix("px") {
        return px.trim().parse::<f32>().ok().filter(|v| *v > 0.0).unwrap_or(font_size);
    }
    match value.parse::<f32>() {
        Ok(factor) if factor > 0.0 => factor * font_size,
        _ => font_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rasterizer() -> PageRasterizer {
        PageRasterizer::with_measurer(RasterOptions::default(), TextMeasurer::approximate())
    }

    fn document(root: ElementNode) -> DomTree {
        DomTree::new(root).with_root_metrics(ScrollMetrics {
            scroll_width: 200.0,
            scroll_height: 100.0,
            offset_width: 200.0,
            offset_height: 100.0,
            client_width: 200.0,
            client_height: 100.0,
        })
    }

    #[test]
    fn test_page_dimensions_take_largest_extent() {
        let html = ScrollMetrics {
            scroll_width: 1024.0,
            scroll_height: 3000.0,
            offset_width: 1024.0,
            offset_height: 800.0,
            client_width: 1009.0,
            client_height: 800.0,
        };
        let body = ScrollMetrics {
            scroll_width: 1100.4,
            scroll_height: 2990.0,
            offset_width: 1000.0,
            offset_height: 2990.0,
            client_width: 1000.0,
            client_height: 2990.0,
        };

        let dims = PageDimensions::from_metrics(&[html, body]);
        assert_eq!(dims, PageDimensions { width: 1101, height: 3000 });
    }

    #[test]
    fn test_page_dimensions_are_clamped() {
        assert_eq!(PageDimensions::from_metrics(&[]), PageDimensions { width: 1, height: 1 });

        let huge = ScrollMetrics {
            scroll_height: 1.0e9,
            ..Default::default()
        };
        assert_eq!(PageDimensions::from_metrics(&[huge]).height, MAX_CANVAS_DIMENSION);
    }

    #[test]
    fn test_background_then_border_in_order() {
        let root = ElementNode::new("body")
            .with_bounding_box(0.0, 0.0, 200.0, 100.0)
            .with_style("background-color", "rgb(255, 0, 0)")
            .with_style("border-width", "3px")
            .with_style("border-color", "rgb(0, 0, 255)");

        let (list, _) = rasterizer().build_display_list(&document(root));

        assert_eq!(list.len(), 3);
        assert!(matches!(list.commands[0], PaintCommand::Fill { .. }));
        assert!(matches!(list.commands[1], PaintCommand::FillRect { color: Rgba([255, 0, 0, 255]), .. }));
        assert!(matches!(list.commands[2], PaintCommand::StrokeRect { line_width, .. } if line_width == 3.0));
    }

    #[test]
    fn test_transparent_background_and_zero_border_paint_nothing() {
        let root = ElementNode::new("body")
            .with_bounding_box(0.0, 0.0, 200.0, 100.0)
            .with_style("background-color", "rgba(0, 0, 0, 0)")
            .with_style("border-width", "0px")
            .with_style("border-color", "rgb(0, 0, 0)");

        let (list, _) = rasterizer().build_display_list(&document(root));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_hidden_body_paints_only_base_layer() {
        let root = ElementNode::new("body")
            .with_bounding_box(0.0, 0.0, 200.0, 100.0)
            .with_style("display", "none")
            .with_style("background-color", "rgb(255, 0, 0)")
            .with_child(
                ElementNode::new("div")
                    .with_bounding_box(0.0, 0.0, 50.0, 50.0)
                    .with_style("display", "block")
                    .with_style("background-color", "rgb(0, 255, 0)")
                    .with_text("visible?"),
            );

        let rasterizer = rasterizer();
        let doc = document(root);
        let (list, _) = rasterizer.build_display_list(&doc);
        assert_eq!(list.commands, vec![PaintCommand::Fill { color: Rgba([255, 255, 255, 255]) }]);

        let (canvas, _) = rasterizer.rasterize_full_page(&doc);
        assert!(canvas.image().pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_invisible_and_transparent_subtrees_are_skipped() {
        let root = ElementNode::new("body")
            .with_bounding_box(0.0, 0.0, 200.0, 100.0)
            .with_child(
                ElementNode::new("div")
                    .with_bounding_box(0.0, 0.0, 10.0, 10.0)
                    .with_style("visibility", "hidden")
                    .with_style("background-color", "red"),
            )
            .with_child(
                ElementNode::new("div")
                    .with_bounding_box(0.0, 0.0, 10.0, 10.0)
                    .with_style("opacity", "0")
                    .with_child(
                        ElementNode::new("span")
                            .with_bounding_box(0.0, 0.0, 10.0, 10.0)
                            .with_style("background-color", "blue"),
                    ),
            );

        let (list, _) = rasterizer().build_display_list(&document(root));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_narrow_parent_wraps_text() {
        let root = ElementNode::new("body").with_bounding_box(0.0, 0.0, 200.0, 100.0).with_child(
            ElementNode::new("div")
                .with_bounding_box(10.0, 20.0, 40.0, 60.0)
                .with_style("font-size", "10px")
                .with_style("line-height", "14px")
                .with_style("color", "rgb(0, 0, 0)")
                .with_text("Hello world"),
        );

        let (list, _) = rasterizer().build_display_list(&document(root));

        assert_eq!(list.text_lines(), vec!["Hello", "world"]);
        let baselines: Vec<f64> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                PaintCommand::Text { x, baseline, .. } => {
                    assert_eq!(*x, 10.0);
                    Some(*baseline)
                }
                _ => None,
            })
            .collect();
        assert_eq!(baselines, vec![30.0, 44.0]);
    }

    #[test]
    fn test_whitespace_text_is_not_painted() {
        let root = ElementNode::new("body")
            .with_bounding_box(0.0, 0.0, 200.0, 100.0)
            .with_text("\n    ");

        let (list, _) = rasterizer().build_display_list(&document(root));
        assert!(list.text_lines().is_empty());
    }

    #[test]
    fn test_faulty_node_does_not_abort_walk() {
        let root = ElementNode::new("body")
            .with_bounding_box(0.0, 0.0, 200.0, 100.0)
            .with_child(
                ElementNode::new("div")
                    .with_bounding_box(0.0, 0.0, 50.0, 50.0)
                    .with_style("background-color", "color(display-p3 1 0 0)")
                    .with_child(
                        ElementNode::new("p")
                            .with_bounding_box(0.0, 0.0, 50.0, 10.0)
                            .with_style("background-color", "rgb(0, 0, 255)"),
                    ),
            )
            .with_child(
                ElementNode::new("div")
                    .with_bounding_box(0.0, 60.0, 50.0, 40.0)
                    .with_style("background-color", "rgb(0, 255, 0)"),
            );

        let (list, _) = rasterizer().build_display_list(&document(root));

        let fills: Vec<Rgba<u8>> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                PaintCommand::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![Rgba([0, 0, 255, 255]), Rgba([0, 255, 0, 255])]);
    }

    fn fill_rects(list: &DisplayList) -> Vec<(PaintRect, Rgba<u8>)> {
        list.commands
            .iter()
            .filter_map(|c| match c {
                PaintCommand::FillRect { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_per_side_border_colors_keep_background() {
        let root = ElementNode::new("body")
            .with_bounding_box(0.0, 0.0, 200.0, 100.0)
            .with_style("background-color", "rgb(255, 0, 0)")
            .with_style("border-width", "1px")
            .with_style("border-color", "rgb(255, 0, 0) rgb(0, 0, 255)");

        let (list, _) = rasterizer().build_display_list(&document(root));
        let fills = fill_rects(&list);

        assert_eq!(fills.len(), 5, "{:?}", list.commands);
        assert_eq!(fills[0], (PaintRect { x: 0.0, y: 0.0, width: 200.0, height: 100.0 }, Rgba([255, 0, 0, 255])));
        // top, right, bottom, left
        assert_eq!(fills[1], (PaintRect { x: 0.0, y: 0.0, width: 200.0, height: 1.0 }, Rgba([255, 0, 0, 255])));
        assert_eq!(fills[2], (PaintRect { x: 199.0, y: 0.0, width: 1.0, height: 100.0 }, Rgba([0, 0, 255, 255])));
        assert_eq!(fills[3], (PaintRect { x: 0.0, y: 99.0, width: 200.0, height: 1.0 }, Rgba([255, 0, 0, 255])));
        assert_eq!(fills[4], (PaintRect { x: 0.0, y: 0.0, width: 1.0, height: 100.0 }, Rgba([0, 0, 255, 255])));
    }

    #[test]
    fn test_bottom_only_border_is_painted() {
        let root = ElementNode::new("body")
            .with_bounding_box(0.0, 0.0, 200.0, 100.0)
            .with_style("border-width", "0px 0px 2px")
            .with_style("border-color", "rgb(0, 0, 0) rgb(0, 0, 0) rgb(0, 128, 0)");

        let (list, _) = rasterizer().build_display_list(&document(root));

        assert_eq!(
            fill_rects(&list),
            vec![(PaintRect { x: 0.0, y: 98.0, width: 200.0, height: 2.0 }, Rgba([0, 128, 0, 255]))]
        );

        let (canvas, _) = rasterizer().rasterize_full_page(&document(
            ElementNode::new("body")
                .with_bounding_box(0.0, 0.0, 200.0, 100.0)
                .with_style("border-width", "0px 0px 2px")
                .with_style("border-color", "rgb(0, 128, 0)"),
        ));
        assert_eq!(canvas.pixel(50, 99), Some(Rgba([0, 128, 0, 255])));
        assert_eq!(canvas.pixel(50, 0), Some(Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_bad_border_color_keeps_background() {
        let root = ElementNode::new("body")
            .with_bounding_box(0.0, 0.0, 200.0, 100.0)
            .with_style("background-color", "rgb(0, 0, 255)")
            .with_style("border-width", "1px")
            .with_style("border-color", "color(display-p3 1 0 0)");

        let (list, _) = rasterizer().build_display_list(&document(root));

        assert_eq!(list.len(), 2);
        assert!(matches!(list.commands[1], PaintCommand::FillRect { color: Rgba([0, 0, 255, 255]), .. }));
    }

    #[test]
    fn test_zero_area_box_paints_nothing_but_children_do() {
        let root = ElementNode::new("body").with_bounding_box(0.0, 0.0, 200.0, 100.0).with_child(
            ElementNode::new("div")
                .with_bounding_box(0.0, 0.0, 200.0, 0.0)
                .with_style("background-color", "rgb(255, 0, 0)")
                .with_child(
                    ElementNode::new("span")
                        .with_bounding_box(0.0, 0.0, 20.0, 20.0)
                        .with_style("background-color", "rgb(0, 255, 0)"),
                ),
        );

        let (list, _) = rasterizer().build_display_list(&document(root));

        let colors: Vec<Rgba<u8>> = fill_rects(&list).into_iter().map(|(_, color)| color).collect();
        assert_eq!(colors, vec![Rgba([0, 255, 0, 255])]);
    }

    #[test]
    fn test_side_values_expansion() {
        assert_eq!(side_values("border-width", "1px"), Ok(["1px"; 4]));
        assert_eq!(side_values("border-width", "1px 2px"), Ok(["1px", "2px", "1px", "2px"]));
        assert_eq!(side_values("border-width", "1px 2px 3px"), Ok(["1px", "2px", "3px", "2px"]));
        assert!(side_values("border-width", "1px 2px 3px 4px 5px").is_err());
    }

    #[test]
    fn test_full_page_canvas_uses_scroll_height() {
        let doc = DomTree::new(ElementNode::new("body").with_bounding_box(0.0, 0.0, 300.0, 3000.0))
            .with_root_metrics(ScrollMetrics {
                scroll_width: 300.0,
                scroll_height: 3000.0,
                offset_width: 300.0,
                offset_height: 800.0,
                client_width: 300.0,
                client_height: 800.0,
            });

        let (canvas, dims) = rasterizer().rasterize_full_page(&doc);
        assert_eq!(dims.height, 3000);
        assert_eq!(canvas.height(), 3000);
        assert_eq!(canvas.pixel(0, 2999), Some(Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_resolve_line_height() {
        assert_eq!(resolve_line_height(Some("20px"), 16.0), 20.0);
        assert_eq!(resolve_line_height(Some("1.5"), 10.0), 15.0);
        assert_eq!(resolve_line_height(Some("normal"), 12.0), 12.0);
        assert_eq!(resolve_line_height(None, 12.0), 12.0);
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("border-width", "2px"), Ok(2.0));
        assert_eq!(parse_px("border-width", "1px 0px 1px 0px"), Ok(1.0));
        assert_eq!(parse_px("border-width", "0"), Ok(0.0));
        assert!(parse_px("font-size", "medium").is_err());
    }
}
