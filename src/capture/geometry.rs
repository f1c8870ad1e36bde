//! Conversion between logical (CSS) pixels and physical bitmap pixels

use crate::error::{CaptureError, Result};
use serde::{Deserialize, Serialize};

/// Ratio above which the vertical and horizontal scale are considered different
const NON_UNIFORM_TOLERANCE: f64 = 0.01;

/// Logical and physical size of the visible viewport at capture time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ViewportMetrics {
    pub logical_width: f64,
    pub logical_height: f64,
    pub physical_width: u32,
    pub physical_height: u32,
}

/// A rectangle in logical pixels, as selected by the user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LogicalRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A rectangle in physical bitmap pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhysicalRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ViewportMetrics {
    pub fn new(logical_width: f64, logical_height: f64, physical_width: u32, physical_height: u32) -> Self {
        Self {
            logical_width,
            logical_height,
            physical_width,
            physical_height,
        }
    }

    /// Whether both axes scale by the same factor
    pub fn is_uniform(&self) -> bool {
        if self.logical_width <= 0.0 || self.logical_height <= 0.0 {
            return true;
        }
        let horizontal = self.physical_width as f64 / self.logical_width;
        let vertical = self.physical_height as f64 / self.logical_height;
        ((horizontal - vertical).abs() / horizontal.max(f64::EPSILON)) <= NON_UNIFORM_TOLERANCE
    }
}

impl LogicalRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Scale factor between the viewport's logical width and its captured bitmap width.
///
/// Only the width is used; both axes are assumed to scale uniformly.
pub fn resolve_scale(viewport: &ViewportMetrics) -> Result<f64> {
    if !(viewport.logical_width > 0.0) || !viewport.logical_width.is_finite() {
        return Err(CaptureError::Coordinate(format!(
            "Viewport logical width must be positive, got {}",
            viewport.logical_width
        )));
    }
    if viewport.physical_width == 0 {
        return Err(CaptureError::Coordinate("Captured bitmap has zero width".to_string()));
    }
    if !viewport.is_uniform() {
        log::warn!(
            "Viewport scales non-uniformly ({}x{} logical, {}x{} physical); using the horizontal factor",
            viewport.logical_width,
            viewport.logical_height,
            viewport.physical_width,
            viewport.physical_height
        );
    }

    Ok(viewport.physical_width as f64 / viewport.logical_width)
}

/// Scale a logical rectangle to physical pixels, rounding to the nearest pixel.
///
/// Width and height are at least one pixel so an empty selection still yields a
/// 1x1 extraction.
pub fn to_source_rect(rect: &LogicalRect, scale: f64) -> PhysicalRect {
    let to_pixel = |v: f64| {
        let scaled = (v * scale).round();
        if scaled.is_finite() && scaled > 0.0 { scaled.min(u32::MAX as f64) as u32 } else { 0 }
    };

    PhysicalRect {
        x: to_pixel(rect.x),
        y: to_pixel(rect.y),
        width: to_pixel(rect.width).max(1),
        height: to_pixel(rect.height).max(1),
    }
}
