//! Paint command set and its execution onto a canvas

use crate::canvas::RasterCanvas;
use crate::raster::text::TextMeasurer;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{Blend, draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use rusttype::Scale;

/// Share of the font size covered by a greeked text block
const GREEK_BLOCK_HEIGHT: f32 = 0.5;

/// An axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Flood the whole canvas; the opaque base layer
    Fill { color: Rgba<u8> },
    FillRect { rect: PaintRect, color: Rgba<u8> },
    StrokeRect { rect: PaintRect, line_width: f64, color: Rgba<u8> },
    /// One line of text; `baseline` is the y of the alphabetic baseline
    Text {
        x: f64,
        baseline: f64,
        text: String,
        font_size: f32,
        color: Rgba<u8>,
    },
}

/// Paint commands in document order; later commands draw over earlier ones
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    pub commands: Vec<PaintCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: PaintCommand) {
        self.commands.push(command);
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = PaintCommand>) {
        self.commands.extend(commands);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Lines of text in paint order
    pub fn text_lines(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                PaintCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Execute every command onto `canvas`, alpha blending as it goes
    pub fn execute(&self, canvas: RasterCanvas, measurer: &TextMeasurer) -> RasterCanvas {
        let mut target = Blend(canvas.into_image());
        for command in &self.commands {
            execute_command(&mut target, command, measurer);
        }
        RasterCanvas::from_image(target.0)
    }
}

fn execute_command(target: &mut Blend<RgbaImage>, command: &PaintCommand, measurer: &TextMeasurer) {
    match command {
        PaintCommand::Fill { color } => {
            for pixel in target.0.pixels_mut() {
                *pixel = *color;
            }
        }
        PaintCommand::FillRect { rect, color } => {
            if let Some(rect) = to_pixel_rect(rect) {
                draw_filled_rect_mut(target, rect, *color);
            }
        }
        PaintCommand::StrokeRect { rect, line_width, color } => {
            for band in stroke_bands(rect, *line_width) {
                if let Some(r) = to_pixel_rect(&band) {
                    draw_filled_rect_mut(target, r, *color);
                }
            }
        }
        PaintCommand::Text { x, baseline, text, font_size, color } => match measurer.font() {
            Some(font) => {
                let scale = Scale::uniform(*font_size);
                let top = *baseline as f32 - font.v_metrics(scale).ascent;
                draw_text_mut(target, *color, x.round() as i32, top.round() as i32, scale, font, text);
            }
            None => {
                // No glyphs available: draw the line as a block of its measured width
                let height = (*font_size * GREEK_BLOCK_HEIGHT) as f64;
                let block = PaintRect {
                    x: *x,
                    y: *baseline - height,
                    width: measurer.measure(text, *font_size) as f64,
                    height,
                };
                if let Some(r) = to_pixel_rect(&block) {
                    draw_filled_rect_mut(target, r, *color);
                }
            }
        },
    }
}

/// Non-overlapping top, bottom, left and right bands of a stroke inside `rect`
fn stroke_bands(rect: &PaintRect, line_width: f64) -> Vec<PaintRect> {
    let (x, y) = (rect.x.round(), rect.y.round());
    let (width, height) = (rect.width.round(), rect.height.round());
    let line = line_width.round().max(1.0);

    // Stroke meets itself: the whole box is border
    if 2.0 * line >= width || 2.0 * line >= height {
        return vec![PaintRect { x, y, width, height }];
    }

    let inner_height = height - 2.0 * line;
    vec![
        PaintRect { x, y, width, height: line },
        PaintRect { x, y: y + height - line, width, height: line },
        PaintRect { x, y: y + line, width: line, height: inner_height },
        PaintRect { x: x + width - line, y: y + line, width: line, height: inner_height },
    ]
}

/// Round to whole pixels; `None` when nothing would be drawn
fn to_pixel_rect(rect: &PaintRect) -> Option<Rect> {
    let width = rect.width.round();
    let height = rect.height.round();
    if !(width >= 1.0 && height >= 1.0) {
        return None;
    }
    Some(Rect::at(rect.x.round() as i32, rect.y.round() as i32).of_size(width as u32, height as u32))
}
