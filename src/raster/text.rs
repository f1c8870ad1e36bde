//! Text measurement and greedy line wrapping

use crate::error::{CaptureError, Result};
use imageproc::drawing::text_size;
use rusttype::{Font, Scale};
use std::path::Path;

/// Average advance of a glyph relative to the font size when no font is loaded
const APPROXIMATE_ADVANCE: f32 = 0.55;

/// Common locations of a sans-serif system font
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Measures text widths, with a real font when one is available
pub struct TextMeasurer {
    font: Option<Font<'static>>,
}

impl std::fmt::Debug for TextMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextMeasurer")
            .field("has_font", &self.font.is_some())
            .finish()
    }
}

impl TextMeasurer {
    /// Measure with a fixed per-glyph advance; deterministic and font-free
    pub fn approximate() -> Self {
        Self { font: None }
    }

    /// Load a TrueType/OpenType font from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| CaptureError::DecodeFailed(format!("Failed to read font {}: {}", path.display(), e)))?;
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| CaptureError::DecodeFailed(format!("Unsupported font file {}", path.display())))?;
        Ok(Self { font: Some(font) })
    }

    /// Use the configured font, else the first system font found, else approximate
    pub fn discover(configured: Option<&Path>) -> Self {
        if let Some(path) = configured {
            match Self::from_path(path) {
                Ok(measurer) => return measurer,
                Err(e) => log::warn!("{}; falling back to system fonts", e),
            }
        }

        for candidate in SYSTEM_FONT_PATHS {
            let path = Path::new(candidate);
            if path.exists() {
                if let Ok(measurer) = Self::from_path(path) {
                    log::debug!("Using system font {}", candidate);
                    return measurer;
                }
            }
        }

        log::debug!("No font available, text will be approximated");
        Self::approximate()
    }

    /// The loaded font, if any
    pub fn font(&self) -> Option<&Font<'static>> {
        self.font.as_ref()
    }

    /// Width of `text` at `font_size` pixels
    pub fn measure(&self, text: &str, font_size: f32) -> f32 {
        match &self.font {
            Some(font) => text_size(Scale::uniform(font_size), font, text).0 as f32,
            None => text.chars().count() as f32 * font_size * APPROXIMATE_ADVANCE,
        }
    }
}

/// Greedily break `text` into lines no wider than `max_width`.
///
/// Words are accumulated while the line fits; a word that overflows starts a
/// new line. A single word wider than `max_width` gets a line of its own.
pub fn wrap_lines(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", line, word)
        };

        if !line.is_empty() && measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
