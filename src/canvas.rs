//! Owned pixel surfaces and the encoded bitmap artifact they turn into

use crate::error::{CaptureError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::{ImageOutputFormat, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// A physical-pixel surface owned by whoever created it until it becomes an artifact
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    /// Allocate a transparent canvas; zero dimensions are bumped to one pixel
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
        }
    }

    /// Allocate a canvas filled with a single color
    pub fn filled(width: u32, height: u32, color: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width.max(1), height.max(1), color),
        }
    }

    /// Wrap an existing image
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Read a single pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        (x < self.width() && y < self.height()).then(|| *self.image.get_pixel(x, y))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Encode the canvas contents as PNG bytes
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut png_bytes: Vec<u8> = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut png_bytes), ImageOutputFormat::Png)
            .map_err(|e| CaptureError::EncodeFailed(e.to_string()))?;
        Ok(png_bytes)
    }

    /// Consume the canvas and produce the final bitmap artifact
    pub fn into_artifact(self) -> Result<BitmapArtifact> {
        let png = self.encode_png()?;
        Ok(BitmapArtifact {
            width: self.width(),
            height: self.height(),
            data_url: encode_png_data_url(&png),
        })
    }
}

/// A PNG bitmap carried as a self-describing data URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BitmapArtifact {
    pub width: u32,
    pub height: u32,
    pub data_url: String,
}

impl BitmapArtifact {
    /// Decode the PNG payload back to raw bytes
    pub fn png_bytes(&self) -> Result<Vec<u8>> {
        decode_data_url(&self.data_url)
    }
}

/// Wrap PNG bytes in a `data:image/png;base64,` URL
pub fn encode_png_data_url(png: &[u8]) -> String {
    format!("{}{}", PNG_DATA_URL_PREFIX, BASE64.encode(png))
}

/// Extract the payload bytes of a base64 data URL
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| CaptureError::DecodeFailed("Bitmap is not a data URL".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| CaptureError::DecodeFailed("Data URL has no payload".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(CaptureError::DecodeFailed(format!("Unsupported data URL encoding: {}", header)));
    }

    BASE64
        .decode(payload.trim())
        .map_err(|e| CaptureError::DecodeFailed(format!("Invalid base64 payload: {}", e)))
}

/// Decode a bitmap data URL into a drawable surface.
///
/// Decoding runs on the blocking pool; this is the point where a crop waits.
pub async fn decode_bitmap(data_url: &str) -> Result<RgbaImage> {
    let bytes = decode_data_url(data_url)?;
    tokio::task::spawn_blocking(move || {
        image::load_from_memory(&bytes)
            .map(|image| image.to_rgba8())
            .map_err(|e| CaptureError::DecodeFailed(e.to_string()))
    })
    .await
    .map_err(|e| CaptureError::DecodeFailed(format!("Decode task failed: {}", e)))?
}
