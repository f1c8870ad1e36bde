//! Region cropping of a captured viewport bitmap

use crate::canvas::{RasterCanvas, decode_bitmap};
use crate::capture::geometry::PhysicalRect;
use crate::error::Result;
use image::{RgbaImage, imageops};

/// Decode `data_url` and copy `rect` out of it.
///
/// A decode failure aborts the crop; nothing is retried.
pub async fn crop(data_url: &str, rect: PhysicalRect) -> Result<RasterCanvas> {
    let bitmap = decode_bitmap(data_url).await?;
    Ok(crop_surface(&bitmap, rect))
}

/// Copy `rect` of an already decoded bitmap to the origin of a new canvas.
///
/// The canvas is always `max(1, width) x max(1, height)`; any part of the
/// rectangle outside the bitmap stays transparent.
pub fn crop_surface(bitmap: &RgbaImage, rect: PhysicalRect) -> RasterCanvas {
    let mut canvas = RasterCanvas::new(rect.width, rect.height);
    let source = imageops::crop_imm(bitmap, rect.x, rect.y, rect.width, rect.height).to_image();
    imageops::replace(canvas.image_mut(), &source, 0, 0);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RasterCanvas;
    use crate::capture::geometry::{LogicalRect, to_source_rect};
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn bitmap_with_square() -> RgbaImage {
        let mut img = RgbaImage::from_pixel(100, 100, WHITE);
        for x in 20..30 {
            for y in 40..50 {
                img.put_pixel(x, y, RED);
            }
        }
        img
    }

    #[test]
    fn test_crop_copies_requested_pixels() {
        let canvas = crop_surface(&bitmap_with_square(), PhysicalRect { x: 20, y: 40, width: 10, height: 10 });

        assert_eq!((canvas.width(), canvas.height()), (10, 10));
        assert_eq!(canvas.pixel(0, 0), Some(RED));
        assert_eq!(canvas.pixel(9, 9), Some(RED));
    }

    #[test]
    fn test_crop_dimensions_match_scaled_rect() {
        let bitmap = bitmap_with_square();
        for (w, h) in [(0.0, 0.0), (3.2, 7.7), (10.0, 1.0)] {
            let rect = LogicalRect::new(1.0, 1.0, w, h);
            let canvas = crop_surface(&bitmap, to_source_rect(&rect, 2.0));
            assert_eq!(canvas.width(), ((w * 2.0_f64).round() as u32).max(1));
            assert_eq!(canvas.height(), ((h * 2.0_f64).round() as u32).max(1));
        }
    }

    #[test]
    fn test_crop_outside_bitmap_is_transparent() {
        let canvas = crop_surface(&bitmap_with_square(), PhysicalRect { x: 95, y: 95, width: 10, height: 10 });

        assert_eq!((canvas.width(), canvas.height()), (10, 10));
        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
        assert_eq!(canvas.pixel(9, 9), Some(Rgba([0, 0, 0, 0])));
    }

    #[tokio::test]
    async fn test_crop_decodes_data_url() {
        let url = RasterCanvas::from_image(bitmap_with_square())
            .into_artifact()
            .unwrap()
            .data_url;

        let canvas = crop(&url, PhysicalRect { x: 25, y: 45, width: 2, height: 2 }).await.unwrap();
        assert_eq!(canvas.pixel(1, 1), Some(RED));
    }

    #[tokio::test]
    async fn test_crop_fails_on_undecodable_bitmap() {
        let result = crop("data:image/png;base64,AAAA", PhysicalRect { x: 0, y: 0, width: 1, height: 1 }).await;
        assert!(result.is_err());
    }
}
