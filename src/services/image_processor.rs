use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage};

use crate::config::ResizeConfig;
use crate::error::{ResizeError, Result};

/// Decode, resize and JPEG-encode step of the pipeline.
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    width: u32,
    height: u32,
    filter: FilterType,
    quality: u8,
}

impl ImageProcessor {
    pub fn new(width: u32, height: u32, filter: FilterType, quality: u8) -> Self {
        Self {
            width,
            height,
            filter,
            quality,
        }
    }

    pub fn from_config(config: &ResizeConfig) -> Self {
        Self::new(
            config.target_width,
            config.target_height,
            config.filter,
            config.jpeg_quality,
        )
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Format is guessed from the bytes, never from the object key.
    pub fn decode(&self, data: &[u8]) -> Result<DynamicImage> {
        image::load_from_memory(data)
            .map_err(|e| ResizeError::UnsupportedFormat(format!("Failed to load image: {}", e)))
    }

    /// Stretches or shrinks to exactly the target size; aspect ratio is not kept.
    pub fn resize(&self, img: &DynamicImage) -> DynamicImage {
        img.resize_exact(self.width, self.height, self.filter)
    }

    /// JPEG has no alpha channel and only 8-bit samples, so everything is
    /// flattened to RGB8 first.
    pub fn encode_jpeg(&self, img: &DynamicImage) -> Result<Vec<u8>> {
        let rgb = match img {
            DynamicImage::ImageRgb8(buf) => buf.clone(),
            other => other.to_rgb8(),
        };

        let mut out_data = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut out_data, self.quality);
        encoder
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
            .map_err(|e| ResizeError::Encoding(format!("Failed to encode JPEG: {}", e)))?;
        Ok(out_data)
    }

    pub fn process(&self, data: &[u8]) -> Result<Vec<u8>> {
        let img = self.decode(data)?;
        tracing::debug!(
            "Decoded {}x{} image ({:?})",
            img.width(),
            img.height(),
            img.color()
        );
        let resized = self.resize(&img);
        self.encode_jpeg(&resized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 128]));
        let mut data = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut data), ImageFormat::Png)
            .unwrap();
        data
    }

    fn processor(width: u32, height: u32) -> ImageProcessor {
        ImageProcessor::new(width, height, FilterType::CatmullRom, 75)
    }

    #[test]
    fn test_process_produces_exact_dimensions() {
        let out = processor(128, 128).process(&png_bytes(300, 200)).unwrap();

        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (128, 128));
    }

    #[test]
    fn test_resize_ignores_aspect_ratio() {
        let p = processor(512, 64);
        let img = p.decode(&png_bytes(10, 10)).unwrap();
        let resized = p.resize(&img);
        assert_eq!((resized.width(), resized.height()), (512, 64));
    }

    #[test]
    fn test_decode_rejects_text() {
        let result = processor(128, 128).decode(b"Hello world! This is not an image.");
        assert!(matches!(result, Err(ResizeError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_decode_rejects_truncated_png() {
        let content = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";
        let result = processor(128, 128).decode(content);
        assert!(matches!(result, Err(ResizeError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_encode_handles_16_bit_grayscale() {
        let img = DynamicImage::ImageLuma16(image::ImageBuffer::from_pixel(
            8,
            8,
            image::Luma([40_000u16]),
        ));
        let out = processor(8, 8).encode_jpeg(&img).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
    }
}
