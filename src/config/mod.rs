use anyhow::{Result, bail};
use image::imageops::FilterType;
use std::env;

/// Resize handler configuration
#[derive(Debug, Clone)]
pub struct ResizeConfig {
    /// Bucket receiving resized images (default: "destination-bucket-name")
    pub destination_bucket: String,

    /// Output width in pixels (default: 128)
    pub target_width: u32,

    /// Output height in pixels (default: 128)
    pub target_height: u32,

    /// JPEG quality, 1-100 (default: 75)
    pub jpeg_quality: u8,

    /// Resampling filter used for the resize (default: CatmullRom)
    pub filter: FilterType,

    /// URL-decode event object keys before use (default: false)
    pub decode_object_keys: bool,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            destination_bucket: "destination-bucket-name".to_string(),
            target_width: 128,
            target_height: 128,
            jpeg_quality: 75,
            filter: FilterType::CatmullRom,
            decode_object_keys: false,
        }
    }
}

impl ResizeConfig {
    pub fn new(destination_bucket: impl Into<String>, target_width: u32, target_height: u32) -> Self {
        Self {
            destination_bucket: destination_bucket.into(),
            target_width,
            target_height,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            destination_bucket: env::var("DESTINATION_BUCKET")
                .unwrap_or(default.destination_bucket),

            target_width: env::var("TARGET_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.target_width),

            target_height: env::var("TARGET_HEIGHT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.target_height),

            jpeg_quality: env::var("JPEG_QUALITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.jpeg_quality),

            filter: env::var("RESIZE_FILTER")
                .ok()
                .and_then(|v| parse_filter(&v))
                .unwrap_or(default.filter),

            decode_object_keys: env::var("DECODE_OBJECT_KEYS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(default.decode_object_keys),
        }
    }

    /// 128x128 thumbnails
    pub fn thumbnail(destination_bucket: impl Into<String>) -> Self {
        Self::new(destination_bucket, 128, 128)
    }

    /// 512x512 previews
    pub fn preview(destination_bucket: impl Into<String>) -> Self {
        Self::new(destination_bucket, 512, 512)
    }

    pub fn validate(&self) -> Result<()> {
        if self.destination_bucket.trim().is_empty() {
            bail!("DESTINATION_BUCKET must not be empty");
        }
        if self.target_width == 0 || self.target_height == 0 {
            bail!(
                "Target dimensions must be non-zero, got {}x{}",
                self.target_width,
                self.target_height
            );
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            bail!("JPEG_QUALITY must be between 1 and 100, got {}", self.jpeg_quality);
        }
        Ok(())
    }
}

fn parse_filter(name: &str) -> Option<FilterType> {
    match name.trim().to_lowercase().as_str() {
        "nearest" => Some(FilterType::Nearest),
        "triangle" | "bilinear" => Some(FilterType::Triangle),
        "catmullrom" | "bicubic" => Some(FilterType::CatmullRom),
        "gaussian" => Some(FilterType::Gaussian),
        "lanczos3" | "lanczos" => Some(FilterType::Lanczos3),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResizeConfig::default();
        assert_eq!(config.destination_bucket, "destination-bucket-name");
        assert_eq!((config.target_width, config.target_height), (128, 128));
        assert_eq!(config.jpeg_quality, 75);
        assert_eq!(config.filter, FilterType::CatmullRom);
        assert!(!config.decode_object_keys);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let thumb = ResizeConfig::thumbnail("thumbs");
        assert_eq!((thumb.target_width, thumb.target_height), (128, 128));
        assert_eq!(thumb.destination_bucket, "thumbs");

        let preview = ResizeConfig::preview("previews");
        assert_eq!((preview.target_width, preview.target_height), (512, 512));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ResizeConfig::new("", 128, 128).validate().is_err());
        assert!(ResizeConfig::new("out", 0, 128).validate().is_err());
        assert!(ResizeConfig::new("out", 128, 0).validate().is_err());

        let mut config = ResizeConfig::default();
        config.jpeg_quality = 0;
        assert!(config.validate().is_err());
        config.jpeg_quality = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(parse_filter("Lanczos3"), Some(FilterType::Lanczos3));
        assert_eq!(parse_filter("bicubic"), Some(FilterType::CatmullRom));
        assert_eq!(parse_filter(" nearest "), Some(FilterType::Nearest));
        assert_eq!(parse_filter("sinc"), None);
    }
}
