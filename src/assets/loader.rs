//! Image decoding for the grids and the lightbox
//!
//! Decoding is CPU-bound, so it runs on tokio's blocking pool and the
//! result is handed back to the UI as ready-to-upload RGBA handles.

use iced::widget::image::Handle;
use image::{imageops, DynamicImage};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task;

/// Longest edge of the displayed image
const MAX_EDGE: u32 = 1920;
/// Longest edge of the blurred placeholder
const PLACEHOLDER_EDGE: u32 = 24;
const PLACEHOLDER_SIGMA: f32 = 2.0;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    #[error("image not found: {0}")]
    Missing(PathBuf),
    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("background task failed: {0}")]
    Join(String),
}

/// A decoded image plus its blurred stand-in
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub full: Handle,
    pub placeholder: Handle,
    pub width: u32,
    pub height: u32,
}

/// Resolve a content reference such as `/images/tvorba/1.jpg` against the assets root
pub fn resolve(assets_dir: &Path, reference: &str) -> PathBuf {
    assets_dir.join(reference.trim_start_matches('/'))
}

/// Decode an image file in the background
pub async fn load_image(path: PathBuf) -> Result<DecodedImage, LoadError> {
    task::spawn_blocking(move || load_image_blocking(&path))
        .await
        .map_err(|e| LoadError::Join(e.to_string()))?
}

fn load_image_blocking(path: &Path) -> Result<DecodedImage, LoadError> {
    if !path.exists() {
        log::warn!("❌ Missing image: {}", path.display());
        return Err(LoadError::Missing(path.to_path_buf()));
    }

    let img = image::open(path).map_err(|e| {
        log::warn!("❌ Failed to decode {}: {}", path.display(), e);
        LoadError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    let decoded = decode(img);
    log::debug!(
        "🖼️  Decoded {} ({}x{})",
        path.display(),
        decoded.width,
        decoded.height
    );
    Ok(decoded)
}

/// Downscale for display and derive the placeholder
fn decode(img: DynamicImage) -> DecodedImage {
    let display = if img.width() > MAX_EDGE || img.height() > MAX_EDGE {
        img.thumbnail(MAX_EDGE, MAX_EDGE)
    } else {
        img
    };

    let small = display.thumbnail(PLACEHOLDER_EDGE, PLACEHOLDER_EDGE).to_rgba8();
    let blurred = imageops::blur(&small, PLACEHOLDER_SIGMA);
    let placeholder = Handle::from_rgba(blurred.width(), blurred.height(), blurred.into_raw());

    let rgba = display.to_rgba8();
    let (width, height) = rgba.dimensions();
    let full = Handle::from_rgba(width, height, rgba.into_raw());

    DecodedImage {
        full,
        placeholder,
        width,
        height,
    }
}

/// Decoded images by content reference, shared by both collections
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<String, Result<DecodedImage, LoadError>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, reference: &str) -> Option<&Result<DecodedImage, LoadError>> {
        self.entries.get(reference)
    }

    pub fn image(&self, reference: &str) -> Option<&DecodedImage> {
        self.get(reference).and_then(|entry| entry.as_ref().ok())
    }

    pub fn insert(&mut self, reference: String, result: Result<DecodedImage, LoadError>) {
        self.entries.insert(reference, result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("portfolio-gallery-loader-{}-{}", std::process::id(), name));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_resolve_strips_leading_slash() {
        let root = Path::new("/srv/assets");
        assert_eq!(
            resolve(root, "/images/tvorba/1.jpg"),
            PathBuf::from("/srv/assets/images/tvorba/1.jpg")
        );
        assert_eq!(resolve(root, "images/a.png"), PathBuf::from("/srv/assets/images/a.png"));
    }

    #[test]
    fn test_decode_downscales_large_images() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4000, 1000, Rgb([200, 10, 10])));
        let decoded = decode(img);

        assert_eq!(decoded.width, MAX_EDGE);
        assert_eq!(decoded.height, 480);
    }

    #[test]
    fn test_decode_keeps_small_images() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(300, 200));
        let decoded = decode(img);
        assert_eq!((decoded.width, decoded.height), (300, 200));
    }

    #[test_log::test]
    fn test_missing_file() {
        let path = temp_dir("missing").join("nope.jpg");
        assert_eq!(load_image_blocking(&path).unwrap_err(), LoadError::Missing(path));
    }

    #[test_log::test]
    fn test_corrupt_file_is_decode_error() {
        let path = temp_dir("corrupt").join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(matches!(load_image_blocking(&path), Err(LoadError::Decode { .. })));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test_log::test]
    fn test_load_image_from_disk() {
        let dir = temp_dir("ok");
        let path = dir.join("tile.png");
        RgbImage::from_pixel(64, 32, Rgb([10, 20, 30])).save(&path).unwrap();

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let decoded = runtime.block_on(load_image(path)).unwrap();
        assert_eq!((decoded.width, decoded.height), (64, 32));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_cache_keeps_failures() {
        let mut cache = ImageCache::new();
        cache.insert("/a.jpg".into(), Err(LoadError::Join("cancelled".into())));

        assert!(cache.get("/a.jpg").is_some());
        assert!(cache.image("/a.jpg").is_none());
        assert_eq!(cache.len(), 1);
    }
}
