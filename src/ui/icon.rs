//! Logo and window icon loading
//!
//! The logo comes from `assets/icon.png`; the window icon may also come from
//! `assets/icon.ico` on Windows. When the file is missing or unreadable
//! a generated placeholder is used instead and the failure is logged.

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;
use tracing::warn;

/// Edge length of the logo shown in the header
pub const LOGO_SIZE: u32 = 200;

/// Edge length of the window icon
const WINDOW_ICON_SIZE: u32 = 64;

/// Load and scale the image at `path` to a `size` × `size` square
pub fn load_square(path: &Path, size: u32) -> Result<RgbaImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to load image: {}", path.display()))?
        .resize_exact(size, size, FilterType::Lanczos3)
        .to_rgba8();
    Ok(img)
}

/// Logo image, or the placeholder when `path` cannot be loaded
pub fn logo_or_placeholder(path: &Path) -> RgbaImage {
    load_square(path, LOGO_SIZE).unwrap_or_else(|e| {
        warn!("Logo unavailable, using placeholder: {:#}", e);
        placeholder(LOGO_SIZE)
    })
}

/// Window icon, or the placeholder when `path` cannot be loaded
pub fn window_icon(path: &Path) -> egui::IconData {
    let img = load_square(path, WINDOW_ICON_SIZE).unwrap_or_else(|e| {
        warn!("Window icon unavailable, using placeholder: {:#}", e);
        placeholder(WINDOW_ICON_SIZE)
    });
    egui::IconData {
        width: img.width(),
        height: img.height(),
        rgba: img.into_raw(),
    }
}

/// Convert to an egui image for uploading as a texture
pub fn to_color_image(img: &RgbaImage) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [img.width() as usize, img.height() as usize],
        img.as_raw(),
    )
}

/// Green disc on a transparent background
pub fn placeholder(size: u32) -> RgbaImage {
    let mut img = ImageBuffer::new(size, size);

    let center = size as f32 / 2.0;
    let radius = size as f32 * 0.4;

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        let distance = (dx * dx + dy * dy).sqrt();

        *pixel = if distance <= radius {
            Rgba([0x10, 0x7c, 0x10, 255]) // Xbox green
        } else {
            Rgba([0, 0, 0, 0])
        };
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_placeholder_shape() {
        let img = placeholder(LOGO_SIZE);
        assert_eq!(img.dimensions(), (LOGO_SIZE, LOGO_SIZE));
        assert_eq!(img.get_pixel(100, 100)[3], 255);
        assert_eq!(img.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let temp = TempDir::new().unwrap();
        let img = logo_or_placeholder(&temp.path().join("icon.png"));
        assert_eq!(img, placeholder(LOGO_SIZE));
    }

    #[test]
    fn test_png_is_scaled() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("icon.png");
        placeholder(32).save(&path).unwrap();

        let img = load_square(&path, LOGO_SIZE).unwrap();
        assert_eq!(img.dimensions(), (LOGO_SIZE, LOGO_SIZE));

        let icon = window_icon(&path);
        assert_eq!((icon.width, icon.height), (WINDOW_ICON_SIZE, WINDOW_ICON_SIZE));
        assert_eq!(icon.rgba.len(), (WINDOW_ICON_SIZE * WINDOW_ICON_SIZE * 4) as usize);
    }

    #[test]
    fn test_ico_window_icon() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("icon.ico");
        RgbaImage::from_pixel(48, 48, Rgba([200, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let icon = window_icon(&path);
        assert_eq!((icon.width, icon.height), (WINDOW_ICON_SIZE, WINDOW_ICON_SIZE));
        // The placeholder's corners are transparent; a loaded square is opaque
        assert_eq!(icon.rgba[3], 255);
        assert!(icon.rgba[0] > 150);
    }
}
