use std::path::Path;

use image::{ImageFormat, RgbImage, RgbaImage};
use tracing::debug;

use crate::error::{AgriError, Result};

/// Decode an image file into 8-bit RGB. Alpha is dropped.
pub fn load_raster(path: &Path) -> Result<RgbImage> {
    let img = image::open(path)?;
    debug!(path = %path.display(), width = img.width(), height = img.height(), "Raster loaded");
    Ok(img.to_rgb8())
}

/// Decode an in-memory encoded image (PNG, JPEG, ...).
pub fn decode_raster(bytes: &[u8]) -> Result<RgbImage> {
    Ok(image::load_from_memory(bytes)?.to_rgb8())
}

/// Load a raster from a `file://` or `http(s)://` URL, or a bare path.
///
/// Remote URLs need the `remote` feature; without it they fail with
/// [`AgriError::AssetLoad`].
pub fn load_raster_url(url: &str) -> Result<RgbImage> {
    let url = url.trim();
    if let Some(path) = url.strip_prefix("file://") {
        return load_raster(Path::new(path));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return fetch_remote(url);
    }
    load_raster(Path::new(url))
}

#[cfg(feature = "remote")]
fn fetch_remote(url: &str) -> Result<RgbImage> {
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| AgriError::AssetLoad(format!("{url}: {e}")))?;
    let bytes = response
        .bytes()
        .map_err(|e| AgriError::AssetLoad(format!("{url}: {e}")))?;
    decode_raster(&bytes)
}

#[cfg(not(feature = "remote"))]
fn fetch_remote(url: &str) -> Result<RgbImage> {
    Err(AgriError::AssetLoad(format!(
        "{url}: remote loading is not enabled in this build"
    )))
}

/// Save an RGBA surface (heatmap, overlay) as PNG.
pub fn save_rgba_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
