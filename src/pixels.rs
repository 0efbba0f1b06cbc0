//! Opaque-pixel extraction from decoded RGBA data.
//!
//! Decoding (file formats, network fetch) stays with the caller; this turns
//! an already-decoded, already-resized RGBA buffer into the
//! [`ImagePixelBuffer`] consumed by the image layout.

use crate::constants::ALPHA_THRESHOLD;
use crate::error::{MorphError, Result};
use crate::layout::ImagePixelBuffer;

/// Target size for a source image so that its longer edge is at most
/// `max_edge`, keeping the aspect ratio. Dimensions are floored and never
/// reach zero.
pub fn fit_within(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let (w, h) = (width as f64, height as f64);
    let (w, h) = if w > h {
        if w > max_edge as f64 {
            (max_edge as f64, h * max_edge as f64 / w)
        } else {
            (w, h)
        }
    } else if h > max_edge as f64 {
        (w * max_edge as f64 / h, max_edge as f64)
    } else {
        (w, h)
    };
    ((w.floor() as u32).max(1), (h.floor() as u32).max(1))
}

/// Collect pixels with alpha above `ALPHA_THRESHOLD` in row-major order.
pub fn extract_opaque_pixels(rgba: &[u8], width: u32, height: u32) -> Result<ImagePixelBuffer> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(MorphError::ImageDecode(format!(
            "expected {} RGBA bytes for {}x{}, got {}",
            expected,
            width,
            height,
            rgba.len()
        )));
    }

    let mut positions = Vec::new();
    let mut colors = Vec::new();
    for (i, px) in rgba.chunks_exact(4).enumerate() {
        if px[3] <= ALPHA_THRESHOLD {
            continue;
        }
        let x = (i % width as usize) as f32;
        let y = (i / width as usize) as f32;
        positions.push([x, y]);
        colors.push([
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
        ]);
    }
    log::debug!(
        "[image] {} of {} pixels opaque ({}x{})",
        positions.len(),
        width as usize * height as usize,
        width,
        height
    );
    ImagePixelBuffer::new(positions, colors, width, height)
        .map_err(|e| MorphError::ImageDecode(e.to_string()))
}
