//! Flat layouts sampled from the opaque pixels of a photo.

use super::scatter::scatter_position;
use super::ParticleLayout;
use crate::constants::{IMAGE_FIT_SIZE, PLACEHOLDER_DIMENSION};
use crate::error::{MorphError, Result};
use glam::Vec3;
use rand::Rng;

/// Opaque pixels of a decoded image, in row-major scan order.
///
/// Fields:
/// - `positions`: pixel coordinates in source-image space (y grows downward)
/// - `colors`: parallel RGB values in 0..1
/// - `width` / `height`: dimensions of the (possibly downscaled) source
#[derive(Clone, Debug, PartialEq)]
pub struct ImagePixelBuffer {
    positions: Vec<[f32; 2]>,
    colors: Vec<[f32; 3]>,
    width: u32,
    height: u32,
}

impl ImagePixelBuffer {
    pub fn new(
        positions: Vec<[f32; 2]>,
        colors: Vec<[f32; 3]>,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        if positions.len() != colors.len() {
            return Err(MorphError::InvalidPixelBuffer(format!(
                "{} positions but {} colors",
                positions.len(),
                colors.len()
            )));
        }
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidPixelBuffer(format!(
                "zero dimension {}x{}",
                width, height
            )));
        }
        Ok(Self {
            positions,
            colors,
            width,
            height,
        })
    }

    pub fn positions(&self) -> &[[f32; 2]] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of opaque pixels.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// What the image generator samples from.
///
/// `Placeholder` stands in while pixel data is still decoding: every
/// particle samples a white pixel at the image-space origin of a
/// `PLACEHOLDER_DIMENSION` square, so the layout is already flat and neutral.
#[derive(Clone, Copy, Debug)]
pub enum ImageSource<'a> {
    Pixels(&'a ImagePixelBuffer),
    Placeholder,
}

/// Strided, wrapping source index for output particle `i`.
///
/// Downsamples when there are more pixels than particles and cycles through
/// the pixels again when there are fewer.
#[inline]
pub fn sample_index(i: usize, step: f64, total: usize) -> usize {
    debug_assert!(total > 0);
    ((i as f64 * step).floor() as usize) % total
}

/// Sampling stride for `total` source pixels spread over `count` particles.
#[inline]
pub fn sample_step(total: usize, count: usize) -> f64 {
    if count == 0 {
        return 1.0;
    }
    (total as f64 / count as f64).max(1.0)
}

/// World units per source pixel so the longer edge spans `IMAGE_FIT_SIZE`.
#[inline]
pub fn image_scale(width: u32, height: u32) -> f32 {
    IMAGE_FIT_SIZE / width.max(height).max(1) as f32
}

/// Centered, y-up target for source pixel `(px, py)`. Always at z = 0.
#[inline]
pub fn image_target(px: f32, py: f32, width: u32, height: u32) -> Vec3 {
    let scale = image_scale(width, height);
    Vec3::new(
        (px - width as f32 / 2.0) * scale,
        -(py - height as f32 / 2.0) * scale,
        0.0,
    )
}

pub fn generate_image_layout<R: Rng + ?Sized>(
    count: usize,
    source: ImageSource<'_>,
    rng: &mut R,
) -> ParticleLayout {
    match source {
        ImageSource::Pixels(pixels) if !pixels.is_empty() => {
            sample_pixels(count, pixels, rng)
        }
        _ => placeholder(count, rng),
    }
}

fn sample_pixels<R: Rng + ?Sized>(
    count: usize,
    pixels: &ImagePixelBuffer,
    rng: &mut R,
) -> ParticleLayout {
    let total = pixels.len();
    let step = sample_step(total, count);
    let mut layout = ParticleLayout::with_capacity(count);
    for i in 0..count {
        let idx = sample_index(i, step, total);
        let [px, py] = pixels.positions[idx];
        let target = image_target(px, py, pixels.width, pixels.height);
        layout.push(scatter_position(rng), target, pixels.colors[idx]);
    }
    layout
}

fn placeholder<R: Rng + ?Sized>(count: usize, rng: &mut R) -> ParticleLayout {
    let target = image_target(0.0, 0.0, PLACEHOLDER_DIMENSION, PLACEHOLDER_DIMENSION);
    let mut layout = ParticleLayout::with_capacity(count);
    for _ in 0..count {
        layout.push(scatter_position(rng), target, [1.0, 1.0, 1.0]);
    }
    layout
}
