//! Particle layout generation.
//!
//! A layout is built once per configuration change (shape, count or image)
//! and never edited afterwards; callers swap in a fresh one through
//! [`LayoutSlot`].

pub mod image;
pub mod scatter;
pub mod shapes;

pub use image::{generate_image_layout, ImagePixelBuffer, ImageSource};
pub use scatter::scatter_position;
pub use shapes::{generate_shape_layout, Shape};

use crate::error::{MorphError, Result};
use glam::Vec3;
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Requested layout family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    Shape(Shape),
    Image,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 5] = [
        LayoutMode::Shape(Shape::Heart),
        LayoutMode::Shape(Shape::Flower),
        LayoutMode::Shape(Shape::Planet),
        LayoutMode::Shape(Shape::Fireworks),
        LayoutMode::Image,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LayoutMode::Shape(shape) => shape.name(),
            LayoutMode::Image => "image",
        }
    }

    pub fn is_image(self) -> bool {
        matches!(self, LayoutMode::Image)
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        LayoutMode::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown layout mode {:?}", s))
    }
}

/// Immutable description of the layout to build.
#[derive(Clone, Debug)]
pub struct LayoutRequest {
    pub mode: LayoutMode,
    pub count: usize,
    pub image: Option<Arc<ImagePixelBuffer>>,
}

impl LayoutRequest {
    /// Boundary check for caller-supplied counts; generators only ever see a
    /// valid `usize`.
    pub fn new(mode: LayoutMode, count: i64, image: Option<Arc<ImagePixelBuffer>>) -> Result<Self> {
        let count = usize::try_from(count).map_err(|_| MorphError::InvalidParticleCount(count))?;
        Ok(Self { mode, count, image })
    }

    pub fn shape(shape: Shape, count: usize) -> Self {
        Self {
            mode: LayoutMode::Shape(shape),
            count,
            image: None,
        }
    }

    pub fn image(count: usize, image: Option<Arc<ImagePixelBuffer>>) -> Self {
        Self {
            mode: LayoutMode::Image,
            count,
            image,
        }
    }
}

/// Flat, GPU-ready particle buffers: `3 * len()` floats each.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleLayout {
    pub scatter: Vec<f32>,
    pub targets: Vec<f32>,
    pub colors: Vec<f32>,
}

impl ParticleLayout {
    pub fn with_capacity(count: usize) -> Self {
        Self {
            scatter: Vec::with_capacity(count * 3),
            targets: Vec::with_capacity(count * 3),
            colors: Vec::with_capacity(count * 3),
        }
    }

    pub(crate) fn push(&mut self, scatter: Vec3, target: Vec3, color: [f32; 3]) {
        self.scatter.extend_from_slice(&scatter.to_array());
        self.targets.extend_from_slice(&target.to_array());
        self.colors.extend_from_slice(&color);
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.targets.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn scatter_at(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.scatter[i * 3..i * 3 + 3])
    }

    pub fn target(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.targets[i * 3..i * 3 + 3])
    }

    pub fn color(&self, i: usize) -> [f32; 3] {
        [self.colors[i * 3], self.colors[i * 3 + 1], self.colors[i * 3 + 2]]
    }

    pub fn scatter_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.scatter)
    }

    pub fn target_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.targets)
    }

    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }
}

/// Dispatch a request to the shape or image generator.
///
/// Image requests without pixel data get the flat placeholder, never a
/// procedural shape.
pub fn generate_layout<R: Rng + ?Sized>(request: &LayoutRequest, rng: &mut R) -> ParticleLayout {
    let layout = match request.mode {
        LayoutMode::Shape(shape) => generate_shape_layout(shape, request.count, rng),
        LayoutMode::Image => {
            let source = match request.image.as_deref() {
                Some(pixels) if !pixels.is_empty() => ImageSource::Pixels(pixels),
                _ => ImageSource::Placeholder,
            };
            if matches!(source, ImageSource::Placeholder) {
                log::debug!("[layout] image pixels not ready, using flat placeholder");
            }
            generate_image_layout(request.count, source, rng)
        }
    };
    log::info!("[layout] generated mode={} count={}", request.mode, layout.len());
    layout
}

/// Holder for the installed layout. Readers take a snapshot `Arc`; writers
/// replace the whole layout, so a reader never sees a half-built one.
#[derive(Clone, Debug, Default)]
pub struct LayoutSlot {
    current: Arc<ParticleLayout>,
}

impl LayoutSlot {
    pub fn new(layout: ParticleLayout) -> Self {
        Self {
            current: Arc::new(layout),
        }
    }

    pub fn install(&mut self, layout: ParticleLayout) {
        self.current = Arc::new(layout);
    }

    pub fn current(&self) -> Arc<ParticleLayout> {
        Arc::clone(&self.current)
    }
}
