use crate::blend::BlendSpeeds;
use crate::constants::*;
use crate::error::{MorphError, Result};
use crate::layout::{LayoutMode, Shape};

/// User-facing particle settings.
///
/// - `count`: particles per layout, within `MIN_PARTICLES..=MAX_PARTICLES`
/// - `color`: base tint for shape modes (linear 0..1 RGB)
/// - `size`: point size handed to the renderer
/// - `speeds`: scatter/assemble progress speeds
/// - `mode`: current layout family
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
    pub count: usize,
    pub color: [f32; 3],
    pub size: f32,
    pub speeds: BlendSpeeds,
    pub mode: LayoutMode,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_PARTICLE_COUNT,
            color: parse_hex_color(DEFAULT_COLOR_HEX).unwrap_or([1.0, 1.0, 1.0]),
            size: DEFAULT_POINT_SIZE,
            speeds: BlendSpeeds::default(),
            mode: LayoutMode::Shape(Shape::Heart),
        }
    }
}

impl ParticleConfig {
    /// Image-mode preset applied when a photo is requested: white tint and a
    /// denser cloud. Size and speeds carry over.
    pub fn for_image(&self) -> Self {
        Self {
            count: IMAGE_PARTICLE_COUNT,
            color: parse_hex_color(IMAGE_COLOR_HEX).unwrap_or([1.0, 1.0, 1.0]),
            mode: LayoutMode::Image,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_count(self.count)?;
        validate_speed(self.speeds.spread)?;
        validate_speed(self.speeds.return_)?;
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(MorphError::InvalidSize(self.size));
        }
        Ok(())
    }
}

pub fn validate_count(count: usize) -> Result<()> {
    if !(MIN_PARTICLES..=MAX_PARTICLES).contains(&count) {
        return Err(MorphError::ParticleCountOutOfRange {
            count,
            min: MIN_PARTICLES,
            max: MAX_PARTICLES,
        });
    }
    Ok(())
}

pub fn validate_speed(speed: f32) -> Result<()> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(MorphError::InvalidSpeed(speed))
    }
}

/// Parse `#rrggbb` (leading `#` optional) into 0..1 RGB.
pub fn parse_hex_color(hex: &str) -> Result<[f32; 3]> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(MorphError::InvalidColor(hex.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| MorphError::InvalidColor(hex.to_string()))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}
