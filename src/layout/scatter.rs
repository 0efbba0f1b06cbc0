use crate::constants::{SCATTER_DEPTH, SCATTER_RANGE};
use glam::Vec3;
use rand::Rng;

/// Chaotic start position shared by every layout mode.
///
/// Each component is drawn independently, so the scattered cloud fills a
/// box of `SCATTER_RANGE x SCATTER_RANGE x SCATTER_DEPTH` centered on the
/// origin regardless of the assembled shape.
#[inline]
pub fn scatter_position<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * SCATTER_RANGE,
        (rng.gen::<f32>() - 0.5) * SCATTER_RANGE,
        (rng.gen::<f32>() - 0.5) * SCATTER_DEPTH,
    )
}
