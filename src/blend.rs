//! Progress, overlay opacity and rotation smoothing per render tick.
//!
//! All three signals use the same exponential lerp: every tick closes a
//! fixed fraction of the remaining gap, so values approach their targets
//! geometrically and never overshoot. "Arrived" means within
//! [`SETTLE_EPSILON`].

use crate::constants::*;
use glam::Vec3;
use std::f32::consts::PI;
use std::time::Duration;

/// Per-direction progress speeds. `return_` applies while assembling
/// (progress rising), `spread` while scattering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendSpeeds {
    pub spread: f32,
    pub return_: f32,
}

impl Default for BlendSpeeds {
    fn default() -> Self {
        Self {
            spread: DEFAULT_SPREAD_SPEED,
            return_: DEFAULT_RETURN_SPEED,
        }
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Convert a per-frame lerp coefficient tuned at `REFERENCE_FPS` into one for
/// a tick of length `dt`. Clamped to `[0, 1]` so long frames cannot overshoot.
#[inline]
pub fn frame_coefficient(per_frame: f32, dt: Duration) -> f32 {
    (per_frame * dt.as_secs_f32() * REFERENCE_FPS).clamp(0.0, 1.0)
}

/// Progress smoothing coefficient for a given speed.
#[inline]
pub fn smoothing_coefficient(rate: f32, dt: Duration) -> f32 {
    frame_coefficient(rate * PROGRESS_LERP_PER_FRAME, dt)
}

/// Overlay opacity target: 0 up to `OVERLAY_RAMP_START`, then a linear ramp
/// reaching 1 at full assembly.
#[inline]
pub fn overlay_opacity_target(progress: f32) -> f32 {
    if progress <= OVERLAY_RAMP_START {
        return 0.0;
    }
    ((progress - OVERLAY_RAMP_START) / (1.0 - OVERLAY_RAMP_START)).clamp(0.0, 1.0)
}

/// Values handed to the renderer each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendFrame {
    pub progress: f32,
    pub opacity: f32,
    pub overlay_visible: bool,
    pub rotation: Vec3,
}

/// Sole owner and writer of the live progress value.
#[derive(Clone, Debug)]
pub struct BlendController {
    progress: f32,
    target_progress: f32,
    opacity: f32,
    rotation: Vec3,
    pub speeds: BlendSpeeds,
}

impl Default for BlendController {
    fn default() -> Self {
        Self::new(BlendSpeeds::default())
    }
}

impl BlendController {
    pub fn new(speeds: BlendSpeeds) -> Self {
        Self {
            progress: 1.0,
            target_progress: 1.0,
            opacity: 0.0,
            rotation: Vec3::ZERO,
            speeds,
        }
    }

    /// Start from an arbitrary progress, target included.
    pub fn with_progress(mut self, progress: f32) -> Self {
        let p = if progress.is_finite() { progress.clamp(0.0, 1.0) } else { 1.0 };
        self.progress = p;
        self.target_progress = p;
        self
    }

    /// Back to the assembled state; called whenever a new layout is installed.
    /// Opacity and rotation keep easing from where they are.
    pub fn reset(&mut self) {
        self.progress = 1.0;
        self.target_progress = 1.0;
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn target_progress(&self) -> f32 {
        self.target_progress
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn overlay_visible(&self) -> bool {
        self.opacity > OVERLAY_VISIBLE_EPSILON
    }

    /// Non-finite targets are ignored.
    pub fn set_target(&mut self, target: f32) {
        if target.is_finite() {
            self.target_progress = target.clamp(0.0, 1.0);
        }
    }

    pub fn is_settled(&self) -> bool {
        (self.target_progress - self.progress).abs() < SETTLE_EPSILON
    }

    pub fn tick(&mut self, dt: Duration, rotation_target: Vec3) -> BlendFrame {
        let rate = if self.target_progress > self.progress {
            self.speeds.return_
        } else {
            self.speeds.spread
        };
        self.progress = lerp(
            self.progress,
            self.target_progress,
            smoothing_coefficient(rate, dt),
        );

        let opacity_target = overlay_opacity_target(self.progress);
        self.opacity = lerp(
            self.opacity,
            opacity_target,
            frame_coefficient(OPACITY_LERP, dt),
        );

        if rotation_target.is_finite() {
            self.rotation = self
                .rotation
                .lerp(rotation_target, frame_coefficient(ROTATION_LERP, dt));
        }

        BlendFrame {
            progress: self.progress,
            opacity: self.opacity,
            overlay_visible: self.overlay_visible(),
            rotation: self.rotation,
        }
    }
}

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// CPU reference for the particle vertex stage: eased interpolation from
/// scatter to target plus a decorative wobble that vanishes at both ends.
pub fn particle_position(scatter: Vec3, target: Vec3, progress: f32, time: f32) -> Vec3 {
    let t = smoothstep(0.0, 1.0, progress);
    let pos = scatter.lerp(target, t);
    let intensity = (t * PI).sin() * NOISE_AMPLITUDE;
    let noise = Vec3::new(
        (time * 2.0 + scatter.y).sin(),
        (time * 1.5 + scatter.x).cos(),
        (time * 2.2 + scatter.z).sin(),
    ) * intensity;
    pos + noise * (1.0 - t) * NOISE_WEIGHT
}
