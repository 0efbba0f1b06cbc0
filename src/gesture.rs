//! Hand-gesture interpretation.
//!
//! Converts one frame of 21-point hand landmarks into a [`GestureSignal`]:
//! a hand-size-normalized pinch factor in `[0, 1]` plus a small-angle
//! rotation estimate derived from the palm orientation. Landmark detection
//! itself happens behind the [`HandDetector`] seam so the math here can be
//! driven by synthetic fixtures.

use crate::constants::*;
use crate::error::{MorphError, Result};
use glam::{Vec2, Vec3};

/// One detected hand.
///
/// - `screen`: landmarks in normalized image coordinates (x, y in 0..1, y down)
/// - `world`: optional metric landmarks centered near the hand, used for
///   palm orientation
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    pub screen: [Vec3; LANDMARK_COUNT],
    pub world: Option<[Vec3; LANDMARK_COUNT]>,
}

impl HandLandmarks {
    pub fn new(screen: &[Vec3], world: Option<&[Vec3]>) -> Result<Self> {
        let screen = to_landmark_array(screen)?;
        let world = world.map(to_landmark_array).transpose()?;
        Ok(Self { screen, world })
    }
}

fn to_landmark_array(points: &[Vec3]) -> Result<[Vec3; LANDMARK_COUNT]> {
    points
        .try_into()
        .map_err(|_| MorphError::LandmarkCount {
            expected: LANDMARK_COUNT,
            actual: points.len(),
        })
}

/// Output of the interpreter for one processed camera frame.
///
/// `factor` is in `[0, 1]` (0 = pinched, 1 = open hand) or exactly
/// [`NO_HAND_FACTOR`] when no usable hand was seen. Consumers must treat a
/// negative factor as "no override", not as "fully pinched".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSignal {
    pub factor: f32,
    pub rotation: Vec3,
}

impl GestureSignal {
    pub const NO_HAND: Self = Self {
        factor: NO_HAND_FACTOR,
        rotation: Vec3::ZERO,
    };

    #[inline]
    pub fn is_active(&self) -> bool {
        self.factor >= 0.0
    }
}

impl Default for GestureSignal {
    fn default() -> Self {
        Self::NO_HAND
    }
}

#[inline]
fn planar(p: Vec3) -> Vec2 {
    Vec2::new(p.x, p.y)
}

/// Wrist to middle-finger MCP distance in the image plane.
#[inline]
pub fn hand_scale(screen: &[Vec3; LANDMARK_COUNT]) -> f32 {
    planar(screen[MIDDLE_MCP]).distance(planar(screen[WRIST]))
}

/// Thumb tip to index tip distance in the image plane.
#[inline]
pub fn pinch_distance(screen: &[Vec3; LANDMARK_COUNT]) -> f32 {
    planar(screen[THUMB_TIP]).distance(planar(screen[INDEX_TIP]))
}

/// Linearly map `value` from `[in_min, in_max]` onto `[0, 1]`, clamping
/// instead of extrapolating.
#[inline]
pub fn remap_clamped(value: f32, in_min: f32, in_max: f32) -> f32 {
    ((value - in_min) / (in_max - in_min)).clamp(0.0, 1.0)
}

/// Hand-size-normalized pinch amount, or `None` when the hand scale is too
/// small to divide by.
pub fn pinch_factor(screen: &[Vec3; LANDMARK_COUNT]) -> Option<f32> {
    let scale = hand_scale(screen);
    if !scale.is_finite() || scale <= HAND_SCALE_EPSILON {
        return None;
    }
    let ratio = pinch_distance(screen) / scale;
    if !ratio.is_finite() {
        return None;
    }
    Some(remap_clamped(ratio, PINCH_RATIO_MIN, PINCH_RATIO_MAX))
}

/// Unit normal of the palm plane spanned by wrist→index MCP and
/// wrist→pinky MCP. `None` when those vectors are (nearly) parallel.
pub fn palm_normal(world: &[Vec3; LANDMARK_COUNT]) -> Option<Vec3> {
    let wrist = world[WRIST];
    let v1 = world[INDEX_MCP] - wrist;
    let v2 = world[PINKY_MCP] - wrist;
    v1.cross(v2).try_normalize()
}

/// Pitch and yaw from a unit palm normal.
#[inline]
pub fn pitch_yaw_from_normal(normal: Vec3) -> (f32, f32) {
    (
        normal.y * PALM_ROTATION_GAIN,
        -normal.x * PALM_ROTATION_GAIN,
    )
}

/// Roll from the wrist→middle MCP direction on screen, relative to vertical.
/// Screen y grows downward, hence the inversions.
#[inline]
pub fn roll_from_screen(screen: &[Vec3; LANDMARK_COUNT]) -> f32 {
    let d = planar(screen[MIDDLE_MCP]) - planar(screen[WRIST]);
    -d.x.atan2(-d.y)
}

/// Per-frame transform from landmarks to [`GestureSignal`].
///
/// The only state carried between frames is the last valid rotation, which
/// is reused when a frame arrives without world landmarks.
#[derive(Clone, Debug, Default)]
pub struct GestureInterpreter {
    last_rotation: Vec3,
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_rotation(&self) -> Vec3 {
        self.last_rotation
    }

    pub fn interpret(&mut self, detection: Option<&HandLandmarks>) -> GestureSignal {
        let Some(hand) = detection else {
            return GestureSignal::NO_HAND;
        };
        let Some(factor) = pinch_factor(&hand.screen) else {
            log::debug!("[gesture] degenerate hand scale, treating as no hand");
            return GestureSignal::NO_HAND;
        };

        if let Some(normal) = hand.world.as_ref().and_then(palm_normal) {
            let (pitch, yaw) = pitch_yaw_from_normal(normal);
            let roll = roll_from_screen(&hand.screen);
            let rotation = Vec3::new(pitch, yaw, roll);
            if rotation.is_finite() {
                self.last_rotation = rotation;
            }
        }

        GestureSignal {
            factor,
            rotation: self.last_rotation,
        }
    }
}

/// Narrow seam over the external landmark detector (camera + ML inference).
pub trait HandDetector {
    type Frame;

    fn detect(&mut self, frame: &Self::Frame) -> Result<Option<HandLandmarks>>;
}

/// Gesture feature toggle: owns the detector while enabled and runs the
/// interpreter on each detection tick.
///
/// Disabled reads exactly like "no hand detected".
pub struct GestureTracker<D: HandDetector> {
    detector: Option<D>,
    interpreter: GestureInterpreter,
}

impl<D: HandDetector> Default for GestureTracker<D> {
    fn default() -> Self {
        Self {
            detector: None,
            interpreter: GestureInterpreter::new(),
        }
    }
}

impl<D: HandDetector> GestureTracker<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable(&mut self, detector: D) {
        log::info!("[gesture] detection enabled");
        self.detector = Some(detector);
    }

    /// Drops the detector, releasing whatever camera/inference resources it
    /// holds. Returns it back when one was installed.
    pub fn disable(&mut self) -> Option<D> {
        let detector = self.detector.take();
        if detector.is_some() {
            log::info!("[gesture] detection disabled");
        }
        self.interpreter = GestureInterpreter::new();
        detector
    }

    pub fn is_enabled(&self) -> bool {
        self.detector.is_some()
    }

    pub fn process(&mut self, frame: &D::Frame) -> GestureSignal {
        let Some(detector) = self.detector.as_mut() else {
            return GestureSignal::NO_HAND;
        };
        match detector.detect(frame) {
            Ok(detection) => self.interpreter.interpret(detection.as_ref()),
            Err(e) => {
                log::warn!("[gesture] detector error: {}", e);
                GestureSignal::NO_HAND
            }
        }
    }
}
