// Gesture, layout and blend tuning constants.
//
// These constants express intended behavior (remap ranges, gains, ramp
// thresholds, smoothing coefficients) and keep magic numbers out of the code.

// Hand landmark indices (21-point hand model)
pub const LANDMARK_COUNT: usize = 21;
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const PINKY_MCP: usize = 17;

// Pinch ratio remap (pinch distance / hand scale)
pub const PINCH_RATIO_MIN: f32 = 0.2; // at or below: fully pinched
pub const PINCH_RATIO_MAX: f32 = 0.9; // at or above: fully open
pub const HAND_SCALE_EPSILON: f32 = 1e-6; // smaller hand scales are treated as degenerate

// Palm normal to pitch/yaw gain (not radian-exact)
pub const PALM_ROTATION_GAIN: f32 = 2.5;

// Sentinel factor for "no hand detected"
pub const NO_HAND_FACTOR: f32 = -1.0;

// Scatter volume (full extent per axis, centered on the origin)
pub const SCATTER_RANGE: f32 = 100.0;
pub const SCATTER_DEPTH: f32 = 100.0;

// Heart
pub const HEART_SCALE: f32 = 0.35;
pub const HEART_DEPTH: f32 = 4.0; // z extent before radius scaling

// Flower
pub const FLOWER_PETALS: f32 = 5.0;
pub const FLOWER_RADIUS_MIN: f32 = 2.0;
pub const FLOWER_RADIUS_SPAN: f32 = 2.0;
pub const FLOWER_SCALE: f32 = 1.5;
pub const FLOWER_DEPTH: f32 = 2.0;

// Planet
pub const PLANET_RADIUS: f32 = 6.0;
pub const PLANET_RING_EVERY: usize = 5; // every Nth particle joins the ring
pub const PLANET_RING_MIN: f32 = 8.0;
pub const PLANET_RING_SPAN: f32 = 3.0;
pub const PLANET_RING_THICKNESS: f32 = 0.2;

// Fireworks
pub const FIREWORKS_RADIUS: f32 = 8.0;

// Synthetic shape palette (red fixed, green/blue jittered)
pub const SHAPE_RED: f32 = 1.0;
pub const SHAPE_GREEN_MIN: f32 = 0.5;
pub const SHAPE_GREEN_SPAN: f32 = 0.5;
pub const SHAPE_BLUE_MIN: f32 = 0.8;
pub const SHAPE_BLUE_SPAN: f32 = 0.2;

// Image layout
pub const IMAGE_FIT_SIZE: f32 = 16.0; // world units spanned by the longer image edge
pub const PLACEHOLDER_DIMENSION: u32 = 100;
pub const ALPHA_THRESHOLD: u8 = 20; // pixels must be strictly more opaque than this
pub const DECODE_MAX_EDGE: u32 = 500;

// Blend smoothing
pub const PROGRESS_LERP_PER_FRAME: f32 = 0.05; // multiplied by the spread/return speed
pub const REFERENCE_FPS: f32 = 60.0; // frame rate the per-frame coefficients were tuned at
pub const ROTATION_LERP: f32 = 0.1;
pub const OPACITY_LERP: f32 = 0.1;
pub const SETTLE_EPSILON: f32 = 1e-3;

// Overlay opacity ramp
pub const OVERLAY_RAMP_START: f32 = 0.85;
pub const OVERLAY_VISIBLE_EPSILON: f32 = 0.01;

// Transition noise (decorative, applied while morphing)
pub const NOISE_AMPLITUDE: f32 = 5.0;
pub const NOISE_WEIGHT: f32 = 0.2;

// Scene defaults
pub const DEFAULT_PARTICLE_COUNT: usize = 15_000;
pub const IMAGE_PARTICLE_COUNT: usize = 20_000;
pub const MIN_PARTICLES: usize = 2_000;
pub const MAX_PARTICLES: usize = 50_000;
pub const DEFAULT_COLOR_HEX: &str = "#ff88cc";
pub const IMAGE_COLOR_HEX: &str = "#ffffff";
pub const DEFAULT_POINT_SIZE: f32 = 4.0;
pub const DEFAULT_SPREAD_SPEED: f32 = 1.0;
pub const DEFAULT_RETURN_SPEED: f32 = 1.5;
pub const AUTO_ROTATE_THRESHOLD: f32 = 0.8; // idle spin only when mostly assembled
