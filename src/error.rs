use thiserror::Error;

/// Errors raised at the library boundary.
///
/// Generators themselves are infallible; everything here is rejected before
/// a layout is built, or reported while the previous layout stays installed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MorphError {
    #[error("particle count must be non-negative, got {0}")]
    InvalidParticleCount(i64),

    #[error("particle count {count} outside supported range {min}..={max}")]
    ParticleCountOutOfRange {
        count: usize,
        min: usize,
        max: usize,
    },

    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("invalid speed {0}, expected a positive finite value")]
    InvalidSpeed(f32),

    #[error("invalid point size {0}, expected a positive finite value")]
    InvalidSize(f32),

    #[error("invalid pixel buffer: {0}")]
    InvalidPixelBuffer(String),

    #[error("image decode failed: {0}")]
    ImageDecode(String),

    #[error("expected {expected} hand landmarks, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("hand detector failed: {0}")]
    Detector(String),
}

pub type Result<T> = std::result::Result<T, MorphError>;
