//! # particle-morph
//!
//! Core of a particle visualizer that morphs a point cloud between a
//! scattered state and an assembled one: a procedural shape (heart, flower,
//! planet, fireworks) or the silhouette of a photo.
//!
//! - [`gesture`]: hand landmarks to a pinch factor and palm rotation
//! - [`layout`]: scatter, shape and image target generation
//! - [`pixels`]: opaque-pixel extraction from decoded RGBA
//! - [`blend`]: per-tick progress, overlay opacity and rotation smoothing
//! - [`scene`]: owned state wiring the above together for a front-end
//!
//! Rendering, camera capture, inference and image decoding are the
//! caller's business.

pub mod blend;
pub mod config;
pub mod constants;
pub mod error;
pub mod gesture;
pub mod layout;
pub mod pixels;
pub mod scene;

pub use blend::{BlendController, BlendFrame, BlendSpeeds};
pub use config::ParticleConfig;
pub use error::{MorphError, Result};
pub use gesture::{GestureInterpreter, GestureSignal, GestureTracker, HandDetector, HandLandmarks};
pub use layout::{
    generate_layout, ImagePixelBuffer, ImageSource, LayoutMode, LayoutRequest, LayoutSlot,
    ParticleLayout, Shape,
};
pub use scene::{ImageTicket, Scene};
