//! Owned runtime state tying layouts, gestures and blending together.
//!
//! A [`Scene`] is what a front-end keeps between frames: the installed
//! layout, the blend controller, the latest gesture signal and any image
//! request in flight. Nothing here is global; the render loop calls
//! [`Scene::tick`] and the detection loop calls [`Scene::apply_gesture`].

use crate::blend::{BlendController, BlendFrame, BlendSpeeds};
use crate::config::{parse_hex_color, validate_count, validate_speed, ParticleConfig};
use crate::constants::AUTO_ROTATE_THRESHOLD;
use crate::error::Result;
use crate::gesture::GestureSignal;
use crate::layout::image::image_scale;
use crate::layout::{
    generate_layout, ImagePixelBuffer, LayoutMode, LayoutRequest, LayoutSlot, ParticleLayout,
    Shape,
};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;

/// Progress target: the gesture overrides the manual slider only while the
/// camera is on and a hand is visible. An open hand (factor 1) scatters.
#[inline]
pub fn target_progress(manual: f32, camera_active: bool, signal: &GestureSignal) -> f32 {
    if camera_active && signal.is_active() {
        1.0 - signal.factor
    } else {
        manual
    }
}

#[inline]
pub fn active_rotation(camera_active: bool, signal: &GestureSignal) -> Vec3 {
    if camera_active && signal.is_active() {
        signal.rotation
    } else {
        Vec3::ZERO
    }
}

/// Idle spin is only wanted without gesture control and when mostly assembled.
#[inline]
pub fn should_auto_rotate(camera_active: bool, target: f32) -> bool {
    !camera_active && target > AUTO_ROTATE_THRESHOLD
}

/// Fragment-stage color choice: photos keep their pixel colors, shapes use
/// the base tint.
#[inline]
pub fn tint_color(base: [f32; 3], particle: [f32; 3], is_image: bool) -> [f32; 3] {
    if is_image {
        particle
    } else {
        base
    }
}

/// Handle for one image request. Only the most recent ticket is honored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageTicket(u64);

impl ImageTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

pub struct Scene {
    config: ParticleConfig,
    slot: LayoutSlot,
    blend: BlendController,
    pixels: Option<Arc<ImagePixelBuffer>>,
    next_ticket: u64,
    pending_image: Option<ImageTicket>,
    manual_progress: f32,
    camera_active: bool,
    gesture: GestureSignal,
    rng: StdRng,
}

impl Scene {
    pub fn new(config: ParticleConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut scene = Self {
            blend: BlendController::new(config.speeds),
            config,
            slot: LayoutSlot::default(),
            pixels: None,
            next_ticket: 0,
            pending_image: None,
            manual_progress: 1.0,
            camera_active: false,
            gesture: GestureSignal::NO_HAND,
            rng: StdRng::seed_from_u64(seed),
        };
        scene.rebuild_layout();
        Ok(scene)
    }

    fn rebuild_layout(&mut self) {
        let request = match self.config.mode {
            LayoutMode::Shape(shape) => LayoutRequest::shape(shape, self.config.count),
            LayoutMode::Image => LayoutRequest::image(self.config.count, self.pixels.clone()),
        };
        let layout = generate_layout(&request, &mut self.rng);
        self.slot.install(layout);
        self.blend.reset();
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn layout(&self) -> Arc<ParticleLayout> {
        self.slot.current()
    }

    pub fn blend(&self) -> &BlendController {
        &self.blend
    }

    pub fn is_image_mode(&self) -> bool {
        self.config.mode.is_image()
    }

    pub fn has_image_pixels(&self) -> bool {
        self.pixels.is_some()
    }

    pub fn pending_image(&self) -> Option<ImageTicket> {
        self.pending_image
    }

    /// Switch to a procedural shape. Any photo data or in-flight image
    /// request is dropped.
    pub fn set_shape(&mut self, shape: Shape) {
        self.config.mode = LayoutMode::Shape(shape);
        self.pixels = None;
        self.pending_image = None;
        self.rebuild_layout();
    }

    pub fn set_count(&mut self, count: usize) -> Result<()> {
        validate_count(count)?;
        if count != self.config.count {
            self.config.count = count;
            self.rebuild_layout();
        }
        Ok(())
    }

    pub fn set_speeds(&mut self, spread: f32, return_: f32) -> Result<()> {
        validate_speed(spread)?;
        validate_speed(return_)?;
        let speeds = BlendSpeeds { spread, return_ };
        self.config.speeds = speeds;
        self.blend.speeds = speeds;
        Ok(())
    }

    pub fn set_color(&mut self, hex: &str) -> Result<()> {
        self.config.color = parse_hex_color(hex)?;
        Ok(())
    }

    pub fn set_manual_progress(&mut self, progress: f32) {
        if progress.is_finite() {
            self.manual_progress = progress.clamp(0.0, 1.0);
        }
    }

    /// Turning the camera off reads as "no hand" from then on.
    pub fn set_camera_active(&mut self, active: bool) {
        self.camera_active = active;
        if !active {
            self.gesture = GestureSignal::NO_HAND;
        }
    }

    pub fn camera_active(&self) -> bool {
        self.camera_active
    }

    pub fn apply_gesture(&mut self, signal: GestureSignal) {
        if self.camera_active {
            self.gesture = signal;
        }
    }

    pub fn gesture(&self) -> GestureSignal {
        self.gesture
    }

    pub fn target_progress(&self) -> f32 {
        target_progress(self.manual_progress, self.camera_active, &self.gesture)
    }

    pub fn active_rotation(&self) -> Vec3 {
        active_rotation(self.camera_active, &self.gesture)
    }

    pub fn auto_rotate(&self) -> bool {
        should_auto_rotate(self.camera_active, self.target_progress())
    }

    /// Start loading a photo: switch to the image preset and install the flat
    /// placeholder immediately, so nothing procedural flashes while decoding.
    pub fn request_image(&mut self) -> ImageTicket {
        self.next_ticket += 1;
        let ticket = ImageTicket(self.next_ticket);
        self.pending_image = Some(ticket);
        self.config = self.config.for_image();
        self.pixels = None;
        self.rebuild_layout();
        log::info!("[image] request #{} issued", ticket.0);
        ticket
    }

    /// Deliver a decode result. Returns `true` when it was installed.
    ///
    /// Results for anything but the latest request are discarded, and a
    /// failed decode leaves the current layout untouched.
    pub fn complete_image(
        &mut self,
        ticket: ImageTicket,
        result: Result<ImagePixelBuffer>,
    ) -> bool {
        if self.pending_image != Some(ticket) {
            log::info!("[image] discarding stale result for request #{}", ticket.0);
            return false;
        }
        self.pending_image = None;
        match result {
            Ok(pixels) => {
                log::info!(
                    "[image] request #{} ready: {} opaque pixels ({}x{})",
                    ticket.0,
                    pixels.len(),
                    pixels.width(),
                    pixels.height()
                );
                self.pixels = Some(Arc::new(pixels));
                self.rebuild_layout();
                true
            }
            Err(e) => {
                log::warn!("[image] request #{} failed: {}", ticket.0, e);
                false
            }
        }
    }

    /// World-space size of the flat photo overlay, matching the particle
    /// image scale. `None` outside image mode or before pixels arrive.
    pub fn overlay_size(&self) -> Option<Vec2> {
        if !self.is_image_mode() {
            return None;
        }
        let pixels = self.pixels.as_ref()?;
        let scale = image_scale(pixels.width(), pixels.height());
        Some(Vec2::new(
            pixels.width() as f32 * scale,
            pixels.height() as f32 * scale,
        ))
    }

    /// Per-particle draw color after tinting, `None` past the end of the
    /// installed layout.
    pub fn particle_color(&self, index: usize) -> Option<[f32; 3]> {
        let layout = self.slot.current();
        let start = index.checked_mul(3)?;
        let rgb = layout.colors.get(start..start.checked_add(3)?)?;
        Some(tint_color(
            self.config.color,
            [rgb[0], rgb[1], rgb[2]],
            self.is_image_mode(),
        ))
    }

    /// One render tick.
    pub fn tick(&mut self, dt: Duration) -> BlendFrame {
        self.blend.set_target(self.target_progress());
        let mut frame = self.blend.tick(dt, self.active_rotation());
        if !self.is_image_mode() || self.pixels.is_none() {
            frame.overlay_visible = false;
        }
        frame
    }
}
