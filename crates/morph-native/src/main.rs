use std::time::Duration;

use glam::Vec3;
use instant::Instant;
use particle_morph::constants::{
    DECODE_MAX_EDGE, INDEX_MCP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_MCP, PINKY_MCP, THUMB_TIP,
};
use particle_morph::gesture::{GestureTracker, HandDetector, HandLandmarks};
use particle_morph::pixels::{extract_opaque_pixels, fit_within};
use particle_morph::{ImagePixelBuffer, ParticleConfig, Scene, Shape};

const FRAME_DT: Duration = Duration::from_micros(16_667); // 60 Hz render tick
const DETECT_EVERY: u64 = 2; // detection runs at half the render rate
const LOG_EVERY: u64 = 30;
const CAMERA_OFF_FRAME: u64 = 360; // render frame where gesture control is switched off
const SEED: u64 = 42;

/// Scripted stand-in for the camera + landmark model.
///
/// Phases (by detection frame): open hand, closing pinch with a wrist tilt,
/// a stretch without world landmarks, then no hand at all.
struct SyntheticDetector;

impl HandDetector for SyntheticDetector {
    type Frame = u64;

    fn detect(&mut self, frame: &u64) -> particle_morph::Result<Option<HandLandmarks>> {
        let f = *frame;
        match f {
            0..=59 => synthetic_hand(0.95, 0.0, true).map(Some),
            60..=119 => {
                let t = (f - 60) as f32 / 60.0;
                synthetic_hand(0.9 - 0.8 * t, 0.4 * t, true).map(Some)
            }
            120..=149 => synthetic_hand(0.1, 0.0, false).map(Some),
            _ => Ok(None),
        }
    }
}

/// Build a 21-point hand whose pinch/hand-scale ratio is `pinch_ratio`,
/// tilted on screen by `tilt` radians.
fn synthetic_hand(
    pinch_ratio: f32,
    tilt: f32,
    with_world: bool,
) -> particle_morph::Result<HandLandmarks> {
    let wrist = Vec3::new(0.5, 0.8, 0.0);
    let up = Vec3::new(tilt.sin(), -tilt.cos(), 0.0);
    let scale = 0.2;

    let mut screen = [wrist; LANDMARK_COUNT];
    screen[MIDDLE_MCP] = wrist + up * scale;
    screen[INDEX_MCP] = wrist + up * scale + Vec3::new(-0.04, 0.0, 0.0);
    screen[PINKY_MCP] = wrist + up * scale * 0.8 + Vec3::new(0.06, 0.0, 0.0);
    let pinch_center = wrist + up * scale * 1.6;
    let half = Vec3::new(pinch_ratio * scale / 2.0, 0.0, 0.0);
    screen[THUMB_TIP] = pinch_center - half;
    screen[INDEX_TIP] = pinch_center + half;

    let world = with_world.then(|| {
        let mut world = [Vec3::ZERO; LANDMARK_COUNT];
        world[INDEX_MCP] = Vec3::new(0.03, -0.08, 0.01 + tilt * 0.02);
        world[PINKY_MCP] = Vec3::new(-0.03, -0.07, 0.0);
        world
    });
    HandLandmarks::new(&screen, world.as_ref().map(|w| &w[..]))
}

/// Radial-gradient disc with transparent corners, as a decoded RGBA image.
fn synthetic_photo(width: u32, height: u32, hue_shift: u8) -> Vec<u8> {
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let radius = cx.min(cy);
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let d = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt() / radius;
            let alpha = if d <= 1.0 { 255 } else { 0 };
            let shade = ((1.0 - d.min(1.0)) * 255.0) as u8;
            rgba.extend_from_slice(&[shade, shade.wrapping_add(hue_shift), 255 - shade, alpha]);
        }
    }
    rgba
}

fn decode(width: u32, height: u32, hue_shift: u8) -> particle_morph::Result<ImagePixelBuffer> {
    let (w, h) = fit_within(width, height, DECODE_MAX_EDGE);
    extract_opaque_pixels(&synthetic_photo(w, h, hue_shift), w, h)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let started = Instant::now();
    let mut scene = Scene::new(ParticleConfig::default(), SEED)?;
    log::info!(
        "[native] initial layout: {} particles in {:.1} ms",
        scene.layout().len(),
        started.elapsed().as_secs_f64() * 1000.0
    );

    let mut tracker: GestureTracker<SyntheticDetector> = GestureTracker::new();
    tracker.enable(SyntheticDetector);
    scene.set_camera_active(true);

    let mut detect_frame = 0u64;
    for frame in 0..720u64 {
        if tracker.is_enabled() && frame % DETECT_EVERY == 0 {
            let signal = tracker.process(&detect_frame);
            scene.apply_gesture(signal);
            detect_frame += 1;
        }

        match frame {
            CAMERA_OFF_FRAME => {
                if let Some(_detector) = tracker.disable() {
                    scene.set_camera_active(false);
                }
                scene.set_manual_progress(0.0);
            }
            420 => {
                // Two photos requested back to back; the first finishes last.
                let first = scene.request_image();
                let second = scene.request_image();
                let installed = scene.complete_image(second, decode(640, 480, 40));
                let stale = scene.complete_image(first, decode(300, 300, 0));
                log::info!(
                    "[native] image second installed={} first installed={}",
                    installed,
                    stale
                );
                scene.set_manual_progress(1.0);
            }
            600 => {
                scene.set_shape(Shape::Planet);
                scene.set_color("#88ccff")?;
            }
            _ => {}
        }

        let out = scene.tick(FRAME_DT);
        if frame % LOG_EVERY == 0 {
            let g = scene.gesture();
            log::info!(
                "[native] frame={} mode={} factor={:.2} target={:.2} progress={:.3} opacity={:.2} overlay={} rot=({:.2},{:.2},{:.2}) auto_rotate={}",
                frame,
                scene.config().mode,
                g.factor,
                scene.target_progress(),
                out.progress,
                out.opacity,
                out.overlay_visible,
                out.rotation.x,
                out.rotation.y,
                out.rotation.z,
                scene.auto_rotate()
            );
        }
    }

    if let Some(size) = scene.overlay_size() {
        log::info!("[native] overlay plane {:.2}x{:.2}", size.x, size.y);
    }
    let layout = scene.layout();
    log::info!(
        "[native] final layout {} particles, {} bytes of targets, first color {:?}",
        layout.len(),
        layout.target_bytes().len(),
        scene.particle_color(0).unwrap_or_default()
    );
    Ok(())
}
