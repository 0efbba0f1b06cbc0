// Host-side tests for landmark-to-gesture interpretation.

use glam::Vec3;
use particle_morph::constants::*;
use particle_morph::gesture::*;
use particle_morph::MorphError;
use rand::prelude::*;
use std::cell::Cell;
use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

/// Upright hand with a hand scale of exactly 1 and thumb/index tips
/// `pinch` apart.
fn screen_hand(pinch: f32) -> [Vec3; LANDMARK_COUNT] {
    let mut screen = [Vec3::ZERO; LANDMARK_COUNT];
    screen[WRIST] = Vec3::new(0.0, 0.0, 0.0);
    screen[MIDDLE_MCP] = Vec3::new(0.0, -1.0, 0.0);
    screen[THUMB_TIP] = Vec3::new(0.0, -1.5, 0.0);
    screen[INDEX_TIP] = Vec3::new(pinch, -1.5, 0.0);
    screen
}

fn world_palm(index_mcp: Vec3, pinky_mcp: Vec3) -> [Vec3; LANDMARK_COUNT] {
    let mut world = [Vec3::ZERO; LANDMARK_COUNT];
    world[INDEX_MCP] = index_mcp;
    world[PINKY_MCP] = pinky_mcp;
    world
}

fn hand(pinch: f32, world: Option<[Vec3; LANDMARK_COUNT]>) -> HandLandmarks {
    HandLandmarks {
        screen: screen_hand(pinch),
        world,
    }
}

#[test]
fn remap_hits_both_boundaries_exactly() {
    assert_eq!(remap_clamped(PINCH_RATIO_MIN, PINCH_RATIO_MIN, PINCH_RATIO_MAX), 0.0);
    assert_eq!(remap_clamped(PINCH_RATIO_MAX, PINCH_RATIO_MIN, PINCH_RATIO_MAX), 1.0);
}

#[test]
fn remap_clamps_instead_of_extrapolating() {
    assert_eq!(remap_clamped(0.05, PINCH_RATIO_MIN, PINCH_RATIO_MAX), 0.0);
    assert_eq!(remap_clamped(1.7, PINCH_RATIO_MIN, PINCH_RATIO_MAX), 1.0);
    let mid = remap_clamped(0.55, PINCH_RATIO_MIN, PINCH_RATIO_MAX);
    assert!((mid - 0.5).abs() < 1e-6, "midpoint mapped to {mid}");
}

#[test]
fn pinch_factor_is_normalized_by_hand_scale() {
    let screen = screen_hand(0.55);
    assert!((hand_scale(&screen) - 1.0).abs() < 1e-6);
    assert!((pinch_distance(&screen) - 0.55).abs() < 1e-6);

    // Same proportions at half the size (hand further from camera)
    let small: Vec<Vec3> = screen.iter().map(|p| *p * 0.5).collect();
    let small = HandLandmarks::new(&small, None).unwrap();
    let a = pinch_factor(&screen).unwrap();
    let b = pinch_factor(&small.screen).unwrap();
    assert!((a - b).abs() < 1e-5, "factor changed with hand size: {a} vs {b}");
    assert!((a - 0.5).abs() < 1e-5);
}

#[test]
fn pinch_factor_near_boundaries() {
    let closed = pinch_factor(&screen_hand(0.2)).unwrap();
    let open = pinch_factor(&screen_hand(0.9)).unwrap();
    assert!(closed.abs() < 1e-5, "closed factor {closed}");
    assert!((open - 1.0).abs() < 1e-5, "open factor {open}");
    assert_eq!(pinch_factor(&screen_hand(0.0)).unwrap(), 0.0);
    assert_eq!(pinch_factor(&screen_hand(3.0)).unwrap(), 1.0);
}

#[test]
fn pinch_ignores_depth() {
    let mut screen = screen_hand(0.55);
    screen[INDEX_TIP].z = 10.0;
    let f = pinch_factor(&screen).unwrap();
    assert!((f - 0.5).abs() < 1e-5);
}

#[test]
fn degenerate_hand_scale_yields_no_hand() {
    let coincident = HandLandmarks {
        screen: [Vec3::new(0.3, 0.3, 0.0); LANDMARK_COUNT],
        world: None,
    };
    assert_eq!(pinch_factor(&coincident.screen), None);

    let mut interp = GestureInterpreter::new();
    let signal = interp.interpret(Some(&coincident));
    assert_eq!(signal, GestureSignal::NO_HAND);
    assert!(!signal.factor.is_nan());
}

#[test]
fn no_detection_emits_sentinel() {
    let mut interp = GestureInterpreter::new();
    let signal = interp.interpret(None);
    assert_eq!(signal.factor, NO_HAND_FACTOR);
    assert_eq!(signal.rotation, Vec3::ZERO);
    assert!(!signal.is_active());
}

#[test]
fn palm_normal_drives_pitch_and_yaw() {
    // Palm facing +y: pure pitch
    let world = world_palm(Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0));
    let n = palm_normal(&world).unwrap();
    assert!((n - Vec3::Y).length() < 1e-6);
    let (pitch, yaw) = pitch_yaw_from_normal(n);
    assert!((pitch - PALM_ROTATION_GAIN).abs() < 1e-6);
    assert!(yaw.abs() < 1e-6);

    // Palm facing +x: pure (negative) yaw
    let world = world_palm(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
    let (pitch, yaw) = pitch_yaw_from_normal(palm_normal(&world).unwrap());
    assert!(pitch.abs() < 1e-6);
    assert!((yaw + PALM_ROTATION_GAIN).abs() < 1e-6);

    // Palm facing the camera: no pitch or yaw
    let world = world_palm(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
    let (pitch, yaw) = pitch_yaw_from_normal(palm_normal(&world).unwrap());
    assert!(pitch.abs() < 1e-6 && yaw.abs() < 1e-6);
}

#[test]
fn palm_normal_is_unit_length_regardless_of_hand_size() {
    let world = world_palm(Vec3::new(0.03, -0.08, 0.01), Vec3::new(-0.03, -0.07, 0.0));
    let n = palm_normal(&world).unwrap();
    assert!((n.length() - 1.0).abs() < 1e-5);
}

#[test]
fn collinear_palm_has_no_normal() {
    let world = world_palm(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
    assert!(palm_normal(&world).is_none());
}

#[test]
fn roll_is_measured_from_screen_vertical() {
    let upright = screen_hand(0.5);
    assert!(roll_from_screen(&upright).abs() < 1e-6);

    let mut tilted = screen_hand(0.5);
    tilted[MIDDLE_MCP] = Vec3::new(1.0, 0.0, 0.0);
    assert!((roll_from_screen(&tilted) + FRAC_PI_2).abs() < 1e-6);

    tilted[MIDDLE_MCP] = Vec3::new(-1.0, 0.0, 0.0);
    assert!((roll_from_screen(&tilted) - FRAC_PI_2).abs() < 1e-6);
}

#[test]
fn rotation_holds_last_value_without_world_landmarks() {
    let mut interp = GestureInterpreter::new();
    let world = world_palm(Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0));

    let first = interp.interpret(Some(&hand(0.55, Some(world))));
    assert!((first.rotation.x - PALM_ROTATION_GAIN).abs() < 1e-6);

    let second = interp.interpret(Some(&hand(0.9, None)));
    assert_eq!(second.rotation, first.rotation);
    assert!((second.factor - 1.0).abs() < 1e-5, "factor still computed");
}

#[test]
fn rotation_starts_at_zero_without_world_landmarks() {
    let mut interp = GestureInterpreter::new();
    let signal = interp.interpret(Some(&hand(0.55, None)));
    assert_eq!(signal.rotation, Vec3::ZERO);
    assert!(signal.is_active());
}

#[test]
fn factor_stays_in_range_for_random_hands() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut interp = GestureInterpreter::new();
    for _ in 0..2000 {
        let mut screen = [Vec3::ZERO; LANDMARK_COUNT];
        let mut world = [Vec3::ZERO; LANDMARK_COUNT];
        for i in 0..LANDMARK_COUNT {
            screen[i] = Vec3::new(rng.gen(), rng.gen(), rng.gen::<f32>() - 0.5);
            world[i] = Vec3::new(rng.gen(), rng.gen(), rng.gen()) * 0.1 - 0.05;
        }
        let world = rng.gen_bool(0.5).then_some(world);
        let signal = interp.interpret(Some(&HandLandmarks { screen, world }));
        assert!(
            signal.factor == NO_HAND_FACTOR || (0.0..=1.0).contains(&signal.factor),
            "factor out of range: {}",
            signal.factor
        );
        assert!(signal.rotation.is_finite());
    }
}

#[test]
fn landmark_count_is_checked() {
    let err = HandLandmarks::new(&[Vec3::ZERO; 20], None).unwrap_err();
    assert_eq!(
        err,
        MorphError::LandmarkCount {
            expected: 21,
            actual: 20
        }
    );
    let err = HandLandmarks::new(&[Vec3::ZERO; 21], Some(&[Vec3::ZERO; 3][..])).unwrap_err();
    assert!(matches!(err, MorphError::LandmarkCount { actual: 3, .. }));
}

struct FixtureDetector {
    calls: Rc<Cell<usize>>,
    result: Option<HandLandmarks>,
    fail: bool,
}

impl HandDetector for FixtureDetector {
    type Frame = ();

    fn detect(&mut self, _frame: &()) -> particle_morph::Result<Option<HandLandmarks>> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(MorphError::Detector("model not loaded".into()));
        }
        Ok(self.result.clone())
    }
}

#[test]
fn disabled_tracker_reads_as_no_hand() {
    let mut tracker: GestureTracker<FixtureDetector> = GestureTracker::new();
    assert!(!tracker.is_enabled());
    assert_eq!(tracker.process(&()), GestureSignal::NO_HAND);
}

#[test]
fn tracker_runs_detector_until_disabled() {
    let calls = Rc::new(Cell::new(0));
    let mut tracker = GestureTracker::new();
    tracker.enable(FixtureDetector {
        calls: calls.clone(),
        result: Some(hand(0.55, None)),
        fail: false,
    });

    let signal = tracker.process(&());
    assert!((signal.factor - 0.5).abs() < 1e-5);
    assert_eq!(calls.get(), 1);

    assert!(tracker.disable().is_some());
    assert_eq!(tracker.process(&()), GestureSignal::NO_HAND);
    assert_eq!(calls.get(), 1, "no detection after teardown");
    assert!(tracker.disable().is_none());
}

#[test]
fn detector_errors_become_no_hand() {
    let mut tracker = GestureTracker::new();
    tracker.enable(FixtureDetector {
        calls: Rc::new(Cell::new(0)),
        result: None,
        fail: true,
    });
    assert_eq!(tracker.process(&()), GestureSignal::NO_HAND);
}
