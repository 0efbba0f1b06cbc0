//! Procedural target shapes.

use super::scatter::scatter_position;
use super::ParticleLayout;
use crate::constants::*;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Procedural layouts. Each target is drawn independently per particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Heart,
    Flower,
    Planet,
    Fireworks,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Heart, Shape::Flower, Shape::Planet, Shape::Fireworks];

    pub fn name(self) -> &'static str {
        match self {
            Shape::Heart => "heart",
            Shape::Flower => "flower",
            Shape::Planet => "planet",
            Shape::Fireworks => "fireworks",
        }
    }
}

/// True for particles that sit on the planet's ring instead of its sphere.
#[inline]
pub fn is_ring_particle(index: usize) -> bool {
    index % PLANET_RING_EVERY == 0
}

/// Assembled position of particle `index` for `shape`.
pub fn shape_target<R: Rng + ?Sized>(shape: Shape, index: usize, rng: &mut R) -> Vec3 {
    match shape {
        Shape::Heart => heart(rng),
        Shape::Flower => flower(rng),
        Shape::Planet if is_ring_particle(index) => planet_ring(rng),
        Shape::Planet => sphere_direction(rng) * PLANET_RADIUS,
        Shape::Fireworks => {
            // cube-root radius keeps the fill uniform by volume
            let radius = rng.gen::<f32>().cbrt() * FIREWORKS_RADIUS;
            sphere_direction(rng) * radius
        }
    }
}

fn heart<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let t = rng.gen::<f32>() * TAU;
    // sqrt gives an area-uniform fill of the outline
    let r = rng.gen::<f32>().sqrt();
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    let z = (rng.gen::<f32>() - 0.5) * HEART_DEPTH * r;
    Vec3::new(x * HEART_SCALE * r, y * HEART_SCALE * r, z)
}

fn flower<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let petal = (FLOWER_PETALS * theta).cos();
    let radius = FLOWER_RADIUS_MIN + rng.gen::<f32>() * FLOWER_RADIUS_SPAN;
    let z = (rng.gen::<f32>() - 0.5) * FLOWER_DEPTH;
    Vec3::new(
        petal * theta.cos() * radius * FLOWER_SCALE,
        petal * theta.sin() * radius * FLOWER_SCALE,
        z,
    )
}

fn planet_ring<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let angle = rng.gen::<f32>() * TAU;
    let dist = PLANET_RING_MIN + rng.gen::<f32>() * PLANET_RING_SPAN;
    let z = (rng.gen::<f32>() - 0.5) * PLANET_RING_THICKNESS;
    Vec3::new(angle.cos() * dist, angle.sin() * dist, z)
}

/// Uniformly distributed unit vector (theta around z, phi = acos(u)).
fn sphere_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (rng.gen::<f32>() * 2.0 - 1.0).acos();
    Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
}

/// Synthetic warm-pink per-particle color. The user's base color is applied
/// later as a tint, see [`crate::scene::tint_color`].
#[inline]
pub fn shape_color<R: Rng + ?Sized>(rng: &mut R) -> [f32; 3] {
    [
        SHAPE_RED,
        SHAPE_GREEN_MIN + rng.gen::<f32>() * SHAPE_GREEN_SPAN,
        SHAPE_BLUE_MIN + rng.gen::<f32>() * SHAPE_BLUE_SPAN,
    ]
}

pub fn generate_shape_layout<R: Rng + ?Sized>(
    shape: Shape,
    count: usize,
    rng: &mut R,
) -> ParticleLayout {
    let mut layout = ParticleLayout::with_capacity(count);
    for i in 0..count {
        let target = shape_target(shape, i, rng);
        let scatter = scatter_position(rng);
        let color = shape_color(rng);
        layout.push(scatter, target, color);
    }
    layout
}
