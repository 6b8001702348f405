//! Attack pattern library.
//!
//! Every function here is pure with respect to the world: it receives an
//! origin (plus a target, frame counter or playfield size as needed) and
//! reports bullets through `spawn`. Patterns that roll dice take the RNG
//! explicitly. None of them mutate anything but the RNG.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use rand::Rng;

use crate::constants::{bullet as bullet_k, colors};
use crate::entities::{BulletSpawn, Rgba, Shape};
use crate::geometry::{bearing, heart_point, remap, star_points, Vec2};

/// Golden angle in radians.
pub const GOLDEN_ANGLE: f32 = 2.399_963;

fn fire(spawn: &mut impl FnMut(BulletSpawn), pos: Vec2, angle: f32, speed: f32, color: Rgba) {
    spawn(BulletSpawn::angled(pos, angle, speed, color));
}

// ── General purpose ───────────────────────────────────────────────────────────

pub fn aimed(origin: Vec2, target: Vec2, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    fire(spawn, origin, bearing(origin, target), speed, colors::BULLET_RED);
}

/// Single arm; successive frames trace an Archimedean spiral.
pub fn spiral(origin: Vec2, frame: u64, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    fire(spawn, origin, frame as f32 * 0.1, speed, colors::BULLET_PURPLE);
}

pub fn flower(origin: Vec2, frame: u64, arms: usize, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    for i in 0..arms {
        let angle = frame as f32 * 0.05 + TAU / arms as f32 * i as f32;
        fire(spawn, origin, angle, speed, colors::BULLET_PURPLE);
    }
}

/// `count` bullets spaced exactly `2π / count` apart, starting at `offset`.
pub fn ring(origin: Vec2, count: usize, offset: f32, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    for i in 0..count {
        let angle = offset + TAU / count as f32 * i as f32;
        fire(spawn, origin, angle, speed, colors::BULLET_ORANGE);
    }
}

pub fn sine_stream(origin: Vec2, frame: u64, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    let angle = FRAC_PI_2 + (frame as f32 * 0.1).sin() * 0.5;
    fire(spawn, origin, angle, speed, colors::BULLET_BLUE);
}

/// `count` bullets fanned symmetrically over `arc` around the aim angle.
pub fn spread(
    origin: Vec2,
    target: Vec2,
    count: usize,
    arc: f32,
    speed: f32,
    spawn: &mut impl FnMut(BulletSpawn),
) {
    let base = bearing(origin, target);
    for i in 0..count {
        let offset = remap(i as f32, 0.0, count as f32 - 1.0, -arc / 2.0, arc / 2.0);
        fire(spawn, origin, base + offset, speed, colors::BULLET_GOLD);
    }
}

pub fn cross(origin: Vec2, frame: u64, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    let offset = frame as f32 * 0.03;
    for i in 0..4 {
        fire(spawn, origin, offset + FRAC_PI_2 * i as f32, speed, colors::BULLET_GREEN);
    }
}

pub fn rain<R: Rng + ?Sized>(width: f32, speed: f32, rng: &mut R, spawn: &mut impl FnMut(BulletSpawn)) {
    let x = rng.gen_range(10.0..(width - 10.0).max(11.0));
    spawn(BulletSpawn::new(Vec2::new(x, 0.0), Vec2::new(0.0, 1.0), speed, colors::BULLET_BLUE));
}

/// Random heading, launched from 50 px out.
pub fn chaos<R: Rng + ?Sized>(origin: Vec2, speed: f32, rng: &mut R, spawn: &mut impl FnMut(BulletSpawn)) {
    let angle = rng.gen_range(0.0..TAU);
    let pos = origin + Vec2::from_angle(angle) * 50.0;
    fire(spawn, pos, angle, speed, colors::WHITE);
}

/// From a random playfield edge toward `target`.
pub fn converge<R: Rng + ?Sized>(
    target: Vec2,
    width: f32,
    height: f32,
    speed: f32,
    rng: &mut R,
    spawn: &mut impl FnMut(BulletSpawn),
) {
    let pos = match rng.gen_range(0..4) {
        0 => Vec2::new(rng.gen_range(0.0..width), 0.0),
        1 => Vec2::new(width, rng.gen_range(0.0..height)),
        2 => Vec2::new(rng.gen_range(0.0..width), height),
        _ => Vec2::new(0.0, rng.gen_range(0.0..height)),
    };
    fire(spawn, pos, bearing(pos, target), speed * 0.7, colors::BULLET_RED);
}

// ── Square ────────────────────────────────────────────────────────────────────

pub fn square_spiral(origin: Vec2, frame: u64, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    let rotation = frame as f32 * 0.05;
    for i in 0..4 {
        let angle = rotation + FRAC_PI_2 * i as f32;
        let corner = origin + Vec2::from_angle(angle) * 40.0;
        fire(spawn, corner, angle, speed, colors::BULLET_GOLD);
    }
}

pub fn rapid_stream<R: Rng + ?Sized>(
    origin: Vec2,
    target: Vec2,
    speed: f32,
    rng: &mut R,
    spawn: &mut impl FnMut(BulletSpawn),
) {
    let angle = bearing(origin, target) + rng.gen_range(-0.1..0.1);
    fire(spawn, origin, angle, speed * 1.5, colors::BULLET_ORANGE);
}

/// Curtain from the top edge every 40 px with roughly one hole in five.
pub fn wall_down<R: Rng + ?Sized>(width: f32, speed: f32, rng: &mut R, spawn: &mut impl FnMut(BulletSpawn)) {
    let mut x = 20.0;
    while x < width {
        if rng.gen::<f32>() > 0.2 {
            spawn(BulletSpawn::new(Vec2::new(x, 0.0), Vec2::new(0.0, 1.0), speed * 0.6, colors::BULLET_GREEN));
        }
        x += 40.0;
    }
}

// ── Heart ─────────────────────────────────────────────────────────────────────

const HEART_POINTS: usize = 45;

fn heart_layer(origin: Vec2, rotation: f32, speed: f32, color: Rgba, spawn: &mut impl FnMut(BulletSpawn)) {
    for i in 0..HEART_POINTS {
        let t = TAU * i as f32 / HEART_POINTS as f32;
        let dir = Vec2::from_angle(rotation).rotate(heart_point(t)).normalize_or_zero();
        spawn(BulletSpawn::new(origin, dir, speed, color));
    }
}

/// Heart outline; on even frames a slower inner layer follows.
pub fn heart_spread(origin: Vec2, frame: u64, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    let rotation = frame as f32 * 0.03;
    heart_layer(origin, rotation, speed, colors::BULLET_PINK, spawn);
    if frame % 2 == 0 {
        heart_layer(origin, rotation + 0.5, speed * 0.6, colors::BOSS_HEART, spawn);
    }
}

pub fn panty_shot(origin: Vec2, target: Vec2, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    let base = bearing(origin, target);
    for i in 0..5 {
        let offset = remap(i as f32, 0.0, 4.0, -0.6, 0.6);
        spawn(BulletSpawn::angled(origin, base + offset, speed, colors::BULLET_PINK).shape(Shape::Triangle));
    }
}

pub fn magazine_stream(origin: Vec2, frame: u64, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    let angle = frame as f32 * 0.1;
    for a in [angle, angle + PI] {
        spawn(BulletSpawn::angled(origin, a, speed, colors::WHITE).shape(Shape::Rect));
    }
}

/// Four rectangular rounds on a slowly turning cross.
pub fn magazine_cross(origin: Vec2, frame: u64, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    let angle = frame as f32 * 0.07;
    for i in 0..4 {
        let a = angle + FRAC_PI_2 * i as f32;
        spawn(BulletSpawn::angled(origin, a, speed, colors::WHITE).shape(Shape::Rect));
    }
}

// ── Oval ──────────────────────────────────────────────────────────────────────

pub fn bounce_spread(
    origin: Vec2,
    target: Vec2,
    count: usize,
    speed: f32,
    bounces: u8,
    spawn: &mut impl FnMut(BulletSpawn),
) {
    let base = bearing(origin, target);
    for i in 0..count {
        let offset = remap(i as f32, 0.0, count as f32 - 1.0, -1.0, 1.0);
        spawn(BulletSpawn::angled(origin, base + offset, speed, colors::BULLET_PURPLE).bounces(bounces));
    }
}

pub fn bouncing_ring(origin: Vec2, count: usize, speed: f32, bounces: u8, spawn: &mut impl FnMut(BulletSpawn)) {
    ring(origin, count, 0.0, speed, &mut |s: BulletSpawn| {
        spawn(s.bounces(bounces).color(colors::BOSS_OVAL))
    });
}

// ── Hexagon ───────────────────────────────────────────────────────────────────

pub fn hexagon_spin(origin: Vec2, angle: f32, size: f32, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    for i in 0..6 {
        let a = angle + TAU / 6.0 * i as f32;
        fire(spawn, origin + Vec2::from_angle(a) * size, a, speed, colors::BOSS_HEXAGON);
    }
}

/// A heavy meteor from `from` toward `to`.
pub fn meteor(from: Vec2, to: Vec2, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    spawn(BulletSpawn::new(from, (to - from).normalize_or_zero(), speed, colors::METEOR).shape(Shape::Meteor));
}

// ── Hourglass ─────────────────────────────────────────────────────────────────

/// Two opposed fans, one falling and one rising, like sand through the neck.
pub fn hourglass_splash(origin: Vec2, frame: u64, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    let sway = (frame as f32 * 0.02).sin() * 0.3;
    for (base, mult) in [(FRAC_PI_2, 1.0), (-FRAC_PI_2, 0.7)] {
        for i in 0..6 {
            let offset = remap(i as f32, 0.0, 5.0, -0.5, 0.5);
            fire(spawn, origin, base + offset + sway, speed * mult, colors::SAND);
        }
    }
}

/// A diagonal sheet of sand sweeping down from the top edge.
pub fn sandstorm<R: Rng + ?Sized>(width: f32, speed: f32, rng: &mut R, spawn: &mut impl FnMut(BulletSpawn)) {
    let from_left = rng.gen_bool(0.5);
    let dir = if from_left { Vec2::new(0.6, 1.0) } else { Vec2::new(-0.6, 1.0) }.normalize_or_zero();
    for i in 0..10 {
        let x = width * i as f32 / 10.0 + rng.gen_range(0.0..20.0);
        let y = -(i as f32) * 8.0;
        spawn(BulletSpawn::new(Vec2::new(x, y), dir, speed * 0.8, colors::SAND));
    }
}

/// A column erupting from the bottom edge at a random x.
pub fn sand_geyser<R: Rng + ?Sized>(
    width: f32,
    height: f32,
    speed: f32,
    rng: &mut R,
    spawn: &mut impl FnMut(BulletSpawn),
) {
    let x = rng.gen_range(50.0..(width - 50.0).max(51.0));
    for i in 0..8 {
        let angle = -FRAC_PI_2 + rng.gen_range(-0.25..0.25);
        let s = speed * (1.0 + i as f32 * 0.15);
        fire(spawn, Vec2::new(x, height), angle, s, colors::SAND);
    }
}

/// Walls closing in from both sides, each with one gap.
pub fn timeline_collapse<R: Rng + ?Sized>(
    width: f32,
    height: f32,
    speed: f32,
    rng: &mut R,
    spawn: &mut impl FnMut(BulletSpawn),
) {
    let gap = rng.gen_range(100.0..(height - 100.0).max(101.0));
    let mut y = 20.0;
    while y < height {
        if (y - gap).abs() > 45.0 {
            spawn(BulletSpawn::new(Vec2::new(0.0, y), Vec2::new(1.0, 0.0), speed * 0.7, colors::SAND));
            spawn(BulletSpawn::new(Vec2::new(width, y + 20.0), Vec2::new(-1.0, 0.0), speed * 0.7, colors::SAND));
        }
        y += 40.0;
    }
}

// ── Math ──────────────────────────────────────────────────────────────────────

/// `count` aimed shots in a tight fan with staggered speeds.
pub fn math_plus(origin: Vec2, target: Vec2, count: usize, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    let base = bearing(origin, target);
    for i in 0..count {
        let offset = remap(i as f32, 0.0, count as f32 - 1.0, -0.35, 0.35);
        let s = speed * (0.8 + (i % 5) as f32 * 0.1);
        fire(spawn, origin, base + offset, s, colors::BOSS_MATH);
    }
}

/// Shots from both side edges at height `y`. Healing walls are a column of
/// seven `Heal` bullets on each side.
pub fn math_side(width: f32, y: f32, speed: f32, heal: bool, spawn: &mut impl FnMut(BulletSpawn)) {
    if heal {
        for i in -3..=3 {
            let row = y + i as f32 * 20.0;
            for (x, dx) in [(0.0, 1.0), (width, -1.0)] {
                spawn(
                    BulletSpawn::new(Vec2::new(x, row), Vec2::new(dx, 0.0), speed * 0.6, colors::MATH_HEAL)
                        .shape(Shape::Heal),
                );
            }
        }
    } else {
        for (x, dx) in [(0.0, 1.0), (width, -1.0)] {
            spawn(BulletSpawn::new(Vec2::new(x, y), Vec2::new(dx, 0.0), speed, colors::BOSS_MATH));
        }
    }
}

/// Ring of fractal seeds; each splits into four after 30–60 ticks.
pub fn math_div<R: Rng + ?Sized>(
    origin: Vec2,
    count: usize,
    generations: u8,
    speed: f32,
    rng: &mut R,
    spawn: &mut impl FnMut(BulletSpawn),
) {
    for i in 0..count {
        let angle = TAU / count as f32 * i as f32;
        let delay = rng.gen_range(bullet_k::SPLIT_DELAY_MIN..=bullet_k::SPLIT_DELAY_MAX);
        spawn(BulletSpawn::angled(origin, angle, speed, colors::BOSS_MATH).splitting(generations, delay));
    }
}

/// Falling binary digits at random columns.
pub fn matrix_rain<R: Rng + ?Sized>(width: f32, count: usize, speed: f32, rng: &mut R, spawn: &mut impl FnMut(BulletSpawn)) {
    for _ in 0..count {
        let pos = Vec2::new(rng.gen_range(0.0..width), -rng.gen_range(0.0..200.0));
        let s = speed * rng.gen_range(0.6..1.2);
        spawn(BulletSpawn::new(pos, Vec2::new(0.0, 1.0), s, colors::BOSS_MATH).shape(Shape::Binary));
    }
}

/// Slow spiral of bullets that compound their speed every tick.
pub fn math_power_spiral(origin: Vec2, count: usize, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    for i in 0..count {
        let angle = i as f32 * 0.35;
        let s = speed * (0.2 + (i % 10) as f32 * 0.02);
        spawn(BulletSpawn::angled(origin, angle, s, colors::BOSS_MATH).accelerating());
    }
}

/// Columns dropping at the asymptotes of tan: quarter points of the width.
pub fn math_tangent(width: f32, count: usize, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    let columns = [width * 0.25, width * 0.5, width * 0.75];
    for i in 0..count {
        let x = columns[i % columns.len()];
        let y = -((i / columns.len()) as f32) * 30.0;
        spawn(BulletSpawn::new(Vec2::new(x, y), Vec2::new(0.0, 1.0), speed, colors::BOSS_MATH));
    }
}

/// Falling stripes wherever `x mod m` is small.
pub fn math_modulo(width: f32, modulus: u32, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    let m = modulus.max(10);
    let mut x = 0u32;
    while (x as f32) < width {
        if x % m < 10 {
            spawn(BulletSpawn::new(Vec2::new(x as f32, 0.0), Vec2::new(0.0, 1.0), speed, colors::BOSS_MATH));
        }
        x += 10;
    }
}

/// Radial burst of `count` bullets alternating between two speeds.
pub fn math_factorial(origin: Vec2, count: usize, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    for i in 0..count {
        let angle = TAU / count as f32 * i as f32;
        let s = if i % 2 == 0 { speed } else { speed * 0.6 };
        fire(spawn, origin, angle, s, colors::BOSS_MATH);
    }
}

/// One bullet per call, stepping by the golden angle.
pub fn golden_spiral(origin: Vec2, frame: u64, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    fire(spawn, origin, frame as f32 * GOLDEN_ANGLE, speed, colors::BULLET_GOLD);
}

/// Riemann sum sweep: bars dropped left to right, bar height following a sine.
pub fn math_riemann(width: f32, frame: u64, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    if frame % 4 != 0 {
        return;
    }
    let step = frame / 4;
    let x = (step as f32 * 20.0) % width;
    let bar = 1 + ((step as f32 * 0.3).sin().abs() * 4.0) as usize;
    for i in 0..bar {
        let pos = Vec2::new(x, -(i as f32) * 14.0);
        spawn(BulletSpawn::new(pos, Vec2::new(0.0, 1.0), speed, colors::BOSS_MATH).shape(Shape::Rect));
    }
}

// ── Star ──────────────────────────────────────────────────────────────────────

pub fn star_radial(origin: Vec2, frame: u64, count: usize, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    let offset = frame as f32 * 0.05;
    ring(origin, count, offset, speed, &mut |s: BulletSpawn| {
        spawn(s.shape(Shape::Star).color(colors::BOSS_STAR))
    });
}

pub fn star_spiral(origin: Vec2, t: f32, arms: usize, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    for i in 0..arms {
        let angle = t * 0.02 + TAU / arms as f32 * i as f32;
        fire(spawn, origin, angle, speed, colors::BULLET_GOLD);
    }
}

/// Downward fan whose centre swings with the frame.
pub fn star_wave(origin: Vec2, frame: u64, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    let centre = FRAC_PI_2 + (frame as f32 * 0.05).sin() * 0.8;
    for i in 0..5 {
        let offset = remap(i as f32, 0.0, 4.0, -0.4, 0.4);
        fire(spawn, origin, centre + offset, speed, colors::BOSS_STAR);
    }
}

/// Two five-arm rosettes turning in opposite directions.
pub fn star_mandala(origin: Vec2, frame: u64, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    let t = frame as f32 * 0.04;
    for i in 0..5 {
        let base = TAU / 5.0 * i as f32;
        fire(spawn, origin, base + t, speed, colors::BULLET_PINK);
        fire(spawn, origin, base - t, speed * 0.75, colors::BULLET_BLUE);
    }
}

/// A burst whose speeds trace a five-point star outline.
pub fn star_shape(origin: Vec2, frame: u64, speed: f32, spawn: &mut impl FnMut(BulletSpawn)) {
    let rotation = frame as f32 * 0.01 - FRAC_PI_2;
    let outline = star_points(5, 1.0, 0.45, rotation);
    for (i, corner) in outline.iter().enumerate() {
        let next = outline[(i + 1) % outline.len()];
        for step in 0..6 {
            let p = corner.lerp(next, step as f32 / 6.0);
            spawn(BulletSpawn::new(origin, p.normalize_or_zero(), speed * p.length(), colors::BOSS_STAR).shape(Shape::Star));
        }
    }
}
