//! Small 2D maths used by the simulation on top of `glam::Vec2`: bearings,
//! remapping, and the few curve/segment tests the bosses need.

use std::f32::consts::TAU;

pub use glam::Vec2;

/// Screen-space bearing from `from` towards `to`, in radians.
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    (to - from).to_angle()
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear remap of `v` from `[a, b]` onto `[c, d]`; a degenerate source range
/// maps to the midpoint of the target.
pub fn remap(v: f32, a: f32, b: f32, c: f32, d: f32) -> f32 {
    if (b - a).abs() < f32::EPSILON {
        return (c + d) * 0.5;
    }
    c + (v - a) * (d - c) / (b - a)
}

/// Distance from `point` to the segment `a..b` is below `radius`.
pub fn line_circle_intersect(a: Vec2, b: Vec2, point: Vec2, radius: f32) -> bool {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return a.distance(point) < radius;
    }
    let ap = point - a;
    let t = (ap.dot(ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    closest.distance(point) < radius
}

pub fn point_in_rect(point: Vec2, center: Vec2, half_w: f32, half_h: f32) -> bool {
    (point.x - center.x).abs() < half_w && (point.y - center.y).abs() < half_h
}

pub fn point_in_ellipse(point: Vec2, center: Vec2, rx: f32, ry: f32) -> bool {
    let dx = (point.x - center.x) / rx;
    let dy = (point.y - center.y) / ry;
    dx * dx + dy * dy <= 1.0
}

/// Classic parametric heart, unscaled (roughly 32 wide), y pointing down.
pub fn heart_point(t: f32) -> Vec2 {
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    Vec2::new(x, -y)
}

/// Vertices of a regular polygon centred on the origin.
pub fn polygon_points(sides: usize, radius: f32, rotation: f32) -> Vec<Vec2> {
    (0..sides)
        .map(|i| Vec2::from_angle(rotation + TAU * i as f32 / sides as f32) * radius)
        .collect()
}

/// Alternating outer/inner vertices of a star centred on the origin.
pub fn star_points(tips: usize, outer: f32, inner: f32, rotation: f32) -> Vec<Vec2> {
    let step = TAU / (tips * 2) as f32;
    (0..tips * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            Vec2::from_angle(rotation + step * i as f32) * r
        })
        .collect()
}
