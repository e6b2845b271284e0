//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in playfield pixels.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Filled triangle
pub fn triangle(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

/// Filled axis-aligned rectangle from its top-left corner
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: [f32; 4]) {
    let max = min + size;
    triangle(out, min, Vec2::new(max.x, min.y), max, color);
    triangle(out, min, max, Vec2::new(min.x, max.y), color);
}

/// Rectangle outline, drawn inside the bounds
pub fn rect_outline(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, thickness: f32, color: [f32; 4]) {
    let t = thickness.min(size.x / 2.0).min(size.y / 2.0);
    // Top and bottom span the full width, sides fill the gap between them
    rect(out, min, Vec2::new(size.x, t), color);
    rect(out, Vec2::new(min.x, min.y + size.y - t), Vec2::new(size.x, t), color);
    rect(out, Vec2::new(min.x, min.y + t), Vec2::new(t, size.y - 2.0 * t), color);
    rect(
        out,
        Vec2::new(min.x + size.x - t, min.y + t),
        Vec2::new(t, size.y - 2.0 * t),
        color,
    );
}

/// Filled polygon given in local coordinates, rotated by `degrees`
/// (clockwise on screen) and translated to `center`. Fan-triangulated, so the
/// outline must be convex.
pub fn rotated_polygon(
    out: &mut Vec<Vertex>,
    center: Vec2,
    points: &[Vec2],
    degrees: f32,
    color: [f32; 4],
) {
    if points.len() < 3 {
        return;
    }
    let rotation = Vec2::from_angle(degrees.to_radians());
    let world: Vec<Vec2> = points.iter().map(|&p| center + rotation.rotate(p)).collect();
    for i in 1..world.len() - 1 {
        triangle(out, world[0], world[i], world[i + 1], color);
    }
}

/// Square of side `size` centred on `center`, rotated by `degrees`
pub fn rotated_square(
    out: &mut Vec<Vertex>,
    center: Vec2,
    size: f32,
    degrees: f32,
    color: [f32; 4],
) {
    let h = size / 2.0;
    rotated_polygon(
        out,
        center,
        &[
            Vec2::new(-h, -h),
            Vec2::new(h, -h),
            Vec2::new(h, h),
            Vec2::new(-h, h),
        ],
        degrees,
        color,
    );
}

/// Filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        triangle(
            out,
            center,
            center + Vec2::from_angle(theta1) * radius,
            center + Vec2::from_angle(theta2) * radius,
            color,
        );
    }
}
