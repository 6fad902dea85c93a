//! Shape generation for 2D primitives
//!
//! All coordinates are screen pixels with y pointing down.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Two triangles covering an axis-aligned box
pub fn quad(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> [Vertex; 6] {
    let (x1, y1) = (x + w, y + h);
    [
        Vertex::new(x, y, color),
        Vertex::new(x1, y, color),
        Vertex::new(x, y1, color),
        Vertex::new(x, y1, color),
        Vertex::new(x1, y, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Filled rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    quad(r.x as f32, r.y as f32, r.w as f32, r.h as f32, color)
}

/// Rectangle outline drawn inside its bounds
pub fn rect_outline(r: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (x, y, w, h) = (r.x as f32, r.y as f32, r.w as f32, r.h as f32);
    let t = thickness.min(w / 2.0).min(h / 2.0);

    let mut vertices = Vec::with_capacity(24);
    vertices.extend(quad(x, y, w, t, color));
    vertices.extend(quad(x, y + h - t, w, t, color));
    vertices.extend(quad(x, y + t, t, h - 2.0 * t, color));
    vertices.extend(quad(x + w - t, y + t, t, h - 2.0 * t, color));
    vertices
}

/// Thick line segment
pub fn line(from: Vec2, to: Vec2, thickness: f32, color: [f32; 4]) -> [Vertex; 6] {
    let dir = (to - from).normalize_or_zero();
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (thickness / 2.0);

    let a = from + perp;
    let b = from - perp;
    let c = to + perp;
    let d = to - perp;
    [
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());
        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Spokes radiating from `center`, rotated by `angle_deg`
pub fn spokes(
    center: Vec2,
    radius: f32,
    angle_deg: f32,
    count: u32,
    thickness: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let step = 360.0 / count as f32;
    (0..count)
        .flat_map(|i| {
            let theta = (angle_deg + i as f32 * step).to_radians();
            let tip = center + Vec2::new(theta.cos(), theta.sin()) * radius;
            line(center, tip, thickness, color)
        })
        .collect()
}
