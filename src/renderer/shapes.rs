//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in canvas pixel space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Append an axis-aligned rectangle (top-left corner + size)
pub fn push_rect(vertices: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    let (x2, y2) = (x + w, y + h);

    // Two triangles
    vertices.push(Vertex::new(x, y, color));
    vertices.push(Vertex::new(x2, y, color));
    vertices.push(Vertex::new(x, y2, color));

    vertices.push(Vertex::new(x, y2, color));
    vertices.push(Vertex::new(x2, y, color));
    vertices.push(Vertex::new(x2, y2, color));
}

/// Append a rectangle given by its center and size
pub fn push_centered_rect(vertices: &mut Vec<Vertex>, center: Vec2, size: Vec2, color: [f32; 4]) {
    let corner = center - size / 2.0;
    push_rect(vertices, corner.x, corner.y, size.x, size.y, color);
}

/// Append a single triangle
pub fn push_triangle(vertices: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    vertices.push(Vertex::new(a.x, a.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(c.x, c.y, color));
}

/// Generate vertices for a filled ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}
