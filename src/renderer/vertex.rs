//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const GRASS: [f32; 4] = [0.12, 0.37, 0.12, 1.0];
    pub const TRACK_GLOW: [f32; 4] = [0.39, 0.63, 1.0, 0.12];
    pub const TRACK: [f32; 4] = [0.04, 0.08, 0.16, 0.85];
    pub const LANE_DASH: [f32; 4] = [0.47, 0.78, 1.0, 0.35];
    pub const LANE_DASH_HIGH_CONTRAST: [f32; 4] = [0.8, 0.95, 1.0, 0.9];
    pub const TRACK_EDGE: [f32; 4] = [0.63, 0.82, 1.0, 0.55];
    pub const TRACK_KERB: [f32; 4] = [0.92, 0.92, 0.92, 0.8];
    pub const WARNING: [f32; 4] = [1.0, 0.27, 0.27, 0.7];
    pub const WARNING_HIGH_CONTRAST: [f32; 4] = [1.0, 0.1, 0.1, 0.95];

    pub const SHIP_BODY: [f32; 4] = [0.79, 0.09, 0.17, 1.0];
    pub const SHIP_NOSE: [f32; 4] = [1.0, 0.23, 0.31, 1.0];
    pub const SHIP_COCKPIT: [f32; 4] = [0.12, 0.17, 0.27, 1.0];
    pub const SHIP_WHEEL: [f32; 4] = [0.04, 0.06, 0.12, 1.0];
    pub const SHIP_WING: [f32; 4] = [0.96, 0.96, 0.96, 1.0];
    pub const SHIP_GLINT: [f32; 4] = [1.0, 1.0, 1.0, 0.65];

    pub const MISSILE_BODY: [f32; 4] = [0.84, 0.84, 0.87, 1.0];
    pub const MISSILE_TIP: [f32; 4] = [1.0, 0.36, 0.36, 1.0];
    pub const MISSILE_BAND: [f32; 4] = [0.12, 0.15, 0.23, 1.0];
    pub const MISSILE_FIN: [f32; 4] = [0.23, 0.29, 0.42, 1.0];
    pub const MISSILE_FLAME: [f32; 4] = [1.0, 0.71, 0.31, 0.9];

    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}
