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

    /// Same vertex moved by (dx, dy)
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.position[0] + dx, self.position[1] + dy, self.color)
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
    pub const FIELD: [f32; 4] = [0.0, 0.5, 0.0, 1.0];
    pub const LINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const GOAL: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const PADDLE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BALL: [f32; 4] = [1.0, 0.5, 0.0, 1.0];
    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const HIGHLIGHT: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const MENU_BACKGROUND: [f32; 4] = [0.02, 0.05, 0.02, 1.0];
    /// Field markings behind the menu
    pub const MENU_LINE: [f32; 4] = [1.0, 1.0, 1.0, 0.12];
}
