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
    use crate::hex_color;

    pub const BACKGROUND: [f32; 4] = hex_color(0x0d1022, 1.0);
    pub const BASKET: [f32; 4] = hex_color(0x7cffb2, 1.0);

    pub const FRUIT_BODY: [f32; 4] = hex_color(0xff6b6b, 1.0);
    pub const FRUIT_SHINE: [f32; 4] = hex_color(0xffffff, 0.6);
    pub const FRUIT_LEAF: [f32; 4] = hex_color(0x7cffb2, 1.0);
    pub const STEM: [f32; 4] = hex_color(0x5a3a1b, 1.0);

    pub const HAZARD_BODY: [f32; 4] = hex_color(0x2a2f3a, 1.0);
    pub const HAZARD_SPARK: [f32; 4] = hex_color(0xffcc66, 1.0);
}
