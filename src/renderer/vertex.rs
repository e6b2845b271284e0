//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Playfield-space vertex (pixels, y down) with a flat color
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
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Colors for game elements
pub mod colors {
    use crate::sim::Portal;

    pub const GROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const GROUND_LINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BLOCK_FILL: [f32; 4] = [1.0, 1.0, 1.0, 0.1];
    pub const BLOCK_EDGE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SPIKE: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const PLAYER: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const PLAYER_SHIP: [f32; 4] = [1.0, 0.33, 0.67, 1.0];
    pub const PLAYER_DETAIL: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const PARTICLE: [f32; 4] = [1.0, 0.9, 0.6, 1.0];
    pub const CRASH_FLASH: [f32; 4] = [1.0, 0.0, 0.0, 0.35];
    pub const HITBOX: [f32; 4] = [0.2, 1.0, 0.3, 0.9];

    /// Portals are drawn half transparent
    pub const fn portal(portal: Portal) -> [f32; 4] {
        match portal {
            Portal::Ship => [1.0, 0.75, 0.8, 0.5],
            Portal::Cube => [0.0, 1.0, 1.0, 0.5],
            Portal::Ball => [1.0, 0.65, 0.0, 0.5],
            Portal::Ufo => [0.5, 0.0, 0.5, 0.5],
            Portal::Wave => [0.0, 0.0, 1.0, 0.5],
            Portal::Robot => [1.0, 1.0, 1.0, 0.5],
        }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], alpha]
    }
}
