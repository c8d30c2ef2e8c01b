//! Per-frame instance batching.
//!
//! [`FrameBatch`] is the GPU host's [`DrawContext`]: drawing calls become
//! instance records that [`GpuState::present`](super::GpuState::present)
//! uploads in one go.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::render::{DrawContext, Rgba};

/// One filled circle.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct CircleInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub color: [f32; 4],
}

impl CircleInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32, 2 => Float32x4];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// One stroked line segment.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct LineInstance {
    pub p0: [f32; 2],
    pub p1: [f32; 2],
    pub width: f32,
    pub color: [f32; 4],
}

impl LineInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 4] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32, 3 => Float32x4];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Drawing calls for one frame, ready for upload.
#[derive(Debug, Default)]
pub struct FrameBatch {
    pub(crate) clear: Rgba,
    pub(crate) circles: Vec<CircleInstance>,
    pub(crate) lines: Vec<LineInstance>,
}

impl FrameBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn clear_color(&self) -> Rgba {
        self.clear
    }
}

impl DrawContext for FrameBatch {
    fn clear(&mut self, color: Rgba) {
        self.clear = color;
        self.circles.clear();
        self.lines.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.circles.push(CircleInstance {
            center: center.to_array(),
            radius,
            color: color.to_array(),
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.lines.push(LineInstance {
            p0: from.to_array(),
            p1: to.to_array(),
            width,
            color: color.to_array(),
        });
    }
}
