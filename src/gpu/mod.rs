mod batch;
mod shaders;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use wgpu::util::DeviceExt;
use winit::window::Window;

pub use batch::FrameBatch;
use batch::{CircleInstance, LineInstance};

use crate::error::GpuError;

const INITIAL_CIRCLES: usize = 256;
const INITIAL_LINES: usize = 4096;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Viewport {
    size: [f32; 2],
    _padding: [f32; 2],
}

/// Growable GPU vertex buffer holding one kind of instance.
struct InstanceBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    /// Capacity in bytes.
    capacity: u64,
    count: u32,
}

impl InstanceBuffer {
    fn new(device: &wgpu::Device, label: &'static str, capacity: u64) -> Self {
        Self {
            label,
            buffer: create_instance_buffer(device, label, capacity),
            capacity,
            count: 0,
        }
    }

    /// Upload `bytes` holding `count` instances, growing the buffer if needed.
    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8], count: usize) {
        self.count = count as u32;
        if bytes.is_empty() {
            return;
        }
        let needed = bytes.len() as u64;
        if needed > self.capacity {
            self.capacity = needed.next_power_of_two();
            self.buffer = create_instance_buffer(device, self.label, self.capacity);
            tracing::debug!(buffer = self.label, bytes = self.capacity, "grew instance buffer");
        }
        queue.write_buffer(&self.buffer, 0, bytes);
    }
}

fn create_instance_buffer(device: &wgpu::Device, label: &str, size: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// wgpu renderer for a [`FrameBatch`].
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    circle_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    viewport_buffer: wgpu::Buffer,
    viewport_bind_group: wgpu::BindGroup,
    circles: InstanceBuffer,
    lines: InstanceBuffer,
}

impl GpuState {
    /// Set up the device and pipelines for `window`.
    ///
    /// `logical_size` is the drawing surface in logical pixels, the
    /// coordinate space of every instance.
    pub async fn new(window: Arc<Window>, logical_size: Vec2) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| GpuError::NoAdapter)?;

        let info = adapter.get_info();
        tracing::info!(adapter = %info.name, backend = ?info.backend, "selected GPU adapter");

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuError::NoSurfaceFormat)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let viewport_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Viewport Buffer"),
            contents: bytemuck::bytes_of(&viewport(logical_size)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let viewport_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Viewport Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let viewport_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Viewport Bind Group"),
            layout: &viewport_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Field Pipeline Layout"),
            bind_group_layouts: &[&viewport_bind_group_layout],
            push_constant_ranges: &[],
        });

        let circle_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            surface_format,
            "Circle",
            &shaders::circle_shader(),
            ("vs_circle", "fs_circle"),
            CircleInstance::layout(),
        );
        let line_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            surface_format,
            "Line",
            &shaders::line_shader(),
            ("vs_line", "fs_line"),
            LineInstance::layout(),
        );

        let circles = InstanceBuffer::new(
            &device,
            "Circle Instance Buffer",
            (INITIAL_CIRCLES * std::mem::size_of::<CircleInstance>()) as u64,
        );
        let lines = InstanceBuffer::new(
            &device,
            "Line Instance Buffer",
            (INITIAL_LINES * std::mem::size_of::<LineInstance>()) as u64,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            circle_pipeline,
            line_pipeline,
            viewport_buffer,
            viewport_bind_group,
            circles,
            lines,
        })
    }

    /// Reconfigure the surface for a new window size.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>, logical_size: Vec2) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.queue.write_buffer(
                &self.viewport_buffer,
                0,
                bytemuck::bytes_of(&viewport(logical_size)),
            );
        }
    }

    /// Reconfigure the surface at its current size, after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw `batch`: clear, circles, then lines.
    pub fn present(&mut self, batch: &FrameBatch) -> Result<(), wgpu::SurfaceError> {
        self.circles.upload(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(&batch.circles),
            batch.circles.len(),
        );
        self.lines.upload(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(&batch.lines),
            batch.lines.len(),
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let clear = batch.clear;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Field Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(clear.r),
                            g: f64::from(clear.g),
                            b: f64::from(clear.b),
                            a: f64::from(clear.a),
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                ..Default::default()
            });

            render_pass.set_bind_group(0, &self.viewport_bind_group, &[]);

            if self.circles.count > 0 {
                render_pass.set_pipeline(&self.circle_pipeline);
                render_pass.set_vertex_buffer(0, self.circles.buffer.slice(..));
                render_pass.draw(0..6, 0..self.circles.count);
            }

            if self.lines.count > 0 {
                render_pass.set_pipeline(&self.line_pipeline);
                render_pass.set_vertex_buffer(0, self.lines.buffer.slice(..));
                render_pass.draw(0..6, 0..self.lines.count);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn viewport(logical_size: Vec2) -> Viewport {
    Viewport {
        size: logical_size.max(Vec2::ONE).to_array(),
        _padding: [0.0; 2],
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    name: &str,
    source: &str,
    (vs_entry, fs_entry): (&str, &str),
    instance_layout: wgpu::VertexBufferLayout<'static>,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{name} Shader")),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{name} Pipeline")),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some(vs_entry),
            buffers: &[instance_layout],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some(fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
