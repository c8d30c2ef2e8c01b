//! Drawing contract between the simulator and its host.
//!
//! The field only needs three primitives from a 2D drawing context: clear,
//! fill a circle, stroke a line. Hosts implement [`DrawContext`]; the GPU
//! host batches the calls into instance buffers, and [`CommandRecorder`]
//! keeps them as a plain list.

use glam::Vec2;

/// Straight (non-premultiplied) RGBA color, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from an RGB triple.
    pub const fn rgb(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], 1.0)
    }

    /// Same hue with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A 2D drawing surface the field can render onto.
pub trait DrawContext {
    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Rgba);

    /// Fill a circle of `radius` centered at `center`.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Stroke a line segment of the given `width`.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32);
}

/// One recorded drawing call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        width: f32,
    },
}

/// [`DrawContext`] that records every call in order.
#[derive(Debug, Default, Clone)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    /// Drop all recorded commands, keeping the allocation.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Replay the recorded commands onto another context.
    pub fn replay(&self, ctx: &mut impl DrawContext) {
        for command in &self.commands {
            match *command {
                DrawCommand::Clear(color) => ctx.clear(color),
                DrawCommand::Circle { center, radius, color } => ctx.fill_circle(center, radius, color),
                DrawCommand::Line { from, to, color, width } => ctx.stroke_line(from, to, color, width),
            }
        }
    }
}

impl DrawContext for CommandRecorder {
    fn clear(&mut self, color: Rgba) {
        // Anything drawn before a clear is invisible.
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.commands.push(DrawCommand::Line { from, to, color, width });
    }
}
