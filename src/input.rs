//! Pointer tracking for the repulsion effect.
//!
//! [`Pointer`] holds the cursor position in surface coordinates (logical
//! pixels), or nothing while the cursor is outside the window. The host feeds
//! it raw winit events; the field only ever reads it.

use glam::Vec2;
use winit::event::WindowEvent;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Pointer {
    position: Option<Vec2>,
}

impl Pointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position, `None` while the pointer is outside the surface.
    #[inline]
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.position = Some(position);
    }

    pub fn leave(&mut self) {
        self.position = None;
    }

    /// Process a winit window event.
    ///
    /// `scale_factor` converts the physical cursor position reported by
    /// winit into logical pixels. Returns `true` if the event was a pointer
    /// event.
    pub fn handle_event(&mut self, event: &WindowEvent, scale_factor: f64) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(scale_factor);
                self.move_to(Vec2::new(logical.x as f32, logical.y as f32));
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.leave();
                true
            }
            _ => false,
        }
    }
}
