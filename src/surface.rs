//! The rectangular drawing area particles live on.

use glam::Vec2;

use crate::config::FieldConfig;

/// Drawable area in logical pixels.
///
/// Particle coordinates are surface-relative: `(0, 0)` is the top-left
/// corner and `(width, height)` the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Number of particles this surface holds under `config`'s density rule.
    #[inline]
    pub fn particle_count(&self, config: &FieldConfig) -> usize {
        config.particle_count_for_area(self.area())
    }

    /// Size as a float vector.
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Whether `point` lies in the closed rectangle `[0, width] × [0, height]`.
    pub fn contains(&self, point: Vec2) -> bool {
        let size = self.size();
        point.x >= 0.0 && point.y >= 0.0 && point.x <= size.x && point.y <= size.y
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
