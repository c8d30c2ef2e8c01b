//! # driftfield
//!
//! A drifting field of faint points, linked by thin lines when they come
//! close, that scatters away from the mouse pointer.
//!
//! The simulator is independent of any window or GPU: [`ParticleField`]
//! advances its particles once per frame and emits drawing calls to any
//! [`DrawContext`]. [`Backdrop`] hosts it in a winit window rendered with
//! wgpu.
//!
//! ## Quick Start
//!
//! ```ignore
//! use driftfield::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     Backdrop::new()
//!         .with_config(FieldConfig::default())
//!         .with_title("Portfolio")
//!         .run()
//! }
//! ```
//!
//! ## Headless use
//!
//! ```ignore
//! let mut field = ParticleField::new(
//!     Surface::new(1280, 720),
//!     FieldConfig::default(),
//!     SmallRngSource::seeded(42),
//! );
//! let mut recorder = CommandRecorder::new();
//! field.frame(Some(Vec2::new(640.0, 360.0)), &mut recorder);
//! ```
//!
//! ## Behavior
//!
//! | Aspect | Rule |
//! |--------|------|
//! | Density | `min(floor(area / 8000), 150)` particles |
//! | Motion | constant per-particle velocity, wraps at the edges |
//! | Pointer | linear push-away within 120 px, at most 1.5 px per frame |
//! | Links | pairs closer than 140 px, opacity `(1 - d/140) * 0.15` |
//! | Resize | the whole set is regenerated |

pub mod config;
pub mod connections;
pub mod error;
pub mod field;
mod gpu;
pub mod input;
pub mod particle;
pub mod random;
pub mod render;
mod simulation;
mod spawn;
pub mod surface;
pub mod time;

pub use config::FieldConfig;
pub use connections::{find_links, link_opacity, Link};
pub use error::{ConfigError, GpuError, RunError};
pub use field::ParticleField;
pub use glam::Vec2;
pub use gpu::FrameBatch;
pub use input::Pointer;
pub use particle::{repulsion, Particle};
pub use random::{RandomSource, SequenceSource, SmallRngSource};
pub use render::{CommandRecorder, DrawCommand, DrawContext, Rgba};
pub use simulation::Backdrop;
pub use spawn::spawn_particles;
pub use surface::Surface;
pub use time::{FrameClock, FrameRequest, FrameTick};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use driftfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::FieldConfig;
    pub use crate::error::RunError;
    pub use crate::field::ParticleField;
    pub use crate::input::Pointer;
    pub use crate::random::{RandomSource, SequenceSource, SmallRngSource};
    pub use crate::render::{CommandRecorder, DrawContext, Rgba};
    pub use crate::simulation::Backdrop;
    pub use crate::surface::Surface;
    pub use crate::Vec2;
}
