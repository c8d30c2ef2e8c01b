//! The particle field simulator.
//!
//! [`ParticleField`] owns the surface, the particle set and the random source
//! that generated it. The host calls [`ParticleField::frame`] once per frame
//! with the current pointer position and a drawing context, and
//! [`ParticleField::resize`] whenever the container changes size.
//!
//! ```ignore
//! let mut field = ParticleField::new(Surface::new(1280, 720), FieldConfig::default(), SmallRngSource::from_entropy());
//!
//! // In the frame callback:
//! field.frame(pointer.position(), &mut ctx);
//! ```

use glam::Vec2;

use crate::config::FieldConfig;
use crate::connections::{find_links, link_opacity};
use crate::particle::Particle;
use crate::random::RandomSource;
use crate::render::{DrawContext, Rgba};
use crate::spawn::spawn_particles;
use crate::surface::Surface;

pub struct ParticleField {
    surface: Surface,
    config: FieldConfig,
    particles: Vec<Particle>,
    rng: Box<dyn RandomSource>,
}

impl ParticleField {
    /// Create a field and spawn its initial particle set.
    pub fn new(surface: Surface, config: FieldConfig, rng: impl RandomSource + 'static) -> Self {
        let mut rng: Box<dyn RandomSource> = Box::new(rng);
        let particles = spawn_particles(&surface, &config, &mut rng);
        tracing::debug!(
            width = surface.width,
            height = surface.height,
            count = particles.len(),
            "spawned particle field"
        );
        Self {
            surface,
            config,
            particles,
            rng,
        }
    }

    /// Change the surface size.
    ///
    /// The whole particle set is discarded and regenerated at the density of
    /// the new surface; no particle survives a resize.
    pub fn resize(&mut self, surface: Surface) {
        self.surface = surface;
        self.particles = spawn_particles(&self.surface, &self.config, &mut self.rng);
        tracing::info!(
            width = surface.width,
            height = surface.height,
            count = self.particles.len(),
            "regenerated particle field"
        );
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self, pointer: Option<Vec2>) {
        let surface = self.surface;
        for particle in &mut self.particles {
            particle.update(&surface, pointer, &self.config);
        }
    }

    /// Draw the current state: clear, particles, then links.
    pub fn render(&self, ctx: &mut impl DrawContext) {
        let hue = Rgba::rgb(self.config.color);
        ctx.clear(Rgba::rgb(self.config.background));

        for particle in &self.particles {
            ctx.fill_circle(particle.position, particle.radius, hue.with_alpha(particle.opacity));
        }

        for link in find_links(&self.particles, &self.config) {
            ctx.stroke_line(link.from, link.to, hue.with_alpha(link.opacity), self.config.link_width);
        }
    }

    /// One full frame: [`step`](Self::step) then [`render`](Self::render).
    pub fn frame(&mut self, pointer: Option<Vec2>, ctx: &mut impl DrawContext) {
        self.step(pointer);
        self.render(ctx);
    }

    /// Opacity the link between particles `a` and `b` would be drawn with.
    pub fn link_between(&self, a: usize, b: usize) -> Option<f32> {
        let (pa, pb) = (self.particles.get(a)?, self.particles.get(b)?);
        if a == b {
            return None;
        }
        link_opacity(pa.position.distance(pb.position), &self.config)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl std::fmt::Debug for ParticleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleField")
            .field("surface", &self.surface)
            .field("particles", &self.particles.len())
            .finish_non_exhaustive()
    }
}
