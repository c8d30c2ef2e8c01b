//! Particle set generation.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::random::RandomSource;
use crate::surface::Surface;

/// Generate a full particle set for `surface`.
///
/// Produces exactly `surface.particle_count(config)` particles, each drawn
/// independently from `rng`.
pub fn spawn_particles(
    surface: &Surface,
    config: &FieldConfig,
    rng: &mut impl RandomSource,
) -> Vec<Particle> {
    let count = surface.particle_count(config);
    (0..count)
        .map(|_| Particle::spawn(surface, config, rng))
        .collect()
}
