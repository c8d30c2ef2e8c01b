//! A single drifting point and its per-frame update.
//!
//! Each frame a particle moves by its velocity, is pushed away from the
//! pointer if it is close enough, and finally wraps around the surface
//! edges. Velocity, radius and opacity never change after spawn.

use glam::Vec2;

use crate::config::FieldConfig;
use crate::random::RandomSource;
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Surface-relative position.
    pub position: Vec2,
    pub radius: f32,
    /// Displacement per frame.
    pub velocity: Vec2,
    pub opacity: f32,
}

impl Particle {
    /// Spawn a particle with every attribute drawn uniformly from `rng`.
    ///
    /// Draw order is x, y, radius, vx, vy, opacity.
    pub fn spawn(surface: &Surface, config: &FieldConfig, rng: &mut impl RandomSource) -> Self {
        let size = surface.size();
        let position = Vec2::new(rng.range(0.0, size.x), rng.range(0.0, size.y));
        let radius = rng.range(config.radius[0], config.radius[1]);
        let velocity = Vec2::new(
            rng.range(config.speed[0], config.speed[1]),
            rng.range(config.speed[0], config.speed[1]),
        );
        let opacity = rng.range(config.opacity[0], config.opacity[1]);

        Self {
            position,
            radius,
            velocity,
            opacity,
        }
    }

    /// Advance one frame: move, repel from `pointer`, wrap.
    pub fn update(&mut self, surface: &Surface, pointer: Option<Vec2>, config: &FieldConfig) {
        self.position += self.velocity;
        self.position += repulsion(self.position, pointer, config);
        self.wrap(surface);
    }

    /// Wrap around the surface edges.
    ///
    /// A coordinate below zero jumps to the far edge, one beyond the far edge
    /// jumps to zero. The other coordinate is untouched.
    pub fn wrap(&mut self, surface: &Surface) {
        let size = surface.size();
        if self.position.x < 0.0 {
            self.position.x = size.x;
        } else if self.position.x > size.x {
            self.position.x = 0.0;
        }
        if self.position.y < 0.0 {
            self.position.y = size.y;
        } else if self.position.y > size.y {
            self.position.y = 0.0;
        }
    }
}

/// Displacement pushing a particle at `position` away from `pointer`.
///
/// Falls off linearly from `repel_strength` at the pointer to zero at
/// `repel_radius`. Zero when there is no pointer, when the particle is out of
/// range, or when it sits exactly on the pointer (no direction to push in).
pub fn repulsion(position: Vec2, pointer: Option<Vec2>, config: &FieldConfig) -> Vec2 {
    let Some(pointer) = pointer else {
        return Vec2::ZERO;
    };
    let away = position - pointer;
    let dist = away.length();
    if dist >= config.repel_radius || dist <= 0.0 || !dist.is_finite() {
        return Vec2::ZERO;
    }
    let force = (config.repel_radius - dist) / config.repel_radius * config.repel_strength;
    away / dist * force
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{SequenceSource, SmallRngSource};

    fn still(x: f32, y: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            radius: 1.0,
            velocity: Vec2::ZERO,
            opacity: 0.5,
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let surface = Surface::new(800, 600);
        let config = FieldConfig::default();
        let mut rng = SmallRngSource::seeded(3);
        for _ in 0..1000 {
            let p = Particle::spawn(&surface, &config, &mut rng);
            assert!(surface.contains(p.position));
            assert!((0.5..=2.0).contains(&p.radius));
            assert!((-0.2..=0.2).contains(&p.velocity.x));
            assert!((-0.2..=0.2).contains(&p.velocity.y));
            assert!((0.1..=0.6).contains(&p.opacity));
        }
    }

    #[test]
    fn test_spawn_draw_order() {
        let surface = Surface::new(100, 200);
        let config = FieldConfig::default();
        let mut rng = SequenceSource::new(vec![0.5, 0.25, 0.0, 0.0, 0.5, 0.0]);
        let p = Particle::spawn(&surface, &config, &mut rng);
        assert_eq!(p.position, Vec2::new(50.0, 50.0));
        assert_eq!(p.radius, 0.5);
        assert_eq!(p.velocity.x, -0.2);
        assert!(p.velocity.y.abs() < 1e-6);
        assert_eq!(p.opacity, 0.1);
    }

    #[test]
    fn test_update_moves_by_velocity() {
        let surface = Surface::new(100, 100);
        let config = FieldConfig::default();
        let mut p = still(50.0, 50.0);
        p.velocity = Vec2::new(0.2, -0.1);
        p.update(&surface, None, &config);
        assert!((p.position - Vec2::new(50.2, 49.9)).length() < 1e-5);
    }

    #[test]
    fn test_wrap_each_edge() {
        let surface = Surface::new(100, 80);

        let mut p = still(100.001, 40.0);
        p.wrap(&surface);
        assert_eq!(p.position, Vec2::new(0.0, 40.0));

        let mut p = still(-0.001, 40.0);
        p.wrap(&surface);
        assert_eq!(p.position, Vec2::new(100.0, 40.0));

        let mut p = still(30.0, 80.001);
        p.wrap(&surface);
        assert_eq!(p.position, Vec2::new(30.0, 0.0));

        let mut p = still(30.0, -0.001);
        p.wrap(&surface);
        assert_eq!(p.position, Vec2::new(30.0, 80.0));
    }

    #[test]
    fn test_wrap_keeps_boundary_points() {
        let surface = Surface::new(100, 80);
        let mut p = still(100.0, 0.0);
        p.wrap(&surface);
        assert_eq!(p.position, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_repulsion_without_pointer_is_zero() {
        let config = FieldConfig::default();
        assert_eq!(repulsion(Vec2::new(10.0, 10.0), None, &config), Vec2::ZERO);
    }

    #[test]
    fn test_repulsion_out_of_range_is_zero() {
        let config = FieldConfig::default();
        let pointer = Some(Vec2::ZERO);
        assert_eq!(repulsion(Vec2::new(120.0, 0.0), pointer, &config), Vec2::ZERO);
        assert_eq!(repulsion(Vec2::new(300.0, 400.0), pointer, &config), Vec2::ZERO);
    }

    #[test]
    fn test_repulsion_at_zero_distance_is_zero() {
        let config = FieldConfig::default();
        let d = repulsion(Vec2::new(100.0, 100.0), Some(Vec2::new(100.0, 100.0)), &config);
        assert_eq!(d, Vec2::ZERO);
        assert!(d.is_finite());
    }

    #[test]
    fn test_repulsion_points_away_and_scales_linearly() {
        let config = FieldConfig::default();
        let pointer = Some(Vec2::new(100.0, 100.0));

        // 60 units to the right: half strength, pointing +x.
        let d = repulsion(Vec2::new(160.0, 100.0), pointer, &config);
        assert!((d.x - 0.75).abs() < 1e-5);
        assert!(d.y.abs() < 1e-6);

        // Just above the pointer: nearly full strength, pointing -y.
        let d = repulsion(Vec2::new(100.0, 99.0), pointer, &config);
        assert!(d.y < 0.0);
        assert!(d.length() <= 1.5);
        assert!((d.length() - 1.5 * 119.0 / 120.0).abs() < 1e-5);
    }

    #[test]
    fn test_update_with_pointer_on_particle_stays_finite() {
        let surface = Surface::new(200, 200);
        let config = FieldConfig::default();
        let mut p = still(100.0, 100.0);
        p.update(&surface, Some(Vec2::new(100.0, 100.0)), &config);
        assert_eq!(p.position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_repulsion_pushing_past_edge_wraps() {
        let surface = Surface::new(200, 200);
        let config = FieldConfig::default();
        let mut p = still(199.5, 100.0);
        p.update(&surface, Some(Vec2::new(199.0, 100.0)), &config);
        assert_eq!(p.position.x, 0.0);
        assert!(surface.contains(p.position));
    }
}
