//! Proximity links between nearby particles.
//!
//! Every unordered pair closer than the link radius gets a faint line whose
//! opacity fades linearly to zero at the radius. The pass is O(n²), which the
//! density cap keeps cheap.

use glam::Vec2;

use crate::config::FieldConfig;
use crate::particle::Particle;

/// A line between two linked particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: Vec2,
    pub to: Vec2,
    pub opacity: f32,
}

/// Opacity of a link spanning `distance`, or `None` if the pair is too far
/// apart to be linked.
///
/// `(1 - distance / link_radius) * link_max_opacity`; never exceeds the max
/// and grows as the distance shrinks.
#[inline]
pub fn link_opacity(distance: f32, config: &FieldConfig) -> Option<f32> {
    if distance.is_nan() || distance >= config.link_radius || config.link_max_opacity <= 0.0 {
        return None;
    }
    let distance = distance.max(0.0);
    Some((1.0 - distance / config.link_radius) * config.link_max_opacity)
}

/// Find every link among `particles`, each unordered pair at most once.
pub fn find_links(particles: &[Particle], config: &FieldConfig) -> Vec<Link> {
    let mut links = Vec::new();
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let distance = a.position.distance(b.position);
            if let Some(opacity) = link_opacity(distance, config) {
                links.push(Link {
                    from: a.position,
                    to: b.position,
                    opacity,
                });
            }
        }
    }
    links
}
