//! Field configuration.
//!
//! Every tuning value of the particle field lives here as a named constant,
//! and [`FieldConfig`] groups them into a serializable struct that can be
//! loaded from a JSON file:
//!
//! ```ignore
//! let config = FieldConfig::load("backdrop.json")?;
//! config.validate()?;
//! ```
//!
//! Keys missing from the file fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Surface area (in square logical pixels) per particle.
pub const DENSITY_DIVISOR: u32 = 8000;
/// Upper bound on the particle count regardless of surface area.
pub const MAX_PARTICLES: u32 = 150;
/// Particle radius range.
pub const RADIUS_RANGE: [f32; 2] = [0.5, 2.0];
/// Per-axis velocity range, in pixels per frame.
pub const SPEED_RANGE: [f32; 2] = [-0.2, 0.2];
/// Particle opacity range.
pub const OPACITY_RANGE: [f32; 2] = [0.1, 0.6];
/// Distance below which the pointer pushes particles away.
pub const REPEL_RADIUS: f32 = 120.0;
/// Displacement applied at zero distance from the pointer.
pub const REPEL_STRENGTH: f32 = 1.5;
/// Distance below which two particles are linked.
pub const LINK_RADIUS: f32 = 140.0;
/// Opacity of a link between two coincident particles.
pub const LINK_MAX_OPACITY: f32 = 0.15;
/// Stroke width of link lines.
pub const LINK_WIDTH: f32 = 0.5;
/// Native frame rate of the update/render loop.
pub const FRAME_RATE: u32 = 60;

/// Complete particle field configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// Surface area per particle.
    pub density_divisor: u32,
    /// Density cap.
    pub max_particles: u32,
    /// `[min, max]` particle radius.
    pub radius: [f32; 2],
    /// `[min, max]` velocity per axis.
    pub speed: [f32; 2],
    /// `[min, max]` particle opacity.
    pub opacity: [f32; 2],
    pub repel_radius: f32,
    pub repel_strength: f32,
    pub link_radius: f32,
    pub link_max_opacity: f32,
    pub link_width: f32,
    /// Particle and link hue (RGB, 0.0-1.0).
    pub color: [f32; 3],
    /// Clear color (RGB, 0.0-1.0).
    pub background: [f32; 3],
    pub frame_rate: u32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density_divisor: DENSITY_DIVISOR,
            max_particles: MAX_PARTICLES,
            radius: RADIUS_RANGE,
            speed: SPEED_RANGE,
            opacity: OPACITY_RANGE,
            repel_radius: REPEL_RADIUS,
            repel_strength: REPEL_STRENGTH,
            link_radius: LINK_RADIUS,
            link_max_opacity: LINK_MAX_OPACITY,
            link_width: LINK_WIDTH,
            color: [0.39, 1.0, 0.85],
            background: [0.04, 0.04, 0.06],
            frame_rate: FRAME_RATE,
        }
    }
}

impl FieldConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Number of particles for a surface of the given area.
    ///
    /// `min(floor(area / density_divisor), max_particles)`.
    pub fn particle_count_for_area(&self, area: u64) -> usize {
        if self.density_divisor == 0 {
            return 0;
        }
        let count = area / u64::from(self.density_divisor);
        count.min(u64::from(self.max_particles)) as usize
    }

    /// Check that every value is usable by the simulator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.density_divisor == 0 {
            return Err(ConfigError::Invalid("density_divisor must be non-zero".into()));
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::Invalid("frame_rate must be non-zero".into()));
        }
        check_range("radius", self.radius)?;
        check_range("speed", self.speed)?;
        check_range("opacity", self.opacity)?;
        if self.radius[0] < 0.0 {
            return Err(ConfigError::Invalid("radius must not be negative".into()));
        }
        if self.opacity[0] < 0.0 || self.opacity[1] > 1.0 {
            return Err(ConfigError::Invalid("opacity must lie in [0, 1]".into()));
        }
        check_positive("repel_radius", self.repel_radius)?;
        check_positive("link_radius", self.link_radius)?;
        check_positive("link_width", self.link_width)?;
        if !self.repel_strength.is_finite() || self.repel_strength < 0.0 {
            return Err(ConfigError::Invalid("repel_strength must be finite and non-negative".into()));
        }
        if !(0.0..=1.0).contains(&self.link_max_opacity) {
            return Err(ConfigError::Invalid("link_max_opacity must lie in [0, 1]".into()));
        }
        for (name, rgb) in [("color", self.color), ("background", self.background)] {
            if rgb.iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(ConfigError::Invalid(format!("{name} components must lie in [0, 1]")));
            }
        }
        Ok(())
    }
}

fn check_range(name: &str, range: [f32; 2]) -> Result<(), ConfigError> {
    let [min, max] = range;
    if !min.is_finite() || !max.is_finite() {
        return Err(ConfigError::Invalid(format!("{name} range must be finite")));
    }
    if min > max {
        return Err(ConfigError::Invalid(format!("{name} range is inverted: [{min}, {max}]")));
    }
    Ok(())
}

fn check_positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::Invalid(format!("{name} must be finite and positive, got {value}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = FieldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.density_divisor, 8000);
        assert_eq!(config.max_particles, 150);
        assert_eq!(config.repel_radius, 120.0);
        assert_eq!(config.link_radius, 140.0);
    }

    #[test]
    fn test_particle_count_for_area() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count_for_area(0), 0);
        assert_eq!(config.particle_count_for_area(7_999), 0);
        assert_eq!(config.particle_count_for_area(8_000), 1);
        assert_eq!(config.particle_count_for_area(80_000), 10);
        assert_eq!(config.particle_count_for_area(1_200_000), 150);
        assert_eq!(config.particle_count_for_area(2_000_000), 150);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = FieldConfig::from_json(r#"{ "max_particles": 40, "link_radius": 90.0 }"#).unwrap();
        assert_eq!(config.max_particles, 40);
        assert_eq!(config.link_radius, 90.0);
        assert_eq!(config.density_divisor, DENSITY_DIVISOR);
        assert_eq!(config.radius, RADIUS_RANGE);
    }

    #[test]
    fn test_json_roundtrip_through_file() {
        let path = std::env::temp_dir().join(format!("driftfield-config-{}.json", std::process::id()));
        let mut config = FieldConfig::default();
        config.frame_rate = 30;
        config.save(&path).unwrap();
        let loaded = FieldConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = FieldConfig::load("/nonexistent/driftfield.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = FieldConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FieldConfig::default();
        config.density_divisor = 0;
        assert!(config.validate().is_err());

        let mut config = FieldConfig::default();
        config.radius = [2.0, 0.5];
        assert!(config.validate().is_err());

        let mut config = FieldConfig::default();
        config.opacity = [0.1, 1.5];
        assert!(config.validate().is_err());

        let mut config = FieldConfig::default();
        config.link_radius = 0.0;
        assert!(config.validate().is_err());

        let mut config = FieldConfig::default();
        config.repel_radius = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = FieldConfig::default();
        config.frame_rate = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_divisor_yields_no_particles() {
        let mut config = FieldConfig::default();
        config.density_divisor = 0;
        assert_eq!(config.particle_count_for_area(1_000_000), 0);
    }
}
