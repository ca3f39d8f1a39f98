//! Configuration surface for particle fields and scroll reveals.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::ColorScheme;

/// Intersection ratio required to reveal a region when none is given.
pub const DEFAULT_THRESHOLD: f32 = 0.1;

/// Particle count of the hero background.
pub const PLEXUS_POINTS: usize = 60;

/// Particle count of the risk illustration panel.
pub const RISK_PANEL_POINTS: usize = 80;

/// Clamp a visibility threshold into `[0, 1]`; NaN falls back to the default.
pub fn normalize_threshold(threshold: f32) -> f32 {
    if threshold.is_nan() {
        DEFAULT_THRESHOLD
    } else {
        threshold.clamp(0.0, 1.0)
    }
}

/// Behaviour and look of a single particle field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Velocities are drawn uniformly from `±speed_range` on each axis.
    pub speed_range: f32,
    /// Pairs closer than this are connected. Zero disables connections.
    pub connection_radius: f32,
    /// Particles closer than this to the pointer are pushed away.
    pub pointer_influence_radius: f32,
    /// Fraction of the pointer offset applied per frame.
    pub pointer_influence_strength: f32,
    pub color_scheme: ColorScheme,
    /// Probability that a particle is flagged at risk.
    pub risk_fraction: Option<f64>,
    /// Radius of each particle's circle.
    pub point_radius: f32,
    /// Opacity of the per-frame background fill. 1.0 is a full clear.
    pub fade_alpha: f32,
    /// Opacity of regular particles.
    pub node_opacity: f32,
    /// Opacity of a zero-length connection.
    pub edge_opacity: f32,
    /// Phase advance per frame for pulsing particles.
    pub phase_step: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::plexus()
    }
}

impl FieldConfig {
    /// Drifting, pointer-reactive network used behind the hero section.
    pub fn plexus() -> Self {
        Self {
            speed_range: 0.15,
            connection_radius: 120.0,
            pointer_influence_radius: 120.0,
            pointer_influence_strength: 0.0005,
            color_scheme: ColorScheme::Cyan,
            risk_fraction: None,
            point_radius: 1.5,
            fade_alpha: 0.03,
            node_opacity: 0.6,
            edge_opacity: 0.15,
            phase_step: 0.02,
        }
    }

    /// Static dots where a fraction pulses red.
    pub fn risk_panel() -> Self {
        Self {
            speed_range: 0.0,
            connection_radius: 0.0,
            pointer_influence_radius: 0.0,
            pointer_influence_strength: 0.0,
            color_scheme: ColorScheme::Cyan,
            risk_fraction: Some(0.15),
            point_radius: 3.0,
            fade_alpha: 0.1,
            node_opacity: 0.4,
            edge_opacity: 0.0,
            phase_step: 0.02,
        }
    }

    /// Whether particles react to the pointer at all.
    pub fn pointer_enabled(&self) -> bool {
        self.pointer_influence_radius > 0.0 && self.pointer_influence_strength != 0.0
    }

    /// Replace invalid values with safe ones instead of failing.
    ///
    /// Negative or non-finite magnitudes become zero, opacities are clamped
    /// to `[0, 1]` and a NaN risk fraction disables risk flagging.
    pub fn sanitized(self) -> Self {
        let sanitized = Self {
            speed_range: non_negative(self.speed_range),
            connection_radius: non_negative(self.connection_radius),
            pointer_influence_radius: non_negative(self.pointer_influence_radius),
            pointer_influence_strength: if self.pointer_influence_strength.is_finite() {
                self.pointer_influence_strength
            } else {
                0.0
            },
            color_scheme: self.color_scheme,
            risk_fraction: self
                .risk_fraction
                .filter(|p| !p.is_nan())
                .map(|p| p.clamp(0.0, 1.0)),
            point_radius: non_negative(self.point_radius),
            fade_alpha: unit(self.fade_alpha),
            node_opacity: unit(self.node_opacity),
            edge_opacity: unit(self.edge_opacity),
            phase_step: if self.phase_step.is_finite() {
                self.phase_step
            } else {
                0.0
            },
        };
        if sanitized != self {
            warn!(original = ?self, ?sanitized, "field config clamped to safe values");
        }
        sanitized
    }
}

/// Timing of scroll-triggered reveals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Intersection ratio that reveals a region.
    pub threshold: f32,
    /// Length of the fade/slide transition.
    pub duration_ms: u64,
    /// Delay added per item in a staggered group.
    pub stagger_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            duration_ms: 700,
            stagger_ms: 150,
        }
    }
}

fn non_negative(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

fn unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_threshold() {
        assert_eq!(normalize_threshold(0.5), 0.5);
        assert_eq!(normalize_threshold(-1.0), 0.0);
        assert_eq!(normalize_threshold(3.0), 1.0);
        assert_eq!(normalize_threshold(f32::NAN), DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_presets() {
        let plexus = FieldConfig::plexus();
        assert!(plexus.pointer_enabled());
        assert_eq!(plexus.risk_fraction, None);
        assert_eq!(plexus.connection_radius, 120.0);

        let risk = FieldConfig::risk_panel();
        assert!(!risk.pointer_enabled());
        assert_eq!(risk.risk_fraction, Some(0.15));
        assert_eq!(risk.speed_range, 0.0);
    }

    #[test]
    fn test_sanitized_clamps_invalid_values() {
        let config = FieldConfig {
            speed_range: -1.0,
            connection_radius: f32::INFINITY,
            risk_fraction: Some(1.5),
            fade_alpha: 4.0,
            node_opacity: f32::NAN,
            ..FieldConfig::plexus()
        }
        .sanitized();

        assert_eq!(config.speed_range, 0.0);
        assert_eq!(config.connection_radius, 0.0);
        assert_eq!(config.risk_fraction, Some(1.0));
        assert_eq!(config.fade_alpha, 1.0);
        assert_eq!(config.node_opacity, 0.0);
    }

    #[test]
    fn test_sanitized_drops_nan_risk() {
        let config = FieldConfig {
            risk_fraction: Some(f64::NAN),
            ..FieldConfig::risk_panel()
        }
        .sanitized();
        assert_eq!(config.risk_fraction, None);
    }

    #[test]
    fn test_sanitized_keeps_valid_config() {
        assert_eq!(FieldConfig::plexus().sanitized(), FieldConfig::plexus());
        assert_eq!(FieldConfig::risk_panel().sanitized(), FieldConfig::risk_panel());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: FieldConfig = toml::from_str("connection_radius = 80.0").unwrap();
        assert_eq!(config.connection_radius, 80.0);
        assert_eq!(config.speed_range, FieldConfig::plexus().speed_range);

        let reveal: RevealConfig = toml::from_str("threshold = 0.5").unwrap();
        assert_eq!(reveal.threshold, 0.5);
        assert_eq!(reveal.duration_ms, 700);
    }
}
