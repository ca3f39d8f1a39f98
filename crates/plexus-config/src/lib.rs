//! Configuration for the plexus landing page.
//!
//! Everything is optional: a missing file, a missing section or a missing key
//! falls back to the built-in presets. Values that make no sense are clamped
//! with a warning rather than rejected.

use std::path::PathBuf;
use std::time::Duration;

use plexus_core::{
    ColorScheme, FieldConfig, PLEXUS_POINTS, RISK_PANEL_POINTS, RevealConfig, normalize_threshold,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

mod loader;

pub use loader::{LOG_ENV, config_path};

/// Fastest allowed frame loop.
const MIN_FRAME_INTERVAL_MS: u64 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Palette for every field and accent on the page.
    pub color_scheme: ColorScheme,
    /// Delay between frames of the event loop.
    pub frame_interval_ms: u64,
    /// Fixed RNG seed for reproducible particle layouts.
    pub seed: Option<u64>,
    /// Hero plexus background.
    pub background: FieldSettings,
    /// Risk illustration next to the problem section.
    pub risk_panel: FieldSettings,
    pub reveal: RevealConfig,
    pub log: LogSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::default(),
            frame_interval_ms: 33,
            seed: None,
            background: FieldSettings::default(),
            risk_panel: FieldSettings::default(),
            reveal: RevealConfig::default(),
            log: LogSettings::default(),
        }
    }
}

impl Config {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(MIN_FRAME_INTERVAL_MS))
    }

    /// Reveal settings with the threshold clamped into `[0, 1]`.
    pub fn reveal(&self) -> RevealConfig {
        RevealConfig {
            threshold: normalize_threshold(self.reveal.threshold),
            ..self.reveal
        }
    }

    /// Particle count and config of the hero background.
    pub fn background_field(&self) -> (usize, FieldConfig) {
        self.background
            .resolve("background", PLEXUS_POINTS, FieldConfig::plexus(), self.color_scheme)
    }

    /// Particle count and config of the risk panel.
    pub fn risk_panel_field(&self) -> (usize, FieldConfig) {
        self.risk_panel.resolve(
            "risk_panel",
            RISK_PANEL_POINTS,
            FieldConfig::risk_panel(),
            self.color_scheme,
        )
    }

    /// Apply the `PLEXUS_LOG` override: any value turns logging on, and a
    /// non-empty one replaces the filter.
    pub fn apply_log_override(&mut self, value: Option<String>) {
        let Some(value) = value else {
            return;
        };
        self.log.enabled = true;
        let value = value.trim();
        if !value.is_empty() {
            self.log.level = value.to_string();
        }
    }
}

/// Per-field overrides. Unset keys keep the preset of the field they apply to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    /// Signed so that a negative count in the file can be reported and clamped.
    pub point_count: Option<i64>,
    pub speed_range: Option<f32>,
    pub connection_radius: Option<f32>,
    pub pointer_influence_radius: Option<f32>,
    pub pointer_influence_strength: Option<f32>,
    pub risk_fraction: Option<f64>,
}

impl FieldSettings {
    fn resolve(
        &self,
        name: &str,
        default_count: usize,
        preset: FieldConfig,
        color_scheme: ColorScheme,
    ) -> (usize, FieldConfig) {
        let count = match self.point_count {
            None => default_count,
            Some(n) if n < 0 => {
                warn!(field = name, point_count = n, "negative particle count clamped to 0");
                0
            }
            Some(n) => usize::try_from(n).unwrap_or(usize::MAX),
        };
        let config = FieldConfig {
            speed_range: self.speed_range.unwrap_or(preset.speed_range),
            connection_radius: self.connection_radius.unwrap_or(preset.connection_radius),
            pointer_influence_radius: self
                .pointer_influence_radius
                .unwrap_or(preset.pointer_influence_radius),
            pointer_influence_strength: self
                .pointer_influence_strength
                .unwrap_or(preset.pointer_influence_strength),
            risk_fraction: self.risk_fraction.or(preset.risk_fraction),
            color_scheme,
            ..preset
        };
        (count, config.sanitized())
    }
}

/// `[log]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub enabled: bool,
    /// `EnvFilter` directive, e.g. `info` or `plexus_reveal=trace`.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}
