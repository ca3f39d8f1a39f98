//! Core types for the plexus landing page.
//!
//! Geometry, colors, the shared pointer reference and the configuration
//! surface used by both the visibility detector and the particle field.

mod color;
mod config;
mod geometry;
mod pointer;

pub use color::{ColorScheme, Palette, Rgba, hsl_to_rgb};
pub use config::{
    DEFAULT_THRESHOLD, FieldConfig, PLEXUS_POINTS, RISK_PANEL_POINTS, RevealConfig,
    normalize_threshold,
};
pub use geometry::{SurfaceSize, Vec2};
pub use pointer::{PointerReader, PointerTracker};
