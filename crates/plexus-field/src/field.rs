//! Particle field state and the per-frame update/draw pass.

use plexus_core::{ColorScheme, FieldConfig, Palette, SurfaceSize, Vec2};
use rand::Rng;

use crate::particle::{self, Particle};
use crate::surface::Surface;

/// Halo radius of regular particles.
const NODE_GLOW: f32 = 8.0;

/// Halo radius of calm particles in a risk field.
const CALM_GLOW: f32 = 5.0;

/// Peak halo radius of pulsing particles.
const RISK_GLOW: f32 = 15.0;

/// Opacity of a connection between two particles `distance` apart.
///
/// Falls linearly from `base` at distance 0 to zero at `radius`.
pub fn connection_opacity(distance: f32, radius: f32, base: f32) -> f32 {
    if radius <= 0.0 || !distance.is_finite() || distance >= radius {
        return 0.0;
    }
    base * (1.0 - distance.max(0.0) / radius)
}

/// A fixed-size set of moving particles.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    size: SurfaceSize,
    config: FieldConfig,
    palette: Palette,
    frames: u64,
}

impl ParticleField {
    /// Spawn `count` particles spread over `size`.
    pub fn new<R: Rng + ?Sized>(
        count: usize,
        size: SurfaceSize,
        config: FieldConfig,
        rng: &mut R,
    ) -> Self {
        let config = config.sanitized();
        Self {
            particles: particle::spawn(count, size, &config, rng),
            size,
            palette: config.color_scheme.palette(),
            config,
            frames: 0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Update the bounds used for reflection. Positions are left alone.
    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.config.color_scheme = scheme;
        self.palette = scheme.palette();
    }

    /// Run one frame: fade, move, repel, draw particles, draw connections.
    ///
    /// Returns `false` without touching the surface when there is nothing to
    /// draw on.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S, pointer: Option<Vec2>) -> bool {
        if self.size.is_empty() {
            return false;
        }

        let config = self.config;
        let palette = self.palette;
        surface.fade(palette.background.with_alpha(config.fade_alpha));

        let pointer = pointer.filter(|_| config.pointer_enabled());
        let risk_field = config.risk_fraction.is_some();

        for p in &mut self.particles {
            p.advance(self.size);
            if let Some(pointer) = pointer {
                p.repel(
                    pointer,
                    config.pointer_influence_radius,
                    config.pointer_influence_strength,
                );
            }
            p.phase += config.phase_step;

            let (color, glow) = if p.at_risk {
                let intensity = p.pulse();
                (palette.risk.with_alpha(intensity), RISK_GLOW * intensity)
            } else if risk_field {
                (palette.calm.with_alpha(config.node_opacity), CALM_GLOW)
            } else {
                (palette.node.with_alpha(config.node_opacity), NODE_GLOW)
            };
            surface.fill_circle(p.position, config.point_radius, color, glow);
        }

        self.draw_connections(surface);
        self.frames += 1;
        true
    }

    fn draw_connections<S: Surface + ?Sized>(&self, surface: &mut S) {
        let radius = self.config.connection_radius;
        if radius <= 0.0 || self.config.edge_opacity <= 0.0 {
            return;
        }
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = a.position.distance(b.position);
                let opacity = connection_opacity(distance, radius, self.config.edge_opacity);
                if opacity > 0.0 {
                    let color = self.palette.edge.with_alpha(opacity);
                    surface.stroke_line(a.position, b.position, color);
                }
            }
        }
    }
}
