//! Particle records and their randomized initial state.

use std::f32::consts::TAU;

use plexus_core::{FieldConfig, SurfaceSize, Vec2};
use rand::Rng;

/// State for a single particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Current position in logical pixels.
    pub position: Vec2,
    /// Displacement per frame.
    pub velocity: Vec2,
    /// Flagged once at creation; pulses red when drawn.
    pub at_risk: bool,
    /// Pulse phase in radians, advanced every frame.
    pub phase: f32,
}

impl Particle {
    /// Move by one frame of velocity, flipping the velocity on any axis
    /// whose new coordinate left `[0, extent]`. The position is not clamped.
    pub fn advance(&mut self, size: SurfaceSize) {
        self.position += self.velocity;
        if self.position.x < 0.0 || self.position.x > size.width {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > size.height {
            self.velocity.y = -self.velocity.y;
        }
    }

    /// Push away from `pointer` when closer than `radius`.
    pub fn repel(&mut self, pointer: Vec2, radius: f32, strength: f32) {
        let offset = pointer - self.position;
        if offset.length() < radius {
            self.position -= offset * strength;
        }
    }

    /// Pulse intensity in `[0, 1]`.
    pub fn pulse(&self) -> f32 {
        0.5 + 0.5 * self.phase.sin()
    }
}

/// Create `count` particles uniformly spread over `size`.
pub fn spawn<R: Rng + ?Sized>(
    count: usize,
    size: SurfaceSize,
    config: &FieldConfig,
    rng: &mut R,
) -> Vec<Particle> {
    let extent = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
    let (width, height) = (extent(size.width), extent(size.height));
    let speed = config.speed_range;

    (0..count)
        .map(|_| Particle {
            position: Vec2::new(uniform(rng, 0.0, width), uniform(rng, 0.0, height)),
            velocity: Vec2::new(uniform(rng, -speed, speed), uniform(rng, -speed, speed)),
            at_risk: config
                .risk_fraction
                .is_some_and(|p| rng.gen_bool(p.clamp(0.0, 1.0))),
            phase: uniform(rng, 0.0, TAU),
        })
        .collect()
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn particle(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
            at_risk: false,
            phase: 0.0,
        }
    }

    #[test]
    fn test_spawn_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let size = SurfaceSize::new(400.0, 300.0);
        let particles = spawn(200, size, &FieldConfig::plexus(), &mut rng);
        assert_eq!(particles.len(), 200);
        for p in &particles {
            assert!(size.contains(p.position));
            assert!(p.velocity.x.abs() <= 0.15);
            assert!(p.velocity.y.abs() <= 0.15);
            assert!((0.0..TAU).contains(&p.phase));
            assert!(!p.at_risk);
        }
    }

    #[test]
    fn test_spawn_on_empty_surface() {
        let mut rng = StdRng::seed_from_u64(7);
        let particles = spawn(10, SurfaceSize::new(0.0, -5.0), &FieldConfig::plexus(), &mut rng);
        assert_eq!(particles.len(), 10);
        assert!(particles.iter().all(|p| p.position == Vec2::ZERO));
    }

    #[test]
    fn test_static_particles_have_no_velocity() {
        let mut rng = StdRng::seed_from_u64(1);
        let particles = spawn(
            20,
            SurfaceSize::new(400.0, 300.0),
            &FieldConfig::risk_panel(),
            &mut rng,
        );
        assert!(particles.iter().all(|p| p.velocity == Vec2::ZERO));
    }

    #[test]
    fn test_risk_fraction_extremes() {
        let mut rng = StdRng::seed_from_u64(3);
        let size = SurfaceSize::new(100.0, 100.0);
        let all = FieldConfig {
            risk_fraction: Some(1.0),
            ..FieldConfig::risk_panel()
        };
        let none = FieldConfig {
            risk_fraction: Some(0.0),
            ..FieldConfig::risk_panel()
        };
        assert!(spawn(50, size, &all, &mut rng).iter().all(|p| p.at_risk));
        assert!(spawn(50, size, &none, &mut rng).iter().all(|p| !p.at_risk));
    }

    #[test]
    fn test_advance_reflects_without_clamping() {
        let size = SurfaceSize::new(100.0, 100.0);
        let mut p = particle(99.9, 50.0, 0.3, 0.0);
        p.advance(size);
        assert!(p.position.x > 100.0);
        assert_eq!(p.velocity.x, -0.3);

        p.advance(size);
        assert!(p.position.x <= 100.0);
        assert_eq!(p.velocity.x, -0.3);

        let mut p = particle(50.0, 0.1, 0.0, -0.2);
        p.advance(size);
        assert!(p.position.y < 0.0);
        assert_eq!(p.velocity.y, 0.2);
    }

    #[test]
    fn test_reflection_keeps_speed() {
        let size = SurfaceSize::new(10.0, 10.0);
        let mut p = particle(5.0, 5.0, 0.7, -0.4);
        let speed = p.velocity.length();
        for _ in 0..1000 {
            p.advance(size);
        }
        assert_eq!(p.velocity.length(), speed);
    }

    #[test]
    fn test_repel_pushes_away() {
        let mut p = particle(100.0, 100.0, 0.0, 0.0);
        p.repel(Vec2::new(110.0, 100.0), 120.0, 0.5);
        assert_eq!(p.position, Vec2::new(95.0, 100.0));

        // outside the radius nothing happens
        let mut far = particle(100.0, 100.0, 0.0, 0.0);
        far.repel(Vec2::new(300.0, 100.0), 120.0, 0.5);
        assert_eq!(far.position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_pulse_range() {
        let mut p = particle(0.0, 0.0, 0.0, 0.0);
        for i in 0..100 {
            p.phase = i as f32 * 0.37;
            assert!((0.0..=1.0).contains(&p.pulse()));
        }
    }
}
