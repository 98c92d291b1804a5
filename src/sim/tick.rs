//! Per-tick integration
//!
//! Advances particles one frame at a time. No substepping, no dt: velocities
//! are in pixels per tick.

use glam::DVec2;

use super::state::{Bounds, Particle, ParticleField};
use crate::settings::FieldConfig;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// External steering (device tilt or similar), scaled by `tilt_scale`
    pub tilt: DVec2,
}

impl TickInput {
    pub fn new(fx: f64, fy: f64) -> Self {
        Self {
            tilt: DVec2::new(fx, fy),
        }
    }

    /// Map orientation angles (gamma = left/right, beta = front/back) to tilt
    ///
    /// Missing or NaN readings count as zero tilt.
    pub fn from_orientation(gamma: Option<f64>, beta: Option<f64>) -> Self {
        let reading = |v: Option<f64>| v.filter(|v| !v.is_nan()).unwrap_or(0.0);
        Self::new(reading(gamma), reading(beta))
    }
}

/// Apply the input and advance the field by one tick
pub fn tick(field: &mut ParticleField, input: &TickInput) {
    field.set_external_force(input.tilt.x, input.tilt.y);
    field.step();
}

/// Advance one particle by one tick and keep its box inside `bounds`
///
/// Order matters: gravity, tilt x, tilt y, move, friction, then walls
/// (x low, x high, y low, y high). Every wall check runs unconditionally, so
/// a box larger than the bounds ends up clamped by the high check.
pub fn step_particle(
    particle: Particle,
    bounds: Bounds,
    force: DVec2,
    config: &FieldConfig,
) -> Particle {
    let mut p = particle;
    let size = p.size();

    p.vel.y += config.gravity;
    p.vel.x += force.x * config.tilt_scale;
    p.vel.y += force.y * config.tilt_scale;

    p.pos += p.vel;

    p.vel *= config.friction;

    if p.pos.x < 0.0 {
        p.pos.x = 0.0;
        p.vel.x *= -config.restitution;
    }
    if p.pos.x + size > bounds.width {
        p.pos.x = bounds.width - size;
        p.vel.x *= -config.restitution;
    }
    if p.pos.y < 0.0 {
        p.pos.y = 0.0;
        p.vel.y *= -config.restitution;
    }
    if p.pos.y + size > bounds.height {
        p.pos.y = bounds.height - size;
        p.vel.y *= -config.restitution;
    }

    p
}

/// Integrate every particle with the same force sample
pub fn integrate(particles: &mut [Particle], bounds: Bounds, force: DVec2, config: &FieldConfig) {
    for particle in particles.iter_mut() {
        *particle = step_particle(*particle, bounds, force, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config(gravity: f64, friction: f64, restitution: f64) -> FieldConfig {
        FieldConfig {
            gravity,
            friction,
            restitution,
            ..Default::default()
        }
    }

    fn particle(x: f64, y: f64, dx: f64, dy: f64) -> Particle {
        Particle::new(DVec2::new(x, y), DVec2::new(dx, dy), 20.0)
    }

    #[test]
    fn test_wall_bounce_sign_flip() {
        let cfg = config(0.0, 1.0, 0.6);
        let bounds = Bounds::new(400.0, 400.0);
        let p = step_particle(particle(0.0, 100.0, -2.0, 0.0), bounds, DVec2::ZERO, &cfg);
        assert_eq!(p.pos.x, 0.0);
        assert!((p.vel.x - 2.0 * 0.6).abs() < 1e-12);
        assert!(p.vel.x > 0.0);
    }

    #[test]
    fn test_high_wall_clamp() {
        let cfg = config(0.0, 1.0, 0.5);
        let bounds = Bounds::new(100.0, 100.0);
        let p = step_particle(particle(55.0, 30.0, 10.0, 0.0), bounds, DVec2::ZERO, &cfg);
        assert_eq!(p.pos.x, 60.0);
        assert!((p.vel.x + 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_order_gravity_then_move_then_friction() {
        let cfg = FieldConfig {
            gravity: 0.5,
            tilt_scale: 0.1,
            friction: 0.5,
            ..Default::default()
        };
        let bounds = Bounds::new(1000.0, 1000.0);
        let p = step_particle(
            particle(100.0, 100.0, 1.0, 1.0),
            bounds,
            DVec2::new(10.0, -20.0),
            &cfg,
        );
        // vel = (1 + 1, 1 + 0.5 - 2) = (2, -0.5), moved before friction
        assert!((p.pos.x - 102.0).abs() < 1e-12);
        assert!((p.pos.y - 99.5).abs() < 1e-12);
        assert!((p.vel.x - 1.0).abs() < 1e-12);
        assert!((p.vel.y + 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_resting_on_floor() {
        let cfg = FieldConfig::default();
        let bounds = Bounds::new(200.0, 200.0);
        let mut p = particle(50.0, 0.0, 0.0, 0.0);
        for _ in 0..2000 {
            p = step_particle(p, bounds, DVec2::ZERO, &cfg);
        }
        assert_eq!(p.pos.y, 160.0);
        assert!(p.vel.y.abs() < 1.0);
    }

    #[test]
    fn test_oversized_box_clamped_by_high_check() {
        let cfg = config(0.0, 1.0, 0.5);
        let bounds = Bounds::new(30.0, 30.0);
        let p = step_particle(particle(-5.0, -5.0, 0.0, 0.0), bounds, DVec2::ZERO, &cfg);
        assert_eq!(p.pos, DVec2::new(-10.0, -10.0));
    }

    #[test]
    fn test_from_orientation_defaults_missing() {
        assert_eq!(
            TickInput::from_orientation(None, Some(12.0)),
            TickInput::new(0.0, 12.0)
        );
        assert_eq!(
            TickInput::from_orientation(Some(f64::NAN), None),
            TickInput::default()
        );
    }

    proptest! {
        #[test]
        fn containment_after_every_step(
            x in -200.0f64..600.0,
            y in -200.0f64..600.0,
            dx in -50.0f64..50.0,
            dy in -50.0f64..50.0,
            fx in -90.0f64..90.0,
            fy in -180.0f64..180.0,
            restitution in 0.0f64..0.99,
            friction in 0.01f64..=1.0,
        ) {
            let cfg = FieldConfig {
                restitution,
                friction,
                ..Default::default()
            };
            let bounds = Bounds::new(400.0, 300.0);
            let mut p = particle(x, y, dx, dy);
            for _ in 0..20 {
                p = step_particle(p, bounds, DVec2::new(fx, fy), &cfg);
                prop_assert!(p.pos.x >= 0.0 && p.pos.x <= 360.0, "x = {}", p.pos.x);
                prop_assert!(p.pos.y >= 0.0 && p.pos.y <= 260.0, "y = {}", p.pos.y);
            }
        }

        #[test]
        fn speed_never_grows_without_forcing(
            dx in -5.0f64..5.0,
            dy in -5.0f64..5.0,
            friction in 0.5f64..0.999,
        ) {
            prop_assume!(DVec2::new(dx, dy).length() > 1e-3);
            let cfg = config(0.0, friction, 0.6);
            // Large enough that nothing reaches a wall in 50 ticks
            let bounds = Bounds::new(10_000.0, 10_000.0);
            let mut p = particle(5_000.0, 5_000.0, dx, dy);
            for _ in 0..50 {
                let before = p.vel.length();
                p = step_particle(p, bounds, DVec2::ZERO, &cfg);
                prop_assert!(p.vel.length() < before);
            }
        }
    }
}
