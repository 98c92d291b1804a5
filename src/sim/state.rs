//! Field state and core simulation types
//!
//! The field exclusively owns its particles. Drivers read them through
//! snapshots and feed input through `set_external_force` / `set_bounds`.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::{collision, layout, tick};
use crate::box_center;
use crate::error::FieldError;
use crate::settings::{FieldConfig, ResizePolicy};

/// Width and height of the containing rectangle, origin at top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Reject NaN, infinite or negative extents
    pub fn validate(&self) -> Result<(), FieldError> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(FieldError::InvalidBounds {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Room left for a box of edge `size` on each axis (may be negative)
    #[inline]
    pub fn span_for(&self, size: f64) -> DVec2 {
        DVec2::new(self.width - size, self.height - size)
    }

    /// Whether a box of edge `size` fits on both axes
    pub fn fits(&self, size: f64) -> bool {
        let span = self.span_for(size);
        span.x >= 0.0 && span.y >= 0.0
    }
}

/// A circular body tracked by its bounding box's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Top-left corner of the bounding box (not the centroid)
    pub pos: DVec2,
    /// Pixels per tick
    pub vel: DVec2,
    pub radius: f64,
}

impl Particle {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64) -> Self {
        Self { pos, vel, radius }
    }

    /// Bounding box edge length
    #[inline]
    pub fn size(&self) -> f64 {
        self.radius * 2.0
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        box_center(self.pos, self.radius)
    }

    pub fn view(&self) -> ParticleView {
        ParticleView {
            x: self.pos.x,
            y: self.pos.y,
            radius: self.radius,
        }
    }
}

/// Read-only render snapshot of one particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// A set of same-sized particles inside a rectangle
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    bounds: Bounds,
    /// Stable order; collision pairs are swept by ascending index
    particles: Vec<Particle>,
    /// Last written tilt, sampled once at the start of each tick
    external_force: DVec2,
    /// Seed the layout RNG was created from
    seed: u64,
    rng: Pcg32,
    /// Completed ticks since initialization
    time_ticks: u64,
}

impl ParticleField {
    /// Validate the config and lay out `config.count` particles
    pub fn initialize(bounds: Bounds, config: FieldConfig, seed: u64) -> Result<Self, FieldError> {
        config.validate()?;
        bounds.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let particles = layout::scatter(bounds, &config, &mut rng)?;

        log::info!(
            "Field initialized: {} particles of size {} in {}x{} (seed {})",
            particles.len(),
            config.size,
            bounds.width,
            bounds.height,
            seed
        );

        Ok(Self {
            config,
            bounds,
            particles,
            external_force: DVec2::ZERO,
            seed,
            rng,
            time_ticks: 0,
        })
    }

    /// Build a field around a caller-supplied layout
    ///
    /// Every particle takes the config's radius. `config.count` is ignored.
    pub fn with_particles(
        bounds: Bounds,
        config: FieldConfig,
        particles: impl IntoIterator<Item = (DVec2, DVec2)>,
    ) -> Result<Self, FieldError> {
        config.validate()?;
        bounds.validate()?;

        let radius = config.radius();
        let particles = particles
            .into_iter()
            .map(|(pos, vel)| Particle::new(pos, vel, radius))
            .collect();

        Ok(Self {
            config,
            bounds,
            particles,
            external_force: DVec2::ZERO,
            seed: 0,
            rng: Pcg32::seed_from_u64(0),
            time_ticks: 0,
        })
    }

    /// Apply new bounds using the configured resize policy
    ///
    /// On error the field keeps its previous bounds and particles.
    pub fn set_bounds(&mut self, bounds: Bounds) -> Result<(), FieldError> {
        bounds.validate()?;
        let old = self.bounds;

        match self.config.resize_policy {
            ResizePolicy::Reinitialize => {
                self.particles = layout::scatter(bounds, &self.config, &mut self.rng)?;
                log::info!(
                    "Bounds {}x{} -> {}x{}: reinitialized {} particles",
                    old.width,
                    old.height,
                    bounds.width,
                    bounds.height,
                    self.particles.len()
                );
            }
            ResizePolicy::Rescale => {
                // No clamp here; the next step's wall check pulls stragglers back in
                layout::rescale(&mut self.particles, old, bounds);
                log::info!(
                    "Bounds {}x{} -> {}x{}: rescaled {} particles",
                    old.width,
                    old.height,
                    bounds.width,
                    bounds.height,
                    self.particles.len()
                );
            }
        }

        self.bounds = bounds;
        Ok(())
    }

    /// Store the tilt applied from the next tick on (last write wins)
    pub fn set_external_force(&mut self, fx: f64, fy: f64) {
        self.external_force = DVec2::new(fx, fy);
    }

    /// Integrate every particle, then run one collision sweep
    pub fn step(&mut self) {
        let force = self.external_force;
        tick::integrate(&mut self.particles, self.bounds, force, &self.config);
        let contacts = collision::resolve(&mut self.particles, &self.config);
        if contacts > 0 {
            log::trace!("Tick {}: resolved {} contacts", self.time_ticks, contacts);
        }
        self.time_ticks += 1;
    }

    /// Render snapshot in field order
    pub fn particles(&self) -> Vec<ParticleView> {
        self.particles.iter().map(Particle::view).collect()
    }

    /// Full particle state (position, velocity, radius)
    pub fn bodies(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn external_force(&self) -> DVec2 {
        self.external_force
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{InitialVelocity, Preset};

    fn still_config() -> FieldConfig {
        FieldConfig {
            gravity: 0.0,
            friction: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_initialize_places_count_particles_inside() {
        let bounds = Bounds::new(800.0, 600.0);
        let field = ParticleField::initialize(bounds, FieldConfig::default(), 7).unwrap();
        assert_eq!(field.particles().len(), 25);
        for p in field.particles() {
            assert!(p.x >= 0.0 && p.x <= 800.0 - 40.0);
            assert!(p.y >= 0.0 && p.y <= 600.0 - 40.0);
            assert_eq!(p.radius, 20.0);
        }
        assert!(field.bodies().iter().all(|p| p.vel == DVec2::ZERO));
    }

    #[test]
    fn test_initialize_rejects_bad_config() {
        let bounds = Bounds::new(100.0, 100.0);
        let config = FieldConfig {
            friction: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            ParticleField::initialize(bounds, config, 1),
            Err(FieldError::InvalidFriction(_))
        ));
        assert!(matches!(
            ParticleField::initialize(Bounds::new(-1.0, 10.0), FieldConfig::default(), 1),
            Err(FieldError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let bounds = Bounds::new(640.0, 480.0);
        let config = FieldConfig::from_preset(Preset::Marbles);
        let mut a = ParticleField::initialize(bounds, config.clone(), 42).unwrap();
        let mut b = ParticleField::initialize(bounds, config, 42).unwrap();
        for i in 0..120 {
            let tilt = (i as f64 * 0.1).sin() * 20.0;
            a.set_external_force(tilt, -tilt);
            b.set_external_force(tilt, -tilt);
            a.step();
            b.step();
        }
        assert_eq!(a.bodies(), b.bodies());
        assert_eq!(a.time_ticks(), 120);
    }

    #[test]
    fn test_jitter_velocity_range() {
        let config = FieldConfig {
            initial_velocity: InitialVelocity::Jitter,
            count: 200,
            size: 2.0,
            ..Default::default()
        };
        let field = ParticleField::initialize(Bounds::new(500.0, 500.0), config, 3).unwrap();
        assert!(field.bodies().iter().any(|p| p.vel != DVec2::ZERO));
        for p in field.bodies() {
            assert!(p.vel.x >= -1.0 && p.vel.x < 1.0);
            assert!(p.vel.y >= -1.0 && p.vel.y < 1.0);
        }
    }

    #[test]
    fn test_rescale_transient_then_clamp() {
        let config = FieldConfig {
            resize_policy: ResizePolicy::Rescale,
            ..still_config()
        };
        let mut field = ParticleField::with_particles(
            Bounds::new(100.0, 100.0),
            config,
            [(DVec2::new(90.0, 90.0), DVec2::ZERO)],
        )
        .unwrap();

        field.set_bounds(Bounds::new(50.0, 50.0)).unwrap();
        assert_eq!(field.bodies()[0].pos, DVec2::new(45.0, 45.0));

        field.step();
        assert_eq!(field.bodies()[0].pos, DVec2::new(10.0, 10.0));
    }

    #[test]
    fn test_rescale_keeps_velocity() {
        let config = FieldConfig {
            resize_policy: ResizePolicy::Rescale,
            ..still_config()
        };
        let mut field = ParticleField::with_particles(
            Bounds::new(200.0, 100.0),
            config,
            [(DVec2::new(20.0, 30.0), DVec2::new(1.5, -2.0))],
        )
        .unwrap();
        field.set_bounds(Bounds::new(400.0, 50.0)).unwrap();
        let p = field.bodies()[0];
        assert_eq!(p.pos, DVec2::new(40.0, 15.0));
        assert_eq!(p.vel, DVec2::new(1.5, -2.0));
    }

    #[test]
    fn test_reinitialize_on_resize() {
        let mut field =
            ParticleField::initialize(Bounds::new(1000.0, 1000.0), FieldConfig::default(), 11)
                .unwrap();
        field.set_bounds(Bounds::new(120.0, 90.0)).unwrap();
        assert_eq!(field.bounds(), Bounds::new(120.0, 90.0));
        assert_eq!(field.bodies().len(), 25);
        for p in field.bodies() {
            assert!(p.pos.x >= 0.0 && p.pos.x <= 80.0);
            assert!(p.pos.y >= 0.0 && p.pos.y <= 50.0);
        }
    }

    #[test]
    fn test_failed_resize_keeps_state() {
        let config = FieldConfig {
            count: 4,
            size: 10.0,
            non_overlapping: true,
            max_placement_attempts: Some(50),
            ..Default::default()
        };
        let mut field = ParticleField::initialize(Bounds::new(200.0, 200.0), config, 5).unwrap();
        let before = field.bodies().to_vec();

        let err = field.set_bounds(Bounds::new(12.0, 12.0)).unwrap_err();
        assert!(matches!(err, FieldError::PlacementExhausted { .. }));
        assert_eq!(field.bounds(), Bounds::new(200.0, 200.0));
        assert_eq!(field.bodies(), &before[..]);
    }

    #[test]
    fn test_external_force_last_write_wins() {
        let config = FieldConfig {
            tilt_scale: 0.1,
            ..still_config()
        };
        let mut field = ParticleField::with_particles(
            Bounds::new(1000.0, 1000.0),
            config,
            [(DVec2::new(500.0, 500.0), DVec2::ZERO)],
        )
        .unwrap();
        field.set_external_force(100.0, 0.0);
        field.set_external_force(10.0, -20.0);
        field.step();
        let p = field.bodies()[0];
        assert!((p.vel.x - 1.0).abs() < 1e-12);
        assert!((p.vel.y + 2.0).abs() < 1e-12);
    }
}
