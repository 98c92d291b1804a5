//! Tilt Field - falling particles steered by device tilt
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integration, wall containment, collisions)
//! - `settings`: Field configuration and presets
//! - `error`: Precondition failures rejected at the API boundary
//! - `platform`: Browser facade for the frame-driven driver

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::FieldError;
pub use settings::{CollisionThreshold, FieldConfig, InitialVelocity, Preset, ResizePolicy};
pub use sim::{Bounds, Particle, ParticleField, ParticleView, TickInput, tick};

use glam::DVec2;

/// Field configuration defaults
pub mod consts {
    /// Downward acceleration added to every particle each tick (pixels/tick²)
    pub const GRAVITY: f64 = 0.5;
    /// Multiplier applied to the external tilt before it becomes acceleration
    pub const TILT_SCALE: f64 = 0.05;
    /// Velocity retained per tick
    pub const FRICTION: f64 = 0.98;
    /// Velocity retained (sign-flipped) on wall contact
    pub const RESTITUTION: f64 = 0.6;
    /// Velocity scale applied to the swapped velocities of a colliding pair
    pub const BOUNCE_DAMPING: f64 = 0.7;

    /// Particle defaults
    pub const PARTICLE_COUNT: usize = 25;
    pub const PARTICLE_SIZE: f64 = 40.0;

    /// Rejected candidates allowed per particle during non-overlapping placement
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;
}

/// Center of an axis-aligned square box given its top-left corner
#[inline]
pub fn box_center(top_left: DVec2, radius: f64) -> DVec2 {
    top_left + DVec2::splat(radius)
}

/// Unit vector for an angle measured from +x
#[inline]
pub fn unit_from_angle(angle: f64) -> DVec2 {
    DVec2::new(angle.cos(), angle.sin())
}
