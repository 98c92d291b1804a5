//! Field configuration and presets
//!
//! Every tuning constant the integrator and resolver read lives in one
//! `FieldConfig` value that is passed explicitly. Nothing is captured from
//! globals.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::FieldError;

/// How a field reacts when its bounds change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Discard every particle and lay the field out again
    #[default]
    Reinitialize,
    /// Scale positions by new/old per axis, leave velocities alone
    Rescale,
}

/// Distance below which two particles are considered colliding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollisionThreshold {
    /// Sum of the two particles' radii
    #[default]
    RadiusSum,
    /// The field-wide particle size (equal to the radius sum when all sizes match)
    Diameter,
}

/// Starting velocity for freshly placed particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InitialVelocity {
    /// Exactly (0, 0)
    #[default]
    Rest,
    /// Uniform in [-1, 1) per axis
    Jitter,
}

/// Named starting points for a config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Resting apples that reshuffle on resize
    #[default]
    Orchard,
    /// Lively, undamped marbles that keep their layout on resize
    Marbles,
    /// A spread-out crowd placed without overlap
    Crowd,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Orchard => "Orchard",
            Preset::Marbles => "Marbles",
            Preset::Crowd => "Crowd",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "orchard" | "apples" => Some(Preset::Orchard),
            "marbles" => Some(Preset::Marbles),
            "crowd" => Some(Preset::Crowd),
            _ => None,
        }
    }
}

/// Simulation parameters shared by every particle in a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles laid out at initialization
    pub count: usize,
    /// Bounding box edge length of every particle (radius = size / 2)
    pub size: f64,
    /// Reject placements closer than `size` to an already-placed particle
    pub non_overlapping: bool,
    /// Rejected candidates allowed per particle (None = retry forever)
    pub max_placement_attempts: Option<u32>,
    pub initial_velocity: InitialVelocity,

    // === Integration ===
    pub gravity: f64,
    pub tilt_scale: f64,
    /// Multiplicative velocity decay per tick, in (0, 1]
    pub friction: f64,
    /// Wall bounce coefficient, in [0, 1)
    pub restitution: f64,

    // === Collisions ===
    pub collision_threshold: CollisionThreshold,
    /// Scale applied to swapped velocities (1.0 = exact swap)
    pub bounce_damping: f64,

    pub resize_policy: ResizePolicy,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            size: PARTICLE_SIZE,
            non_overlapping: false,
            max_placement_attempts: Some(MAX_PLACEMENT_ATTEMPTS),
            initial_velocity: InitialVelocity::Rest,

            gravity: GRAVITY,
            tilt_scale: TILT_SCALE,
            friction: FRICTION,
            restitution: RESTITUTION,

            collision_threshold: CollisionThreshold::RadiusSum,
            bounce_damping: BOUNCE_DAMPING,

            resize_policy: ResizePolicy::Reinitialize,
        }
    }
}

impl FieldConfig {
    /// Create a config from a preset
    pub fn from_preset(preset: Preset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Overwrite the preset-dependent fields
    pub fn apply_preset(&mut self, preset: Preset) {
        match preset {
            Preset::Orchard => {
                self.tilt_scale = TILT_SCALE;
                self.restitution = RESTITUTION;
                self.friction = FRICTION;
                self.initial_velocity = InitialVelocity::Rest;
                self.collision_threshold = CollisionThreshold::RadiusSum;
                self.bounce_damping = BOUNCE_DAMPING;
                self.resize_policy = ResizePolicy::Reinitialize;
                self.non_overlapping = false;
            }
            Preset::Marbles => {
                self.tilt_scale = 0.1;
                self.restitution = 0.8;
                self.friction = FRICTION;
                self.initial_velocity = InitialVelocity::Jitter;
                self.collision_threshold = CollisionThreshold::Diameter;
                self.bounce_damping = 1.0;
                self.resize_policy = ResizePolicy::Rescale;
                self.non_overlapping = false;
            }
            Preset::Crowd => {
                self.tilt_scale = 0.1;
                self.restitution = 0.4;
                self.friction = 0.99;
                self.initial_velocity = InitialVelocity::Jitter;
                self.collision_threshold = CollisionThreshold::Diameter;
                self.bounce_damping = BOUNCE_DAMPING;
                self.resize_policy = ResizePolicy::Reinitialize;
                self.non_overlapping = true;
            }
        }
    }

    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, FieldError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameters that would corrupt the field
    pub fn validate(&self) -> Result<(), FieldError> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(FieldError::InvalidSize(self.size));
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(FieldError::InvalidFriction(self.friction));
        }
        if !(self.restitution >= 0.0 && self.restitution < 1.0) {
            return Err(FieldError::InvalidRestitution(self.restitution));
        }
        if !self.bounce_damping.is_finite() || self.bounce_damping < 0.0 {
            return Err(FieldError::InvalidDamping(self.bounce_damping));
        }
        for (name, value) in [("gravity", self.gravity), ("tilt_scale", self.tilt_scale)] {
            if !value.is_finite() {
                return Err(FieldError::NonFinite { name, value });
            }
        }
        Ok(())
    }

    /// Particle radius derived from the shared size
    #[inline]
    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }
}
