//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - One fixed tick per frame, no wall-clock dt
//! - Seeded RNG only
//! - Stable iteration order (ascending particle index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod layout;
pub mod state;
pub mod tick;

pub use collision::{Contact, contact, resolve, resolve_pair};
pub use layout::{rescale, scale_factors, scatter};
pub use state::{Bounds, Particle, ParticleField, ParticleView};
pub use tick::{TickInput, integrate, step_particle, tick};
