//! Initial placement and resize handling

use glam::DVec2;
use rand::Rng;

use super::state::{Bounds, Particle};
use crate::box_center;
use crate::error::FieldError;
use crate::settings::{FieldConfig, InitialVelocity};

/// Lay out `config.count` particles uniformly inside `bounds`
///
/// With `non_overlapping`, a candidate whose center lies closer than `size`
/// to any already-placed center is thrown away and re-sampled. Only the
/// insertion-time layout is guaranteed; the field may overlap later.
pub fn scatter<R: Rng + ?Sized>(
    bounds: Bounds,
    config: &FieldConfig,
    rng: &mut R,
) -> Result<Vec<Particle>, FieldError> {
    let size = config.size;
    let radius = config.radius();

    if !bounds.fits(size) {
        log::warn!(
            "Bounds {}x{} are smaller than particle size {}",
            bounds.width,
            bounds.height,
            size
        );
    }

    let mut particles: Vec<Particle> = Vec::with_capacity(config.count);
    let mut total_rejected = 0u64;

    for _ in 0..config.count {
        let mut rejected = 0u32;
        let pos = loop {
            let candidate = sample_position(bounds, size, rng);
            if !config.non_overlapping || !overlaps_any(candidate, radius, size, &particles) {
                break candidate;
            }

            rejected += 1;
            if config.max_placement_attempts.is_some_and(|cap| rejected >= cap) {
                log::warn!(
                    "Gave up placing particle {} of {} after {} attempts",
                    particles.len() + 1,
                    config.count,
                    rejected
                );
                return Err(FieldError::PlacementExhausted {
                    placed: particles.len(),
                    requested: config.count,
                });
            }
        };
        total_rejected += u64::from(rejected);

        let vel = sample_velocity(config.initial_velocity, rng);
        particles.push(Particle::new(pos, vel, radius));
    }

    if total_rejected > 0 {
        log::debug!(
            "Placed {} particles, rejected {} overlapping candidates",
            particles.len(),
            total_rejected
        );
    }

    Ok(particles)
}

/// Uniform top-left corner in [0, width - size) x [0, height - size)
///
/// A negative span collapses to the origin edge; the wall clamp sorts it out.
fn sample_position<R: Rng + ?Sized>(bounds: Bounds, size: f64, rng: &mut R) -> DVec2 {
    let span = bounds.span_for(size).max(DVec2::ZERO);
    let x = rng.random::<f64>() * span.x;
    let y = rng.random::<f64>() * span.y;
    DVec2::new(x, y)
}

fn sample_velocity<R: Rng + ?Sized>(kind: InitialVelocity, rng: &mut R) -> DVec2 {
    match kind {
        InitialVelocity::Rest => DVec2::ZERO,
        InitialVelocity::Jitter => {
            let dx = rng.random::<f64>() * 2.0 - 1.0;
            let dy = rng.random::<f64>() * 2.0 - 1.0;
            DVec2::new(dx, dy)
        }
    }
}

/// Full diameter is the separation threshold, not the radius sum
fn overlaps_any(candidate: DVec2, radius: f64, size: f64, placed: &[Particle]) -> bool {
    let center = box_center(candidate, radius);
    placed
        .iter()
        .any(|p| center.distance(p.center()) < size)
}

/// Per-axis new/old ratio; an old extent of zero leaves that axis unscaled
pub fn scale_factors(old: Bounds, new: Bounds) -> DVec2 {
    let axis = |old: f64, new: f64| if old > 0.0 { new / old } else { 1.0 };
    DVec2::new(axis(old.width, new.width), axis(old.height, new.height))
}

/// Multiply every position by the bounds ratio; velocities are untouched
pub fn rescale(particles: &mut [Particle], old: Bounds, new: Bounds) {
    let scale = scale_factors(old, new);
    for particle in particles.iter_mut() {
        particle.pos *= scale;
    }
}
