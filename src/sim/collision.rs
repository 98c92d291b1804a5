//! Pairwise collision detection and response
//!
//! One sweep per tick over every unordered pair (i < j), ascending. Pairs
//! see the positions and velocities left behind by earlier pairs in the same
//! sweep; nothing is re-checked. The response is a damped velocity swap, not
//! an elastic impulse: mass and the normal/tangential split are ignored.

use glam::DVec2;

use super::state::Particle;
use crate::settings::{CollisionThreshold, FieldConfig};
use crate::unit_from_angle;

/// Overlap between two particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first particle's center toward the second's
    pub normal: DVec2,
    /// Distance each particle is pushed (half the total penetration)
    pub overlap: f64,
}

/// Separation below which `a` and `b` collide
#[inline]
pub fn threshold(a: &Particle, b: &Particle, config: &FieldConfig) -> f64 {
    match config.collision_threshold {
        CollisionThreshold::RadiusSum => a.radius + b.radius,
        CollisionThreshold::Diameter => config.size,
    }
}

/// Check whether two particles overlap
///
/// Coincident centers give `atan2(0, 0) = 0`, i.e. a push along +x.
pub fn contact(a: &Particle, b: &Particle, threshold: f64) -> Option<Contact> {
    let d = b.center() - a.center();
    let distance = d.length();
    if distance >= threshold {
        return None;
    }

    let angle = d.y.atan2(d.x);
    Some(Contact {
        normal: unit_from_angle(angle),
        overlap: (threshold - distance) / 2.0,
    })
}

/// Push the pair apart symmetrically and swap their damped velocities
pub fn resolve_pair(a: &mut Particle, b: &mut Particle, contact: Contact, damping: f64) {
    let push = contact.normal * contact.overlap;
    a.pos -= push;
    b.pos += push;

    let (va, vb) = (a.vel, b.vel);
    a.vel = vb * damping;
    b.vel = va * damping;
}

/// Resolve every overlapping pair once; returns the number of contacts
pub fn resolve(particles: &mut [Particle], config: &FieldConfig) -> usize {
    let mut contacts = 0;
    let n = particles.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = particles.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);

            let limit = threshold(a, b, config);
            if let Some(hit) = contact(a, b, limit) {
                resolve_pair(a, b, hit, config.bounce_damping);
                contacts += 1;
            }
        }
    }

    contacts
}
