//! Platform abstraction layer
//!
//! The browser driver owns the canvas, the animation frame loop and the
//! orientation listener. It talks to the field through `web::WebField`.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::ParticleView;

/// Values per particle in a flattened snapshot
pub const FLOATS_PER_PARTICLE: usize = 3;

/// Pack a snapshot as `[x, y, radius, x, y, radius, ...]` for a JS typed array
pub fn flatten_views(views: &[ParticleView]) -> Vec<f64> {
    let mut out = Vec::with_capacity(views.len() * FLOATS_PER_PARTICLE);
    for v in views {
        out.extend_from_slice(&[v.x, v.y, v.radius]);
    }
    out
}
