//! Browser bindings
//!
//! Exposes the field to the page script, which drives it from
//! `requestAnimationFrame` and `deviceorientation`.

use wasm_bindgen::prelude::*;

use super::flatten_views;
use crate::settings::FieldConfig;
use crate::sim::{Bounds, ParticleField, TickInput};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Tilt Field starting...");
}

fn to_js(err: crate::FieldError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// A particle field owned by the page
#[wasm_bindgen]
pub struct WebField {
    field: ParticleField,
}

#[wasm_bindgen]
impl WebField {
    /// `config_json` may be omitted for defaults; `seed` falls back to the clock
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: f64,
        height: f64,
        config_json: Option<String>,
        seed: Option<f64>,
    ) -> Result<WebField, JsValue> {
        let config = match config_json {
            Some(json) => FieldConfig::from_json(&json).map_err(to_js)?,
            None => FieldConfig::default(),
        };
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        let field =
            ParticleField::initialize(Bounds::new(width, height), config, seed).map_err(to_js)?;
        Ok(WebField { field })
    }

    /// Call from the window resize handler
    pub fn set_bounds(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.field
            .set_bounds(Bounds::new(width, height))
            .map_err(to_js)
    }

    pub fn set_external_force(&mut self, fx: f64, fy: f64) {
        self.field.set_external_force(fx, fy);
    }

    /// Feed raw `DeviceOrientationEvent` gamma/beta (either may be null)
    pub fn set_orientation(&mut self, gamma: Option<f64>, beta: Option<f64>) {
        let input = TickInput::from_orientation(gamma, beta);
        self.field.set_external_force(input.tilt.x, input.tilt.y);
    }

    pub fn step(&mut self) {
        self.field.step();
    }

    /// Flat `[x, y, radius, ...]` in field order, top-left corners
    pub fn particles(&self) -> Vec<f64> {
        flatten_views(&self.field.particles())
    }

    pub fn len(&self) -> usize {
        self.field.bodies().len()
    }

    pub fn is_empty(&self) -> bool {
        self.field.bodies().is_empty()
    }
}
