//! Precondition failures
//!
//! The simulation itself is total over finite floats. These errors are only
//! produced when a caller hands in configuration or bounds that would leave
//! the field in a corrupted state.

use std::fmt;

/// Errors rejected at `initialize`, `set_bounds` or config loading
#[derive(Debug)]
pub enum FieldError {
    /// Particle size must be finite and strictly positive
    InvalidSize(f64),
    /// Friction must lie in (0, 1]
    InvalidFriction(f64),
    /// Restitution must lie in [0, 1)
    InvalidRestitution(f64),
    /// Bounce damping must be finite and non-negative
    InvalidDamping(f64),
    /// A tuning parameter was NaN or infinite
    NonFinite { name: &'static str, value: f64 },
    /// Bounds must be finite and non-negative on both axes
    InvalidBounds { width: f64, height: f64 },
    /// Non-overlapping placement gave up after the configured attempt cap
    PlacementExhausted { placed: usize, requested: usize },
    /// Config JSON could not be parsed
    Config(serde_json::Error),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::InvalidSize(size) => {
                write!(f, "particle size must be finite and > 0, got {size}")
            }
            FieldError::InvalidFriction(friction) => {
                write!(f, "friction must be in (0, 1], got {friction}")
            }
            FieldError::InvalidRestitution(restitution) => {
                write!(f, "restitution must be in [0, 1), got {restitution}")
            }
            FieldError::InvalidDamping(damping) => {
                write!(f, "bounce damping must be finite and >= 0, got {damping}")
            }
            FieldError::NonFinite { name, value } => {
                write!(f, "{name} must be finite, got {value}")
            }
            FieldError::InvalidBounds { width, height } => {
                write!(f, "bounds must be finite and >= 0, got {width}x{height}")
            }
            FieldError::PlacementExhausted { placed, requested } => write!(
                f,
                "could not place particle {} of {requested} without overlap",
                placed + 1
            ),
            FieldError::Config(err) => write!(f, "invalid field config: {err}"),
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FieldError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FieldError {
    fn from(err: serde_json::Error) -> Self {
        FieldError::Config(err)
    }
}
