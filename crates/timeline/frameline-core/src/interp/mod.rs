//! Interpolator: blends one property between the two keyframes that bracket a time.
//!
//! Rules, in order:
//! - only one endpoint defined: return it verbatim
//! - both defined and equal: return it (easing not evaluated)
//! - a text endpoint: step, switching exactly at the later key time
//! - numbers and composites: blend at `easing((t - t0) / (t1 - t0))`
//! - shapes that do not line up: hold the earlier value

pub mod easing;
pub mod functions;

pub use easing::{Easing, StepPosition};

use crate::value::Value;
use functions::{blend_value, step_value};

/// A keyframe time together with the value one property has there.
#[derive(Clone, Copy, Debug)]
pub struct Endpoint<'a> {
    pub time: f64,
    pub value: &'a Value,
}

impl<'a> Endpoint<'a> {
    pub fn new(time: f64, value: &'a Value) -> Self {
        Self { time, value }
    }
}

/// Compute the value at `time` between `prev` and `next`.
///
/// Returns `None` only when neither endpoint is defined.
pub fn interpolate(
    prev: Option<Endpoint<'_>>,
    next: Option<Endpoint<'_>>,
    time: f64,
    easing: &Easing,
) -> Option<Value> {
    let (prev, next) = match (prev, next) {
        (None, None) => return None,
        (Some(only), None) | (None, Some(only)) => return Some(only.value.clone()),
        (Some(p), Some(n)) => (p, n),
    };
    if prev.value == next.value {
        return Some(prev.value.clone());
    }
    if matches!(prev.value, Value::Text(_)) || matches!(next.value, Value::Text(_)) {
        return Some(step_value(prev.value, next.value, time, next.time));
    }
    let span = next.time - prev.time;
    if span <= 0.0 {
        return Some(step_value(prev.value, next.value, time, next.time));
    }
    let ratio = ((time - prev.time) / span).clamp(0.0, 1.0);
    let eased = easing.apply(ratio);
    Some(blend_value(prev.value, next.value, eased).unwrap_or_else(|| prev.value.clone()))
}
