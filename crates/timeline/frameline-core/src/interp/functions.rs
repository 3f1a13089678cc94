//! Interpolation helpers:
//! - step_value (discrete hold-then-switch)
//! - blend_number (numeric part blended, unit reattached)
//! - blend_value (dispatch on value kind, composites component-wise)
//!
//! Blends return `None` when the endpoint shapes do not line up; callers hold
//! the previous value in that case.

use crate::value::{Composite, Number, Value};

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Step interpolation: hold `prev` until `time` reaches `next_time`.
#[inline]
pub fn step_value(prev: &Value, next: &Value, time: f64, next_time: f64) -> Value {
    if time >= next_time {
        next.clone()
    } else {
        prev.clone()
    }
}

/// Units must match unless one side is unitless; the starting endpoint's unit wins.
pub fn blend_number(a: &Number, b: &Number, t: f64) -> Option<Number> {
    let unit = if a.unit == b.unit || b.unit.is_empty() {
        a.unit.clone()
    } else if a.unit.is_empty() {
        b.unit.clone()
    } else {
        return None;
    };
    Some(Number {
        value: lerp_f64(a.value, b.value, t),
        unit,
    })
}

/// Component-wise blend. The endpoint with more components provides the layout;
/// components present on only one side pass through unchanged.
pub fn blend_composite(a: &Composite, b: &Composite, t: f64) -> Option<Composite> {
    if !a.same_shape(b) {
        return None;
    }
    let template = if a.arity() > b.arity() { a } else { b };
    let mut components = Vec::with_capacity(template.arity());
    for i in 0..template.arity() {
        let component = match (a.components.get(i), b.components.get(i)) {
            (Some(ca), Some(cb)) => blend_component(ca, cb, t)?,
            (Some(only), None) | (None, Some(only)) => only.clone(),
            (None, None) => continue,
        };
        components.push(component);
    }
    Some(Composite {
        name: template.name.clone(),
        separator: template.separator.clone(),
        components,
    })
}

fn blend_component(a: &Value, b: &Value, t: f64) -> Option<Value> {
    match (a, b) {
        (Value::Number(na), Value::Number(nb)) => blend_number(na, nb, t).map(Value::Number),
        (Value::Composite(ca), Value::Composite(cb)) => {
            blend_composite(ca, cb, t).map(Value::Composite)
        }
        // non-numeric tokens come from the later endpoint
        (_, Value::Text(_)) | (Value::Text(_), _) => Some(b.clone()),
        _ => None,
    }
}

/// Blend across value kinds at eased position `t`.
pub fn blend_value(a: &Value, b: &Value, t: f64) -> Option<Value> {
    match (a, b) {
        (Value::Number(na), Value::Number(nb)) => blend_number(na, nb, t).map(Value::Number),
        (Value::Composite(ca), Value::Composite(cb)) => {
            blend_composite(ca, cb, t).map(Value::Composite)
        }
        _ => None,
    }
}
