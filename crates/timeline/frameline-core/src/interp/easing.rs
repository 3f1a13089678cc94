//! Easing functions: normalized time remapping used between two keyframes.
//!
//! Names and parameters follow CSS timing functions so that the same value can be
//! written into an exported parameter block unchanged.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::config::format_decimal;
use crate::error::TimelineError;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StepPosition {
    Start,
    #[default]
    End,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier(f64, f64, f64, f64),
    Steps(u32, StepPosition),
}

impl Easing {
    /// Control points for the bezier-shaped variants.
    fn control_points(&self) -> Option<[f64; 4]> {
        match *self {
            Easing::Linear | Easing::Steps(..) => None,
            Easing::Ease => Some([0.25, 0.1, 0.25, 1.0]),
            Easing::EaseIn => Some([0.42, 0.0, 1.0, 1.0]),
            Easing::EaseOut => Some([0.0, 0.0, 0.58, 1.0]),
            Easing::EaseInOut => Some([0.42, 0.0, 0.58, 1.0]),
            Easing::CubicBezier(x1, y1, x2, y2) => Some([x1, y1, x2, y2]),
        }
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::Steps(n, position) => steps(t, n.max(1), position),
            _ => match self.control_points() {
                Some([x1, y1, x2, y2]) => cubic_bezier_ease(t, x1, y1, x2, y2),
                None => t,
            },
        }
    }

    /// CSS text form, e.g. `ease-in` or `cubic-bezier(0.1,0.7,1,0.1)`.
    pub fn name(&self) -> String {
        match *self {
            Easing::Linear => "linear".to_string(),
            Easing::Ease => "ease".to_string(),
            Easing::EaseIn => "ease-in".to_string(),
            Easing::EaseOut => "ease-out".to_string(),
            Easing::EaseInOut => "ease-in-out".to_string(),
            Easing::CubicBezier(x1, y1, x2, y2) => format!(
                "cubic-bezier({},{},{},{})",
                format_decimal(x1, 6),
                format_decimal(y1, 6),
                format_decimal(x2, 6),
                format_decimal(y2, 6)
            ),
            Easing::Steps(n, StepPosition::Start) => format!("steps({n}, start)"),
            Easing::Steps(n, StepPosition::End) => format!("steps({n}, end)"),
        }
    }
}

fn steps(t: f64, n: u32, position: StepPosition) -> f64 {
    let n = n as f64;
    let stepped = match position {
        StepPosition::Start => (t * n).ceil() / n,
        StepPosition::End => (t * n).floor() / n,
    };
    stepped.clamp(0.0, 1.0)
}

/// Cubic bezier easing with fixed endpoints (0,0) and (1,1).
///
/// Newton-Raphson on x(p) = t, falling back to bisection when the slope is flat.
fn cubic_bezier_ease(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    if x1 == y1 && x2 == y2 {
        return t;
    }

    let mut p = t;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - t;
        if err.abs() < 1e-9 {
            return bezier_sample(p, y1, y2);
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-9 {
            break;
        }
        p -= err / slope;
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = t;
    for _ in 0..40 {
        let x = bezier_sample(p, x1, x2);
        if (x - t).abs() < 1e-9 {
            break;
        }
        if x < t {
            lo = p;
        } else {
            hi = p;
        }
        p = 0.5 * (lo + hi);
    }
    bezier_sample(p, y1, y2)
}

/// B(p) = 3(1-p)²p·c1 + 3(1-p)p²·c2 + p³
#[inline]
fn bezier_sample(p: f64, c1: f64, c2: f64) -> f64 {
    let a = 1.0 - 3.0 * c2 + 3.0 * c1;
    let b = 3.0 * c2 - 6.0 * c1;
    let c = 3.0 * c1;
    ((a * p + b) * p + c) * p
}

#[inline]
fn bezier_slope(p: f64, c1: f64, c2: f64) -> f64 {
    let a = 1.0 - 3.0 * c2 + 3.0 * c1;
    let b = 3.0 * c2 - 6.0 * c1;
    let c = 3.0 * c1;
    (3.0 * a * p + 2.0 * b) * p + c
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Easing {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        let invalid = || TimelineError::invalid_option("easing", format!("unknown easing '{s}'"));
        match text.as_str() {
            "linear" => return Ok(Easing::Linear),
            "ease" => return Ok(Easing::Ease),
            "ease-in" => return Ok(Easing::EaseIn),
            "ease-out" => return Ok(Easing::EaseOut),
            "ease-in-out" => return Ok(Easing::EaseInOut),
            "step-start" => return Ok(Easing::Steps(1, StepPosition::Start)),
            "step-end" => return Ok(Easing::Steps(1, StepPosition::End)),
            _ => {}
        }
        let (func, args) = text
            .strip_suffix(')')
            .and_then(|body| body.split_once('('))
            .ok_or_else(invalid)?;
        let args: Vec<&str> = args.split(',').map(str::trim).collect();
        match func.trim() {
            "cubic-bezier" => {
                let nums = args
                    .iter()
                    .map(|a| a.parse::<f64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| invalid())?;
                match nums.as_slice() {
                    [x1, y1, x2, y2] if (0.0..=1.0).contains(x1) && (0.0..=1.0).contains(x2) => {
                        Ok(Easing::CubicBezier(*x1, *y1, *x2, *y2))
                    }
                    _ => Err(invalid()),
                }
            }
            "steps" => {
                let n = args
                    .first()
                    .and_then(|a| a.parse::<u32>().ok())
                    .filter(|n| *n > 0)
                    .ok_or_else(invalid)?;
                let position = match args.get(1).copied() {
                    None | Some("end") | Some("jump-end") => StepPosition::End,
                    Some("start") | Some("jump-start") => StepPosition::Start,
                    Some(_) => return Err(invalid()),
                };
                Ok(Easing::Steps(n, position))
            }
            _ => Err(invalid()),
        }
    }
}

impl Serialize for Easing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

impl<'de> Deserialize<'de> for Easing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
