//! Numeric configuration for timeline resolution and export.

use serde::{Deserialize, Serialize};

/// Epsilon used to separate otherwise coincident breakpoints.
pub const THRESHOLD: f64 = 0.000_001;

/// Resolution of time keys; keys closer than this are the same key.
pub const TIME_PRECISION: f64 = 0.000_000_001;

/// Reciprocal of [`TIME_PRECISION`]; dividing by an exact integer keeps whole keys exact.
const TIME_SCALE: f64 = 1_000_000_000.0;

/// Sizing and precision knobs for a resolver.
/// Keep this minimal; playback parameters live in `TimelineState`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Offset added to a breakpoint that would collide with its predecessor.
    pub threshold: f64,
    /// Decimal places kept when numbers and percentages are written as text.
    pub decimals: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: THRESHOLD,
            decimals: 6,
        }
    }
}

/// Snap a time to [`TIME_PRECISION`] so that float noise does not create
/// distinct keys.
#[inline]
pub fn round_time(t: f64) -> f64 {
    (t * TIME_SCALE).round() / TIME_SCALE
}

/// Round to `decimals` places and print without trailing zeros.
pub fn format_decimal(v: f64, decimals: u32) -> String {
    let factor = 10f64.powi(decimals as i32);
    let mut rounded = (v * factor).round() / factor;
    if rounded == 0.0 {
        // avoid "-0"
        rounded = 0.0;
    }
    format!("{rounded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_trims_noise() {
        assert_eq!(format_decimal(0.1 + 0.2, 6), "0.3");
        assert_eq!(format_decimal(10.0, 6), "10");
        assert_eq!(format_decimal(-0.0000001, 6), "0");
        assert_eq!(format_decimal(50.00005, 6), "50.00005");
    }

    #[test]
    fn round_time_merges_float_noise() {
        assert_eq!(round_time(0.1 + 0.2), round_time(0.3));
        assert_eq!(round_time(1.0), 1.0);
        assert_eq!(round_time(0.3), 0.3);
    }
}
