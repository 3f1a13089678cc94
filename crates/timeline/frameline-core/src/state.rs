//! Per-item playback configuration and the local-time mapping derived from it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::config::format_decimal;
use crate::error::TimelineError;
use crate::interp::Easing;
use crate::Result;

/// Property whose held value overrides the easing between two keyframes.
pub const DEFAULT_TIMING_CHANNEL: &str = "animation-timing-function";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    Normal,
    Reverse,
    Alternate,
    AlternateReverse,
}

impl Direction {
    /// Whether iteration `i` (0-based) plays time-reversed.
    #[inline]
    pub fn is_reverse(self, i: u64) -> bool {
        match self {
            Direction::Normal => false,
            Direction::Reverse => true,
            Direction::Alternate => i % 2 == 1,
            Direction::AlternateReverse => i % 2 == 0,
        }
    }

    #[inline]
    pub fn alternates(self) -> bool {
        matches!(self, Direction::Alternate | Direction::AlternateReverse)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Normal => "normal",
            Direction::Reverse => "reverse",
            Direction::Alternate => "alternate",
            Direction::AlternateReverse => "alternate-reverse",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the item keeps its first/last state outside the active interval.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillMode {
    None,
    #[default]
    Forwards,
    Backwards,
    Both,
}

impl FillMode {
    #[inline]
    pub fn fills_backwards(self) -> bool {
        matches!(self, FillMode::Backwards | FillMode::Both)
    }

    #[inline]
    pub fn fills_forwards(self) -> bool {
        matches!(self, FillMode::Forwards | FillMode::Both)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FillMode::None => "none",
            FillMode::Forwards => "forwards",
            FillMode::Backwards => "backwards",
            FillMode::Both => "both",
        }
    }
}

impl fmt::Display for FillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A positive repeat count, or `infinite`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum IterationCount {
    Finite(f64),
    Infinite,
}

impl Default for IterationCount {
    fn default() -> Self {
        IterationCount::Finite(1.0)
    }
}

impl IterationCount {
    /// Numeric count; `f64::INFINITY` for [`IterationCount::Infinite`].
    #[inline]
    pub fn count(self) -> f64 {
        match self {
            IterationCount::Finite(n) => n,
            IterationCount::Infinite => f64::INFINITY,
        }
    }

    #[inline]
    pub fn is_infinite(self) -> bool {
        matches!(self, IterationCount::Infinite)
    }
}

impl fmt::Display for IterationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IterationCount::Finite(n) => f.write_str(&format_decimal(*n, 6)),
            IterationCount::Infinite => f.write_str("infinite"),
        }
    }
}

impl FromStr for IterationCount {
    type Err = TimelineError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("infinite") {
            return Ok(IterationCount::Infinite);
        }
        s.parse::<f64>()
            .map(IterationCount::Finite)
            .map_err(|_| TimelineError::invalid_option("iterationCount", format!("'{s}'")))
    }
}

impl Serialize for IterationCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            IterationCount::Finite(n) => serializer.serialize_f64(*n),
            IterationCount::Infinite => serializer.serialize_str("infinite"),
        }
    }
}

impl<'de> Deserialize<'de> for IterationCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(IterationCount::Finite(n)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Playback parameters of one timeline. Read-only while a resolution call runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineState {
    /// Identifier written into exports. Assigned by the resolver when absent.
    pub name: Option<String>,
    pub duration: f64,
    pub delay: f64,
    pub play_speed: f64,
    pub easing: Easing,
    pub direction: Direction,
    pub iteration_count: IterationCount,
    pub fill_mode: FillMode,
    pub timing_channel: String,
}

impl Default for TimelineState {
    fn default() -> Self {
        Self {
            name: None,
            duration: 0.0,
            delay: 0.0,
            play_speed: 1.0,
            easing: Easing::Linear,
            direction: Direction::Normal,
            iteration_count: IterationCount::default(),
            fill_mode: FillMode::default(),
            timing_channel: DEFAULT_TIMING_CHANNEL.to_string(),
        }
    }
}

/// Partial update for [`TimelineState`]; absent fields keep their current value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineOptions {
    pub name: Option<String>,
    pub duration: Option<f64>,
    pub delay: Option<f64>,
    pub play_speed: Option<f64>,
    #[serde(alias = "timingFunction")]
    pub easing: Option<Easing>,
    pub direction: Option<Direction>,
    pub iteration_count: Option<IterationCount>,
    pub fill_mode: Option<FillMode>,
    pub timing_channel: Option<String>,
}

fn check(name: &str, ok: bool, reason: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(TimelineError::invalid_option(name, reason))
    }
}

impl TimelineOptions {
    pub fn validate(&self) -> Result<()> {
        if let Some(d) = self.duration {
            check("duration", d.is_finite() && d >= 0.0, "must be a finite non-negative number")?;
        }
        if let Some(d) = self.delay {
            check("delay", d.is_finite() && d >= 0.0, "must be a finite non-negative number")?;
        }
        if let Some(s) = self.play_speed {
            check("playSpeed", s.is_finite() && s > 0.0, "must be a finite positive number")?;
        }
        if let Some(IterationCount::Finite(n)) = self.iteration_count {
            check(
                "iterationCount",
                n.is_finite() && n > 0.0,
                "must be positive or 'infinite'",
            )?;
        }
        if let Some(channel) = &self.timing_channel {
            check("timingChannel", !channel.is_empty(), "must not be empty")?;
        }
        Ok(())
    }
}

impl TimelineState {
    /// Validate `options` and apply every present field. Nothing is applied on error.
    pub fn merge(&mut self, options: &TimelineOptions) -> Result<()> {
        options.validate()?;
        if let Some(name) = &options.name {
            self.name = Some(name.clone());
        }
        if let Some(d) = options.duration {
            self.duration = d;
        }
        if let Some(d) = options.delay {
            self.delay = d;
        }
        if let Some(s) = options.play_speed {
            self.play_speed = s;
        }
        if let Some(e) = options.easing {
            self.easing = e;
        }
        if let Some(d) = options.direction {
            self.direction = d;
        }
        if let Some(n) = options.iteration_count {
            self.iteration_count = n;
        }
        if let Some(f) = options.fill_mode {
            self.fill_mode = f;
        }
        if let Some(channel) = &options.timing_channel {
            self.timing_channel = channel.clone();
        }
        Ok(())
    }

    #[inline]
    pub fn is_reverse(&self, i: u64) -> bool {
        self.direction.is_reverse(i)
    }

    /// Local keyframe time of the final state, after `iteration_count` cycles.
    pub fn end_local_time(&self) -> f64 {
        let d = self.duration;
        let count = self.iteration_count.count();
        if !count.is_finite() {
            return if self.is_reverse(0) { 0.0 } else { d };
        }
        let whole = count.floor();
        let frac = count - whole;
        if frac == 0.0 {
            let last = (whole as u64).saturating_sub(1);
            if self.is_reverse(last) {
                0.0
            } else {
                d
            }
        } else if self.is_reverse(whole as u64) {
            d * (1.0 - frac)
        } else {
            d * frac
        }
    }

    /// Map a host clock time to a local keyframe time.
    ///
    /// `None` means the item is unstyled at that moment: before the delay
    /// without a backwards fill, or after the last cycle without a forwards fill.
    pub fn local_time(&self, current_time: f64) -> Option<f64> {
        let d = self.duration;
        let active = current_time * self.play_speed - self.delay;
        if active < 0.0 {
            if !self.fill_mode.fills_backwards() {
                return None;
            }
            return Some(if self.is_reverse(0) { d } else { 0.0 });
        }
        if d <= 0.0 {
            return Some(0.0);
        }
        let span = d * self.iteration_count.count();
        if active >= span {
            return self.fill_mode.fills_forwards().then(|| self.end_local_time());
        }
        let i = (active / d).floor();
        let within = active - i * d;
        Some(if self.is_reverse(i as u64) { d - within } else { within })
    }
}
