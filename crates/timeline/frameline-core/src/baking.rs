//! Breakpoint enumeration: expands a timeline across its iterations into
//! absolute offsets, each paired with the local time it samples and the
//! resolved frame.
//!
//! - Sample times are the keys clamped to `[0, duration]` plus both ends.
//! - Iteration `i` visits them forwards, or backwards when `is_reverse(i)`.
//! - A breakpoint landing on its predecessor's offset is dropped when both
//!   render identically, otherwise pushed back by `threshold`.
//! - After a direction flip the cycle start always reappears at `+threshold`.
//! - Offsets past `count * duration` are cut; a final breakpoint closes the
//!   run exactly at `count * duration`.

use hashbrown::HashMap;
use log::trace;
use serde::Serialize;

use crate::config::{Config, TIME_PRECISION};
use crate::frame::Frame;
use crate::keyframes::Keyframes;
use crate::sampling::snapshot;
use crate::state::{IterationCount, TimelineState};

/// One sample of the enumerated run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Breakpoint {
    /// Absolute offset from the start of the run.
    pub offset: f64,
    /// Local keyframe time sampled at this offset.
    pub time: f64,
    pub frame: Frame,
}

/// Largest finite iteration count enumerated cycle by cycle. Longer runs bake a
/// single representative cycle, like `infinite`.
pub const MAX_BAKED_ITERATIONS: f64 = 10_000.0;

/// True when every cycle of the run is enumerated.
pub fn bakes_whole_run(count: IterationCount) -> bool {
    matches!(count, IterationCount::Finite(n) if n <= MAX_BAKED_ITERATIONS)
}

/// Iteration count used for enumeration; `infinite` bakes one cycle.
pub fn baked_count(count: IterationCount) -> f64 {
    match count {
        IterationCount::Finite(n) if bakes_whole_run(count) => n,
        _ => 1.0,
    }
}

/// Within-call frame cache keyed by local time.
struct Sampler<'a> {
    keyframes: &'a Keyframes,
    state: &'a TimelineState,
    frames: HashMap<u64, Frame>,
    texts: HashMap<u64, String>,
    decimals: u32,
}

impl<'a> Sampler<'a> {
    fn new(keyframes: &'a Keyframes, state: &'a TimelineState, decimals: u32) -> Self {
        Self {
            keyframes,
            state,
            frames: HashMap::new(),
            texts: HashMap::new(),
            decimals,
        }
    }

    fn resolve(&self, time: f64) -> Frame {
        snapshot(self.keyframes, self.state, time, None)
    }

    fn text(&mut self, time: f64) -> String {
        let key = time.to_bits();
        if let Some(text) = self.texts.get(&key) {
            return text.clone();
        }
        let frame = match self.frames.get(&key) {
            Some(frame) => frame.clone(),
            None => self.resolve(time),
        };
        let text = frame.to_property_text_with(self.decimals);
        self.frames.entry(key).or_insert(frame);
        self.texts.insert(key, text.clone());
        text
    }

    /// Cached frame for `time`, except at boundaries or when the cached frame
    /// holds a composite property; those are resolved again.
    fn frame(&mut self, time: f64, boundary: bool) -> Frame {
        let key = time.to_bits();
        match self.frames.get(&key) {
            Some(cached) if !boundary && !cached.has_composite() => cached.clone(),
            _ => {
                let frame = self.resolve(time);
                self.frames.insert(key, frame.clone());
                frame
            }
        }
    }
}

/// Enumerate breakpoints for `state` over `keyframes`.
///
/// `duration_override` rescales each cycle to that length without touching the
/// keys. Returns an empty sequence when there is nothing to sample.
pub fn enumerate(
    keyframes: &Keyframes,
    state: &TimelineState,
    config: &Config,
    duration_override: Option<f64>,
) -> Vec<Breakpoint> {
    let d = state.duration;
    if !d.is_finite() || d <= 0.0 || keyframes.is_empty() || keyframes.names().is_empty() {
        return Vec::new();
    }
    let cycle = duration_override.filter(|v| *v > 0.0).unwrap_or(d);
    let scale = cycle / d;
    let count = baked_count(state.iteration_count);
    let span = count * cycle;
    let iterations = count.ceil() as u64;

    let mut times: Vec<f64> = Vec::with_capacity(keyframes.len() + 2);
    times.push(0.0);
    times.extend(keyframes.times().map(|t| t.clamp(0.0, d)));
    times.push(d);
    times.sort_by(f64::total_cmp);
    times.dedup();

    let mut sampler = Sampler::new(keyframes, state, config.decimals);
    let mut points: Vec<(f64, f64)> = Vec::new();

    'cycles: for i in 0..iterations {
        let reverse = state.is_reverse(i);
        let flipped = i > 0 && reverse != state.is_reverse(i - 1);
        for j in 0..times.len() {
            let k = if reverse {
                times[times.len() - 1 - j]
            } else {
                times[j]
            };
            let mapped = if reverse { d - k } else { k };
            let mut offset = (i as f64 * d + mapped) * scale;
            if offset - span > TIME_PRECISION {
                break 'cycles;
            }
            if let Some(&(last_offset, last_time)) = points.last() {
                if offset - last_offset <= TIME_PRECISION {
                    let cycle_start = j == 0 && flipped;
                    if !cycle_start && sampler.text(k) == sampler.text(last_time) {
                        trace!("baking: skip duplicate sample {k} at {offset}");
                        continue;
                    }
                    offset = last_offset + config.threshold;
                }
            }
            trace!("baking: breakpoint {offset} samples {k} (cycle {i})");
            points.push((offset, k));
        }
    }

    if let Some(&(last_offset, _)) = points.last() {
        if span - last_offset > TIME_PRECISION {
            let whole = count.floor();
            let frac = count - whole;
            let k = if state.is_reverse(whole as u64) {
                d * (1.0 - frac)
            } else {
                d * frac
            };
            trace!("baking: closing breakpoint {span} samples {k}");
            points.push((span, k));
        }
    }

    let last = points.len().saturating_sub(1);
    points
        .iter()
        .enumerate()
        .map(|(n, &(offset, time))| Breakpoint {
            offset,
            time,
            frame: sampler.frame(time, n == 0 || n == last),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Direction;

    fn line() -> Keyframes {
        let mut a = Frame::new();
        a.set("x", 0.0);
        let mut b = Frame::new();
        b.set("x", 10.0);
        Keyframes::from_pairs([(0.0, a), (1.0, b)])
    }

    fn state(count: IterationCount, direction: Direction) -> TimelineState {
        TimelineState {
            duration: 1.0,
            iteration_count: count,
            direction,
            ..Default::default()
        }
    }

    #[test]
    fn normal_cycles_shift_the_restart() {
        let k = line();
        let s = state(IterationCount::Finite(2.0), Direction::Normal);
        let bps = enumerate(&k, &s, &Config::default(), None);
        let offsets: Vec<f64> = bps.iter().map(|b| b.offset).collect();
        assert_eq!(offsets, vec![0.0, 1.0, 1.0 + Config::default().threshold, 2.0]);
        assert_eq!(bps[2].time, 0.0);
    }

    #[test]
    fn fractional_count_closes_mid_cycle() {
        let k = line();
        let s = state(IterationCount::Finite(1.5), Direction::Normal);
        let bps = enumerate(&k, &s, &Config::default(), None);
        let last = bps.last().unwrap();
        assert_eq!(last.offset, 1.5);
        assert_eq!(last.time, 0.5);
        assert_eq!(last.frame.value("x").and_then(|v| v.as_f64()), Some(5.0));
    }

    #[test]
    fn huge_counts_bake_one_cycle() {
        let k = line();
        let s = state(IterationCount::Finite(1e12), Direction::Alternate);
        let bps = enumerate(&k, &s, &Config::default(), None);
        let offsets: Vec<f64> = bps.iter().map(|b| b.offset).collect();
        assert_eq!(offsets, vec![0.0, 1.0]);
    }

    #[test]
    fn empty_when_nothing_to_sample() {
        let s = state(IterationCount::Finite(1.0), Direction::Normal);
        assert!(enumerate(&Keyframes::new(), &s, &Config::default(), None).is_empty());
    }
}
