//! Keyframes: ordered (time, Frame) pairs with cached duration and name registry.
//!
//! Times are unique and kept ascending. `duration` and `names` are derived state
//! that only changes on [`Keyframes::refresh`] / [`Keyframes::refresh_frame`];
//! callers that mutate keys must refresh before relying on them.

use indexmap::IndexSet;
use log::debug;

use crate::config::round_time;
use crate::frame::Frame;
use crate::path::PropertyPath;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Keyframes {
    items: Vec<(f64, Frame)>,
    duration: f64,
    names: IndexSet<PropertyPath>,
}

impl Keyframes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from unordered pairs and refresh derived state.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, Frame)>) -> Self {
        let mut keyframes = Self::new();
        for (time, frame) in pairs {
            keyframes.add(time, frame);
        }
        keyframes.refresh();
        keyframes
    }

    fn position(&self, time: f64) -> Result<usize, usize> {
        self.items.binary_search_by(|(k, _)| k.total_cmp(&time))
    }

    /// Insert-or-replace the frame at `time`, keeping keys ascending.
    pub fn add(&mut self, time: f64, frame: Frame) -> &mut Self {
        let time = round_time(time);
        match self.position(time) {
            Ok(i) => {
                debug!("keyframes: replacing frame at {time}");
                self.items[i].1 = frame;
            }
            Err(i) => self.items.insert(i, (time, frame)),
        }
        self
    }

    pub fn get(&self, time: f64) -> Option<&Frame> {
        let i = self.position(round_time(time)).ok()?;
        Some(&self.items[i].1)
    }

    pub fn get_mut(&mut self, time: f64) -> Option<&mut Frame> {
        let i = self.position(round_time(time)).ok()?;
        Some(&mut self.items[i].1)
    }

    pub fn has(&self, time: f64) -> bool {
        self.position(round_time(time)).is_ok()
    }

    pub fn remove(&mut self, time: f64) -> Option<Frame> {
        let i = self.position(round_time(time)).ok()?;
        Some(self.items.remove(i).1)
    }

    /// Shift every key by `offset`.
    pub fn unshift(&mut self, offset: f64) -> &mut Self {
        for (time, _) in self.items.iter_mut() {
            *time = round_time(*time + offset);
        }
        self
    }

    /// Recompute `duration` (largest key) and `names` (every leaf path, first-seen order).
    pub fn refresh(&mut self) -> &mut Self {
        self.duration = self.end_time();
        self.names.clear();
        for (_, frame) in &self.items {
            self.names.extend(frame.names());
        }
        debug!(
            "keyframes: refreshed {} keys, duration {}, {} names",
            self.items.len(),
            self.duration,
            self.names.len()
        );
        self
    }

    /// Register the paths of one frame whose property set changed in place.
    pub fn refresh_frame(&mut self, frame: &Frame) -> &mut Self {
        self.names.extend(frame.names());
        self
    }

    /// Replace every key `t > 0` with `t * new_duration / old_duration`.
    ///
    /// Unless both durations are finite and positive the keys are left untouched.
    pub fn rescale(&mut self, new_duration: f64, old_duration: f64) -> &mut Self {
        let positive = |d: f64| d.is_finite() && d > 0.0;
        if !positive(old_duration) || !positive(new_duration) {
            return self;
        }
        let items = std::mem::take(&mut self.items);
        for (time, frame) in items {
            let scaled = if time > 0.0 {
                time * new_duration / old_duration
            } else {
                time
            };
            self.add(scaled, frame);
        }
        self
    }

    /// Place `other` before the current keys: shift ours by `other`'s last key,
    /// then insert copies of its frames. At the junction both frames merge and
    /// our values win.
    pub fn prepend(&mut self, other: &Keyframes) -> &mut Self {
        self.unshift(other.end_time());
        for (time, frame) in &other.items {
            match self.get_mut(*time) {
                Some(existing) => {
                    let mut merged = frame.clone();
                    merged.merge(existing);
                    *existing = merged;
                }
                None => {
                    self.add(*time, frame.clone());
                }
            }
        }
        self
    }

    /// Place `other` after the current keys, shifted by our last key. At the
    /// junction both frames merge and `other`'s values win.
    pub fn append(&mut self, other: &Keyframes) -> &mut Self {
        let offset = self.end_time();
        for (time, frame) in &other.items {
            let time = *time + offset;
            match self.get_mut(time) {
                Some(existing) => {
                    existing.merge(frame);
                }
                None => {
                    self.add(time, frame.clone());
                }
            }
        }
        self
    }

    /// Cached largest key, as of the last refresh.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Cached leaf paths, as of the last refresh.
    pub fn names(&self) -> &IndexSet<PropertyPath> {
        &self.names
    }

    /// Largest key in the live contents, or 0 when empty.
    pub fn end_time(&self) -> f64 {
        self.items.last().map_or(0.0, |(t, _)| *t)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.items.iter().map(|(t, _)| *t)
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &Frame)> + '_ {
        self.items.iter().map(|(t, f)| (*t, f))
    }

    /// Key and frame at index `i` in ascending order.
    pub fn entry(&self, i: usize) -> Option<(f64, &Frame)> {
        self.items.get(i).map(|(t, f)| (*t, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(name: &str, v: f64) -> Frame {
        let mut f = Frame::new();
        f.set(name, v);
        f
    }

    #[test]
    fn add_keeps_order_and_replaces() {
        let mut k = Keyframes::new();
        k.add(1.0, frame("x", 1.0));
        k.add(0.0, frame("x", 0.0));
        k.add(0.5, frame("x", 0.5));
        k.add(1.0, frame("x", 2.0));
        assert_eq!(k.times().collect::<Vec<_>>(), vec![0.0, 0.5, 1.0]);
        assert_eq!(k.get(1.0), Some(&frame("x", 2.0)));
    }

    #[test]
    fn derived_state_is_pull_based() {
        let mut k = Keyframes::new();
        k.add(2.0, frame("x", 1.0));
        assert_eq!(k.duration(), 0.0);
        assert!(k.names().is_empty());
        k.refresh();
        assert_eq!(k.duration(), 2.0);
        assert_eq!(k.names().len(), 1);
    }
}
