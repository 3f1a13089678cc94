//! TimelineResolver: one keyframe collection plus its playback state.
//!
//! Queries (`nearest`, `snapshot`, `enumerate`, `to_export`) are pure functions
//! of `(keyframes, state, time)`; the only cache is the per-call frame cache used
//! while enumerating. Cloning a resolver deep-copies both collections.

use log::debug;
use serde::Deserialize;

use crate::baking::{self, Breakpoint};
use crate::config::Config;
use crate::export::{build_export, KeyframesExport};
use crate::frame::Frame;
use crate::ids::{self, IdGenerator};
use crate::interp::Easing;
use crate::keyframes::Keyframes;
use crate::loader::{load_keyframes, LoadOptions};
use crate::sampling;
use crate::sink::SnapshotSink;
use crate::state::{TimelineOptions, TimelineState};
use crate::Result;

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineResolver {
    keyframes: Keyframes,
    state: TimelineState,
    config: Config,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    keyframes: serde_json::Value,
    #[serde(default)]
    options: TimelineOptions,
}

impl TimelineResolver {
    /// Build a resolver, drawing its export name from the process-wide generator.
    pub fn new(keyframes: Keyframes, options: TimelineOptions) -> Result<Self> {
        Self::with_id_generator(keyframes, options, ids::global())
    }

    /// Build a resolver; `ids` supplies the export name unless `options.name` is set.
    ///
    /// The cycle length starts at the last key. A `duration` option rescales
    /// the keys to it.
    pub fn with_id_generator(
        mut keyframes: Keyframes,
        options: TimelineOptions,
        ids: &dyn IdGenerator,
    ) -> Result<Self> {
        options.validate()?;
        keyframes.refresh();
        let mut state = TimelineState {
            duration: keyframes.duration(),
            ..Default::default()
        };
        let duration = options.duration;
        state.merge(&TimelineOptions {
            duration: None,
            ..options
        })?;
        if state.name.is_none() {
            state.name = Some(ids.next_id());
        }
        let mut resolver = Self {
            keyframes,
            state,
            config: Config::default(),
        };
        if let Some(d) = duration {
            resolver.set_duration(d);
        }
        Ok(resolver)
    }

    /// Parse JSON keyframes, or an envelope `{"keyframes": ..., "options": {...}}`.
    ///
    /// In an envelope, `options.duration` is the length percentages and arrays
    /// refer to, and becomes the cycle length without rescaling.
    pub fn from_json(text: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        let is_envelope = json
            .as_object()
            .is_some_and(|map| map.contains_key("keyframes"));
        let (input, options) = if is_envelope {
            let envelope: Envelope = serde_json::from_value(json)?;
            (envelope.keyframes, envelope.options)
        } else {
            (json, TimelineOptions::default())
        };
        options.validate()?;
        let load = LoadOptions {
            duration: options.duration,
        };
        let keyframes = load_keyframes(&input, &load)?;
        let mut resolver = Self::new(
            keyframes,
            TimelineOptions {
                duration: None,
                ..options
            },
        )?;
        if let Some(d) = load.duration {
            resolver.state.duration = d.max(resolver.keyframes.duration());
        }
        Ok(resolver)
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn keyframes(&self) -> &Keyframes {
        &self.keyframes
    }

    /// Mutable access to the keys. Call [`TimelineResolver::refresh`] afterwards.
    pub fn keyframes_mut(&mut self) -> &mut Keyframes {
        &mut self.keyframes
    }

    pub fn state(&self) -> &TimelineState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Export name assigned at construction.
    pub fn name(&self) -> &str {
        self.state.name.as_deref().unwrap_or_default()
    }

    /// Cycle length in keyframe time.
    pub fn duration(&self) -> f64 {
        self.state.duration
    }

    /// Merge partial options. A `duration` rescales the keys to it.
    pub fn set_options(&mut self, options: &TimelineOptions) -> Result<()> {
        options.validate()?;
        let duration = options.duration;
        self.state.merge(&TimelineOptions {
            duration: None,
            ..options.clone()
        })?;
        if let Some(d) = duration {
            self.set_duration(d);
        }
        Ok(())
    }

    /// Stretch every key so the cycle becomes `duration` long.
    ///
    /// Only the cycle length changes when either length is not positive, so a
    /// zero duration never collapses the keys onto time 0.
    pub fn set_duration(&mut self, duration: f64) -> &mut Self {
        let old = self.state.duration;
        if old > 0.0 && duration > 0.0 {
            self.keyframes.rescale(duration, old);
            self.keyframes.refresh();
        }
        debug!("resolver: duration {old} -> {duration}");
        self.state.duration = duration;
        self
    }

    /// Re-derive the name registry and extend the cycle to cover the last key.
    pub fn refresh(&mut self) -> &mut Self {
        self.keyframes.refresh();
        if self.keyframes.duration() > self.state.duration {
            self.state.duration = self.keyframes.duration();
        }
        self
    }

    /// Insert `other` before the current keys.
    pub fn prepend(&mut self, other: &Keyframes) -> &mut Self {
        let added = other.end_time();
        self.keyframes.prepend(other);
        self.state.duration += added;
        self.refresh()
    }

    /// Insert `other` after the current keys.
    pub fn append(&mut self, other: &Keyframes) -> &mut Self {
        self.keyframes.append(other);
        self.refresh()
    }

    /// Bracketing key indices for `time`.
    pub fn nearest(&self, time: f64) -> Option<(usize, usize)> {
        sampling::nearest(&self.keyframes, time)
    }

    /// A freshly resolved frame at local `time`.
    pub fn snapshot(&self, time: f64, easing: Option<&Easing>) -> Frame {
        sampling::snapshot(&self.keyframes, &self.state, time, easing)
    }

    pub fn frame_at(&self, time: f64) -> Frame {
        self.snapshot(time, None)
    }

    /// Breakpoints across all iterations, optionally with another cycle length
    /// or another playback state.
    pub fn enumerate(
        &self,
        duration_override: Option<f64>,
        state_override: Option<&TimelineState>,
    ) -> Vec<Breakpoint> {
        let state = state_override.unwrap_or(&self.state);
        baking::enumerate(&self.keyframes, state, &self.config, duration_override)
    }

    /// Export block, or `None` when nothing can be sampled.
    pub fn to_export(&self) -> Option<KeyframesExport> {
        let breakpoints = self.enumerate(None, None);
        build_export(
            self.name(),
            &self.state,
            &self.config,
            &breakpoints,
            self.state.duration,
        )
    }

    /// Export text; empty when there is nothing to export.
    pub fn to_export_text(&self) -> String {
        self.to_export()
            .map(|export| export.to_text(self.config.decimals))
            .unwrap_or_default()
    }

    /// Local keyframe time for a host clock time, `None` while unstyled.
    pub fn local_time(&self, current_time: f64) -> Option<f64> {
        self.state.local_time(current_time)
    }

    /// Hand the snapshot for `current_time` to `sink`. Returns whether it was called.
    pub fn tick(&self, current_time: f64, sink: &mut dyn SnapshotSink) -> bool {
        match self.local_time(current_time) {
            Some(time) => {
                sink.apply_snapshot(&self.snapshot(time, None));
                true
            }
            None => false,
        }
    }
}
