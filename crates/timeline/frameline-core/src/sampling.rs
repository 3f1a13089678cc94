//! Bracket lookup and snapshot synthesis over a [`Keyframes`] collection.
//!
//! Model:
//! - `nearest(t)` returns the indices of the keys bracketing `t`; an exact key
//!   yields `(i, i)`, times outside the keyed range clamp to the first/last key.
//! - `snapshot(t)` resolves every registered path independently: the closest
//!   frame defining it at or before the left bracket, the closest at or after
//!   the right bracket, blended by the interpolator.
//! - The timing channel is never blended. Its value is held from the left and
//!   selects the easing for that instant.

use log::warn;

use crate::config::round_time;
use crate::frame::Frame;
use crate::interp::{interpolate, Easing, Endpoint};
use crate::keyframes::Keyframes;
use crate::path::PropertyPath;
use crate::state::TimelineState;
use crate::value::Value;

/// Indices `(left, right)` of the keys bracketing `time`, or `None` when empty.
///
/// Binary search over the ascending keys; same result as the linear scan:
/// - exact key `i`: `(i, i)`
/// - left: greatest key `< time`, or 0 when there is none
/// - right: smallest key `>= time`, or the last index when there is none
pub fn nearest(keyframes: &Keyframes, time: f64) -> Option<(usize, usize)> {
    let n = keyframes.len();
    if n == 0 {
        return None;
    }
    let time = round_time(time);
    let times: Vec<f64> = keyframes.times().collect();
    let p = times.partition_point(|k| *k < time);
    if p < n && times[p] == time {
        return Some((p, p));
    }
    let left = p.saturating_sub(1);
    let right = p.min(n - 1);
    Some((left, right))
}

fn find_backward<'a>(
    keyframes: &'a Keyframes,
    from: usize,
    path: &PropertyPath,
) -> Option<Endpoint<'a>> {
    (0..=from).rev().find_map(|i| {
        let (time, frame) = keyframes.entry(i)?;
        frame.value(path).map(|v| Endpoint::new(time, v))
    })
}

fn find_forward<'a>(
    keyframes: &'a Keyframes,
    from: usize,
    path: &PropertyPath,
) -> Option<Endpoint<'a>> {
    (from..keyframes.len()).find_map(|i| {
        let (time, frame) = keyframes.entry(i)?;
        frame.value(path).map(|v| Endpoint::new(time, v))
    })
}

/// Easing named by a held timing-channel value; unparsable text is ignored.
fn channel_easing(value: &Value) -> Option<Easing> {
    let text = value.to_string();
    match text.parse::<Easing>() {
        Ok(easing) => Some(easing),
        Err(err) => {
            warn!("sampling: ignoring timing function '{text}': {err}");
            None
        }
    }
}

/// Resolve a fresh frame at `time`.
///
/// Easing precedence: `easing` argument, then the timing channel held at
/// `time`, then `state.easing`. Paths defined on neither side are omitted.
pub fn snapshot(
    keyframes: &Keyframes,
    state: &TimelineState,
    time: f64,
    easing: Option<&Easing>,
) -> Frame {
    let mut out = Frame::new();
    let Some((left, right)) = nearest(keyframes, time) else {
        return out;
    };
    let channel = PropertyPath::from(state.timing_channel.as_str());
    let held_channel = keyframes
        .names()
        .contains(&channel)
        .then(|| find_backward(keyframes, left, &channel))
        .flatten();

    let easing = match (easing, held_channel) {
        (Some(explicit), _) => *explicit,
        (None, Some(held)) => channel_easing(held.value).unwrap_or(state.easing),
        (None, None) => state.easing,
    };
    if let Some(held) = held_channel {
        out.set(&channel, held.value.clone());
    }

    for path in keyframes.names() {
        if *path == channel {
            continue;
        }
        let prev = find_backward(keyframes, left, path);
        let next = find_forward(keyframes, right, path);
        if let Some(value) = interpolate(prev, next, time, &easing) {
            out.set(path, value);
        }
    }
    out
}
