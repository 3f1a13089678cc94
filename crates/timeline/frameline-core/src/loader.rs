//! Construction input: JSON keyframe descriptions into [`Keyframes`].
//!
//! Accepted shapes:
//! - object keyed by time: `{"0": {...}, "0.5": {...}}`, or by percentage of
//!   the load duration: `{"0%": {...}, "50%": {...}}`
//! - a numeric value at a key copies the frame already keyed at that time:
//!   `{"0": {...}, "2": 0}`
//! - array of property trees spaced evenly over the load duration
//! - `null` for an empty collection
//!
//! Property trees map names to numbers, `"<number><unit>"` / keyword strings,
//! arrays (space-separated composites) or nested objects (groups).

use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::error::TimelineError;
use crate::frame::{Frame, Node};
use crate::keyframes::Keyframes;
use crate::value::{Composite, Value};
use crate::Result;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadOptions {
    /// Length that percentages and array spacing refer to.
    pub duration: Option<f64>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum TimeKey {
    Absolute(f64),
    Percent(f64),
}

fn parse_time_key(key: &str) -> Result<TimeKey> {
    let text = key.trim();
    let (number, percent) = match text.strip_suffix('%') {
        Some(body) => (body.trim(), true),
        None => (text, false),
    };
    let value = number
        .parse::<f64>()
        .map_err(|_| TimelineError::malformed(key, "expected a number or a percentage"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(TimelineError::malformed(key, "time must be finite and non-negative"));
    }
    Ok(if percent {
        TimeKey::Percent(value)
    } else {
        TimeKey::Absolute(value)
    })
}

/// Load keyframes from parsed JSON.
pub fn load_keyframes(input: &Json, options: &LoadOptions) -> Result<Keyframes> {
    let mut keyframes = Keyframes::new();
    match input {
        Json::Null => {}
        Json::Object(map) => load_object(&mut keyframes, map, options)?,
        Json::Array(items) => load_array(&mut keyframes, items, options),
        other => {
            return Err(TimelineError::malformed(
                "<root>",
                format!("expected an object, an array or null, got {other}"),
            ))
        }
    }
    keyframes.refresh();
    Ok(keyframes)
}

/// Load keyframes from JSON text.
pub fn load_keyframes_str(text: &str, options: &LoadOptions) -> Result<Keyframes> {
    let json: Json = serde_json::from_str(text)?;
    load_keyframes(&json, options)
}

fn load_object(
    keyframes: &mut Keyframes,
    map: &Map<String, Json>,
    options: &LoadOptions,
) -> Result<()> {
    let keys = map
        .iter()
        .map(|(k, v)| Ok((parse_time_key(k)?, v)))
        .collect::<Result<Vec<_>>>()?;

    let base = options.duration.unwrap_or_else(|| {
        let largest = keys
            .iter()
            .filter_map(|(key, _)| match key {
                TimeKey::Absolute(t) => Some(*t),
                TimeKey::Percent(_) => None,
            })
            .fold(0.0_f64, f64::max);
        if largest > 0.0 {
            largest
        } else {
            1.0
        }
    });
    let resolve = |key: TimeKey| match key {
        TimeKey::Absolute(t) => t,
        TimeKey::Percent(p) => base * p / 100.0,
    };

    let mut copies = Vec::new();
    for (key, value) in keys {
        let time = resolve(key);
        match value {
            Json::Object(tree) => {
                keyframes.add(time, frame_from_map(tree));
            }
            Json::Number(n) => match n.as_f64() {
                Some(source) => copies.push((time, source)),
                None => warn!("loader: unreadable copy source at {time}"),
            },
            Json::Null => {}
            other => warn!("loader: ignoring non-object keyframe at {time}: {other}"),
        }
    }
    copies.sort_by(|a, b| a.0.total_cmp(&b.0));
    for (time, source) in copies {
        match keyframes.get(source) {
            Some(frame) => {
                let frame = frame.clone();
                keyframes.add(time, frame);
            }
            None => warn!("loader: no frame at {source} to copy to {time}"),
        }
    }
    Ok(())
}

fn load_array(keyframes: &mut Keyframes, items: &[Json], options: &LoadOptions) {
    let duration = options.duration.unwrap_or(1.0);
    let n = items.len();
    for (i, item) in items.iter().enumerate() {
        let time = if n <= 1 {
            0.0
        } else {
            duration * i as f64 / (n - 1) as f64
        };
        match item {
            Json::Object(tree) => {
                keyframes.add(time, frame_from_map(tree));
            }
            Json::Null => {}
            other => warn!("loader: ignoring non-object array item {i}: {other}"),
        }
    }
}

/// Property tree from a JSON object; `null` entries are skipped.
pub fn frame_from_map(map: &Map<String, Json>) -> Frame {
    Frame::from_properties(group_from_map(map))
}

fn group_from_map(map: &Map<String, Json>) -> IndexMap<String, Node> {
    map.iter()
        .filter_map(|(key, json)| node_from_json(json).map(|node| (key.clone(), node)))
        .collect()
}

fn node_from_json(json: &Json) -> Option<Node> {
    match json {
        Json::Object(map) => Some(Node::Group(group_from_map(map))),
        other => value_from_json(other).map(Node::Value),
    }
}

fn value_from_json(json: &Json) -> Option<Value> {
    match json {
        Json::Null => None,
        Json::Bool(b) => Some(Value::text(b.to_string())),
        Json::Number(n) => n.as_f64().map(Value::num),
        Json::String(s) => Some(Value::parse(s)),
        Json::Array(items) => Some(Value::Composite(Composite::list(
            items.iter().filter_map(value_from_json).collect(),
        ))),
        Json::Object(_) => Some(Value::text(json.to_string())),
    }
}
