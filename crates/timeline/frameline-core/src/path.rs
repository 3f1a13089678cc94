//! PropertyPath: the ordered key sequence addressing a value inside a Frame.
//!
//! Text form joins segments with '.':
//!   "opacity"             -> ["opacity"]
//!   "transform.translate" -> ["transform", "translate"]
//!   "filter.0"            -> ["filter", "0"]
//! Numeric keys are carried as their decimal text. Converting from `&str` does
//! NOT split on '.', since property names may legally contain dots; use
//! [`PropertyPath::parse`] for the dotted form.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyPath(Vec<String>);

impl PropertyPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Parse the dotted text form. Empty segments are dropped.
    pub fn parse(s: &str) -> Self {
        Self(
            s.split('.')
                .filter(|seg| !seg.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First segment, i.e. the top-level property name.
    pub fn head(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Return a new path with `key` appended.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.into());
        Self(segments)
    }

    pub fn push(&mut self, key: impl Into<String>) {
        self.0.push(key.into());
    }

    /// True when `self` equals `prefix` or lies underneath it.
    pub fn starts_with(&self, prefix: &PropertyPath) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl From<&str> for PropertyPath {
    fn from(s: &str) -> Self {
        Self(vec![s.to_string()])
    }
}

impl From<String> for PropertyPath {
    fn from(s: String) -> Self {
        Self(vec![s])
    }
}

impl From<&PropertyPath> for PropertyPath {
    fn from(p: &PropertyPath) -> Self {
        p.clone()
    }
}

impl From<Vec<String>> for PropertyPath {
    fn from(v: Vec<String>) -> Self {
        Self(v)
    }
}

impl From<&[&str]> for PropertyPath {
    fn from(v: &[&str]) -> Self {
        Self(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PropertyPath {
    fn from(v: [&str; N]) -> Self {
        Self(v.iter().map(|s| s.to_string()).collect())
    }
}

impl Serialize for PropertyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PropertyPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<String>::deserialize(deserializer).map(Self)
    }
}
