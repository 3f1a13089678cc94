//! Frame: a property tree holding the value of every animated property at one
//! instant.
//!
//! Leaves are [`Value`]s; named composites (`transform → {translate, rotate}`) are
//! groups. A path resolves to either a leaf or a group, never both. Frames own
//! their whole tree, so `clone()` is a deep copy and two frames never share
//! nested structure.

use indexmap::IndexMap;
use log::debug;
use serde::{Serialize, Serializer};

use crate::config::Config;
use crate::path::PropertyPath;
use crate::value::Value;
use crate::Result;

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Value(Value),
    Group(IndexMap<String, Node>),
}

impl Node {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Node::Value(v) => Some(v),
            Node::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&IndexMap<String, Node>> {
        match self {
            Node::Group(g) => Some(g),
            Node::Value(_) => None,
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match self {
            Node::Value(v) => v.serialize(serializer),
            Node::Group(g) => g.serialize(serializer),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    properties: IndexMap<String, Node>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from an already shaped property tree.
    pub fn from_properties(properties: IndexMap<String, Node>) -> Self {
        Self { properties }
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Top-level properties in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Write a leaf, creating (or replacing leaves with) groups along the way.
    pub fn set(&mut self, path: impl Into<PropertyPath>, value: impl Into<Value>) -> &mut Self {
        self.set_node(path, Node::Value(value.into()))
    }

    /// Write any node at `path`. An empty path is ignored.
    pub fn set_node(&mut self, path: impl Into<PropertyPath>, node: Node) -> &mut Self {
        let path = path.into();
        let Some((last, parents)) = path.segments().split_last() else {
            return self;
        };
        let mut map = &mut self.properties;
        for seg in parents {
            let slot = map
                .entry(seg.clone())
                .or_insert_with(|| Node::Group(IndexMap::new()));
            if let Node::Value(_) = slot {
                debug!("frame: leaf '{seg}' replaced by a group while writing '{path}'");
                *slot = Node::Group(IndexMap::new());
            }
            let Node::Group(g) = slot else {
                return self;
            };
            map = g;
        }
        map.insert(last.clone(), node);
        self
    }

    /// Node registered under `path`, unformatted.
    pub fn raw(&self, path: impl Into<PropertyPath>) -> Option<&Node> {
        let path = path.into();
        let (first, rest) = path.segments().split_first()?;
        let mut node = self.properties.get(first)?;
        for seg in rest {
            node = node.as_group()?.get(seg)?;
        }
        Some(node)
    }

    /// Leaf value at `path`; a group is formatted into its shorthand text.
    pub fn get(&self, path: impl Into<PropertyPath>) -> Option<Value> {
        match self.raw(path)? {
            Node::Value(v) => Some(v.clone()),
            Node::Group(g) => Some(Value::Text(group_text(g, 0, Config::default().decimals))),
        }
    }

    /// Leaf value at `path`, without formatting groups.
    pub fn value(&self, path: impl Into<PropertyPath>) -> Option<&Value> {
        self.raw(path)?.as_value()
    }

    pub fn has(&self, path: impl Into<PropertyPath>) -> bool {
        self.raw(path).is_some()
    }

    /// Delete the subtree at `path`. Groups left empty are pruned.
    pub fn remove(&mut self, path: impl Into<PropertyPath>) -> Option<Node> {
        let path = path.into();
        remove_in(&mut self.properties, path.segments())
    }

    /// Deep-merge `other` into `self`; `other`'s leaves win, groups merge recursively.
    pub fn merge(&mut self, other: &Frame) -> &mut Self {
        merge_into(&mut self.properties, &other.properties);
        self
    }

    /// Paths of every leaf value, in tree order.
    pub fn names(&self) -> Vec<PropertyPath> {
        let mut out = Vec::new();
        collect_names(&self.properties, &PropertyPath::default(), &mut out);
        out
    }

    /// True when any top-level property is a group or a multi-component value.
    pub fn has_composite(&self) -> bool {
        self.properties.values().any(|node| match node {
            Node::Group(_) => true,
            Node::Value(v) => v.is_composite(),
        })
    }

    /// Serialize every property as `name: value;`. Groups collapse into one
    /// shorthand property.
    pub fn to_property_text(&self) -> String {
        self.to_property_text_with(Config::default().decimals)
    }

    pub fn to_property_text_with(&self, decimals: u32) -> String {
        self.properties
            .iter()
            .map(|(name, node)| {
                let text = match node {
                    Node::Value(v) => v.to_text(decimals),
                    Node::Group(g) => group_text(g, 0, decimals),
                };
                format!("{name}: {text};")
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for Frame {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.properties.serialize(serializer)
    }
}

fn group_text(group: &IndexMap<String, Node>, depth: usize, decimals: u32) -> String {
    let joiner = if depth == 0 { " " } else { ", " };
    group
        .iter()
        .map(|(key, node)| {
            let inner = match node {
                Node::Value(v) => v.to_text(decimals),
                Node::Group(g) => group_text(g, depth + 1, decimals),
            };
            if key.chars().all(|c| c.is_ascii_digit()) {
                inner
            } else {
                format!("{key}({inner})")
            }
        })
        .collect::<Vec<_>>()
        .join(joiner)
}

fn remove_in(map: &mut IndexMap<String, Node>, segments: &[String]) -> Option<Node> {
    let (first, rest) = segments.split_first()?;
    if rest.is_empty() {
        return map.shift_remove(first);
    }
    match map.get_mut(first)? {
        Node::Group(g) => {
            let removed = remove_in(g, rest);
            if g.is_empty() {
                map.shift_remove(first);
            }
            removed
        }
        Node::Value(_) => None,
    }
}

fn merge_into(dst: &mut IndexMap<String, Node>, src: &IndexMap<String, Node>) {
    for (key, node) in src {
        match (dst.get_mut(key), node) {
            (Some(Node::Group(dg)), Node::Group(sg)) => merge_into(dg, sg),
            _ => {
                dst.insert(key.clone(), node.clone());
            }
        }
    }
}

fn collect_names(map: &IndexMap<String, Node>, prefix: &PropertyPath, out: &mut Vec<PropertyPath>) {
    for (key, node) in map {
        let path = prefix.child(key.clone());
        match node {
            Node::Value(_) => out.push(path),
            Node::Group(g) => collect_names(g, &path, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_creates_groups_and_replaces_leaves() {
        let mut f = Frame::new();
        f.set("transform", "none");
        f.set(["transform", "rotate"], "30deg");
        assert!(f.raw("transform").and_then(Node::as_group).is_some());
        assert_eq!(
            f.value(["transform", "rotate"]),
            Some(&Value::with_unit(30.0, "deg"))
        );
    }

    #[test]
    fn remove_prunes_empty_groups() {
        let mut f = Frame::new();
        f.set(["transform", "rotate"], "30deg");
        assert!(f.remove(["transform", "rotate"]).is_some());
        assert!(!f.has("transform"));
        assert!(f.remove("missing").is_none());
    }
}
