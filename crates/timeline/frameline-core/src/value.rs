//! Core value kinds for keyframe properties.
//!
//! A value is a numeric leaf with an optional unit, a discrete text leaf, or an
//! ordered multi-component composite. Interpolation and serialization dispatch on
//! this tag only.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::config::format_decimal;

const TEXT_DECIMALS: u32 = 6;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    Text,
    Composite,
}

/// Numeric leaf; `unit` is empty for unitless numbers.
#[derive(Clone, Debug, PartialEq)]
pub struct Number {
    pub value: f64,
    pub unit: String,
}

impl Number {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    pub fn unitless(value: f64) -> Self {
        Self {
            value,
            unit: String::new(),
        }
    }

    /// Split `"<number><unit>"` text. The unit may only hold ASCII letters or '%'.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let mut chars = text.chars();
        let first = chars.next()?;
        let second = chars.next();
        let numeric_start = first.is_ascii_digit()
            || (first == '.' && second.is_some_and(|c| c.is_ascii_digit()))
            || ((first == '-' || first == '+')
                && second.is_some_and(|c| c.is_ascii_digit() || c == '.'));
        if !numeric_start {
            return None;
        }
        let mut split = text.len();
        loop {
            if text.is_char_boundary(split) {
                let (num, unit) = text.split_at(split);
                if let Ok(value) = num.parse::<f64>() {
                    if value.is_finite()
                        && unit.chars().all(|c| c.is_ascii_alphabetic() || c == '%')
                    {
                        return Some(Self::new(value, unit));
                    }
                }
            }
            if split == 0 {
                return None;
            }
            split -= 1;
        }
    }

    pub fn to_text(&self, decimals: u32) -> String {
        format!("{}{}", format_decimal(self.value, decimals), self.unit)
    }
}

/// Ordered multi-component value such as `10px 20px` or `rgba(0,0,0,1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Composite {
    /// Function-style wrapper name (`rgba` in `rgba(...)`), if any.
    pub name: Option<String>,
    pub separator: String,
    pub components: Vec<Value>,
}

impl Composite {
    /// Space separated list without a wrapper.
    pub fn list(components: Vec<Value>) -> Self {
        Self {
            name: None,
            separator: " ".to_string(),
            components,
        }
    }

    /// Function-style value, e.g. `Composite::function("rgba", ",", ...)`.
    pub fn function(
        name: impl Into<String>,
        separator: impl Into<String>,
        components: Vec<Value>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            separator: separator.into(),
            components,
        }
    }

    pub fn arity(&self) -> usize {
        self.components.len()
    }

    /// Same wrapper and separator; component counts may differ.
    pub fn same_shape(&self, other: &Composite) -> bool {
        self.name == other.name && self.separator == other.separator
    }

    pub fn to_text(&self, decimals: u32) -> String {
        let body = self
            .components
            .iter()
            .map(|c| c.to_text(decimals))
            .collect::<Vec<_>>()
            .join(&self.separator);
        match &self.name {
            Some(name) => format!("{name}({body})"),
            None => body,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Numeric leaf, blended linearly
    Number(Number),
    /// Discrete leaf; step-only for interpolation
    Text(String),
    /// Ordered components, blended component-wise
    Composite(Composite),
}

impl Value {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Number(_) => ValueKind::Number,
            Value::Text(_) => ValueKind::Text,
            Value::Composite(_) => ValueKind::Composite,
        }
    }

    /// Convenience constructors
    pub fn num(v: f64) -> Self {
        Value::Number(Number::unitless(v))
    }

    pub fn with_unit(v: f64, unit: &str) -> Self {
        Value::Number(Number::new(v, unit))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Read a textual leaf: `"10px"` becomes a Number, anything else stays Text.
    pub fn parse(text: &str) -> Self {
        match Number::parse(text) {
            Some(n) => Value::Number(n),
            None => Value::Text(text.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(|n| n.value)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            Value::Composite(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Value::Composite(_))
    }

    pub fn to_text(&self, decimals: u32) -> String {
        match self {
            Value::Number(n) => n.to_text(decimals),
            Value::Text(s) => s.clone(),
            Value::Composite(c) => c.to_text(decimals),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(TEXT_DECIMALS))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::num(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::num(v as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::parse(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::parse(&s)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Composite> for Value {
    fn from(c: Composite) -> Self {
        Value::Composite(c)
    }
}

// Unitless numbers stay JSON numbers, unnamed space lists become arrays and
// everything else is written as its text form.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Number(n) if n.unit.is_empty() => serializer.serialize_f64(n.value),
            Value::Composite(c) if c.name.is_none() && c.separator == " " => {
                c.components.serialize(serializer)
            }
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}
