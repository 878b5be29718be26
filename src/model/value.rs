// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Protocol values and the type tags used to describe them.

use base64::Engine;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Protocol type tag carried by parameters and function tuple descriptors.
///
/// The discriminants match the numbering used on the wire so that a decoder can
/// map tags straight onto this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    Integer = 1,
    Real = 2,
    String = 3,
    Boolean = 4,
    // 5 is the wire's trigger type, which no element here carries.
    Enum = 6,
    Octets = 7,
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterType::Integer => "integer",
            ParameterType::Real => "real",
            ParameterType::String => "string",
            ParameterType::Boolean => "boolean",
            ParameterType::Enum => "enum",
            ParameterType::Octets => "octets",
        };
        f.write_str(name)
    }
}

/// A single protocol value as delivered by a peer or reported back to one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Integer(i64),
    Real(f64),
    String(String),
    Boolean(bool),
    #[serde(serialize_with = "serialize_octets")]
    Octets(Vec<u8>),
}

impl Value {
    /// The type tag a peer would see for this value.
    pub fn parameter_type(&self) -> ParameterType {
        match self {
            Value::Integer(_) => ParameterType::Integer,
            Value::Real(_) => ParameterType::Real,
            Value::String(_) => ParameterType::String,
            Value::Boolean(_) => ParameterType::Boolean,
            Value::Octets(_) => ParameterType::Octets,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(real) => Some(*real),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Real(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "\"{}\"", v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Octets(v) => write!(f, "<{} octets>", v.len()),
        }
    }
}

fn serialize_octets<S: Serializer>(octets: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(octets))
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Octets(value)
    }
}

/// Rust types that can back a tree parameter.
///
/// Each implementation names its protocol tag, how to pull itself out of a
/// peer-supplied [`Value`], and the default range applied by the builders.
pub trait ParameterValue: Clone + PartialEq + PartialOrd + fmt::Debug + Send + Sync + 'static {
    const TYPE: ParameterType;

    /// Extract a value of this type, or `None` if the peer sent another type.
    fn from_value(value: &Value) -> Option<Self>;

    fn to_value(&self) -> Value;

    /// Range used when a builder does not supply one.
    fn default_range() -> Option<(Self, Self)> {
        None
    }
}

impl ParameterValue for String {
    const TYPE: ParameterType = ParameterType::String;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ParameterValue for bool {
    const TYPE: ParameterType = ParameterType::Boolean;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }
}

impl ParameterValue for i64 {
    const TYPE: ParameterType = ParameterType::Integer;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Integer(*self)
    }

    fn default_range() -> Option<(Self, Self)> {
        Some(crate::config::consts::DEFAULT_INTEGER_RANGE)
    }
}

impl ParameterValue for f64 {
    const TYPE: ParameterType = ParameterType::Real;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_real()
    }

    fn to_value(&self) -> Value {
        Value::Real(*self)
    }

    fn default_range() -> Option<(Self, Self)> {
        Some(crate::config::consts::DEFAULT_REAL_RANGE)
    }
}
