// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::builder::SignalNames;
use crate::config::consts::{DEFAULT_INTEGER_RANGE, DEFAULT_REAL_RANGE};
use crate::errors::TreeError;
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Declarative description of a provider tree.
///
/// Lists the top-level elements bound under the tree root. Nodes nest further
/// elements; parameters and matrices are leaves of the file even though a matrix
/// expands into a small subtree when built. Functions need callbacks and are
/// attached in code after the tree is built.
///
/// # Example
/// ```yaml
/// name: studio
/// elements:
///   - type: node
///     number: 1
///     identifier: device
///     children:
///       - type: integer
///         number: 1
///         identifier: gain
///         value: 0
///         min: -20
///         max: 20
///         writable: true
///       - type: matrix
///         number: 2
///         identifier: router
///         kind: one_to_n
///         targets: [Out 1, Out 2]
///         sources: {0: In 1, 2: In 3}
/// ```
#[derive(Debug, Deserialize, PartialEq)]
pub struct ProviderConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub elements: Vec<ElementConfig>,
}

/// One element of a tree file, tagged by its `type` field.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementConfig {
    Node(NodeConfig),
    String(StringParameterConfig),
    Boolean(BooleanParameterConfig),
    Integer(IntegerParameterConfig),
    Real(RealParameterConfig),
    Enum(EnumParameterConfig),
    Matrix(MatrixConfig),
}

impl ElementConfig {
    pub fn number(&self) -> i32 {
        match self {
            ElementConfig::Node(c) => c.number,
            ElementConfig::String(c) => c.number,
            ElementConfig::Boolean(c) => c.number,
            ElementConfig::Integer(c) => c.number,
            ElementConfig::Real(c) => c.number,
            ElementConfig::Enum(c) => c.number,
            ElementConfig::Matrix(c) => c.number,
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            ElementConfig::Node(c) => &c.identifier,
            ElementConfig::String(c) => &c.identifier,
            ElementConfig::Boolean(c) => &c.identifier,
            ElementConfig::Integer(c) => &c.identifier,
            ElementConfig::Real(c) => &c.identifier,
            ElementConfig::Enum(c) => &c.identifier,
            ElementConfig::Matrix(c) => &c.identifier,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct NodeConfig {
    pub number: i32,
    pub identifier: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub children: Vec<ElementConfig>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct StringParameterConfig {
    pub number: i32,
    pub identifier: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub writable: bool,
    #[serde(default)]
    pub persistable: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct BooleanParameterConfig {
    pub number: i32,
    pub identifier: String,
    #[serde(default)]
    pub value: bool,
    #[serde(default)]
    pub writable: bool,
    #[serde(default)]
    pub persistable: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct IntegerParameterConfig {
    pub number: i32,
    pub identifier: String,
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub min: Option<i64>,
    #[serde(default)]
    pub max: Option<i64>,
    #[serde(default)]
    pub writable: bool,
    #[serde(default)]
    pub persistable: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl IntegerParameterConfig {
    /// Effective range; a missing bound takes the default bound.
    pub fn range(&self) -> (i64, i64) {
        (
            self.min.unwrap_or(DEFAULT_INTEGER_RANGE.0),
            self.max.unwrap_or(DEFAULT_INTEGER_RANGE.1),
        )
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct RealParameterConfig {
    pub number: i32,
    pub identifier: String,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub writable: bool,
    #[serde(default)]
    pub persistable: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl RealParameterConfig {
    /// Effective range; a missing bound takes the default bound.
    pub fn range(&self) -> (f64, f64) {
        (
            self.min.unwrap_or(DEFAULT_REAL_RANGE.0),
            self.max.unwrap_or(DEFAULT_REAL_RANGE.1),
        )
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct EnumParameterConfig {
    pub number: i32,
    pub identifier: String,
    pub values: Vec<String>,
    /// Index of the initially selected value
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub writable: bool,
    #[serde(default)]
    pub persistable: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Matrix variant of a tree file entry.
#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum MatrixKindConfig {
    OneToN,
    BlindSource,
    Dynamic,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct MatrixConfig {
    pub number: i32,
    pub identifier: String,
    pub kind: MatrixKindConfig,
    pub targets: SignalNamesConfig,
    pub sources: SignalNamesConfig,
    /// Label of the blind source; required for `blind_source` matrices
    #[serde(default)]
    pub blind_source: Option<String>,
    #[serde(default = "default_writable")]
    pub writable: bool,
    #[serde(default)]
    pub description: Option<String>,
    /// Identifier of the matrix element inside its wrapper node
    #[serde(default)]
    pub matrix_identifier: Option<String>,
}

fn default_writable() -> bool {
    true
}

/// Signal names as a list (dense) or as a map from signal number (sparse).
#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(untagged)]
pub enum SignalNamesConfig {
    Dense(Vec<String>),
    Sparse(#[serde(deserialize_with = "deserialize_sparse_names")] BTreeMap<i32, String>),
}

/// Sparse map keys arrive as integers from YAML and as strings from TOML,
/// whose table keys are always strings.
fn deserialize_sparse_names<'de, D>(deserializer: D) -> Result<BTreeMap<i32, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = BTreeMap::<SignalKey, String>::deserialize(deserializer)?;
    Ok(names.into_iter().map(|(key, name)| (key.0, name)).collect())
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct SignalKey(i32);

impl<'de> Deserialize<'de> for SignalKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SignalKeyVisitor;

        impl<'de> Visitor<'de> for SignalKeyVisitor {
            type Value = SignalKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a signal number")
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<SignalKey, E> {
                i32::try_from(value)
                    .map(SignalKey)
                    .map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<SignalKey, E> {
                i32::try_from(value)
                    .map(SignalKey)
                    .map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<SignalKey, E> {
                value
                    .trim()
                    .parse()
                    .map(SignalKey)
                    .map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
            }
        }

        deserializer.deserialize_any(SignalKeyVisitor)
    }
}

impl From<&SignalNamesConfig> for SignalNames {
    fn from(config: &SignalNamesConfig) -> Self {
        match config {
            SignalNamesConfig::Dense(names) => SignalNames::Dense(names.clone()),
            SignalNamesConfig::Sparse(names) => SignalNames::Sparse(names.clone()),
        }
    }
}

/// Load a tree file. Files ending in `.toml` are read as TOML, everything else
/// as YAML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ProviderConfig, TreeError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("toml"));

    let cfg = if is_toml {
        toml::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(cfg)
}

/// Load a tree file and run every validation check on it.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<ProviderConfig, TreeError> {
    let cfg = load_config(path)?;
    crate::config::validate_provider_config(&cfg).map_err(TreeError::Validation)?;
    Ok(cfg)
}
