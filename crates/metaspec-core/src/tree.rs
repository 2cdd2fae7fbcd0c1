//! In-memory tree documents
//!
//! Every decoded document becomes a [`TreeValue`]: a closed variant of
//! scalars, sequences and insertion-ordered mappings. The kind of each node is
//! decided once, at decode time, so constraint checks can match on it.
//!
//! Copyright (c) 2025 Metaspec Team
//! Licensed under the Apache-2.0 license

use crate::path::{Path, Segment};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Leaf value of a tree document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

/// Numeric scalar
///
/// Floats keep YAML's `.inf`, `-.inf` and `.nan`, which JSON cannot express.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    pub fn is_finite(&self) -> bool {
        match self {
            Number::Float(f) => f.is_finite(),
            Number::Int(_) | Number::UInt(_) => true,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(i) => write!(f, "{}", i),
            Number::UInt(u) => write!(f, "{}", u),
            Number::Float(x) if x.is_nan() => f.write_str(".nan"),
            Number::Float(x) if x.is_infinite() => {
                f.write_str(if x > 0.0 { ".inf" } else { "-.inf" })
            }
            Number::Float(x) => write!(f, "{:?}", x),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Number::Int(i) => serializer.serialize_i64(i),
            Number::UInt(u) => serializer.serialize_u64(u),
            Number::Float(x) if x.is_finite() => serializer.serialize_f64(x),
            // JSON has no literal for these
            Number::Float(_) => serializer.collect_str(self),
        }
    }
}

impl From<serde_json::Number> for Number {
    fn from(n: serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::Int(i)
        } else if let Some(u) = n.as_u64() {
            Number::UInt(u)
        } else {
            Number::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl From<&serde_yaml::Number> for Number {
    fn from(n: &serde_yaml::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::Int(i)
        } else if let Some(u) = n.as_u64() {
            Number::UInt(u)
        } else {
            Number::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl Scalar {
    /// Compact rendering with strings quoted
    pub fn inspect(&self) -> String {
        match self {
            Scalar::Null => "null".to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::String(s) => format!("{:?}", s),
        }
    }
}

/// A node of a tree document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TreeValue {
    Scalar(Scalar),
    Sequence(Vec<TreeValue>),
    Mapping(IndexMap<String, TreeValue>),
}

/// Structural errors raised while converting a decoded document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Mapping keys must be scalars
    #[error("mapping key at {path} is not a scalar")]
    NonScalarKey { path: String },

    /// Two keys collapse to the same string
    #[error("duplicate mapping key '{key}' at {path}")]
    DuplicateKey { key: String, path: String },

    /// Tagged YAML values have no tree representation
    #[error("tagged value {tag} at {path} is not supported")]
    TaggedValue { tag: String, path: String },
}

impl TreeValue {
    /// Create a null scalar
    pub fn null() -> Self {
        TreeValue::Scalar(Scalar::Null)
    }

    /// Create a string scalar
    pub fn string(value: impl Into<String>) -> Self {
        TreeValue::Scalar(Scalar::String(value.into()))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TreeValue::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[TreeValue]> {
        match self {
            TreeValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, TreeValue>> {
        match self {
            TreeValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        self.as_str().is_some()
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, TreeValue::Sequence(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TreeValue::Scalar(Scalar::Null))
    }

    /// Short name of the node kind, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            TreeValue::Scalar(Scalar::Null) => "null",
            TreeValue::Scalar(Scalar::Bool(_)) => "bool",
            TreeValue::Scalar(Scalar::Number(_)) => "number",
            TreeValue::Scalar(Scalar::String(_)) => "string",
            TreeValue::Sequence(_) => "sequence",
            TreeValue::Mapping(_) => "mapping",
        }
    }

    /// Field of a mapping node
    pub fn get(&self, key: &str) -> Option<&TreeValue> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Resolve a path from this node
    ///
    /// Keys only step into mappings and indices only into sequences; any
    /// other combination resolves to `None`.
    pub fn lookup(&self, path: &Path) -> Option<&TreeValue> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| match (node, segment) {
                (TreeValue::Mapping(map), Segment::Key(key)) => map.get(key),
                (TreeValue::Sequence(items), Segment::Index(index)) => items.get(*index),
                _ => None,
            })
    }

    /// Every path reachable from this node, excluding the node itself
    ///
    /// Paths come out depth-first in pre-order, following mapping insertion
    /// order and sequence order, so enumeration is deterministic.
    pub fn enumerate(&self) -> Vec<Path> {
        let mut paths = Vec::new();
        let mut prefix = Vec::new();
        collect_paths(self, &mut prefix, &mut paths);
        paths
    }

    /// Compact, human-inspectable rendering
    ///
    /// Containers are shown one level deep; nested containers are elided as
    /// `[Array]` and `[Object]`.
    pub fn inspect(&self) -> String {
        match self {
            TreeValue::Scalar(scalar) => scalar.inspect(),
            TreeValue::Sequence(items) if items.is_empty() => "[]".to_string(),
            TreeValue::Sequence(items) => format!(
                "[ {} ]",
                items
                    .iter()
                    .map(TreeValue::inspect_shallow)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            TreeValue::Mapping(map) if map.is_empty() => "{}".to_string(),
            TreeValue::Mapping(map) => format!(
                "{{ {} }}",
                map.iter()
                    .map(|(key, value)| format!("{}: {}", key, value.inspect_shallow()))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    fn inspect_shallow(&self) -> String {
        match self {
            TreeValue::Scalar(scalar) => scalar.inspect(),
            TreeValue::Sequence(_) => "[Array]".to_string(),
            TreeValue::Mapping(_) => "[Object]".to_string(),
        }
    }
}

fn collect_paths(node: &TreeValue, prefix: &mut Vec<Segment>, out: &mut Vec<Path>) {
    match node {
        TreeValue::Scalar(_) => {}
        TreeValue::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                prefix.push(Segment::Index(index));
                out.push(Path::new(prefix.clone()));
                collect_paths(item, prefix, out);
                prefix.pop();
            }
        }
        TreeValue::Mapping(map) => {
            for (key, value) in map {
                prefix.push(Segment::Key(key.clone()));
                out.push(Path::new(prefix.clone()));
                collect_paths(value, prefix, out);
                prefix.pop();
            }
        }
    }
}

impl fmt::Display for TreeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inspect())
    }
}

impl From<Scalar> for TreeValue {
    fn from(scalar: Scalar) -> Self {
        TreeValue::Scalar(scalar)
    }
}

impl From<serde_json::Value> for TreeValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => TreeValue::null(),
            Value::Bool(b) => Scalar::Bool(b).into(),
            Value::Number(n) => Scalar::Number(n.into()).into(),
            Value::String(s) => Scalar::String(s).into(),
            Value::Array(items) => {
                TreeValue::Sequence(items.into_iter().map(TreeValue::from).collect())
            }
            Value::Object(map) => TreeValue::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, TreeValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<serde_yaml::Value> for TreeValue {
    type Error = TreeError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        from_yaml(value, &mut Vec::new())
    }
}

fn from_yaml(value: serde_yaml::Value, at: &mut Vec<Segment>) -> Result<TreeValue, TreeError> {
    use serde_yaml::Value as Yaml;

    let tree = match value {
        Yaml::Null => TreeValue::null(),
        Yaml::Bool(b) => Scalar::Bool(b).into(),
        Yaml::Number(n) => Scalar::Number(Number::from(&n)).into(),
        Yaml::String(s) => Scalar::String(s).into(),
        Yaml::Sequence(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                at.push(Segment::Index(index));
                out.push(from_yaml(item, at)?);
                at.pop();
            }
            TreeValue::Sequence(out)
        }
        Yaml::Mapping(map) => {
            let mut out = IndexMap::with_capacity(map.len());
            for (key, item) in map {
                let key = yaml_key(key, at)?;
                at.push(Segment::Key(key.clone()));
                let item = from_yaml(item, at)?;
                at.pop();
                if out.contains_key(&key) {
                    return Err(TreeError::DuplicateKey {
                        key,
                        path: Path::new(at.clone()).render(),
                    });
                }
                out.insert(key, item);
            }
            TreeValue::Mapping(out)
        }
        Yaml::Tagged(tagged) => {
            return Err(TreeError::TaggedValue {
                tag: tagged.tag.to_string(),
                path: Path::new(at.clone()).render(),
            })
        }
    };

    Ok(tree)
}

fn yaml_key(key: serde_yaml::Value, at: &[Segment]) -> Result<String, TreeError> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Null => Ok("null".to_string()),
        _ => Err(TreeError::NonScalarKey {
            path: Path::new(at.to_vec()).render(),
        }),
    }
}
