//! Dynamic configuration values
//!
//! A [`ConfigNode`] is what the configuration loader hands to a resource and
//! what a read hands back. Optional structured blocks use the singleton-list
//! convention: a sequence holding zero or one mapping.

use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::fmt;

use crate::error::{
    ResourceError,
    ResourceResult,
};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scalar {
    String(String),
    Int(i64),
    Bool(bool),
}

impl Scalar {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigNode {
    Scalar(Scalar),
    Sequence(Vec<ConfigNode>),
    Set(BTreeSet<Scalar>),
    Mapping(BTreeMap<String, ConfigNode>),
}

impl ConfigNode {
    pub fn empty_mapping() -> Self {
        Self::Mapping(BTreeMap::new())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(value.into()))
    }

    pub fn int(value: i64) -> Self {
        Self::Scalar(Scalar::Int(value))
    }

    pub fn bool(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }

    pub fn set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        Self::Set(values.into_iter().map(Into::into).collect())
    }

    /// Wraps a block in the singleton-list convention
    pub fn singleton(node: ConfigNode) -> Self {
        Self::Sequence(vec![node])
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(scalar) => scalar.kind(),
            Self::Sequence(_) => "sequence",
            Self::Set(_) => "set",
            Self::Mapping(_) => "mapping",
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, ConfigNode>> {
        match self {
            Self::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up a key when this node is a mapping
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.as_mapping().and_then(|entries| entries.get(key))
    }

    /// Equality that ignores the order of unordered sets.
    ///
    /// A `Set` equals a `Sequence` of scalars holding the same members, since
    /// file loaders have no way to express sets.
    pub fn semantic_eq(&self, other: &ConfigNode) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => a == b,
            (Self::Set(a), Self::Set(b)) => a == b,
            (Self::Set(set), Self::Sequence(seq)) | (Self::Sequence(seq), Self::Set(set)) => {
                scalar_members(seq).is_some_and(|members| &members == set)
            }
            (Self::Sequence(a), Self::Sequence(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.semantic_eq(y))
            }
            (Self::Mapping(a), Self::Mapping(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(key, value)| b.get(key).is_some_and(|v| value.semantic_eq(v)))
            }
            _ => false,
        }
    }

    /// True when every value declared in `self` is present and equal in `actual`.
    ///
    /// Mapping keys missing from `self` are ignored at every depth, so fields
    /// the remote side computes never count against the declaration.
    pub fn is_covered_by(&self, actual: &ConfigNode) -> bool {
        match (self, actual) {
            (Self::Mapping(declared), Self::Mapping(actual)) => declared
                .iter()
                .all(|(key, value)| actual.get(key).is_some_and(|v| value.is_covered_by(v))),
            (Self::Sequence(a), Self::Sequence(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.is_covered_by(y))
            }
            _ => self.semantic_eq(actual),
        }
    }

    /// Top-level declared keys whose value is not covered by `actual`
    pub fn drifted_keys(&self, actual: &ConfigNode) -> Vec<String> {
        let (Some(declared), Some(actual)) = (self.as_mapping(), actual.as_mapping()) else {
            return if self.is_covered_by(actual) {
                Vec::new()
            } else {
                vec![String::new()]
            };
        };

        declared
            .iter()
            .filter(|(key, value)| !actual.get(*key).is_some_and(|v| value.is_covered_by(v)))
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::from(self)
    }
}

fn scalar_members(seq: &[ConfigNode]) -> Option<BTreeSet<Scalar>> {
    seq.iter()
        .map(|node| match node {
            ConfigNode::Scalar(scalar) => Some(scalar.clone()),
            _ => None,
        })
        .collect()
}

impl From<Scalar> for ConfigNode {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<BTreeMap<String, ConfigNode>> for ConfigNode {
    fn from(value: BTreeMap<String, ConfigNode>) -> Self {
        Self::Mapping(value)
    }
}

impl TryFrom<serde_json::Value> for ConfigNode {
    type Error = ResourceError;

    fn try_from(value: serde_json::Value) -> ResourceResult<Self> {
        from_json(value, "$")
    }
}

fn from_json(value: serde_json::Value, path: &str) -> ResourceResult<ConfigNode> {
    use serde_json::Value;

    match value {
        Value::Null => Err(ResourceError::shape(path, "value", "null")),
        Value::Bool(b) => Ok(ConfigNode::bool(b)),
        Value::Number(n) => n
            .as_i64()
            .map(ConfigNode::int)
            .ok_or_else(|| ResourceError::shape(path, "int", "float")),
        Value::String(s) => Ok(ConfigNode::string(s)),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| from_json(item, &format!("{path}[{i}]")))
            .collect::<ResourceResult<Vec<_>>>()
            .map(ConfigNode::Sequence),
        Value::Object(entries) => {
            let mut mapping = BTreeMap::new();
            for (key, value) in entries {
                if value.is_null() {
                    continue;
                }
                let child = from_json(value, &format!("{path}.{key}"))?;
                mapping.insert(key, child);
            }
            Ok(ConfigNode::Mapping(mapping))
        }
    }
}

impl From<&Scalar> for serde_json::Value {
    fn from(value: &Scalar) -> Self {
        match value {
            Scalar::String(s) => serde_json::Value::String(s.clone()),
            Scalar::Int(i) => serde_json::Value::from(*i),
            Scalar::Bool(b) => serde_json::Value::Bool(*b),
        }
    }
}

impl From<&ConfigNode> for serde_json::Value {
    fn from(node: &ConfigNode) -> Self {
        match node {
            ConfigNode::Scalar(scalar) => scalar.into(),
            ConfigNode::Sequence(items) => items.iter().map(serde_json::Value::from).collect(),
            ConfigNode::Set(members) => members.iter().map(serde_json::Value::from).collect(),
            ConfigNode::Mapping(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.into()))
                    .collect(),
            ),
        }
    }
}
