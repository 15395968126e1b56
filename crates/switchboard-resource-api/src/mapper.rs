//! Conversion between [`ConfigNode`] trees and typed domain objects
//!
//! Resource crates implement [`FromConfigNode`] and [`ToConfigNode`] for each
//! domain shape using the [`Fields`] reader and the [`NodeBuilder`] writer.
//! Both follow the same conventions:
//! - an empty string is "absent", never an empty value
//! - optional blocks are singleton lists; an empty list reads as `None`
//! - `None` is omitted on the way out, never emitted as an explicit null
//! - a present but empty child list is preserved as an empty sequence

use std::collections::{
    BTreeMap,
    BTreeSet,
};

use crate::error::{
    ResourceError,
    ResourceResult,
};
use crate::node::{
    ConfigNode,
    Scalar,
};

pub trait FromConfigNode: Sized {
    /// Reads the object found at `path`, which prefixes any shape error
    fn from_node_at(node: &ConfigNode, path: &str) -> ResourceResult<Self>;

    fn from_node(node: &ConfigNode) -> ResourceResult<Self> {
        Self::from_node_at(node, "")
    }
}

pub trait ToConfigNode {
    fn to_node(&self) -> ConfigNode;
}

/// Builds a domain object from a configuration tree
pub fn build<T: FromConfigNode>(node: &ConfigNode) -> ResourceResult<T> {
    T::from_node(node)
}

/// Flattens a domain object back into a configuration tree
pub fn flatten<T: ToConfigNode>(object: &T) -> ConfigNode {
    object.to_node()
}

/// Typed reader over one mapping of a configuration tree
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    path: &'a str,
    entries: &'a BTreeMap<String, ConfigNode>,
}

impl<'a> Fields<'a> {
    pub fn new(path: &'a str, entries: &'a BTreeMap<String, ConfigNode>) -> Self {
        Self { path, entries }
    }

    /// Runs `f` over `node`, which must be a mapping
    pub fn read<T>(
        node: &ConfigNode, path: &str, f: impl FnOnce(Fields<'_>) -> ResourceResult<T>,
    ) -> ResourceResult<T> {
        match node {
            ConfigNode::Mapping(entries) => f(Fields::new(path, entries)),
            other => Err(ResourceError::shape(path, "mapping", other.kind())),
        }
    }

    pub fn path(&self) -> &str {
        self.path
    }

    fn child_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    fn scalar(&self, key: &str) -> ResourceResult<Option<&'a Scalar>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(ConfigNode::Scalar(scalar)) => Ok(Some(scalar)),
            Some(other) => Err(ResourceError::shape(
                self.child_path(key),
                "scalar",
                other.kind(),
            )),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn string(&self, key: &str) -> ResourceResult<Option<String>> {
        match self.scalar(key)? {
            None => Ok(None),
            Some(Scalar::String(s)) if s.is_empty() => Ok(None),
            Some(Scalar::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(ResourceError::shape(
                self.child_path(key),
                "string",
                other.kind(),
            )),
        }
    }

    pub fn required_string(&self, key: &str) -> ResourceResult<String> {
        self.string(key)?.ok_or_else(|| {
            ResourceError::InvalidConfig(format!("'{}' is required", self.child_path(key)))
        })
    }

    pub fn int(&self, key: &str) -> ResourceResult<Option<i64>> {
        match self.scalar(key)? {
            None => Ok(None),
            Some(Scalar::Int(i)) => Ok(Some(*i)),
            Some(other) => Err(ResourceError::shape(
                self.child_path(key),
                "int",
                other.kind(),
            )),
        }
    }

    pub fn bool(&self, key: &str) -> ResourceResult<Option<bool>> {
        match self.scalar(key)? {
            None => Ok(None),
            Some(Scalar::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(ResourceError::shape(
                self.child_path(key),
                "bool",
                other.kind(),
            )),
        }
    }

    fn scalar_members(&self, key: &str, expected: &'static str) -> ResourceResult<Option<Vec<String>>> {
        let members: Vec<&Scalar> = match self.entries.get(key) {
            None => return Ok(None),
            Some(ConfigNode::Set(set)) => set.iter().collect(),
            Some(ConfigNode::Sequence(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    ConfigNode::Scalar(scalar) => Ok(scalar),
                    other => Err(ResourceError::shape(
                        format!("{}[{i}]", self.child_path(key)),
                        "scalar",
                        other.kind(),
                    )),
                })
                .collect::<ResourceResult<_>>()?,
            Some(other) => {
                return Err(ResourceError::shape(
                    self.child_path(key),
                    expected,
                    other.kind(),
                ))
            }
        };

        members
            .into_iter()
            .map(|scalar| match scalar {
                Scalar::String(s) => Ok(s.clone()),
                other => Err(ResourceError::shape(
                    self.child_path(key),
                    "string member",
                    other.kind(),
                )),
            })
            .collect::<ResourceResult<Vec<_>>>()
            .map(Some)
    }

    /// Unordered set of strings; a sequence of strings is accepted as well
    pub fn string_set(&self, key: &str) -> ResourceResult<Option<Vec<String>>> {
        self.scalar_members(key, "set")
    }

    pub fn string_list(&self, key: &str) -> ResourceResult<Option<Vec<String>>> {
        match self.entries.get(key) {
            Some(ConfigNode::Set(_)) => Err(ResourceError::shape(
                self.child_path(key),
                "sequence",
                "set",
            )),
            _ => self.scalar_members(key, "sequence"),
        }
    }

    pub fn string_map(&self, key: &str) -> ResourceResult<Option<BTreeMap<String, String>>> {
        let entries = match self.entries.get(key) {
            None => return Ok(None),
            Some(ConfigNode::Mapping(entries)) => entries,
            Some(other) => {
                return Err(ResourceError::shape(
                    self.child_path(key),
                    "mapping",
                    other.kind(),
                ))
            }
        };

        let path = self.child_path(key);
        let nested = Fields::new(&path, entries);
        let mut map = BTreeMap::new();
        for name in entries.keys() {
            if let Some(value) = nested.string(name)? {
                map.insert(name.clone(), value);
            }
        }
        Ok(Some(map))
    }

    /// Optional structured block in the singleton-list convention
    pub fn block<T>(
        &self, key: &str, f: impl FnOnce(Fields<'_>) -> ResourceResult<T>,
    ) -> ResourceResult<Option<T>> {
        let path = self.child_path(key);
        match self.entries.get(key) {
            None => Ok(None),
            Some(ConfigNode::Sequence(items)) => match items.as_slice() {
                [] => Ok(None),
                [item] => Fields::read(item, &format!("{path}[0]"), f).map(Some),
                _ => Err(ResourceError::shape(
                    path,
                    "sequence of at most one block",
                    "sequence of several",
                )),
            },
            Some(other) => Err(ResourceError::shape(path, "sequence", other.kind())),
        }
    }

    /// Ordered list of nested mappings
    pub fn list<T>(
        &self, key: &str, mut f: impl FnMut(Fields<'_>) -> ResourceResult<T>,
    ) -> ResourceResult<Option<Vec<T>>> {
        let path = self.child_path(key);
        match self.entries.get(key) {
            None => Ok(None),
            Some(ConfigNode::Sequence(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| Fields::read(item, &format!("{path}[{i}]"), &mut f))
                .collect::<ResourceResult<Vec<_>>>()
                .map(Some),
            Some(other) => Err(ResourceError::shape(path, "sequence", other.kind())),
        }
    }

    /// Ordered list of nested domain objects
    pub fn nested<T: FromConfigNode>(&self, key: &str) -> ResourceResult<Option<Vec<T>>> {
        let path = self.child_path(key);
        match self.entries.get(key) {
            None => Ok(None),
            Some(ConfigNode::Sequence(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| T::from_node_at(item, &format!("{path}[{i}]")))
                .collect::<ResourceResult<Vec<_>>>()
                .map(Some),
            Some(other) => Err(ResourceError::shape(path, "sequence", other.kind())),
        }
    }
}

/// Writer that emits a mapping, omitting everything that is unset
#[derive(Debug, Default)]
pub struct NodeBuilder {
    entries: BTreeMap<String, ConfigNode>,
}

impl NodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, key: &str, value: Option<ConfigNode>) -> Self {
        if let Some(value) = value {
            self.entries.insert(key.to_string(), value);
        }
        self
    }

    pub fn string(self, key: &str, value: Option<&str>) -> Self {
        let value = value.filter(|s| !s.is_empty()).map(ConfigNode::string);
        self.node(key, value)
    }

    pub fn int(self, key: &str, value: Option<i64>) -> Self {
        self.node(key, value.map(ConfigNode::int))
    }

    pub fn bool(self, key: &str, value: Option<bool>) -> Self {
        self.node(key, value.map(ConfigNode::bool))
    }

    pub fn string_set(self, key: &str, values: Option<&[String]>) -> Self {
        let value = values.map(|v| {
            ConfigNode::Set(
                v.iter()
                    .map(|s| Scalar::String(s.clone()))
                    .collect::<BTreeSet<_>>(),
            )
        });
        self.node(key, value)
    }

    pub fn string_list(self, key: &str, values: Option<&[String]>) -> Self {
        let value = values.map(|v| ConfigNode::Sequence(v.iter().map(ConfigNode::string).collect()));
        self.node(key, value)
    }

    pub fn string_map(self, key: &str, values: Option<&BTreeMap<String, String>>) -> Self {
        let value = values.map(|map| {
            ConfigNode::Mapping(
                map.iter()
                    .filter(|(_, v)| !v.is_empty())
                    .map(|(k, v)| (k.clone(), ConfigNode::string(v)))
                    .collect(),
            )
        });
        self.node(key, value)
    }

    /// Singleton-list block; an absent block is omitted, not an empty list
    pub fn block<T: ToConfigNode>(self, key: &str, value: Option<&T>) -> Self {
        self.node(key, value.map(|v| ConfigNode::singleton(v.to_node())))
    }

    pub fn list<T: ToConfigNode>(self, key: &str, values: Option<&[T]>) -> Self {
        let value =
            values.map(|items| ConfigNode::Sequence(items.iter().map(ToConfigNode::to_node).collect()));
        self.node(key, value)
    }

    pub fn build(self) -> ConfigNode {
        ConfigNode::Mapping(self.entries)
    }
}
