use std::collections::BTreeMap;

use proptest::prelude::*;
use switchboard_resource_api::{
    build,
    flatten,
    ConfigNode,
    Fields,
    FromConfigNode,
    NodeBuilder,
    ResourceResult,
    ToConfigNode,
};

#[derive(Debug, Clone, PartialEq)]
struct Condition {
    kind: Option<String>,
    inverted: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
struct Settings {
    enabled: Option<bool>,
    properties: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq)]
struct Rule {
    name: Option<String>,
    order: Option<i64>,
    tags: Option<Vec<String>>,
    settings: Option<Settings>,
    conditions: Option<Vec<Condition>>,
}

impl FromConfigNode for Condition {
    fn from_node_at(node: &ConfigNode, path: &str) -> ResourceResult<Self> {
        Fields::read(node, path, |f| {
            Ok(Condition {
                kind: f.string("type")?,
                inverted: f.bool("inverted")?,
            })
        })
    }
}

impl FromConfigNode for Rule {
    fn from_node_at(node: &ConfigNode, path: &str) -> ResourceResult<Self> {
        Fields::read(node, path, |f| {
            Ok(Rule {
                name: f.string("name")?,
                order: f.int("order")?,
                tags: f.string_set("tags")?,
                settings: f.block("settings", |s| {
                    Ok(Settings {
                        enabled: s.bool("enabled")?,
                        properties: s.string_map("properties")?,
                    })
                })?,
                conditions: f.nested("conditions")?,
            })
        })
    }
}

impl ToConfigNode for Condition {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("type", self.kind.as_deref())
            .bool("inverted", self.inverted)
            .build()
    }
}

impl ToConfigNode for Settings {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .bool("enabled", self.enabled)
            .string_map("properties", self.properties.as_ref())
            .build()
    }
}

impl ToConfigNode for Rule {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("name", self.name.as_deref())
            .int("order", self.order)
            .string_set("tags", self.tags.as_deref())
            .block("settings", self.settings.as_ref())
            .list("conditions", self.conditions.as_deref())
            .build()
    }
}

fn word() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

fn condition() -> impl Strategy<Value = Condition> {
    (proptest::option::of(word()), proptest::option::of(any::<bool>()))
        .prop_map(|(kind, inverted)| Condition { kind, inverted })
}

fn settings() -> impl Strategy<Value = Settings> {
    (
        proptest::option::of(any::<bool>()),
        proptest::option::of(proptest::collection::btree_map(word(), word(), 0..4)),
    )
        .prop_map(|(enabled, properties)| Settings {
            enabled,
            properties,
        })
}

fn rule() -> impl Strategy<Value = Rule> {
    (
        proptest::option::of(word()),
        proptest::option::of(any::<i64>()),
        proptest::option::of(proptest::collection::vec(word(), 0..5)),
        proptest::option::of(settings()),
        proptest::option::of(proptest::collection::vec(condition(), 0..4)),
    )
        .prop_map(|(name, order, tags, settings, conditions)| Rule {
            name,
            order,
            tags,
            settings,
            conditions,
        })
}

/// Rewrites every set as a sequence in reverse order, as a file loader would
fn as_loaded(node: &ConfigNode) -> ConfigNode {
    match node {
        ConfigNode::Set(members) => ConfigNode::Sequence(
            members
                .iter()
                .rev()
                .cloned()
                .map(ConfigNode::Scalar)
                .collect(),
        ),
        ConfigNode::Sequence(items) => ConfigNode::Sequence(items.iter().map(as_loaded).collect()),
        ConfigNode::Mapping(entries) => ConfigNode::Mapping(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), as_loaded(value)))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

proptest! {
    #[test]
    fn flatten_build_is_semantically_identity(rule in rule()) {
        let node = flatten(&rule);
        let rebuilt: Rule = build(&node).unwrap();
        prop_assert!(flatten(&rebuilt).semantic_eq(&node));
    }

    #[test]
    fn loader_sequences_round_trip_like_sets(rule in rule()) {
        let node = as_loaded(&flatten(&rule));
        let rebuilt: Rule = build(&node).unwrap();
        prop_assert!(flatten(&rebuilt).semantic_eq(&node));
    }

    #[test]
    fn empty_child_list_is_not_omitted(name in word()) {
        let rule = Rule {
            name: Some(name),
            order: None,
            tags: None,
            settings: None,
            conditions: Some(Vec::new()),
        };
        let node = flatten(&rule);
        prop_assert_eq!(node.get("conditions"), Some(&ConfigNode::Sequence(Vec::new())));
        prop_assert!(node.get("settings").is_none());
        let rebuilt: Rule = build(&node).unwrap();
        prop_assert_eq!(rebuilt, rule);
    }
}
