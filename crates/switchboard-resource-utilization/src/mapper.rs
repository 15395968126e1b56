use std::collections::BTreeMap;

use switchboard_resource_api::{
    ConfigNode,
    Fields,
    FromConfigNode,
    NodeBuilder,
    ResourceError,
    ResourceResult,
    ToConfigNode,
};

use crate::types::{
    LabelUtilization,
    MediaUtilization,
    RoutingUtilization,
    MAX_CAPACITY,
    MEDIA_TYPES,
    MIN_CAPACITY,
};

fn read_capacity(fields: &Fields<'_>) -> ResourceResult<i64> {
    let path = if fields.path().is_empty() {
        "maximum_capacity".to_string()
    } else {
        format!("{}.maximum_capacity", fields.path())
    };

    match fields.int("maximum_capacity")? {
        None => Err(ResourceError::InvalidConfig(format!("{path} is required"))),
        Some(capacity) if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity) => {
            Err(ResourceError::InvalidConfig(format!(
                "{path} must be between {MIN_CAPACITY} and {MAX_CAPACITY}, got {capacity}"
            )))
        }
        Some(capacity) => Ok(capacity),
    }
}

fn read_media(fields: Fields<'_>) -> ResourceResult<MediaUtilization> {
    Ok(MediaUtilization {
        maximum_capacity: Some(read_capacity(&fields)?),
        interruptable_media_types: fields.string_set("interruptible_media_types")?,
        include_non_acd: fields.bool("include_non_acd")?,
    })
}

impl FromConfigNode for RoutingUtilization {
    fn from_node_at(node: &ConfigNode, path: &str) -> ResourceResult<Self> {
        Fields::read(node, path, |fields| {
            let mut utilization = BTreeMap::new();
            for media_type in MEDIA_TYPES {
                if let Some(settings) = fields.block(media_type, read_media)? {
                    utilization.insert(media_type.to_string(), settings);
                }
            }

            let labels = fields.list("label_utilizations", |label| {
                let label_id = label.required_string("label_id")?;
                Ok((
                    label_id,
                    LabelUtilization {
                        maximum_capacity: Some(read_capacity(&label)?),
                        interrupting_label_ids: label.string_set("interrupting_label_ids")?,
                    },
                ))
            })?;

            let label_utilizations = match labels {
                None => None,
                Some(labels) => {
                    let mut by_id = BTreeMap::new();
                    for (label_id, settings) in labels {
                        if by_id.insert(label_id.clone(), settings).is_some() {
                            return Err(ResourceError::InvalidConfig(format!(
                                "label_utilizations declares label {label_id} more than once"
                            )));
                        }
                    }
                    Some(by_id)
                }
            };

            Ok(RoutingUtilization {
                utilization: Some(utilization),
                label_utilizations,
            })
        })
    }
}

impl ToConfigNode for MediaUtilization {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .int("maximum_capacity", self.maximum_capacity)
            .string_set(
                "interruptible_media_types",
                self.interruptable_media_types.as_deref(),
            )
            .bool("include_non_acd", self.include_non_acd)
            .build()
    }
}

/// One entry of the `label_utilizations` list
struct LabelEntry<'a> {
    label_id: &'a str,
    settings: &'a LabelUtilization,
}

impl ToConfigNode for LabelEntry<'_> {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("label_id", Some(self.label_id))
            .int("maximum_capacity", self.settings.maximum_capacity)
            .string_set(
                "interrupting_label_ids",
                self.settings.interrupting_label_ids.as_deref(),
            )
            .build()
    }
}

impl ToConfigNode for RoutingUtilization {
    /// Labels come out ordered by label id
    fn to_node(&self) -> ConfigNode {
        let mut builder = NodeBuilder::new();
        for media_type in MEDIA_TYPES {
            builder = builder.block(media_type, self.media(media_type));
        }

        let labels: Option<Vec<LabelEntry<'_>>> = self.label_utilizations.as_ref().map(|labels| {
            labels
                .iter()
                .map(|(label_id, settings)| LabelEntry { label_id, settings })
                .collect()
        });
        builder.list("label_utilizations", labels.as_deref()).build()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use switchboard_resource_api::{
        build,
        flatten,
    };

    use super::*;

    fn node(value: serde_json::Value) -> ConfigNode {
        ConfigNode::try_from(value).unwrap()
    }

    #[test]
    fn test_build_media_blocks() {
        let utilization: RoutingUtilization = build(&node(json!({
            "call": [{"maximum_capacity": 1, "interruptible_media_types": ["email", "chat"]}],
            "email": [{"maximum_capacity": 0, "include_non_acd": true}],
            "chat": []
        })))
        .unwrap();

        let call = utilization.media("call").unwrap();
        assert_eq!(call.maximum_capacity, Some(1));
        assert_eq!(call.include_non_acd, None);
        assert_eq!(utilization.media("email").unwrap().maximum_capacity, Some(0));
        assert!(utilization.media("chat").is_none());
        assert!(utilization.label_utilizations.is_none());
    }

    #[test]
    fn test_zero_capacity_is_kept_on_flatten() {
        let declared = node(json!({"message": [{"maximum_capacity": 0}]}));
        let utilization: RoutingUtilization = build(&declared).unwrap();

        let flattened = flatten(&utilization);
        assert!(flattened.semantic_eq(&declared));
    }

    #[test]
    fn test_capacity_out_of_range() {
        let err = build::<RoutingUtilization>(&node(json!({
            "callback": [{"maximum_capacity": 26}]
        })))
        .unwrap_err();

        assert!(matches!(err, ResourceError::InvalidConfig(_)));
        assert!(err.to_string().contains("callback[0].maximum_capacity"));
    }

    #[test]
    fn test_capacity_required() {
        let err = build::<RoutingUtilization>(&node(json!({
            "label_utilizations": [{"label_id": "label-1"}]
        })))
        .unwrap_err();

        assert!(err.to_string().contains("label_utilizations[0].maximum_capacity is required"));
    }

    #[test]
    fn test_labels_flatten_sorted_by_id() {
        let utilization: RoutingUtilization = build(&node(json!({
            "label_utilizations": [
                {"label_id": "red", "maximum_capacity": 4, "interrupting_label_ids": ["blue"]},
                {"label_id": "blue", "maximum_capacity": 2}
            ]
        })))
        .unwrap();

        let flattened = flatten(&utilization);
        let expected = node(json!({
            "label_utilizations": [
                {"label_id": "blue", "maximum_capacity": 2},
                {"label_id": "red", "maximum_capacity": 4, "interrupting_label_ids": ["blue"]}
            ]
        }));
        assert!(flattened.semantic_eq(&expected));
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let err = build::<RoutingUtilization>(&node(json!({
            "label_utilizations": [
                {"label_id": "red", "maximum_capacity": 1},
                {"label_id": "red", "maximum_capacity": 2}
            ]
        })))
        .unwrap_err();

        assert!(matches!(err, ResourceError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_label_list_is_preserved() {
        let declared = node(json!({"label_utilizations": []}));
        let utilization: RoutingUtilization = build(&declared).unwrap();

        assert_eq!(utilization.label_utilizations, Some(BTreeMap::new()));
        assert_eq!(
            flatten(&utilization).get("label_utilizations"),
            Some(&ConfigNode::Sequence(Vec::new()))
        );
    }

    #[test]
    fn test_media_block_must_be_a_list() {
        let err = build::<RoutingUtilization>(&node(json!({
            "call": {"maximum_capacity": 1}
        })))
        .unwrap_err();

        assert!(matches!(err, ResourceError::ShapeMismatch { ref path, .. } if path == "call"));
    }
}
