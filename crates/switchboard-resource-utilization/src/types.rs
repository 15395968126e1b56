//! Wire types for the org-wide routing utilization API

use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};
use switchboard_resource_api::RemoteObject;

/// The organisation has exactly one utilization object, stored under this id
pub const ORG_UTILIZATION_ID: &str = "routing_utilization";

/// Media types with their own utilization block, in configuration order
pub const MEDIA_TYPES: [&str; 5] = ["call", "callback", "chat", "email", "message"];

pub const MIN_CAPACITY: i64 = 0;
pub const MAX_CAPACITY: i64 = 25;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingUtilization {
    /// Settings keyed by media type; media types left out revert to defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization: Option<BTreeMap<String, MediaUtilization>>,
    /// Settings keyed by label id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_utilizations: Option<BTreeMap<String, LabelUtilization>>,
}

impl RoutingUtilization {
    pub fn media(&self, media_type: &str) -> Option<&MediaUtilization> {
        self.utilization.as_ref()?.get(media_type)
    }
}

impl RemoteObject for RoutingUtilization {
    fn id(&self) -> Option<&str> {
        Some(ORG_UTILIZATION_ID)
    }

    fn name(&self) -> Option<&str> {
        Some("Routing Utilization")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUtilization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_capacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interruptable_media_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_non_acd: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelUtilization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_capacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interrupting_label_ids: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_platform_response() {
        let utilization: RoutingUtilization = serde_json::from_value(json!({
            "utilization": {
                "call": {"maximumCapacity": 1, "interruptableMediaTypes": ["email"], "includeNonAcd": true},
                "email": {"maximumCapacity": 3, "includeNonAcd": false}
            },
            "labelUtilizations": {
                "label-1": {"maximumCapacity": 2, "interruptingLabelIds": ["label-2"]}
            }
        }))
        .unwrap();

        assert_eq!(utilization.media("call").unwrap().maximum_capacity, Some(1));
        assert!(utilization.media("chat").is_none());
        assert_eq!(
            utilization.label_utilizations.unwrap()["label-1"].interrupting_label_ids,
            Some(vec!["label-2".to_string()])
        );
    }

    #[test]
    fn test_handle_uses_org_id() {
        let handle = RoutingUtilization::default().handle().unwrap();
        assert_eq!(handle.id, ORG_UTILIZATION_ID);
    }
}
