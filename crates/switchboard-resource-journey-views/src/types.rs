//! Wire types for the journey views API

use serde::{
    Deserialize,
    Serialize,
};
use switchboard_resource_api::RemoteObject;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Bumped by the platform on every saved version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    /// ISO-8601 duration the view covers, e.g. `P1D`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// ISO-8601 interval, mutually exclusive with `duration`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<JourneyElement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charts: Option<Vec<JourneyChart>>,
}

impl RemoteObject for JourneyView {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn version(&self) -> Option<String> {
        self.version.map(|v| v.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyElement {
    /// Chosen by the author; metrics and links refer to elements by it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<ElementAttributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<ElementFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followed_by: Option<Vec<JourneyLink>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementAttributes {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementFilter {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicates: Option<Vec<FilterPredicate>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPredicate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_value: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyLink {
    /// Id of the element that follows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint_within: Option<TimeConstraint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint_after: Option<TimeConstraint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_count_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_attributes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeConstraint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyChart {
    /// Assigned by the platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<ChartMetric>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_attributes: Option<DisplayAttributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by_attributes: Option<Vec<GroupByAttribute>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetric {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayAttributes {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_legend: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupByAttribute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_type_fields_use_wire_name() {
        let filter = ElementFilter {
            kind: Some("And".to_string()),
            predicates: None,
        };
        assert_eq!(serde_json::to_value(&filter).unwrap(), json!({"type": "And"}));
    }

    #[test]
    fn test_deserialize_nested_view() {
        let view: JourneyView = serde_json::from_value(json!({
            "id": "jv-1",
            "name": "Web to voice",
            "version": 3,
            "duration": "P1D",
            "elements": [{
                "id": "e1",
                "name": "Web visit",
                "attributes": {"type": "Event", "id": "e-web", "source": "Web"},
                "followedBy": [{"id": "e2", "constraintWithin": {"unit": "Hours", "value": 2}}]
            }],
            "charts": [{"id": "c-1", "name": "Totals", "groupByMax": 5}]
        }))
        .unwrap();

        assert_eq!(view.handle().unwrap().version.as_deref(), Some("3"));
        let elements = view.elements.unwrap();
        let link = &elements[0].followed_by.as_ref().unwrap()[0];
        assert_eq!(link.constraint_within.as_ref().unwrap().value, Some(2));
        assert_eq!(view.charts.unwrap()[0].group_by_max, Some(5));
    }
}
