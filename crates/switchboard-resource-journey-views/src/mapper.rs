use std::collections::BTreeSet;

use switchboard_resource_api::{
    ConfigNode,
    Fields,
    FromConfigNode,
    NodeBuilder,
    ResourceError,
    ResourceResult,
    ToConfigNode,
};

use crate::types::*;

impl FromConfigNode for JourneyView {
    fn from_node_at(node: &ConfigNode, path: &str) -> ResourceResult<Self> {
        let view = Fields::read(node, path, |fields| {
            Ok(JourneyView {
                id: None,
                name: Some(fields.required_string("name")?),
                description: fields.string("description")?,
                version: None,
                duration: fields.string("duration")?,
                interval: fields.string("interval")?,
                elements: fields.list("elements", build_element)?,
                charts: fields.list("charts", build_chart)?,
            })
        })?;
        validate(&view)?;
        Ok(view)
    }
}

fn build_element(fields: Fields<'_>) -> ResourceResult<JourneyElement> {
    Ok(JourneyElement {
        id: Some(fields.required_string("id")?),
        name: Some(fields.required_string("name")?),
        attributes: fields.block("attributes", |a| {
            Ok(ElementAttributes {
                kind: a.string("type")?,
                id: a.string("id")?,
                source: a.string("source")?,
            })
        })?,
        filter: fields.block("filter", |f| {
            Ok(ElementFilter {
                kind: f.string("type")?,
                predicates: f.list("predicates", |p| {
                    Ok(FilterPredicate {
                        dimension: p.string("dimension")?,
                        values: p.string_list("values")?,
                        operator: p.string("operator")?,
                        no_value: p.bool("no_value")?,
                    })
                })?,
            })
        })?,
        followed_by: fields.list("followed_by", build_link)?,
    })
}

fn build_link(fields: Fields<'_>) -> ResourceResult<JourneyLink> {
    Ok(JourneyLink {
        id: Some(fields.required_string("id")?),
        constraint_within: fields.block("constraint_within", build_constraint)?,
        constraint_after: fields.block("constraint_after", build_constraint)?,
        event_count_type: fields.string("event_count_type")?,
        join_attributes: fields.string_list("join_attributes")?,
    })
}

fn build_constraint(fields: Fields<'_>) -> ResourceResult<TimeConstraint> {
    Ok(TimeConstraint {
        unit: fields.string("unit")?,
        value: fields.int("value")?,
    })
}

fn build_chart(fields: Fields<'_>) -> ResourceResult<JourneyChart> {
    Ok(JourneyChart {
        id: None,
        name: Some(fields.required_string("name")?),
        version: fields.int("version")?,
        metrics: fields.list("metrics", |m| {
            Ok(ChartMetric {
                id: m.string("id")?,
                element_id: m.string("element_id")?,
                aggregate: m.string("aggregate")?,
                display_label: m.string("display_label")?,
            })
        })?,
        group_by_time: fields.string("group_by_time")?,
        group_by_max: fields.int("group_by_max")?,
        display_attributes: fields.block("display_attributes", |d| {
            Ok(DisplayAttributes {
                kind: d.string("var_type")?,
                group_by_title: d.string("group_by_title")?,
                metrics_title: d.string("metrics_title")?,
                show_legend: d.bool("show_legend")?,
            })
        })?,
        group_by_attributes: fields.list("group_by_attributes", |g| {
            Ok(GroupByAttribute {
                attribute: g.string("attribute")?,
                element_id: g.string("element_id")?,
            })
        })?,
    })
}

/// Cross-field rules the platform would otherwise reject after the fact
fn validate(view: &JourneyView) -> ResourceResult<()> {
    if view.duration.is_some() && view.interval.is_some() {
        return Err(ResourceError::InvalidConfig(
            "duration and interval cannot both be set".to_string(),
        ));
    }

    let elements = view.elements.as_deref().unwrap_or_default();
    let mut known = BTreeSet::new();
    for element in elements {
        if let Some(id) = element.id.as_deref() {
            if !known.insert(id) {
                return Err(ResourceError::InvalidConfig(format!(
                    "element id {id} is declared more than once"
                )));
            }
        }
    }

    let links = elements
        .iter()
        .flat_map(|e| e.followed_by.as_deref().unwrap_or_default())
        .map(|link| ("followed_by", link.id.as_deref()));
    let charts = view.charts.as_deref().unwrap_or_default();
    let metrics = charts
        .iter()
        .flat_map(|c| c.metrics.as_deref().unwrap_or_default())
        .map(|metric| ("metrics", metric.element_id.as_deref()));
    let group_bys = charts
        .iter()
        .flat_map(|c| c.group_by_attributes.as_deref().unwrap_or_default())
        .map(|group_by| ("group_by_attributes", group_by.element_id.as_deref()));

    for (field, reference) in links.chain(metrics).chain(group_bys) {
        if let Some(id) = reference {
            if !known.contains(id) {
                return Err(ResourceError::InvalidConfig(format!(
                    "{field} refers to unknown element {id}"
                )));
            }
        }
    }
    Ok(())
}

impl ToConfigNode for JourneyView {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("name", self.name.as_deref())
            .string("description", self.description.as_deref())
            .string("duration", self.duration.as_deref())
            .string("interval", self.interval.as_deref())
            .list("elements", self.elements.as_deref())
            .list("charts", self.charts.as_deref())
            .build()
    }
}

impl ToConfigNode for JourneyElement {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("id", self.id.as_deref())
            .string("name", self.name.as_deref())
            .block("attributes", self.attributes.as_ref())
            .block("filter", self.filter.as_ref())
            .list("followed_by", self.followed_by.as_deref())
            .build()
    }
}

impl ToConfigNode for ElementAttributes {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("type", self.kind.as_deref())
            .string("id", self.id.as_deref())
            .string("source", self.source.as_deref())
            .build()
    }
}

impl ToConfigNode for ElementFilter {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("type", self.kind.as_deref())
            .list("predicates", self.predicates.as_deref())
            .build()
    }
}

impl ToConfigNode for FilterPredicate {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("dimension", self.dimension.as_deref())
            .string_list("values", self.values.as_deref())
            .string("operator", self.operator.as_deref())
            .bool("no_value", self.no_value)
            .build()
    }
}

impl ToConfigNode for JourneyLink {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("id", self.id.as_deref())
            .block("constraint_within", self.constraint_within.as_ref())
            .block("constraint_after", self.constraint_after.as_ref())
            .string("event_count_type", self.event_count_type.as_deref())
            .string_list("join_attributes", self.join_attributes.as_deref())
            .build()
    }
}

impl ToConfigNode for TimeConstraint {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("unit", self.unit.as_deref())
            .int("value", self.value)
            .build()
    }
}

impl ToConfigNode for JourneyChart {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("name", self.name.as_deref())
            .int("version", self.version)
            .list("metrics", self.metrics.as_deref())
            .string("group_by_time", self.group_by_time.as_deref())
            .int("group_by_max", self.group_by_max)
            .block("display_attributes", self.display_attributes.as_ref())
            .list("group_by_attributes", self.group_by_attributes.as_deref())
            .build()
    }
}

impl ToConfigNode for ChartMetric {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("id", self.id.as_deref())
            .string("element_id", self.element_id.as_deref())
            .string("aggregate", self.aggregate.as_deref())
            .string("display_label", self.display_label.as_deref())
            .build()
    }
}

impl ToConfigNode for DisplayAttributes {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("var_type", self.kind.as_deref())
            .string("group_by_title", self.group_by_title.as_deref())
            .string("metrics_title", self.metrics_title.as_deref())
            .bool("show_legend", self.show_legend)
            .build()
    }
}

impl ToConfigNode for GroupByAttribute {
    fn to_node(&self) -> ConfigNode {
        NodeBuilder::new()
            .string("attribute", self.attribute.as_deref())
            .string("element_id", self.element_id.as_deref())
            .build()
    }
}
