use switchboard_resource_api::{
    ResourceCapabilities,
    ResourceMetadata,
    Timeouts,
};

pub const TYPE_NAME: &str = "switchboard_routing_utilization";

pub fn create_metadata(timeouts: Timeouts) -> ResourceMetadata {
    ResourceMetadata {
        type_name: TYPE_NAME.to_string(),
        name: "Routing Utilization".to_string(),
        description: "Org-wide routing utilization per media type and label".to_string(),
        capabilities: ResourceCapabilities {
            export: true,
            singleton: true,
            ..ResourceCapabilities::default()
        },
        timeouts,
    }
}
