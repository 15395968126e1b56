use switchboard_resource_api::{
    ResourceCapabilities,
    ResourceMetadata,
    Timeouts,
};

pub const TYPE_NAME: &str = "switchboard_journey_views";

pub fn create_metadata(timeouts: Timeouts) -> ResourceMetadata {
    ResourceMetadata {
        type_name: TYPE_NAME.to_string(),
        name: "Journey View".to_string(),
        description: "Customer journey views with their elements and charts".to_string(),
        capabilities: ResourceCapabilities {
            export: true,
            ..ResourceCapabilities::default()
        },
        timeouts,
    }
}
