use switchboard_resource_api::{
    ResourceCapabilities,
    ResourceMetadata,
    Timeouts,
};

pub const TYPE_NAME: &str = "switchboard_outbound_digitalruleset";

pub fn create_metadata(timeouts: Timeouts) -> ResourceMetadata {
    ResourceMetadata {
        type_name: TYPE_NAME.to_string(),
        name: "Outbound Digital Rule Set".to_string(),
        description: "Rules evaluated before digital outbound contacts are sent".to_string(),
        capabilities: ResourceCapabilities {
            export: true,
            ..ResourceCapabilities::default()
        },
        timeouts,
    }
}
