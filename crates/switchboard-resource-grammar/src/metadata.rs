use switchboard_resource_api::{
    ResourceCapabilities,
    ResourceMetadata,
    Timeouts,
};

pub const TYPE_NAME: &str = "switchboard_architect_grammar";

pub fn create_metadata(timeouts: Timeouts) -> ResourceMetadata {
    ResourceMetadata {
        type_name: TYPE_NAME.to_string(),
        name: "Architect Grammar".to_string(),
        description: "Architect grammars with per-language voice and dtmf grammar files"
            .to_string(),
        capabilities: create_capabilities(),
        timeouts,
    }
}

fn create_capabilities() -> ResourceCapabilities {
    ResourceCapabilities {
        export: true,
        sub_resources: true,
        attachments: true,
        singleton: false,
    }
}
