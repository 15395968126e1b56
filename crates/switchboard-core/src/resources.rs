use switchboard_resource_api::{
    PlatformClient,
    ResourceMetadata,
    ResourceRegistry,
    Timeouts,
};

pub fn create_resource_registry(client: &PlatformClient, timeouts: Timeouts) -> ResourceRegistry {
    let mut registry = ResourceRegistry::new();

    switchboard_resource_grammar::register(&mut registry, client, timeouts);
    switchboard_resource_digitalruleset::register(&mut registry, client, timeouts);
    switchboard_resource_utilization::register(&mut registry, client, timeouts);
    switchboard_resource_journey_views::register(&mut registry, client, timeouts);

    registry
}

pub fn all_resource_metadata(registry: &ResourceRegistry) -> Vec<ResourceMetadata> {
    registry.iter().map(|r| r.metadata().clone()).collect()
}
