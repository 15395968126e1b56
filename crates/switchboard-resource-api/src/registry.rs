use std::collections::BTreeMap;

use crate::resource::Resource;

/// Resource registry - every family the provider knows, keyed by type name
pub struct ResourceRegistry {
    resources: BTreeMap<String, Box<dyn Resource>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self {
            resources: BTreeMap::new(),
        }
    }

    /// Registers a family, replacing any previous one with the same type name
    pub fn register(&mut self, resource: Box<dyn Resource>) {
        let type_name = resource.type_name().to_string();
        self.resources.insert(type_name, resource);
    }

    pub fn get(&self, type_name: &str) -> Option<&dyn Resource> {
        self.resources.get(type_name).map(|r| r.as_ref())
    }

    pub fn is_registered(&self, type_name: &str) -> bool {
        self.resources.contains_key(type_name)
    }

    /// Type names in sorted order
    pub fn type_names(&self) -> Vec<String> {
        self.resources.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Resource> {
        self.resources.values().map(|r| r.as_ref())
    }

    pub fn count(&self) -> usize {
        self.resources.len()
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::ResourceResult;
    use crate::node::ConfigNode;
    use crate::reconcile::Timeouts;
    use crate::resource::{
        ResourceCapabilities,
        ResourceMetadata,
    };
    use crate::types::ResourceState;

    struct Stub {
        metadata: ResourceMetadata,
    }

    impl Stub {
        fn new(type_name: &str) -> Self {
            Self {
                metadata: ResourceMetadata {
                    type_name: type_name.to_string(),
                    name: type_name.to_string(),
                    description: String::new(),
                    capabilities: ResourceCapabilities::default(),
                    timeouts: Timeouts::default(),
                },
            }
        }
    }

    #[async_trait]
    impl Resource for Stub {
        fn metadata(&self) -> &ResourceMetadata {
            &self.metadata
        }

        async fn create(&self, _config: &ConfigNode) -> ResourceResult<ResourceState> {
            unimplemented!()
        }

        async fn read(&self, _id: &str) -> ResourceResult<ResourceState> {
            unimplemented!()
        }

        async fn update(&self, _id: &str, _config: &ConfigNode) -> ResourceResult<ResourceState> {
            unimplemented!()
        }

        async fn delete(&self, _id: &str) -> ResourceResult<()> {
            unimplemented!()
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = ResourceRegistry::new();
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_register_and_lookup_sorted() {
        let mut registry = ResourceRegistry::new();
        registry.register(Box::new(Stub::new("switchboard_routing_utilization")));
        registry.register(Box::new(Stub::new("switchboard_architect_grammar")));

        assert!(registry.is_registered("switchboard_architect_grammar"));
        assert!(registry.get("switchboard_unknown").is_none());
        assert_eq!(
            registry.type_names(),
            vec!["switchboard_architect_grammar", "switchboard_routing_utilization"]
        );
    }

    #[tokio::test]
    async fn test_default_export_is_not_supported() {
        let stub = Stub::new("switchboard_routing_utilization");
        let err = stub.export_all().await.unwrap_err();
        assert!(err.to_string().contains("does not support export"));
    }
}
