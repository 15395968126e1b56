use async_trait::async_trait;
use serde::{
    Deserialize,
    Serialize,
};

use crate::error::{
    ResourceError,
    ResourceResult,
};
use crate::node::ConfigNode;
use crate::reconcile::Timeouts;
use crate::types::{
    ResourceHandle,
    ResourceState,
};

/// Resource metadata - describes one resource family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceMetadata {
    /// Type name used in configuration (e.g., "switchboard_architect_grammar")
    pub type_name: String,
    /// Human readable name (e.g., "Architect Grammar")
    pub name: String,
    pub description: String,
    pub capabilities: ResourceCapabilities,
    pub timeouts: Timeouts,
}

/// Resource capabilities - what the family supports beyond plain CRUD
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ResourceCapabilities {
    /// Objects can be listed for export
    pub export: bool,
    /// Parent owns children reconciled by the orchestrator
    pub sub_resources: bool,
    /// Children may declare files uploaded in two phases
    pub attachments: bool,
    /// One object per organisation; create and delete map to put and reset
    pub singleton: bool,
}

/// Main resource trait - every family implements this
#[async_trait]
pub trait Resource: Send + Sync {
    fn metadata(&self) -> &ResourceMetadata;

    async fn create(&self, config: &ConfigNode) -> ResourceResult<ResourceState>;

    async fn read(&self, id: &str) -> ResourceResult<ResourceState>;

    async fn update(&self, id: &str, config: &ConfigNode) -> ResourceResult<ResourceState>;

    async fn delete(&self, id: &str) -> ResourceResult<()>;

    /// Every object of the family, for export
    async fn export_all(&self) -> ResourceResult<Vec<ResourceHandle>> {
        Err(ResourceError::NotSupported(format!(
            "{} does not support export",
            self.type_name()
        )))
    }

    /// Resolves a display name to an id
    async fn lookup_id(&self, _name: &str) -> ResourceResult<String> {
        Err(ResourceError::NotSupported(format!(
            "{} does not support lookup by name",
            self.type_name()
        )))
    }

    fn type_name(&self) -> &str {
        &self.metadata().type_name
    }
}
