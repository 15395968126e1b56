//! Bulk export of every object the provider manages into one JSON snapshot

use std::path::Path;

use chrono::{
    DateTime,
    Utc,
};
use futures::stream::{
    self,
    StreamExt,
};
use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};
use switchboard_resource_api::{
    Resource,
    ResourceHandle,
    ResourceRegistry,
};
use tracing::{
    info,
    warn,
};

use crate::error::{
    CoreError,
    CoreResult,
};

/// Objects read back concurrently within one family
const READ_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedResource {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub config: serde_json::Value,
}

/// A family or object that could not be exported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportFailure {
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub exported_at: DateTime<Utc>,
    /// resource type -> id -> object, in listing order
    pub resources: IndexMap<String, IndexMap<String, ExportedResource>>,
    pub errors: Vec<ExportFailure>,
}

impl ExportSnapshot {
    pub fn resource_count(&self) -> usize {
        self.resources.values().map(IndexMap::len).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    pub async fn write_to(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

struct FamilyExport {
    resource_type: String,
    resources: IndexMap<String, ExportedResource>,
    errors: Vec<ExportFailure>,
}

pub struct ExportService<'a> {
    registry: &'a ResourceRegistry,
}

impl<'a> ExportService<'a> {
    pub fn new(registry: &'a ResourceRegistry) -> Self {
        Self { registry }
    }

    /// Families to walk; an empty selection means all exportable ones
    fn select(&self, resource_types: &[String]) -> CoreResult<Vec<&'a dyn Resource>> {
        if resource_types.is_empty() {
            return Ok(self
                .registry
                .iter()
                .filter(|r| r.metadata().capabilities.export)
                .collect());
        }

        resource_types
            .iter()
            .map(|type_name| {
                self.registry
                    .get(type_name)
                    .ok_or_else(|| CoreError::UnknownResourceType(type_name.clone()))
            })
            .collect()
    }

    pub async fn export(&self, resource_types: &[String]) -> CoreResult<ExportSnapshot> {
        let families = self.select(resource_types)?;
        info!("Exporting {} resource families", families.len());

        let results = futures::future::join_all(families.into_iter().map(export_family)).await;

        let mut snapshot = ExportSnapshot {
            exported_at: Utc::now(),
            resources: IndexMap::new(),
            errors: Vec::new(),
        };
        for family in results {
            snapshot.errors.extend(family.errors);
            snapshot
                .resources
                .insert(family.resource_type, family.resources);
        }

        if snapshot.is_complete() {
            info!("Exported {} resources", snapshot.resource_count());
        } else {
            warn!(
                "Exported {} resources with {} failures",
                snapshot.resource_count(),
                snapshot.errors.len()
            );
        }
        Ok(snapshot)
    }
}

async fn export_family(resource: &dyn Resource) -> FamilyExport {
    let resource_type = resource.type_name().to_string();
    let mut family = FamilyExport {
        resource_type: resource_type.clone(),
        resources: IndexMap::new(),
        errors: Vec::new(),
    };

    let handles = match resource.export_all().await {
        Ok(handles) => handles,
        Err(e) => {
            warn!("Failed to list {resource_type}: {e}");
            family.errors.push(ExportFailure {
                resource_type,
                id: None,
                message: e.to_string(),
            });
            return family;
        }
    };

    let reads: Vec<_> = stream::iter(handles)
        .map(|handle| async move {
            let result = resource.read(&handle.id).await;
            (handle, result)
        })
        .buffered(READ_CONCURRENCY)
        .collect()
        .await;

    for (handle, result) in reads {
        match result {
            Ok(state) => {
                family.resources.insert(
                    handle.id.clone(),
                    exported(&handle, state.handle, state.config.to_json()),
                );
            }
            Err(e) => {
                warn!("Failed to read {resource_type} {}: {e}", handle.id);
                family.errors.push(ExportFailure {
                    resource_type: resource_type.clone(),
                    id: Some(handle.id),
                    message: e.to_string(),
                });
            }
        }
    }
    family
}

/// Prefers the freshly read name and version over the listing's
fn exported(
    listed: &ResourceHandle, read: ResourceHandle, config: serde_json::Value,
) -> ExportedResource {
    let name = if read.name.is_empty() {
        listed.name.clone()
    } else {
        read.name
    };
    ExportedResource {
        name,
        version: read.version.or_else(|| listed.version.clone()),
        config,
    }
}
