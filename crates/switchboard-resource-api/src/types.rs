use std::collections::HashMap;
use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};

use crate::node::ConfigNode;

/// Page size used by every bulk listing
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Identity of a persisted remote resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHandle {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ResourceHandle {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }
}

/// Accessors the engine needs on every remote domain object
pub trait RemoteObject: Send + Sync {
    fn id(&self) -> Option<&str>;

    fn name(&self) -> Option<&str>;

    fn version(&self) -> Option<String> {
        None
    }

    /// Builds a handle once the remote side assigned an id
    fn handle(&self) -> Option<ResourceHandle> {
        let id = self.id()?;
        Some(
            ResourceHandle::new(id, self.name().unwrap_or_default()).with_version(self.version()),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub page: usize,
    pub page_size: usize,
}

impl PageCursor {
    pub fn first() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn next(self) -> Self {
        Self {
            page: self.page + 1,
            ..self
        }
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of a remote listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default)]
    pub entities: Option<Vec<T>>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page_number: Option<u64>,
    #[serde(default)]
    pub page_size: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(entities: Vec<T>) -> Self {
        Self {
            entities: Some(entities),
            total: None,
            page_number: None,
            page_size: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// A null entity collection counts as empty
    pub fn is_empty(&self) -> bool {
        self.entities.as_ref().map_or(true, Vec::is_empty)
    }

    pub fn into_entities(self) -> Vec<T> {
        self.entities.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Server-side listing filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Exact-name filter
    pub name: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl ListFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Query pairs for the listing endpoint, cursor included
    pub fn query(&self, cursor: PageCursor) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("pageNumber", cursor.page.to_string()),
            ("pageSize", cursor.page_size.to_string()),
        ];
        if let Some(name) = &self.name {
            query.push(("name", name.clone()));
        }
        if let Some(sort_by) = &self.sort_by {
            query.push(("sortBy", sort_by.clone()));
        }
        if let Some(order) = self.sort_order {
            query.push(("sortOrder", order.as_str().to_string()));
        }
        query
    }
}

/// A local file declared by a child sub-resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Content kind the upload endpoint expects, e.g. `voice` or `dtmf`
    pub kind: String,
    pub file_name: PathBuf,
    pub file_type: Option<String>,
}

/// Pre-signed destination returned by phase one of an upload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTarget {
    pub url: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// Result of a reconciliation step: the handle plus the flattened remote state
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState {
    pub handle: ResourceHandle,
    pub config: ConfigNode,
}
