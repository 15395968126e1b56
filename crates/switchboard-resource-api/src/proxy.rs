//! Capability traits over the remote API, one implementation per resource family
//!
//! Every method is exactly one network round trip. Tests substitute their own
//! implementations instead of talking to the platform.

use std::sync::OnceLock;

use async_trait::async_trait;

use crate::error::{
    RemoteResult,
    ResourceError,
    ResourceResult,
};
use crate::paginator;
use crate::transport::PlatformClient;
use crate::types::{
    Attachment,
    ListFilter,
    Page,
    PageCursor,
    RemoteObject,
    UploadTarget,
};

#[async_trait]
pub trait RemoteProxy: Send + Sync {
    type Object: RemoteObject + Clone + 'static;

    /// Family name used in log lines and error messages
    fn family(&self) -> &str;

    async fn create(&self, object: &Self::Object) -> RemoteResult<Self::Object>;

    async fn get_by_id(&self, id: &str) -> RemoteResult<Self::Object>;

    async fn update(&self, id: &str, object: &Self::Object) -> RemoteResult<Self::Object>;

    async fn delete(&self, id: &str) -> RemoteResult<()>;

    async fn list_page(
        &self, cursor: PageCursor, filter: &ListFilter,
    ) -> RemoteResult<Page<Self::Object>>;

    /// Resolves a display name to a remote id from the first filtered page.
    ///
    /// An empty page is retryable, the listing may predate propagation.
    async fn get_id_by_name(&self, name: &str) -> ResourceResult<String> {
        paginator::find_id_by_name(self, name).await
    }
}

/// A named child of a parent resource, identified by a natural key
pub trait SubResource: Send + Sync + Clone {
    /// The mutable subset sent when the child already exists
    type Patch: Send + Sync;

    fn natural_key(&self) -> &str;

    fn patch(&self) -> Self::Patch;

    /// Files to upload after the child is created or patched, in order
    fn attachments(&self) -> Vec<Attachment> {
        Vec::new()
    }
}

#[async_trait]
pub trait ChildProxy: Send + Sync {
    type Child: SubResource + 'static;

    async fn create_child(&self, parent_id: &str, child: &Self::Child) -> RemoteResult<Self::Child>;

    async fn get_child(&self, parent_id: &str, key: &str) -> RemoteResult<Self::Child>;

    async fn patch_child(
        &self, parent_id: &str, key: &str, patch: &<Self::Child as SubResource>::Patch,
    ) -> RemoteResult<Self::Child>;

    /// Phase one of an attachment upload
    async fn request_upload_target(
        &self, parent_id: &str, key: &str, attachment: &Attachment,
    ) -> RemoteResult<UploadTarget>;
}

/// Per-family proxy built on first use and reused for the process lifetime.
///
/// Construction runs at most once even under concurrent first access.
pub struct LazyProxy<P> {
    cell: OnceLock<P>,
    source: Option<(PlatformClient, fn(&PlatformClient) -> P)>,
}

impl<P> LazyProxy<P> {
    pub fn new(client: PlatformClient, init: fn(&PlatformClient) -> P) -> Self {
        Self {
            cell: OnceLock::new(),
            source: Some((client, init)),
        }
    }

    /// Wraps an already constructed proxy, e.g. a test double
    pub fn ready(proxy: P) -> Self {
        Self {
            cell: OnceLock::from(proxy),
            source: None,
        }
    }

    pub fn get(&self) -> ResourceResult<&P> {
        if let Some(proxy) = self.cell.get() {
            return Ok(proxy);
        }

        let (client, init) = self.source.as_ref().ok_or_else(|| {
            ResourceError::Internal("Proxy has neither an instance nor a client".to_string())
        })?;
        Ok(self.cell.get_or_init(|| init(client)))
    }
}
