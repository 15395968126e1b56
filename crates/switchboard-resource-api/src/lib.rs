//! Resource reconciliation engine for Switchboard
//!
//! Each resource family crate supplies domain types, a [`RemoteProxy`] over the
//! platform API and mapper impls. This crate provides everything generic:
//! - `node` / `mapper` - configuration trees and their typed conversion
//! - `proxy` / `transport` - remote capability traits and the HTTP transport
//! - `retry` - consistency-retrying reads after create and delete
//! - `paginator` - listing walks and name lookup
//! - `orchestrator` / `upload` - children and two-phase attachment uploads
//! - `reconcile` - the generic CRUD loop
//! - `resource` / `registry` - the family trait and its registry

pub mod error;
pub mod mapper;
pub mod node;
pub mod orchestrator;
pub mod paginator;
pub mod proxy;
pub mod reconcile;
pub mod registry;
pub mod resource;
pub mod retry;
pub mod transport;
pub mod types;
pub mod upload;

pub use error::{
    OrchestrationPhase,
    PartialFailure,
    RemoteError,
    RemoteResult,
    ResourceError,
    ResourceResult,
};
pub use mapper::{
    build,
    flatten,
    Fields,
    FromConfigNode,
    NodeBuilder,
    ToConfigNode,
};
pub use node::{
    ConfigNode,
    Scalar,
};
pub use orchestrator::Orchestrator;
pub use proxy::{
    ChildProxy,
    LazyProxy,
    RemoteProxy,
    SubResource,
};
pub use reconcile::{
    Reconciler,
    Timeouts,
};
pub use registry::ResourceRegistry;
pub use resource::{
    Resource,
    ResourceCapabilities,
    ResourceMetadata,
};
pub use retry::{
    Backoff,
    ConsistencyReader,
};
pub use transport::PlatformClient;
pub use types::{
    Attachment,
    ListFilter,
    Page,
    PageCursor,
    RemoteObject,
    ResourceHandle,
    ResourceState,
    UploadTarget,
};
pub use upload::{
    HttpTransfer,
    Transfer,
};

#[macro_export]
macro_rules! register_resource {
    ($resource_type:ty) => {
        pub fn register(
            registry: &mut $crate::ResourceRegistry, client: &$crate::PlatformClient,
            timeouts: $crate::Timeouts,
        ) {
            registry.register(Box::new(<$resource_type>::new(client.clone(), timeouts)));
        }
    };
}
