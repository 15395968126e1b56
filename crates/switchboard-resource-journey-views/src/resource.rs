use async_trait::async_trait;
use switchboard_resource_api::{
    build,
    ConfigNode,
    LazyProxy,
    PlatformClient,
    Reconciler,
    RemoteProxy,
    Resource,
    ResourceHandle,
    ResourceMetadata,
    ResourceResult,
    ResourceState,
    Timeouts,
};
use tracing::debug;

use crate::client::JourneyViewProxy;
use crate::metadata;
use crate::types::JourneyView;

pub struct JourneyViewResource<P = JourneyViewProxy> {
    metadata: ResourceMetadata,
    proxy: LazyProxy<P>,
}

impl JourneyViewResource {
    pub fn new(client: PlatformClient, timeouts: Timeouts) -> Self {
        Self {
            metadata: metadata::create_metadata(timeouts),
            proxy: LazyProxy::new(client, JourneyViewProxy::new),
        }
    }
}

impl<P> JourneyViewResource<P>
where
    P: RemoteProxy<Object = JourneyView>,
{
    pub fn with_proxy(proxy: P, timeouts: Timeouts) -> Self {
        Self {
            metadata: metadata::create_metadata(timeouts),
            proxy: LazyProxy::ready(proxy),
        }
    }

    pub fn proxy(&self) -> ResourceResult<&P> {
        self.proxy.get()
    }

    fn reconciler<'a>(&self, proxy: &'a P) -> Reconciler<'a, P> {
        Reconciler::new(proxy, self.metadata.timeouts)
    }

    /// Saves the declaration as the version after the current one
    async fn save_version(&self, proxy: &P, id: &str, view: &JourneyView) -> ResourceResult<()> {
        let current = proxy.get_by_id(id).await?;
        debug!("Journey view {id} is at version {:?}", current.version);

        let body = JourneyView {
            id: Some(id.to_string()),
            version: current.version,
            ..view.clone()
        };
        self.reconciler(proxy).update(id, &body).await?;
        Ok(())
    }
}

#[async_trait]
impl<P> Resource for JourneyViewResource<P>
where
    P: RemoteProxy<Object = JourneyView> + 'static,
{
    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    async fn create(&self, config: &ConfigNode) -> ResourceResult<ResourceState> {
        let view: JourneyView = build(config)?;
        let proxy = self.proxy.get()?;
        let reconciler = self.reconciler(proxy);

        let (handle, _) = reconciler.create(&view).await?;
        reconciler
            .settle(&handle.id, config, || self.save_version(proxy, &handle.id, &view))
            .await
    }

    async fn read(&self, id: &str) -> ResourceResult<ResourceState> {
        self.reconciler(self.proxy.get()?).read_state(id).await
    }

    async fn update(&self, id: &str, config: &ConfigNode) -> ResourceResult<ResourceState> {
        let view: JourneyView = build(config)?;
        let proxy = self.proxy.get()?;

        self.save_version(proxy, id, &view).await?;
        self.reconciler(proxy)
            .settle(id, config, || self.save_version(proxy, id, &view))
            .await
    }

    async fn delete(&self, id: &str) -> ResourceResult<()> {
        self.reconciler(self.proxy.get()?).delete(id).await
    }

    async fn export_all(&self) -> ResourceResult<Vec<ResourceHandle>> {
        self.reconciler(self.proxy.get()?).export_all().await
    }

    async fn lookup_id(&self, name: &str) -> ResourceResult<String> {
        self.reconciler(self.proxy.get()?).lookup_id(name).await
    }
}
