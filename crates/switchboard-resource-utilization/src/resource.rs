use async_trait::async_trait;
use switchboard_resource_api::{
    build,
    flatten,
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
use tracing::{
    debug,
    info,
};

use crate::client::RoutingUtilizationProxy;
use crate::metadata;
use crate::types::{
    RoutingUtilization,
    ORG_UTILIZATION_ID,
};

pub struct UtilizationResource<P = RoutingUtilizationProxy> {
    metadata: ResourceMetadata,
    proxy: LazyProxy<P>,
}

impl UtilizationResource {
    pub fn new(client: PlatformClient, timeouts: Timeouts) -> Self {
        Self {
            metadata: metadata::create_metadata(timeouts),
            proxy: LazyProxy::new(client, RoutingUtilizationProxy::new),
        }
    }
}

impl<P> UtilizationResource<P>
where
    P: RemoteProxy<Object = RoutingUtilization>,
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

    /// Replaces the org settings and reads them back.
    ///
    /// The read-back is compared with the normalised declaration, since labels
    /// come back ordered by id whatever order they were declared in.
    async fn put(&self, config: &ConfigNode) -> ResourceResult<ResourceState> {
        let utilization: RoutingUtilization = build(config)?;
        let proxy = self.proxy.get()?;
        let reconciler = self.reconciler(proxy);

        reconciler.update(ORG_UTILIZATION_ID, &utilization).await?;
        reconciler
            .settle(ORG_UTILIZATION_ID, &flatten(&utilization), || async {
                reconciler
                    .update(ORG_UTILIZATION_ID, &utilization)
                    .await
                    .map(|_| ())
            })
            .await
    }
}

#[async_trait]
impl<P> Resource for UtilizationResource<P>
where
    P: RemoteProxy<Object = RoutingUtilization> + 'static,
{
    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    async fn create(&self, config: &ConfigNode) -> ResourceResult<ResourceState> {
        debug!("Routing utilization is an org singleton, create replaces it");
        self.put(config).await
    }

    async fn read(&self, _id: &str) -> ResourceResult<ResourceState> {
        self.reconciler(self.proxy.get()?)
            .read_state(ORG_UTILIZATION_ID)
            .await
    }

    async fn update(&self, _id: &str, config: &ConfigNode) -> ResourceResult<ResourceState> {
        self.put(config).await
    }

    /// Resets to defaults; the object never disappears, so there is nothing to wait for
    async fn delete(&self, _id: &str) -> ResourceResult<()> {
        info!("Resetting routing utilization to defaults");
        self.proxy.get()?.delete(ORG_UTILIZATION_ID).await?;
        Ok(())
    }

    async fn export_all(&self) -> ResourceResult<Vec<ResourceHandle>> {
        self.reconciler(self.proxy.get()?).export_all().await
    }

    async fn lookup_id(&self, _name: &str) -> ResourceResult<String> {
        Ok(ORG_UTILIZATION_ID.to_string())
    }
}
