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

use crate::client::OutboundDigitalRuleSetProxy;
use crate::metadata;
use crate::types::DigitalRuleSet;

pub struct DigitalRuleSetResource<P = OutboundDigitalRuleSetProxy> {
    metadata: ResourceMetadata,
    proxy: LazyProxy<P>,
}

impl DigitalRuleSetResource {
    pub fn new(client: PlatformClient, timeouts: Timeouts) -> Self {
        Self {
            metadata: metadata::create_metadata(timeouts),
            proxy: LazyProxy::new(client, OutboundDigitalRuleSetProxy::new),
        }
    }
}

impl<P> DigitalRuleSetResource<P>
where
    P: RemoteProxy<Object = DigitalRuleSet>,
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

    /// Puts the declaration over the current version
    async fn apply_update(
        &self, proxy: &P, id: &str, rule_set: &DigitalRuleSet,
    ) -> ResourceResult<()> {
        // Single read: a missing rule set is not a propagation delay here
        let current = proxy.get_by_id(id).await?;
        debug!("Rule set {id} is at version {:?}", current.version);

        let body = DigitalRuleSet {
            version: current.version,
            ..rule_set.clone()
        };
        self.reconciler(proxy).update(id, &body).await?;
        Ok(())
    }
}

#[async_trait]
impl<P> Resource for DigitalRuleSetResource<P>
where
    P: RemoteProxy<Object = DigitalRuleSet> + 'static,
{
    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    async fn create(&self, config: &ConfigNode) -> ResourceResult<ResourceState> {
        let rule_set: DigitalRuleSet = build(config)?;
        let proxy = self.proxy.get()?;
        let reconciler = self.reconciler(proxy);

        let (handle, _) = reconciler.create(&rule_set).await?;
        reconciler
            .settle(&handle.id, config, || {
                self.apply_update(proxy, &handle.id, &rule_set)
            })
            .await
    }

    async fn read(&self, id: &str) -> ResourceResult<ResourceState> {
        self.reconciler(self.proxy.get()?).read_state(id).await
    }

    async fn update(&self, id: &str, config: &ConfigNode) -> ResourceResult<ResourceState> {
        let rule_set: DigitalRuleSet = build(config)?;
        let proxy = self.proxy.get()?;

        self.apply_update(proxy, id, &rule_set).await?;
        self.reconciler(proxy)
            .settle(id, config, || self.apply_update(proxy, id, &rule_set))
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
