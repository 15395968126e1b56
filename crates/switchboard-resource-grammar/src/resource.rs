use async_trait::async_trait;
use switchboard_resource_api::{
    build,
    ChildProxy,
    ConfigNode,
    HttpTransfer,
    LazyProxy,
    Orchestrator,
    PlatformClient,
    Reconciler,
    RemoteProxy,
    Resource,
    ResourceHandle,
    ResourceMetadata,
    ResourceResult,
    ResourceState,
    Timeouts,
    Transfer,
};
use tracing::info;

use crate::client::ArchitectGrammarProxy;
use crate::metadata;
use crate::types::{
    Grammar,
    GrammarLanguage,
};

pub struct GrammarResource<P = ArchitectGrammarProxy, X = HttpTransfer> {
    metadata: ResourceMetadata,
    proxy: LazyProxy<P>,
    transfer: X,
}

impl GrammarResource {
    pub fn new(client: PlatformClient, timeouts: Timeouts) -> Self {
        let transfer = HttpTransfer::new(client.http().clone());
        Self {
            metadata: metadata::create_metadata(timeouts),
            proxy: LazyProxy::new(client, ArchitectGrammarProxy::new),
            transfer,
        }
    }
}

impl<P, X> GrammarResource<P, X>
where
    P: RemoteProxy<Object = Grammar> + ChildProxy<Child = GrammarLanguage>,
    X: Transfer,
{
    pub fn with_proxy(proxy: P, transfer: X, timeouts: Timeouts) -> Self {
        Self {
            metadata: metadata::create_metadata(timeouts),
            proxy: LazyProxy::ready(proxy),
            transfer,
        }
    }

    pub fn proxy(&self) -> ResourceResult<&P> {
        self.proxy.get()
    }

    pub fn transfer(&self) -> &X {
        &self.transfer
    }

    fn reconciler<'a>(&self, proxy: &'a P) -> Reconciler<'a, P> {
        Reconciler::new(proxy, self.metadata.timeouts)
    }

    /// Parent patch followed by language upserts
    async fn apply_update(&self, proxy: &P, id: &str, grammar: &Grammar) -> ResourceResult<()> {
        let (handle, _) = self
            .reconciler(proxy)
            .update(id, &grammar.parent_only())
            .await?;

        Orchestrator::new(proxy, &self.transfer)
            .update_children(&handle, grammar.languages())
            .await
    }
}

#[async_trait]
impl<P, X> Resource for GrammarResource<P, X>
where
    P: RemoteProxy<Object = Grammar> + ChildProxy<Child = GrammarLanguage> + 'static,
    X: Transfer + 'static,
{
    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    async fn create(&self, config: &ConfigNode) -> ResourceResult<ResourceState> {
        let grammar: Grammar = build(config)?;
        let proxy = self.proxy.get()?;
        let reconciler = self.reconciler(proxy);

        let (handle, _) = reconciler.create(&grammar.parent_only()).await?;
        Orchestrator::new(proxy, &self.transfer)
            .create_children(&handle, grammar.languages())
            .await?;

        info!("Created grammar {} with {} languages", handle.id, grammar.languages().len());
        reconciler
            .settle(&handle.id, config, || {
                self.apply_update(proxy, &handle.id, &grammar)
            })
            .await
    }

    async fn read(&self, id: &str) -> ResourceResult<ResourceState> {
        self.reconciler(self.proxy.get()?).read_state(id).await
    }

    async fn update(&self, id: &str, config: &ConfigNode) -> ResourceResult<ResourceState> {
        let grammar: Grammar = build(config)?;
        let proxy = self.proxy.get()?;

        self.apply_update(proxy, id, &grammar).await?;
        self.reconciler(proxy)
            .settle(id, config, || self.apply_update(proxy, id, &grammar))
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
