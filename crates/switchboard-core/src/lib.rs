pub mod config;
pub mod error;
pub mod export;
pub mod http_client;
pub mod logging;
pub mod resources;

pub use config::{
    ConfigLoadError,
    ConfigLoader,
    SwitchboardConfig,
};
pub use error::{
    CoreError,
    CoreResult,
};
pub use export::{
    ExportFailure,
    ExportService,
    ExportSnapshot,
    ExportedResource,
};
use switchboard_resource_api::{
    PlatformClient,
    ResourceRegistry,
};

/// Everything a host needs to reconcile or export, built once from configuration
pub struct CoreContext {
    pub config: SwitchboardConfig,

    pub client: PlatformClient,

    pub registry: ResourceRegistry,
}

impl CoreContext {
    pub fn new(config: SwitchboardConfig) -> CoreResult<Self> {
        let client = http_client::create_platform_client(&config.platform)?;
        let registry =
            resources::create_resource_registry(&client, config.timeouts.to_timeouts());

        tracing::info!(
            base_url = %client.base_url(),
            families = registry.count(),
            "Initialized core context"
        );

        Ok(Self {
            config,
            client,
            registry,
        })
    }

    pub fn from_default_config() -> CoreResult<Self> {
        Self::new(ConfigLoader::load_default()?)
    }

    pub fn export_service(&self) -> ExportService<'_> {
        ExportService::new(&self.registry)
    }

    /// Exports the families selected in `[export]`
    pub async fn export(&self) -> CoreResult<ExportSnapshot> {
        self.export_service()
            .export(&self.config.export.resource_types)
            .await
    }
}
