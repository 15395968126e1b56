use std::path::PathBuf;

use anyhow::Context;
use switchboard_core::config::CONFIG_PATH_ENV;
use switchboard_core::{
    logging,
    ConfigLoader,
    CoreContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    let config_path = ConfigLoader::discover_config_path();
    let config = ConfigLoader::load(&config_path).with_context(|| {
        format!(
            "Failed to load config from {} (set {CONFIG_PATH_ENV} to override)",
            config_path.display()
        )
    })?;

    match config.general.log_filter.as_deref() {
        Some(filter) => logging::init_with_default(filter),
        None => logging::init(),
    }

    tracing::info!("Starting Switchboard export");
    tracing::info!("Config: {}", config_path.display());

    let output_path = PathBuf::from(&config.export.output_path);
    let context = CoreContext::new(config).context("Failed to initialize core context")?;

    let snapshot = context.export().await.context("Export failed")?;
    snapshot
        .write_to(&output_path)
        .await
        .with_context(|| format!("Failed to write snapshot to {}", output_path.display()))?;

    tracing::info!(
        resources = snapshot.resource_count(),
        failures = snapshot.errors.len(),
        "Snapshot written to {}",
        output_path.display()
    );

    for failure in &snapshot.errors {
        match &failure.id {
            Some(id) => tracing::warn!("{} {id}: {}", failure.resource_type, failure.message),
            None => tracing::warn!("{}: {}", failure.resource_type, failure.message),
        }
    }

    if !snapshot.is_complete() {
        anyhow::bail!(
            "Export finished with {} failures, see {}",
            snapshot.errors.len(),
            output_path.display()
        );
    }
    Ok(())
}
