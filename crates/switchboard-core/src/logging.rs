use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub const DEFAULT_LOG_FILTER: &str = "switchboard_core=info,switchboard_export=info,\
switchboard_resource_api=info,switchboard_resource_grammar=info,\
switchboard_resource_digitalruleset=info,switchboard_resource_utilization=info,\
switchboard_resource_journey_views=info";

pub fn init() {
    init_with_default(DEFAULT_LOG_FILTER);
}

/// `RUST_LOG` wins over `default_filter` when set
pub fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .init();
}
