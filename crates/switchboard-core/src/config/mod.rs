mod interpolation;
mod loader;
mod schema;

pub use interpolation::{
    has_variables,
    interpolate,
    interpolate_toml,
    InterpolationError,
};
pub use loader::{
    ConfigLoadError,
    ConfigLoadResult,
    ConfigLoader,
    CONFIG_PATH_ENV,
};
pub use schema::{
    ExportConfig,
    GeneralConfig,
    PlatformConfig,
    SwitchboardConfig,
    TimeoutConfig,
};
