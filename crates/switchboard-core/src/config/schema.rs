use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};
use switchboard_resource_api::Timeouts;

pub(super) const DEFAULT_BASE_URL: &str = "https://api.mypurecloud.com";

pub(super) const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub(super) const DEFAULT_READ_TIMEOUT_SECS: u64 = 480;

pub(super) const DEFAULT_DELETE_TIMEOUT_SECS: u64 = 180;

pub(super) const DEFAULT_OUTPUT_PATH: &str = "switchboard-export.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SwitchboardConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub platform: PlatformConfig,

    #[serde(default)]
    pub timeouts: TimeoutConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

impl SwitchboardConfig {
    /// Every problem found, not just the first
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let base_url = self.platform.base_url.trim();
        if base_url.is_empty() {
            errors.push("platform.base_url must not be empty".to_string());
        } else if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            errors.push(format!(
                "platform.base_url must start with http:// or https://, got {base_url}"
            ));
        }
        if self.platform.access_token.trim().is_empty() {
            errors.push("platform.access_token must not be empty".to_string());
        }
        if self.platform.request_timeout_secs == 0 {
            errors.push("platform.request_timeout_secs must be greater than zero".to_string());
        }
        if self.timeouts.read_secs == 0 {
            errors.push("timeouts.read_secs must be greater than zero".to_string());
        }
        if self.timeouts.delete_secs == 0 {
            errors.push("timeouts.delete_secs must be greater than zero".to_string());
        }
        if self.export.output_path.trim().is_empty() {
            errors.push("export.output_path must not be empty".to_string());
        }

        errors
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneralConfig {
    /// Tracing filter directive; `RUST_LOG` still takes precedence
    #[serde(default)]
    pub log_filter: Option<String>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub access_token: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl std::fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"[REDACTED]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: String::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_read_secs")]
    pub read_secs: u64,

    #[serde(default = "default_delete_secs")]
    pub delete_secs: u64,
}

impl TimeoutConfig {
    pub fn to_timeouts(self) -> Timeouts {
        Timeouts {
            read: Duration::from_secs(self.read_secs),
            delete: Duration::from_secs(self.delete_secs),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            read_secs: default_read_secs(),
            delete_secs: default_delete_secs(),
        }
    }
}

fn default_read_secs() -> u64 {
    DEFAULT_READ_TIMEOUT_SECS
}

fn default_delete_secs() -> u64 {
    DEFAULT_DELETE_TIMEOUT_SECS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,

    /// Families to export; empty means every family that supports export
    #[serde(default)]
    pub resource_types: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            resource_types: Vec::new(),
        }
    }
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}
