use std::time::Duration;

use reqwest::Client;
use secrecy::SecretString;
use switchboard_resource_api::PlatformClient;

use crate::config::PlatformConfig;
use crate::error::{
    CoreError,
    CoreResult,
};

const POOL_SIZE_ENV: &str = "SWITCHBOARD_HTTP_POOL_SIZE";

const DEFAULT_POOL_SIZE: usize = 10;

/// Shared connection pool for every resource family
pub fn create_http_client(platform: &PlatformConfig) -> CoreResult<Client> {
    let pool_size = std::env::var(POOL_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_POOL_SIZE);

    Client::builder()
        .pool_max_idle_per_host(pool_size)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .timeout(Duration::from_secs(platform.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| CoreError::HttpClient(e.to_string()))
}

pub fn create_platform_client(platform: &PlatformConfig) -> CoreResult<PlatformClient> {
    let http = create_http_client(platform)?;
    Ok(PlatformClient::new(
        http,
        platform.base_url.trim(),
        SecretString::from(platform.access_token.clone()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_client_trims_base_url() {
        let _ = rustls::crypto::ring::default_provider().install_default();
        let platform = PlatformConfig {
            base_url: " https://api.example.com/ ".to_string(),
            access_token: "token".to_string(),
            request_timeout_secs: 5,
        };

        let client = create_platform_client(&platform).unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
        assert!(!format!("{client:?}").contains("token"));
    }
}
