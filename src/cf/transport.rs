//! HTTP transport configuration
//!
//! Proxy and TLS settings are fixed when the client is built and apply to
//! every request it sends, token exchanges included.

use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;

use crate::config::transport as transport_config;
use crate::error::{CfError, Result};

/// Transport settings applied to all outgoing requests
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Proxy URL for all schemes (e.g. `http://proxy.corp:3128`)
    pub proxy: Option<String>,
    /// Accept invalid TLS certificates and host names
    pub skip_ssl_verification: bool,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            skip_ssl_verification: false,
            connect_timeout: Duration::from_secs(transport_config::CONNECT_TIMEOUT_SECS),
            timeout: Duration::from_secs(transport_config::REQUEST_TIMEOUT_SECS),
        }
    }
}

impl TransportConfig {
    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_skip_ssl_verification(mut self, skip: bool) -> Self {
        self.skip_ssl_verification = skip;
        self
    }

    /// Build the underlying HTTP client
    pub fn build_client(&self) -> Result<Client> {
        let mut builder = Client::builder()
            // Connection pool settings - reuse connections
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout);

        if let Some(ref proxy) = self.proxy {
            debug!("Routing requests through proxy: {}", proxy);
            let proxy = reqwest::Proxy::all(proxy.as_str())
                .map_err(|e| CfError::Config(format!("Invalid proxy URL '{}': {}", proxy, e)))?;
            builder = builder.proxy(proxy);
        }

        if self.skip_ssl_verification {
            warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
            .build()
            .map_err(|e| CfError::Config(format!("Failed to build HTTP client: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransportConfig::default();
        assert!(config.proxy.is_none());
        assert!(!config.skip_ssl_verification);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_methods() {
        let config = TransportConfig::default()
            .with_proxy(Some("http://proxy.local:3128".to_string()))
            .with_skip_ssl_verification(true);
        assert_eq!(config.proxy.as_deref(), Some("http://proxy.local:3128"));
        assert!(config.skip_ssl_verification);
    }

    #[test]
    fn test_build_client_default() {
        assert!(TransportConfig::default().build_client().is_ok());
    }

    #[test]
    fn test_build_client_with_proxy_and_tls_skip() {
        let config = TransportConfig::default()
            .with_proxy(Some("http://127.0.0.1:3128".to_string()))
            .with_skip_ssl_verification(true);
        assert!(config.build_client().is_ok());
    }

    #[test]
    fn test_build_client_invalid_proxy() {
        let config = TransportConfig::default().with_proxy(Some("::not a url::".to_string()));
        match config.build_client() {
            Err(CfError::Config(msg)) => assert!(msg.contains("Invalid proxy URL")),
            other => panic!("Expected CfError::Config, got {:?}", other.map(|_| ())),
        }
    }
}
