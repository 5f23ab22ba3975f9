//! Target discovery (`/v2/info`)

use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::config::api;
use crate::error::{CfError, Result};

/// Discovery document read once when the client is built
#[derive(Deserialize, Debug, Clone)]
pub struct TargetInfo {
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub doppler_logging_endpoint: Option<String>,
}

impl TargetInfo {
    /// Fetch the discovery document from `{target}/v2/info`
    pub async fn fetch(http: &Client, target: &str) -> Result<Self> {
        let url = format!("{}{}", target.trim_end_matches('/'), api::INFO_PATH);
        debug!("Fetching target info from: {}", url);

        let response = http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CfError::InvalidStatusCode {
                status: status.as_u16(),
                body,
            });
        }

        let info: TargetInfo = response.json().await?;
        debug!(
            "Target API version {:?}, token endpoint {}",
            info.api_version, info.token_endpoint
        );
        Ok(info)
    }

    /// URL of the OAuth2 token exchange
    pub fn token_url(&self) -> String {
        format!(
            "{}{}",
            self.token_endpoint.trim_end_matches('/'),
            api::OAUTH_TOKEN_PATH
        )
    }
}
