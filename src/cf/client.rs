//! Cloud Foundry HTTP client for API interactions

use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::config::credentials as credentials_config;
use crate::error::{CfError, Result};

use super::credentials::CredentialManager;
use super::domains::Domain;
use super::info::TargetInfo;
use super::resource::ResourceManager;
use super::transport::TransportConfig;

/// Options fixed at client construction
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub client_id: String,
    pub client_secret: String,
    pub transport: TransportConfig,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            client_id: credentials_config::DEFAULT_CLIENT_ID.to_string(),
            client_secret: credentials_config::DEFAULT_CLIENT_SECRET.to_string(),
            transport: TransportConfig::default(),
        }
    }
}

/// Cloud Foundry API client
///
/// Resource managers borrow the client; all of them share its single
/// credential manager.
pub struct CfClient {
    http: Client,
    target: String,
    info: TargetInfo,
    credentials: Arc<CredentialManager>,
}

impl CfClient {
    /// Build the transport, read the target's discovery document and create
    /// an uninitialized credential manager
    pub async fn connect(target: &str, options: ClientOptions) -> Result<Self> {
        let http = options.transport.build_client()?;
        let target = target.trim_end_matches('/').to_string();
        let info = TargetInfo::fetch(&http, &target).await?;

        let credentials = Arc::new(CredentialManager::new(
            http.clone(),
            info.token_url(),
            options.client_id,
            options.client_secret,
        ));

        Ok(Self {
            http,
            target,
            info,
            credentials,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn info(&self) -> &TargetInfo {
        &self.info
    }

    pub fn credentials(&self) -> &Arc<CredentialManager> {
        &self.credentials
    }

    pub async fn init_with_password(&self, username: &str, password: &str) -> Result<()> {
        self.credentials.init_with_password(username, password).await
    }

    pub async fn init_with_refresh(&self, refresh_token: &str) -> Result<()> {
        self.credentials.init_with_refresh(refresh_token).await
    }

    pub async fn init_with_tokens(&self, access_token: String, refresh_token: String) -> Result<()> {
        self.credentials
            .init_with_tokens(access_token, refresh_token)
            .await
    }

    /// Resource manager for one entity domain
    pub fn manager(&self, domain: Domain) -> ResourceManager<'_> {
        ResourceManager::new(self, domain.config())
    }

    /// Resolve an API path against the target
    ///
    /// Absolute URLs are accepted only on the target's own origin, so the
    /// bearer token is never sent to another host.
    pub(crate) fn url(&self, path: &str) -> Result<String> {
        if !(path.starts_with("http://") || path.starts_with("https://")) {
            return Ok(format!("{}{}", self.target, path));
        }

        let absolute = Url::parse(path)
            .map_err(|e| CfError::Config(format!("Invalid URL '{}': {}", path, e)))?;
        let target = Url::parse(&self.target)
            .map_err(|e| CfError::Config(format!("Invalid target '{}': {}", self.target, e)))?;
        if absolute.origin() != target.origin() {
            warn!("Refusing to follow {} outside target {}", path, self.target);
            return Err(CfError::Config(format!(
                "Refusing to send credentials to '{}': not on target {}",
                path, self.target
            )));
        }
        Ok(path.to_string())
    }

    /// Send an authenticated request
    ///
    /// `build` is called once per attempt. When the API answers 401 the
    /// credential manager refreshes once and the request is sent again with
    /// the new token; the second response is returned whatever its status.
    pub(crate) async fn execute<F>(&self, build: F) -> Result<Response>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let token = self.credentials.access_token().await?;
        let response = build(&self.http).bearer_auth(&token).send().await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!("Request rejected with 401, refreshing access token");
        let token = self.credentials.refresh_after_rejection(&token).await?;
        let response = build(&self.http).bearer_auth(&token).send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("Request still unauthorized after token refresh");
        }
        Ok(response)
    }

    /// GET a path and parse its JSON body
    pub(crate) async fn get_json<T>(&self, path: &str, resource_label: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        debug!("Fetching {} from: {}", resource_label, url);

        let response = self.execute(|http| http.get(&url)).await?;
        let response = error_for_status(response, resource_label).await?;
        Ok(response.json().await?)
    }
}

/// Map a non-2xx response to an error: 404 to `NotFound`, anything else to
/// `InvalidStatusCode` carrying the response body
pub(crate) async fn error_for_status(response: Response, resource_label: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(CfError::NotFound(resource_label.to_string()));
    }
    let body = response.text().await.unwrap_or_default();
    Err(CfError::InvalidStatusCode {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
impl CfClient {
    /// Client against a mock server, with the token endpoint on the same
    /// server and tokens already injected
    pub(crate) async fn test_client(base_url: &str) -> Self {
        let client = Self::test_client_uninitialized(base_url);
        client
            .init_with_tokens("test-token".to_string(), "test-refresh".to_string())
            .await
            .expect("test tokens are non-empty");
        client
    }

    pub(crate) fn test_client_uninitialized(base_url: &str) -> Self {
        let http = Client::new();
        let info = TargetInfo {
            authorization_endpoint: base_url.to_string(),
            token_endpoint: base_url.to_string(),
            name: None,
            api_version: None,
            doppler_logging_endpoint: None,
        };
        let credentials = Arc::new(CredentialManager::new(
            http.clone(),
            info.token_url(),
            "cf".to_string(),
            String::new(),
        ));
        Self {
            http,
            target: base_url.to_string(),
            info,
            credentials,
        }
    }
}
