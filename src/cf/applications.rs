//! Application sub-resources and state changes

use futures::stream::Stream;
use log::{debug, info};
use serde_json::Value;

use crate::config::api;
use crate::error::Result;

use super::client::{error_for_status, CfClient};
use super::domains::APPLICATION;
use super::models::Entity;
use super::resource::paginate;

/// Desired application state for `PUT /v2/apps/{guid}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Started,
    Stopped,
}

impl AppState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppState::Started => "STARTED",
            AppState::Stopped => "STOPPED",
        }
    }
}

impl CfClient {
    /// Environment of an application (raw JSON)
    pub async fn app_env(&self, guid: &str) -> Result<Value> {
        self.app_subresource(guid, "env").await
    }

    /// Instance states of an application (raw JSON, keyed by index)
    pub async fn app_instances(&self, guid: &str) -> Result<Value> {
        self.app_subresource(guid, "instances").await
    }

    /// Per-instance usage stats of a running application (raw JSON)
    pub async fn app_stats(&self, guid: &str) -> Result<Value> {
        self.app_subresource(guid, "stats").await
    }

    /// Routes mapped to an application, paginated like `list`
    pub fn app_routes<'a>(&'a self, guid: &str) -> impl Stream<Item = Result<Entity>> + 'a {
        let path = format!(
            "{}/routes?results-per-page={}",
            APPLICATION.entity_path(guid),
            api::RESULTS_PER_PAGE
        );
        paginate(self, path, format!("routes of application '{}'", guid))
    }

    pub async fn start_app(&self, guid: &str) -> Result<Entity> {
        self.set_app_state(guid, AppState::Started).await
    }

    pub async fn stop_app(&self, guid: &str) -> Result<Entity> {
        self.set_app_state(guid, AppState::Stopped).await
    }

    async fn set_app_state(&self, guid: &str, state: AppState) -> Result<Entity> {
        let url = self.url(&APPLICATION.entity_path(guid))?;
        let body = serde_json::json!({ "state": state.as_str() });
        info!("Setting application {} to {}", guid, state.as_str());

        let response = self.execute(|http| http.put(&url).json(&body)).await?;
        let response = error_for_status(response, &format!("application '{}'", guid)).await?;
        Ok(response.json().await?)
    }

    async fn app_subresource(&self, guid: &str, name: &str) -> Result<Value> {
        let path = format!("{}/{}", APPLICATION.entity_path(guid), name);
        debug!("Fetching {} of application {}", name, guid);
        self.get_json(&path, &format!("{} of application '{}'", name, guid))
            .await
    }
}
