//! Generic resource manager
//!
//! One implementation serves every entity domain; the differences between
//! domains (endpoint, filter fields, name field, capabilities) come from a
//! [`DomainConfig`] value.

use futures::stream::{self, Stream, TryStreamExt};
use log::{debug, warn};
use std::collections::{BTreeMap, HashSet};

use crate::config::api;
use crate::error::{CfError, Result};

use super::client::{error_for_status, CfClient};
use super::domains::DomainConfig;
use super::guid::Identifier;
use super::models::{Entity, Page};

/// List filters, forwarded as `q=field:value` query parameters
pub type Filter = BTreeMap<String, String>;

/// List/get/create/delete surface for one entity domain
#[derive(Clone, Copy)]
pub struct ResourceManager<'a> {
    client: &'a CfClient,
    config: &'static DomainConfig,
}

impl<'a> ResourceManager<'a> {
    pub fn new(client: &'a CfClient, config: &'static DomainConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &'static DomainConfig {
        self.config
    }

    /// Lazily list entities matching `filters`
    ///
    /// Filter keys are checked before anything is sent. No request is made
    /// until the stream is polled; pages are then fetched one after another
    /// following `next_url`. Call `list` again to start over.
    pub fn list(&self, filters: &Filter) -> Result<impl Stream<Item = Result<Entity>> + 'a> {
        if let Some(field) = filters.keys().find(|f| !self.config.accepts_filter(f)) {
            return Err(CfError::UnsupportedFilter {
                domain: self.config.name.to_string(),
                field: field.clone(),
            });
        }

        let path = collection_path(self.config.endpoint, filters);
        debug!("Listing {} from: {}", self.config.name, path);
        Ok(paginate(self.client, path, format!("{} list", self.config.name)))
    }

    /// Fetch one entity by guid
    pub async fn get(&self, guid: &str) -> Result<Entity> {
        let label = format!("{} '{}'", self.config.name, guid);
        self.client
            .get_json(&self.config.entity_path(guid), &label)
            .await
    }

    /// First entity matching `filters`, or `None` when nothing matches
    ///
    /// Only the first page is requested.
    pub async fn get_first(&self, filters: &Filter) -> Result<Option<Entity>> {
        let mut entities = std::pin::pin!(self.list(filters)?);
        entities.try_next().await
    }

    /// Create an entity from a JSON payload
    pub async fn create(&self, data: &serde_json::Value) -> Result<Entity> {
        self.ensure_can_create()?;

        let url = self.client.url(self.config.endpoint)?;
        debug!("Creating {} at: {}", self.config.name, url);

        let response = self.client.execute(|http| http.post(&url).json(data)).await?;
        let label = format!("{} collection", self.config.name);
        let response = error_for_status(response, &label).await?;
        Ok(response.json().await?)
    }

    /// Delete an entity by guid
    pub async fn delete(&self, guid: &str) -> Result<()> {
        self.ensure_can_delete()?;

        let url = self.client.url(&self.config.entity_path(guid))?;
        debug!("Deleting {} at: {}", self.config.name, url);

        let response = self.client.execute(|http| http.delete(&url)).await?;
        let label = format!("{} '{}'", self.config.name, guid);
        error_for_status(response, &label).await?;
        Ok(())
    }

    /// Find an entity by guid or by name
    ///
    /// Guid-shaped input is fetched directly (404 is an error). Anything else
    /// is looked up as a name through `get_first` on the domain's name field,
    /// returning `None` when no entity has that name.
    pub async fn find(&self, id_or_name: &str) -> Result<Option<Entity>> {
        match Identifier::classify(id_or_name) {
            Identifier::Guid(guid) => self.get(guid).await.map(Some),
            Identifier::Name(name) => {
                let field = self.name_lookup_field()?;
                debug!("Resolving {} by {} '{}'", self.config.name, field, name);
                let filters = Filter::from([(field.to_string(), name.to_string())]);
                self.get_first(&filters).await
            }
        }
    }

    /// Turn a guid or name into a guid
    ///
    /// Guids are returned as-is without a request.
    pub async fn resolve_guid(&self, id_or_name: &str) -> Result<String> {
        match Identifier::classify(id_or_name) {
            Identifier::Guid(guid) => Ok(guid.to_string()),
            Identifier::Name(name) => match self.find(name).await? {
                Some(entity) => Ok(entity.metadata.guid),
                None => Err(self.name_not_found(name)),
            },
        }
    }

    /// Error for a name that matched no entity
    pub fn name_not_found(&self, name: &str) -> CfError {
        CfError::NotFound(format!("{} with name '{}'", self.config.name, name))
    }

    fn name_lookup_field(&self) -> Result<&'static str> {
        match self.config.name_field {
            Some(field) if self.config.allow_retrieve_by_name => Ok(field),
            _ => Err(CfError::UnsupportedLookup {
                domain: self.config.name.to_string(),
            }),
        }
    }

    pub fn ensure_can_create(&self) -> Result<()> {
        if self.config.allow_creation {
            Ok(())
        } else {
            Err(self.unsupported("creation"))
        }
    }

    pub fn ensure_can_delete(&self) -> Result<()> {
        if self.config.allow_deletion {
            Ok(())
        } else {
            Err(self.unsupported("deletion"))
        }
    }

    fn unsupported(&self, operation: &str) -> CfError {
        CfError::UnsupportedOperation {
            domain: self.config.name.to_string(),
            operation: operation.to_string(),
        }
    }
}

/// Collection path with page size and filter query parameters
fn collection_path(endpoint: &str, filters: &Filter) -> String {
    let mut path = format!("{}?results-per-page={}", endpoint, api::RESULTS_PER_PAGE);
    for (field, value) in filters {
        path.push_str("&q=");
        path.push_str(&urlencoding::encode(&format!("{}:{}", field, value)));
    }
    path
}

/// Stream every entity of a paginated collection, following `next_url`
///
/// Stops with a warning when `next_url` leads back to a page already
/// fetched.
pub(crate) fn paginate<'a>(
    client: &'a CfClient,
    first_path: String,
    label: String,
) -> impl Stream<Item = Result<Entity>> + 'a {
    let start = (Some(first_path), HashSet::new());
    stream::try_unfold(start, move |(next, mut visited)| {
        let label = label.clone();
        async move {
            let Some(path) = next else {
                return Ok::<_, CfError>(None);
            };
            if !visited.insert(client.url(&path)?) {
                warn!("Page {} was already fetched, stopping pagination", path);
                return Ok(None);
            }

            let page: Page<Entity> = client.get_json(&path, &label).await?;
            debug!(
                "Fetched {} entities from {} (total pages: {:?})",
                page.resources.len(),
                path,
                page.total_pages
            );

            Ok(Some((page.resources, (page.next_url, visited))))
        }
    })
    .map_ok(|resources| stream::iter(resources.into_iter().map(Ok::<Entity, CfError>)))
    .try_flatten()
}
