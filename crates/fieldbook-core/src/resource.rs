//! Generic client for one REST endpoint: read-all into a [`ResourceList`], create by POST.
//!
//! Every operation is an `async fn` returning a `Result`. Callers await it to see the
//! outcome and cancel it by dropping the future; a dropped or failed request leaves
//! the list as it was. Mutating methods take `&mut self`, so one client never has two
//! requests in flight and creates land in the order they were submitted.

use tracing::{info, warn};
use url::Url;

use crate::http::{HttpClient, HttpError};
use crate::models::Resource;
use crate::store::ResourceList;

#[derive(Debug)]
pub struct ResourceClient<T> {
    http: HttpClient,
    endpoint: Url,
    items: ResourceList<T>,
    /// Endpoint of the last successful load, if any.
    loaded_from: Option<Url>,
}

impl<T: Resource> ResourceClient<T> {
    /// Client for `endpoint` with an empty list. Nothing is fetched until a load.
    pub fn new(http: HttpClient, endpoint: Url) -> Self {
        Self {
            http,
            endpoint,
            items: ResourceList::new(),
            loaded_from: None,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Current items, in list order.
    pub fn resources(&self) -> &[T] {
        self.items.as_slice()
    }

    pub fn list(&self) -> &ResourceList<T> {
        &self.items
    }

    /// Point the client at another endpoint. The list is kept until the next load
    /// replaces it; [`ResourceClient::ensure_loaded`] fetches again for the new URL.
    pub fn set_endpoint(&mut self, endpoint: Url) {
        self.endpoint = endpoint;
    }

    /// Whether the current endpoint has been loaded successfully.
    pub fn is_loaded(&self) -> bool {
        self.loaded_from.as_ref() == Some(&self.endpoint)
    }

    /// Read-all once per distinct endpoint. Returns `true` if a request was made.
    pub async fn ensure_loaded(&mut self) -> Result<bool, ResourceError> {
        if self.is_loaded() {
            return Ok(false);
        }
        self.load().await?;
        Ok(true)
    }

    /// Read-all from the endpoint and replace the whole list with the response.
    pub async fn load(&mut self) -> Result<&[T], ResourceError> {
        let endpoint = self.endpoint.clone();
        let items: Vec<T> = match self.http.get_json(&endpoint).await {
            Ok(items) => items,
            Err(source) => {
                warn!(%endpoint, error = %source, "load failed");
                return Err(ResourceError::Load { endpoint, source });
            }
        };
        info!(%endpoint, count = items.len(), "loaded resources");
        self.items.replace(items);
        self.loaded_from = Some(endpoint);
        Ok(self.items.as_slice())
    }

    /// POST `draft` to the endpoint and append the item the server answered with.
    pub async fn create(&mut self, draft: &T::Draft) -> Result<&T, ResourceError> {
        let endpoint = self.endpoint.clone();
        let created: T = match self.http.post_json(&endpoint, draft).await {
            Ok(created) => created,
            Err(source) => {
                warn!(%endpoint, error = %source, "create failed");
                return Err(ResourceError::Create { endpoint, source });
            }
        };
        info!(%endpoint, id = %created.id(), "created resource");
        Ok(self.items.push(created))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("could not load {endpoint}: {source}")]
    Load {
        endpoint: Url,
        #[source]
        source: HttpError,
    },
    #[error("could not create at {endpoint}: {source}")]
    Create {
        endpoint: Url,
        #[source]
        source: HttpError,
    },
}
