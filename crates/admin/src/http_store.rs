//! `CatalogStore` over the product REST API.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use catalogx_core::ProductId;
use catalogx_products::ProductRecord;

use crate::session::Session;
use crate::store::{CatalogStore, StoreError};

/// Client for `GET {base}/products` and `DELETE {base}/products/{id}`.
#[derive(Debug, Clone)]
pub struct HttpCatalogStore {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    data: Vec<ProductRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl HttpCatalogStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Authenticate requests with the session's bearer token.
    pub fn with_session(base_url: impl Into<String>, session: &Session) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: Some(session.token().to_string()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| StoreError::Network(format!("invalid base url {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| {
                StoreError::Network(format!("base url {} cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

/// Build an `Api` error from a non-success response.
///
/// The body may carry `message` or `error`; anything unparseable means no
/// store message.
async fn api_error(resp: reqwest::Response) -> StoreError {
    let status = resp.status().as_u16();
    let text = resp.text().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
    StoreError::Api {
        status,
        message: body.message.or(body.error),
    }
}

#[async_trait]
impl CatalogStore for HttpCatalogStore {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, StoreError> {
        let url = self.endpoint(&["products"])?;
        tracing::debug!(%url, "fetching catalog");

        let resp = self
            .authorize(self.client.get(url))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        let body: ListResponse = resp
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        Ok(body.data)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), StoreError> {
        let url = self.endpoint(&["products", id.as_str()])?;
        tracing::debug!(%url, "deleting product");

        let resp = self
            .authorize(self.client.delete(url))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        Ok(())
    }
}
