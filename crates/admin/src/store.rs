//! Seam to the external product store.

use async_trait::async_trait;

use catalogx_core::ProductId;
use catalogx_products::ProductRecord;

/// The authoritative product list and its delete endpoint.
///
/// Both calls run to completion or failure; there is no cancellation.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch the complete catalog.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, StoreError>;

    /// Delete a single record by id.
    async fn delete_product(&self, id: &ProductId) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Transport failure; no response was received.
    #[error("network error: {0}")]
    Network(String),

    /// The store answered with a non-success status.
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    /// A success response whose body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

impl StoreError {
    /// Message supplied by the store, if it sent one.
    pub fn store_message(&self) -> Option<&str> {
        match self {
            StoreError::Api { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// Store message for the user, or `fallback` when there is none.
    pub fn user_message(&self, fallback: &str) -> String {
        self.store_message().unwrap_or(fallback).to_string()
    }
}
