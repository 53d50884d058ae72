//! In-process `CatalogStore`, for offline hosts and tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use catalogx_core::ProductId;
use catalogx_products::ProductRecord;

use crate::store::{CatalogStore, StoreError};

/// Vector-backed product store.
///
/// Cheap to clone; clones share the same records, so a caller can keep a
/// handle to inspect calls made through a controller that owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<ProductRecord>,
    fail_next_list: Option<StoreError>,
    fail_next_delete: Option<StoreError>,
    list_calls: usize,
    delete_calls: Vec<ProductId>,
}

impl InMemoryCatalogStore {
    pub fn new(records: Vec<ProductRecord>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                records,
                ..Inner::default()
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the stored records.
    pub fn seed(&self, records: Vec<ProductRecord>) {
        self.lock().records = records;
    }

    pub fn records(&self) -> Vec<ProductRecord> {
        self.lock().records.clone()
    }

    /// Make the next `list_products` call fail with `err`.
    pub fn fail_next_list(&self, err: StoreError) {
        self.lock().fail_next_list = Some(err);
    }

    /// Make the next `delete_product` call fail with `err`.
    pub fn fail_next_delete(&self, err: StoreError) {
        self.lock().fail_next_delete = Some(err);
    }

    pub fn list_calls(&self) -> usize {
        self.lock().list_calls
    }

    /// Ids passed to `delete_product`, in call order.
    pub fn delete_calls(&self) -> Vec<ProductId> {
        self.lock().delete_calls.clone()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, StoreError> {
        let mut inner = self.lock();
        inner.list_calls += 1;
        if let Some(err) = inner.fail_next_list.take() {
            return Err(err);
        }
        Ok(inner.records.clone())
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.delete_calls.push(id.clone());
        if let Some(err) = inner.fail_next_delete.take() {
            return Err(err);
        }

        let before = inner.records.len();
        inner.records.retain(|record| &record.id != id);
        if inner.records.len() == before {
            return Err(StoreError::Api {
                status: 404,
                message: Some("Product not found".to_string()),
            });
        }
        Ok(())
    }
}
