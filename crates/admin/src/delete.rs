//! Two-step delete: propose a record, then confirm or cancel.
//!
//! ```text
//! Idle --request--> Confirming --confirm--> Deleting --complete--> Idle
//!        ^              |  ^ request (replaces candidate)
//!        +----cancel----+--+
//! ```
//!
//! At most one candidate exists at a time and at most one delete call is in
//! flight. Success and failure both return to Idle; retrying means
//! requesting again.

use thiserror::Error;

use catalogx_core::ProductId;
use catalogx_products::ProductRecord;

use crate::notice;
use crate::store::{CatalogStore, StoreError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeleteError {
    /// A delete call is outstanding; the candidate cannot change until it completes.
    #[error("a delete is already in progress for {0}")]
    InFlight(ProductId),

    #[error("product {0} is not in the current catalog")]
    NotFound(ProductId),
}

#[derive(Debug, Clone, PartialEq, Default)]
enum DeleteState {
    #[default]
    Idle,
    Confirming(ProductRecord),
    Deleting(ProductRecord),
}

/// Result of completing a confirmed delete.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The store removed the record. The local catalog is now stale and must
    /// be discarded and fetched again.
    Deleted(ProductRecord),
    /// The store refused or could not be reached. The catalog is untouched.
    Failed {
        record: ProductRecord,
        message: String,
    },
    /// There was no candidate awaiting confirmation.
    NothingPending,
}

impl DeleteOutcome {
    pub fn requires_refetch(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteWorkflow {
    state: DeleteState,
}

impl DeleteWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record awaiting confirmation or being deleted.
    pub fn pending(&self) -> Option<&ProductRecord> {
        match &self.state {
            DeleteState::Idle => None,
            DeleteState::Confirming(record) | DeleteState::Deleting(record) => Some(record),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DeleteState::Idle)
    }

    pub fn is_confirming(&self) -> bool {
        matches!(self.state, DeleteState::Confirming(_))
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, DeleteState::Deleting(_))
    }

    /// Confirmation text for the pending candidate.
    pub fn prompt(&self) -> Option<String> {
        match &self.state {
            DeleteState::Confirming(record) => Some(format!(
                "Are you sure you want to delete the product \"{}\"?",
                record.name
            )),
            _ => None,
        }
    }

    /// Propose `record` for deletion, replacing any earlier candidate.
    pub fn request(&mut self, record: ProductRecord) -> Result<(), DeleteError> {
        if let DeleteState::Deleting(current) = &self.state {
            return Err(DeleteError::InFlight(current.id.clone()));
        }
        if let DeleteState::Confirming(previous) = &self.state {
            tracing::debug!(
                previous = %previous.id,
                next = %record.id,
                "delete candidate replaced"
            );
        }
        self.state = DeleteState::Confirming(record);
        Ok(())
    }

    /// Discard the candidate. In-flight deletes cannot be cancelled.
    pub fn cancel(&mut self) -> Option<ProductRecord> {
        match std::mem::take(&mut self.state) {
            DeleteState::Confirming(record) => Some(record),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Move the candidate to Deleting and hand out the id to send.
    pub fn begin(&mut self) -> Option<ProductId> {
        match std::mem::take(&mut self.state) {
            DeleteState::Confirming(record) => {
                let id = record.id.clone();
                self.state = DeleteState::Deleting(record);
                Some(id)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Record the store's answer for the in-flight delete and return to Idle.
    pub fn complete(&mut self, result: Result<(), StoreError>) -> DeleteOutcome {
        let record = match std::mem::take(&mut self.state) {
            DeleteState::Deleting(record) => record,
            other => {
                self.state = other;
                return DeleteOutcome::NothingPending;
            }
        };

        match result {
            Ok(()) => {
                tracing::info!(id = %record.id, "product deleted");
                DeleteOutcome::Deleted(record)
            }
            Err(err) => {
                tracing::warn!(id = %record.id, error = %err, "product delete failed");
                let message = match &err {
                    StoreError::Network(_) => notice::DELETE_TRANSPORT_FAILED.to_string(),
                    other => other.user_message(notice::DELETE_FAILED),
                };
                DeleteOutcome::Failed { record, message }
            }
        }
    }

    /// Issue the single delete call for the pending candidate.
    pub async fn confirm<S>(&mut self, store: &S) -> DeleteOutcome
    where
        S: CatalogStore + ?Sized,
    {
        let Some(id) = self.begin() else {
            return DeleteOutcome::NothingPending;
        };
        let result = store.delete_product(&id).await;
        self.complete(result)
    }
}
