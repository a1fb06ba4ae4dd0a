//! Shared server state
//!
//! The store file is the source of truth. Each mutation re-reads it under
//! the store's exclusive lock, so edits made by `todo` commands while the
//! server runs are kept. Reads are answered from the snapshot taken by the
//! last load or mutation.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;

use super::error::ApiError;
use crate::domain::{TodoError, ToDoListCollection};
use crate::storage::CollectionStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    collection: Mutex<ToDoListCollection>,
    store: CollectionStore,
}

impl AppState {
    /// Loads the current collection from the store
    pub fn load(store: CollectionStore) -> Result<Self> {
        let collection = store.read()?;
        tracing::info!(
            "Loaded {} list(s) from {}",
            collection.len(),
            store.path().display()
        );

        Ok(Self {
            collection: Mutex::new(collection),
            store,
        })
    }

    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }

    /// Runs a read-only operation against the collection
    pub async fn read<T>(&self, f: impl FnOnce(&ToDoListCollection) -> T) -> T {
        let collection = self.collection.lock().await;
        f(&collection)
    }

    /// Applies a mutation to the stored collection and refreshes the snapshot.
    ///
    /// Nothing is written and the snapshot is untouched when `f` fails.
    pub async fn mutate<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut ToDoListCollection) -> Result<T, TodoError> + Send + 'static,
        T: Send + 'static,
    {
        let mut collection = self.collection.lock().await;
        let store = self.store.clone();

        let (value, next) = tokio::task::spawn_blocking(move || {
            store.try_update(|c| -> Result<_, ApiError> {
                let value = f(c)?;
                Ok((value, c.clone()))
            })
        })
        .await
        .map_err(|e| ApiError::Internal(format!("Store task failed: {}", e)))??;

        *collection = next;
        Ok(value)
    }
}
