//! In-memory object store

use crate::{FetchError, ObjectStore};
use async_trait::async_trait;
use payload::StorageLocation;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tracing::debug;

/// Object store backed by a map, for tests and local runs
#[derive(Default)]
pub struct InMemoryStore {
    objects: Mutex<HashMap<StorageLocation, Vec<u8>>>,
    denied: Mutex<HashSet<StorageLocation>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object, replacing any previous contents
    pub fn insert(&self, location: StorageLocation, bytes: impl Into<Vec<u8>>) {
        if let Ok(mut objects) = self.objects.lock() {
            objects.insert(location, bytes.into());
        }
    }

    /// Make reads of a location fail with `AccessDenied`
    pub fn deny(&self, location: StorageLocation) {
        if let Ok(mut denied) = self.denied.lock() {
            denied.insert(location);
        }
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn get_object(&self, location: &StorageLocation) -> Result<Vec<u8>, FetchError> {
        let denied = self
            .denied
            .lock()
            .map_err(|e| FetchError::Storage(format!("Lock error: {}", e)))?;
        if denied.contains(location) {
            return Err(FetchError::access_denied(location));
        }
        drop(denied);

        let objects = self
            .objects
            .lock()
            .map_err(|e| FetchError::Storage(format!("Lock error: {}", e)))?;
        let bytes = objects
            .get(location)
            .cloned()
            .ok_or_else(|| FetchError::not_found(location))?;

        debug!("Read {} bytes from {}", bytes.len(), location);
        Ok(bytes)
    }
}
