//! Fetcher stage implementation

use crate::{FetchError, ObjectStore};
use payload::{Payload, StorageLocation};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Fetcher configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Stage the object through a local file in this directory before encoding.
    /// When unset the downloaded bytes are encoded directly.
    pub scratch_dir: Option<PathBuf>,
}

/// Reads images from a content store and wraps them in a fresh payload
pub struct Fetcher<S> {
    store: S,
    config: FetcherConfig,
}

impl<S: ObjectStore> Fetcher<S> {
    pub fn new(store: S, config: FetcherConfig) -> Self {
        Self { store, config }
    }

    /// Fetch and encode the object at `location`
    pub async fn fetch(&self, location: &StorageLocation) -> Result<Payload, FetchError> {
        let start = Instant::now();
        location.validate()?;
        info!(bucket = location.bucket(), key = location.key(), "Fetching image");

        let bytes = match self.store.get_object(location).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Fetch of {} failed: {}", location, e);
                return Err(e);
            }
        };

        let bytes = match &self.config.scratch_dir {
            Some(dir) => stage_through_scratch(dir, location, bytes).await?,
            None => bytes,
        };

        let latency_ms = start.elapsed().as_millis() as f64;
        metrics::histogram!("pipeline_stage_latency_ms", "stage" => "fetch").record(latency_ms);
        info!(bytes = bytes.len(), "Fetched image in {:.0}ms", latency_ms);

        Ok(Payload::fetched(location.clone(), &bytes))
    }
}

/// Write the object to a unique scratch file and read it back.
/// The file is removed on every exit path, including a failed write.
async fn stage_through_scratch(
    dir: &Path,
    location: &StorageLocation,
    bytes: Vec<u8>,
) -> Result<Vec<u8>, FetchError> {
    let scratch = ScratchFile::new(dir, location);
    debug!("Staging {} through {}", location, scratch.path().display());

    tokio::fs::write(scratch.path(), &bytes).await?;
    Ok(tokio::fs::read(scratch.path()).await?)
}

/// Uniquely named scratch path, deleted when dropped
struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    fn new(dir: &Path, location: &StorageLocation) -> Self {
        Self {
            path: dir.join(scratch_name(location)),
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove scratch file {}: {}", self.path.display(), e),
        }
    }
}

fn scratch_name(location: &StorageLocation) -> String {
    let id = Uuid::new_v4();
    match Path::new(location.key()).extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{}.{}", id, ext),
        None => id.to_string(),
    }
}
