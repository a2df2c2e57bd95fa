//! ==============================================================================
//! store.rs - json-file backed reading history
//! ==============================================================================
//!
//! purpose:
//!     owns the backing file and the single lock that serialises access to it.
//!     every operation materialises the whole history in memory:
//!
//! ```text
//!         lock -> read all -> (append one -> write all) -> unlock
//!
//!     this is fine for the small datasets a hub collects. the file grows
//!     without bound; there is no rotation or size cap.
//! ```
//!
//! on-disk format:
//!     one json array of readings. a missing file is an empty history.
//!     writes go to a sibling temp file which is then renamed over the
//!     backing file, so nobody ever sees half a document.
//!
//! relationships:
//!     - used by: api.rs (one Store shared by every handler via Arc)
//!     - uses: domain.rs (SensorReading), error.rs (StoreError)
//!
//! ==============================================================================

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::SensorReading;
use crate::error::StoreError;

pub struct Store {
    path: PathBuf,
    // guards the file, not any in-memory data
    lock: Mutex<()>,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// read the full history
    pub async fn load(&self) -> Result<Vec<SensorReading>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_all().await
    }

    /// replace the full history
    pub async fn save(&self, readings: &[SensorReading]) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        self.write_all(readings).await
    }

    /// append one reading and persist; returns the new history
    pub async fn append(&self, reading: SensorReading) -> Result<Vec<SensorReading>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut readings = self.read_all().await?;
        readings.push(reading);
        self.write_all(&readings).await?;
        Ok(readings)
    }

    /// the most recently appended reading, if any
    pub async fn latest(&self) -> Result<Option<SensorReading>, StoreError> {
        Ok(self.load().await?.pop())
    }

    // callers must hold `lock`
    async fn read_all(&self) -> Result<Vec<SensorReading>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Read(e)),
        };
        serde_json::from_slice(&bytes).map_err(StoreError::Decode)
    }

    // callers must hold `lock`
    async fn write_all(&self, readings: &[SensorReading]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(readings).map_err(StoreError::Encode)?;

        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        tokio::fs::create_dir_all(&parent).await.map_err(StoreError::Write)?;

        let temp = parent.join(format!(".{}.{}.tmp", self.file_name(), unique_suffix()));
        if let Err(e) = write_synced(&temp, &bytes).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(StoreError::Write(e));
        }
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(StoreError::Write(e));
        }

        debug!(path = %self.path.display(), count = readings.len(), "backing file rewritten");
        Ok(())
    }

    fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("sensordata.json")
    }
}

// contents must be on disk before the rename makes them visible
async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

fn unique_suffix() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}", std::process::id(), nanos, seq)
}
