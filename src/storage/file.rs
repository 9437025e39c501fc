//! JSON-file storage area

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::error::StorageError;

use super::StorageArea;

/// A storage area persisted as a flat JSON object on disk.
///
/// Writes go to a sibling temp file and are renamed into place, so readers
/// see either the old or the new map. The async mutex serializes
/// read-modify-write cycles from this process.
#[derive(Debug)]
pub struct FileArea {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileArea {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(content) if content.is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_slice(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn store(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content = serde_json::to_vec_pretty(values)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageArea for FileArea {
    /// Available while the directory holding the file exists.
    async fn is_available(&self) -> bool {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => tokio::fs::metadata(dir)
                .await
                .map(|meta| meta.is_dir())
                .unwrap_or(false),
            _ => true,
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        let mut values = self.load().await?;
        Ok(values.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut values = self.load().await?;
        values.insert(key.to_string(), value.to_string());
        self.store(&values).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
