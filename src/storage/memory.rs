//! In-memory storage area

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::StorageError;

use super::StorageArea;

/// A storage area held in memory. It can be invalidated to model an
/// extension context that has been torn down underneath the page.
#[derive(Debug)]
pub struct MemoryArea {
    values: DashMap<String, String>,
    available: AtomicBool,
}

impl MemoryArea {
    pub fn new() -> Self {
        Self {
            values: DashMap::new(),
            available: AtomicBool::new(true),
        }
    }

    /// Mark the owning context as gone. Every later access fails.
    pub fn invalidate(&self) {
        self.available.store(false, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StorageError::ContextInvalidated)
        }
    }
}

impl Default for MemoryArea {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageArea for MemoryArea {
    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.values.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.check()?;
        self.values.clear();
        Ok(())
    }
}
