//! Preference storage
//!
//! The target language lives under a single key in a key-value storage area.
//! [`PreferenceStore`] is the only access point and owns the availability
//! guard: when the area reports its context is gone, reads return the default
//! language and writes are skipped.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::PreferenceConfig;
use crate::error::{StorageError, SubifyError};
use crate::language::{Availability, LanguageCatalog, LanguageCode};

pub use file::FileArea;
pub use memory::MemoryArea;

/// A key-value storage area with atomic get/set/clear.
#[async_trait]
pub trait StorageArea: Send + Sync {
    /// Whether the owning context is still alive.
    async fn is_available(&self) -> bool;

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove every key in the area.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Guarded access to the stored target language.
#[derive(Clone)]
pub struct PreferenceStore {
    area: Arc<dyn StorageArea>,
    key: String,
    default_language: LanguageCode,
}

impl PreferenceStore {
    pub fn new(area: Arc<dyn StorageArea>, config: &PreferenceConfig) -> Self {
        let default_language = LanguageCode::parse(&config.default_language).unwrap_or_else(|e| {
            tracing::warn!("Invalid default language in config ({}), using built-in", e);
            LanguageCode::default()
        });

        Self {
            area,
            key: config.storage_key.clone(),
            default_language,
        }
    }

    async fn guard(&self) -> Result<&dyn StorageArea, StorageError> {
        if self.area.is_available().await {
            Ok(self.area.as_ref())
        } else {
            Err(StorageError::ContextInvalidated)
        }
    }

    pub async fn is_available(&self) -> bool {
        self.area.is_available().await
    }

    /// The stored language, or the default if absent, empty, invalid, or
    /// unreadable.
    pub async fn language(&self) -> LanguageCode {
        match self.stored_language().await {
            Ok(Some(code)) => code,
            Ok(None) => self.default_language.clone(),
            Err(e) => {
                tracing::warn!("Could not access storage, using default language: {}", e);
                self.default_language.clone()
            }
        }
    }

    async fn stored_language(&self) -> Result<Option<LanguageCode>, StorageError> {
        let raw = self.guard().await?.get(&self.key).await?;
        Ok(raw
            .filter(|v| !v.trim().is_empty())
            .and_then(|v| match LanguageCode::parse(&v) {
                Ok(code) => Some(code),
                Err(e) => {
                    tracing::warn!("Ignoring stored language: {}", e);
                    None
                }
            }))
    }

    async fn store_language(&self, language: &LanguageCode) -> Result<(), StorageError> {
        self.guard().await?.set(&self.key, language.as_str()).await
    }

    /// Overwrite the stored language. Returns whether the value was persisted.
    pub async fn set_language(&self, language: &LanguageCode) -> bool {
        match self.store_language(language).await {
            Ok(()) => {
                tracing::info!("Language preference saved: {}", language);
                true
            }
            Err(e) => {
                tracing::warn!("Could not save language preference: {}", e);
                false
            }
        }
    }

    /// Pick a new target language from `catalog`.
    ///
    /// Only enabled languages are stored. A catalog language that is not
    /// enabled yet comes back as [`Availability::ComingSoon`] and the stored
    /// preference is left alone. Codes outside the catalog are rejected.
    pub async fn select(
        &self,
        catalog: &LanguageCatalog,
        code: LanguageCode,
    ) -> crate::error::Result<Availability> {
        match catalog.check(code) {
            Availability::Enabled(language) => {
                self.store_language(&language).await?;
                tracing::info!("Language preference saved: {}", language);
                Ok(Availability::Enabled(language))
            }
            Availability::ComingSoon(language) => {
                tracing::debug!("Language {} not enabled yet", language);
                Ok(Availability::ComingSoon(language))
            }
            Availability::Unknown(language) => {
                Err(SubifyError::LanguageNotEnabled(language.to_string()))
            }
        }
    }

    /// Clear the storage area. Returns whether anything was done.
    pub async fn clear(&self) -> bool {
        let result = match self.guard().await {
            Ok(area) => area.clear().await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Could not clear storage: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (Arc<MemoryArea>, PreferenceStore) {
        let area = Arc::new(MemoryArea::new());
        let store = PreferenceStore::new(area.clone(), &PreferenceConfig::default());
        (area, store)
    }

    #[tokio::test]
    async fn test_default_when_absent() {
        let (_, store) = store();
        assert_eq!(store.language().await.as_str(), "si");
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let (_, store) = store();
        let fr = LanguageCode::parse("fr").unwrap();
        assert!(store.set_language(&fr).await);
        assert_eq!(store.language().await, fr);

        let ja = LanguageCode::parse("ja").unwrap();
        assert!(store.set_language(&ja).await);
        assert_eq!(store.language().await, ja);
    }

    #[tokio::test]
    async fn test_unavailable_store_degrades() {
        let (area, store) = store();
        assert!(store.set_language(&LanguageCode::parse("fr").unwrap()).await);

        area.invalidate();
        assert!(!store.is_available().await);
        assert_eq!(store.language().await.as_str(), "si");
        assert!(!store.set_language(&LanguageCode::parse("de").unwrap()).await);
        assert!(!store.clear().await);
    }

    #[tokio::test]
    async fn test_empty_or_invalid_value_uses_default() {
        let (area, store) = store();
        area.set("targetLang", "").await.unwrap();
        assert_eq!(store.language().await.as_str(), "si");

        area.set("targetLang", "not a code").await.unwrap();
        assert_eq!(store.language().await.as_str(), "si");
    }

    #[tokio::test]
    async fn test_clear_resets_to_default() {
        let (_, store) = store();
        store.set_language(&LanguageCode::parse("fr").unwrap()).await;
        assert!(store.clear().await);
        assert_eq!(store.language().await.as_str(), "si");
    }

    #[tokio::test]
    async fn test_select_enabled_language() {
        let (_, store) = store();
        let catalog = LanguageCatalog::default();
        let si = LanguageCode::parse("si").unwrap();

        let picked = store.select(&catalog, si.clone()).await.unwrap();
        assert_eq!(picked, Availability::Enabled(si.clone()));
        assert_eq!(store.language().await, si);
    }

    #[tokio::test]
    async fn test_select_coming_soon_keeps_preference() {
        let (area, store) = store();
        area.set("targetLang", "si").await.unwrap();
        let catalog = LanguageCatalog::new(&["si"]);

        let picked = store
            .select(&catalog, LanguageCode::parse("fr").unwrap())
            .await
            .unwrap();
        assert!(matches!(picked, Availability::ComingSoon(_)));
        assert_eq!(
            picked.notice().unwrap(),
            "Coming Soon! French translation will be available in the next version"
        );
        assert_eq!(store.language().await.as_str(), "si");
        assert_eq!(area.get("targetLang").await.unwrap().as_deref(), Some("si"));
    }

    #[tokio::test]
    async fn test_select_unknown_language_is_rejected() {
        let (area, store) = store();
        let catalog = LanguageCatalog::default();

        let err = store
            .select(&catalog, LanguageCode::parse("xx").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, SubifyError::LanguageNotEnabled(code) if code == "xx"));
        assert!(area.is_empty());
    }

    #[tokio::test]
    async fn test_select_on_dead_store_is_storage_error() {
        let (area, store) = store();
        area.invalidate();

        let err = store
            .select(&LanguageCatalog::default(), LanguageCode::parse("si").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SubifyError::Storage(StorageError::ContextInvalidated)
        ));
    }

    #[tokio::test]
    async fn test_configured_default() {
        let area = Arc::new(MemoryArea::new());
        let config = PreferenceConfig {
            default_language: "fr".to_string(),
            ..Default::default()
        };
        let store = PreferenceStore::new(area, &config);
        assert_eq!(store.language().await.as_str(), "fr");
    }
}
