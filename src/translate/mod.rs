//! Translation client
//!
//! One outbound request per hover, no caching and no retries. Every failure
//! collapses to [`FALLBACK_TEXT`] at the call site that renders it.

pub mod mymemory;

use async_trait::async_trait;

use crate::error::TranslateError;
use crate::language::LanguageCode;

pub use mymemory::MyMemoryClient;

/// Rendered in place of a translation when the request or parse fails.
pub const FALLBACK_TEXT: &str = "Error translating text";

/// Something that can translate caption text into a target language.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target: &LanguageCode) -> Result<String, TranslateError>;
}

/// Translate `text`, logging any failure and substituting [`FALLBACK_TEXT`].
pub async fn translate_or_fallback(
    translator: &dyn Translator,
    text: &str,
    language: &LanguageCode,
) -> String {
    match translator.translate(text, language).await {
        Ok(translated) => translated,
        Err(e) => {
            tracing::error!(language = %language, "Translation error: {}", e);
            FALLBACK_TEXT.to_string()
        }
    }
}
