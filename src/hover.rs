//! Hover handler
//!
//! Turns a hovered caption element into a translation: read and normalize
//! the text, look up the target language, make one request.

use regex::Regex;
use std::sync::{Arc, OnceLock};

use crate::language::LanguageCode;
use crate::page::{ElementId, Page};
use crate::storage::PreferenceStore;
use crate::translate::{translate_or_fallback, Translator};

fn whitespace() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Trim caption text and collapse internal whitespace runs.
///
/// Caption segments often carry line breaks and padding from the player's
/// layout. The collapsed form is what the tooltip shows as the original and
/// what is sent as the query. Returns `None` when nothing is left.
pub fn normalize_caption_text(raw: &str) -> Option<String> {
    let text = whitespace().replace_all(raw.trim(), " ");
    if text.is_empty() {
        None
    } else {
        Some(text.into_owned())
    }
}

/// Result of handling one hover.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub original: String,
    /// Translated text or the fallback string
    pub translated: String,
    pub language: LanguageCode,
}

#[derive(Clone)]
pub struct HoverHandler {
    translator: Arc<dyn Translator>,
    preferences: PreferenceStore,
}

impl HoverHandler {
    pub fn new(translator: Arc<dyn Translator>, preferences: PreferenceStore) -> Self {
        Self {
            translator,
            preferences,
        }
    }

    /// The hoverable text of `element`, if any.
    pub fn caption_text(page: &dyn Page, element: ElementId) -> Option<String> {
        page.text_content(element)
            .as_deref()
            .and_then(normalize_caption_text)
    }

    /// Translate already-normalized caption text into the stored language.
    pub async fn translate(&self, text: &str) -> Translation {
        let language = self.preferences.language().await;
        let translated = translate_or_fallback(self.translator.as_ref(), text, &language).await;
        Translation {
            original: text.to_string(),
            translated,
            language,
        }
    }
}
