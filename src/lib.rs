//! Subify
//!
//! Word-by-word translation tooltips for video captions. Caption segments on
//! a host page are watched for hovers; the hovered text is translated into
//! the user's stored target language and shown in a short-lived tooltip.

pub mod config;
pub mod config_file;
pub mod error;
pub mod hover;
pub mod language;
pub mod lifecycle;
pub mod observer;
pub mod overlay;
pub mod page;
pub mod state;
pub mod storage;
pub mod tooltip;
pub mod translate;

#[cfg(test)]
pub(crate) mod tests;

pub use config::SubifyConfig;
pub use error::{Result, StorageError, SubifyError, TranslateError};
pub use hover::HoverHandler;
pub use language::{LanguageCatalog, LanguageCode};
pub use overlay::CaptionOverlay;
pub use page::{Page, VirtualPage};
pub use storage::{FileArea, MemoryArea, PreferenceStore, StorageArea};
pub use translate::{MyMemoryClient, Translator, FALLBACK_TEXT};
