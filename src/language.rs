//! Target language codes and the language catalog

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SubifyError;

/// Language every preference read falls back to.
pub const DEFAULT_LANGUAGE: &str = "si";

/// Known target languages and their display names.
pub const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("fr", "French"),
    ("es", "Spanish"),
    ("de", "German"),
    ("si", "Sinhala"),
    ("ar", "Arabic"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ru", "Russian"),
    ("pt", "Portuguese"),
    ("it", "Italian"),
    ("nl", "Dutch"),
    ("sv", "Swedish"),
    ("pl", "Polish"),
    ("tr", "Turkish"),
    ("vi", "Vietnamese"),
];

/// A validated language code such as `si` or `zh-CN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parse a code: 2-3 ASCII letters, optionally `-` plus a 2-4 character
    /// alphanumeric region or script subtag. The primary subtag is lowercased
    /// and a two-letter region uppercased, so `SI` and `zh-cn` match the
    /// catalog.
    pub fn parse(code: &str) -> Result<Self, SubifyError> {
        let code = code.trim();
        let (primary, region) = match code.split_once('-') {
            Some((p, r)) => (p, Some(r)),
            None => (code, None),
        };

        let primary_ok =
            (2..=3).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_alphabetic());
        let region_ok = region.map_or(true, |r| {
            (2..=4).contains(&r.len()) && r.chars().all(|c| c.is_ascii_alphanumeric())
        });

        if !(primary_ok && region_ok) {
            return Err(SubifyError::InvalidLanguage(code.to_string()));
        }

        let primary = primary.to_ascii_lowercase();
        Ok(Self(match region {
            Some(r) if r.len() == 2 => format!("{}-{}", primary, r.to_ascii_uppercase()),
            Some(r) => format!("{}-{}", primary, r),
            None => primary,
        }))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display name from the catalog, or the code itself when unknown.
    pub fn name(&self) -> &str {
        language_name(&self.0)
    }

    pub fn is_known(&self) -> bool {
        LANGUAGE_NAMES.iter().any(|(code, _)| *code == self.0)
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }
}

impl FromStr for LanguageCode {
    type Err = SubifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = SubifyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Look up a display name; unknown codes are returned unchanged.
pub fn language_name(code: &str) -> &str {
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

/// Outcome of checking a requested language against the enabled set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Enabled(LanguageCode),
    /// In the catalog but not switched on yet.
    ComingSoon(LanguageCode),
    Unknown(LanguageCode),
}

impl Availability {
    /// User-facing notice for a language that cannot be selected yet.
    pub fn notice(&self) -> Option<String> {
        match self {
            Availability::Enabled(_) => None,
            Availability::ComingSoon(code) => Some(format!(
                "Coming Soon! {} translation will be available in the next version",
                code.name()
            )),
            Availability::Unknown(code) => Some(format!("Unsupported language: {}", code)),
        }
    }
}

/// The catalog restricted to the languages that may be selected.
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    enabled: Vec<LanguageCode>,
}

impl LanguageCatalog {
    /// Build a catalog from configured codes; invalid entries are skipped.
    pub fn new<S: AsRef<str>>(enabled: &[S]) -> Self {
        let enabled = enabled
            .iter()
            .filter_map(|code| match LanguageCode::parse(code.as_ref()) {
                Ok(code) => Some(code),
                Err(e) => {
                    tracing::warn!("Ignoring enabled language: {}", e);
                    None
                }
            })
            .collect();
        Self { enabled }
    }

    pub fn check(&self, code: LanguageCode) -> Availability {
        if self.enabled.contains(&code) {
            Availability::Enabled(code)
        } else if code.is_known() {
            Availability::ComingSoon(code)
        } else {
            Availability::Unknown(code)
        }
    }

    /// All catalog entries with their enabled flag, in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str, bool)> + '_ {
        LANGUAGE_NAMES.iter().map(move |(code, name)| {
            let enabled = self.enabled.iter().any(|e| e.as_str() == *code);
            (*code, *name, enabled)
        })
    }
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self::new(&[DEFAULT_LANGUAGE])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_codes() {
        assert_eq!(LanguageCode::parse("si").unwrap().as_str(), "si");
        assert_eq!(LanguageCode::parse(" zh-CN ").unwrap().as_str(), "zh-CN");
        assert!(LanguageCode::parse("haw").is_ok());
    }

    #[test]
    fn test_parse_normalizes_case() {
        assert_eq!(LanguageCode::parse("SI").unwrap().as_str(), "si");
        assert_eq!(LanguageCode::parse("zh-cn").unwrap().as_str(), "zh-CN");
        assert_eq!(LanguageCode::parse("ZH-tw").unwrap().name(), "Chinese (Traditional)");

        let catalog = LanguageCatalog::default();
        assert!(matches!(
            catalog.check(LanguageCode::parse("Si").unwrap()),
            Availability::Enabled(_)
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(LanguageCode::parse("").is_err());
        assert!(LanguageCode::parse("x").is_err());
        assert!(LanguageCode::parse("en|si").is_err());
        assert!(LanguageCode::parse("zh-").is_err());
        assert!(LanguageCode::parse("english").is_err());
    }

    #[test]
    fn test_language_name() {
        assert_eq!(language_name("si"), "Sinhala");
        assert_eq!(language_name("zh-TW"), "Chinese (Traditional)");
        assert_eq!(language_name("xx"), "xx");
    }

    #[test]
    fn test_catalog_availability() {
        let catalog = LanguageCatalog::default();
        let si = LanguageCode::parse("si").unwrap();
        let fr = LanguageCode::parse("fr").unwrap();
        let xx = LanguageCode::parse("xx").unwrap();

        assert_eq!(catalog.check(si.clone()), Availability::Enabled(si));
        let soon = catalog.check(fr);
        assert_eq!(
            soon.notice().unwrap(),
            "Coming Soon! French translation will be available in the next version"
        );
        assert!(matches!(catalog.check(xx), Availability::Unknown(_)));
    }

    #[test]
    fn test_catalog_entries() {
        let catalog = LanguageCatalog::new(&["si", "fr", "not a code"]);
        let entries: Vec<_> = catalog.entries().collect();
        assert_eq!(entries.len(), 17);
        assert!(entries.contains(&("fr", "French", true)));
        assert!(entries.contains(&("de", "German", false)));
    }

    #[test]
    fn test_serde_uses_plain_string() {
        let code: LanguageCode = serde_json::from_str("\"ja\"").unwrap();
        assert_eq!(code.name(), "Japanese");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"ja\"");
        assert!(serde_json::from_str::<LanguageCode>("\"!!\"").is_err());
    }
}
