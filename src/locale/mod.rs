//! Localization glue — embedded catalogs and `%{name}` interpolation.
//!
//! The original client shipped with environment-based locale negotiation
//! wired off: a single hardcoded locale is always selected. That behavior
//! is preserved here — [`negotiate`] exists but currently ignores what the
//! environment reports.

use std::collections::HashMap;

use crate::error::LocaleError;

/// The locale the client always starts with.
pub const DEFAULT_LOCALE: &str = "zh-Hans";

/// Locales with embedded catalogs.
pub const AVAILABLE_LOCALES: &[&str] = &["zh-Hans", "en-US"];

/// Pick a locale for the given environment hint.
///
/// Negotiation is intentionally disabled: whatever `_requested` says, the
/// default locale wins. The signature stays so views can pass
/// `navigator.language` unchanged when negotiation is re-enabled.
pub fn negotiate(_requested: Option<&str>) -> &'static str {
    DEFAULT_LOCALE
}

/// A loaded translation catalog.
///
/// Keys are dotted paths (`"market.title"`); nested JSON objects in the
/// catalog are flattened on load. Lookup misses return the key itself, so
/// a missing translation shows up in the UI instead of vanishing.
pub struct Locale {
    locale: String,
    phrases: HashMap<String, String>,
}

impl Locale {
    /// Load the default locale. The embedded catalogs are validated by
    /// tests, so this cannot fail at runtime.
    pub fn new() -> Self {
        Self::with_locale(DEFAULT_LOCALE).expect("embedded default catalog is valid")
    }

    /// Load a specific locale by identifier.
    pub fn with_locale(locale: &str) -> Result<Self, LocaleError> {
        let raw = match locale {
            "zh-Hans" => include_str!("zh-Hans.json"),
            "en-US" => include_str!("en-US.json"),
            other => return Err(LocaleError::UnknownLocale(other.to_string())),
        };

        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|source| LocaleError::InvalidCatalog {
                locale: locale.to_string(),
                source,
            })?;

        let mut phrases = HashMap::new();
        flatten("", &value, &mut phrases);

        Ok(Self {
            locale: locale.to_string(),
            phrases,
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Translate a key. Unknown keys come back verbatim.
    pub fn t(&self, key: &str) -> String {
        self.phrases
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Translate a key, substituting `%{name}` placeholders.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut phrase = self.t(key);
        for (name, value) in args {
            phrase = phrase.replace(&format!("%{{{}}}", name), value);
        }
        phrase
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten nested catalog objects into dotted keys.
fn flatten(prefix: &str, value: &serde_json::Value, out: &mut HashMap<String, String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(&path, child, out);
            }
        }
        serde_json::Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        other => {
            tracing::warn!(key = prefix, "ignoring non-string catalog entry: {}", other);
        }
    }
}
