use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::MenuError;

/// Languages the menu is published in. `It` is the source language: dish
/// names in Italian double as lookup keys and every text falls back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Language {
    #[default]
    It,
    En,
    Es,
    Fr,
    De,
    Ru,
}

pub const SOURCE_LANGUAGE: Language = Language::It;

impl Language {
    pub fn all() -> &'static [Language] {
        &[
            Language::It,
            Language::En,
            Language::Es,
            Language::Fr,
            Language::De,
            Language::Ru,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::It => "it",
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Ru => "ru",
        }
    }

    /// Markup attribute holding this language's variant of a text.
    pub fn data_attribute(&self) -> &'static str {
        match self {
            Language::It => "data-it",
            Language::En => "data-en",
            Language::Es => "data-es",
            Language::Fr => "data-fr",
            Language::De => "data-de",
            Language::Ru => "data-ru",
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            Language::It => "🇮🇹",
            Language::En => "🇬🇧",
            Language::Es => "🇪🇸",
            Language::Fr => "🇫🇷",
            Language::De => "🇩🇪",
            Language::Ru => "🇷🇺",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Language::It => "Italiano",
            Language::En => "English",
            Language::Es => "Español",
            Language::Fr => "Français",
            Language::De => "Deutsch",
            Language::Ru => "Русский",
        }
    }

    /// Parse an exact two-letter code (case-insensitive, surrounding
    /// whitespace ignored).
    pub fn from_code(code: &str) -> Option<Language> {
        let code = code.trim().to_ascii_lowercase();
        Language::all()
            .iter()
            .copied()
            .find(|lang| lang.code() == code)
    }

    /// Parse a locale tag such as `de-AT` or `ru_RU.UTF-8` by its leading
    /// two letters.
    pub fn from_locale(locale: &str) -> Option<Language> {
        let prefix: String = locale.trim().chars().take(2).collect();
        if prefix.chars().count() < 2 {
            return None;
        }
        Language::from_code(&prefix)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| MenuError::UnsupportedLanguage(s.trim().to_string()))
    }
}

impl Serialize for Language {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One displayable text in every language it was authored in.
///
/// The source-language entry is always present; lookups for a missing
/// language resolve to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct LocalizedString {
    variants: BTreeMap<Language, String>,
}

impl LocalizedString {
    pub fn new(source: impl Into<String>) -> Self {
        let mut variants = BTreeMap::new();
        variants.insert(SOURCE_LANGUAGE, source.into());
        Self { variants }
    }

    pub fn with(mut self, lang: Language, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.variants.insert(lang, text);
        }
        self
    }

    /// Build from `(code, text)` pairs, as found in markup attributes or data
    /// files. Unknown codes and empty texts are skipped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, MenuError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut variants = BTreeMap::new();
        for (code, text) in pairs {
            let Some(lang) = Language::from_code(code.as_ref()) else {
                continue;
            };
            let text = text.into();
            if !text.is_empty() {
                variants.insert(lang, text);
            }
        }
        if !variants.contains_key(&SOURCE_LANGUAGE) {
            return Err(MenuError::MissingSourceText);
        }
        Ok(Self { variants })
    }

    pub fn source(&self) -> &str {
        self.variants
            .get(&SOURCE_LANGUAGE)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, lang: Language) -> Option<&str> {
        self.variants.get(&lang).map(String::as_str)
    }

    pub fn resolve(&self, lang: Language) -> &str {
        self.get(lang).unwrap_or_else(|| self.source())
    }

    pub fn variants(&self) -> impl Iterator<Item = (Language, &str)> {
        self.variants.iter().map(|(l, s)| (*l, s.as_str()))
    }
}

impl TryFrom<BTreeMap<String, String>> for LocalizedString {
    type Error = MenuError;

    fn try_from(value: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        LocalizedString::from_pairs(value)
    }
}

impl From<LocalizedString> for BTreeMap<String, String> {
    fn from(value: LocalizedString) -> Self {
        value
            .variants
            .into_iter()
            .map(|(l, s)| (l.code().to_string(), s))
            .collect()
    }
}

/// Deserialize an optional localized text where an all-empty map (as emitted
/// for items without a description) means "absent".
pub(crate) fn deserialize_optional_localized<'de, D>(
    deserializer: D,
) -> Result<Option<LocalizedString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, String>>::deserialize(deserializer)?;
    Ok(raw.and_then(|map| LocalizedString::from_pairs(map).ok()))
}

/// Read the environment the way a browser exposes `navigator.language`.
///
/// Common values:
/// - LANG=de_DE.UTF-8
/// - LC_ALL=fr_FR.UTF-8
/// - LANGUAGE=ru_RU:en_US
pub fn detect_runtime_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANGUAGE", "LANG"]
        .into_iter()
        .filter_map(|key| std::env::var(key).ok())
        .find_map(|v| normalize_locale(&v))
}

/// First entry of a locale variable, lower-cased; `None` for empty values
/// and the C/POSIX locales in any encoding (`C.UTF-8`, `POSIX@euro`).
fn normalize_locale(value: &str) -> Option<String> {
    let first = value.trim().split(':').next()?.trim();
    let base = first.split(['.', '@']).next().unwrap_or(first);
    if base.is_empty() || base.eq_ignore_ascii_case("c") || base.eq_ignore_ascii_case("posix") {
        return None;
    }
    Some(first.to_ascii_lowercase())
}
