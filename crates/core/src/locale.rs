use crate::i18n::{Language, SOURCE_LANGUAGE};

/// Pick the active language.
///
/// Precedence: a stored preference naming a supported language, then the
/// runtime locale's two-letter prefix, then the source language.
pub fn resolve(stored: Option<&str>, runtime_locale: Option<&str>) -> Language {
    if let Some(lang) = stored.and_then(Language::from_code) {
        return lang;
    }
    if let Some(lang) = runtime_locale.and_then(Language::from_locale) {
        return lang;
    }
    SOURCE_LANGUAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_preference_wins_over_runtime_locale() {
        assert_eq!(resolve(Some("en"), Some("fr")), Language::En);
    }

    #[test]
    fn runtime_locale_used_without_preference() {
        assert_eq!(resolve(None, Some("de")), Language::De);
        assert_eq!(resolve(None, Some("es-MX")), Language::Es);
    }

    #[test]
    fn unsupported_values_fall_through() {
        assert_eq!(resolve(None, Some("ja")), Language::It);
        assert_eq!(resolve(Some("xx"), Some("ru_RU.UTF-8")), Language::Ru);
        assert_eq!(resolve(Some(""), None), Language::It);
    }
}
