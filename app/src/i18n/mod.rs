use std::{collections::HashMap, error::Error, fmt::Display};

use indexmap::IndexMap;

#[cfg(test)]
mod tests;

pub trait Translator {
    /// Looks up the message and fills in `{{placeholders}}` from `params`.
    ///
    /// Interpolated values are HTML escaped, the message itself is trusted
    fn translate(&self, key: &str, params: &serde_json::Value) -> Result<String, TranslationError>;

    fn locale(&self) -> &str;
}

type LocaleTable = IndexMap<String, String>;

/// Reads messages from TOML locale tables, falling back to [LocaleTranslator::FALLBACK_LOCALE]
pub struct LocaleTranslator {
    locale: String,
    tables: HashMap<String, LocaleTable>,
}
impl LocaleTranslator {
    pub const FALLBACK_LOCALE: &'static str = "en";

    pub fn new(locale: impl Into<String>, tables: HashMap<String, LocaleTable>) -> Self {
        Self {
            locale: locale.into(),
            tables,
        }
    }

    /// Translator with the locales shipped with the binary
    pub fn embedded(locale: impl Into<String>) -> Result<Self, TranslationError> {
        let mut tables = HashMap::new();
        tables.insert("en".into(), parse_locale_table("en", include_str!("../../locales/en.toml"))?);
        tables.insert("de".into(), parse_locale_table("de", include_str!("../../locales/de.toml"))?);
        let locale = locale.into();
        if !tables.contains_key(&locale) {
            tracing::warn!(locale = %locale, "Unknown locale, using '{}'", Self::FALLBACK_LOCALE);
        }
        Ok(Self::new(locale, tables))
    }

    fn find_message(&self, key: &str) -> Option<&str> {
        [self.locale.as_str(), Self::FALLBACK_LOCALE]
            .into_iter()
            .filter_map(|locale| self.tables.get(locale))
            .find_map(|table| table.get(key))
            .map(String::as_str)
    }
}
impl Translator for LocaleTranslator {
    fn translate(&self, key: &str, params: &serde_json::Value) -> Result<String, TranslationError> {
        let message = self
            .find_message(key)
            .ok_or_else(|| TranslationError::MissingKey(key.into()))?;
        let handlebars = handlebars::Handlebars::new();
        handlebars
            .render_template(message, params)
            .map_err(|e| TranslationError::Interpolation(key.into(), e.reason().to_string()))
    }

    fn locale(&self) -> &str {
        &self.locale
    }
}

pub fn parse_locale_table(locale: &str, toml: &str) -> Result<LocaleTable, TranslationError> {
    toml::from_str(toml).map_err(|e| TranslationError::InvalidLocale(locale.into(), e.to_string()))
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TranslationError {
    MissingKey(String),
    Interpolation(String, String),
    InvalidLocale(String, String),
}
impl Error for TranslationError {}
impl Display for TranslationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslationError::MissingKey(key) => write!(f, "No translation for '{key}'"),
            TranslationError::Interpolation(key, reason) => {
                write!(f, "Failed to interpolate '{key}': {reason}")
            }
            TranslationError::InvalidLocale(locale, reason) => {
                write!(f, "Locale '{locale}' is invalid: {reason}")
            }
        }
    }
}
