use std::collections::HashMap;

use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

use crate::i18n::*;

#[test_case("en", "Access Denied" ; "english")]
#[test_case("de", "Zugriff verweigert" ; "german")]
#[test_case("fr", "Access Denied" ; "unknown locale falls back to english")]
pub fn translate_should_use_active_locale(locale: &str, expected: &str) {
    // Arrange
    let sut = LocaleTranslator::embedded(locale).unwrap();
    // Act
    let message = sut.translate("access_denied", &json!({}));
    // Assert
    assert_eq!(Ok(expected.to_string()), message);
}

#[test]
pub fn translate_should_fall_back_to_english_for_missing_key() {
    // Arrange
    let sut = LocaleTranslator::embedded("de").unwrap();
    // Act
    let message = sut.translate("page_not_found", &json!({}));
    // Assert
    assert_eq!(Ok("Page Not Found".to_string()), message);
}

#[test]
pub fn translate_should_fail_for_unknown_key() {
    // Arrange
    let sut = LocaleTranslator::embedded("en").unwrap();
    // Act
    let message = sut.translate("no_such_key", &json!({}));
    // Assert
    assert_eq!(Err(TranslationError::MissingKey("no_such_key".into())), message);
}

#[test]
pub fn translate_should_interpolate_guide_url_into_link() {
    // Arrange
    let sut = LocaleTranslator::embedded("en").unwrap();
    // Act
    let message = sut.translate("error_message", &json!({"url": "https://guide.example/5"}));
    // Assert
    let expected = concat!(
        "This category is private. ",
        r#"<a href="https://guide.example/5">Find out how to gain access</a>."#
    );
    assert_eq!(Ok(expected.to_string()), message);
}

#[test]
pub fn translate_should_encode_special_characters_of_interpolated_url() {
    // Arrange
    let mut table = IndexMap::new();
    table.insert("error_message".to_string(), r#"<a href="{{url}}">join</a>"#.to_string());
    let mut tables = HashMap::new();
    tables.insert("en".to_string(), table);
    let sut = LocaleTranslator::new("en", tables);
    // Act
    let message = sut.translate("error_message", &json!({"url": r#"/join?a"><script>"#}));
    // Assert
    assert_eq!(
        Ok(r#"<a href="/join?a&quot;&gt;&lt;script&gt;">join</a>"#.to_string()),
        message
    );
}

#[test]
pub fn parse_locale_table_should_reject_invalid_toml() {
    // Act
    let result = parse_locale_table("xx", "access_denied = ");
    // Assert
    assert!(matches!(result, Err(TranslationError::InvalidLocale(locale, _)) if locale == "xx"));
}
