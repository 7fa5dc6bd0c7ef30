use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

use crate::{
    data_formats::AsJsonError,
    exceptions::*,
    forum::TopicSummary,
    http::{response::StatusCode, Headers, Method, Request},
    i18n::LocaleTranslator,
    templates::{
        handlebars::HandlebarTemplateRenderer, InMemoryTemplateStore, SerializedData,
        TemplateError, TemplateRenderer,
    },
};

fn request(target: &str) -> Request {
    let mut headers = Headers::empty();
    headers.insert("Host", "forum.local");
    Request::new(Method::Get, target, headers).unwrap()
}

fn setup() -> ExceptionRenderer {
    let translator = LocaleTranslator::embedded("en").unwrap();
    let renderer = HandlebarTemplateRenderer::new(Box::new(InMemoryTemplateStore::embedded()));
    ExceptionRenderer::new(Arc::new(translator), Arc::new(renderer))
}

struct BrokenTemplateRenderer;
impl TemplateRenderer for BrokenTemplateRenderer {
    fn render(&self, template_name: &str, _: &SerializedData) -> Result<String, TemplateError> {
        Err(TemplateError::MissingTemplate(template_name.into()))
    }
}

#[test_case(ExceptionType::InvalidAccess, "invalid_access", 403)]
#[test_case(ExceptionType::NotFound, "not_found", 404)]
#[test_case(ExceptionType::CustomInvalidAccess, "custom_invalid_access", 403)]
pub fn error_body_should_carry_type_and_status(error_type: ExceptionType, name: &str, status: u16) {
    // Arrange
    let body = ErrorBody {
        message: "Nope".into(),
        error_type,
        extras: None,
    };
    // Act
    let json = body.as_json_error();
    // Assert
    assert_eq!(json!({"message": "Nope", "type": name, "status": status}), json);
}

#[test]
pub fn error_body_should_include_extras_when_present() {
    // Arrange
    let body = ErrorBody {
        message: "Nope".into(),
        error_type: ExceptionType::InvalidAccess,
        extras: Some(ErrorExtras {
            title: "Access Denied".into(),
            html: None,
        }),
    };
    // Act
    let json = body.as_json_error();
    // Assert
    assert_eq!(
        json!({
            "message": "Nope",
            "type": "invalid_access",
            "status": 403,
            "extras": {"title": "Access Denied", "html": null}
        }),
        json
    );
}

#[test]
pub fn rescue_should_answer_invalid_access_as_json() {
    // Arrange
    let renderer = setup();
    // Act
    let response = renderer.rescue(
        &request("/t/42.json"),
        ExceptionType::InvalidAccess,
        ExceptionContext::default(),
    );
    // Assert
    assert_eq!(StatusCode::Forbidden, response.status_code());
    assert_eq!(Some("application/json; charset=utf-8"), response.content_type());
    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(
        json!({
            "message": "You are not permitted to view the requested resource.",
            "type": "invalid_access",
            "status": 403
        }),
        body
    );
}

#[test]
pub fn rescue_should_add_extras_for_resource_pages() {
    // Arrange
    let renderer = setup();
    let context = ExceptionContext {
        include_extras: true,
        ..Default::default()
    };
    // Act
    let response = renderer.rescue(&request("/c/5.json"), ExceptionType::NotFound, context);
    // Assert
    assert_eq!(StatusCode::NotFound, response.status_code());
    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(json!("Page Not Found"), body["extras"]["title"]);
    let html = body["extras"]["html"].as_str().unwrap();
    assert!(html.contains("Oops! That page doesn't exist or is private."));
}

#[test]
pub fn rescue_should_render_html_page_with_search_and_topics() {
    // Arrange
    let renderer = setup();
    let context = ExceptionContext {
        include_extras: false,
        topics: vec![TopicSummary::new(7, "Public announcements")],
        current_user: None,
    };
    // Act
    let response = renderer.rescue(&request("/t/42"), ExceptionType::NotFound, context);
    // Assert
    assert_eq!(StatusCode::NotFound, response.status_code());
    assert_eq!(Some("text/html; charset=utf-8"), response.content_type());
    let html = response.body_text();
    assert!(html.contains("<title>Page Not Found</title>"));
    assert!(html.contains(r#"<a href="/t/7">Public announcements</a>"#));
    assert!(html.contains("page-not-found-search"));
}

#[test]
pub fn render_should_fall_back_to_plain_text_if_template_fails() {
    // Arrange
    let translator = LocaleTranslator::embedded("en").unwrap();
    let renderer = ExceptionRenderer::new(Arc::new(translator), Arc::new(BrokenTemplateRenderer));
    // Act
    let response = renderer.rescue(
        &request("/t/42"),
        ExceptionType::InvalidAccess,
        ExceptionContext::default(),
    );
    // Assert
    assert_eq!(StatusCode::Forbidden, response.status_code());
    assert_eq!(Some("text/plain; charset=utf-8"), response.content_type());
    assert_eq!(
        "You are not permitted to view the requested resource.",
        response.body_text()
    );
}

#[test]
pub fn translate_should_fall_back_to_key_if_missing() {
    // Arrange
    let renderer = setup();
    // Act
    let message = renderer.translate("no_such_key", json!({}));
    // Assert
    assert_eq!("[en.no_such_key]", message);
}
