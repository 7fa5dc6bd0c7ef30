use std::sync::Arc;

use serde_json::json;

use crate::{
    data_formats::{AsJsonError, RequestFormat},
    forum::TopicSummary,
    http::{response::StatusCode, Request, Response},
    i18n::Translator,
    templates::{SerializedData, TemplateError, TemplateRenderer},
    users::CurrentUser,
};

#[cfg(test)]
mod tests;

/// Kinds of failed requests the forum answers with an error page
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ExceptionType {
    InvalidAccess,
    NotFound,
    CustomInvalidAccess,
}
impl ExceptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExceptionType::InvalidAccess => "invalid_access",
            ExceptionType::NotFound => "not_found",
            ExceptionType::CustomInvalidAccess => "custom_invalid_access",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ExceptionType::NotFound => StatusCode::NotFound,
            ExceptionType::InvalidAccess | ExceptionType::CustomInvalidAccess => {
                StatusCode::Forbidden
            }
        }
    }
}

/// Data of the `exceptions/not_found.html` template. Title and details are trusted HTML
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ExceptionPage {
    pub locale: String,
    pub page_title: String,
    pub title: String,
    pub details: Option<String>,
    pub topics: Vec<TopicSummary>,
    pub hide_search: bool,
    pub current_user: Option<CurrentUser>,
}

/// Extra page data for clients rendering topic and category pages themselves
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorExtras {
    pub title: String,
    pub html: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
    pub error_type: ExceptionType,
    pub extras: Option<ErrorExtras>,
}
impl AsJsonError for ErrorBody {
    fn as_json_error(&self) -> serde_json::Value {
        let mut json = json!({
            "message": self.message,
            "type": self.error_type.as_str(),
            "status": self.error_type.status_code().code(),
        });
        if let Some(extras) = &self.extras {
            json["extras"] = json!(extras);
        }
        json
    }
}

/// What the forum knows about the failed request
#[derive(Debug, Clone, Default)]
pub struct ExceptionContext {
    /// Request targets a topic or category page
    pub include_extras: bool,
    /// Topics the viewer may see instead
    pub topics: Vec<TopicSummary>,
    pub current_user: Option<CurrentUser>,
}

/// Renders the forum's default error responses for [ExceptionType::InvalidAccess] and
/// [ExceptionType::NotFound], and the error page shared by all exceptions
pub struct ExceptionRenderer {
    translator: Arc<dyn Translator + Send + Sync>,
    template_renderer: Arc<dyn TemplateRenderer + Send + Sync>,
}
impl ExceptionRenderer {
    const TEMPLATE: &'static str = "exceptions/not_found.html";

    pub fn new(
        translator: Arc<dyn Translator + Send + Sync>,
        template_renderer: Arc<dyn TemplateRenderer + Send + Sync>,
    ) -> Self {
        Self {
            translator,
            template_renderer,
        }
    }

    /// Translates the key. Missing translations show up as the key instead of failing the request
    pub fn translate(&self, key: &str, params: serde_json::Value) -> String {
        match self.translator.translate(key, &params) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(error = %e, "Translation failed");
                format!("[{}.{key}]", self.translator.locale())
            }
        }
    }

    pub fn locale(&self) -> &str {
        self.translator.locale()
    }

    pub fn build_exception_page(&self, page: &ExceptionPage) -> Result<String, TemplateError> {
        self.template_renderer
            .render(Self::TEMPLATE, &SerializedData::new(page))
    }

    /// Answers in the negotiated format. Falls back to plain text if the page can't be rendered
    pub fn render(
        &self,
        request: &Request,
        error_type: ExceptionType,
        message: String,
        page: ExceptionPage,
        include_extras: bool,
    ) -> Response {
        let status_code = error_type.status_code();
        match RequestFormat::negotiate(request) {
            RequestFormat::Json => {
                let extras = include_extras.then(|| ErrorExtras {
                    title: page.page_title.clone(),
                    html: self.build_exception_page(&page).ok(),
                });
                let body = ErrorBody {
                    message,
                    error_type,
                    extras,
                };
                Response::json(status_code, &body.as_json_error())
            }
            RequestFormat::Html => match self.build_exception_page(&page) {
                Ok(html) => Response::html(status_code, html),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to render error page");
                    plain_text(status_code, message)
                }
            },
        }
    }

    /// Default forum behaviour for a failed request
    pub fn rescue(
        &self,
        request: &Request,
        error_type: ExceptionType,
        context: ExceptionContext,
    ) -> Response {
        let message = self.translate(error_type.as_str(), json!({}));
        let page_title = match error_type {
            ExceptionType::NotFound => self.translate("page_not_found", json!({})),
            _ => self.translate("access_denied", json!({})),
        };
        let page = ExceptionPage {
            locale: self.locale().into(),
            page_title,
            title: message.clone(),
            details: None,
            topics: context.topics,
            hide_search: false,
            current_user: context.current_user,
        };
        self.render(request, error_type, message, page, context.include_extras)
    }
}

fn plain_text(status_code: StatusCode, message: String) -> Response {
    let mut headers = crate::http::Headers::empty();
    headers.insert("Content-Type", "text/plain; charset=utf-8");
    Response::new(status_code, headers, message.into_bytes())
}
