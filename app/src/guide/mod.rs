use std::sync::Arc;

use access_guide::Guide;
use serde_json::json;

use crate::{
    exceptions::{ExceptionPage, ExceptionRenderer, ExceptionType},
    http::{Request, Response},
    users::{CurrentUser, CurrentUserProvider},
};


/// Turns a denial with a guide into the "how to gain access" 403 response
pub struct AccessGuideRenderer {
    exceptions: Arc<ExceptionRenderer>,
    current_user_provider: Arc<dyn CurrentUserProvider + Send + Sync>,
}
impl AccessGuideRenderer {
    pub fn new(
        exceptions: Arc<ExceptionRenderer>,
        current_user_provider: Arc<dyn CurrentUserProvider + Send + Sync>,
    ) -> Self {
        Self {
            exceptions,
            current_user_provider,
        }
    }

    /// `include_extras` adds the rendered page to JSON answers of topic and category routes
    pub fn render(&self, guide: &Guide, request: &Request, include_extras: bool) -> Response {
        tracing::info!(
            category_id = guide.restricted_category_id(),
            url = guide.url(),
            "Showing access guide"
        );
        let page_title = self.exceptions.translate("access_denied", json!({}));
        let message = self
            .exceptions
            .translate("error_message", json!({ "url": guide.url() }));
        let page = ExceptionPage {
            locale: self.exceptions.locale().into(),
            page_title: page_title.clone(),
            title: message,
            details: None,
            topics: Vec::new(),
            hide_search: true,
            current_user: self.current_user(request),
        };
        self.exceptions.render(
            request,
            ExceptionType::CustomInvalidAccess,
            page_title,
            page,
            include_extras,
        )
    }

    fn current_user(&self, request: &Request) -> Option<CurrentUser> {
        self.current_user_provider
            .current_user(request)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Could not resolve current user, rendering anonymously");
                None
            })
    }
}
