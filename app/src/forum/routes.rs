use std::{net, sync::Arc};

use access_guide::{
    forum::{CategoryId, TopicId, Viewer},
    AccessDecision, AccessGuide,
};
use serde_json::json;

use crate::{
    data_formats::RequestFormat,
    exceptions::{ExceptionContext, ExceptionRenderer, ExceptionType},
    guide::AccessGuideRenderer,
    http::{
        response::StatusCode,
        server::{Endpoint, HttpServe, InternalServerError},
        Method, Request, Response,
    },
    templates::{SerializedData, TemplateRenderer},
    users::{CurrentUser, CurrentUserProvider},
};

use super::{ConfigGuardian, ForumCatalog, TopicSummary};


const SUGGESTED_TOPICS: usize = 5;

/// Resources served by the forum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Topic,
    Category,
    CategoryTopicList,
}
impl ResourceKind {
    fn path(&self) -> &'static str {
        match self {
            ResourceKind::Topic => r"/t/(?:[^/]+/)?(?P<topic_id>[^/]+?)(?:\.json)?",
            ResourceKind::Category => r"/c/(?:[^/]+/)?(?P<category_id>\d+)(?:\.json)?",
            ResourceKind::CategoryTopicList => {
                r"/c/(?:[^/]+/)?(?P<category_id>\d+)/l/(?:latest|new|top)(?:\.json)?"
            }
        }
    }

    /// Pages rendered client side expect the error page in the JSON body
    fn include_extras(&self) -> bool {
        matches!(self, ResourceKind::Topic | ResourceKind::Category)
    }
}

/// Everything the forum handlers share
pub struct ForumContext {
    access_guide: AccessGuide,
    catalog: Arc<ForumCatalog>,
    guardian: Arc<ConfigGuardian>,
    exceptions: Arc<ExceptionRenderer>,
    guide_renderer: AccessGuideRenderer,
    current_user_provider: Arc<dyn CurrentUserProvider + Send + Sync>,
    template_renderer: Arc<dyn TemplateRenderer + Send + Sync>,
}
impl ForumContext {
    pub fn new(
        access_guide: AccessGuide,
        catalog: Arc<ForumCatalog>,
        guardian: Arc<ConfigGuardian>,
        exceptions: Arc<ExceptionRenderer>,
        current_user_provider: Arc<dyn CurrentUserProvider + Send + Sync>,
        template_renderer: Arc<dyn TemplateRenderer + Send + Sync>,
    ) -> Self {
        let guide_renderer =
            AccessGuideRenderer::new(exceptions.clone(), current_user_provider.clone());
        Self {
            access_guide,
            catalog,
            guardian,
            exceptions,
            guide_renderer,
            current_user_provider,
            template_renderer,
        }
    }
}

pub fn create_forum_endpoints(context: Arc<ForumContext>) -> Result<Vec<Endpoint>, regex::Error> {
    [
        ResourceKind::Topic,
        ResourceKind::Category,
        ResourceKind::CategoryTopicList,
    ]
    .into_iter()
    .map(|kind| {
        let serve = ForumServe::new(kind, context.clone());
        Endpoint::new(Method::Get, kind.path(), Box::new(serve))
    })
    .collect()
}

#[derive(serde::Serialize)]
struct ResourcePage<'a> {
    locale: &'a str,
    title: &'a str,
    current_user: Option<&'a CurrentUser>,
    topics: Vec<TopicSummary>,
}

pub struct ForumServe {
    kind: ResourceKind,
    context: Arc<ForumContext>,
}
impl ForumServe {
    const TEMPLATE: &'static str = "forum/resource.html";

    pub fn new(kind: ResourceKind, context: Arc<ForumContext>) -> Self {
        Self { kind, context }
    }

    fn current_user(&self, request: &Request) -> Option<CurrentUser> {
        self.context
            .current_user_provider
            .current_user(request)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Ignoring invalid user, serving anonymously");
                None
            })
    }

    fn category_id(request: &Request) -> Option<CategoryId> {
        request.path_param("category_id")?.parse().ok()
    }

    fn topic_id(request: &Request) -> Option<TopicId> {
        request.path_param("topic_id")?.parse().ok()
    }

    fn check(&self, request: &Request, viewer: Option<&Viewer>) -> Option<AccessDecision> {
        let decision = match self.kind {
            ResourceKind::Topic => self
                .context
                .access_guide
                .check_topic(request.path_param("topic_id"), viewer),
            ResourceKind::Category | ResourceKind::CategoryTopicList => {
                let category_id = Self::category_id(request)?;
                self.context.access_guide.check_category(category_id, viewer)
            }
        };
        decision
            .inspect_err(|e| tracing::debug!(error = %e, "Lookup failed"))
            .ok()
    }

    fn not_found(
        &self,
        request: &Request,
        viewer: Option<&Viewer>,
        current_user: Option<CurrentUser>,
    ) -> Response {
        let context = ExceptionContext {
            include_extras: self.kind.include_extras(),
            topics: self.context.guardian.visible_topics(viewer, SUGGESTED_TOPICS),
            current_user,
        };
        self.context
            .exceptions
            .rescue(request, ExceptionType::NotFound, context)
    }

    fn invalid_access(&self, request: &Request, current_user: Option<CurrentUser>) -> Response {
        let context = ExceptionContext {
            include_extras: self.kind.include_extras(),
            topics: Vec::new(),
            current_user,
        };
        self.context
            .exceptions
            .rescue(request, ExceptionType::InvalidAccess, context)
    }

    /// Renders the resource the viewer is allowed to see
    fn show(
        &self,
        request: &Request,
        viewer: Option<&Viewer>,
        current_user: Option<CurrentUser>,
    ) -> Result<Response, InternalServerError> {
        let catalog = &self.context.catalog;
        let (json, title, topics) = match self.kind {
            ResourceKind::Topic => {
                let Some(topic) = Self::topic_id(request).and_then(|id| catalog.topic(id)) else {
                    return Ok(self.not_found(request, viewer, current_user));
                };
                let json = json!({
                    "topic": {
                        "id": topic.id,
                        "title": topic.title,
                        "category_id": topic.category,
                    }
                });
                (json, topic.title.clone(), Vec::new())
            }
            ResourceKind::Category | ResourceKind::CategoryTopicList => {
                let Some(category) = Self::category_id(request).and_then(|id| catalog.category(id))
                else {
                    return Ok(self.not_found(request, viewer, current_user));
                };
                let topics: Vec<TopicSummary> = catalog
                    .topics_in(category.id)
                    .map(TopicSummary::from)
                    .collect();
                let json = if self.kind == ResourceKind::Category {
                    json!({
                        "category": {
                            "id": category.id,
                            "name": category.name,
                            "parent_category_id": category.parent,
                        }
                    })
                } else {
                    json!({
                        "topic_list": {
                            "category_id": category.id,
                            "topics": topics,
                        }
                    })
                };
                (json, category.name.clone(), topics)
            }
        };
        if RequestFormat::negotiate(request) == RequestFormat::Json {
            return Ok(Response::json(StatusCode::OK, &json));
        }
        let page = ResourcePage {
            locale: self.context.exceptions.locale(),
            title: &title,
            current_user: current_user.as_ref(),
            topics,
        };
        let html = self
            .context
            .template_renderer
            .render(Self::TEMPLATE, &SerializedData::new(page))
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to render resource page");
                InternalServerError::new()
            })?;
        Ok(Response::html(StatusCode::OK, html))
    }
}
impl HttpServe for ForumServe {
    fn serve_http(
        &self,
        client_addr: &net::SocketAddr,
        request: Request,
    ) -> Result<Response, InternalServerError> {
        let _span = tracing::info_span!("[Forum]", %client_addr, kind = ?self.kind).entered();
        let current_user = self.current_user(&request);
        let viewer = current_user.as_ref().map(CurrentUser::viewer);
        let response = match self.check(&request, viewer.as_ref()) {
            Some(AccessDecision::Allowed) => self.show(&request, viewer.as_ref(), current_user)?,
            Some(AccessDecision::DeniedDefault) => self.invalid_access(&request, current_user),
            Some(AccessDecision::DeniedWithGuide(guide)) => {
                self.context
                    .guide_renderer
                    .render(&guide, &request, self.kind.include_extras())
            }
            None => self.not_found(&request, viewer.as_ref(), current_user),
        };
        Ok(response)
    }
}
