pub use decision::{AccessDecision, Guide};
pub mod access_map;
pub mod decision;
pub mod err;
pub mod forum;
pub use resolver::AccessMapResolver;
pub mod resolver;
pub mod settings;

#[cfg(test)]
mod tests;

use err::LookupError;
use forum::*;
use settings::SettingsProvider;

/// Intercepts denials of the host's [Guardian] and points the viewer to a [Guide] on how to gain
/// access, if the operator configured one for the category.
///
/// Without the feature flag every denial is passed through as [AccessDecision::DeniedDefault].
pub struct AccessGuide {
    settings_provider: Box<dyn SettingsProvider + Send + Sync>,
    forum_store: Box<dyn ForumStore + Send + Sync>,
    guardian: Box<dyn Guardian + Send + Sync>,
}

impl AccessGuide {
    pub fn new(
        settings_provider: Box<dyn SettingsProvider + Send + Sync>,
        forum_store: Box<dyn ForumStore + Send + Sync>,
        guardian: Box<dyn Guardian + Send + Sync>,
    ) -> Self {
        Self {
            settings_provider,
            forum_store,
            guardian,
        }
    }

    /// Checks if the [Viewer] may see the category.
    ///
    /// Returns [LookupError::CategoryNotFound] for unknown categories
    pub fn check_category(
        &self,
        category_id: CategoryId,
        viewer: Option<&Viewer>,
    ) -> Result<AccessDecision, LookupError> {
        let _span = tracing::info_span!("[AccessGuide(category)]", category_id).entered();
        let category = self.find_category(category_id)?;
        if self.guardian.can_see_category(&category, viewer) {
            return Ok(AccessDecision::Allowed);
        }
        Ok(self.intercept_denial(&category))
    }

    /// Checks if the [Viewer] may see the topic. The topic id is taken as sent by the client.
    ///
    /// Returns [LookupError::TopicNotFound] if the id is missing, not a number or unknown
    pub fn check_topic(
        &self,
        topic_id: Option<&str>,
        viewer: Option<&Viewer>,
    ) -> Result<AccessDecision, LookupError> {
        let _span = tracing::info_span!("[AccessGuide(topic)]", topic_id).entered();
        let topic = self.find_topic(topic_id)?;
        if self.guardian.can_see_topic(&topic, viewer) {
            return Ok(AccessDecision::Allowed);
        }
        let category = match topic.category_id() {
            Some(category_id) => self.find_category(category_id)?,
            None => return Ok(AccessDecision::DeniedDefault),
        };
        Ok(self.intercept_denial(&category))
    }

    fn intercept_denial(&self, category: &CategoryRef) -> AccessDecision {
        let settings = self.settings_provider.read_settings();
        if !settings.enabled() {
            return AccessDecision::DeniedDefault;
        }
        let decision = AccessMapResolver::resolve(category, settings.category_access_map());
        match &decision {
            AccessDecision::DeniedWithGuide(guide) => tracing::info!(
                restricted_category_id = guide.restricted_category_id(),
                "Denied access to {category}, pointing to guide"
            ),
            _ => tracing::debug!("No guide configured for {category}"),
        }
        decision
    }

    fn find_category(&self, category_id: CategoryId) -> Result<CategoryRef, LookupError> {
        self.forum_store
            .find_category(category_id)
            .ok_or(LookupError::CategoryNotFound(category_id))
    }

    fn find_topic(&self, topic_id: Option<&str>) -> Result<TopicRef, LookupError> {
        let not_found = || LookupError::TopicNotFound(topic_id.map(String::from));
        let id = topic_id
            .and_then(|id| id.trim().parse::<TopicId>().ok())
            .ok_or_else(not_found)?;
        self.forum_store.find_topic(id).ok_or_else(not_found)
    }
}
