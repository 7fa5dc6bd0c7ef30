use std::sync::Arc;

use access_guide::forum::{
    CategoryId, CategoryRef, ForumStore, Guardian, TopicId, TopicRef, Viewer,
};
use indexmap::IndexMap;

pub mod routes;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub parent: Option<CategoryId>,
    pub read_restricted: bool,
    pub allowed_users: Vec<String>,
}
impl Category {
    pub fn to_ref(&self) -> CategoryRef {
        match self.parent {
            Some(parent_id) => CategoryRef::with_parent(self.id, parent_id),
            None => CategoryRef::new(self.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    pub category: Option<CategoryId>,
}
impl Topic {
    pub fn to_ref(&self) -> TopicRef {
        TopicRef::new(self.id, self.category)
    }
}

/// Entry of topic lists shown on pages
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TopicSummary {
    pub id: TopicId,
    pub title: String,
}
impl TopicSummary {
    pub fn new(id: TopicId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}
impl From<&Topic> for TopicSummary {
    fn from(topic: &Topic) -> Self {
        Self::new(topic.id, &topic.title)
    }
}

/// Categories and topics of the forum, in configuration order
pub struct ForumCatalog {
    categories: IndexMap<CategoryId, Category>,
    topics: IndexMap<TopicId, Topic>,
}
impl ForumCatalog {
    pub fn new(categories: Vec<Category>, topics: Vec<Topic>) -> Self {
        Self {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            topics: topics.into_iter().map(|t| (t.id, t)).collect(),
        }
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }

    pub fn topic(&self, id: TopicId) -> Option<&Topic> {
        self.topics.get(&id)
    }

    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.topics.values()
    }

    pub fn topics_in(&self, category_id: CategoryId) -> impl Iterator<Item = &Topic> {
        self.topics
            .values()
            .filter(move |topic| topic.category == Some(category_id))
    }
}
impl ForumStore for ForumCatalog {
    fn find_category(&self, id: CategoryId) -> Option<CategoryRef> {
        self.category(id).map(Category::to_ref)
    }

    fn find_topic(&self, id: TopicId) -> Option<TopicRef> {
        self.topic(id).map(Topic::to_ref)
    }
}

/// Default permission rule: restricted categories are only visible to their allowed users.
/// Restrictions of parent categories apply to their subcategories too.
pub struct ConfigGuardian {
    catalog: Arc<ForumCatalog>,
}
impl ConfigGuardian {
    const MAX_CATEGORY_DEPTH: usize = 8;

    pub fn new(catalog: Arc<ForumCatalog>) -> Self {
        Self { catalog }
    }

    fn can_see_category_id(&self, category_id: CategoryId, viewer: Option<&Viewer>) -> bool {
        let mut next = Some(category_id);
        for _ in 0..Self::MAX_CATEGORY_DEPTH {
            let Some(id) = next else {
                return true;
            };
            let Some(category) = self.catalog.category(id) else {
                return false;
            };
            if category.read_restricted && !Self::is_allowed(category, viewer) {
                return false;
            }
            next = category.parent;
        }
        tracing::warn!(category_id, "Category nesting too deep, denying access");
        next.is_none()
    }

    fn is_allowed(category: &Category, viewer: Option<&Viewer>) -> bool {
        viewer.is_some_and(|viewer| {
            category
                .allowed_users
                .iter()
                .any(|user| user.eq_ignore_ascii_case(viewer.username()))
        })
    }

    /// Topics the viewer may see, in catalog order
    pub fn visible_topics(&self, viewer: Option<&Viewer>, limit: usize) -> Vec<TopicSummary> {
        self.catalog
            .topics()
            .filter(|topic| self.can_see_topic(&topic.to_ref(), viewer))
            .take(limit)
            .map(TopicSummary::from)
            .collect()
    }
}
impl Guardian for ConfigGuardian {
    fn can_see_category(&self, category: &CategoryRef, viewer: Option<&Viewer>) -> bool {
        self.can_see_category_id(category.id(), viewer)
    }

    fn can_see_topic(&self, topic: &TopicRef, viewer: Option<&Viewer>) -> bool {
        match topic.category_id() {
            Some(category_id) => self.can_see_category_id(category_id, viewer),
            None => true,
        }
    }
}
