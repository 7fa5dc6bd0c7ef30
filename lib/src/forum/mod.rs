use std::{collections::HashMap, fmt::Display, sync::Arc};


pub type CategoryId = u64;
pub type TopicId = u64;

/// Minimal view of a category needed to decide on access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRef {
    id: CategoryId,
    parent_id: Option<CategoryId>,
}
impl CategoryRef {
    pub fn new(id: CategoryId) -> Self {
        Self {
            id,
            parent_id: None,
        }
    }

    pub fn with_parent(id: CategoryId, parent_id: CategoryId) -> Self {
        Self {
            id,
            parent_id: Some(parent_id),
        }
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn parent_id(&self) -> Option<CategoryId> {
        self.parent_id
    }
}
impl Display for CategoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.parent_id {
            Some(parent_id) => write!(f, "category {} (parent {parent_id})", self.id),
            None => write!(f, "category {}", self.id),
        }
    }
}

/// A discussion thread. Topics without a category are e.g. private messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicRef {
    id: TopicId,
    category_id: Option<CategoryId>,
}
impl TopicRef {
    pub fn new(id: TopicId, category_id: Option<CategoryId>) -> Self {
        Self { id, category_id }
    }

    pub fn id(&self) -> TopicId {
        self.id
    }

    /// Category owning the topic
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }
}

/// User on whose behalf a permission check runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    username: String,
}
impl Viewer {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Looks up topics and categories of the host forum
pub trait ForumStore {
    fn find_category(&self, id: CategoryId) -> Option<CategoryRef>;
    fn find_topic(&self, id: TopicId) -> Option<TopicRef>;
}

/// Default permission rule of the host forum.
///
/// Returns true if the viewer may see the resource without any intervention.
pub trait Guardian {
    fn can_see_category(&self, category: &CategoryRef, viewer: Option<&Viewer>) -> bool;
    fn can_see_topic(&self, topic: &TopicRef, viewer: Option<&Viewer>) -> bool;
}

impl<T: ForumStore + ?Sized> ForumStore for Arc<T> {
    fn find_category(&self, id: CategoryId) -> Option<CategoryRef> {
        (**self).find_category(id)
    }

    fn find_topic(&self, id: TopicId) -> Option<TopicRef> {
        (**self).find_topic(id)
    }
}

impl<T: Guardian + ?Sized> Guardian for Arc<T> {
    fn can_see_category(&self, category: &CategoryRef, viewer: Option<&Viewer>) -> bool {
        (**self).can_see_category(category, viewer)
    }

    fn can_see_topic(&self, topic: &TopicRef, viewer: Option<&Viewer>) -> bool {
        (**self).can_see_topic(topic, viewer)
    }
}

pub struct InMemoryForumStore {
    categories: HashMap<CategoryId, CategoryRef>,
    topics: HashMap<TopicId, TopicRef>,
}
impl InMemoryForumStore {
    pub fn new(categories: Vec<CategoryRef>, topics: Vec<TopicRef>) -> Self {
        Self {
            categories: categories.into_iter().map(|c| (c.id(), c)).collect(),
            topics: topics.into_iter().map(|t| (t.id(), t)).collect(),
        }
    }
}
impl ForumStore for InMemoryForumStore {
    fn find_category(&self, id: CategoryId) -> Option<CategoryRef> {
        self.categories.get(&id).copied()
    }

    fn find_topic(&self, id: TopicId) -> Option<TopicRef> {
        self.topics.get(&id).copied()
    }
}
