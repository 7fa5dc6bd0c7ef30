use std::collections::HashSet;

use crate::forum::*;

/// Denies every category/topic listed, allows the rest
pub struct StubGuardian {
    denied_categories: HashSet<CategoryId>,
    denied_topics: HashSet<TopicId>,
}

impl StubGuardian {
    pub fn allow_all() -> Self {
        Self::deny(vec![], vec![])
    }

    pub fn deny(denied_categories: Vec<CategoryId>, denied_topics: Vec<TopicId>) -> Self {
        Self {
            denied_categories: denied_categories.into_iter().collect(),
            denied_topics: denied_topics.into_iter().collect(),
        }
    }
}

impl Guardian for StubGuardian {
    fn can_see_category(&self, category: &CategoryRef, _: Option<&Viewer>) -> bool {
        !self.denied_categories.contains(&category.id())
    }

    fn can_see_topic(&self, topic: &TopicRef, _: Option<&Viewer>) -> bool {
        !self.denied_topics.contains(&topic.id())
    }
}
