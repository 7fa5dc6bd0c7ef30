use crate::forum::CategoryId;

/// Outcome of checking a category or topic.
///
/// [AccessDecision::DeniedDefault] means the host handles the denial the way it always did,
/// [AccessDecision::DeniedWithGuide] replaces it with a message pointing to the [Guide].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed,
    DeniedDefault,
    DeniedWithGuide(Guide),
}

impl AccessDecision {
    /// True if a custom guide message has to be shown
    pub fn is_denied(&self) -> bool {
        matches!(self, AccessDecision::DeniedWithGuide(_))
    }

    pub fn guide(&self) -> Option<&Guide> {
        match self {
            AccessDecision::DeniedWithGuide(guide) => Some(guide),
            _ => None,
        }
    }

    pub fn guide_url(&self) -> Option<&str> {
        self.guide().map(Guide::url)
    }

    pub fn restricted_category_id(&self) -> Option<CategoryId> {
        self.guide().map(Guide::restricted_category_id)
    }
}

/// Explains where to go to gain access to a restricted category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guide {
    url: String,
    restricted_category_id: CategoryId,
}

impl Guide {
    pub fn new(url: impl Into<String>, restricted_category_id: CategoryId) -> Self {
        Self {
            url: url.into(),
            restricted_category_id,
        }
    }

    /// Operator configured url, used verbatim
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Category whose map entry produced this guide. Can be the parent of the checked category
    pub fn restricted_category_id(&self) -> CategoryId {
        self.restricted_category_id
    }
}
