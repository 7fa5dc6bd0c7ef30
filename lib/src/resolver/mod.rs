use crate::{
    access_map::AccessMap,
    decision::{AccessDecision, Guide},
    forum::CategoryRef,
};


/// Finds the guide for a category that failed the default permission check.
///
/// The most specific entry wins: a category listed in the map is never overruled by an entry of
/// its parent.
pub struct AccessMapResolver;

impl AccessMapResolver {
    /// Resolves against the raw setting value, parsing it on every call
    pub fn resolve(category: &CategoryRef, raw_config: &str) -> AccessDecision {
        let access_map = AccessMap::parse(raw_config);
        Self::resolve_with_map(category, &access_map)
    }

    /// Returns [AccessDecision::DeniedDefault] if neither the category nor its parent is mapped
    pub fn resolve_with_map(category: &CategoryRef, access_map: &AccessMap) -> AccessDecision {
        let candidates = std::iter::once(category.id()).chain(category.parent_id());
        for category_id in candidates {
            if let Some(url) = access_map.guide_url(category_id) {
                tracing::debug!(category_id, url, "Found access guide");
                return AccessDecision::DeniedWithGuide(Guide::new(url, category_id));
            }
        }
        AccessDecision::DeniedDefault
    }
}
