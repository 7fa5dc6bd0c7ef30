use std::sync::Arc;

use access_guide::forum::{CategoryRef, ForumStore, Guardian, TopicRef, Viewer};
use pretty_assertions::assert_eq;
use test_case::test_case;

use crate::forum::*;

fn category(id: u64, parent: Option<u64>, restricted: bool, allowed: &[&str]) -> Category {
    Category {
        id,
        name: format!("Category {id}"),
        parent,
        read_restricted: restricted,
        allowed_users: allowed.iter().map(|u| u.to_string()).collect(),
    }
}

fn topic(id: u64, category: Option<u64>) -> Topic {
    Topic {
        id,
        title: format!("Topic {id}"),
        category,
    }
}

fn setup() -> ConfigGuardian {
    let catalog = ForumCatalog::new(
        vec![
            category(3, None, false, &[]),
            category(5, None, true, &["alice"]),
            category(9, Some(5), false, &[]),
        ],
        vec![
            topic(1, Some(3)),
            topic(42, Some(5)),
            topic(43, Some(9)),
            topic(2, None),
        ],
    );
    ConfigGuardian::new(Arc::new(catalog))
}

#[test]
pub fn catalog_should_expose_category_refs_with_parent() {
    // Arrange
    let catalog = ForumCatalog::new(vec![category(9, Some(5), false, &[])], vec![]);
    // Act
    let category = catalog.find_category(9);
    // Assert
    assert_eq!(Some(CategoryRef::with_parent(9, 5)), category);
}

#[test]
pub fn catalog_should_expose_topic_refs() {
    // Arrange
    let catalog = ForumCatalog::new(vec![], vec![topic(42, Some(5))]);
    // Act
    let topic = catalog.find_topic(42);
    // Assert
    assert_eq!(Some(TopicRef::new(42, Some(5))), topic);
    assert_eq!(None, catalog.find_topic(41));
}

#[test]
pub fn catalog_should_list_topics_of_category() {
    // Arrange
    let catalog = ForumCatalog::new(
        vec![],
        vec![topic(1, Some(3)), topic(42, Some(5)), topic(4, Some(3))],
    );
    // Act
    let ids: Vec<u64> = catalog.topics_in(3).map(|t| t.id).collect();
    // Assert
    assert_eq!(vec![1, 4], ids);
}

#[test_case(3, None, true ; "public category for anonymous")]
#[test_case(5, None, false ; "restricted category for anonymous")]
#[test_case(5, Some("bob"), false ; "restricted category for other user")]
#[test_case(5, Some("alice"), true ; "restricted category for allowed user")]
#[test_case(5, Some("Alice"), true ; "usernames are case insensitive")]
#[test_case(9, Some("bob"), false ; "restriction of parent is inherited")]
#[test_case(9, Some("alice"), true ; "subcategory for allowed user")]
#[test_case(1000, Some("alice"), false ; "unknown category")]
pub fn guardian_should_check_category(id: u64, viewer: Option<&str>, expected: bool) {
    // Arrange
    let guardian = setup();
    let viewer = viewer.map(Viewer::new);
    // Act
    let visible = guardian.can_see_category(&CategoryRef::new(id), viewer.as_ref());
    // Assert
    assert_eq!(expected, visible);
}

#[test_case(1, Some(3), true ; "topic in public category")]
#[test_case(42, Some(5), false ; "topic in restricted category")]
#[test_case(43, Some(9), false ; "topic in subcategory of restricted category")]
#[test_case(2, None, true ; "topic without category")]
pub fn guardian_should_check_topic_by_category(id: u64, category: Option<u64>, expected: bool) {
    // Arrange
    let guardian = setup();
    // Act
    let visible = guardian.can_see_topic(&TopicRef::new(id, category), Some(&Viewer::new("bob")));
    // Assert
    assert_eq!(expected, visible);
}

#[test]
pub fn guardian_should_deny_cyclic_categories() {
    // Arrange
    let catalog = ForumCatalog::new(
        vec![category(1, Some(2), false, &[]), category(2, Some(1), false, &[])],
        vec![],
    );
    let guardian = ConfigGuardian::new(Arc::new(catalog));
    // Act
    let visible = guardian.can_see_category(&CategoryRef::new(1), None);
    // Assert
    assert!(!visible);
}

#[test]
pub fn visible_topics_should_skip_hidden_topics() {
    // Arrange
    let guardian = setup();
    // Act
    let topics = guardian.visible_topics(None, 5);
    // Assert
    assert_eq!(
        vec![TopicSummary::new(1, "Topic 1"), TopicSummary::new(2, "Topic 2")],
        topics
    );
}

#[test]
pub fn visible_topics_should_respect_limit() {
    // Arrange
    let guardian = setup();
    // Act
    let topics = guardian.visible_topics(Some(&Viewer::new("alice")), 2);
    // Assert
    assert_eq!(
        vec![TopicSummary::new(1, "Topic 1"), TopicSummary::new(42, "Topic 42")],
        topics
    );
}
