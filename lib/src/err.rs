use std::{error::Error, fmt::Display};

use crate::forum::CategoryId;

/// Return this error when the checked topic or category does not exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Topic id was missing, malformed or unknown
    TopicNotFound(Option<String>),
    CategoryNotFound(CategoryId),
}
impl Error for LookupError {}
impl Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::TopicNotFound(Some(topic_id)) => {
                write!(f, "Topic '{topic_id}' does not exist!")
            }
            LookupError::TopicNotFound(None) => write!(f, "No topic id given!"),
            LookupError::CategoryNotFound(category_id) => {
                write!(f, "Category {category_id} does not exist!")
            }
        }
    }
}
