use std::{error::Error, fmt::Display, str::FromStr};

use indexmap::IndexMap;

use crate::forum::CategoryId;


/// Category id to guide URL mapping, configured by an operator as JSON:
/// `{ "<categoryId>": "<guideUrl>", ... }`
///
/// URLs are used verbatim and not validated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessMap {
    entries: IndexMap<String, String>,
}

impl AccessMap {
    pub fn new(entries: IndexMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses the raw setting value. Anything unparseable is treated like `{}`
    pub fn parse(raw: &str) -> Self {
        match raw.parse() {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring category access map");
                Self::empty()
            }
        }
    }

    /// Guide URL configured for the category
    pub fn guide_url(&self, category_id: CategoryId) -> Option<&str> {
        self.entries
            .get(&category_id.to_string())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for AccessMap {
    type Err = AccessMapError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().is_empty() {
            return Ok(Self::empty());
        }
        let json: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| AccessMapError::MalformedJson(e.to_string()))?;
        let object = json.as_object().ok_or(AccessMapError::NotAnObject)?;
        let mut entries = IndexMap::new();
        for (category_id, guide_url) in object {
            match guide_url.as_str() {
                Some(url) if !url.is_empty() => {
                    entries.insert(category_id.clone(), url.to_string());
                }
                _ => tracing::warn!(
                    category_id = %category_id,
                    "Skipping access map entry without a guide url"
                ),
            }
        }
        Ok(Self::new(entries))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessMapError {
    MalformedJson(String),
    NotAnObject,
}
impl Error for AccessMapError {}
impl Display for AccessMapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessMapError::MalformedJson(reason) => {
                write!(f, "Access map is not valid JSON: {reason}")
            }
            AccessMapError::NotAnObject => {
                write!(f, "Access map has to be a JSON object of category ids to urls")
            }
        }
    }
}
