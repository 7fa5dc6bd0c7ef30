use std::{error::Error, fmt::Display, path::PathBuf};

use access_guide::{
    forum::{CategoryId, TopicId},
    settings::{InMemorySettingsProvider, Settings},
};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    forum::{self, ForumCatalog},
    i18n::{LocaleTranslator, TranslationError},
    templates::{FileTemplateStore, InMemoryTemplateStore, TemplateStore},
    users::HeaderCurrentUserProvider,
};


#[derive(Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct Config {
    pub server: Option<Server>,
    #[serde(default)]
    pub settings: SiteSettings,
    #[serde(default)]
    categories: IndexMap<String, Category>,
    #[serde(default)]
    topics: IndexMap<String, Topic>,
}

impl Config {
    /// Parses the config and checks that categories and topics reference each other correctly
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(toml).map_err(ConfigError::Parse)?;
        config.create_catalog()?;
        Ok(config)
    }

    pub fn server(&self) -> Server {
        match &self.server {
            Some(s) => s.clone(),
            None => Server::default(),
        }
    }

    pub fn create_settings_provider(&self) -> InMemorySettingsProvider {
        InMemorySettingsProvider::new(self.settings.to_entity())
    }

    pub fn create_catalog(&self) -> Result<ForumCatalog, ConfigError> {
        let categories = self
            .categories
            .iter()
            .map(|(id, category)| category.to_entity(parse_id("category", id)?))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        let topics = self
            .topics
            .iter()
            .map(|(id, topic)| Ok(topic.to_entity(parse_id("topic", id)?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        let known = |id: &CategoryId| categories.iter().any(|c| c.id == *id);
        if let Some(category) = categories
            .iter()
            .find(|c| c.parent.is_some_and(|parent| !known(&parent)))
        {
            return Err(ConfigError::UnknownParent(category.id, category.parent.unwrap_or_default()));
        }
        if let Some(topic) = topics
            .iter()
            .find(|t| t.category.is_some_and(|category| !known(&category)))
        {
            return Err(ConfigError::UnknownCategory(topic.id, topic.category.unwrap_or_default()));
        }
        Ok(ForumCatalog::new(categories, topics))
    }

    /// Templates from `templates_dir` if configured, the embedded ones otherwise
    pub fn create_template_store(&self) -> Box<dyn TemplateStore + Send + Sync> {
        match self.server().templates_dir {
            Some(dir) => Box::new(FileTemplateStore::new(dir)),
            None => Box::new(InMemoryTemplateStore::embedded()),
        }
    }

    pub fn create_translator(&self) -> Result<LocaleTranslator, ConfigError> {
        LocaleTranslator::embedded(self.server().locale()).map_err(ConfigError::Locale)
    }

    pub fn create_current_user_provider(&self) -> Result<HeaderCurrentUserProvider, ConfigError> {
        HeaderCurrentUserProvider::new(self.server().user_header())
            .map_err(|e| ConfigError::UserHeader(e.to_string()))
    }
}

fn parse_id(kind: &'static str, id: &str) -> Result<u64, ConfigError> {
    id.parse()
        .map_err(|_| ConfigError::InvalidId(kind, id.to_string()))
}

#[derive(Deserialize, Debug, PartialEq, Eq, Clone, Default)]
pub struct Server {
    pub port: Option<u16>,
    pub templates_dir: Option<PathBuf>,
    pub locale: Option<String>,
    pub user_header: Option<String>,
}
impl Server {
    pub const PORT_DEFAULT: u16 = 9000;

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(Self::PORT_DEFAULT)
    }

    pub fn locale(&self) -> &str {
        self.locale
            .as_deref()
            .unwrap_or(LocaleTranslator::FALLBACK_LOCALE)
    }

    /// Header carrying the name of the signed in user
    pub fn user_header(&self) -> &str {
        self.user_header
            .as_deref()
            .unwrap_or(HeaderCurrentUserProvider::DEFAULT_HEADER)
    }
}

/// Site settings of the access guide, named like the forum's admin settings
#[derive(Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(default)]
pub struct SiteSettings {
    pub discourse_category_access_guide_enabled: bool,
    pub category_access_map: String,
}
impl SiteSettings {
    fn to_entity(&self) -> Settings {
        Settings::new(
            self.discourse_category_access_guide_enabled,
            &self.category_access_map,
        )
    }
}
impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            discourse_category_access_guide_enabled: false,
            category_access_map: "{}".into(),
        }
    }
}

#[derive(Deserialize, Debug, PartialEq, Eq, Clone)]
struct Category {
    name: String,
    parent: Option<CategoryId>,
    #[serde(default)]
    read_restricted: bool,
    #[serde(default)]
    allowed_users: Vec<String>,
}
impl Category {
    fn to_entity(&self, id: CategoryId) -> Result<forum::Category, ConfigError> {
        if self.parent == Some(id) {
            return Err(ConfigError::UnknownParent(id, id));
        }
        let category = forum::Category {
            id,
            name: self.name.clone(),
            parent: self.parent,
            read_restricted: self.read_restricted,
            allowed_users: self.allowed_users.clone(),
        };
        Ok(category)
    }
}

#[derive(Deserialize, Debug, PartialEq, Eq, Clone)]
struct Topic {
    title: String,
    category: Option<CategoryId>,
}
impl Topic {
    fn to_entity(&self, id: TopicId) -> forum::Topic {
        forum::Topic {
            id,
            title: self.title.clone(),
            category: self.category,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(toml::de::Error),
    /// Kind of entity and the offending key
    InvalidId(&'static str, String),
    /// Category and its missing parent
    UnknownParent(CategoryId, CategoryId),
    /// Topic and its missing category
    UnknownCategory(TopicId, CategoryId),
    Locale(TranslationError),
    UserHeader(String),
}
impl Error for ConfigError {}
impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "Config is not valid TOML: {e}"),
            ConfigError::InvalidId(kind, id) => write!(f, "'{id}' is not a valid {kind} id"),
            ConfigError::UnknownParent(category, parent) => {
                write!(f, "Category {category} has an invalid parent {parent}")
            }
            ConfigError::UnknownCategory(topic, category) => {
                write!(f, "Topic {topic} belongs to unknown category {category}")
            }
            ConfigError::Locale(e) => write!(f, "Failed to load locales: {e}"),
            ConfigError::UserHeader(e) => write!(f, "Invalid user header setup: {e}"),
        }
    }
}
