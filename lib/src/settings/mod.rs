use std::sync::{Arc, RwLock};


/// Operator settings of the access guide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    enabled: bool,
    category_access_map: String,
}

impl Settings {
    pub fn new(enabled: bool, category_access_map: impl Into<String>) -> Self {
        Self {
            enabled,
            category_access_map: category_access_map.into(),
        }
    }

    /// `discourse_category_access_guide_enabled`: without it the host behaves unmodified
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// `category_access_map`: raw JSON, parsed on every check
    pub fn category_access_map(&self) -> &str {
        &self.category_access_map
    }
}
impl Default for Settings {
    fn default() -> Self {
        Self::new(false, "{}")
    }
}

pub trait SettingsProvider {
    /// Returns a snapshot of the current settings
    fn read_settings(&self) -> Settings;
}

impl<T: SettingsProvider + ?Sized> SettingsProvider for Arc<T> {
    fn read_settings(&self) -> Settings {
        (**self).read_settings()
    }
}

/// Keeps settings in memory. Settings may be replaced while serving requests
pub struct InMemorySettingsProvider {
    settings: RwLock<Settings>,
}
impl InMemorySettingsProvider {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }

    pub fn update(&self, settings: Settings) {
        let mut current = self.settings.write().unwrap_or_else(|e| e.into_inner());
        *current = settings;
    }
}
impl SettingsProvider for InMemorySettingsProvider {
    fn read_settings(&self) -> Settings {
        self.settings
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
