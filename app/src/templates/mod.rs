use std::{collections::HashMap, error::Error, fmt::Display, fs, path::PathBuf};


pub mod handlebars;

pub trait TemplateRenderer {
    fn render(&self, template_name: &str, data: &SerializedData) -> Result<String, TemplateError>;
}

pub struct SerializedData {
    data: serde_json::Value,
}
impl SerializedData {
    pub fn new(data: impl serde::Serialize) -> Self {
        Self {
            data: serde_json::json!(data),
        }
    }

    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum TemplateError {
    MissingTemplate(String),
    RenderError(RenderError),
}
impl Error for TemplateError {}
impl Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::MissingTemplate(name) => write!(f, "Template '{name}' not found"),
            TemplateError::RenderError(e) => write!(
                f,
                "Failed to render '{}' at {}:{}: {}",
                e.template_name().map(String::as_str).unwrap_or("<inline>"),
                e.line().unwrap_or(0),
                e.column().unwrap_or(0),
                e.reason().map(String::as_str).unwrap_or("unknown reason")
            ),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct RenderError {
    template_name: Option<String>,
    line: Option<usize>,
    column: Option<usize>,
    reason: Option<String>,
}

impl RenderError {
    pub fn new(
        template_name: Option<String>,
        line: Option<usize>,
        column: Option<usize>,
        reason: Option<String>,
    ) -> Self {
        Self {
            template_name,
            line,
            column,
            reason,
        }
    }

    pub fn template_name(&self) -> Option<&String> {
        self.template_name.as_ref()
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn column(&self) -> Option<usize> {
        self.column
    }

    pub fn reason(&self) -> Option<&String> {
        self.reason.as_ref()
    }
}

pub trait TemplateStore {
    fn read(&self, template_name: &str) -> Option<String>;
}

pub struct InMemoryTemplateStore {
    templates: HashMap<String, String>,
}
impl InMemoryTemplateStore {
    pub fn new(templates: HashMap<String, String>) -> Self {
        Self { templates }
    }

    /// Templates shipped with the binary
    pub fn embedded() -> Self {
        let mut templates = HashMap::new();
        templates.insert(
            "exceptions/not_found.html".into(),
            include_str!("../../templates/exceptions/not_found.html").into(),
        );
        templates.insert(
            "forum/resource.html".into(),
            include_str!("../../templates/forum/resource.html").into(),
        );
        Self::new(templates)
    }
}
impl TemplateStore for InMemoryTemplateStore {
    fn read(&self, template_name: &str) -> Option<String> {
        self.templates.get(template_name).cloned()
    }
}

/// Reads templates from a directory, e.g. to let operators restyle the pages
pub struct FileTemplateStore {
    root_dir: PathBuf,
}

impl FileTemplateStore {
    pub fn new(root_dir: PathBuf) -> Self {
        Self { root_dir }
    }
}
impl TemplateStore for FileTemplateStore {
    fn read(&self, template_name: &str) -> Option<String> {
        let root_dir = self.root_dir.canonicalize().ok()?;
        let path = root_dir.join(template_name).canonicalize().ok()?;
        if !path.starts_with(&root_dir) {
            tracing::warn!(template_name, "Template path escapes template directory");
            return None;
        }
        fs::read_to_string(path).ok()
    }
}
