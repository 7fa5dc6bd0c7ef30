use crate::templates::*;

pub struct HandlebarTemplateRenderer {
    template_store: Box<dyn TemplateStore + Send + Sync>,
}
impl HandlebarTemplateRenderer {
    pub fn new(template_store: Box<dyn TemplateStore + Send + Sync>) -> Self {
        Self { template_store }
    }
}
impl TemplateRenderer for HandlebarTemplateRenderer {
    fn render(&self, template_name: &str, data: &SerializedData) -> Result<String, TemplateError> {
        let handlebars = ::handlebars::Handlebars::new();
        let template = self
            .template_store
            .read(template_name)
            .ok_or_else(|| TemplateError::MissingTemplate(template_name.into()))?;
        let content = handlebars.render_template(&template, data.data())?;
        Ok(content)
    }
}

impl From<::handlebars::RenderError> for TemplateError {
    fn from(value: ::handlebars::RenderError) -> Self {
        let reason = value.reason().to_string();
        let error = RenderError::new(
            value.template_name,
            value.line_no,
            value.column_no,
            Some(reason),
        );
        Self::RenderError(error)
    }
}
