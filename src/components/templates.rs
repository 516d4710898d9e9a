use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info, warn};

use crate::errors::WikiError;
use crate::types::{PageBody, Title};
use crate::utils::escape_html;

pub const VIEW: &str = "view";
pub const EDIT: &str = "edit";

const DEFAULT_VIEW: &str = "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{{TITLE}}</title></head><body><h1>{{TITLE}}</h1><p>[<a href=\"/edit/{{TITLE}}\">edit</a>]</p><div>{{BODY}}</div></body></html>";

const DEFAULT_EDIT: &str = "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>Editing {{TITLE}}</title></head><body><h1>Editing {{TITLE}}</h1><form action=\"/save/{{TITLE}}\" method=\"POST\"><div><textarea name=\"body\" rows=\"20\" cols=\"80\">{{BODY}}</textarea></div><div><input type=\"submit\" value=\"Save\"></div></form></body></html>";

/// Page templates, loaded once at startup and read-only afterwards
pub struct TemplateComponent {
    templates: HashMap<String, String>,
}

impl TemplateComponent {
    /// Load `view.html` and `edit.html` from `dir`, falling back to the
    /// built-in template for any file that does not exist.
    pub fn load(dir: &Path) -> Result<Self, WikiError> {
        let mut templates = HashMap::new();

        for (name, fallback) in [(VIEW, DEFAULT_VIEW), (EDIT, DEFAULT_EDIT)] {
            let path = dir.join(format!("{}.html", name));
            let source = match fs::read_to_string(&path) {
                Ok(source) => {
                    info!("Loaded template '{}' from {:?}", name, path);
                    source
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    warn!("Template {:?} not found, using built-in '{}' template", path, name);
                    fallback.to_string()
                }
                Err(e) => return Err(WikiError::Io(e)),
            };
            templates.insert(name.to_string(), source);
        }

        Ok(Self { templates })
    }

    /// Build from explicit `(name, source)` pairs
    pub fn from_sources<'a>(sources: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let templates = sources
            .into_iter()
            .map(|(name, source)| (name.to_string(), source.to_string()))
            .collect();
        Self { templates }
    }

    /// Fill `{{TITLE}}` and `{{BODY}}` in the named template.
    ///
    /// The title is always escaped; the body is escaped unless it is `PageBody::Markup`.
    pub fn render(&self, name: &str, title: &Title, body: &PageBody<'_>) -> Result<String, WikiError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| WikiError::RenderError(format!("template \"{}\" is not defined", name)))?;

        let body = match body {
            PageBody::Markup(markup) => markup.to_string(),
            PageBody::Text(text) => escape_html(text),
        };

        debug!("Rendering template '{}' for '{}'", name, title);
        Ok(template
            .replace("{{TITLE}}", &escape_html(title.as_str()))
            .replace("{{BODY}}", &body))
    }
}

impl Default for TemplateComponent {
    fn default() -> Self {
        Self::from_sources([(VIEW, DEFAULT_VIEW), (EDIT, DEFAULT_EDIT)])
    }
}
