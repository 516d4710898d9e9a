use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::components::TemplateComponent;
use crate::errors::WikiError;
use crate::services::{LinkResolver, PageStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PageStore>,
    pub templates: Arc<TemplateComponent>,
    pub resolver: Arc<LinkResolver>,
}

impl AppState {
    pub fn new(store: Arc<dyn PageStore>, templates: TemplateComponent) -> Self {
        Self {
            store,
            templates: Arc::new(templates),
            resolver: Arc::new(LinkResolver::new()),
        }
    }
}

/// A page title: one or more ASCII letters or digits.
///
/// Titles double as URL segments and storage keys, so the only way to get
/// one is through [`Title::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    pub fn parse(raw: &str) -> Result<Self, WikiError> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(WikiError::InvalidTitle(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three page operations addressable as `/<op>/<title>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    View,
    Edit,
    Save,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::View => "view",
            Operation::Edit => "edit",
            Operation::Save => "save",
        }
    }

    /// Request path for this operation on `title`
    pub fn path(self, title: &Title) -> String {
        format!("/{}/{}", self.as_str(), title)
    }
}

impl FromStr for Operation {
    type Err = WikiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Operation::View),
            "edit" => Ok(Operation::Edit),
            "save" => Ok(Operation::Save),
            other => Err(WikiError::InvalidPath(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A wiki page. The body is kept as raw bytes so any content round-trips
/// through the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: Title,
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(title: Title, body: impl Into<Vec<u8>>) -> Self {
        Self { title, body: body.into() }
    }

    /// A page that has no store entry yet, as presented by the edit form
    pub fn empty(title: Title) -> Self {
        Self { title, body: Vec::new() }
    }

    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Body content handed to a template
#[derive(Debug, Clone)]
pub enum PageBody<'a> {
    /// Already-resolved markup, inserted verbatim
    Markup(Cow<'a, str>),
    /// Plain text, escaped on insertion
    Text(Cow<'a, str>),
}
