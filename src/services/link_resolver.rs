use log::{debug, warn};
use regex::bytes::{Captures, Regex};

use crate::services::PageStore;
use crate::types::{Operation, Title};

/// Rewrites `[Title]` tokens in a page body into links to existing pages
pub struct LinkResolver {
    pattern: Regex,
}

impl LinkResolver {
    pub fn new() -> Self {
        // ASCII word characters only; `\w` would admit Unicode letters.
        let pattern = Regex::new(r"\[([0-9A-Za-z_]+)\]").expect("valid page link regex");
        Self { pattern }
    }

    /// Replace every bracket token naming a stored page with a hyperlink.
    ///
    /// Tokens that name no page, or whose lookup fails, stay as literal text.
    /// Only `body` is scanned; linked pages are checked for existence, never expanded.
    pub fn resolve(&self, body: &[u8], store: &dyn PageStore) -> Vec<u8> {
        self.pattern
            .replace_all(body, |caps: &Captures| match link_target(&caps[1], store) {
                Some(title) => render_link(&title).into_bytes(),
                None => caps[0].to_vec(),
            })
            .into_owned()
    }
}

impl Default for LinkResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn link_target(inner: &[u8], store: &dyn PageStore) -> Option<Title> {
    let title = std::str::from_utf8(inner).ok().and_then(|s| Title::parse(s).ok())?;

    match store.load(&title) {
        Ok(_) => Some(title),
        Err(e) if e.is_missing_page() => {
            debug!("Link target '{}' does not exist", title);
            None
        }
        Err(e) => {
            warn!("Link target '{}' could not be checked: {}", title, e);
            None
        }
    }
}

fn render_link(title: &Title) -> String {
    format!("<a href=\"{}\">{}</a>", Operation::View.path(title), title)
}
