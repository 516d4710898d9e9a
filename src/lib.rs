//! A minimal wiki: plain-text pages stored one per file, served over HTTP
//! for viewing, editing and saving, with `[Title]` links between pages
//! rewritten into hyperlinks at render time.

pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod router;
pub mod services;
pub mod types;
pub mod utils;
pub mod validator;

// Re-export commonly used items
pub use components::TemplateComponent;
pub use config::Config;
pub use errors::WikiError;
pub use logger::Logger;
pub use router::build_router;
pub use services::{FilePageStore, LinkResolver, PageStore};
pub use types::{AppState, Operation, Page, PageBody, Title};
pub use validator::parse_request_path;
