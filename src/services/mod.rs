pub mod link_resolver;
pub mod page_store;

pub use link_resolver::LinkResolver;
pub use page_store::{FilePageStore, PageStore};
