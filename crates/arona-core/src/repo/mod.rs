//! Repository entries and the owner view's list manager.

mod manager;
mod pagination;
mod types;

pub use manager::{ListState, RepositoryForm, RepositoryList};
pub use pagination::{
    MAX_VISIBLE_PAGES, MAX_VISIBLE_PAGES_NARROW, NARROW_VIEWPORT_WIDTH, PAGE_SIZE, PageItem,
    Pagination, max_visible_pages, page_numbers,
};
pub use types::{NewRepository, RepositoryEntry, validate_link};
