//! Repository list management for the owner view.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::traits::DashboardApi;

use super::pagination::{PageItem, Pagination};
use super::types::{NewRepository, RepositoryEntry};

/// What the owner view shows for the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded. May be empty.
    Loaded(Vec<RepositoryEntry>),
    /// The last fetch failed.
    Failed(String),
}

impl ListState {
    /// The fetched entries, or an empty slice while loading or failed.
    pub fn entries(&self) -> &[RepositoryEntry] {
        match self {
            ListState::Loaded(entries) => entries,
            _ => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ListState::Failed(_))
    }
}

/// Contents of the "add repository" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryForm {
    pub link: String,
    pub title: String,
    pub description: String,
}

impl RepositoryForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Fetches, paginates, creates and deletes repository entries.
///
/// The fetched list is a read-through cache of the backend: every mutation
/// is followed by a full refetch, never a local insert or removal.
pub struct RepositoryList {
    api: Arc<dyn DashboardApi>,
    state: ListState,
    pagination: Pagination,
    form: RepositoryForm,
}

impl RepositoryList {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self {
            api,
            state: ListState::Loading,
            pagination: Pagination::default(),
            form: RepositoryForm::default(),
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn form(&self) -> &RepositoryForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RepositoryForm {
        &mut self.form
    }

    /// Fetch the full collection.
    ///
    /// On failure the state becomes [`ListState::Failed`] and the error is
    /// returned; the previous entries are not kept.
    #[instrument(skip(self))]
    pub async fn list(&mut self) -> Result<&[RepositoryEntry]> {
        self.state = ListState::Loading;

        match self.api.list_repositories().await {
            Ok(entries) => {
                debug!(count = entries.len(), "Fetched repositories");
                if self.pagination.clamp(entries.len()) {
                    debug!(
                        page = self.pagination.current_page(),
                        "Current page moved back after list shrank"
                    );
                }
                self.state = ListState::Loaded(entries);
                Ok(self.state.entries())
            }
            Err(e) => {
                warn!(error = %e, "Error fetching repositories");
                self.state = ListState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Retry after a failed fetch.
    pub async fn refresh(&mut self) -> Result<&[RepositoryEntry]> {
        self.list().await
    }

    /// Add an entry, then refetch.
    ///
    /// The link is validated before any request is made; an invalid link
    /// leaves the list untouched.
    #[instrument(skip(self, description))]
    pub async fn create(
        &mut self,
        link: &str,
        title: &str,
        description: Option<&str>,
    ) -> Result<()> {
        let entry = NewRepository::new(link, title, description.map(str::to_string))?;

        self.api.create_repository(&entry).await?;
        info!("Repository added");

        self.list().await?;
        Ok(())
    }

    /// Submit the form; it is cleared only when the add and refetch succeed.
    pub async fn submit_form(&mut self) -> Result<()> {
        let RepositoryForm {
            link,
            title,
            description,
        } = self.form.clone();

        self.create(&link, &title, Some(description.as_str())).await?;
        self.form.clear();
        Ok(())
    }

    /// Delete the entry addressed by `key`, then refetch.
    ///
    /// `key` is the title unless the backend assigns ids; see
    /// [`RepositoryEntry::key`].
    #[instrument(skip(self))]
    pub async fn delete(&mut self, key: &str) -> Result<()> {
        self.api.delete_repository(key).await?;
        info!("Repository deleted");

        self.list().await?;
        Ok(())
    }

    /// Entries on the current page.
    pub fn current_page(&self) -> &[RepositoryEntry] {
        self.pagination.page(self.state.entries())
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.state.entries().len())
    }

    /// Whether the pager should be drawn.
    pub fn shows_pager(&self) -> bool {
        !self.state.is_failed() && self.pagination.shows_pager(self.state.entries().len())
    }

    pub fn page_numbers(&self, max_visible: usize) -> Vec<PageItem> {
        self.pagination
            .page_numbers(self.state.entries().len(), max_visible)
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.pagination.go_to(page, self.state.entries().len());
    }

    pub fn next_page(&mut self) {
        self.pagination.next(self.state.entries().len());
    }

    pub fn previous_page(&mut self) {
        self.pagination.previous();
    }
}

impl std::fmt::Debug for RepositoryList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryList")
            .field("state", &self.state)
            .field("pagination", &self.pagination)
            .finish()
    }
}
