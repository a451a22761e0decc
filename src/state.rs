/*
 * Responsibility
 * - ListViewState: the single source of truth the render layer draws from
 * - Mutated only by ListSyncController completion handlers
 * - Never persisted; rebuilt from the server on every fetch
 */
use crate::gateway::dto::Post;

/// Which data-access mode currently owns `items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    Paged,
    Search,
}

/// Server-side search implementation to route to. The controller never picks
/// one itself; the caller does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    #[default]
    Jpql,
    Procedure,
}

/// What the form surface is editing. `None` on the state means the list is
/// visible; `Some(New)` is the create form, `Some(Existing(..))` the edit
/// form for a post we already hold a copy of.
#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget {
    New,
    Existing(Post),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListViewState {
    pub mode: ListMode,
    pub items: Vec<Post>,
    /// One-based. Meaningless while `mode == Search` (search is one page).
    pub current_page: u32,
    /// 0 until the first page fetch completes.
    pub total_pages: u32,
    pub is_loading: bool,
    pub search_term: String,
    pub search_strategy: SearchStrategy,
    pub editing: Option<EditTarget>,
}

impl ListViewState {
    /// Initial state: paged view of page 1, loading (the controller fires
    /// the first fetch right away), nothing being edited.
    pub fn new() -> Self {
        Self {
            mode: ListMode::Paged,
            items: Vec::new(),
            current_page: 1,
            total_pages: 0,
            is_loading: true,
            search_term: String::new(),
            search_strategy: SearchStrategy::default(),
            editing: None,
        }
    }

    /// Exactly one of {list surface, form surface} is visible.
    pub fn is_form_visible(&self) -> bool {
        self.editing.is_some()
    }
}

impl Default for ListViewState {
    fn default() -> Self {
        Self::new()
    }
}
