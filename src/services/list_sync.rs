/*
 * Responsibility
 * - The list view state machine: paged listing, title search (two server
 *   strategies), edit/create/delete, all folded into one ListViewState
 * - Every mutation (create/update/delete) triggers a full refetch of the
 *   current view, never a local patch of `items`. The displayed list is
 *   always equal to what a fresh fetch would show.
 * - Stale-response discipline: fetches are tagged with a monotonically
 *   increasing sequence number; completions older than the last applied one
 *   are dropped on the floor
 */
use crate::error::AppError;
use crate::gateway::client::{GatewayResult, PostGateway};
use crate::gateway::dto::{Post, PostInput, PostPage};
use crate::state::{EditTarget, ListMode, ListViewState, SearchStrategy};

/// Monotonic request tags. A completion may only be applied if it is newer
/// than everything applied so far; "latest sequence wins" stands in for any
/// locking between overlapping fetches.
#[derive(Debug, Default)]
struct RequestSeq {
    issued: u64,
    applied: u64,
}

impl RequestSeq {
    fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    fn try_apply(&mut self, seq: u64) -> bool {
        if seq <= self.applied {
            return false;
        }
        self.applied = seq;
        true
    }
}

pub struct ListSyncController<G: PostGateway> {
    gateway: G,
    page_size: u32,
    state: ListViewState,
    seq: RequestSeq,
}

impl<G: PostGateway> ListSyncController<G> {
    pub fn new(gateway: G, page_size: u32) -> Self {
        Self {
            gateway,
            page_size,
            state: ListViewState::new(),
            seq: RequestSeq::default(),
        }
    }

    /// Read-only snapshot for the render layer.
    pub fn state(&self) -> &ListViewState {
        &self.state
    }

    /// Initial page-1 fetch. The state is already marked loading from
    /// construction, so the very first render can show a spinner.
    pub async fn start(&mut self) -> Result<(), AppError> {
        self.fetch_page(1).await
    }

    /// Valid only in paged mode; out-of-range pages are a no-op on state,
    /// never an error. `total_pages == 0` (nothing fetched yet) still admits
    /// a page-1 fetch.
    pub async fn load_page(&mut self, page: u32) -> Result<(), AppError> {
        if self.state.mode != ListMode::Paged {
            return Ok(());
        }
        if page < 1 {
            return Ok(());
        }
        if self.state.total_pages == 0 {
            // Nothing fetched yet; only the initial page-1 fetch makes sense.
            if page != 1 {
                return Ok(());
            }
        } else if page > self.state.total_pages {
            return Ok(());
        }

        self.fetch_page(page).await
    }

    /// `load_page(current_page + delta)`, clamped to the known page range.
    pub async fn change_page(&mut self, delta: i64) -> Result<(), AppError> {
        if self.state.mode != ListMode::Paged {
            return Ok(());
        }

        let last = i64::from(self.state.total_pages.max(1));
        let target = (i64::from(self.state.current_page) + delta).clamp(1, last);

        self.load_page(target as u32).await
    }

    /// A blank term is a `clear_search`. Otherwise the term and strategy are
    /// committed to state up front (mode == Search iff term non-empty holds
    /// even while the fetch is in flight, and on failure), then the routed
    /// search runs. Repeating the same search is idempotent on state.
    pub async fn search(&mut self, term: &str, strategy: SearchStrategy) -> Result<(), AppError> {
        let term = term.trim();
        if term.is_empty() {
            return self.clear_search().await;
        }

        self.state.search_term = term.to_string();
        self.state.search_strategy = strategy;
        self.state.mode = ListMode::Search;

        self.run_search().await
    }

    /// Back to the paged view, page 1, with a full refetch.
    pub async fn clear_search(&mut self) -> Result<(), AppError> {
        self.state.search_term.clear();
        self.state.mode = ListMode::Paged;
        self.state.current_page = 1;

        self.fetch_page(1).await
    }

    /// Open the form. Ignored while another edit is in progress; the form
    /// surface owns the state until it is submitted or cancelled.
    pub fn begin_edit(&mut self, target: EditTarget) {
        if self.state.editing.is_some() {
            return;
        }
        self.state.editing = Some(target);
    }

    pub fn cancel_edit(&mut self) {
        self.state.editing = None;
    }

    /// Validation failures are local: no network call, the form stays open.
    /// On success the form closes and the current view is refetched so the
    /// list provably contains the mutation. On a network failure the form
    /// also stays open so the user can retry.
    pub async fn submit_edit(&mut self, input: PostInput) -> Result<(), AppError> {
        input.validate().map_err(AppError::validation)?;

        let Some(target) = self.state.editing.clone() else {
            return Err(AppError::validation("nothing is being edited"));
        };

        let outcome = match &target {
            EditTarget::Existing(post) => self.gateway.update(post.id, &input).await,
            EditTarget::New => self.gateway.create(&input).await,
        };

        match outcome {
            Ok(saved) => {
                tracing::debug!(id = saved.id, "post saved, refreshing view");
                self.state.editing = None;
                self.refresh_current_view().await
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Confirmation happens in the render layer before this is called; a
    /// declined confirmation never reaches the controller.
    pub async fn delete_post(&mut self, id: i64) -> Result<(), AppError> {
        self.gateway.delete(id).await?;

        tracing::debug!(id, "post deleted, refreshing view");
        self.refresh_current_view().await
    }

    /// Refetch whichever view is current. This is what keeps the list honest
    /// after every mutation.
    async fn refresh_current_view(&mut self) -> Result<(), AppError> {
        match self.state.mode {
            ListMode::Paged => self.fetch_page(self.state.current_page).await,
            ListMode::Search => self.run_search().await,
        }
    }

    async fn fetch_page(&mut self, page: u32) -> Result<(), AppError> {
        self.state.is_loading = true;
        let seq = self.seq.issue();

        let outcome = self.gateway.list(page, self.page_size).await;
        self.complete_page_fetch(seq, page, outcome)
    }

    async fn run_search(&mut self) -> Result<(), AppError> {
        self.state.is_loading = true;
        let seq = self.seq.issue();

        let outcome = self
            .gateway
            .search(&self.state.search_term, self.state.search_strategy)
            .await;
        self.complete_search(seq, outcome)
    }

    /// Completion half of a page fetch, synchronous so the stale-discard
    /// rule is a plain state transition. A discarded completion touches
    /// nothing — not even the loading flag, which belongs to the newer
    /// request.
    fn complete_page_fetch(
        &mut self,
        seq: u64,
        page: u32,
        outcome: GatewayResult<PostPage>,
    ) -> Result<(), AppError> {
        if !self.seq.try_apply(seq) {
            tracing::warn!(seq, page, "discarding stale page response");
            return Ok(());
        }

        self.state.is_loading = false;
        match outcome {
            Ok(fetched) => {
                self.state.items = fetched.items;
                self.state.total_pages = fetched.total_pages;
                self.state.current_page = page;
                Ok(())
            }
            // Prior items and current_page stay as they were.
            Err(e) => Err(e.into()),
        }
    }

    fn complete_search(
        &mut self,
        seq: u64,
        outcome: GatewayResult<Vec<Post>>,
    ) -> Result<(), AppError> {
        if !self.seq.try_apply(seq) {
            tracing::warn!(seq, "discarding stale search response");
            return Ok(());
        }

        self.state.is_loading = false;
        match outcome {
            Ok(items) => {
                // An empty result is a result, not a failure.
                self.state.items = items;
                self.state.total_pages = 1;
                self.state.current_page = 1;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
