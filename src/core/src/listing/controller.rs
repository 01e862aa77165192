//! Async driver for the idea list state machine.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::debounce::SearchDebounce;
use super::query::{FetchRequest, IdeaListQuery, ListingEvent};
use super::state::{Completion, ListingState};
use crate::error::Result;
use crate::model::{Idea, Page, PageMeta};

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Anything that can answer an idea list request.
#[async_trait]
pub trait IdeaSource: Send + Sync {
    async fn fetch_ideas(&self, request: &FetchRequest) -> Result<Page<Idea>>;
}

#[async_trait]
impl<T: IdeaSource + ?Sized> IdeaSource for Arc<T> {
    async fn fetch_ideas(&self, request: &FetchRequest) -> Result<Page<Idea>> {
        (**self).fetch_ideas(request).await
    }
}

/// Runs listing events against an [`IdeaSource`].
///
/// Shareable across tasks. Locks are only held while touching the state, never
/// across a fetch, so overlapping requests resolve by token.
pub struct IdeaListController<S> {
    source: S,
    state: Mutex<ListingState>,
    debounce: Mutex<SearchDebounce>,
    search_delay: Duration,
}

impl<S: IdeaSource> IdeaListController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Mutex::new(ListingState::new()),
            debounce: Mutex::new(SearchDebounce::new()),
            search_delay: DEFAULT_SEARCH_DEBOUNCE,
        }
    }

    pub fn with_search_delay(mut self, delay: Duration) -> Self {
        self.search_delay = delay;
        self
    }

    pub fn search_delay(&self) -> Duration {
        self.search_delay
    }

    /// Fetch the current query.
    pub async fn load(&self) -> Completion {
        let request = self.state.lock().initial_request();
        self.execute(request).await
    }

    /// Apply an event and perform the fetch it asks for.
    ///
    /// Returns `None` when the event needed no fetch.
    pub async fn dispatch(&self, event: ListingEvent) -> Option<Completion> {
        let request = self.state.lock().apply(event)?;
        Some(self.execute(request).await)
    }

    /// Apply several events and fetch once for the resulting query.
    pub async fn dispatch_batch(&self, events: impl IntoIterator<Item = ListingEvent>) -> Completion {
        let request = self.state.lock().apply_batch(events);
        self.execute(request).await
    }

    /// Feed one search keystroke.
    ///
    /// Waits out the debounce window; only the last keystroke in a burst
    /// dispatches, the others return `None`.
    pub async fn type_search(&self, text: impl Into<String>) -> Option<Completion> {
        let generation = self.debounce.lock().record(text);
        tokio::time::sleep(self.search_delay).await;

        let text = self.debounce.lock().settle(generation)?;
        self.dispatch(ListingEvent::ChangeSearch(text)).await
    }

    #[tracing::instrument(skip(self), fields(token = %request.token, tab = %request.tab))]
    async fn execute(&self, request: FetchRequest) -> Completion {
        let result = self.source.fetch_ideas(&request).await;
        let completion = self.state.lock().complete(request.tab, request.token, result);
        tracing::debug!(?completion, "Idea list fetch finished");
        completion
    }

    pub fn query(&self) -> IdeaListQuery {
        self.state.lock().query().clone()
    }

    pub fn loading(&self) -> bool {
        self.state.lock().loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error().map(str::to_string)
    }

    pub fn page_meta(&self) -> Option<PageMeta> {
        self.state.lock().page_meta()
    }

    /// Copy of the ideas currently visible on the selected tab.
    pub fn visible_ideas(&self) -> Vec<Idea> {
        self.state.lock().visible_ideas().into_iter().cloned().collect()
    }
}
