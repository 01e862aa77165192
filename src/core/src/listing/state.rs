//! Pure idea list state machine.
//!
//! `apply` turns an event into at most one fetch and `apply_batch` turns
//! several into exactly one. `complete` folds the fetch result back in. None
//! of them perform I/O, so the controller and tests drive them the same way.

use std::collections::HashMap;

use metrics::counter;

use super::query::{FetchRequest, IdeaListQuery, IdeaTab, ListingEvent, RequestToken, SortMode};
use crate::error::Result;
use crate::model::{Idea, Page, PageMeta};

/// Load state of one tab.
#[derive(Debug, Clone, Default)]
pub struct TabState {
    /// Latest request issued for this tab.
    pub latest: Option<RequestToken>,
    pub loading: bool,
    /// Last successfully loaded page; kept when a later fetch fails.
    pub page: Option<Page<Idea>>,
    pub error: Option<String>,
}

/// How a completed fetch was folded into the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request for the same tab was issued; the result was dropped.
    Stale,
    /// The latest request failed; carries the message shown to the user.
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct ListingState {
    query: IdeaListQuery,
    next_token: u64,
    tabs: HashMap<IdeaTab, TabState>,
}

impl ListingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &IdeaListQuery {
        &self.query
    }

    /// Request the current query without changing it. Used for the first load.
    pub fn initial_request(&mut self) -> FetchRequest {
        self.issue()
    }

    /// Apply one event. Returns the fetch to perform, if any.
    pub fn apply(&mut self, event: ListingEvent) -> Option<FetchRequest> {
        self.transition(event).then(|| self.issue())
    }

    /// Apply several events and request only the resulting query.
    ///
    /// Intermediate queries are never issued, so no tab is left waiting on a
    /// request that was superseded within the batch.
    pub fn apply_batch(&mut self, events: impl IntoIterator<Item = ListingEvent>) -> FetchRequest {
        for event in events {
            self.transition(event);
        }
        self.issue()
    }

    /// Update the query for one event. Returns whether it calls for a fetch.
    fn transition(&mut self, event: ListingEvent) -> bool {
        match event {
            ListingEvent::SelectTab(tab) => {
                self.query.tab = tab;
                self.query.page = 1;
                self.query.sort = SortMode::None;
                true
            }
            ListingEvent::SelectSort(sort) => {
                if !self.query.tab.accepts_filters() {
                    tracing::debug!(tab = %self.query.tab, %sort, "Ignoring sort outside the all tab");
                    return false;
                }
                self.query.sort = sort;
                self.query.page = 1;
                true
            }
            ListingEvent::ChangeSearch(text) => {
                self.query.search = text;
                self.query.page = 1;
                self.query.tab.accepts_filters()
            }
            ListingEvent::GoToPage(page) => {
                self.query.page = page.max(1);
                true
            }
            ListingEvent::ToggleCategory(id) => {
                self.query.category = match self.query.category {
                    Some(current) if current == id => None,
                    _ => Some(id),
                };
                false
            }
            ListingEvent::Refresh => true,
        }
    }

    fn issue(&mut self) -> FetchRequest {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        let tab = self.query.tab;

        let tab_state = self.tabs.entry(tab).or_default();
        tab_state.latest = Some(token);
        tab_state.loading = true;

        let request = FetchRequest {
            token,
            tab,
            params: self.query.params(),
        };
        tracing::debug!(%token, %tab, page = request.params.page, "Issuing idea list fetch");
        request
    }

    /// Fold a finished fetch back in.
    pub fn complete(
        &mut self,
        tab: IdeaTab,
        token: RequestToken,
        result: Result<Page<Idea>>,
    ) -> Completion {
        let tab_state = self.tabs.entry(tab).or_default();
        if tab_state.latest != Some(token) {
            counter!("ideabox_listing_stale_responses_total", "tab" => tab.as_str()).increment(1);
            tracing::debug!(%token, %tab, latest = ?tab_state.latest, "Discarding stale idea list response");
            return Completion::Stale;
        }

        tab_state.loading = false;
        match result {
            Ok(page) => {
                tab_state.page = Some(page);
                tab_state.error = None;
                Completion::Applied
            }
            Err(error) => {
                error.log();
                let message = error.user_message().to_string();
                tab_state.error = Some(message.clone());
                Completion::Failed(message)
            }
        }
    }

    pub fn tab_state(&self, tab: IdeaTab) -> Option<&TabState> {
        self.tabs.get(&tab)
    }

    fn current(&self) -> Option<&TabState> {
        self.tabs.get(&self.query.tab)
    }

    /// Whether the current tab has a fetch in flight.
    pub fn loading(&self) -> bool {
        self.current().map(|state| state.loading).unwrap_or(false)
    }

    /// Error from the current tab's latest fetch.
    pub fn error(&self) -> Option<&str> {
        self.current().and_then(|state| state.error.as_deref())
    }

    pub fn page_meta(&self) -> Option<PageMeta> {
        self.current().and_then(|state| state.page.as_ref()).map(|page| page.meta)
    }

    /// Ideas on the current tab's loaded page, narrowed by the category filter.
    pub fn visible_ideas(&self) -> Vec<&Idea> {
        let Some(page) = self.current().and_then(|state| state.page.as_ref()) else {
            return Vec::new();
        };

        page.data
            .iter()
            .filter(|idea| match self.query.category {
                Some(category) => idea.has_category(category),
                None => true,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, IdeaBoxError};
    use crate::model::{CategoryId, IdeaId};

    fn idea(id: u64, categories: &[u64]) -> Idea {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Idea {id}"),
            "categories": categories
                .iter()
                .map(|c| serde_json::json!({ "id": c, "name": format!("c{c}") }))
                .collect::<Vec<_>>(),
        }))
        .unwrap()
    }

    fn page(ideas: Vec<Idea>) -> Page<Idea> {
        Page {
            meta: PageMeta::single(ideas.len() as u64),
            data: ideas,
        }
    }

    #[test]
    fn test_tab_switch_resets_page_and_sort() {
        let mut state = ListingState::new();
        state.apply(ListingEvent::SelectSort(SortMode::Popular));
        state.apply(ListingEvent::GoToPage(3));
        assert_eq!(state.query().page, 3);

        let request = state.apply(ListingEvent::SelectTab(IdeaTab::Pending)).unwrap();
        assert_eq!(state.query().page, 1);
        assert_eq!(state.query().sort, SortMode::None);
        assert_eq!(request.path(), "/ideas/to-submit");
        assert_eq!(request.params.popular, None);
    }

    #[test]
    fn test_sort_resets_page() {
        let mut state = ListingState::new();
        state.apply(ListingEvent::GoToPage(4));
        let request = state.apply(ListingEvent::SelectSort(SortMode::Latest)).unwrap();
        assert_eq!(request.params.page, 1);
        assert_eq!(request.params.latest, Some(true));
    }

    #[test]
    fn test_sort_ignored_outside_all_tab() {
        let mut state = ListingState::new();
        state.apply(ListingEvent::SelectTab(IdeaTab::Reported));
        assert!(state.apply(ListingEvent::SelectSort(SortMode::Popular)).is_none());
        assert_eq!(state.query().sort, SortMode::None);
    }

    #[test]
    fn test_search_only_fetches_on_all_tab() {
        let mut state = ListingState::new();
        let request = state.apply(ListingEvent::ChangeSearch("lunch".into())).unwrap();
        assert_eq!(request.params.search.as_deref(), Some("lunch"));

        state.apply(ListingEvent::SelectTab(IdeaTab::Pending));
        assert!(state.apply(ListingEvent::ChangeSearch("dinner".into())).is_none());
        assert_eq!(state.query().search, "dinner");
    }

    #[test]
    fn test_search_resets_page() {
        let mut state = ListingState::new();
        state.apply(ListingEvent::GoToPage(4));
        assert_eq!(state.query().page, 4);

        let request = state.apply(ListingEvent::ChangeSearch("x".into())).unwrap();
        assert_eq!(state.query().page, 1);
        assert_eq!(request.params.page, 1);
        assert_eq!(request.params.search.as_deref(), Some("x"));
    }

    #[test]
    fn test_batch_issues_one_request_for_final_query() {
        let mut state = ListingState::new();
        let request = state.apply_batch([
            ListingEvent::SelectTab(IdeaTab::Pending),
            ListingEvent::SelectTab(IdeaTab::All),
        ]);

        assert_eq!(request.token, RequestToken(1));
        assert_eq!(request.tab, IdeaTab::All);
        assert!(state.tab_state(IdeaTab::Pending).is_none());

        state.complete(request.tab, request.token, Ok(page(vec![])));
        assert!(!state.loading());
        let next = state.apply(ListingEvent::SelectTab(IdeaTab::Pending)).unwrap();
        assert_eq!(next.token, RequestToken(2));
    }

    #[test]
    fn test_empty_batch_requests_current_query() {
        let mut state = ListingState::new();
        state.apply(ListingEvent::ToggleCategory(CategoryId(3)));
        let request = state.apply_batch(std::iter::empty());
        assert_eq!(request.tab, IdeaTab::All);
        assert_eq!(request.params.page, 1);
        assert!(state.loading());
    }

    #[test]
    fn test_page_is_clamped() {
        let mut state = ListingState::new();
        let request = state.apply(ListingEvent::GoToPage(0)).unwrap();
        assert_eq!(request.params.page, 1);
    }

    #[test]
    fn test_tokens_are_monotonic() {
        let mut state = ListingState::new();
        let first = state.initial_request();
        let second = state.apply(ListingEvent::Refresh).unwrap();
        assert!(second.token > first.token);
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut state = ListingState::new();
        let first = state.initial_request();
        let second = state.apply(ListingEvent::GoToPage(2)).unwrap();

        let outcome = state.complete(second.tab, second.token, Ok(page(vec![idea(2, &[])])));
        assert_eq!(outcome, Completion::Applied);
        assert!(!state.loading());

        let outcome = state.complete(first.tab, first.token, Ok(page(vec![idea(1, &[])])));
        assert_eq!(outcome, Completion::Stale);
        assert_eq!(state.visible_ideas()[0].id, IdeaId(2));
    }

    #[test]
    fn test_tokens_are_tracked_per_tab() {
        let mut state = ListingState::new();
        let all = state.initial_request();
        let pending = state.apply(ListingEvent::SelectTab(IdeaTab::Pending)).unwrap();

        assert_eq!(state.complete(all.tab, all.token, Ok(page(vec![]))), Completion::Applied);
        assert!(state.loading());
        assert_eq!(
            state.complete(pending.tab, pending.token, Ok(page(vec![]))),
            Completion::Applied
        );
    }

    #[test]
    fn test_failure_keeps_loaded_page() {
        let mut state = ListingState::new();
        let first = state.initial_request();
        state.complete(first.tab, first.token, Ok(page(vec![idea(1, &[])])));

        let retry = state.apply(ListingEvent::Refresh).unwrap();
        let outcome = state.complete(
            retry.tab,
            retry.token,
            Err(IdeaBoxError::new(ErrorCode::ServiceUnavailable, "Failed to load ideas")),
        );

        assert_eq!(outcome, Completion::Failed("Failed to load ideas".into()));
        assert_eq!(state.error(), Some("Failed to load ideas"));
        assert_eq!(state.visible_ideas().len(), 1);
    }

    #[test]
    fn test_category_toggle_filters_without_fetch() {
        let mut state = ListingState::new();
        let request = state.initial_request();
        state.complete(
            request.tab,
            request.token,
            Ok(page(vec![idea(1, &[7]), idea(2, &[8]), idea(3, &[7, 8])])),
        );

        assert!(state.apply(ListingEvent::ToggleCategory(CategoryId(7))).is_none());
        let ids: Vec<IdeaId> = state.visible_ideas().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![IdeaId(1), IdeaId(3)]);

        assert!(state.apply(ListingEvent::ToggleCategory(CategoryId(7))).is_none());
        assert_eq!(state.visible_ideas().len(), 3);
    }
}
