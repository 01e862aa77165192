//! Idea list querying: tabs, sort, search, pagination and fetch ordering.

pub mod controller;
pub mod debounce;
pub mod query;
pub mod state;

pub use controller::{IdeaListController, IdeaSource, DEFAULT_SEARCH_DEBOUNCE};
pub use debounce::SearchDebounce;
pub use query::{
    FetchRequest, IdeaListParams, IdeaListQuery, IdeaTab, ListingEvent, RequestToken, SortMode,
};
pub use state::{Completion, ListingState, TabState};
