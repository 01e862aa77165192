//! Idea list query: tab, sort, search, page and the request derived from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, IdeaBoxError};
use crate::model::CategoryId;

// ═══════════════════════════════════════════════════════════════════════════════
// Tabs and sort modes
// ═══════════════════════════════════════════════════════════════════════════════

/// Mutually exclusive idea list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdeaTab {
    #[default]
    All,
    /// Ideas waiting to be submitted for review.
    Pending,
    Reported,
}

impl IdeaTab {
    pub const ALL: [IdeaTab; 3] = [IdeaTab::All, IdeaTab::Pending, IdeaTab::Reported];

    /// API path listing this tab's ideas.
    pub fn path(self) -> &'static str {
        match self {
            Self::All => "/ideas",
            Self::Pending => "/ideas/to-submit",
            Self::Reported => "/ideas/reported",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Reported => "reported",
        }
    }

    /// Whether this tab's endpoint accepts sort and search parameters.
    pub fn accepts_filters(self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for IdeaTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdeaTab {
    type Err = IdeaBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pending" | "to-submit" => Ok(Self::Pending),
            "reported" => Ok(Self::Reported),
            other => Err(IdeaBoxError::new(
                ErrorCode::InvalidInput,
                format!("Unknown tab '{other}' (expected all, pending or reported)"),
            )),
        }
    }
}

/// Sort order for the all tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    None,
    Latest,
    Popular,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Latest => "latest",
            Self::Popular => "popular",
        })
    }
}

impl FromStr for SortMode {
    type Err = IdeaBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "latest" => Ok(Self::Latest),
            "popular" => Ok(Self::Popular),
            other => Err(IdeaBoxError::new(
                ErrorCode::InvalidInput,
                format!("Unknown sort '{other}' (expected none, latest or popular)"),
            )),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Query state
// ═══════════════════════════════════════════════════════════════════════════════

/// Current idea list query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdeaListQuery {
    pub tab: IdeaTab,
    /// 1-indexed.
    pub page: u32,
    pub sort: SortMode,
    pub search: String,
    /// Client-side category filter; never sent to the API.
    pub category: Option<CategoryId>,
}

impl Default for IdeaListQuery {
    fn default() -> Self {
        Self {
            tab: IdeaTab::All,
            page: 1,
            sort: SortMode::None,
            search: String::new(),
            category: None,
        }
    }
}

impl IdeaListQuery {
    /// Query parameters for the current tab's endpoint.
    pub fn params(&self) -> IdeaListParams {
        let mut params = IdeaListParams {
            page: self.page,
            ..IdeaListParams::default()
        };

        if !self.tab.accepts_filters() {
            return params;
        }

        let search = self.search.trim();
        if !search.is_empty() {
            params.search = Some(search.to_string());
        }

        match self.sort {
            SortMode::None => {}
            SortMode::Latest => {
                params.popular = Some(false);
                params.latest = Some(true);
            }
            SortMode::Popular => params.popular = Some(true),
        }

        params
    }
}

/// Query string for an idea list request. Absent fields are not sent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct IdeaListParams {
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popular: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<bool>,
}

/// Monotonic tag identifying one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(pub u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fetch the caller must perform and report back through `ListingState::complete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub token: RequestToken,
    pub tab: IdeaTab,
    pub params: IdeaListParams,
}

impl FetchRequest {
    pub fn path(&self) -> &'static str {
        self.tab.path()
    }
}

/// Input to the listing state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingEvent {
    SelectTab(IdeaTab),
    SelectSort(SortMode),
    /// Already-debounced search text.
    ChangeSearch(String),
    GoToPage(u32),
    ToggleCategory(CategoryId),
    Refresh,
}
