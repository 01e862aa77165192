//! Ideas, comments and votes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, CommentId, IdeaId};
use super::org::Category;
use super::user::UserSummary;

/// Review state of an idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdeaStatus {
    /// Waiting to be submitted for review.
    #[default]
    Pending,
    Submitted,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for IdeaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub id: IdeaId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Absent for anonymous ideas.
    #[serde(default)]
    pub author: Option<UserSummary>,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub status: IdeaStatus,
    #[serde(default)]
    pub upvotes: u64,
    #[serde(default)]
    pub downvotes: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub reports_count: u64,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Idea {
    /// Check whether the idea is tagged with a category.
    pub fn has_category(&self, category_id: CategoryId) -> bool {
        self.categories.iter().any(|c| c.id == category_id)
    }

    /// Net vote score.
    pub fn score(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub idea_id: IdeaId,
    pub content: String,
    #[serde(default)]
    pub author: Option<UserSummary>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Direction of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Up,
    Down,
}
