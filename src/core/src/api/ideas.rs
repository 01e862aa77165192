//! Idea, vote, comment and moderation endpoints.

use async_trait::async_trait;
use serde::Serialize;

use super::client::{Acknowledgement, ApiClient};
use crate::error::{IdeaBoxError, Result};
use crate::forms::IdeaDraft;
use crate::listing::{FetchRequest, IdeaListParams, IdeaSource, IdeaTab};
use crate::model::{Comment, CommentId, Idea, IdeaId, Page, VoteKind};
use crate::validation::Validate;

#[derive(Serialize)]
struct PageQuery {
    page: u32,
}

#[derive(Serialize)]
struct VoteBody {
    vote: VoteKind,
}

#[derive(Serialize)]
struct ReasonBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    content: &'a str,
}

impl ApiClient {
    /// `GET /ideas` with sort and search parameters.
    pub async fn list_ideas(&self, params: &IdeaListParams) -> Result<Page<Idea>> {
        self.get_page("/ideas", params, "Failed to load ideas").await
    }

    /// `GET /ideas/to-submit`.
    pub async fn list_ideas_to_submit(&self, page: u32) -> Result<Page<Idea>> {
        self.get_page(
            "/ideas/to-submit",
            &PageQuery { page: page.max(1) },
            "Failed to load ideas awaiting submission",
        )
        .await
    }

    /// `GET /ideas/reported`.
    pub async fn list_reported_ideas(&self, page: u32) -> Result<Page<Idea>> {
        self.get_page(
            "/ideas/reported",
            &PageQuery { page: page.max(1) },
            "Failed to load reported ideas",
        )
        .await
    }

    pub async fn get_idea(&self, id: IdeaId) -> Result<Idea> {
        self.get(&format!("/ideas/{id}"), "Failed to load idea").await
    }

    /// Validate and submit a new idea.
    pub async fn create_idea(&self, draft: &IdeaDraft) -> Result<Idea> {
        draft.validate()?;
        self.post("/ideas", draft, "Failed to submit idea").await
    }

    pub async fn vote_idea(&self, id: IdeaId, vote: VoteKind) -> Result<Acknowledgement> {
        self.post_action(
            &format!("/ideas/{id}/vote"),
            Some(&VoteBody { vote }),
            "Failed to record vote",
        )
        .await
    }

    pub async fn report_idea(&self, id: IdeaId, reason: Option<&str>) -> Result<Acknowledgement> {
        self.post_action(
            &format!("/ideas/{id}/report"),
            Some(&ReasonBody { reason }),
            "Failed to report idea",
        )
        .await
    }

    pub async fn hide_idea(&self, id: IdeaId) -> Result<Acknowledgement> {
        self.post_action::<()>(&format!("/ideas/{id}/hide"), None, "Failed to hide idea")
            .await
    }

    pub async fn unhide_idea(&self, id: IdeaId) -> Result<Acknowledgement> {
        self.post_action::<()>(&format!("/ideas/{id}/unhide"), None, "Failed to unhide idea")
            .await
    }

    pub async fn delete_idea(&self, id: IdeaId) -> Result<Acknowledgement> {
        self.delete(&format!("/ideas/{id}"), "Failed to delete idea").await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Comments
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn list_comments(&self, idea_id: IdeaId) -> Result<Vec<Comment>> {
        self.get(&format!("/ideas/{idea_id}/comments"), "Failed to load comments")
            .await
    }

    pub async fn add_comment(&self, idea_id: IdeaId, content: &str) -> Result<Comment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(IdeaBoxError::validation("Comment cannot be empty"));
        }
        self.post(
            &format!("/ideas/{idea_id}/comments"),
            &CommentBody { content },
            "Failed to add comment",
        )
        .await
    }

    pub async fn report_comment(&self, id: CommentId, reason: Option<&str>) -> Result<Acknowledgement> {
        self.post_action(
            &format!("/comments/{id}/report"),
            Some(&ReasonBody { reason }),
            "Failed to report comment",
        )
        .await
    }

    pub async fn delete_comment(&self, id: CommentId) -> Result<Acknowledgement> {
        self.delete(&format!("/comments/{id}"), "Failed to delete comment").await
    }
}

#[async_trait]
impl IdeaSource for ApiClient {
    async fn fetch_ideas(&self, request: &FetchRequest) -> Result<Page<Idea>> {
        let default = match request.tab {
            IdeaTab::All => "Failed to load ideas",
            IdeaTab::Pending => "Failed to load ideas awaiting submission",
            IdeaTab::Reported => "Failed to load reported ideas",
        };
        self.get_page(request.path(), &request.params, default).await
    }
}
