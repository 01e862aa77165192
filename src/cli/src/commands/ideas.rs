//! Idea commands.
//!
//! `list` drives the same listing state machine a UI would; the remaining
//! commands call the moderation, voting and comment endpoints directly.

use std::str::FromStr;

use anyhow::{bail, Result};
use clap::{Subcommand, ValueEnum};
use ideabox_core::forms::IdeaDraft;
use ideabox_core::listing::{Completion, IdeaTab, ListingEvent, SortMode};
use ideabox_core::model::{CategoryId, Comment, CommentId, Idea, IdeaId, VoteKind};
use ideabox_core::session::Session;
use serde::Serialize;
use tabled::Tabled;

use super::{confirmed, ensure_valid};
use crate::output::{self, OutputFormat};

#[derive(Subcommand)]
pub enum IdeaCommands {
    /// List ideas on a tab
    List {
        /// Tab: all, pending or reported
        #[arg(short, long, default_value = "all", value_parser = IdeaTab::from_str)]
        tab: IdeaTab,

        /// Sort (all tab only): latest or popular
        #[arg(short, long, value_parser = SortMode::from_str)]
        sort: Option<SortMode>,

        /// Search text (all tab only)
        #[arg(long)]
        search: Option<String>,

        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Only show ideas in this category
        #[arg(short, long)]
        category: Option<u64>,
    },

    /// Show one idea
    Show {
        /// Idea ID
        id: u64,
    },

    /// Submit a new idea
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// Category ID (repeatable)
        #[arg(short, long = "category")]
        categories: Vec<u64>,

        /// Hide the author from other users
        #[arg(long)]
        anonymous: bool,
    },

    /// Vote on an idea
    Vote {
        /// Idea ID
        id: u64,

        #[arg(value_enum, default_value = "up")]
        direction: VoteDirection,
    },

    /// Report an idea to moderators
    Report {
        /// Idea ID
        id: u64,

        #[arg(short, long)]
        reason: Option<String>,
    },

    /// Hide an idea from the public list
    Hide {
        /// Idea ID
        id: u64,
    },

    /// Make a hidden idea visible again
    Unhide {
        /// Idea ID
        id: u64,
    },

    /// Delete an idea
    Delete {
        /// Idea ID
        id: u64,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// List the comments on an idea
    Comments {
        /// Idea ID
        id: u64,
    },

    /// Comment on an idea
    Comment {
        /// Idea ID
        id: u64,

        content: String,
    },

    /// Report a comment to moderators
    ReportComment {
        /// Comment ID
        id: u64,

        #[arg(short, long)]
        reason: Option<String>,
    },

    /// Delete a comment
    DeleteComment {
        /// Comment ID
        id: u64,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VoteDirection {
    Up,
    Down,
}

impl From<VoteDirection> for VoteKind {
    fn from(direction: VoteDirection) -> Self {
        match direction {
            VoteDirection::Up => VoteKind::Up,
            VoteDirection::Down => VoteKind::Down,
        }
    }
}

// ── Rows ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Tabled)]
struct IdeaRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Votes")]
    votes: String,
    #[tabled(rename = "Comments")]
    comments: u64,
    #[tabled(rename = "Categories")]
    categories: String,
    #[tabled(rename = "Author")]
    author: String,
}

impl From<&Idea> for IdeaRow {
    fn from(idea: &Idea) -> Self {
        Self {
            id: idea.id.get(),
            title: idea.title.clone(),
            status: idea.status.to_string(),
            votes: format!("+{} / -{}", idea.upvotes, idea.downvotes),
            comments: idea.comments_count,
            categories: output::names(idea.categories.iter().map(|c| c.name.as_str())),
            author: author_name(idea),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct CommentRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Posted")]
    posted: String,
    #[tabled(rename = "Comment")]
    content: String,
}

impl From<&Comment> for CommentRow {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.get(),
            author: comment
                .author
                .as_ref()
                .map(|a| a.name.clone())
                .unwrap_or_else(|| "-".to_string()),
            posted: output::date(comment.created_at.as_ref()),
            content: comment.content.clone(),
        }
    }
}

fn author_name(idea: &Idea) -> String {
    if idea.is_anonymous {
        return "Anonymous".to_string();
    }
    idea.author
        .as_ref()
        .map(|a| a.name.clone())
        .unwrap_or_else(|| "-".to_string())
}

/// Events a UI would fire to reach the requested list, in click order.
fn list_events(
    tab: IdeaTab,
    sort: Option<SortMode>,
    search: Option<String>,
    page: u32,
    category: Option<u64>,
) -> Vec<ListingEvent> {
    let mut events = Vec::new();
    if tab != IdeaTab::All {
        events.push(ListingEvent::SelectTab(tab));
    }
    if let Some(sort) = sort {
        events.push(ListingEvent::SelectSort(sort));
    }
    if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
        events.push(ListingEvent::ChangeSearch(search));
    }
    if page > 1 {
        events.push(ListingEvent::GoToPage(page));
    }
    if let Some(category) = category {
        events.push(ListingEvent::ToggleCategory(CategoryId(category)));
    }
    events
}

/// Turn a failed listing fetch into an error, keeping it in the session slot.
fn ensure_loaded(session: &Session, completion: Completion) -> Result<()> {
    if let Completion::Failed(message) = completion {
        session.report_message(message.clone());
        bail!(message);
    }
    Ok(())
}

// ── Execution ───────────────────────────────────────────────────────────────

pub async fn execute(cmd: IdeaCommands, session: &Session, format: OutputFormat) -> Result<()> {
    let client = session.client();

    match cmd {
        IdeaCommands::List {
            tab,
            sort,
            search,
            page,
            category,
        } => {
            if !tab.accepts_filters() && (sort.is_some() || search.is_some()) {
                output::print_info("Sort and search only apply to the all tab; ignoring them.");
            }

            let controller = session.idea_list();
            let completion = controller
                .dispatch_batch(list_events(tab, sort, search, page, category))
                .await;
            ensure_loaded(session, completion)?;

            let rows: Vec<IdeaRow> = controller.visible_ideas().iter().map(IdeaRow::from).collect();
            output::print_list(&rows, format)?;
            if let (OutputFormat::Table, Some(meta)) = (format, controller.page_meta()) {
                output::print_page_footer(&meta);
            }
        }

        IdeaCommands::Show { id } => {
            let idea = session.record(client.get_idea(IdeaId(id)).await)?;

            match format {
                OutputFormat::Table => {
                    output::print_header(&format!("Idea #{}: {}", idea.id, idea.title));
                    output::print_detail("Status", &idea.status.to_string());
                    output::print_detail("Author", &author_name(&idea));
                    output::print_detail(
                        "Categories",
                        &output::names(idea.categories.iter().map(|c| c.name.as_str())),
                    );
                    output::print_detail(
                        "Votes",
                        &format!("+{} / -{} (score {})", idea.upvotes, idea.downvotes, idea.score()),
                    );
                    output::print_detail("Comments", &idea.comments_count.to_string());
                    output::print_detail("Reports", &idea.reports_count.to_string());
                    output::print_detail("Hidden", &output::yes_no(idea.is_hidden));
                    output::print_detail("Created", &output::date(idea.created_at.as_ref()));
                    println!();
                    println!("{}", idea.description);
                }
                _ => output::print_item(&idea, format)?,
            }
        }

        IdeaCommands::Create {
            title,
            description,
            categories,
            anonymous,
        } => {
            let draft = IdeaDraft::new(title, description)
                .with_categories(categories.into_iter().map(CategoryId))
                .anonymous(anonymous);
            ensure_valid(&draft, "Idea")?;

            let idea = session.record(client.create_idea(&draft).await)?;
            match format {
                OutputFormat::Table => {
                    output::print_success(&format!("Idea #{} submitted: {}", idea.id, idea.title))
                }
                _ => output::print_item(&idea, format)?,
            }
        }

        IdeaCommands::Vote { id, direction } => {
            let ack = session.record(client.vote_idea(IdeaId(id), direction.into()).await)?;
            output::print_success(ack.message_or("Vote recorded"));
        }

        IdeaCommands::Report { id, reason } => {
            let ack = session.record(client.report_idea(IdeaId(id), reason.as_deref()).await)?;
            output::print_success(ack.message_or("Idea reported"));
        }

        IdeaCommands::Hide { id } => {
            let ack = session.record(client.hide_idea(IdeaId(id)).await)?;
            output::print_success(ack.message_or("Idea hidden"));
        }

        IdeaCommands::Unhide { id } => {
            let ack = session.record(client.unhide_idea(IdeaId(id)).await)?;
            output::print_success(ack.message_or("Idea visible again"));
        }

        IdeaCommands::Delete { id, force } => {
            if !confirmed(force, &format!("permanently delete idea #{}", id)) {
                return Ok(());
            }
            let ack = session.record(client.delete_idea(IdeaId(id)).await)?;
            output::print_success(ack.message_or("Idea deleted"));
        }

        IdeaCommands::Comments { id } => {
            let comments = session.record(client.list_comments(IdeaId(id)).await)?;
            let rows: Vec<CommentRow> = comments.iter().map(CommentRow::from).collect();
            output::print_list(&rows, format)?;
        }

        IdeaCommands::Comment { id, content } => {
            let comment = session.record(client.add_comment(IdeaId(id), &content).await)?;
            match format {
                OutputFormat::Table => {
                    output::print_success(&format!("Comment #{} added to idea #{}", comment.id, id))
                }
                _ => output::print_item(&comment, format)?,
            }
        }

        IdeaCommands::ReportComment { id, reason } => {
            let ack =
                session.record(client.report_comment(CommentId(id), reason.as_deref()).await)?;
            output::print_success(ack.message_or("Comment reported"));
        }

        IdeaCommands::DeleteComment { id, force } => {
            if !confirmed(force, &format!("permanently delete comment #{}", id)) {
                return Ok(());
            }
            let ack = session.record(client.delete_comment(CommentId(id)).await)?;
            output::print_success(ack.message_or("Comment deleted"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list_needs_no_events() {
        assert!(list_events(IdeaTab::All, None, None, 1, None).is_empty());
    }

    #[test]
    fn test_list_events_follow_click_order() {
        let events = list_events(
            IdeaTab::All,
            Some(SortMode::Popular),
            Some("coffee".to_string()),
            3,
            Some(2),
        );
        assert_eq!(
            events,
            vec![
                ListingEvent::SelectSort(SortMode::Popular),
                ListingEvent::ChangeSearch("coffee".to_string()),
                ListingEvent::GoToPage(3),
                ListingEvent::ToggleCategory(CategoryId(2)),
            ]
        );
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let events = list_events(IdeaTab::Reported, None, Some("  ".to_string()), 1, None);
        assert_eq!(events, vec![ListingEvent::SelectTab(IdeaTab::Reported)]);
    }

    #[test]
    fn test_failed_listing_is_kept_in_session() {
        let session = Session::open(ideabox_core::config::Config::default(), "token").unwrap();

        assert!(ensure_loaded(&session, Completion::Applied).is_ok());
        assert!(ensure_loaded(&session, Completion::Stale).is_ok());
        assert!(session.error().is_none());

        let error = ensure_loaded(&session, Completion::Failed("Failed to load ideas".into()));
        assert_eq!(error.unwrap_err().to_string(), "Failed to load ideas");
        assert_eq!(session.error().as_deref(), Some("Failed to load ideas"));
    }
}
