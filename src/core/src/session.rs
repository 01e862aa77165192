//! Per-login session.
//!
//! A `Session` is created when a token is available and consumed by
//! [`Session::close`] on logout. It owns the authenticated client and the
//! error slot every screen reports operation failures into; nothing here is
//! process-global.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::access::RoleCatalog;
use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{ErrorCode, IdeaBoxError, Result};
use crate::forms::UserForm;
use crate::listing::IdeaListController;
use crate::model::{User, UserId};
use crate::telemetry::SensitiveFieldRedactor;

pub struct Session {
    id: Uuid,
    config: Config,
    client: Arc<ApiClient>,
    last_error: Mutex<Option<String>>,
    opened_at: DateTime<Utc>,
}

impl Session {
    /// Open a session for a bearer token obtained elsewhere.
    pub fn open(config: Config, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(IdeaBoxError::new(
                ErrorCode::MissingToken,
                "An API token is required to open a session",
            ));
        }

        config.validate()?;
        let client = ApiClient::new(&config.api)?.with_token(token.trim());

        let session = Self {
            id: Uuid::new_v4(),
            config,
            client: Arc::new(client),
            last_error: Mutex::new(None),
            opened_at: Utc::now(),
        };

        tracing::info!(
            session_id = %session.id,
            base_url = %session.client.base_url(),
            token = %SensitiveFieldRedactor::global().redact("token", &token),
            "Session opened"
        );
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Idea list controller fetching through this session's client.
    pub fn idea_list(&self) -> IdeaListController<Arc<ApiClient>> {
        IdeaListController::new(Arc::clone(&self.client))
            .with_search_delay(self.config.listing.search_debounce)
    }

    /// Fetch the role catalog for one form session.
    pub async fn role_catalog(&self) -> Result<Arc<RoleCatalog>> {
        let roles = self.record(self.client.list_roles().await)?;
        Ok(Arc::new(RoleCatalog::new(roles)))
    }

    /// Empty create-user form with a freshly loaded role catalog.
    pub async fn new_user_form(&self) -> Result<UserForm> {
        Ok(UserForm::new(self.role_catalog().await?))
    }

    /// Edit form preloaded with an existing user.
    pub async fn edit_user_form(&self, id: UserId) -> Result<UserForm> {
        let (user, roles) = self.record(
            tokio::try_join!(self.client.get_user(id), self.client.list_roles()),
        )?;
        Ok(UserForm::edit(&user, Arc::new(RoleCatalog::new(roles))))
    }

    /// Validate and submit a user form, creating or updating as appropriate.
    ///
    /// Validation failures come back as field-level errors and are not
    /// recorded in the session error slot.
    pub async fn submit_user_form(&self, form: &UserForm) -> Result<User> {
        let submission = form.submission()?;
        let result = match form.user_id() {
            Some(id) => self.client.update_user(id, &submission).await,
            None => self.client.create_user(&submission).await,
        };
        self.record(result)
    }

    /// Pass a result through, recording its error in the session slot.
    pub fn record<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(error) = &result {
            self.report(error);
        }
        result
    }

    /// Log an operation error and keep its message for display.
    pub fn report(&self, error: &IdeaBoxError) {
        error.log();
        self.report_message(error.user_message());
    }

    /// Keep a message for an error that was already logged where it happened.
    pub fn report_message(&self, message: impl Into<String>) {
        *self.last_error.lock() = Some(message.into());
    }

    /// Last recorded error message.
    pub fn error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }

    /// Take and clear the last recorded error message.
    pub fn take_error(&self) -> Option<String> {
        self.last_error.lock().take()
    }

    /// End the session. The client and any pending error are dropped.
    pub fn close(self) {
        let duration = Utc::now() - self.opened_at;
        tracing::info!(
            session_id = %self.id,
            duration_secs = duration.num_seconds(),
            "Session closed"
        );
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("client", &self.client)
            .field("opened_at", &self.opened_at)
            .finish()
    }
}
