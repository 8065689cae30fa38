//! Tribute form model.
//!
//! Submission is open to unauthenticated visitors with a manually entered
//! name; signing in is optional and only prefills a verified name and
//! photo. The anonymous toggle suppresses the name requirement entirely.

use async_trait::async_trait;

use keepsake_core::error::CoreError;
use keepsake_core::tribute::{self, ANONYMOUS_NAME};
use keepsake_data::models::{AuthUser, Tribute};

use crate::api::{ApiClient, ClientError, SubmitTribute};

// ---------------------------------------------------------------------------
// Submitter seam
// ---------------------------------------------------------------------------

/// Anything that can deliver a tribute to the submission endpoint.
#[async_trait]
pub trait TributeSubmitter: Sync {
    async fn submit(&self, input: &SubmitTribute) -> Result<Tribute, ClientError>;
}

#[async_trait]
impl TributeSubmitter for ApiClient {
    async fn submit(&self, input: &SubmitTribute) -> Result<Tribute, ClientError> {
        self.submit_tribute(input).await
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Local validation refused the input; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// The submission endpoint refused or failed.
    #[error(transparent)]
    Submit(#[from] ClientError),
}

// ---------------------------------------------------------------------------
// Form state
// ---------------------------------------------------------------------------

/// State behind the tribute form.
#[derive(Debug, Default)]
pub struct TributeForm {
    pub name: String,
    pub message: String,
    pub is_anonymous: bool,
    pub tribute_photo_url: Option<String>,
    user: Option<AuthUser>,
    photo_url: Option<String>,
    error: Option<String>,
}

impl TributeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    /// Dismissible inline error from the last failed submit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Record a sign-in: prefill the name (profile full name, short name,
    /// then email local-part) unless the visitor already typed one, and
    /// pick up the profile photo.
    pub fn signed_in(&mut self, user: AuthUser) {
        if self.name.trim().is_empty() {
            let meta = &user.user_metadata;
            self.name = meta
                .full_name
                .clone()
                .or_else(|| meta.name.clone())
                .or_else(|| {
                    user.email
                        .as_deref()
                        .and_then(tribute::email_local_part)
                })
                .unwrap_or_default();
        }

        self.photo_url = tribute::resolve_photo_url(
            None,
            user.user_metadata.avatar_url.as_deref(),
            user.user_metadata.picture.as_deref(),
        );
        self.user = Some(user);
    }

    /// Record a sign-out: the prefilled identity goes away with the session.
    pub fn signed_out(&mut self) {
        self.user = None;
        self.photo_url = None;
        self.name.clear();
    }

    /// Run the same validation the server applies.
    pub fn validate(&self) -> Result<(), CoreError> {
        tribute::validate_submission(&self.message, self.is_anonymous, Some(self.name.as_str()))
    }

    /// Build the request payload, validating first.
    pub fn submission(&self) -> Result<SubmitTribute, CoreError> {
        self.validate()?;

        let name = if self.is_anonymous {
            None
        } else {
            Some(self.name.trim().to_string())
        };

        Ok(SubmitTribute {
            message: self.message.clone(),
            is_anonymous: self.is_anonymous,
            name,
            photo_url: self.photo_url.clone(),
            tribute_photo_url: self.tribute_photo_url.clone(),
        })
    }

    /// Validate, submit, and update form state.
    ///
    /// On success the message clears (the name sticks around for the next
    /// tribute) and `on_refresh` fires so the page re-fetches the list. On
    /// failure the input is kept and the error shows inline.
    pub async fn submit(
        &mut self,
        submitter: &impl TributeSubmitter,
        on_refresh: &mut dyn FnMut(),
    ) -> Result<Tribute, FormError> {
        self.error = None;

        let payload = self.submission().map_err(|err| {
            self.error = Some(err.to_string());
            err
        })?;

        match submitter.submit(&payload).await {
            Ok(tribute) => {
                self.message.clear();
                self.tribute_photo_url = None;
                on_refresh();
                Ok(tribute)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }
}

/// The name a tribute renders under: the anonymous literal wins over
/// whatever is stored.
pub fn rendered_name(tribute: &Tribute) -> &str {
    if tribute.is_anonymous {
        ANONYMOUS_NAME
    } else {
        &tribute.name
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
