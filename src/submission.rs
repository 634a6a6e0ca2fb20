//! Rating Submission
//!
//! Validates the selected star value and performs a single create-or-update
//! write. A failed attempt leaves the form editable; nothing is retried.

use std::future::Future;
use thiserror::Error;

use crate::client::{ApiError, RatingApi};
use crate::models::{ModelError, RatingSubmission, RatingValue, StoreId};

/// Shown when submit is pressed with no stars selected
pub const SELECT_RATING_MESSAGE: &str = "Please select a rating";

/// Shown when the backend rejects a submission without a message
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit rating";

/// Lifecycle of one submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
}

/// Why a submit attempt did not succeed
#[derive(Error, Debug)]
pub enum SubmissionError {
    /// Blocked locally; no request was made
    #[error("{0}")]
    Validation(String),

    #[error("Submission failed: {0}")]
    Api(#[from] ApiError),
}

/// Form state and submit logic for rating one store
#[derive(Debug, Clone)]
pub struct SubmissionHandler {
    store_id: StoreId,
    selected: Option<RatingValue>,
    state: SubmissionState,
    error: Option<String>,
}

impl SubmissionHandler {
    pub fn new(store_id: StoreId) -> Self {
        Self {
            store_id,
            selected: None,
            state: SubmissionState::Idle,
            error: None,
        }
    }

    pub fn store_id(&self) -> StoreId {
        self.store_id
    }

    /// Select a star value; `0` clears the selection
    pub fn select(&mut self, value: u8) -> Result<(), ModelError> {
        self.selected = match value {
            0 => None,
            v => Some(RatingValue::new(v)?),
        };
        Ok(())
    }

    pub fn selected(&self) -> Option<RatingValue> {
        self.selected
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Message to show above the form, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Validate and send the rating, then run `on_success` exactly once
    ///
    /// On failure the state returns to `Idle` with a user-facing message
    /// and the selection is kept so the user can try again.
    pub async fn submit<F, Fut>(
        &mut self,
        api: &dyn RatingApi,
        on_success: F,
    ) -> Result<(), SubmissionError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        self.state = SubmissionState::Validating;

        let Some(rating) = self.selected else {
            self.state = SubmissionState::Idle;
            self.error = Some(SELECT_RATING_MESSAGE.to_string());
            return Err(SubmissionError::Validation(SELECT_RATING_MESSAGE.to_string()));
        };

        self.state = SubmissionState::Submitting;
        self.error = None;

        let submission = RatingSubmission {
            store_id: self.store_id,
            rating,
        };

        match api.submit_rating(&submission).await {
            Ok(()) => {
                self.state = SubmissionState::Success;
                on_success().await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(store_id = %self.store_id, error = %e, "Rating submission failed");
                self.state = SubmissionState::Idle;
                self.error = Some(e.user_message().unwrap_or(SUBMIT_FAILED_MESSAGE).to_string());
                Err(SubmissionError::Api(e))
            }
        }
    }
}
