//! Rating Dialog
//!
//! Star picker for one store. Pre-selects the user's earlier rating when
//! there is one, so submitting again updates it.

use std::future::Future;
use std::sync::Arc;

use crate::client::RatingApi;
use crate::display::{out_of_five, rating_caption, star_row};
use crate::models::{ModelError, Rating, RatingValue, Store};
use crate::reconcile::find_existing;
use crate::submission::{SubmissionError, SubmissionHandler};

/// Rating form for a single store
pub struct RatingDialog {
    api: Arc<dyn RatingApi>,
    store: Store,
    handler: SubmissionHandler,
    hover: Option<RatingValue>,
    existing: Option<Rating>,
}

impl RatingDialog {
    pub fn new(api: Arc<dyn RatingApi>, store: Store) -> Self {
        let handler = SubmissionHandler::new(store.id);
        Self {
            api,
            store,
            handler,
            hover: None,
            existing: None,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn existing(&self) -> Option<&Rating> {
        self.existing.as_ref()
    }

    /// Look up the user's earlier rating of this store and pre-select it
    ///
    /// A failed lookup is only logged; the dialog stays usable.
    pub async fn load_existing(&mut self) {
        match self.api.user_ratings().await {
            Ok(ratings) => {
                if let Some(existing) = find_existing(&ratings, self.store.id) {
                    self.handler.select(existing.rating.get()).ok();
                    self.existing = Some(existing.clone());
                }
            }
            Err(e) => {
                tracing::error!(store_id = %self.store.id, error = %e, "Error checking existing rating");
            }
        }
    }

    pub fn select(&mut self, value: u8) -> Result<(), ModelError> {
        self.handler.select(value)
    }

    pub fn selected(&self) -> Option<RatingValue> {
        self.handler.selected()
    }

    pub fn hover(&mut self, value: u8) -> Result<(), ModelError> {
        self.hover = Some(RatingValue::new(value)?);
        Ok(())
    }

    pub fn clear_hover(&mut self) {
        self.hover = None;
    }

    /// Stars to light: the hovered value wins over the selection
    pub fn active_rating(&self) -> Option<RatingValue> {
        self.hover.or(self.handler.selected())
    }

    pub fn stars(&self) -> [bool; 5] {
        star_row(self.active_rating().map(RatingValue::get).unwrap_or(0))
    }

    pub fn caption(&self) -> &'static str {
        rating_caption(self.handler.selected())
    }

    pub fn title(&self) -> &'static str {
        if self.existing.is_some() {
            "Update Rating"
        } else {
            "Rate Store"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.existing.is_some(), self.handler.is_submitting()) {
            (true, true) => "Updating...",
            (false, true) => "Submitting...",
            (true, false) => "Update Rating",
            (false, false) => "Submit Rating",
        }
    }

    pub fn existing_notice(&self) -> Option<String> {
        self.existing.as_ref().map(|r| {
            format!(
                "You previously rated this store {}. You can update your rating below.",
                out_of_five(r.rating)
            )
        })
    }

    pub fn error(&self) -> Option<&str> {
        self.handler.error()
    }

    pub fn can_submit(&self) -> bool {
        !self.handler.is_submitting() && self.handler.selected().is_some()
    }

    /// Submit the selected rating; `on_done` runs once after a successful write
    pub async fn submit<F, Fut>(&mut self, on_done: F) -> Result<(), SubmissionError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        self.handler.submit(self.api.as_ref(), on_done).await
    }
}
