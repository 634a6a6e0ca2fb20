//! # Storerate
//!
//! Client-side core of a store rating application: typed access to the
//! rating backend, aggregation of the user's ratings, reconciliation of the
//! store catalogue with the user's own ratings, and the view state behind
//! the dashboard, store listing and rating dialog.
//!
//! ## Modules
//!
//! - [`client`]: REST client and the [`RatingApi`] seam
//! - [`fetcher`]: parallel fetch of stores and ratings
//! - [`aggregate`]: rating count and average
//! - [`reconcile`]: store id to own-rating lookup
//! - [`submission`]: validated create-or-update of a rating
//! - [`debounce`]: trailing-edge timer for search input
//! - [`views`]: dashboard, store listing and rating dialog controllers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storerate::{Config, HttpRatingClient, StoreListView};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     storerate::logging::init(&config.logging)?;
//!
//!     let api = Arc::new(HttpRatingClient::new(&config.api)?);
//!     let stores = StoreListView::new(api, &config.listing);
//!     stores.refresh().await;
//!
//!     for card in stores.model().await.cards {
//!         println!("{} - {} ({})", card.name, card.average, card.reviews);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod client;
pub mod config;
pub mod debounce;
pub mod display;
pub mod fetcher;
pub mod logging;
pub mod models;
pub mod reconcile;
pub mod submission;
pub mod views;

#[cfg(test)]
mod test_support;

pub use aggregate::{summarize, DashboardStats, RatingSummary};
pub use client::{ApiError, HttpRatingClient, RatingApi};
pub use config::{ApiConfig, Config, ConfigError, ListingConfig, LoggingConfig};
pub use debounce::Debouncer;
pub use fetcher::{fetch_catalogue, Catalogue};
pub use models::{
    ModelError, Rating, RatingId, RatingSubmission, RatingValue, SortBy, SortOrder, SortPreset,
    Store, StoreId, StoreQuery,
};
pub use reconcile::{find_existing, RatingIndex};
pub use submission::{SubmissionError, SubmissionHandler, SubmissionState};
pub use views::{DashboardView, RatingDialog, Session, StoreListView};
