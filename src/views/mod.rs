//! Screen State
//!
//! Controllers for the three user screens. Each owns its state, talks to the
//! backend through [`RatingApi`](crate::client::RatingApi) and exposes a
//! render-ready model.
//!
//! - [`DashboardView`]: personal statistics and recent ratings
//! - [`StoreListView`]: searchable store catalogue with the user's own ratings
//! - [`RatingDialog`]: star picker for rating or re-rating one store

mod dashboard;
mod rating_dialog;
mod store_list;

pub use dashboard::{DashboardModel, DashboardState, DashboardView, RecentRatingRow, StatCard};
pub use rating_dialog::RatingDialog;
pub use store_list::{OwnRating, SortOption, StoreCard, StoreListModel, StoreListState, StoreListView};

use serde::Serialize;

/// The signed-in user, injected by the host application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_name: String,
}

impl Session {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
        }
    }
}

/// Placeholder shown when a list has nothing to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: &'static str,
    pub message: &'static str,
}
