//! User Dashboard

use serde::Serialize;
use std::sync::Arc;

use super::{EmptyState, Session};
use crate::aggregate::{recent, DashboardStats, RECENT_RATINGS_LIMIT};
use crate::client::RatingApi;
use crate::display::{format_rating, out_of_five, star_row};
use crate::fetcher::fetch_catalogue;
use crate::models::Rating;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load dashboard data";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub stats: DashboardStats,
    pub recent: Vec<Rating>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub caption: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentRatingRow {
    pub store_name: String,
    pub stars: [bool; 5],
    pub score: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardModel {
    pub greeting: String,
    pub error: Option<String>,
    pub cards: Vec<StatCard>,
    pub recent: Vec<RecentRatingRow>,
    pub empty_state: Option<EmptyState>,
}

pub struct DashboardView {
    api: Arc<dyn RatingApi>,
    session: Session,
    state: DashboardState,
}

impl DashboardView {
    pub fn new(api: Arc<dyn RatingApi>, session: Session) -> Self {
        Self {
            api,
            session,
            state: DashboardState {
                loading: true,
                ..Default::default()
            },
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn greeting(&self) -> String {
        format!("Welcome back, {}!", self.session.user_name)
    }

    /// Fetch ratings and stores and recompute the statistics
    ///
    /// A failed fetch keeps the previous figures and sets the error message.
    pub async fn load(&mut self) {
        self.state.loading = true;

        match fetch_catalogue(self.api.as_ref(), None).await {
            Ok(catalogue) => {
                self.state.stats = DashboardStats::compute(&catalogue.ratings, &catalogue.stores);
                self.state.recent = recent(&catalogue.ratings, RECENT_RATINGS_LIMIT).to_vec();
                self.state.error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching dashboard data");
                self.state.error = Some(LOAD_FAILED_MESSAGE.to_string());
            }
        }

        self.state.loading = false;
    }

    pub fn model(&self) -> DashboardModel {
        let stats = &self.state.stats;

        let cards = vec![
            StatCard {
                title: "My Ratings",
                value: stats.total_ratings.to_string(),
                caption: "Total ratings given",
            },
            StatCard {
                title: "Average Rating",
                value: format_rating(stats.average_rating),
                caption: "Your rating average",
            },
            StatCard {
                title: "Available Stores",
                value: stats.total_stores.to_string(),
                caption: "Explore stores",
            },
        ];

        let recent: Vec<RecentRatingRow> = self
            .state
            .recent
            .iter()
            .map(|r| RecentRatingRow {
                store_name: r.store_name.clone().unwrap_or_default(),
                stars: star_row(r.rating.get()),
                score: out_of_five(r.rating),
                date: r.created_at.format("%Y-%m-%d").to_string(),
            })
            .collect();

        let empty_state = recent.is_empty().then_some(EmptyState {
            title: "No ratings yet",
            message: "Start rating stores to see your activity here.",
        });

        DashboardModel {
            greeting: self.greeting(),
            error: self.state.error.clone(),
            cards,
            recent,
            empty_state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{rating, store, FakeApi};

    fn view(api: &Arc<FakeApi>) -> DashboardView {
        DashboardView::new(api.clone(), Session::new("Ada"))
    }

    #[tokio::test]
    async fn test_load_computes_stats() {
        let api = Arc::new(
            FakeApi::new()
                .with_stores(vec![store(1, "A", 4.0, 1), store(2, "B", 2.0, 1), store(3, "C", 0.0, 0)])
                .with_ratings(vec![rating(1, 1, 4), rating(2, 2, 2)]),
        );
        let mut dashboard = view(&api);
        assert!(dashboard.state().loading);

        dashboard.load().await;

        let state = dashboard.state();
        assert!(!state.loading);
        assert_eq!(state.stats.total_ratings, 2);
        assert_eq!(state.stats.average_rating, 3.0);
        assert_eq!(state.stats.total_stores, 3);
        assert_eq!(state.recent.len(), 2);
        assert_eq!(api.unfiltered_store_fetches(), 1);
        assert!(api.store_queries().is_empty());

        let model = dashboard.model();
        assert_eq!(model.greeting, "Welcome back, Ada!");
        assert_eq!(model.cards[1].value, "3.0");
        assert_eq!(model.recent[0].score, "4/5");
        assert_eq!(model.recent[0].date, "2024-03-01");
        assert!(model.empty_state.is_none());
    }

    #[tokio::test]
    async fn test_recent_is_capped() {
        let ratings = (1..=8).map(|i| rating(i, i, 5)).collect();
        let api = Arc::new(FakeApi::new().with_ratings(ratings));
        let mut dashboard = view(&api);

        dashboard.load().await;

        assert_eq!(dashboard.state().stats.total_ratings, 8);
        assert_eq!(dashboard.state().recent.len(), RECENT_RATINGS_LIMIT);
    }

    #[tokio::test]
    async fn test_empty_history() {
        let api = Arc::new(FakeApi::new().with_stores(vec![store(1, "A", 0.0, 0)]));
        let mut dashboard = view(&api);

        dashboard.load().await;

        let model = dashboard.model();
        assert_eq!(model.cards[0].value, "0");
        assert_eq!(model.cards[1].value, "0.0");
        assert_eq!(model.empty_state.map(|e| e.title), Some("No ratings yet"));
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_figures() {
        let api = Arc::new(
            FakeApi::new()
                .with_stores(vec![store(1, "A", 5.0, 1)])
                .with_ratings(vec![rating(1, 1, 5)]),
        );
        let mut dashboard = view(&api);
        dashboard.load().await;

        api.fail_stores(true);
        dashboard.load().await;

        let state = dashboard.state();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some(LOAD_FAILED_MESSAGE));
        assert_eq!(state.stats.total_ratings, 1);
        assert_eq!(state.stats.total_stores, 1);
    }
}
