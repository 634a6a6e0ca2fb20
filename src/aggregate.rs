//! Rating Aggregation
//!
//! Summary statistics over the current user's ratings. Values are exact;
//! rounding happens only when formatting for display.

use crate::models::{Rating, Store};
use serde::Serialize;

/// Number of ratings shown in the dashboard's recent activity list
pub const RECENT_RATINGS_LIMIT: usize = 5;

/// Count and mean of a rating collection
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RatingSummary {
    pub total_ratings: usize,
    pub average_rating: f64,
}

/// Figures shown on the user dashboard
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DashboardStats {
    pub total_ratings: usize,
    pub average_rating: f64,
    pub total_stores: usize,
}

/// Summarize a rating collection; an empty collection averages to 0
pub fn summarize(ratings: &[Rating]) -> RatingSummary {
    let total_ratings = ratings.len();
    if total_ratings == 0 {
        return RatingSummary::default();
    }

    let sum: u64 = ratings.iter().map(|r| u64::from(r.rating.get())).sum();

    RatingSummary {
        total_ratings,
        average_rating: sum as f64 / total_ratings as f64,
    }
}

impl DashboardStats {
    pub fn compute(ratings: &[Rating], stores: &[Store]) -> Self {
        let summary = summarize(ratings);
        Self {
            total_ratings: summary.total_ratings,
            average_rating: summary.average_rating,
            total_stores: stores.len(),
        }
    }
}

/// The first `limit` ratings in backend order
pub fn recent(ratings: &[Rating], limit: usize) -> &[Rating] {
    &ratings[..ratings.len().min(limit)]
}
