//! Shared test fixtures: model builders and a recording in-memory backend.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::client::{ApiError, RatingApi};
use crate::models::{Rating, RatingId, RatingSubmission, RatingValue, Store, StoreId, StoreQuery};

pub fn store(id: i64, name: &str, average_rating: f64, total_ratings: u64) -> Store {
    Store {
        id: StoreId(id),
        name: name.to_string(),
        address: format!("{} Market Street", id),
        email: format!("store{}@example.com", id),
        average_rating,
        total_ratings,
    }
}

pub fn rating(id: i64, store_id: i64, value: u8) -> Rating {
    Rating {
        id: RatingId(id),
        store_id: StoreId(store_id),
        rating: RatingValue::new(value).unwrap(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        store_name: Some(format!("Store {}", store_id)),
    }
}

#[derive(Default)]
struct FakeState {
    stores: Vec<Store>,
    ratings: Vec<Rating>,
    fail_stores: bool,
    fail_ratings: bool,
    submit_failure: Option<(u16, Option<String>)>,
    store_delays: HashMap<String, Duration>,
    store_queries: Vec<StoreQuery>,
    unfiltered_store_fetches: usize,
    rating_fetches: usize,
    submissions: Vec<RatingSubmission>,
}

/// In-memory [`RatingApi`] that records every call
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stores(self, stores: Vec<Store>) -> Self {
        self.state.lock().unwrap().stores = stores;
        self
    }

    pub fn with_ratings(self, ratings: Vec<Rating>) -> Self {
        self.state.lock().unwrap().ratings = ratings;
        self
    }

    /// Delay the store response for a given search term
    pub fn with_store_delay(self, search: &str, delay: Duration) -> Self {
        self.state
            .lock()
            .unwrap()
            .store_delays
            .insert(search.to_string(), delay);
        self
    }

    pub fn fail_stores(&self, fail: bool) {
        self.state.lock().unwrap().fail_stores = fail;
    }

    pub fn fail_ratings(&self, fail: bool) {
        self.state.lock().unwrap().fail_ratings = fail;
    }

    pub fn fail_submit(&self, status: u16, message: Option<&str>) {
        self.state.lock().unwrap().submit_failure = Some((status, message.map(str::to_string)));
    }

    pub fn store_queries(&self) -> Vec<StoreQuery> {
        self.state.lock().unwrap().store_queries.clone()
    }

    /// Store fetches made without a search/sort query
    pub fn unfiltered_store_fetches(&self) -> usize {
        self.state.lock().unwrap().unfiltered_store_fetches
    }

    pub fn rating_fetches(&self) -> usize {
        self.state.lock().unwrap().rating_fetches
    }

    pub fn submissions(&self) -> Vec<RatingSubmission> {
        self.state.lock().unwrap().submissions.clone()
    }
}

#[async_trait]
impl RatingApi for FakeApi {
    async fn user_ratings(&self) -> Result<Vec<Rating>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.rating_fetches += 1;
        if state.fail_ratings {
            return Err(ApiError::Unavailable);
        }
        Ok(state.ratings.clone())
    }

    async fn stores(&self, query: Option<&StoreQuery>) -> Result<Vec<Store>, ApiError> {
        let search = query.map(|q| q.search.to_lowercase()).unwrap_or_default();
        let (delay, result) = {
            let mut state = self.state.lock().unwrap();
            match query {
                Some(query) => state.store_queries.push(query.clone()),
                None => state.unfiltered_store_fetches += 1,
            }
            let delay = query.and_then(|q| state.store_delays.get(&q.search).copied());
            let result = if state.fail_stores {
                Err(ApiError::Api {
                    status: 500,
                    message: None,
                })
            } else {
                Ok(state
                    .stores
                    .iter()
                    .filter(|s| s.name.to_lowercase().contains(&search))
                    .cloned()
                    .collect())
            };
            (delay, result)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn submit_rating(&self, submission: &RatingSubmission) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.submissions.push(*submission);
        if let Some((status, message)) = state.submit_failure.clone() {
            return Err(ApiError::Api { status, message });
        }

        let next_id = state.ratings.len() as i64 + 100;
        let position = state
            .ratings
            .iter()
            .position(|r| r.store_id == submission.store_id);
        match position {
            Some(i) => state.ratings[i].rating = submission.rating,
            None => state.ratings.push(Rating {
                id: RatingId(next_id),
                store_id: submission.store_id,
                rating: submission.rating,
                created_at: Utc::now(),
                store_name: None,
            }),
        }
        Ok(())
    }
}
