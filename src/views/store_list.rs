//! Store Listing
//!
//! Search and sort changes refetch the listing through a debounce timer.
//! Every fetch cycle takes a generation number; a response that arrives after
//! a newer cycle has started is dropped, so the list always reflects the most
//! recent query even when responses come back out of order.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::rating_dialog::RatingDialog;
use super::EmptyState;
use crate::client::RatingApi;
use crate::config::ListingConfig;
use crate::debounce::Debouncer;
use crate::display::{format_rating, full_stars, out_of_five, review_label, star_row};
use crate::fetcher::fetch_catalogue;
use crate::models::{SortPreset, Store, StoreId, StoreQuery};
use crate::reconcile::RatingIndex;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load stores";
pub const NOT_RATED_MESSAGE: &str = "You haven't rated this store yet";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreListState {
    pub query: StoreQuery,
    pub stores: Vec<Store>,
    pub ratings: RatingIndex,
    pub loading: bool,
    pub error: Option<String>,
    /// Store whose rating dialog is open
    pub selected: Option<StoreId>,
}

/// The user's own rating line on a store card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum OwnRating {
    Rated {
        label: &'static str,
        stars: [bool; 5],
        score: String,
    },
    NotRated { message: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreCard {
    pub id: StoreId,
    pub name: String,
    pub email: String,
    pub address: String,
    pub average: String,
    pub average_stars: [bool; 5],
    pub reviews: String,
    pub own_rating: OwnRating,
    pub action: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortOption {
    pub key: String,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreListModel {
    pub header: String,
    pub search: String,
    pub sort_options: Vec<SortOption>,
    pub loading: bool,
    pub error: Option<String>,
    pub cards: Vec<StoreCard>,
    pub empty_state: Option<EmptyState>,
}

struct Shared {
    api: Arc<dyn RatingApi>,
    state: RwLock<StoreListState>,
    generation: AtomicU64,
}

impl Shared {
    /// Run one fetch cycle for `query` and apply it unless superseded
    async fn fetch(&self, query: StoreQuery) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().await.loading = true;

        let result = fetch_catalogue(self.api.as_ref(), Some(&query)).await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, search = %query.search, "Dropping superseded store listing response");
            return;
        }

        match result {
            Ok(catalogue) => {
                state.ratings = RatingIndex::build(&catalogue.ratings, &catalogue.stores);
                state.stores = catalogue.stores;
                state.error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, search = %query.search, "Error fetching stores/ratings");
                state.error = Some(LOAD_FAILED_MESSAGE.to_string());
            }
        }
        state.loading = false;
    }
}

/// Store listing screen: query inputs, debounced refetch and store cards
pub struct StoreListView {
    shared: Arc<Shared>,
    debouncer: Debouncer,
}

impl StoreListView {
    pub fn new(api: Arc<dyn RatingApi>, config: &ListingConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                api,
                state: RwLock::new(StoreListState {
                    loading: true,
                    ..Default::default()
                }),
                generation: AtomicU64::new(0),
            }),
            debouncer: Debouncer::new(config.debounce()),
        }
    }

    /// Schedule the initial load through the debounce timer
    pub async fn mount(&self) {
        self.schedule().await;
    }

    pub async fn state(&self) -> StoreListState {
        self.shared.state.read().await.clone()
    }

    pub async fn set_search(&self, search: impl Into<String>) {
        let search = search.into();
        self.update_query(|query| query.search = search).await;
    }

    pub async fn set_sort(&self, preset: SortPreset) {
        self.update_query(|query| query.apply_preset(preset)).await;
    }

    pub async fn clear_filters(&self) {
        self.update_query(|query| *query = StoreQuery::default()).await;
    }

    /// Apply `change` to the query; rearm the timer only if it changed
    async fn update_query(&self, change: impl FnOnce(&mut StoreQuery)) {
        let changed = {
            let mut state = self.shared.state.write().await;
            let before = state.query.clone();
            change(&mut state.query);
            state.query != before
        };

        if changed {
            self.schedule().await;
        }
    }

    /// Fetch immediately with the current query, bypassing the timer
    pub async fn refresh(&self) {
        let query = self.shared.state.read().await.query.clone();
        self.shared.fetch(query).await;
    }

    async fn schedule(&self) {
        let query = self.shared.state.read().await.query.clone();
        let shared = self.shared.clone();
        self.debouncer.trigger(async move {
            shared.fetch(query).await;
        });
    }

    /// Open the rating dialog for a listed store
    pub async fn open_rating(&self, store_id: StoreId) -> Option<RatingDialog> {
        let mut state = self.shared.state.write().await;
        let store = state.stores.iter().find(|s| s.id == store_id)?.clone();
        state.selected = Some(store_id);
        Some(RatingDialog::new(self.shared.api.clone(), store))
    }

    pub async fn close_rating(&self) {
        self.shared.state.write().await.selected = None;
    }

    /// Completion hook for a successful submission: close and refetch once
    pub async fn rating_submitted(&self) {
        self.close_rating().await;
        self.refresh().await;
    }

    pub async fn model(&self) -> StoreListModel {
        let state = self.shared.state.read().await;
        let current = state.query.preset();

        let cards: Vec<StoreCard> = state
            .stores
            .iter()
            .map(|store| store_card(store, &state.ratings))
            .collect();

        let empty_state = cards.is_empty().then_some(EmptyState {
            title: "No stores found",
            message: "No stores match your current search criteria.",
        });

        StoreListModel {
            header: format!("Available Stores ({})", state.stores.len()),
            search: state.query.search.clone(),
            sort_options: SortPreset::ALL
                .into_iter()
                .map(|preset| SortOption {
                    key: preset.key(),
                    label: preset.label(),
                    selected: preset == current,
                })
                .collect(),
            loading: state.loading,
            error: state.error.clone(),
            cards,
            empty_state,
        }
    }
}

fn store_card(store: &Store, ratings: &RatingIndex) -> StoreCard {
    let own = ratings.get(store.id);

    StoreCard {
        id: store.id,
        name: store.name.clone(),
        email: store.email.clone(),
        address: store.address.clone(),
        average: format_rating(store.average_rating),
        average_stars: star_row(full_stars(store.average_rating)),
        reviews: review_label(store.total_ratings),
        own_rating: match own {
            Some(value) => OwnRating::Rated {
                label: "Your rating:",
                stars: star_row(value.get()),
                score: out_of_five(value),
            },
            None => OwnRating::NotRated {
                message: NOT_RATED_MESSAGE,
            },
        },
        action: if own.is_some() {
            "Update Rating"
        } else {
            "Rate Store"
        },
    }
}
