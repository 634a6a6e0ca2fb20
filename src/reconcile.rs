//! Rating Reconciliation
//!
//! Joins the store listing with the user's own ratings. The index is rebuilt
//! from scratch on every fetch cycle.

use crate::models::{Rating, RatingValue, Store, StoreId};
use std::collections::{HashMap, HashSet};

/// Store id to the current user's rating of that store
///
/// A store that is absent has not been rated by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingIndex {
    by_store: HashMap<StoreId, RatingValue>,
}

impl RatingIndex {
    /// Build the index from the user's ratings.
    ///
    /// Every rating gets an entry, including ratings of stores outside the
    /// current (possibly search-filtered) store page.
    pub fn build(ratings: &[Rating], stores: &[Store]) -> Self {
        let by_store: HashMap<StoreId, RatingValue> =
            ratings.iter().map(|r| (r.store_id, r.rating)).collect();

        if tracing::enabled!(tracing::Level::DEBUG) {
            let listed: HashSet<StoreId> = stores.iter().map(|s| s.id).collect();
            let unlisted = by_store.keys().filter(|id| !listed.contains(id)).count();
            tracing::debug!(
                rated = by_store.len(),
                listed = listed.len(),
                unlisted,
                "Rebuilt rating index"
            );
        }

        Self { by_store }
    }

    pub fn get(&self, store_id: StoreId) -> Option<RatingValue> {
        self.by_store.get(&store_id).copied()
    }

    pub fn has_rated(&self, store_id: StoreId) -> bool {
        self.by_store.contains_key(&store_id)
    }

    pub fn len(&self) -> usize {
        self.by_store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_store.is_empty()
    }
}

/// The user's existing rating of a store, if any
pub fn find_existing(ratings: &[Rating], store_id: StoreId) -> Option<&Rating> {
    ratings.iter().find(|r| r.store_id == store_id)
}
