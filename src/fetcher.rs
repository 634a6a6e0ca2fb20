//! Parallel Fetching
//!
//! Both collections are requested concurrently and the cycle fails as a
//! whole when either request fails. There is no retry.

use crate::client::{ApiError, RatingApi};
use crate::models::{Rating, Store, StoreQuery};

/// Stores and the user's ratings from one fetch cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogue {
    pub stores: Vec<Store>,
    pub ratings: Vec<Rating>,
}

/// Fetch the store listing for `query` together with the user's ratings
///
/// Without a query the backend's unfiltered listing is requested.
pub async fn fetch_catalogue(
    api: &dyn RatingApi,
    query: Option<&StoreQuery>,
) -> Result<Catalogue, ApiError> {
    let start = std::time::Instant::now();

    let (stores, ratings) = tokio::try_join!(api.stores(query), api.user_ratings())?;

    tracing::debug!(
        stores = stores.len(),
        ratings = ratings.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        search = query.map(|q| q.search.as_str()).unwrap_or_default(),
        "Fetched catalogue"
    );

    Ok(Catalogue { stores, ratings })
}
