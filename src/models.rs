//! Domain Types
//!
//! Wire-compatible types for the store rating backend: stores, ratings,
//! listing queries and rating submissions.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Backend identifier of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(pub i64);

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Backend identifier of a rating record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingId(pub i64);

/// A star rating between 1 and 5 inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RatingValue(u8);

impl RatingValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Create a rating value, rejecting anything outside 1..=5
    pub fn new(value: u8) -> Result<Self, ModelError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ModelError::InvalidRating(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RatingValue {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RatingValue> for u8 {
    fn from(value: RatingValue) -> Self {
        value.0
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rateable store as listed by the backend
///
/// `average_rating` and `total_ratings` are computed server-side. Depending
/// on the database driver they arrive as numbers, numeric strings or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub average_rating: f64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_ratings: u64,
}

/// One of the current user's ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: RatingId,
    pub store_id: StoreId,
    pub rating: RatingValue,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub store_name: Option<String>,
}

/// Body of `POST /ratings`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSubmission {
    pub store_id: StoreId,
    pub rating: RatingValue,
}

/// Field the store listing is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortBy {
    #[default]
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "average_rating")]
    AverageRating,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::AverageRating => "average_rating",
        }
    }
}

/// Direction of the store listing sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// The sort options offered by the store listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPreset {
    NameAsc,
    NameDesc,
    HighestRated,
    LowestRated,
}

impl SortPreset {
    pub const ALL: [SortPreset; 4] = [
        SortPreset::NameAsc,
        SortPreset::NameDesc,
        SortPreset::HighestRated,
        SortPreset::LowestRated,
    ];

    pub fn sort_by(&self) -> SortBy {
        match self {
            SortPreset::NameAsc | SortPreset::NameDesc => SortBy::Name,
            SortPreset::HighestRated | SortPreset::LowestRated => SortBy::AverageRating,
        }
    }

    pub fn sort_order(&self) -> SortOrder {
        match self {
            SortPreset::NameAsc | SortPreset::LowestRated => SortOrder::Asc,
            SortPreset::NameDesc | SortPreset::HighestRated => SortOrder::Desc,
        }
    }

    /// Option key in `<sortBy>-<sortOrder>` form
    pub fn key(&self) -> String {
        format!("{}-{}", self.sort_by().as_str(), self.sort_order().as_str())
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortPreset::NameAsc => "Name (A-Z)",
            SortPreset::NameDesc => "Name (Z-A)",
            SortPreset::HighestRated => "Highest Rated",
            SortPreset::LowestRated => "Lowest Rated",
        }
    }

    /// Find the preset matching a sort field and direction
    pub fn from_parts(sort_by: SortBy, sort_order: SortOrder) -> Self {
        match (sort_by, sort_order) {
            (SortBy::Name, SortOrder::Asc) => SortPreset::NameAsc,
            (SortBy::Name, SortOrder::Desc) => SortPreset::NameDesc,
            (SortBy::AverageRating, SortOrder::Desc) => SortPreset::HighestRated,
            (SortBy::AverageRating, SortOrder::Asc) => SortPreset::LowestRated,
        }
    }
}

impl FromStr for SortPreset {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.key() == s)
            .ok_or_else(|| ModelError::UnknownSortPreset(s.to_string()))
    }
}

/// Search and sort inputs of the store listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreQuery {
    pub search: String,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl StoreQuery {
    pub fn preset(&self) -> SortPreset {
        SortPreset::from_parts(self.sort_by, self.sort_order)
    }

    pub fn apply_preset(&mut self, preset: SortPreset) {
        self.sort_by = preset.sort_by();
        self.sort_order = preset.sort_order();
    }

    /// Query parameters for `GET /stores`; `search` is omitted when empty
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        pairs.push(("sortBy", self.sort_by.as_str().to_string()));
        pairs.push(("sortOrder", self.sort_order.as_str().to_string()));
        pairs
    }

    /// Encoded query string without the leading `?`
    pub fn to_query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Errors constructing domain values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Unknown sort option: {0}")]
    UnknownSortPreset(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Text(String),
}

fn lenient_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr + Default,
    T::Err: fmt::Display,
{
    match Option::<Lenient<T>>::deserialize(deserializer)? {
        None => Ok(T::default()),
        Some(Lenient::Value(value)) => Ok(value),
        Some(Lenient::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Ok(T::default())
            } else {
                text.parse().map_err(de::Error::custom)
            }
        }
    }
}

/// A count that may also arrive as an integral float such as `2.0`
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: f64 = lenient_number(deserializer)?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Ok(value as u64)
    } else {
        Err(de::Error::custom(format!("invalid count: {}", value)))
    }
}
