//! Store Rating REST API Client
//!
//! HTTP access to the rating backend. Views depend on the [`RatingApi`]
//! trait; [`HttpRatingClient`] is the reqwest implementation.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::models::{Rating, RatingSubmission, Store, StoreQuery};

/// Operations the views need from the rating backend
#[async_trait]
pub trait RatingApi: Send + Sync {
    /// `GET /ratings/user`: every rating of the authenticated user
    async fn user_ratings(&self) -> Result<Vec<Rating>, ApiError>;

    /// `GET /stores`: the store listing, filtered and sorted when a query
    /// is given, in the backend's default order otherwise
    async fn stores(&self, query: Option<&StoreQuery>) -> Result<Vec<Store>, ApiError>;

    /// `POST /ratings`: create or update the user's rating of a store
    async fn submit_rating(&self, submission: &RatingSubmission) -> Result<(), ApiError>;
}

/// reqwest-backed [`RatingApi`]
pub struct HttpRatingClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpRatingClient {
    /// Create a client for the configured backend
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Replace the bearer token sent with every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.authorize(request).send().await.map_err(classify)?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.message)
                .filter(|m| !m.is_empty());
            tracing::debug!(status, ?message, "Rating API returned an error");
            Err(ApiError::Api { status, message })
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.send(self.client.get(url)).await?;
        let bytes = response.bytes().await.map_err(classify)?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RatingApi for HttpRatingClient {
    async fn user_ratings(&self) -> Result<Vec<Rating>, ApiError> {
        let url = format!("{}/ratings/user", self.base_url);
        self.get_json(&url).await
    }

    async fn stores(&self, query: Option<&StoreQuery>) -> Result<Vec<Store>, ApiError> {
        let url = match query {
            Some(query) => format!("{}/stores?{}", self.base_url, query.to_query_string()),
            None => format!("{}/stores", self.base_url),
        };
        self.get_json(&url).await
    }

    async fn submit_rating(&self, submission: &RatingSubmission) -> Result<(), ApiError> {
        let url = format!("{}/ratings", self.base_url);
        self.send(self.client.post(&url).json(submission)).await?;
        tracing::info!(
            store_id = %submission.store_id,
            rating = submission.rating.get(),
            "Rating submitted"
        );
        Ok(())
    }
}

fn classify(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if e.is_connect() {
        ApiError::Unavailable
    } else {
        ApiError::Request(e)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Errors that can occur when talking to the rating backend
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Rating service unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message supplied by the backend, suitable for showing to the user
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ApiError::Api {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}
