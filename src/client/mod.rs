/// Recommendation API client
///
/// Wraps the Grok MeetU recommendation endpoints:
/// fetch (GET /recommendations/{user_id}), create (POST /recommendations),
/// update (PUT /recommendations/{user_id}) and delete.
///
/// A 404 on fetch means "no recommendations yet" and drives the session's
/// create fallback; it is mapped to `AppError::NotFound` rather than a
/// generic API error.
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{CreateRecommendationRequest, RecommendationResponse, UpdateRecommendationRequest},
};

/// Trait for recommendation API access, kept narrow so session logic can be
/// tested against a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationApi: Send + Sync {
    /// Fetch existing recommendations for a user
    async fn fetch_recommendations(&self, user_id: &str) -> AppResult<RecommendationResponse>;

    /// Create recommendations for a user with filters and thresholds
    async fn create_recommendations(
        &self,
        request: CreateRecommendationRequest,
    ) -> AppResult<RecommendationResponse>;

    /// Regenerate recommendations for a user with new thresholds
    async fn update_recommendations(
        &self,
        user_id: &str,
        request: UpdateRecommendationRequest,
    ) -> AppResult<RecommendationResponse>;

    /// Delete a user's recommendations, returning the backend's confirmation
    async fn delete_recommendations(&self, user_id: &str) -> AppResult<String>;
}

/// FastAPI error body
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Confirmation body of DELETE /recommendations/{user_id}
#[derive(Debug, Deserialize)]
struct DeleteBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct HttpRecommendationClient {
    http_client: HttpClient,
    base_url: String,
}

impl HttpRecommendationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Maps a non-success response to an `AppError`, extracting the
    /// structured `detail` field when the body carries one.
    async fn error_from_response(response: reqwest::Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail)
            .unwrap_or_default();

        tracing::debug!(status = status.as_u16(), body = %body, "API request failed");

        match status {
            StatusCode::NOT_FOUND => AppError::NotFound(detail),
            StatusCode::CONFLICT => AppError::Conflict(detail),
            _ => AppError::Api {
                status: status.as_u16(),
                detail,
            },
        }
    }
}

#[async_trait::async_trait]
impl RecommendationApi for HttpRecommendationClient {
    async fn fetch_recommendations(&self, user_id: &str) -> AppResult<RecommendationResponse> {
        let url = self.url(&format!("/recommendations/{}", user_id));

        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let parsed: RecommendationResponse = response.json().await?;

        tracing::info!(
            user_id = %user_id,
            results = parsed.recommendations.len(),
            "Fetched existing recommendations"
        );

        Ok(parsed)
    }

    async fn create_recommendations(
        &self,
        request: CreateRecommendationRequest,
    ) -> AppResult<RecommendationResponse> {
        let url = self.url("/recommendations");

        let response = self.http_client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let parsed: RecommendationResponse = response.json().await?;

        tracing::info!(
            user_id = %request.user_id,
            results = parsed.recommendations.len(),
            "Created recommendations"
        );

        Ok(parsed)
    }

    async fn update_recommendations(
        &self,
        user_id: &str,
        request: UpdateRecommendationRequest,
    ) -> AppResult<RecommendationResponse> {
        let url = self.url(&format!("/recommendations/{}", user_id));

        let response = self.http_client.put(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let parsed: RecommendationResponse = response.json().await?;

        tracing::info!(
            user_id = %user_id,
            results = parsed.recommendations.len(),
            "Updated recommendations"
        );

        Ok(parsed)
    }

    async fn delete_recommendations(&self, user_id: &str) -> AppResult<String> {
        let url = self.url(&format!("/recommendations/{}", user_id));

        let response = self.http_client.delete(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let parsed: DeleteBody = response.json().await?;

        Ok(parsed
            .message
            .unwrap_or_else(|| format!("Recommendations cleared for user {}", user_id)))
    }
}
