/// Recommendation form session
///
/// Owns the transient request state (user id, result list, loading flag,
/// error text) and orchestrates the read-then-create-on-miss flow against
/// the recommendation API: fetch existing results first, and only when the
/// backend reports none (404) ask it to create new ones with the current
/// thresholds. Any other failure ends the submission and is surfaced as a
/// single user-visible message.
use crate::{
    client::RecommendationApi,
    error::{AppError, AppResult},
    models::{
        CreateRecommendationRequest, CreditLevel, Recommendation, RecommendationFilter,
        ThresholdConfig, UpdateRecommendationRequest,
    },
};

/// Transient UI state for one user's recommendation session.
///
/// Lives only as long as the session; nothing is persisted across runs.
#[derive(Debug, Clone, Default)]
pub struct RequestState {
    pub user_id: String,
    pub recommendations: Vec<Recommendation>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct Session<A: RecommendationApi> {
    api: A,
    pub state: RequestState,
    thresholds: ThresholdConfig,
    top_k: u32,
}

fn check_unit_range(name: &str, value: f64) -> AppResult<f64> {
    if !(0.0..=1.0).contains(&value) || value.is_nan() {
        return Err(AppError::InvalidInput(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(value)
}

impl<A: RecommendationApi> Session<A> {
    pub fn new(api: A, user_id: impl Into<String>, top_k: u32) -> Self {
        Self {
            api,
            state: RequestState {
                user_id: user_id.into(),
                ..RequestState::default()
            },
            thresholds: ThresholdConfig::default(),
            top_k,
        }
    }

    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        self.state.user_id = user_id.into();
    }

    pub fn set_motivation(&mut self, value: f64) -> AppResult<()> {
        self.thresholds.motivation = check_unit_range("motivation", value)?;
        Ok(())
    }

    pub fn set_pressure(&mut self, value: f64) -> AppResult<()> {
        self.thresholds.pressure = check_unit_range("pressure", value)?;
        Ok(())
    }

    pub fn set_credit_level(&mut self, level: CreditLevel) {
        self.thresholds.credit_level = level;
    }

    /// Submits the current user id and thresholds.
    ///
    /// A submission already in flight wins: the new one is ignored without
    /// touching any state. On a non-404 failure the previous result list is
    /// left as it was.
    pub async fn submit(&mut self) -> AppResult<()> {
        if self.state.loading {
            tracing::warn!(
                user_id = %self.state.user_id,
                "Submission already in flight, ignoring"
            );
            return Ok(());
        }

        if let Err(e) = self.thresholds.validate() {
            self.state.error = Some(e.user_message());
            return Err(e);
        }

        self.state.loading = true;
        self.state.error = None;

        let outcome = self.fetch_or_create().await;

        if let Err(e) = &outcome {
            tracing::error!(
                user_id = %self.state.user_id,
                error = %e,
                "Submission failed"
            );
            self.state.error = Some(e.user_message());
        }
        self.state.loading = false;

        outcome
    }

    async fn fetch_or_create(&mut self) -> AppResult<()> {
        match self.api.fetch_recommendations(&self.state.user_id).await {
            Ok(response) => {
                self.state.recommendations = response.recommendations;
                Ok(())
            }
            Err(AppError::NotFound(detail)) => {
                tracing::info!(
                    user_id = %self.state.user_id,
                    detail = %detail,
                    "No existing recommendations, requesting creation"
                );

                let request = CreateRecommendationRequest {
                    user_id: self.state.user_id.clone(),
                    filters: RecommendationFilter::top_k(self.top_k),
                    thresholds: self.thresholds,
                };
                let response = self.api.create_recommendations(request).await?;
                self.state.recommendations = response.recommendations;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Regenerates the user's recommendations with the current thresholds
    /// (PUT, requires that recommendations already exist).
    pub async fn refresh(&mut self) -> AppResult<()> {
        if self.state.loading {
            tracing::warn!(
                user_id = %self.state.user_id,
                "Submission already in flight, ignoring"
            );
            return Ok(());
        }

        if let Err(e) = self.thresholds.validate() {
            self.state.error = Some(e.user_message());
            return Err(e);
        }

        self.state.loading = true;
        self.state.error = None;

        let request = UpdateRecommendationRequest {
            filters: Some(RecommendationFilter::top_k(self.top_k)),
            thresholds: self.thresholds,
        };
        let outcome = self
            .api
            .update_recommendations(&self.state.user_id, request)
            .await;

        match &outcome {
            Ok(response) => {
                self.state.recommendations = response.recommendations.clone();
            }
            Err(e) => {
                tracing::error!(
                    user_id = %self.state.user_id,
                    error = %e,
                    "Refresh failed"
                );
                self.state.error = Some(e.user_message());
            }
        }
        self.state.loading = false;

        outcome.map(|_| ())
    }

    /// Deletes the user's recommendations and empties the local list.
    pub async fn clear(&mut self) -> AppResult<String> {
        match self.api.delete_recommendations(&self.state.user_id).await {
            Ok(message) => {
                self.state.recommendations.clear();
                self.state.error = None;
                Ok(message)
            }
            Err(e) => {
                self.state.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}
