use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::error::{AppError, AppResult};

/// Credit level required of recommended chatrooms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditLevel {
    None,
    Partial,
    Full,
}

impl Display for CreditLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreditLevel::None => write!(f, "none"),
            CreditLevel::Partial => write!(f, "partial"),
            CreditLevel::Full => write!(f, "full"),
        }
    }
}

impl std::str::FromStr for CreditLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(CreditLevel::None),
            "partial" => Ok(CreditLevel::Partial),
            "full" => Ok(CreditLevel::Full),
            other => Err(AppError::InvalidInput(format!(
                "Unknown credit level '{}' (expected none, partial or full)",
                other
            ))),
        }
    }
}

/// User-tunable thresholds forwarded verbatim to recommendation creation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub motivation: f64,
    pub pressure: f64,
    pub credit_level: CreditLevel,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            motivation: 0.1,
            pressure: 0.5,
            credit_level: CreditLevel::Partial,
        }
    }
}

impl ThresholdConfig {
    /// Checks numeric thresholds against their declared [0, 1] range.
    ///
    /// Bounds are enforced here rather than trusted from whatever surface
    /// collected the values.
    pub fn validate(&self) -> AppResult<()> {
        if !(0.0..=1.0).contains(&self.motivation) || self.motivation.is_nan() {
            return Err(AppError::InvalidInput(format!(
                "motivation must be within [0, 1], got {}",
                self.motivation
            )));
        }
        if !(0.0..=1.0).contains(&self.pressure) || self.pressure.is_nan() {
            return Err(AppError::InvalidInput(format!(
                "pressure must be within [0, 1], got {}",
                self.pressure
            )));
        }
        Ok(())
    }
}

/// Filters applied by the backend when selecting recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RecommendationFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_vibe_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pressure: Option<i32>,
}

impl RecommendationFilter {
    /// Filter requesting the top `k` recommendations only
    pub fn top_k(k: u32) -> Self {
        Self {
            top_k: Some(k),
            ..Self::default()
        }
    }
}

/// A scored chatroom suggestion returned by the backend.
///
/// Only `chatroom_id` and `predicted_score` are guaranteed; the remaining
/// fields depend on the backend's model version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub chatroom_id: String,
    pub predicted_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivation_match: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_compatibility: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Body of POST /recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecommendationRequest {
    pub user_id: String,
    pub filters: RecommendationFilter,
    pub thresholds: ThresholdConfig,
}

/// Body of PUT /recommendations/{user_id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRecommendationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<RecommendationFilter>,
    pub thresholds: ThresholdConfig,
}

/// Response shape shared by the fetch, create and update endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationResponse {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub filters_applied: Option<RecommendationFilter>,
    #[serde(default)]
    pub model_info: Option<serde_json::Value>,
    #[serde(default)]
    pub cache_info: Option<serde_json::Value>,
}
