/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("API error (status {status}): {detail}")]
    Api { status: u16, detail: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Fallback shown when the failure carries no usable detail
pub const GENERIC_ERROR_MESSAGE: &str = "Failed to fetch recommendations";

impl AppError {
    /// The string surfaced to the user.
    ///
    /// Prefers the backend's structured `detail` field; transport failures
    /// without one collapse to a generic message (raw detail goes to the log).
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound(detail)
            | AppError::Conflict(detail)
            | AppError::Api { detail, .. }
            | AppError::InvalidInput(detail)
                if !detail.is_empty() =>
            {
                detail.clone()
            }
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_detail() {
        let err = AppError::Api {
            status: 500,
            detail: "No trained model available".to_string(),
        };
        assert_eq!(err.user_message(), "No trained model available");
    }

    #[test]
    fn test_user_message_falls_back_when_detail_empty() {
        let err = AppError::Api {
            status: 502,
            detail: String::new(),
        };
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_user_message_generic_for_internal() {
        let err = AppError::Internal("join error".to_string());
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_user_message_generic_for_not_found_without_detail() {
        let err = AppError::NotFound(String::new());
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }
}
