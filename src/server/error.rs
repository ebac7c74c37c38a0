use crate::utils::error::{ErrorCategory, HealthError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

pub const FOOD_FETCH_FAILED: &str = "Failed to fetch food data";

impl HealthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            _ if self.is_client_error() => StatusCode::BAD_REQUEST,
            HealthError::TokenError(_) | HealthError::Unauthorized { .. } => {
                StatusCode::UNAUTHORIZED
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HealthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self.category() {
            ErrorCategory::Upstream => {
                tracing::error!("❌ Error fetching food data: {}", self);
                FOOD_FETCH_FAILED.to_string()
            }
            _ if status.is_server_error() => {
                tracing::error!(
                    "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                    self,
                    self.category(),
                    self.severity()
                );
                self.to_string()
            }
            _ => {
                tracing::debug!("Rejected request: {}", self);
                self.to_string()
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
