use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Riot API error: {status} - {message}")]
    RiotApi { status: u16, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Player not found: {game_name}#{tag_line}")]
    PlayerNotFound { game_name: String, tag_line: String },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Assistant is unavailable, no insight could be generated")]
    AssistantUnavailable,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::PlayerNotFound { .. })
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::PlayerNotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidRegion(_) | Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::AssistantUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::RiotApi { .. }
            | Self::Http(_)
            | Self::Database(_)
            | Self::Io(_)
            | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) | Self::PlayerNotFound { .. } => "not_found",
            Self::InvalidRegion(_) | Self::Validation(_) => "validation_failed",
            Self::Conflict(_) => "conflict",
            Self::AssistantUnavailable => "assistant_unavailable",
            Self::RiotApi { .. } | Self::Http(_) => "upstream_failure",
            Self::Database(_) => "database_error",
            Self::Io(_) | Self::Config(_) => "internal_error",
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Upstream failures keep their text so callers can see what Riot said;
        // local failures are only logged.
        let message = match &self {
            Self::Database(_) | Self::Io(_) | Self::Config(_) => {
                tracing::error!("❌ {}", self);
                "An internal error occurred".to_string()
            }
            Self::RiotApi { .. } | Self::Http(_) => {
                tracing::warn!("⚠️ {}", self);
                self.to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_map_to_404() {
        assert_eq!(AppError::NotFound("Match").status(), StatusCode::NOT_FOUND);
        let err = AppError::PlayerNotFound {
            game_name: "Not Alet".into(),
            tag_line: "JCP".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_failure_maps_to_500() {
        let err = AppError::RiotApi {
            status: 503,
            message: "service unavailable".into(),
        };
        assert!(!err.is_not_found());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("service unavailable"));
    }

    #[test]
    fn validation_maps_to_422() {
        assert_eq!(
            AppError::Validation("respawn_seconds".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn assistant_unavailable_maps_to_503() {
        assert_eq!(
            AppError::AssistantUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
