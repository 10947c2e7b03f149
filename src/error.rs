use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::rota::{AssignmentError, SwapError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),

    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Validation(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<AssignmentError> for AppError {
    fn from(err: AssignmentError) -> Self {
        if err.is_policy_violation() {
            AppError::Conflict(err.to_string())
        } else {
            AppError::Validation(err.to_string())
        }
    }
}

impl From<SwapError> for AppError {
    fn from(err: SwapError) -> Self {
        match err {
            SwapError::Assignment(e) => e.into(),
            SwapError::AlreadyResolved(_) => AppError::Conflict(err.to_string()),
            SwapError::SameStaff | SwapError::NotCurrentAssignee { .. } => {
                AppError::BadRequest(err.to_string())
            }
            SwapError::UnknownStatus(_) => AppError::Internal(err.to_string()),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rota::StaffMember;

    fn status_of(err: impl Into<AppError>) -> StatusCode {
        let err: AppError = err.into();
        err.into_response().status()
    }

    #[test]
    fn test_assignment_errors_are_client_errors() {
        let not_eligible = AssignmentError::NotEligible {
            shift_id: "2024-06-09-day".into(),
            staff: StaffMember::J,
        };
        let locked = AssignmentError::LockedShift {
            shift_id: "2024-06-08-day".into(),
        };

        assert_eq!(status_of(not_eligible), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_of(locked), StatusCode::CONFLICT);
    }

    #[test]
    fn test_swap_errors_map_to_status() {
        assert_eq!(status_of(SwapError::AlreadyResolved("approved")), StatusCode::CONFLICT);
        assert_eq!(status_of(SwapError::SameStaff), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(SwapError::UnknownStatus("X".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_is_404() {
        assert_eq!(status_of(AppError::NotFound("Roster 9".into())), StatusCode::NOT_FOUND);
    }
}
