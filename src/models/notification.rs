use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{rota::StaffMember, AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub id: i32,
    pub staff: StaffMember,
    pub message: String,
    pub shift_id: Option<Uuid>,
    pub swap_request_id: Option<i32>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct NotificationRow {
    pub id: i32,
    pub staff: String,
    pub message: String,
    pub shift_id: Option<Uuid>,
    pub swap_request_id: Option<i32>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = AppError;

    fn try_from(row: NotificationRow) -> AppResult<Self> {
        let staff = row.staff.parse().map_err(|e: crate::rota::UnknownStaff| {
            AppError::Internal(format!("Stored notification {} is invalid: {}", row.id, e))
        })?;

        Ok(Notification {
            id: row.id,
            staff,
            message: row.message,
            shift_id: row.shift_id,
            swap_request_id: row.swap_request_id,
            is_read: row.is_read,
            created_at: row.created_at,
        })
    }
}

/// Response for notification mutations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationMutationResponse {
    pub success: bool,
    pub message: Option<String>,
}
