use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    rota::{StaffMember, SwapStatus},
    AppError, AppResult,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SwapRequest {
    pub id: i32,
    pub shift_id: Uuid,
    pub roster_id: i32,
    pub shift_date: NaiveDate,
    pub shift_label: String,
    pub from_staff: StaffMember,
    pub to_staff: StaffMember,
    pub status: SwapStatus,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, FromRow)]
pub struct SwapRequestRow {
    pub id: i32,
    pub shift_id: Uuid,
    pub roster_id: i32,
    pub shift_date: NaiveDate,
    pub shift_label: String,
    pub from_staff: String,
    pub to_staff: String,
    pub status: String,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl TryFrom<SwapRequestRow> for SwapRequest {
    type Error = AppError;

    fn try_from(row: SwapRequestRow) -> AppResult<Self> {
        let invalid = |e: String| AppError::Internal(format!("Stored swap request {} is invalid: {}", row.id, e));

        Ok(SwapRequest {
            id: row.id,
            shift_id: row.shift_id,
            roster_id: row.roster_id,
            shift_date: row.shift_date,
            shift_label: row.shift_label.clone(),
            from_staff: row.from_staff.parse().map_err(|e: crate::rota::UnknownStaff| invalid(e.to_string()))?,
            to_staff: row.to_staff.parse().map_err(|e: crate::rota::UnknownStaff| invalid(e.to_string()))?,
            status: row.status.parse().map_err(|e: crate::rota::SwapError| invalid(e.to_string()))?,
            reason: row.reason.clone(),
            created_at: row.created_at,
            responded_at: row.responded_at,
        })
    }
}

/// Input for proposing a swap
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSwapRequestInput {
    pub shift_id: Uuid,
    pub from_staff: StaffMember,
    pub to_staff: StaffMember,
    pub reason: Option<String>,
}

/// Input for approving or rejecting a swap
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RespondSwapInput {
    pub approve: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> SwapRequestRow {
        SwapRequestRow {
            id: 3,
            shift_id: Uuid::nil(),
            roster_id: 1,
            shift_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            shift_label: "24h".to_string(),
            from_staff: "A".to_string(),
            to_staff: "L".to_string(),
            status: status.to_string(),
            reason: Some("Leave".to_string()),
            created_at: Utc::now(),
            responded_at: None,
        }
    }

    #[test]
    fn test_row_conversion() {
        let swap = SwapRequest::try_from(row("PENDING")).unwrap();
        assert_eq!(swap.from_staff, StaffMember::A);
        assert_eq!(swap.to_staff, StaffMember::L);
        assert_eq!(swap.status, SwapStatus::Pending);
    }

    #[test]
    fn test_unknown_status_is_internal_error() {
        assert!(matches!(
            SwapRequest::try_from(row("LOST")),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_create_input_camel_case() {
        let parsed: CreateSwapRequestInput = serde_json::from_str(
            r#"{"shiftId":"00000000-0000-0000-0000-000000000000","fromStaff":"A","toStaff":"P"}"#,
        )
        .unwrap();
        assert_eq!(parsed.to_staff, StaffMember::P);
        assert!(parsed.reason.is_none());
    }
}
