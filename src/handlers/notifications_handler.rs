use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    models::{Notification, NotificationMutationResponse, NotificationRow},
    rota::StaffMember,
    AppError, AppResult, AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetNotificationsQuery {
    /// Staff member code (A, P, J or L)
    pub staff: String,
    #[serde(rename = "unreadOnly")]
    pub unread_only: Option<bool>,
}

/// GET /api/notifications?staff=&unreadOnly=
#[utoipa::path(
    get,
    path = "/api/notifications",
    params(GetNotificationsQuery),
    responses(
        (status = 200, description = "Notifications for a staff member, newest first", body = Vec<Notification>),
        (status = 400, description = "Unknown staff member")
    ),
    tag = "notifications"
)]
pub async fn get_notifications(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetNotificationsQuery>,
) -> AppResult<Json<Vec<Notification>>> {
    let staff = query
        .staff
        .parse::<StaffMember>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let rows = sqlx::query_as::<_, NotificationRow>(
        r#"
        SELECT id, staff, message, shift_id, swap_request_id, is_read, created_at
        FROM "Notifications"
        WHERE staff = $1 AND ($2 = false OR is_read = false)
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(staff.code())
    .bind(query.unread_only.unwrap_or(false))
    .fetch_all(&state.db)
    .await?;

    let notifications = rows
        .into_iter()
        .map(Notification::try_from)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(notifications))
}

/// PUT /api/notifications/{id}/read
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    params(
        ("id" = i32, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification marked as read", body = NotificationMutationResponse),
        (status = 404, description = "Notification not found")
    ),
    tag = "notifications"
)]
pub async fn mark_notification_read(
    State(state): State<Arc<AppState>>,
    Path(notification_id): Path<i32>,
) -> AppResult<Json<NotificationMutationResponse>> {
    let result = sqlx::query(r#"UPDATE "Notifications" SET is_read = true WHERE id = $1"#)
        .bind(notification_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Notification {} not found", notification_id)));
    }

    Ok(Json(NotificationMutationResponse {
        success: true,
        message: None,
    }))
}

pub(crate) async fn notify(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    staff: StaffMember,
    message: &str,
    shift_id: Option<Uuid>,
    swap_request_id: Option<i32>,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO "Notifications" (staff, message, shift_id, swap_request_id)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(staff.code())
    .bind(message)
    .bind(shift_id)
    .bind(swap_request_id)
    .execute(&mut **tx)
    .await?;

    tracing::debug!(staff = staff.code(), swap_request_id, "Notification queued");
    Ok(())
}
