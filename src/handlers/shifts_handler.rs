use axum::{
    extract::{Path, State},
    Json,
};
use metrics::counter;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    handlers::rosters_handler::invalidate_rosters_cache,
    models::{RosterShift, ShiftRow, UpdateShiftInput},
    rota, AppError, AppResult, AppState,
};

pub(crate) const SHIFT_COLUMNS: &str =
    "uuid, roster_id, shift_key, date, weekday, category, label, hours, assignee, eligible";

/// GET /api/shifts/{uuid}
#[utoipa::path(
    get,
    path = "/api/shifts/{uuid}",
    params(
        ("uuid" = Uuid, Path, description = "Shift UUID")
    ),
    responses(
        (status = 200, description = "The shift", body = RosterShift),
        (status = 404, description = "Shift not found")
    ),
    tag = "shifts"
)]
pub async fn get_shift(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<Uuid>,
) -> AppResult<Json<RosterShift>> {
    let row = sqlx::query_as::<_, ShiftRow>(&format!(
        r#"SELECT {} FROM "Shifts" WHERE uuid = $1"#,
        SHIFT_COLUMNS
    ))
    .bind(uuid)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Shift {} not found", uuid)))?;

    Ok(Json(row.into_roster_shift()?))
}

/// PUT /api/shifts/{uuid} - Reassign (or unassign) a shift
#[utoipa::path(
    put,
    path = "/api/shifts/{uuid}",
    params(
        ("uuid" = Uuid, Path, description = "Shift UUID")
    ),
    request_body = UpdateShiftInput,
    responses(
        (status = 200, description = "Shift updated", body = RosterShift),
        (status = 404, description = "Shift not found"),
        (status = 409, description = "Shift is locked to its only eligible staff member"),
        (status = 422, description = "Staff member is not eligible for this shift")
    ),
    tag = "shifts"
)]
pub async fn update_shift(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<Uuid>,
    Json(input): Json<UpdateShiftInput>,
) -> AppResult<Json<RosterShift>> {
    let policy = state.config.assignment_policy();
    let mut tx = state.db.begin().await?;

    let mut shift = lock_shift(&mut tx, uuid).await?;
    let previous = shift.shift.assignee;

    rota::apply_assignment(&mut shift.shift, input.assignee, &policy).map_err(|e| {
        tracing::warn!(shift = %uuid, error = %e, "Rejected shift reassignment");
        e
    })?;

    store_assignee(&mut tx, &shift).await?;

    tx.commit().await.map_err(|e| {
        tracing::error!(error = %e, shift = %uuid, "Transaction rollback in update_shift");
        AppError::Internal(format!("Failed to update shift {}: {}", uuid, e))
    })?;

    invalidate_rosters_cache().await;
    counter!("shift_assignments_total", "source" => "manual").increment(1);
    tracing::info!(
        shift = %uuid,
        roster_id = shift.roster_id,
        from = ?previous,
        to = ?shift.shift.assignee,
        "Shift reassigned"
    );

    Ok(Json(shift))
}

/// Fetch a shift and lock its row for the rest of the transaction.
pub(crate) async fn lock_shift(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    uuid: Uuid,
) -> AppResult<RosterShift> {
    sqlx::query_as::<_, ShiftRow>(&format!(
        r#"SELECT {} FROM "Shifts" WHERE uuid = $1 FOR UPDATE"#,
        SHIFT_COLUMNS
    ))
    .bind(uuid)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Shift {} not found", uuid)))?
    .into_roster_shift()
}

/// Persist the shift's assignee and bump the owning roster's version.
pub(crate) async fn store_assignee(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    shift: &RosterShift,
) -> AppResult<()> {
    sqlx::query(r#"UPDATE "Shifts" SET assignee = $1 WHERE uuid = $2"#)
        .bind(shift.shift.assignee.map(|s| s.code()))
        .bind(shift.uuid)
        .execute(&mut **tx)
        .await?;

    sqlx::query(r#"UPDATE "Rosters" SET updated_at = NOW(), version = version + 1 WHERE id = $1"#)
        .bind(shift.roster_id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}
