use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue},
    response::IntoResponse,
    Json,
};
use metrics::counter;
use moka::future::Cache;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    handlers::shifts_handler::SHIFT_COLUMNS,
    models::{
        GenerateRosterInput, Roster, RosterComparison, RosterHours, RosterMutationResponse, RosterPreview,
        RosterShift, RosterSummary, ShiftRow,
    },
    rota::{self, Shift},
    AppError, AppResult, AppState,
};

// Cache the roster list with 60-second TTL
static ROSTERS_CACHE: Lazy<Cache<&'static str, Vec<RosterSummary>>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(60))
        .build()
});

pub(crate) async fn invalidate_rosters_cache() {
    ROSTERS_CACHE.invalidate(&"all").await;
}

const ROSTER_COLUMNS: &str =
    "id, name, start_date, end_date, weeks, is_active, version, created_at, updated_at";

#[derive(Debug, Deserialize, IntoParams)]
pub struct CompareRostersQuery {
    /// Baseline roster
    pub a: i32,
    /// Roster compared against the baseline
    pub b: i32,
}

/// GET /api/rosters
#[utoipa::path(
    get,
    path = "/api/rosters",
    responses(
        (status = 200, description = "All rosters, newest first", body = Vec<RosterSummary>)
    ),
    tag = "rosters"
)]
pub async fn list_rosters(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<RosterSummary>>> {
    if let Some(cached) = ROSTERS_CACHE.get(&"all").await {
        return Ok(Json(cached));
    }

    let rosters = sqlx::query_as::<_, RosterSummary>(&format!(
        r#"SELECT {} FROM "Rosters" ORDER BY created_at DESC, id DESC"#,
        ROSTER_COLUMNS
    ))
    .fetch_all(&state.db)
    .await?;

    ROSTERS_CACHE.insert("all", rosters.clone()).await;
    Ok(Json(rosters))
}

/// POST /api/rosters/preview - Generate a roster without storing it
#[utoipa::path(
    post,
    path = "/api/rosters/preview",
    request_body = GenerateRosterInput,
    responses(
        (status = 200, description = "Generated shifts and hours per staff member", body = RosterPreview),
        (status = 400, description = "weeks outside 1-12")
    ),
    tag = "rosters"
)]
pub async fn preview_roster(Json(input): Json<GenerateRosterInput>) -> AppResult<Json<RosterPreview>> {
    input.validate()?;
    Ok(Json(build_preview(&input)))
}

fn build_preview(input: &GenerateRosterInput) -> RosterPreview {
    let start_date = rota::align_to_monday(input.start_date);
    let shifts = rota::generate(start_date, input.weeks);
    let hours = rota::summarize(&shifts);

    RosterPreview {
        start_date,
        end_date: rota::end_date(start_date, input.weeks),
        weeks: input.weeks,
        shifts,
        hours,
    }
}

/// POST /api/rosters - Generate and store a roster
#[utoipa::path(
    post,
    path = "/api/rosters",
    request_body = GenerateRosterInput,
    responses(
        (status = 200, description = "Roster generated and stored", body = Roster),
        (status = 400, description = "weeks outside 1-12")
    ),
    tag = "rosters"
)]
pub async fn create_roster(
    State(state): State<Arc<AppState>>,
    Json(input): Json<GenerateRosterInput>,
) -> AppResult<Json<Roster>> {
    input.validate()?;

    let preview = build_preview(&input);
    let name = input.roster_name(preview.start_date);

    let mut tx = state.db.begin().await?;

    if input.activate {
        sqlx::query(r#"UPDATE "Rosters" SET is_active = false, updated_at = NOW() WHERE is_active"#)
            .execute(&mut *tx)
            .await?;
    }

    let summary = sqlx::query_as::<_, RosterSummary>(&format!(
        r#"
        INSERT INTO "Rosters" (name, start_date, end_date, weeks, is_active)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {}
        "#,
        ROSTER_COLUMNS
    ))
    .bind(&name)
    .bind(preview.start_date)
    .bind(preview.end_date)
    .bind(preview.weeks as i32)
    .bind(input.activate)
    .fetch_one(&mut *tx)
    .await?;

    let mut shifts = Vec::with_capacity(preview.shifts.len());
    for shift in preview.shifts {
        let uuid = insert_shift(&mut tx, summary.id, &shift).await?;
        shifts.push(RosterShift {
            uuid,
            roster_id: summary.id,
            shift,
        });
    }

    tx.commit().await.map_err(|e| {
        tracing::error!(error = %e, roster_id = summary.id, "Transaction rollback in create_roster");
        AppError::Internal(format!("Failed to commit roster {}: {}", summary.id, e))
    })?;

    invalidate_rosters_cache().await;
    counter!("rosters_generated_total").increment(1);
    tracing::info!(
        roster_id = summary.id,
        start = %summary.start_date,
        weeks = summary.weeks,
        shifts = shifts.len(),
        active = summary.is_active,
        "Roster generated"
    );

    Ok(Json(Roster { summary, shifts }))
}

async fn insert_shift(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    roster_id: i32,
    shift: &Shift,
) -> AppResult<Uuid> {
    let uuid = Uuid::new_v4();
    let eligible: Vec<String> = shift.eligible.iter().map(|s| s.code().to_string()).collect();

    sqlx::query(
        r#"
        INSERT INTO "Shifts" (
            uuid, roster_id, shift_key, date, weekday, category, label, hours, assignee, eligible
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(uuid)
    .bind(roster_id)
    .bind(&shift.id)
    .bind(shift.date)
    .bind(&shift.weekday)
    .bind(shift.category.slug())
    .bind(&shift.label)
    .bind(shift.hours as i32)
    .bind(shift.assignee.map(|s| s.code()))
    .bind(eligible)
    .execute(&mut **tx)
    .await?;

    Ok(uuid)
}

/// GET /api/rosters/active
#[utoipa::path(
    get,
    path = "/api/rosters/active",
    responses(
        (status = 200, description = "The active roster with its shifts", body = Roster),
        (status = 404, description = "No roster is active")
    ),
    tag = "rosters"
)]
pub async fn get_active_roster(State(state): State<Arc<AppState>>) -> AppResult<Json<Roster>> {
    let summary = sqlx::query_as::<_, RosterSummary>(&format!(
        r#"SELECT {} FROM "Rosters" WHERE is_active"#,
        ROSTER_COLUMNS
    ))
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("No active roster".to_string()))?;

    let shifts = fetch_roster_shifts(&state.db, summary.id).await?;
    Ok(Json(Roster { summary, shifts }))
}

/// GET /api/rosters/{id}
#[utoipa::path(
    get,
    path = "/api/rosters/{id}",
    params(
        ("id" = i32, Path, description = "Roster ID")
    ),
    responses(
        (status = 200, description = "Roster with its shifts", body = Roster),
        (status = 404, description = "Roster not found")
    ),
    tag = "rosters"
)]
pub async fn get_roster(
    State(state): State<Arc<AppState>>,
    Path(roster_id): Path<i32>,
) -> AppResult<Json<Roster>> {
    Ok(Json(fetch_roster(&state.db, roster_id).await?))
}

/// PUT /api/rosters/{id}/activate - Make this the only active roster
#[utoipa::path(
    put,
    path = "/api/rosters/{id}/activate",
    params(
        ("id" = i32, Path, description = "Roster ID")
    ),
    responses(
        (status = 200, description = "Roster activated", body = RosterMutationResponse),
        (status = 401, description = "Missing or invalid admin key"),
        (status = 404, description = "Roster not found")
    ),
    tag = "rosters",
    security(("admin_key" = []))
)]
pub async fn activate_roster(
    State(state): State<Arc<AppState>>,
    Path(roster_id): Path<i32>,
) -> AppResult<Json<RosterMutationResponse>> {
    let mut tx = state.db.begin().await?;

    // Deactivate first so the single-active index is never violated.
    sqlx::query(r#"UPDATE "Rosters" SET is_active = false, updated_at = NOW() WHERE is_active AND id <> $1"#)
        .bind(roster_id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query(r#"UPDATE "Rosters" SET is_active = true, updated_at = NOW() WHERE id = $1"#)
        .bind(roster_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Roster {} not found", roster_id)));
    }

    tx.commit().await.map_err(|e| {
        tracing::error!(error = %e, roster_id, "Transaction rollback in activate_roster");
        AppError::Internal(format!("Failed to activate roster {}: {}", roster_id, e))
    })?;

    invalidate_rosters_cache().await;
    tracing::info!(roster_id, "Roster activated");

    Ok(Json(RosterMutationResponse {
        success: true,
        message: Some(format!("Roster {} is now active", roster_id)),
    }))
}

/// DELETE /api/rosters/{id} - Delete a roster and everything attached to it
#[utoipa::path(
    delete,
    path = "/api/rosters/{id}",
    params(
        ("id" = i32, Path, description = "Roster ID")
    ),
    responses(
        (status = 200, description = "Roster deleted", body = RosterMutationResponse),
        (status = 401, description = "Missing or invalid admin key"),
        (status = 404, description = "Roster not found")
    ),
    tag = "rosters",
    security(("admin_key" = []))
)]
pub async fn delete_roster(
    State(state): State<Arc<AppState>>,
    Path(roster_id): Path<i32>,
) -> AppResult<Json<RosterMutationResponse>> {
    // Shifts, swap requests and notifications go with it via ON DELETE CASCADE.
    let result = sqlx::query(r#"DELETE FROM "Rosters" WHERE id = $1"#)
        .bind(roster_id)
        .execute(&state.db)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, roster_id, "Failed to delete roster");
            e
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Roster {} not found", roster_id)));
    }

    invalidate_rosters_cache().await;
    tracing::info!(roster_id, "Roster deleted");

    Ok(Json(RosterMutationResponse {
        success: true,
        message: Some("Roster deleted successfully".to_string()),
    }))
}

/// GET /api/rosters/{id}/hours
#[utoipa::path(
    get,
    path = "/api/rosters/{id}/hours",
    params(
        ("id" = i32, Path, description = "Roster ID")
    ),
    responses(
        (status = 200, description = "Total hours and shift count per staff member", body = RosterHours),
        (status = 404, description = "Roster not found")
    ),
    tag = "rosters"
)]
pub async fn get_roster_hours(
    State(state): State<Arc<AppState>>,
    Path(roster_id): Path<i32>,
) -> AppResult<Json<RosterHours>> {
    let roster = fetch_roster(&state.db, roster_id).await?;

    Ok(Json(RosterHours {
        roster_id,
        hours: rota::summarize(&roster.plain_shifts()),
    }))
}

/// GET /api/rosters/compare?a=&b=
#[utoipa::path(
    get,
    path = "/api/rosters/compare",
    params(CompareRostersQuery),
    responses(
        (status = 200, description = "Slot-by-slot comparison of two rosters", body = RosterComparison),
        (status = 404, description = "Roster not found")
    ),
    tag = "rosters"
)]
pub async fn compare_rosters(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CompareRostersQuery>,
) -> AppResult<Json<RosterComparison>> {
    let a = fetch_roster(&state.db, query.a).await?;
    let b = fetch_roster(&state.db, query.b).await?;

    let entries = rota::diff(&a.plain_shifts(), &b.plain_shifts());
    let changed = rota::changed_count(&entries);
    tracing::debug!(roster_a = query.a, roster_b = query.b, changed, "Compared rosters");

    Ok(Json(RosterComparison {
        roster_a: query.a,
        roster_b: query.b,
        changed,
        entries,
    }))
}

/// GET /api/rosters/{id}/export - Download the roster as CSV
#[utoipa::path(
    get,
    path = "/api/rosters/{id}/export",
    params(
        ("id" = i32, Path, description = "Roster ID")
    ),
    responses(
        (status = 200, description = "One row per shift followed by an hours summary", content_type = "text/csv", body = String),
        (status = 404, description = "Roster not found")
    ),
    tag = "rosters"
)]
pub async fn export_roster(
    State(state): State<Arc<AppState>>,
    Path(roster_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let roster = fetch_roster(&state.db, roster_id).await?;

    let body = rota::export_csv(&roster.plain_shifts()).map_err(|e| {
        tracing::error!(error = %e, roster_id, "Failed to render roster export");
        AppError::Internal(format!("Failed to export roster {}: {}", roster_id, e))
    })?;

    let filename = format!("roster-{}-{}.csv", roster_id, roster.summary.start_date.format("%Y-%m-%d"));
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
        .map_err(|e| AppError::Internal(format!("Invalid export filename: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

async fn fetch_roster(db: &sqlx::PgPool, roster_id: i32) -> AppResult<Roster> {
    let summary = sqlx::query_as::<_, RosterSummary>(&format!(
        r#"SELECT {} FROM "Rosters" WHERE id = $1"#,
        ROSTER_COLUMNS
    ))
    .bind(roster_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Roster {} not found", roster_id)))?;

    let shifts = fetch_roster_shifts(db, roster_id).await?;
    Ok(Roster { summary, shifts })
}

async fn fetch_roster_shifts(db: &sqlx::PgPool, roster_id: i32) -> AppResult<Vec<RosterShift>> {
    // 'day' sorts before 'night'; weekdays only carry '24h'.
    let rows = sqlx::query_as::<_, ShiftRow>(&format!(
        r#"SELECT {} FROM "Shifts" WHERE roster_id = $1 ORDER BY date, category"#,
        SHIFT_COLUMNS
    ))
    .bind(roster_id)
    .fetch_all(db)
    .await?;

    rows.into_iter().map(ShiftRow::into_roster_shift).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_preview_aligns_start_and_summarizes() {
        let input = GenerateRosterInput {
            name: None,
            start_date: NaiveDate::from_ymd_opt(2024, 6, 7).unwrap(),
            weeks: 2,
            activate: false,
        };

        let preview = build_preview(&input);
        assert_eq!(preview.start_date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(preview.end_date, NaiveDate::from_ymd_opt(2024, 6, 16).unwrap());
        assert_eq!(preview.shifts.len(), 18);
        assert_eq!(preview.hours.len(), 4);
        assert_eq!(
            preview.hours.iter().map(|h| h.total_hours).sum::<u32>(),
            preview.shifts.iter().map(|s| s.hours).sum::<u32>()
        );
    }
}
