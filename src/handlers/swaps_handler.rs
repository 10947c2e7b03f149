use axum::{
    extract::{Path, Query, State},
    Json,
};
use metrics::counter;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::{
    handlers::{
        notifications_handler::notify,
        rosters_handler::invalidate_rosters_cache,
        shifts_handler::{lock_shift, store_assignee},
    },
    models::{CreateSwapRequestInput, RespondSwapInput, SwapRequest, SwapRequestRow},
    rota::{self, SwapStatus},
    AppError, AppResult, AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetSwapsQuery {
    /// PENDING, APPROVED or REJECTED
    pub status: Option<String>,
    #[serde(rename = "rosterId")]
    pub roster_id: Option<i32>,
}

const SWAP_BASE_QUERY: &str = r#"
    SELECT
        sr.id,
        sr.shift_id,
        s.roster_id,
        s.date AS shift_date,
        s.label AS shift_label,
        sr.from_staff,
        sr.to_staff,
        sr.status,
        sr.reason,
        sr.created_at,
        sr.responded_at
    FROM "SwapRequests" sr
    INNER JOIN "Shifts" s ON sr.shift_id = s.uuid
"#;

/// GET /api/swaps?status=&rosterId=
#[utoipa::path(
    get,
    path = "/api/swaps",
    params(GetSwapsQuery),
    responses(
        (status = 200, description = "Swap requests, newest first", body = Vec<SwapRequest>),
        (status = 400, description = "Unknown status filter")
    ),
    tag = "swaps"
)]
pub async fn get_swaps(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetSwapsQuery>,
) -> AppResult<Json<Vec<SwapRequest>>> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<SwapStatus>)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let rows = sqlx::query_as::<_, SwapRequestRow>(&format!(
        r#"{} WHERE ($1::text IS NULL OR sr.status = $1) AND ($2::int4 IS NULL OR s.roster_id = $2)
        ORDER BY sr.created_at DESC, sr.id DESC"#,
        SWAP_BASE_QUERY
    ))
    .bind(status.map(SwapStatus::as_str))
    .bind(query.roster_id)
    .fetch_all(&state.db)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch swap requests");
        e
    })?;

    tracing::debug!(count = rows.len(), "Fetched swap requests");
    let swaps = rows
        .into_iter()
        .map(SwapRequest::try_from)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(swaps))
}

/// POST /api/swaps - Propose moving a shift to another staff member
#[utoipa::path(
    post,
    path = "/api/swaps",
    request_body = CreateSwapRequestInput,
    responses(
        (status = 200, description = "Swap request created", body = SwapRequest),
        (status = 400, description = "fromStaff does not hold the shift, or fromStaff equals toStaff"),
        (status = 404, description = "Shift not found"),
        (status = 422, description = "toStaff is not eligible for the shift")
    ),
    tag = "swaps"
)]
pub async fn create_swap_request(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateSwapRequestInput>,
) -> AppResult<Json<SwapRequest>> {
    let policy = state.config.assignment_policy();
    let mut tx = state.db.begin().await?;

    let shift = lock_shift(&mut tx, input.shift_id).await?;
    rota::check_swap_proposal(&shift.shift, input.from_staff, input.to_staff, &policy)?;

    let (swap_id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO "SwapRequests" (shift_id, from_staff, to_staff, status, reason)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(shift.uuid)
    .bind(input.from_staff.code())
    .bind(input.to_staff.code())
    .bind(SwapStatus::Pending.as_str())
    .bind(&input.reason)
    .fetch_one(&mut *tx)
    .await?;

    let message = format!(
        "{} asked you to take the {} shift on {}",
        input.from_staff,
        shift.shift.label,
        shift.shift.date.format("%A %d %B %Y")
    );
    notify(&mut tx, input.to_staff, &message, Some(shift.uuid), Some(swap_id)).await?;

    tx.commit().await.map_err(|e| {
        tracing::error!(error = %e, shift = %shift.uuid, "Transaction rollback in create_swap_request");
        AppError::Internal(format!("Failed to create swap request: {}", e))
    })?;

    counter!("swap_requests_total", "outcome" => "created").increment(1);
    tracing::info!(
        swap_id,
        shift = %shift.uuid,
        from = input.from_staff.code(),
        to = input.to_staff.code(),
        "Swap request created"
    );

    let swap = fetch_swap_request(&state.db, swap_id).await?;
    Ok(Json(swap))
}

/// POST /api/swaps/{id}/respond - Approve or reject a pending swap
#[utoipa::path(
    post,
    path = "/api/swaps/{id}/respond",
    params(
        ("id" = i32, Path, description = "Swap request ID")
    ),
    request_body = RespondSwapInput,
    responses(
        (status = 200, description = "Swap request resolved", body = SwapRequest),
        (status = 401, description = "Missing or invalid admin key"),
        (status = 404, description = "Swap request not found"),
        (status = 409, description = "Swap request already resolved"),
        (status = 422, description = "Target staff member is no longer eligible")
    ),
    tag = "swaps",
    security(("admin_key" = []))
)]
pub async fn respond_to_swap_request(
    State(state): State<Arc<AppState>>,
    Path(swap_id): Path<i32>,
    Json(input): Json<RespondSwapInput>,
) -> AppResult<Json<SwapRequest>> {
    let policy = state.config.assignment_policy();
    let mut tx = state.db.begin().await?;

    let current: SwapRequest = sqlx::query_as::<_, SwapRequestRow>(&format!(
        "{} WHERE sr.id = $1 FOR UPDATE OF sr",
        SWAP_BASE_QUERY
    ))
    .bind(swap_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Swap request {} not found", swap_id)))?
    .try_into()?;

    let next = current.status.respond(input.approve)?;

    if next == SwapStatus::Approved {
        let mut shift = lock_shift(&mut tx, current.shift_id).await?;

        // The shift may have been reassigned since the request was made.
        rota::check_swap_proposal(&shift.shift, current.from_staff, current.to_staff, &policy)
            .map_err(|e| {
                tracing::warn!(swap_id, error = %e, "Swap approval failed validation");
                e
            })?;
        rota::apply_assignment(&mut shift.shift, Some(current.to_staff), &policy)?;
        store_assignee(&mut tx, &shift).await?;
    }

    sqlx::query(r#"UPDATE "SwapRequests" SET status = $1, responded_at = NOW() WHERE id = $2"#)
        .bind(next.as_str())
        .bind(swap_id)
        .execute(&mut *tx)
        .await?;

    let outcome = match next {
        SwapStatus::Approved => "approved",
        _ => "rejected",
    };
    let message = format!(
        "Your request to hand the {} shift on {} to {} was {}",
        current.shift_label,
        current.shift_date.format("%A %d %B %Y"),
        current.to_staff,
        outcome
    );
    notify(&mut tx, current.from_staff, &message, Some(current.shift_id), Some(swap_id)).await?;

    tx.commit().await.map_err(|e| {
        tracing::error!(error = %e, swap_id, "Transaction rollback in respond_to_swap_request");
        AppError::Internal(format!("Failed to resolve swap request {}: {}", swap_id, e))
    })?;

    if next == SwapStatus::Approved {
        invalidate_rosters_cache().await;
        counter!("shift_assignments_total", "source" => "swap").increment(1);
    }
    counter!("swap_requests_total", "outcome" => outcome).increment(1);
    tracing::info!(swap_id, outcome, "Swap request resolved");

    let swap = fetch_swap_request(&state.db, swap_id).await?;
    Ok(Json(swap))
}

async fn fetch_swap_request(db: &sqlx::PgPool, swap_id: i32) -> AppResult<SwapRequest> {
    sqlx::query_as::<_, SwapRequestRow>(&format!("{} WHERE sr.id = $1", SWAP_BASE_QUERY))
        .bind(swap_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Swap request {} not found", swap_id)))?
        .try_into()
}
