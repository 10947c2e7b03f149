use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::rota::StaffMember;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StaffOption {
    pub code: StaffMember,
    pub name: String,
}

/// GET /api/staff
#[utoipa::path(
    get,
    path = "/api/staff",
    responses(
        (status = 200, description = "All staff members in canonical order", body = Vec<StaffOption>)
    ),
    tag = "staff"
)]
pub async fn get_staff() -> Json<Vec<StaffOption>> {
    Json(
        StaffMember::ALL
            .iter()
            .map(|&code| StaffOption {
                code,
                name: code.display_name().to_string(),
            })
            .collect(),
    )
}
