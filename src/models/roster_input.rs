use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{rota::StaffMember, AppError, AppResult};

/// Longest roster that can be generated in one request.
pub const MAX_WEEKS: u32 = 12;

/// Input for generating a roster
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRosterInput {
    pub name: Option<String>,
    pub start_date: NaiveDate,
    pub weeks: u32,
    #[serde(default)]
    pub activate: bool,
}

impl GenerateRosterInput {
    pub fn validate(&self) -> AppResult<()> {
        if !(1..=MAX_WEEKS).contains(&self.weeks) {
            return Err(AppError::BadRequest(format!(
                "weeks must be between 1 and {}, got {}",
                MAX_WEEKS, self.weeks
            )));
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::BadRequest("name must not be blank".to_string()));
            }
        }
        Ok(())
    }

    /// Name to store, falling back to one derived from the aligned start date.
    pub fn roster_name(&self, aligned_start: NaiveDate) -> String {
        match &self.name {
            Some(name) => name.trim().to_string(),
            None => format!("Roster from {} ({} weeks)", aligned_start.format("%Y-%m-%d"), self.weeks),
        }
    }
}

/// Input for reassigning a shift. `null` unassigns it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateShiftInput {
    pub assignee: Option<StaffMember>,
}

/// Response for roster mutations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RosterMutationResponse {
    pub success: bool,
    pub message: Option<String>,
}
