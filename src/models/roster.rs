use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    rota::{Shift, ShiftCategory, ShiftComparison, StaffHours, StaffMember},
    AppError, AppResult,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RosterSummary {
    pub id: i32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub weeks: i32,
    pub is_active: bool,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored shift: the generated slot plus its storage identity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RosterShift {
    pub uuid: Uuid,
    pub roster_id: i32,
    #[serde(flatten)]
    pub shift: Shift,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Roster {
    #[serde(flatten)]
    pub summary: RosterSummary,
    pub shifts: Vec<RosterShift>,
}

impl Roster {
    pub fn plain_shifts(&self) -> Vec<Shift> {
        self.shifts.iter().map(|s| s.shift.clone()).collect()
    }
}

/// Generated but not persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RosterPreview {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub weeks: u32,
    pub shifts: Vec<Shift>,
    pub hours: Vec<StaffHours>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RosterHours {
    pub roster_id: i32,
    pub hours: Vec<StaffHours>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RosterComparison {
    pub roster_a: i32,
    pub roster_b: i32,
    pub changed: usize,
    pub entries: Vec<ShiftComparison>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ShiftRow {
    pub uuid: Uuid,
    pub roster_id: i32,
    pub shift_key: String,
    pub date: NaiveDate,
    pub weekday: String,
    pub category: String,
    pub label: String,
    pub hours: i32,
    pub assignee: Option<String>,
    pub eligible: Vec<String>,
}

impl ShiftRow {
    pub fn into_roster_shift(self) -> AppResult<RosterShift> {
        let corrupt = |what: String| {
            AppError::Internal(format!("Stored shift {} is invalid: {}", self.uuid, what))
        };

        let category = self
            .category
            .parse::<ShiftCategory>()
            .map_err(|e| corrupt(e.to_string()))?;
        let hours = u32::try_from(self.hours).map_err(|e| corrupt(e.to_string()))?;
        let assignee = self
            .assignee
            .as_deref()
            .map(str::parse::<StaffMember>)
            .transpose()
            .map_err(|e| corrupt(e.to_string()))?;
        let eligible = self
            .eligible
            .iter()
            .map(|code| code.parse::<StaffMember>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| corrupt(e.to_string()))?;

        if eligible.is_empty() {
            return Err(corrupt("empty eligibility set".to_string()));
        }

        Ok(RosterShift {
            uuid: self.uuid,
            roster_id: self.roster_id,
            shift: Shift {
                id: self.shift_key,
                date: self.date,
                weekday: self.weekday,
                category,
                label: self.label,
                hours,
                assignee,
                eligible,
            },
        })
    }
}
