use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use super::generator::Shift;
use super::staff::StaffMember;
use super::validator::{validate_assignment, AssignmentError, AssignmentPolicy};

/// Lifecycle of a swap request. Only `Pending` can change, and only once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwapStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwapError {
    #[error("Swap request already {0}")]
    AlreadyResolved(&'static str),

    #[error("{from} is not assigned to shift {shift_id}")]
    NotCurrentAssignee { shift_id: String, from: StaffMember },

    #[error("Cannot swap a shift with the same staff member")]
    SameStaff,

    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    #[error("Unknown swap status: {0}")]
    UnknownStatus(String),
}

impl SwapStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SwapStatus::Pending => "PENDING",
            SwapStatus::Approved => "APPROVED",
            SwapStatus::Rejected => "REJECTED",
        }
    }

    /// Resolve a pending request.
    pub fn respond(self, approve: bool) -> Result<SwapStatus, SwapError> {
        match self {
            SwapStatus::Pending if approve => Ok(SwapStatus::Approved),
            SwapStatus::Pending => Ok(SwapStatus::Rejected),
            SwapStatus::Approved => Err(SwapError::AlreadyResolved("approved")),
            SwapStatus::Rejected => Err(SwapError::AlreadyResolved("rejected")),
        }
    }
}

impl FromStr for SwapStatus {
    type Err = SwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(SwapStatus::Pending),
            "APPROVED" => Ok(SwapStatus::Approved),
            "REJECTED" => Ok(SwapStatus::Rejected),
            other => Err(SwapError::UnknownStatus(other.to_string())),
        }
    }
}

/// Checks run before a swap request is recorded: `from` must hold the shift
/// and `to` must be allowed to take it.
pub fn check_swap_proposal(
    shift: &Shift,
    from: StaffMember,
    to: StaffMember,
    policy: &AssignmentPolicy,
) -> Result<(), SwapError> {
    if from == to {
        return Err(SwapError::SameStaff);
    }
    if shift.assignee != Some(from) {
        return Err(SwapError::NotCurrentAssignee {
            shift_id: shift.id.clone(),
            from,
        });
    }
    validate_assignment(shift, Some(to), policy)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rota::generator::generate;
    use chrono::NaiveDate;

    fn week() -> Vec<Shift> {
        generate(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), 1)
    }

    #[test]
    fn test_pending_resolves_once() {
        assert_eq!(SwapStatus::Pending.respond(true), Ok(SwapStatus::Approved));
        assert_eq!(SwapStatus::Pending.respond(false), Ok(SwapStatus::Rejected));
        assert!(SwapStatus::Approved.respond(false).is_err());
        assert!(SwapStatus::Rejected.respond(true).is_err());
    }

    #[test]
    fn test_status_round_trips_through_storage_form() {
        for status in [SwapStatus::Pending, SwapStatus::Approved, SwapStatus::Rejected] {
            assert_eq!(status.as_str().parse::<SwapStatus>(), Ok(status));
        }
        assert!("CANCELLED".parse::<SwapStatus>().is_err());
    }

    #[test]
    fn test_proposal_checks() {
        let shifts = week();
        let policy = AssignmentPolicy::default();
        let monday = &shifts[0];
        let sat_day = &shifts[5];
        let sun_day = &shifts[7];

        assert!(check_swap_proposal(monday, StaffMember::A, StaffMember::L, &policy).is_ok());
        assert_eq!(
            check_swap_proposal(monday, StaffMember::A, StaffMember::A, &policy),
            Err(SwapError::SameStaff)
        );
        assert!(matches!(
            check_swap_proposal(monday, StaffMember::P, StaffMember::L, &policy),
            Err(SwapError::NotCurrentAssignee { .. })
        ));
        assert!(matches!(
            check_swap_proposal(sun_day, StaffMember::A, StaffMember::J, &policy),
            Err(SwapError::Assignment(AssignmentError::NotEligible { .. }))
        ));
        assert!(check_swap_proposal(sat_day, StaffMember::J, StaffMember::A, &policy).is_err());
    }
}
