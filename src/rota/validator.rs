//! Guard for every manual change to a shift's assignee, including swap
//! approval.

use super::generator::Shift;
use super::staff::StaffMember;

/// Knobs for what the validator tolerates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentPolicy {
    /// Whether a locked shift may be left unassigned.
    pub allow_unassign_locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentError {
    #[error("{staff} is not eligible for shift {shift_id}")]
    NotEligible { shift_id: String, staff: StaffMember },

    #[error("Shift {shift_id} is locked to a single staff member and cannot be unassigned")]
    LockedShift { shift_id: String },
}

impl AssignmentError {
    /// Policy violations are distinguished from plain eligibility failures so
    /// callers can report them differently.
    pub fn is_policy_violation(&self) -> bool {
        matches!(self, AssignmentError::LockedShift { .. })
    }
}

/// Check whether `proposed` may become the assignee of `shift`. `None` means
/// unassigning.
pub fn validate_assignment(
    shift: &Shift,
    proposed: Option<StaffMember>,
    policy: &AssignmentPolicy,
) -> Result<(), AssignmentError> {
    match proposed {
        Some(staff) if !shift.is_eligible(staff) => Err(AssignmentError::NotEligible {
            shift_id: shift.id.clone(),
            staff,
        }),
        Some(_) => Ok(()),
        None if shift.is_locked() && !policy.allow_unassign_locked => {
            Err(AssignmentError::LockedShift {
                shift_id: shift.id.clone(),
            })
        }
        None => Ok(()),
    }
}

/// Validate and, on success only, set the assignee.
pub fn apply_assignment(
    shift: &mut Shift,
    proposed: Option<StaffMember>,
    policy: &AssignmentPolicy,
) -> Result<(), AssignmentError> {
    validate_assignment(shift, proposed, policy)?;
    shift.assignee = proposed;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rota::generator::generate;
    use crate::rota::staff::ShiftCategory;
    use chrono::NaiveDate;

    fn week() -> Vec<Shift> {
        generate(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), 1)
    }

    fn find(shifts: &[Shift], weekday: &str, category: ShiftCategory) -> Shift {
        shifts
            .iter()
            .find(|s| s.weekday == weekday && s.category == category)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_rejects_ineligible_and_leaves_shift_untouched() {
        let mut sunday = find(&week(), "Sunday", ShiftCategory::Day);
        let before = sunday.clone();

        let err = apply_assignment(&mut sunday, Some(StaffMember::J), &AssignmentPolicy::default())
            .unwrap_err();

        assert!(matches!(err, AssignmentError::NotEligible { staff: StaffMember::J, .. }));
        assert!(!err.is_policy_violation());
        assert_eq!(sunday, before);
    }

    #[test]
    fn test_accepts_eligible_reassignment() {
        let mut monday = find(&week(), "Monday", ShiftCategory::FullDay);
        apply_assignment(&mut monday, Some(StaffMember::L), &AssignmentPolicy::default()).unwrap();
        assert_eq!(monday.assignee, Some(StaffMember::L));
    }

    #[test]
    fn test_locked_shift_only_accepts_its_sole_member() {
        let policy = AssignmentPolicy::default();
        let sat_day = find(&week(), "Saturday", ShiftCategory::Day);

        assert!(validate_assignment(&sat_day, Some(StaffMember::J), &policy).is_ok());
        assert!(validate_assignment(&sat_day, Some(StaffMember::A), &policy).is_err());
    }

    #[test]
    fn test_unassigning_locked_shift_follows_policy() {
        let mut sat_day = find(&week(), "Saturday", ShiftCategory::Day);

        let err = apply_assignment(&mut sat_day, None, &AssignmentPolicy::default()).unwrap_err();
        assert!(err.is_policy_violation());
        assert_eq!(sat_day.assignee, Some(StaffMember::J));

        let lenient = AssignmentPolicy {
            allow_unassign_locked: true,
        };
        apply_assignment(&mut sat_day, None, &lenient).unwrap();
        assert_eq!(sat_day.assignee, None);
    }

    #[test]
    fn test_unassigning_open_shift_is_allowed() {
        let mut tuesday = find(&week(), "Tuesday", ShiftCategory::FullDay);
        apply_assignment(&mut tuesday, None, &AssignmentPolicy::default()).unwrap();
        assert_eq!(tuesday.assignee, None);
    }
}
