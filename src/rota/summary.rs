use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::generator::Shift;
use super::staff::StaffMember;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StaffHours {
    pub staff: StaffMember,
    pub name: String,
    pub total_hours: u32,
    pub shift_count: u32,
}

/// Total hours and shift count per staff member, in canonical staff order.
/// Idle staff are reported with zeros and unassigned shifts are skipped.
pub fn summarize(shifts: &[Shift]) -> Vec<StaffHours> {
    let mut totals: Vec<StaffHours> = StaffMember::ALL
        .iter()
        .map(|&staff| StaffHours {
            staff,
            name: staff.display_name().to_string(),
            total_hours: 0,
            shift_count: 0,
        })
        .collect();

    for shift in shifts {
        let Some(staff) = shift.assignee else { continue };
        if let Some(entry) = totals.iter_mut().find(|t| t.staff == staff) {
            entry.total_hours += shift.hours;
            entry.shift_count += 1;
        }
    }

    totals
}
