//! Slot-by-slot comparison of two shift sequences.
//!
//! Shifts are aligned on (date, category) rather than on id so that rosters
//! generated independently over overlapping dates still line up.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::generator::Shift;
use super::staff::{ShiftCategory, StaffMember};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShiftComparison {
    pub date: NaiveDate,
    pub weekday: String,
    pub category: ShiftCategory,
    pub assignee_a: Option<StaffMember>,
    pub assignee_b: Option<StaffMember>,
    pub changed: bool,
}

/// Compare every slot present in either sequence, ordered by (date, category).
/// A slot missing on one side counts as unassigned there.
pub fn diff(a: &[Shift], b: &[Shift]) -> Vec<ShiftComparison> {
    let mut slots: BTreeMap<(NaiveDate, ShiftCategory), (Option<StaffMember>, Option<StaffMember>)> =
        BTreeMap::new();

    for shift in a {
        slots.entry((shift.date, shift.category)).or_default().0 = shift.assignee;
    }
    for shift in b {
        slots.entry((shift.date, shift.category)).or_default().1 = shift.assignee;
    }

    slots
        .into_iter()
        .map(|((date, category), (assignee_a, assignee_b))| ShiftComparison {
            date,
            weekday: date.format("%A").to_string(),
            category,
            assignee_a,
            assignee_b,
            changed: assignee_a != assignee_b,
        })
        .collect()
}

pub fn changed_count(comparisons: &[ShiftComparison]) -> usize {
    comparisons.iter().filter(|c| c.changed).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rota::generator::generate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_roster_against_itself_has_no_changes() {
        let shifts = generate(date(2024, 6, 3), 4);
        let result = diff(&shifts, &shifts);
        assert_eq!(result.len(), shifts.len());
        assert_eq!(changed_count(&result), 0);
    }

    #[test]
    fn test_reassignment_is_reported() {
        let a = generate(date(2024, 6, 3), 1);
        let mut b = a.clone();
        b[0].assignee = Some(StaffMember::L);

        let result = diff(&a, &b);
        assert_eq!(changed_count(&result), 1);
        assert_eq!(result[0].date, date(2024, 6, 3));
        assert_eq!(result[0].weekday, "Monday");
        assert_eq!(result[0].assignee_a, Some(StaffMember::A));
        assert_eq!(result[0].assignee_b, Some(StaffMember::L));
    }

    #[test]
    fn test_aligns_on_date_and_category_not_id() {
        let a = generate(date(2024, 6, 3), 1);
        let mut b = a.clone();
        for shift in &mut b {
            shift.id = format!("other-{}", shift.id);
        }
        assert_eq!(changed_count(&diff(&a, &b)), 0);
    }

    #[test]
    fn test_missing_side_counts_as_unassigned() {
        // Second roster starts a week later: first week only on side A,
        // last week only on side B.
        let a = generate(date(2024, 6, 3), 2);
        let b = generate(date(2024, 6, 10), 2);
        let result = diff(&a, &b);

        assert_eq!(result.len(), 27);
        assert!(result[..9].iter().all(|c| c.assignee_b.is_none() && c.changed));
        assert!(result[18..].iter().all(|c| c.assignee_a.is_none() && c.changed));

        // The shared middle week is week 1 in A and week 0 in B, so the
        // weekend alternation flips.
        let shared = &result[9..18];
        let sat_night = shared
            .iter()
            .find(|c| c.weekday == "Saturday" && c.category == ShiftCategory::Night)
            .unwrap();
        assert_eq!(sat_night.assignee_a, Some(StaffMember::P));
        assert_eq!(sat_night.assignee_b, Some(StaffMember::A));
        assert!(sat_night.changed);
    }

    #[test]
    fn test_output_sorted_regardless_of_input_order() {
        let mut a = generate(date(2024, 6, 3), 1);
        a.reverse();
        let result = diff(&a, &[]);
        for pair in result.windows(2) {
            assert!((pair[0].date, pair[0].category) < (pair[1].date, pair[1].category));
        }
        let sat: Vec<ShiftCategory> = result
            .iter()
            .filter(|c| c.weekday == "Saturday")
            .map(|c| c.category)
            .collect();
        assert_eq!(sat, vec![ShiftCategory::Day, ShiftCategory::Night]);
    }
}
