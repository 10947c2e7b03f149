use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::rules::{categories_for, default_assignee, eligible_staff, shift_hours};
use super::staff::{ShiftCategory, StaffMember};

/// A single schedulable slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Shift {
    /// Derived from date and category, so regeneration yields the same id.
    pub id: String,
    pub date: NaiveDate,
    pub weekday: String,
    pub category: ShiftCategory,
    pub label: String,
    pub hours: u32,
    pub assignee: Option<StaffMember>,
    pub eligible: Vec<StaffMember>,
}

impl Shift {
    /// A shift with a single eligible staff member cannot be handed to anyone else.
    pub fn is_locked(&self) -> bool {
        self.eligible.len() == 1
    }

    pub fn is_eligible(&self, staff: StaffMember) -> bool {
        self.eligible.contains(&staff)
    }
}

pub fn shift_id(date: NaiveDate, category: ShiftCategory) -> String {
    format!("{}-{}", date.format("%Y-%m-%d"), category.slug())
}

pub fn shift_label(category: ShiftCategory, hours: u32) -> String {
    match category {
        ShiftCategory::FullDay => format!("{hours}h"),
        ShiftCategory::Day | ShiftCategory::Night => format!("{} {hours}h", category.name()),
    }
}

/// Monday of the week containing `date`.
pub fn align_to_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Last day covered by a roster of `weeks` weeks starting on `start`.
pub fn end_date(start: NaiveDate, weeks: u32) -> NaiveDate {
    start + Duration::days(weeks as i64 * 7 - 1)
}

/// Build the full shift calendar for `weeks` weeks from the Monday of
/// `start`'s week.
///
/// Output is chronological with Day before Night on weekends, and depends only
/// on the aligned start and the week count.
pub fn generate(start: NaiveDate, weeks: u32) -> Vec<Shift> {
    let start = align_to_monday(start);
    let days = weeks * 7;
    let mut shifts = Vec::with_capacity(weeks as usize * 9);

    for offset in 0..days {
        let date = start + Duration::days(offset as i64);
        let weekday = date.weekday();
        let week_index = offset / 7;

        for &category in categories_for(weekday) {
            let hours = shift_hours(weekday, category);
            shifts.push(Shift {
                id: shift_id(date, category),
                date,
                weekday: date.format("%A").to_string(),
                category,
                label: shift_label(category, hours),
                hours,
                assignee: default_assignee(date, category, week_index),
                eligible: eligible_staff(date, category),
            });
        }
    }

    tracing::debug!(%start, weeks, count = shifts.len(), "Generated roster shifts");
    shifts
}

#[cfg(test)]
mod tests {
    use super::*;
    use StaffMember::{A, J, L, P};

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    #[test]
    fn test_one_week_scenario() {
        let shifts = generate(monday(), 1);
        let got: Vec<(&str, Option<StaffMember>)> = shifts
            .iter()
            .map(|s| (s.label.as_str(), s.assignee))
            .collect();

        assert_eq!(
            got,
            vec![
                ("24h", Some(A)),
                ("24h", Some(P)),
                ("24h", Some(J)),
                ("24h", Some(J)),
                ("24h", Some(P)),
                ("Day 12h", Some(J)),
                ("Night 12h", Some(A)),
                ("Day 12h", Some(A)),
                ("Night 12h", Some(P)),
            ]
        );
        assert_eq!(shifts[0].weekday, "Monday");
        assert_eq!(shifts[0].id, "2024-06-03-24h");
        assert_eq!(shifts[5].id, "2024-06-08-day");
        assert_eq!(shifts[8].weekday, "Sunday");
    }

    #[test]
    fn test_shift_count_is_nine_per_week() {
        for weeks in 1..=12 {
            assert_eq!(generate(monday(), weeks).len(), weeks as usize * 9);
        }
    }

    #[test]
    fn test_fifth_week_uses_locum_on_friday_and_saturday_night() {
        let shifts = generate(monday(), 5);
        let week4: Vec<&Shift> = shifts[4 * 9..].iter().collect();

        let friday = week4.iter().find(|s| s.weekday == "Friday").unwrap();
        assert_eq!(friday.assignee, Some(L));

        let sat_night = week4
            .iter()
            .find(|s| s.weekday == "Saturday" && s.category == ShiftCategory::Night)
            .unwrap();
        assert_eq!(sat_night.assignee, Some(L));
    }

    #[test]
    fn test_start_is_snapped_to_monday() {
        let thursday = NaiveDate::from_ymd_opt(2024, 6, 6).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        assert_eq!(generate(thursday, 2), generate(monday(), 2));
        assert_eq!(generate(sunday, 2), generate(monday(), 2));
        assert_eq!(align_to_monday(monday()), monday());
    }

    #[test]
    fn test_regeneration_is_identical() {
        assert_eq!(generate(monday(), 6), generate(monday(), 6));
    }

    #[test]
    fn test_ids_are_unique_and_order_is_chronological() {
        let shifts = generate(monday(), 4);
        let mut ids: Vec<&str> = shifts.iter().map(|s| s.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), shifts.len());

        for pair in shifts.windows(2) {
            assert!((pair[0].date, pair[0].category) < (pair[1].date, pair[1].category));
        }
    }

    #[test]
    fn test_generated_invariants() {
        for shift in generate(monday(), 12) {
            assert!(!shift.eligible.is_empty());
            if let Some(staff) = shift.assignee {
                assert!(shift.is_eligible(staff));
            }
            if shift.weekday == "Saturday" && shift.category == ShiftCategory::Day {
                assert_eq!(shift.eligible, vec![J]);
                assert_eq!(shift.assignee, Some(J));
                assert!(shift.is_locked());
            }
            if shift.weekday == "Sunday" {
                assert!(!shift.is_eligible(J));
            }
        }
    }

    #[test]
    fn test_end_date() {
        assert_eq!(end_date(monday(), 1), NaiveDate::from_ymd_opt(2024, 6, 9).unwrap());
        assert_eq!(end_date(monday(), 4), NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    }
}
