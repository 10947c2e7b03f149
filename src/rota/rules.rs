//! Rule tables for who may work a slot, who works it by default, and how long
//! it is.
//!
//! Weekdays only ever produce [`ShiftCategory::FullDay`] and weekends only
//! produce Day/Night, so the category is ignored where it cannot vary.

use chrono::{Datelike, NaiveDate, Weekday};

use super::staff::{ShiftCategory, StaffMember};

use StaffMember::{A, J, L, P};

/// Week index from which Friday and Saturday Night rotate to the locum.
pub const LOCUM_CUTOVER_WEEK: u32 = 3;

/// Staff permitted to work the slot. Never empty.
pub fn eligible_staff(date: NaiveDate, category: ShiftCategory) -> Vec<StaffMember> {
    match (date.weekday(), category) {
        (Weekday::Sat, ShiftCategory::Day) => vec![J],
        (Weekday::Sat, ShiftCategory::Night | ShiftCategory::FullDay) => vec![A, P, L],
        (Weekday::Sun, _) => vec![A, P, L],
        (Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri, _) => {
            StaffMember::ALL.to_vec()
        }
    }
}

/// Staff member pre-assigned to the slot in week `week_index` of a roster.
///
/// Always a member of [`eligible_staff`] for the same slot.
pub fn default_assignee(
    date: NaiveDate,
    category: ShiftCategory,
    week_index: u32,
) -> Option<StaffMember> {
    let even = week_index % 2 == 0;
    let alternate = |on_even, on_odd| if even { on_even } else { on_odd };

    let staff = match (date.weekday(), category) {
        (Weekday::Sat, ShiftCategory::Day) => J,
        (Weekday::Sat, ShiftCategory::Night) if week_index >= LOCUM_CUTOVER_WEEK => L,
        (Weekday::Sat, ShiftCategory::Night) => alternate(A, P),
        (Weekday::Sun, ShiftCategory::Day) => alternate(A, P),
        (Weekday::Sun, ShiftCategory::Night) => alternate(P, A),
        // Never generated.
        (Weekday::Sat | Weekday::Sun, ShiftCategory::FullDay) => return None,
        (Weekday::Mon, _) => A,
        (Weekday::Tue, _) => P,
        // Wednesday and Thursday form one 48-hour block.
        (Weekday::Wed | Weekday::Thu, _) => J,
        (Weekday::Fri, _) if week_index >= LOCUM_CUTOVER_WEEK => L,
        (Weekday::Fri, _) => P,
    };

    Some(staff)
}

/// Length of the shift in hours.
pub fn shift_hours(weekday: Weekday, _category: ShiftCategory) -> u32 {
    match weekday {
        Weekday::Sat | Weekday::Sun => 12,
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri => 24,
    }
}

/// Categories generated for a weekday, in output order.
pub fn categories_for(weekday: Weekday) -> &'static [ShiftCategory] {
    match weekday {
        Weekday::Sat | Weekday::Sun => &[ShiftCategory::Day, ShiftCategory::Night],
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri => {
            &[ShiftCategory::FullDay]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-06-03 is a Monday.
    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap() + chrono::Duration::days(offset)
    }

    #[test]
    fn test_saturday_day_is_locked_to_j() {
        let sat = day(5);
        assert_eq!(eligible_staff(sat, ShiftCategory::Day), vec![J]);
        for week in 0..12 {
            assert_eq!(default_assignee(sat, ShiftCategory::Day, week), Some(J));
        }
    }

    #[test]
    fn test_weekends_exclude_j_except_saturday_day() {
        assert_eq!(eligible_staff(day(5), ShiftCategory::Night), vec![A, P, L]);
        assert_eq!(eligible_staff(day(6), ShiftCategory::Day), vec![A, P, L]);
        assert_eq!(eligible_staff(day(6), ShiftCategory::Night), vec![A, P, L]);
    }

    #[test]
    fn test_weekdays_allow_everyone() {
        for offset in 0..5 {
            assert_eq!(eligible_staff(day(offset), ShiftCategory::FullDay), StaffMember::ALL.to_vec());
        }
    }

    #[test]
    fn test_weekday_defaults() {
        let full = ShiftCategory::FullDay;
        assert_eq!(default_assignee(day(0), full, 0), Some(A));
        assert_eq!(default_assignee(day(1), full, 0), Some(P));
        assert_eq!(default_assignee(day(2), full, 0), Some(J));
        assert_eq!(default_assignee(day(3), full, 0), Some(J));
        assert_eq!(default_assignee(day(4), full, 2), Some(P));
        assert_eq!(default_assignee(day(4), full, 3), Some(L));
    }

    #[test]
    fn test_weekend_alternation_and_cutover() {
        let sat = day(5);
        let sun = day(6);
        assert_eq!(default_assignee(sat, ShiftCategory::Night, 0), Some(A));
        assert_eq!(default_assignee(sat, ShiftCategory::Night, 1), Some(P));
        assert_eq!(default_assignee(sat, ShiftCategory::Night, 2), Some(A));
        assert_eq!(default_assignee(sat, ShiftCategory::Night, 3), Some(L));
        assert_eq!(default_assignee(sat, ShiftCategory::Night, 8), Some(L));

        assert_eq!(default_assignee(sun, ShiftCategory::Day, 0), Some(A));
        assert_eq!(default_assignee(sun, ShiftCategory::Day, 1), Some(P));
        assert_eq!(default_assignee(sun, ShiftCategory::Night, 0), Some(P));
        assert_eq!(default_assignee(sun, ShiftCategory::Night, 1), Some(A));
    }

    #[test]
    fn test_defaults_are_always_eligible() {
        for week in 0..12u32 {
            for offset in 0..7 {
                let date = day(offset + week as i64 * 7);
                for &category in categories_for(date.weekday()) {
                    let staff = default_assignee(date, category, week)
                        .expect("every generated slot has a default");
                    assert!(
                        eligible_staff(date, category).contains(&staff),
                        "{staff} not eligible on {date} {category:?} week {week}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_hours() {
        assert_eq!(shift_hours(Weekday::Mon, ShiftCategory::FullDay), 24);
        assert_eq!(shift_hours(Weekday::Fri, ShiftCategory::FullDay), 24);
        assert_eq!(shift_hours(Weekday::Sat, ShiftCategory::Day), 12);
        assert_eq!(shift_hours(Weekday::Sun, ShiftCategory::Night), 12);
    }
}
