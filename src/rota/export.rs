//! CSV rendition of a roster: one row per shift followed by an hours summary.

use super::generator::Shift;
use super::summary::summarize;

pub const UNASSIGNED: &str = "Unassigned";

pub fn export_csv(shifts: &[Shift]) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());

    wtr.write_record(["Date", "Weekday", "Shift", "Assignee", "Hours"])?;
    for shift in shifts {
        let assignee = shift.assignee.map_or(UNASSIGNED, |s| s.display_name());
        wtr.write_record([
            shift.date.format("%Y-%m-%d").to_string(),
            shift.weekday.clone(),
            shift.label.clone(),
            assignee.to_string(),
            shift.hours.to_string(),
        ])?;
    }

    wtr.write_record([""])?;
    wtr.write_record(["Staff", "Total Hours", "Shifts"])?;
    for row in summarize(shifts) {
        wtr.write_record([
            row.name,
            row.total_hours.to_string(),
            row.shift_count.to_string(),
        ])?;
    }

    wtr.into_inner().map_err(|e| e.into_error().into())
}
