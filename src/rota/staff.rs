use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// One of the four people the rota is built around.
///
/// Serialized as its single-letter code, which is also how it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum StaffMember {
    A,
    P,
    J,
    /// Locum cover.
    L,
}

impl StaffMember {
    /// Canonical order, used for summaries and exports.
    pub const ALL: [StaffMember; 4] = [StaffMember::A, StaffMember::P, StaffMember::J, StaffMember::L];

    pub fn code(self) -> &'static str {
        match self {
            StaffMember::A => "A",
            StaffMember::P => "P",
            StaffMember::J => "J",
            StaffMember::L => "L",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            StaffMember::A => "Staff A",
            StaffMember::P => "Staff P",
            StaffMember::J => "Staff J",
            StaffMember::L => "Locum",
        }
    }
}

impl fmt::Display for StaffMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown staff member: {0}")]
pub struct UnknownStaff(pub String);

impl FromStr for StaffMember {
    type Err = UnknownStaff;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" => Ok(StaffMember::A),
            "P" => Ok(StaffMember::P),
            "J" => Ok(StaffMember::J),
            "L" => Ok(StaffMember::L),
            other => Err(UnknownStaff(other.to_string())),
        }
    }
}

/// Kind of shift. Weekends split into Day and Night, weekdays are a single
/// 24-hour shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftCategory {
    Day,
    Night,
    FullDay,
}

impl ShiftCategory {
    /// Stable token used in shift ids and the database.
    pub fn slug(self) -> &'static str {
        match self {
            ShiftCategory::Day => "day",
            ShiftCategory::Night => "night",
            ShiftCategory::FullDay => "24h",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShiftCategory::Day => "Day",
            ShiftCategory::Night => "Night",
            ShiftCategory::FullDay => "Full day",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown shift category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ShiftCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "day" => Ok(ShiftCategory::Day),
            "night" => Ok(ShiftCategory::Night),
            "24h" => Ok(ShiftCategory::FullDay),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_codes_parse_back() {
        for staff in StaffMember::ALL {
            assert_eq!(staff.code().parse::<StaffMember>(), Ok(staff));
        }
        assert!("X".parse::<StaffMember>().is_err());
    }

    #[test]
    fn test_staff_serializes_as_code() {
        assert_eq!(serde_json::to_string(&StaffMember::L).unwrap(), "\"L\"");
        assert_eq!(StaffMember::L.to_string(), "Locum");
    }

    #[test]
    fn test_category_ordering_puts_day_first() {
        assert!(ShiftCategory::Day < ShiftCategory::Night);
        assert_eq!(serde_json::to_string(&ShiftCategory::FullDay).unwrap(), "\"FULL_DAY\"");
        assert_eq!("24h".parse::<ShiftCategory>(), Ok(ShiftCategory::FullDay));
    }
}
