//! Rota engine.
//!
//! Pure, synchronous roster generation and the computations that sit on top of
//! it: hours aggregation, roster comparison, assignment validation and the
//! swap request status machine. Nothing in here touches the database.

pub mod diff;
pub mod export;
pub mod generator;
pub mod rules;
pub mod staff;
pub mod summary;
pub mod swap;
pub mod validator;

pub use diff::{changed_count, diff, ShiftComparison};
pub use export::export_csv;
pub use generator::{align_to_monday, end_date, generate, Shift};
pub use staff::{ShiftCategory, StaffMember, UnknownStaff};
pub use summary::{summarize, StaffHours};
pub use swap::{check_swap_proposal, SwapError, SwapStatus};
pub use validator::{apply_assignment, AssignmentError, AssignmentPolicy};
