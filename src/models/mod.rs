pub mod notification;
pub mod roster;
pub mod roster_input;
pub mod swap;

pub use notification::{Notification, NotificationMutationResponse, NotificationRow};
pub use roster::{Roster, RosterComparison, RosterHours, RosterPreview, RosterShift, RosterSummary, ShiftRow};
pub use roster_input::{GenerateRosterInput, RosterMutationResponse, UpdateShiftInput};
pub use swap::{CreateSwapRequestInput, RespondSwapInput, SwapRequest, SwapRequestRow};
