pub mod fulfillment_action;
pub mod fulfillment_status;
pub mod user_role;

pub use fulfillment_action::FulfillmentAction;
pub use fulfillment_status::{FulfillmentStatus, TerminalBadge};
pub use user_role::{UserRole, ViewRole};
