pub mod aggregate;

pub use aggregate::{Picklist, PicklistSku, SCAN_STATUS_COMPLETED};
