pub mod aggregate;

pub use aggregate::{CustomerDetails, DealerAssignment, LineItem, Order, ORDER_STATUS_CANCELLED};
