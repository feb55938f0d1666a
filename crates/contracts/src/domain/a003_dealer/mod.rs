pub mod aggregate;

pub use aggregate::{Dealer, DealerRef, UNKNOWN_DEALER};
