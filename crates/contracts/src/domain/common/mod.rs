//! Common types and traits for all aggregates

pub mod aggregate_root;
pub mod record_id;

// Re-exports
pub use aggregate_root::AggregateRoot;
pub use record_id::record_id;
