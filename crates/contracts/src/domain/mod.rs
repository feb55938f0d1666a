pub mod a001_order;
pub mod a002_picklist;
pub mod a003_dealer;
pub mod common;
