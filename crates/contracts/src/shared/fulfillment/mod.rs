//! Маршрутизация исполнения заказов и вывод статусов
//!
//! Чистые функции над последним снимком заказа и пиклистов. Общие для экрана
//! администратора и экрана сотрудника склада, параметризуются ролью.

pub mod actions;
pub mod anomalies;
pub mod dealer_id;
pub mod dealer_resolver;
pub mod grouping;
pub mod payloads;
pub mod projection;
pub mod staff_scope;
pub mod status;

pub use actions::{available_actions, can_bulk_mark_packed, ActionSet};
pub use anomalies::{detect_anomalies, ProgressAnomaly};
pub use dealer_id::normalize_dealer_id;
pub use dealer_resolver::resolve_dealer_id;
pub use grouping::{dealer_ids_needing_lookup, group_by_dealer, DealerGroups};
pub use projection::{project, ProjectionInput};
pub use staff_scope::{resolve_staff_scope, staff_visible_items, ScanStatusMap, StaffScope};
pub use status::{derive_status, is_packed_indicator, terminal_badge};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::a001_order::{DealerAssignment, LineItem, Order};
    use crate::domain::a003_dealer::DealerRef;

    /// Позиция с флагами в порядке: picklist, inspection started/completed, packed
    pub fn item_with_flags(sku: &str, flags: [bool; 4]) -> LineItem {
        LineItem {
            sku: sku.to_string(),
            picklist_generated: flags[0],
            inspection_started: flags[1],
            inspection_completed: flags[2],
            mark_as_packed: flags[3],
            ..Default::default()
        }
    }

    pub fn order_with_status(status: &str) -> Order {
        Order {
            id: "ORD-1".into(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    pub fn item_for_dealer(sku: &str, dealer: &str, quantity: Option<u32>) -> LineItem {
        LineItem {
            sku: sku.to_string(),
            quantity,
            dealer_mapped: vec![DealerAssignment::new(DealerRef::from(dealer))],
            ..Default::default()
        }
    }
}
