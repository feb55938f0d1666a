use super::dealer_resolver::resolve_dealer_id;
use super::staff_scope::ScanStatusMap;
use crate::domain::a001_order::LineItem;
use crate::domain::a002_picklist::SCAN_STATUS_COMPLETED;
use crate::enums::{FulfillmentAction, UserRole};
use std::collections::BTreeSet;

/// Набор доступных действий (упорядочен для стабильного вывода в UI)
pub type ActionSet = BTreeSet<FulfillmentAction>;

/// Действия, доступные пользователю для позиции заказа
///
/// `is_order_terminal`: для администратора это признак упаковки или отмена
/// заказа, для сотрудника склада только признак упаковки. В терминальном
/// состоянии меню заменяется плашкой и действий нет.
///
/// Предусловия проверяются только здесь, скрытием действий. Повторной
/// проверки перед вызовом сервиса нет: последнее слово за сервисом заказов.
pub fn available_actions(item: &LineItem, role: &UserRole, is_order_terminal: bool) -> ActionSet {
    let mut actions = ActionSet::new();
    if is_order_terminal {
        return actions;
    }

    if role.is_fulfillment_admin() {
        let has_dealer = !resolve_dealer_id(item).is_empty();
        if !has_dealer {
            actions.insert(FulfillmentAction::AssignDealer);
        }
        if has_dealer && !item.picklist_generated {
            actions.insert(FulfillmentAction::CreatePicklist);
        }
        if item.picklist_generated && !item.mark_as_packed {
            actions.insert(FulfillmentAction::MarkPacked);
        }
    } else if role.is_fulfillment_staff() {
        if item.picklist_generated && !item.inspection_started && !item.inspection_completed {
            actions.insert(FulfillmentAction::Inspect);
        }
        if item.inspection_started && !item.inspection_completed {
            actions.insert(FulfillmentAction::StopInspect);
        }
    }

    actions
}

/// Доступна ли сотруднику массовая упаковка всего видимого набора
///
/// Нужен текущий пиклист сотрудника, и у каждого видимого SKU агрегированный
/// статус сканирования должен быть "Completed".
pub fn can_bulk_mark_packed<'a, I>(
    current_picklist_id: Option<&str>,
    visible_skus: I,
    scan_statuses: &ScanStatusMap,
    order_packed: bool,
) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    if order_packed || current_picklist_id.map_or(true, str::is_empty) {
        return false;
    }

    let mut any_visible = false;
    for sku in visible_skus {
        any_visible = true;
        if scan_statuses.scan_status_of(sku) != Some(SCAN_STATUS_COMPLETED) {
            return false;
        }
    }
    any_visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_order::DealerAssignment;
    use crate::domain::a002_picklist::{Picklist, PicklistSku};
    use crate::domain::a003_dealer::DealerRef;
    use crate::shared::fulfillment::status::{is_packed_indicator, terminal_badge};
    use crate::shared::fulfillment::test_support::{
        item_for_dealer, item_with_flags, order_with_status,
    };
    use crate::enums::ViewRole;
    use maplit::btreeset;

    const ADMIN: UserRole = UserRole::FulfillmentAdmin;
    const STAFF: UserRole = UserRole::FulfillmentStaff;

    #[test]
    fn test_scenario_unassigned_item_needs_dealer() {
        let item = LineItem {
            dealer_id: Some(DealerRef::from("")),
            ..LineItem::new("A")
        };
        assert_eq!(resolve_dealer_id(&item), "");
        assert_eq!(
            available_actions(&item, &ADMIN, false),
            btreeset! {FulfillmentAction::AssignDealer}
        );
    }

    #[test]
    fn test_scenario_mapped_dealer_allows_picklist() {
        let item = LineItem {
            dealer_id: Some(DealerRef::from("D1")),
            dealer_mapped: vec![DealerAssignment::new(DealerRef::from("D2"))],
            ..LineItem::new("A")
        };
        assert_eq!(resolve_dealer_id(&item), "D2");
        assert_eq!(
            available_actions(&item, &ADMIN, false),
            btreeset! {FulfillmentAction::CreatePicklist}
        );
    }

    #[test]
    fn test_scenario_staff_inspection_in_progress() {
        let item = item_with_flags("A", [true, true, false, false]);
        assert_eq!(
            available_actions(&item, &STAFF, is_packed_indicator(&item, "Confirmed")),
            btreeset! {FulfillmentAction::StopInspect}
        );
    }

    #[test]
    fn test_scenario_fully_packed_is_terminal() {
        let item = item_with_flags("A", [true; 4]);
        for role in [ADMIN, STAFF] {
            let order = order_with_status("Confirmed");
            let terminal = terminal_badge(&item, &order, role.view_role()).is_some();
            assert!(terminal);
            assert!(available_actions(&item, &role, terminal).is_empty());
        }
    }

    #[test]
    fn test_scenario_cancelled_order_has_no_admin_actions() {
        let item = item_with_flags("A", [false; 4]);
        let order = order_with_status("Cancelled");
        let terminal = terminal_badge(&item, &order, ViewRole::Admin).is_some();
        assert!(terminal);
        assert!(available_actions(&item, &ADMIN, terminal).is_empty());
    }

    #[test]
    fn test_admin_never_creates_picklist_without_dealer() {
        for bits in 0..16u8 {
            let flags = [bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0];
            let item = item_with_flags("A", flags);
            let actions = available_actions(&item, &ADMIN, false);
            assert!(!actions.contains(&FulfillmentAction::CreatePicklist), "{flags:?}");
        }
    }

    #[test]
    fn test_admin_mark_packed_after_picklist() {
        let mut item = item_for_dealer("A", "D1", Some(1));
        item.picklist_generated = true;
        assert_eq!(
            available_actions(&item, &ADMIN, false),
            btreeset! {FulfillmentAction::MarkPacked}
        );
        assert_eq!(
            available_actions(&item, &UserRole::SuperAdmin, false),
            btreeset! {FulfillmentAction::MarkPacked}
        );
    }

    #[test]
    fn test_staff_inspect_only_before_start() {
        let item = item_with_flags("A", [true, false, false, false]);
        assert_eq!(
            available_actions(&item, &STAFF, false),
            btreeset! {FulfillmentAction::Inspect}
        );

        let completed = item_with_flags("A", [true, true, true, false]);
        assert!(available_actions(&completed, &STAFF, false).is_empty());

        let not_picklisted = item_with_flags("A", [false; 4]);
        assert!(available_actions(&not_picklisted, &STAFF, false).is_empty());
    }

    #[test]
    fn test_read_only_role_has_no_actions() {
        let item = LineItem::new("A");
        assert!(available_actions(&item, &UserRole::ReadOnly, false).is_empty());
    }

    fn picklist(id: &str, skus: &[&str], scan_status: &str) -> Picklist {
        Picklist {
            picklist_id: id.to_string(),
            sku_list: skus.iter().map(|sku| PicklistSku::new(*sku, 1)).collect(),
            scan_status: Some(scan_status.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_bulk_mark_packed_requires_completed_scans() {
        let picklists = vec![
            picklist("PL-1", &["A", "B"], "Completed"),
            picklist("PL-2", &["C"], "Pending"),
        ];
        let statuses = ScanStatusMap::from_picklists(&picklists);

        assert!(can_bulk_mark_packed(Some("PL-1"), ["A", "B"], &statuses, false));
        assert!(!can_bulk_mark_packed(Some("PL-1"), ["A", "C"], &statuses, false));
        assert!(!can_bulk_mark_packed(Some("PL-1"), ["A", "Z"], &statuses, false));
        assert!(!can_bulk_mark_packed(None, ["A"], &statuses, false));
        assert!(!can_bulk_mark_packed(Some(""), ["A"], &statuses, false));
        assert!(!can_bulk_mark_packed(Some("PL-1"), ["A"], &statuses, true));
        assert!(!can_bulk_mark_packed(Some("PL-1"), Vec::<&str>::new(), &statuses, false));
    }
}
