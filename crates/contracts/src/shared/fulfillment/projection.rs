use super::actions::{available_actions, can_bulk_mark_packed};
use super::anomalies::detect_anomalies;
use super::dealer_resolver::resolve_dealer_id;
use super::grouping::group_by_dealer;
use super::staff_scope::{current_picklist_id, resolve_staff_scope, ScanStatusMap};
use super::status::{
    derive_status, is_order_cancelled, is_packed_indicator, is_packed_label, terminal_badge,
};
use crate::domain::a001_order::{LineItem, Order};
use crate::domain::a002_picklist::Picklist;
use crate::domain::a003_dealer::UNKNOWN_DEALER;
use crate::enums::{FulfillmentAction, TerminalBadge, UserRole, ViewRole};
use crate::usecases::u601_order_fulfillment::{
    DealerGroupView, LineFulfillmentView, OrderFulfillmentView, StaffPanelView,
};
use std::collections::HashMap;

/// Снимок, из которого строится проекция
pub struct ProjectionInput<'a> {
    pub order: &'a Order,
    /// Все пиклисты заказа
    pub picklists: &'a [Picklist],
    /// Пиклисты заказа, назначенные текущему сотруднику склада
    pub staff_picklists: &'a [Picklist],
    pub role: UserRole,
    pub employee_id: Option<&'a str>,
    /// Имена дилеров по каноническому ID
    pub dealer_names: &'a HashMap<String, String>,
}

/// Построить проекцию заказа для текущего пользователя
pub fn project(input: &ProjectionInput<'_>) -> OrderFulfillmentView {
    let order = input.order;
    let view_role = input.role.view_role();
    let is_staff = view_role == ViewRole::Staff;

    let scope = resolve_staff_scope(
        &input.role,
        input.employee_id,
        input.staff_picklists,
        &order.items,
    );
    let visible = scope.visible_items(&order.items);

    let scan_statuses = if is_staff {
        ScanStatusMap::from_picklists(input.staff_picklists)
    } else {
        ScanStatusMap::from_picklists(input.picklists)
    };

    let lines = visible
        .iter()
        .map(|item| line_view(item, input, view_role, &scan_statuses))
        .collect();

    let dealer_groups = if input.role.is_fulfillment_admin() {
        group_by_dealer(&order.items)
            .into_iter()
            .map(|(dealer_id, sku_list)| DealerGroupView {
                dealer_name: dealer_name(input.dealer_names, &dealer_id),
                dealer_id,
                sku_list,
            })
            .collect()
    } else {
        Vec::new()
    };

    let staff = is_staff.then(|| {
        let current = current_picklist_id(input.staff_picklists);
        let order_packed = is_packed_label(order.tracking_label())
            || (!visible.is_empty()
                && visible
                    .iter()
                    .all(|item| is_packed_indicator(item, order.tracking_label())));
        let bulk_allowed = can_bulk_mark_packed(
            current,
            visible.iter().map(|item| item.sku.as_str()),
            &scan_statuses,
            order_packed,
        );

        StaffPanelView {
            employee_id: input.employee_id.map(str::to_string),
            scope: scope.clone(),
            current_picklist_id: current.map(str::to_string),
            bulk_actions: if bulk_allowed {
                vec![FulfillmentAction::MarkPacked]
            } else {
                Vec::new()
            },
        }
    });

    OrderFulfillmentView {
        order_id: order.id.clone(),
        order_status: order.status.clone(),
        role: input.role,
        view_role,
        order_badge: order_badge(order, view_role),
        lines,
        dealer_groups,
        staff,
    }
}

fn line_view(
    item: &LineItem,
    input: &ProjectionInput<'_>,
    view_role: ViewRole,
    scan_statuses: &ScanStatusMap,
) -> LineFulfillmentView {
    let dealer_id = resolve_dealer_id(item);
    let status = derive_status(item, view_role);
    let badge = terminal_badge(item, input.order, view_role);
    let actions = available_actions(item, &input.role, badge.is_some());

    LineFulfillmentView {
        sku: item.sku.clone(),
        product_name: item.product_name.clone(),
        quantity: item.quantity_or_default(),
        dealer_name: (!dealer_id.is_empty()).then(|| dealer_name(input.dealer_names, &dealer_id)),
        dealer_id,
        status,
        status_label: status.label().to_string(),
        packed: is_packed_indicator(item, input.order.tracking_label()),
        terminal_badge: badge,
        actions: actions.into_iter().collect(),
        scan_status: scan_statuses.scan_status_of(&item.sku).map(str::to_string),
        anomalies: detect_anomalies(item),
    }
}

fn dealer_name(names: &HashMap<String, String>, dealer_id: &str) -> String {
    names
        .get(dealer_id)
        .cloned()
        .unwrap_or_else(|| UNKNOWN_DEALER.to_string())
}

fn order_badge(order: &Order, view_role: ViewRole) -> Option<TerminalBadge> {
    if view_role == ViewRole::Admin && is_order_cancelled(&order.status) {
        Some(TerminalBadge::Cancelled)
    } else if is_packed_label(order.tracking_label()) {
        Some(TerminalBadge::Packed)
    } else {
        None
    }
}
