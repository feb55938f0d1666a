use crate::domain::a001_order::{LineItem, Order, ORDER_STATUS_CANCELLED};
use crate::enums::{FulfillmentStatus, TerminalBadge, ViewRole};

/// Устаревшие метки отслеживания, означающие "упаковано" (в нижнем регистре)
pub const PACKED_TRACKING_LABELS: [&str; 3] = ["packed", "packed completed", "packedcompleted"];

/// Вывести статус позиции по правилам экрана
///
/// Экран администратора видит только генерацию пиклиста и упаковку,
/// экран сотрудника склада дополнительно видит этапы проверки.
pub fn derive_status(item: &LineItem, role: ViewRole) -> FulfillmentStatus {
    match role {
        ViewRole::Admin => admin_status(item),
        ViewRole::Staff => staff_status(item),
    }
}

fn admin_status(item: &LineItem) -> FulfillmentStatus {
    if item.picklist_generated && item.mark_as_packed {
        FulfillmentStatus::Packed
    } else if item.picklist_generated {
        FulfillmentStatus::PicklistGenerated
    } else {
        FulfillmentStatus::Pending
    }
}

fn staff_status(item: &LineItem) -> FulfillmentStatus {
    let LineItem {
        picklist_generated: picklist,
        inspection_started: started,
        inspection_completed: completed,
        mark_as_packed: packed,
        ..
    } = *item;

    // inspection_completed без inspection_started сюда не "чинится":
    // такая комбинация уходит в PicklistGenerated и репортится как аномалия.
    if picklist && packed && completed && started {
        FulfillmentStatus::Packed
    } else if picklist && started && completed {
        FulfillmentStatus::InspectionCompleted
    } else if picklist && started {
        FulfillmentStatus::InspectionInProgress
    } else if picklist {
        FulfillmentStatus::PicklistGenerated
    } else {
        FulfillmentStatus::Pending
    }
}

/// Является ли текст устаревшей меткой "упаковано"
pub fn is_packed_label(status: &str) -> bool {
    let lowered = status.trim().to_lowercase();
    PACKED_TRACKING_LABELS.contains(&lowered.as_str())
}

/// Признак упаковки: скрывает меню действий независимо от текстового статуса
///
/// `markAsPacked` либо устаревший `trackingStatus` позиции (при его отсутствии
/// берётся метка заказа, см. `Order::tracking_label`) равен одной из меток
/// упаковки.
pub fn is_packed_indicator(item: &LineItem, order_tracking: &str) -> bool {
    if item.mark_as_packed {
        return true;
    }
    let tracking = item.tracking_status.as_deref().unwrap_or(order_tracking);
    is_packed_label(tracking)
}

pub fn is_order_cancelled(order_status: &str) -> bool {
    order_status == ORDER_STATUS_CANCELLED
}

/// Терминальная плашка для позиции
///
/// Отмена заказа перекрывает упаковку только в зоне действий администратора.
pub fn terminal_badge(item: &LineItem, order: &Order, role: ViewRole) -> Option<TerminalBadge> {
    if role == ViewRole::Admin && is_order_cancelled(&order.status) {
        return Some(TerminalBadge::Cancelled);
    }
    is_packed_indicator(item, order.tracking_label()).then_some(TerminalBadge::Packed)
}
