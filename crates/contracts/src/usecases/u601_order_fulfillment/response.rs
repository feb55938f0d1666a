use crate::domain::a002_picklist::PicklistSku;
use crate::enums::{FulfillmentAction, FulfillmentStatus, TerminalBadge, UserRole, ViewRole};
use crate::shared::fulfillment::{ProgressAnomaly, StaffScope};
use serde::{Deserialize, Serialize};

/// Проекция заказа для экрана исполнения
///
/// Вычисляется заново из каждого снимка, собственного состояния не хранит.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFulfillmentView {
    pub order_id: String,
    pub order_status: String,
    pub role: UserRole,
    pub view_role: ViewRole,
    /// Плашка уровня заказа (отмена, упаковка по статусу заказа)
    pub order_badge: Option<TerminalBadge>,
    pub lines: Vec<LineFulfillmentView>,
    /// Позиции без пиклиста по дилерам (только для администратора)
    pub dealer_groups: Vec<DealerGroupView>,
    /// Панель сотрудника склада
    pub staff: Option<StaffPanelView>,
}

impl OrderFulfillmentView {
    pub fn line(&self, sku: &str) -> Option<&LineFulfillmentView> {
        self.lines.iter().find(|line| line.sku == sku)
    }
}

/// Строка заказа на экране исполнения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineFulfillmentView {
    pub sku: String,
    pub product_name: Option<String>,
    pub quantity: u32,
    /// Канонический ID дилера ("" означает, что дилер не назначен)
    pub dealer_id: String,
    pub dealer_name: Option<String>,
    pub status: FulfillmentStatus,
    pub status_label: String,
    /// Признак упаковки (скрывает меню действий)
    pub packed: bool,
    pub terminal_badge: Option<TerminalBadge>,
    pub actions: Vec<FulfillmentAction>,
    pub scan_status: Option<String>,
    pub anomalies: Vec<ProgressAnomaly>,
}

/// Группа позиций одного дилера для массового создания пиклиста
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealerGroupView {
    pub dealer_id: String,
    pub dealer_name: String,
    pub sku_list: Vec<PicklistSku>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffPanelView {
    pub employee_id: Option<String>,
    pub scope: StaffScope,
    pub current_picklist_id: Option<String>,
    /// Действия над всем видимым набором (массовая упаковка)
    pub bulk_actions: Vec<FulfillmentAction>,
}

/// Результат действия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    /// Вызов выполнен, проекция перечитана
    Completed,
    /// Такое же действие уже выполняется, повторный вызов проигнорирован
    AlreadyInFlight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub outcome: ActionOutcome,
    pub view: Option<OrderFulfillmentView>,
}
