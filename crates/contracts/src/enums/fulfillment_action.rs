use serde::{Deserialize, Serialize};

/// Действия по исполнению заказа, доступность которых вычисляется по роли
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FulfillmentAction {
    AssignDealer,
    CreatePicklist,
    MarkPacked,
    Inspect,
    StopInspect,
}

impl FulfillmentAction {
    /// Технический код (ключ защиты от повторного запуска, логи)
    pub fn code(&self) -> &'static str {
        match self {
            FulfillmentAction::AssignDealer => "assign_dealer",
            FulfillmentAction::CreatePicklist => "create_picklist",
            FulfillmentAction::MarkPacked => "mark_packed",
            FulfillmentAction::Inspect => "inspect",
            FulfillmentAction::StopInspect => "stop_inspect",
        }
    }

    /// Подпись пункта меню
    pub fn display_name(&self) -> &'static str {
        match self {
            FulfillmentAction::AssignDealer => "Assign Dealer",
            FulfillmentAction::CreatePicklist => "Create Picklist",
            FulfillmentAction::MarkPacked => "Mark as Packed",
            FulfillmentAction::Inspect => "Inspect",
            FulfillmentAction::StopInspect => "Stop Inspection",
        }
    }
}
