use serde::{Deserialize, Serialize};

/// Производный статус исполнения позиции заказа
///
/// Сериализуется как `{"kind": "..."}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum FulfillmentStatus {
    Pending,
    PicklistGenerated,
    InspectionInProgress,
    InspectionCompleted,
    Packed,
}

impl FulfillmentStatus {
    /// Получить человекочитаемое название
    pub fn label(&self) -> &'static str {
        match self {
            FulfillmentStatus::Pending => "Pending",
            FulfillmentStatus::PicklistGenerated => "Picklist Generated",
            FulfillmentStatus::InspectionInProgress => "Inspection In Progress",
            FulfillmentStatus::InspectionCompleted => "Inspection Completed",
            FulfillmentStatus::Packed => "Packed",
        }
    }

    pub fn all() -> [FulfillmentStatus; 5] {
        [
            FulfillmentStatus::Pending,
            FulfillmentStatus::PicklistGenerated,
            FulfillmentStatus::InspectionInProgress,
            FulfillmentStatus::InspectionCompleted,
            FulfillmentStatus::Packed,
        ]
    }
}

impl std::fmt::Display for FulfillmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Терминальная плашка вместо меню действий
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalBadge {
    Cancelled,
    Packed,
}
