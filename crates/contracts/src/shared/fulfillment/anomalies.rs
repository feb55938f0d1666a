use crate::domain::a001_order::LineItem;
use serde::{Deserialize, Serialize};

/// Комбинации флагов, нарушающие монотонность жизненного цикла позиции
///
/// Сервис заказов этот инвариант не гарантирует. Статус позиции из-за
/// аномалии не меняется, она только репортится.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressAnomaly {
    /// `inspectionCompleted` без `inspectionStarted`
    InspectionCompletedWithoutStart,
    /// Проверка начата, но пиклист не создан
    InspectionWithoutPicklist,
    /// `markAsPacked` без `picklistGenerated`
    PackedWithoutPicklist,
}

impl ProgressAnomaly {
    pub fn description(&self) -> &'static str {
        match self {
            ProgressAnomaly::InspectionCompletedWithoutStart => {
                "inspection completed but never started"
            }
            ProgressAnomaly::InspectionWithoutPicklist => {
                "inspection started before a picklist was generated"
            }
            ProgressAnomaly::PackedWithoutPicklist => {
                "marked as packed without a picklist"
            }
        }
    }
}

pub fn detect_anomalies(item: &LineItem) -> Vec<ProgressAnomaly> {
    let mut anomalies = Vec::new();

    if item.inspection_completed && !item.inspection_started {
        anomalies.push(ProgressAnomaly::InspectionCompletedWithoutStart);
    }
    if item.inspection_started && !item.picklist_generated {
        anomalies.push(ProgressAnomaly::InspectionWithoutPicklist);
    }
    if item.mark_as_packed && !item.picklist_generated {
        anomalies.push(ProgressAnomaly::PackedWithoutPicklist);
    }

    anomalies
}
