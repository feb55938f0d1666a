use crate::shared::fulfillment::payloads::{PackageWeight, SkuDealerAssignment};
use serde::{Deserialize, Serialize};

/// Запрос на назначение дилеров позициям заказа
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignDealersRequest {
    pub assignments: Vec<SkuDealerAssignment>,
}

/// Запрос на создание пиклиста
///
/// Если `sku` задан, пиклист создаётся только для этой позиции (режим одной
/// позиции), иначе для всех позиций дилера `dealer_id` без пиклиста.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePicklistRequest {
    #[serde(default)]
    pub dealer_id: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    /// Сотрудник склада, которому назначается пиклист
    pub fulfilment_staff: String,
}

/// Запрос на начало/остановку проверки позиции
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionRequest {
    pub sku: String,
    /// Если не задан, берётся пиклист сотрудника, содержащий SKU
    #[serde(default)]
    pub picklist_id: Option<String>,
}

/// Запрос на упаковку
///
/// Администратор упаковывает позицию (`sku`), сотрудник склада упаковывает весь свой
/// текущий пиклист (`sku` не задаётся).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkPackedRequest {
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub weight: Option<PackageWeight>,
}
