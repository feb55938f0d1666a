//! Тела запросов записи во внешний сервис заказов
//!
//! Формат (camelCase) задаёт сервис заказов. Здесь только сборка полезной
//! нагрузки из последнего снимка, без проверки флагов позиции.

use super::dealer_id::is_placeholder;
use super::dealer_resolver::resolve_dealer_id;
use super::grouping::group_by_dealer;
use crate::domain::a001_order::Order;
use crate::domain::a002_picklist::{Picklist, PicklistSku};
use crate::enums::UserRole;
use serde::{Deserialize, Serialize};

/// Назначение дилера на один SKU
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuDealerAssignment {
    pub sku: String,
    pub dealer_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignDealersPayload {
    pub order_id: String,
    pub assignments: Vec<SkuDealerAssignment>,
}

impl AssignDealersPayload {
    pub fn validate(&self) -> Result<(), String> {
        if self.assignments.is_empty() {
            return Err("At least one dealer assignment is required".into());
        }
        for assignment in &self.assignments {
            if assignment.sku.trim().is_empty() {
                return Err("SKU is required for every assignment".into());
            }
            if is_placeholder(&assignment.dealer_id) {
                return Err(format!("Dealer is required for SKU {}", assignment.sku));
            }
        }
        Ok(())
    }
}

/// Режим создания пиклиста
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PicklistMode {
    /// Все позиции дилера без пиклиста (кнопка без выбранной позиции)
    Bulk { dealer_id: String },
    /// Только позиция, по которой кликнули
    Single { sku: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePicklistPayload {
    pub order_id: String,
    pub dealer_id: String,
    pub fulfilment_staff: String,
    pub sku_list: Vec<PicklistSku>,
}

/// Черновик запроса на создание пиклиста
///
/// Возвращает `None`, если предложить нечего (нет позиции, дилера или все
/// позиции дилера уже в пиклистах).
pub fn picklist_draft(
    order: &Order,
    mode: &PicklistMode,
    fulfilment_staff: &str,
) -> Option<CreatePicklistPayload> {
    let (dealer_id, sku_list) = match mode {
        PicklistMode::Bulk { dealer_id } => {
            let mut groups = group_by_dealer(&order.items);
            (dealer_id.clone(), groups.remove(dealer_id)?)
        }
        PicklistMode::Single { sku } => {
            let item = order.item(sku)?;
            let dealer_id = resolve_dealer_id(item);
            if dealer_id.is_empty() {
                return None;
            }
            let entry = PicklistSku::new(item.sku.clone(), item.quantity_or_default());
            (dealer_id, vec![entry])
        }
    };

    if sku_list.is_empty() {
        return None;
    }

    Some(CreatePicklistPayload {
        order_id: order.id.clone(),
        dealer_id,
        fulfilment_staff: fulfilment_staff.to_string(),
        sku_list,
    })
}

/// Что именно упаковывается: весь пиклист или одна позиция
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PackTarget {
    Picklist {
        #[serde(rename = "picklistId")]
        picklist_id: String,
    },
    Sku {
        sku: String,
    },
}

/// Данные о весе посылки
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageWeight {
    #[serde(default)]
    pub total_weight_kg: Option<f64>,
    #[serde(default)]
    pub box_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPackedPayload {
    pub order_id: String,
    pub dealer_id: String,
    #[serde(flatten)]
    pub target: PackTarget,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<PackageWeight>,
    /// Обход предусловий на стороне сервиса (Super-admin, Fulfillment-Admin)
    pub force_packing: bool,
}

impl MarkPackedPayload {
    /// Упаковка одной позиции (экран администратора)
    pub fn for_item(
        order: &Order,
        sku: &str,
        role: &UserRole,
        weight: Option<PackageWeight>,
    ) -> Option<Self> {
        let item = order.item(sku)?;
        Some(Self {
            order_id: order.id.clone(),
            dealer_id: resolve_dealer_id(item),
            target: PackTarget::Sku {
                sku: item.sku.clone(),
            },
            weight,
            force_packing: role.forces_packing(),
        })
    }

    /// Упаковка всего пиклиста сотрудника
    pub fn for_picklist(
        order_id: &str,
        picklist: &Picklist,
        role: &UserRole,
        weight: Option<PackageWeight>,
    ) -> Self {
        Self {
            order_id: order_id.to_string(),
            dealer_id: picklist.dealer_id.clone(),
            target: PackTarget::Picklist {
                picklist_id: picklist.picklist_id.clone(),
            },
            weight,
            force_packing: role.forces_packing(),
        }
    }
}

/// Начало и остановка проверки пиклиста используют одно тело
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectPicklistPayload {
    pub picklist_id: String,
    pub employee_id: String,
    pub sku: String,
}
