use crate::domain::common::{record_id, AggregateRoot};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Значение `scanStatus`, при котором сканирование пиклиста завершено
pub const SCAN_STATUS_COMPLETED: &str = "Completed";

/// Позиция пиклиста (SKU + количество)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PicklistSku {
    pub sku: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl PicklistSku {
    pub fn new(sku: impl Into<String>, quantity: u32) -> Self {
        Self {
            sku: sku.into(),
            quantity,
        }
    }
}

fn default_quantity() -> u32 {
    1
}

/// Пиклист: задание на сборку SKU одного дилера для одного заказа
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PicklistRecord")]
pub struct Picklist {
    pub picklist_id: String,
    pub order_id: String,
    pub dealer_id: String,
    /// Сотрудник склада, которому назначен пиклист
    pub fulfilment_staff: Option<String>,
    pub sku_list: Vec<PicklistSku>,
    /// Агрегированный статус сканирования (относится ко всему пиклисту)
    pub scan_status: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PicklistRecord {
    #[serde(default)]
    picklist_id: Option<Value>,
    #[serde(default, rename = "_id")]
    object_id: Option<Value>,
    #[serde(default)]
    order_id: Option<Value>,
    #[serde(default)]
    dealer_id: Option<Value>,
    #[serde(default)]
    fulfilment_staff: Option<String>,
    #[serde(default)]
    sku_list: Option<Vec<PicklistSku>>,
    #[serde(default)]
    scan_status: Option<String>,
}

impl From<PicklistRecord> for Picklist {
    fn from(record: PicklistRecord) -> Self {
        Self {
            picklist_id: record_id([record.picklist_id, record.object_id]),
            order_id: record_id([record.order_id]),
            dealer_id: record_id([record.dealer_id]),
            fulfilment_staff: record.fulfilment_staff,
            sku_list: record.sku_list.unwrap_or_default(),
            scan_status: record.scan_status,
        }
    }
}

impl Picklist {
    pub fn contains_sku(&self, sku: &str) -> bool {
        self.sku_list.iter().any(|entry| entry.sku == sku)
    }

    pub fn is_scan_completed(&self) -> bool {
        self.scan_status.as_deref() == Some(SCAN_STATUS_COMPLETED)
    }
}

impl AggregateRoot for Picklist {
    fn id(&self) -> &str {
        &self.picklist_id
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "picklists"
    }

    fn element_name() -> &'static str {
        "Picklist"
    }

    fn list_name() -> &'static str {
        "Picklists"
    }
}
