use crate::domain::a003_dealer::DealerRef;
use crate::domain::common::{record_id, AggregateRoot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Статус отменённого заказа (сравнение точное, как его пишет сервис заказов)
pub const ORDER_STATUS_CANCELLED: &str = "Cancelled";

/// Данные покупателя и доставки
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
}

/// Запись явного назначения дилера на позицию заказа
///
/// Первая запись в `dealerMapped` является определяющей.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerAssignment {
    /// Ссылка на дилера (строка, число или заполненный объект)
    #[serde(default)]
    pub dealer_id: Option<DealerRef>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub assigned_at: Option<DateTime<Utc>>,
}

impl DealerAssignment {
    pub fn new(dealer_id: DealerRef) -> Self {
        Self {
            dealer_id: Some(dealer_id),
            ..Default::default()
        }
    }
}

/// Строка заказа (одна позиция = один SKU)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    /// Количество (если не задано, считается равным 1)
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub mrp: Option<f64>,
    #[serde(default)]
    pub selling_price: Option<f64>,

    /// Устаревшая ссылка на единственного дилера
    #[serde(default)]
    pub dealer_id: Option<DealerRef>,
    /// Явные назначения дилеров (приоритетнее `dealer_id`)
    #[serde(default, deserialize_with = "vec_or_null")]
    pub dealer_mapped: Vec<DealerAssignment>,

    // Флаги прогресса. Выставляются только сервисом заказов.
    #[serde(default, deserialize_with = "flag_or_null")]
    pub picklist_generated: bool,
    #[serde(default, deserialize_with = "flag_or_null")]
    pub inspection_started: bool,
    #[serde(default, deserialize_with = "flag_or_null")]
    pub inspection_completed: bool,
    #[serde(default, deserialize_with = "flag_or_null")]
    pub mark_as_packed: bool,

    /// Устаревший текстовый статус отслеживания
    #[serde(default)]
    pub tracking_status: Option<String>,
}

impl LineItem {
    pub fn new(sku: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            ..Default::default()
        }
    }

    /// Количество с подстановкой значения по умолчанию
    pub fn quantity_or_default(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }

    pub fn display_name(&self) -> &str {
        self.product_name.as_deref().unwrap_or(&self.sku)
    }
}

/// Заказ (агрегат внешнего сервиса заказов, только чтение)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "OrderRecord")]
pub struct Order {
    #[serde(rename = "orderId")]
    pub id: String,
    /// Свободный текст: "Cancelled", устаревшие метки отслеживания и т.п.
    pub status: String,
    pub tracking_status: Option<String>,
    pub customer_details: Option<CustomerDetails>,
    pub items: Vec<LineItem>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Заказ в том виде, в каком его отдаёт сервис (несколько ключей ID)
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderRecord {
    #[serde(default)]
    order_id: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "_id")]
    object_id: Option<Value>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    tracking_status: Option<String>,
    #[serde(default)]
    customer_details: Option<CustomerDetails>,
    #[serde(default, deserialize_with = "vec_or_null")]
    items: Vec<LineItem>,
    #[serde(default, deserialize_with = "vec_or_null")]
    skus: Vec<LineItem>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        Self {
            id: record_id([record.order_id, record.id, record.object_id]),
            status: record.status.unwrap_or_default(),
            tracking_status: record.tracking_status,
            customer_details: record.customer_details,
            items: if record.items.is_empty() {
                record.skus
            } else {
                record.items
            },
            created_at: record.created_at,
        }
    }
}

impl Order {
    pub fn is_cancelled(&self) -> bool {
        self.status == ORDER_STATUS_CANCELLED
    }

    /// Метка отслеживания уровня заказа (при её отсутствии статус заказа)
    pub fn tracking_label(&self) -> &str {
        self.tracking_status.as_deref().unwrap_or(&self.status)
    }

    pub fn item(&self, sku: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.sku == sku)
    }
}

impl AggregateRoot for Order {
    fn id(&self) -> &str {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "orders"
    }

    fn element_name() -> &'static str {
        "Order"
    }

    fn list_name() -> &'static str {
        "Orders"
    }
}

fn flag_or_null<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
