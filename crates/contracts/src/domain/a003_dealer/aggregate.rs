use crate::domain::common::{record_id, AggregateRoot};
use serde::{Deserialize, Serialize};

/// Отображаемое имя для дилера, которого не удалось загрузить
pub const UNKNOWN_DEALER: &str = "Unknown Dealer";

/// Ссылка на дилера в том виде, в каком её отдаёт сервис заказов
///
/// Встречаются строковые и числовые ID, заполненные (populated) объекты
/// и строки-заглушки вроде "N/A". Каноническое значение получается через
/// `shared::fulfillment::dealer_id::normalize_dealer_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DealerRef {
    Text(String),
    Number(serde_json::Number),
    /// Заполненный объект дилера: важны только `_id` и `id`
    Object(serde_json::Map<String, serde_json::Value>),
    /// Любая другая форма (bool, массив, null), не распознаётся
    Other(serde_json::Value),
}

impl From<&str> for DealerRef {
    fn from(value: &str) -> Self {
        DealerRef::Text(value.to_string())
    }
}

impl From<String> for DealerRef {
    fn from(value: String) -> Self {
        DealerRef::Text(value)
    }
}

impl From<i64> for DealerRef {
    fn from(value: i64) -> Self {
        DealerRef::Number(value.into())
    }
}

/// Дилер
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "DealerRecord")]
pub struct Dealer {
    #[serde(rename = "dealerId")]
    pub id: String,
    pub trade_name: Option<String>,
    pub legal_name: Option<String>,
}

#[derive(Deserialize)]
struct DealerRecord {
    #[serde(default, rename = "dealerId")]
    dealer_id: Option<serde_json::Value>,
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default, rename = "_id")]
    object_id: Option<serde_json::Value>,
    #[serde(default)]
    trade_name: Option<String>,
    #[serde(default, rename = "tradeName")]
    trade_name_camel: Option<String>,
    #[serde(default)]
    legal_name: Option<String>,
    #[serde(default, rename = "legalName")]
    legal_name_camel: Option<String>,
}

impl From<DealerRecord> for Dealer {
    fn from(record: DealerRecord) -> Self {
        Self {
            id: record_id([record.dealer_id, record.id, record.object_id]),
            trade_name: record.trade_name.or(record.trade_name_camel),
            legal_name: record.legal_name.or(record.legal_name_camel),
        }
    }
}

impl Dealer {
    /// Имя для UI: торговое, затем юридическое, затем "Unknown Dealer"
    pub fn display_name(&self) -> String {
        [&self.trade_name, &self.legal_name]
            .into_iter()
            .flatten()
            .map(|name| name.trim())
            .find(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_DEALER)
            .to_string()
    }
}

impl AggregateRoot for Dealer {
    fn id(&self) -> &str {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "dealers"
    }

    fn element_name() -> &'static str {
        "Dealer"
    }

    fn list_name() -> &'static str {
        "Dealers"
    }
}
