use async_trait::async_trait;
use contracts::domain::a001_order::Order;
use contracts::domain::a002_picklist::Picklist;
use contracts::domain::a003_dealer::Dealer;
use contracts::shared::fulfillment::payloads::{
    AssignDealersPayload, CreatePicklistPayload, InspectPicklistPayload, MarkPackedPayload,
};
use thiserror::Error;

/// Ошибки обращения к сервису заказов
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("order service is unreachable: {0}")]
    Network(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("order service responded with {code}: {body}")]
    Status { code: u16, body: String },

    #[error("failed to decode order service response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

/// Сервис заказов, пиклистов и дилеров
///
/// Единственный источник истины для флагов позиций. Чтения и записи
/// проходят через этот трейт, чтобы executor можно было проверять на
/// фейковой реализации.
#[async_trait]
pub trait OrderServiceGateway: Send + Sync {
    async fn get_order_by_id(&self, order_id: &str) -> Result<Order, GatewayError>;

    async fn get_picklists_by_order_id(&self, order_id: &str)
        -> Result<Vec<Picklist>, GatewayError>;

    async fn get_picklists_by_order_and_employee(
        &self,
        order_id: &str,
        employee_id: &str,
    ) -> Result<Vec<Picklist>, GatewayError>;

    async fn get_dealer_by_id(&self, dealer_id: &str) -> Result<Dealer, GatewayError>;

    async fn assign_dealers(&self, payload: &AssignDealersPayload) -> Result<(), GatewayError>;

    async fn create_picklist(&self, payload: &CreatePicklistPayload) -> Result<(), GatewayError>;

    async fn mark_order_as_packed(&self, payload: &MarkPackedPayload) -> Result<(), GatewayError>;

    async fn inspect_picklist(&self, payload: &InspectPicklistPayload)
        -> Result<(), GatewayError>;

    async fn stop_picklist_inspection(
        &self,
        payload: &InspectPicklistPayload,
    ) -> Result<(), GatewayError>;
}
