use super::gateway::{GatewayError, OrderServiceGateway};
use crate::shared::config::OrderServiceConfig;
use async_trait::async_trait;
use contracts::domain::a001_order::Order;
use contracts::domain::a002_picklist::Picklist;
use contracts::domain::a003_dealer::Dealer;
use contracts::domain::common::AggregateRoot;
use contracts::shared::fulfillment::payloads::{
    AssignDealersPayload, CreatePicklistPayload, InspectPicklistPayload, MarkPackedPayload,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// HTTP-клиент сервиса заказов
pub struct OrderServiceClient {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl OrderServiceClient {
    pub fn new(config: &OrderServiceConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    /// Собрать URL из сегментов (каждый сегмент кодируется)
    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T, GatewayError> {
        tracing::debug!("GET {}", url);
        let response = self.authorized(self.client.get(url)).send().await?;
        let body = Self::check_status(response, what).await?;
        decode_body(body)
    }

    async fn post_json<B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
        what: &str,
    ) -> Result<(), GatewayError> {
        tracing::debug!("POST {}", url);
        let response = self
            .authorized(self.client.post(url))
            .json(body)
            .send()
            .await?;
        Self::check_status(response, what).await?;
        Ok(())
    }

    async fn check_status(response: reqwest::Response, what: &str) -> Result<String, GatewayError> {
        let status = response.status();
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            return Err(GatewayError::Status {
                code: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

/// Ответ может прийти как `{ "data": ... }` или без обёртки
fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => other,
    }
}

fn decode_body<T: DeserializeOwned>(body: String) -> Result<T, GatewayError> {
    let value: Value =
        serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))?;
    serde_json::from_value(unwrap_data(value)).map_err(|e| GatewayError::Decode(e.to_string()))
}

#[async_trait]
impl OrderServiceGateway for OrderServiceClient {
    async fn get_order_by_id(&self, order_id: &str) -> Result<Order, GatewayError> {
        let url = self.url(&[Order::collection_name(), order_id]);
        let what = format!("{} {}", Order::element_name(), order_id);
        self.get_json(&url, &what).await
    }

    async fn get_picklists_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Vec<Picklist>, GatewayError> {
        let url = self.url(&[Picklist::collection_name(), "order", order_id]);
        self.get_json(&url, Picklist::list_name()).await
    }

    async fn get_picklists_by_order_and_employee(
        &self,
        order_id: &str,
        employee_id: &str,
    ) -> Result<Vec<Picklist>, GatewayError> {
        let url = self.url(&[
            Picklist::collection_name(),
            "order",
            order_id,
            "employee",
            employee_id,
        ]);
        self.get_json(&url, Picklist::list_name()).await
    }

    async fn get_dealer_by_id(&self, dealer_id: &str) -> Result<Dealer, GatewayError> {
        let url = self.url(&[Dealer::collection_name(), dealer_id]);
        let what = format!("{} {}", Dealer::element_name(), dealer_id);
        self.get_json(&url, &what).await
    }

    async fn assign_dealers(&self, payload: &AssignDealersPayload) -> Result<(), GatewayError> {
        let url = self.url(&[Order::collection_name(), payload.order_id.as_str(), "assign-dealers"]);
        self.post_json(&url, payload, Order::element_name()).await
    }

    async fn create_picklist(&self, payload: &CreatePicklistPayload) -> Result<(), GatewayError> {
        let url = self.url(&[Picklist::collection_name()]);
        self.post_json(&url, payload, Picklist::element_name()).await
    }

    async fn mark_order_as_packed(&self, payload: &MarkPackedPayload) -> Result<(), GatewayError> {
        let url = self.url(&[Order::collection_name(), payload.order_id.as_str(), "mark-packed"]);
        self.post_json(&url, payload, Order::element_name()).await
    }

    async fn inspect_picklist(&self, payload: &InspectPicklistPayload) -> Result<(), GatewayError> {
        let url = self.url(&[Picklist::collection_name(), payload.picklist_id.as_str(), "inspect"]);
        self.post_json(&url, payload, Picklist::element_name()).await
    }

    async fn stop_picklist_inspection(
        &self,
        payload: &InspectPicklistPayload,
    ) -> Result<(), GatewayError> {
        let url = self.url(&[
            Picklist::collection_name(),
            payload.picklist_id.as_str(),
            "stop-inspection",
        ]);
        self.post_json(&url, payload, Picklist::element_name()).await
    }
}
