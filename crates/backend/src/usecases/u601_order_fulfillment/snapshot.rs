use super::dealer_directory::DealerDirectory;
use super::errors::FulfillmentError;
use super::gateway::OrderServiceGateway;
use contracts::domain::a001_order::Order;
use contracts::domain::a002_picklist::Picklist;
use contracts::shared::fulfillment::{
    dealer_ids_needing_lookup, detect_anomalies, project, resolve_staff_scope, ProjectionInput,
};
use contracts::system::auth::TokenClaims;
use contracts::usecases::u601_order_fulfillment::OrderFulfillmentView;

/// Последний снимок заказа, пиклистов и имён дилеров
///
/// Всё производное состояние вычисляется из снимка и не кэшируется между
/// запросами.
pub struct OrderSnapshot {
    pub order: Order,
    /// Все пиклисты заказа (для администратора)
    pub picklists: Vec<Picklist>,
    /// Пиклисты текущего сотрудника склада
    pub staff_picklists: Vec<Picklist>,
    pub dealers: DealerDirectory,
}

impl OrderSnapshot {
    /// Загрузить снимок
    ///
    /// Без заказа работать нельзя, поэтому ошибка чтения заказа фатальна.
    /// Ошибки чтения пиклистов и дилеров деградируют до пустых данных.
    pub async fn load(
        gateway: &dyn OrderServiceGateway,
        order_id: &str,
        user: &TokenClaims,
    ) -> Result<Self, FulfillmentError> {
        let order = gateway
            .get_order_by_id(order_id)
            .await
            .map_err(|e| FulfillmentError::upstream(format!("Failed to load order {}", order_id), e))?;

        for item in &order.items {
            for anomaly in detect_anomalies(item) {
                tracing::warn!(
                    "Order {} SKU {}: {}",
                    order.id,
                    item.sku,
                    anomaly.description()
                );
            }
        }

        let is_staff = user.role.is_fulfillment_staff();

        let picklists = if is_staff {
            Vec::new()
        } else {
            gateway
                .get_picklists_by_order_id(order_id)
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!("Picklists for order {} unavailable: {}", order_id, e);
                    Vec::new()
                })
        };

        let staff_picklists = match (is_staff, user.employee_id()) {
            (true, Some(employee_id)) => gateway
                .get_picklists_by_order_and_employee(order_id, employee_id)
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!(
                        "Picklists of employee {} for order {} unavailable: {}",
                        employee_id,
                        order_id,
                        e
                    );
                    Vec::new()
                }),
            _ => Vec::new(),
        };

        let scope = resolve_staff_scope(
            &user.role,
            user.employee_id(),
            &staff_picklists,
            &order.items,
        );
        let dealer_ids = dealer_ids_needing_lookup(scope.visible_items(&order.items));
        let dealers = DealerDirectory::load(gateway, dealer_ids).await;

        Ok(Self {
            order,
            picklists,
            staff_picklists,
            dealers,
        })
    }

    pub fn project(&self, user: &TokenClaims) -> OrderFulfillmentView {
        project(&ProjectionInput {
            order: &self.order,
            picklists: &self.picklists,
            staff_picklists: &self.staff_picklists,
            role: user.role,
            employee_id: user.employee_id(),
            dealer_names: self.dealers.names(),
        })
    }
}
