use super::errors::FulfillmentError;
use super::gateway::OrderServiceGateway;
use super::in_flight::{ActionKey, InFlightRegistry};
use super::snapshot::OrderSnapshot;
use contracts::enums::FulfillmentAction;
use contracts::shared::fulfillment::dealer_id::is_placeholder;
use contracts::shared::fulfillment::dealer_resolver::resolve_dealer_id;
use contracts::shared::fulfillment::payloads::{
    picklist_draft, AssignDealersPayload, InspectPicklistPayload, MarkPackedPayload, PicklistMode,
};
use contracts::shared::fulfillment::staff_scope::{current_picklist_id, picklist_for_sku};
use contracts::system::auth::TokenClaims;
use contracts::usecases::u601_order_fulfillment::{
    ActionOutcome, ActionResponse, AssignDealersRequest, CreatePicklistRequest, InspectionRequest,
    MarkPackedRequest, OrderFulfillmentView,
};
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

/// Executor для UseCase исполнения заказа
///
/// Чтения строят проекцию из свежего снимка. Записи проксируются в сервис
/// заказов в отдельной задаче (закрытие диалога на клиенте вызов не
/// отменяет), после успешной записи заказ перечитывается.
#[derive(Clone)]
pub struct FulfillmentExecutor {
    gateway: Arc<dyn OrderServiceGateway>,
    in_flight: InFlightRegistry,
}

impl FulfillmentExecutor {
    pub fn new(gateway: Arc<dyn OrderServiceGateway>) -> Self {
        Self {
            gateway,
            in_flight: InFlightRegistry::new(),
        }
    }

    /// Проекция заказа для текущего пользователя
    pub async fn view(
        &self,
        order_id: &str,
        user: &TokenClaims,
    ) -> Result<OrderFulfillmentView, FulfillmentError> {
        let snapshot = OrderSnapshot::load(self.gateway.as_ref(), order_id, user).await?;
        Ok(snapshot.project(user))
    }

    /// Назначить дилеров позициям заказа
    pub async fn assign_dealers(
        &self,
        order_id: &str,
        user: &TokenClaims,
        request: AssignDealersRequest,
    ) -> Result<ActionResponse, FulfillmentError> {
        let payload = AssignDealersPayload {
            order_id: order_id.to_string(),
            assignments: request.assignments,
        };
        payload.validate().map_err(FulfillmentError::Validation)?;

        let mut skus: Vec<&str> = payload.assignments.iter().map(|a| a.sku.as_str()).collect();
        skus.sort_unstable();
        let key = ActionKey::new(order_id, FulfillmentAction::AssignDealer, skus.join(","));

        self.run_action(key, user, move |gateway| async move {
            gateway
                .assign_dealers(&payload)
                .await
                .map_err(|e| FulfillmentError::upstream("Failed to assign dealers", e))
        })
        .await
    }

    /// Создать пиклист: по одной позиции (`sku`) или по всем позициям дилера
    pub async fn create_picklist(
        &self,
        order_id: &str,
        user: &TokenClaims,
        request: CreatePicklistRequest,
    ) -> Result<ActionResponse, FulfillmentError> {
        if request.fulfilment_staff.trim().is_empty() {
            return Err(FulfillmentError::Validation(
                "Fulfilment staff is required".into(),
            ));
        }

        let mode = match (request.sku, request.dealer_id) {
            (Some(sku), _) if !sku.trim().is_empty() => PicklistMode::Single { sku },
            (_, Some(dealer_id)) if !is_placeholder(&dealer_id) => PicklistMode::Bulk { dealer_id },
            _ => {
                return Err(FulfillmentError::Validation(
                    "Either SKU or dealer is required".into(),
                ))
            }
        };
        // Ключ по дилеру в обоих режимах: одиночный и массовый пиклист
        // одного дилера не должны уйти в сервис одновременно
        let dealer_id = match &mode {
            PicklistMode::Bulk { dealer_id } => dealer_id.clone(),
            PicklistMode::Single { sku } => self.dealer_of_item(order_id, sku).await?,
        };
        let key = ActionKey::new(order_id, FulfillmentAction::CreatePicklist, dealer_id);
        let order_id = order_id.to_string();
        let fulfilment_staff = request.fulfilment_staff;

        self.run_action(key, user, move |gateway| async move {
            let order = gateway
                .get_order_by_id(&order_id)
                .await
                .map_err(|e| FulfillmentError::upstream("Failed to load order", e))?;
            let payload = picklist_draft(&order, &mode, &fulfilment_staff).ok_or_else(|| {
                FulfillmentError::Validation("No items are eligible for a picklist".into())
            })?;

            gateway
                .create_picklist(&payload)
                .await
                .map_err(|e| FulfillmentError::upstream("Failed to create picklist", e))
        })
        .await
    }

    /// Дилер позиции по свежему чтению заказа
    async fn dealer_of_item(&self, order_id: &str, sku: &str) -> Result<String, FulfillmentError> {
        let order = self
            .gateway
            .get_order_by_id(order_id)
            .await
            .map_err(|e| FulfillmentError::upstream("Failed to load order", e))?;
        let item = order.item(sku).ok_or_else(|| {
            FulfillmentError::Validation(format!("SKU {} is not in the order", sku))
        })?;

        let dealer_id = resolve_dealer_id(item);
        if dealer_id.is_empty() {
            return Err(FulfillmentError::Validation(format!(
                "SKU {} has no dealer assigned",
                sku
            )));
        }
        Ok(dealer_id)
    }

    /// Начать проверку позиции пиклиста
    pub async fn inspect(
        &self,
        order_id: &str,
        user: &TokenClaims,
        request: InspectionRequest,
    ) -> Result<ActionResponse, FulfillmentError> {
        self.run_inspection(order_id, user, request, FulfillmentAction::Inspect)
            .await
    }

    /// Остановить проверку позиции пиклиста
    pub async fn stop_inspection(
        &self,
        order_id: &str,
        user: &TokenClaims,
        request: InspectionRequest,
    ) -> Result<ActionResponse, FulfillmentError> {
        self.run_inspection(order_id, user, request, FulfillmentAction::StopInspect)
            .await
    }

    async fn run_inspection(
        &self,
        order_id: &str,
        user: &TokenClaims,
        request: InspectionRequest,
        action: FulfillmentAction,
    ) -> Result<ActionResponse, FulfillmentError> {
        let employee_id = user
            .employee_id()
            .ok_or_else(|| FulfillmentError::Validation("Employee ID is not available".into()))?
            .to_string();
        if request.sku.trim().is_empty() {
            return Err(FulfillmentError::Validation("SKU is required".into()));
        }

        let key = ActionKey::new(order_id, action, request.sku.clone());
        let order_id = order_id.to_string();
        let context = format!("{} failed", action.display_name());
        let claims = user.clone();

        self.run_action(key, user, move |gateway| async move {
            let picklist_id = match request.picklist_id.filter(|id| !id.trim().is_empty()) {
                Some(id) => id,
                None => {
                    let picklists = if claims.role.is_fulfillment_staff() {
                        gateway
                            .get_picklists_by_order_and_employee(&order_id, &employee_id)
                            .await
                    } else {
                        gateway.get_picklists_by_order_id(&order_id).await
                    }
                    .map_err(|e| FulfillmentError::upstream("Failed to load picklists", e))?;

                    picklist_for_sku(&picklists, &request.sku)
                        .map(|picklist| picklist.picklist_id.clone())
                        .ok_or_else(|| {
                            FulfillmentError::Validation(format!(
                                "No picklist contains SKU {}",
                                request.sku
                            ))
                        })?
                }
            };

            let payload = InspectPicklistPayload {
                picklist_id,
                employee_id,
                sku: request.sku,
            };
            let result = match action {
                FulfillmentAction::StopInspect => gateway.stop_picklist_inspection(&payload).await,
                _ => gateway.inspect_picklist(&payload).await,
            };
            result.map_err(|e| FulfillmentError::upstream(context, e))
        })
        .await
    }

    /// Упаковать позицию (`sku`) или весь текущий пиклист сотрудника
    pub async fn mark_packed(
        &self,
        order_id: &str,
        user: &TokenClaims,
        request: MarkPackedRequest,
    ) -> Result<ActionResponse, FulfillmentError> {
        let sku = request.sku.filter(|sku| !sku.trim().is_empty());
        let employee_id = user.employee_id().map(str::to_string);

        if sku.is_none() && !(user.role.is_fulfillment_staff() && employee_id.is_some()) {
            return Err(FulfillmentError::Validation("SKU is required".into()));
        }

        let target = match &sku {
            Some(sku) => format!("sku:{}", sku),
            None => "picklist".to_string(),
        };
        let key = ActionKey::new(order_id, FulfillmentAction::MarkPacked, target);
        let order_id = order_id.to_string();
        let role = user.role;
        let weight = request.weight;

        self.run_action(key, user, move |gateway| async move {
            let payload = match (sku, employee_id) {
                (Some(sku), _) => {
                    let order = gateway
                        .get_order_by_id(&order_id)
                        .await
                        .map_err(|e| FulfillmentError::upstream("Failed to load order", e))?;
                    MarkPackedPayload::for_item(&order, &sku, &role, weight).ok_or_else(|| {
                        FulfillmentError::Validation(format!("SKU {} is not in the order", sku))
                    })?
                }
                (None, Some(employee_id)) => {
                    let picklists = gateway
                        .get_picklists_by_order_and_employee(&order_id, &employee_id)
                        .await
                        .map_err(|e| FulfillmentError::upstream("Failed to load picklists", e))?;
                    let current = current_picklist_id(&picklists)
                        .and_then(|id| picklists.iter().find(|p| p.picklist_id == id))
                        .ok_or_else(|| {
                            FulfillmentError::Validation("No picklist is assigned".into())
                        })?;
                    MarkPackedPayload::for_picklist(&order_id, current, &role, weight)
                }
                (None, None) => {
                    return Err(FulfillmentError::Validation("SKU is required".into()));
                }
            };

            gateway
                .mark_order_as_packed(&payload)
                .await
                .map_err(|e| FulfillmentError::upstream("Failed to mark as packed", e))
        })
        .await
    }

    /// Выполнить запись в отдельной задаче под защитой от повторного запуска
    async fn run_action<F, Fut>(
        &self,
        key: ActionKey,
        user: &TokenClaims,
        call: F,
    ) -> Result<ActionResponse, FulfillmentError>
    where
        F: FnOnce(Arc<dyn OrderServiceGateway>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), FulfillmentError>> + Send + 'static,
    {
        let Some(guard) = self.in_flight.try_acquire(&key) else {
            tracing::info!("{} is already in flight, duplicate ignored", key);
            return Ok(ActionResponse {
                outcome: ActionOutcome::AlreadyInFlight,
                view: None,
            });
        };

        let action_id = Uuid::new_v4();
        let gateway = Arc::clone(&self.gateway);
        let user = user.clone();
        tracing::info!(%action_id, user = user.user_id(), "Starting {}", key);

        let task = tokio::spawn(async move {
            let _guard = guard;

            if let Err(e) = call(Arc::clone(&gateway)).await {
                tracing::error!(%action_id, "{} failed: {}", key, e);
                return Err(e);
            }
            tracing::info!(%action_id, "{} completed, reloading order", key);

            let view = match OrderSnapshot::load(gateway.as_ref(), &key.order_id, &user).await {
                Ok(snapshot) => Some(snapshot.project(&user)),
                Err(e) => {
                    tracing::warn!(%action_id, "Reload after {} failed: {}", key, e);
                    None
                }
            };

            Ok(ActionResponse {
                outcome: ActionOutcome::Completed,
                view,
            })
        });

        task.await
            .map_err(|e| FulfillmentError::Internal(format!("Action task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u601_order_fulfillment::dealer_directory::DealerDirectory;
    use crate::usecases::u601_order_fulfillment::gateway::GatewayError;
    use async_trait::async_trait;
    use contracts::domain::a001_order::{DealerAssignment, LineItem, Order};
    use contracts::domain::a002_picklist::{Picklist, PicklistSku};
    use contracts::domain::a003_dealer::{Dealer, UNKNOWN_DEALER};
    use contracts::enums::UserRole;
    use contracts::shared::fulfillment::payloads::{CreatePicklistPayload, SkuDealerAssignment};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct FakeGateway {
        order: Mutex<Order>,
        picklists: Vec<Picklist>,
        dealers: HashMap<String, Dealer>,
        fail_picklists: bool,
        fail_writes: bool,
        /// Если задан, запись ждёт сигнала
        gate: Option<Arc<Notify>>,
        order_reads: Mutex<usize>,
        writes: Mutex<Vec<String>>,
    }

    impl FakeGateway {
        fn writes(&self) -> Vec<String> {
            self.writes.lock().unwrap().clone()
        }

        fn order_reads(&self) -> usize {
            *self.order_reads.lock().unwrap()
        }

        async fn write(&self, call: String) -> Result<(), GatewayError> {
            self.writes.lock().unwrap().push(call);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.fail_writes {
                return Err(GatewayError::Status {
                    code: 409,
                    body: "rejected".into(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl OrderServiceGateway for FakeGateway {
        async fn get_order_by_id(&self, order_id: &str) -> Result<Order, GatewayError> {
            *self.order_reads.lock().unwrap() += 1;
            let order = self.order.lock().unwrap().clone();
            if order.id == order_id {
                Ok(order)
            } else {
                Err(GatewayError::NotFound(format!("Order {}", order_id)))
            }
        }

        async fn get_picklists_by_order_id(
            &self,
            _order_id: &str,
        ) -> Result<Vec<Picklist>, GatewayError> {
            if self.fail_picklists {
                return Err(GatewayError::Network("connection reset".into()));
            }
            Ok(self.picklists.clone())
        }

        async fn get_picklists_by_order_and_employee(
            &self,
            _order_id: &str,
            employee_id: &str,
        ) -> Result<Vec<Picklist>, GatewayError> {
            if self.fail_picklists {
                return Err(GatewayError::Network("connection reset".into()));
            }
            Ok(self
                .picklists
                .iter()
                .filter(|p| p.fulfilment_staff.as_deref() == Some(employee_id))
                .cloned()
                .collect())
        }

        async fn get_dealer_by_id(&self, dealer_id: &str) -> Result<Dealer, GatewayError> {
            self.dealers
                .get(dealer_id)
                .cloned()
                .ok_or_else(|| GatewayError::NotFound(format!("Dealer {}", dealer_id)))
        }

        async fn assign_dealers(&self, payload: &AssignDealersPayload) -> Result<(), GatewayError> {
            for assignment in &payload.assignments {
                let mut order = self.order.lock().unwrap();
                if let Some(item) = order.items.iter_mut().find(|i| i.sku == assignment.sku) {
                    item.dealer_mapped =
                        vec![DealerAssignment::new(assignment.dealer_id.clone().into())];
                }
            }
            self.write(format!("assign:{}", payload.assignments.len()))
                .await
        }

        async fn create_picklist(
            &self,
            payload: &CreatePicklistPayload,
        ) -> Result<(), GatewayError> {
            let skus: Vec<&str> = payload.sku_list.iter().map(|s| s.sku.as_str()).collect();
            self.write(format!("picklist:{}:{}", payload.dealer_id, skus.join(",")))
                .await
        }

        async fn mark_order_as_packed(
            &self,
            payload: &MarkPackedPayload,
        ) -> Result<(), GatewayError> {
            self.write(format!(
                "packed:{}:{}",
                serde_json::to_string(&payload.target).unwrap(),
                payload.force_packing
            ))
            .await
        }

        async fn inspect_picklist(
            &self,
            payload: &InspectPicklistPayload,
        ) -> Result<(), GatewayError> {
            self.write(format!("inspect:{}:{}", payload.picklist_id, payload.sku))
                .await
        }

        async fn stop_picklist_inspection(
            &self,
            payload: &InspectPicklistPayload,
        ) -> Result<(), GatewayError> {
            self.write(format!("stop:{}:{}", payload.picklist_id, payload.sku))
                .await
        }
    }

    fn item(sku: &str, dealer: &str, picklist_generated: bool) -> LineItem {
        let mut item = LineItem::new(sku);
        if !dealer.is_empty() {
            item.dealer_mapped = vec![DealerAssignment::new(dealer.into())];
        }
        item.picklist_generated = picklist_generated;
        item
    }

    fn order() -> Order {
        Order {
            id: "ORD-1".into(),
            status: "Confirmed".into(),
            items: vec![item("A", "D1", false), item("B", "D1", true), item("C", "", false)],
            ..Default::default()
        }
    }

    fn picklists() -> Vec<Picklist> {
        vec![Picklist {
            picklist_id: "PL-1".into(),
            order_id: "ORD-1".into(),
            dealer_id: "D1".into(),
            fulfilment_staff: Some("EMP-1".into()),
            sku_list: vec![PicklistSku::new("B", 1)],
            scan_status: Some("Completed".into()),
        }]
    }

    fn dealers() -> HashMap<String, Dealer> {
        HashMap::from([(
            "D1".to_string(),
            Dealer {
                id: "D1".into(),
                trade_name: Some("Acme Auto".into()),
                legal_name: None,
            },
        )])
    }

    fn gateway() -> FakeGateway {
        FakeGateway {
            order: Mutex::new(order()),
            picklists: picklists(),
            dealers: dealers(),
            ..Default::default()
        }
    }

    fn claims(role: UserRole, employee_id: Option<&str>) -> TokenClaims {
        TokenClaims {
            sub: "user-1".into(),
            username: "user".into(),
            role,
            employee_id: employee_id.map(str::to_string),
            exp: 0,
            iat: 0,
        }
    }

    fn admin() -> TokenClaims {
        claims(UserRole::FulfillmentAdmin, None)
    }

    fn staff() -> TokenClaims {
        claims(UserRole::FulfillmentStaff, Some("EMP-1"))
    }

    #[tokio::test]
    async fn test_admin_view() {
        let executor = FulfillmentExecutor::new(Arc::new(gateway()));
        let view = executor.view("ORD-1", &admin()).await.unwrap();

        assert_eq!(view.lines.len(), 3);
        let a = view.line("A").unwrap();
        assert_eq!(a.dealer_name.as_deref(), Some("Acme Auto"));
        assert_eq!(a.actions, vec![FulfillmentAction::CreatePicklist]);
        assert_eq!(view.line("B").unwrap().scan_status.as_deref(), Some("Completed"));
        assert_eq!(
            view.line("C").unwrap().actions,
            vec![FulfillmentAction::AssignDealer]
        );
    }

    #[tokio::test]
    async fn test_unknown_order_is_not_found() {
        let executor = FulfillmentExecutor::new(Arc::new(gateway()));
        let err = executor.view("ORD-404", &admin()).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_picklist_fetch_failure_degrades() {
        let executor = FulfillmentExecutor::new(Arc::new(FakeGateway {
            fail_picklists: true,
            ..gateway()
        }));

        let view = executor.view("ORD-1", &admin()).await.unwrap();
        assert_eq!(view.lines.len(), 3);
        assert!(view.lines.iter().all(|line| line.scan_status.is_none()));

        let staff_view = executor.view("ORD-1", &staff()).await.unwrap();
        assert!(staff_view.lines.is_empty());
    }

    #[tokio::test]
    async fn test_dealer_lookup_failure_falls_back() {
        let gateway = gateway();
        {
            let mut order = gateway.order.lock().unwrap();
            order.items.push(item("D", "D404", false));
        }
        let executor = FulfillmentExecutor::new(Arc::new(gateway));

        let view = executor.view("ORD-1", &admin()).await.unwrap();
        assert_eq!(view.line("D").unwrap().dealer_name.as_deref(), Some(UNKNOWN_DEALER));
    }

    #[tokio::test]
    async fn test_dealer_directory_looks_up_each_id_once() {
        let gateway = gateway();
        let directory = DealerDirectory::load(
            &gateway,
            vec!["D1".to_string(), "D1".to_string(), "D9".to_string()],
        )
        .await;

        assert_eq!(directory.names().len(), 2);
        assert_eq!(directory.name_of("D1"), "Acme Auto");
        assert_eq!(directory.name_of("D9"), UNKNOWN_DEALER);
    }

    #[tokio::test]
    async fn test_assign_dealers_refetches_order() {
        let gateway = Arc::new(gateway());
        let executor = FulfillmentExecutor::new(gateway.clone());

        let response = executor
            .assign_dealers(
                "ORD-1",
                &admin(),
                AssignDealersRequest {
                    assignments: vec![SkuDealerAssignment {
                        sku: "C".into(),
                        dealer_id: "D1".into(),
                    }],
                },
            )
            .await
            .unwrap();

        assert_eq!(response.outcome, ActionOutcome::Completed);
        assert_eq!(gateway.writes(), vec!["assign:1".to_string()]);
        assert_eq!(gateway.order_reads(), 1);

        let view = response.view.unwrap();
        let c = view.line("C").unwrap();
        assert_eq!(c.dealer_id, "D1");
        assert_eq!(c.actions, vec![FulfillmentAction::CreatePicklist]);
    }

    #[tokio::test]
    async fn test_invalid_assignment_is_rejected_before_upstream() {
        let gateway = Arc::new(gateway());
        let executor = FulfillmentExecutor::new(gateway.clone());

        let err = executor
            .assign_dealers(
                "ORD-1",
                &admin(),
                AssignDealersRequest {
                    assignments: vec![SkuDealerAssignment {
                        sku: "C".into(),
                        dealer_id: "N/A".into(),
                    }],
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, FulfillmentError::Validation(_)));
        assert!(gateway.writes().is_empty());
    }

    #[tokio::test]
    async fn test_bulk_picklist_uses_dealer_group() {
        let gateway = Arc::new(gateway());
        let executor = FulfillmentExecutor::new(gateway.clone());

        let response = executor
            .create_picklist(
                "ORD-1",
                &admin(),
                CreatePicklistRequest {
                    dealer_id: Some("D1".into()),
                    sku: None,
                    fulfilment_staff: "EMP-1".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(response.outcome, ActionOutcome::Completed);
        assert_eq!(gateway.writes(), vec!["picklist:D1:A".to_string()]);
        // чтение для черновика и перечитывание после записи
        assert_eq!(gateway.order_reads(), 2);
    }

    #[tokio::test]
    async fn test_single_and_bulk_picklist_of_one_dealer_do_not_overlap() {
        let gate = Arc::new(Notify::new());
        let gateway = Arc::new(FakeGateway {
            gate: Some(gate.clone()),
            ..gateway()
        });
        let executor = FulfillmentExecutor::new(gateway.clone());

        let single = {
            let executor = executor.clone();
            tokio::spawn(async move {
                executor
                    .create_picklist(
                        "ORD-1",
                        &admin(),
                        CreatePicklistRequest {
                            dealer_id: None,
                            sku: Some("A".into()),
                            fulfilment_staff: "EMP-1".into(),
                        },
                    )
                    .await
            })
        };
        while gateway.writes().is_empty() {
            tokio::task::yield_now().await;
        }

        let bulk = executor
            .create_picklist(
                "ORD-1",
                &admin(),
                CreatePicklistRequest {
                    dealer_id: Some("D1".into()),
                    sku: None,
                    fulfilment_staff: "EMP-1".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(bulk.outcome, ActionOutcome::AlreadyInFlight);

        gate.notify_one();
        let single = single.await.unwrap().unwrap();
        assert_eq!(single.outcome, ActionOutcome::Completed);
        assert_eq!(gateway.writes(), vec!["picklist:D1:A".to_string()]);
    }

    #[tokio::test]
    async fn test_single_picklist_without_dealer_is_rejected() {
        let gateway = Arc::new(gateway());
        let executor = FulfillmentExecutor::new(gateway.clone());

        let err = executor
            .create_picklist(
                "ORD-1",
                &admin(),
                CreatePicklistRequest {
                    dealer_id: None,
                    sku: Some("C".into()),
                    fulfilment_staff: "EMP-1".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FulfillmentError::Validation(_)));
        assert!(gateway.writes().is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_is_retryable_error() {
        let gateway = Arc::new(FakeGateway {
            fail_writes: true,
            ..gateway()
        });
        let executor = FulfillmentExecutor::new(gateway.clone());

        let err = executor
            .mark_packed(
                "ORD-1",
                &admin(),
                MarkPackedRequest {
                    sku: Some("B".into()),
                    weight: None,
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_GATEWAY);
        assert!(err.to_use_case_error().retryable);
        // после ошибки ключ освобождён, повтор снова идёт в сервис
        let _ = executor
            .mark_packed(
                "ORD-1",
                &admin(),
                MarkPackedRequest {
                    sku: Some("B".into()),
                    weight: None,
                },
            )
            .await;
        assert_eq!(gateway.writes().len(), 2);
    }

    #[tokio::test]
    async fn test_staff_packs_current_picklist() {
        let gateway = Arc::new(gateway());
        let executor = FulfillmentExecutor::new(gateway.clone());

        let response = executor
            .mark_packed("ORD-1", &staff(), MarkPackedRequest::default())
            .await
            .unwrap();

        assert_eq!(response.outcome, ActionOutcome::Completed);
        assert_eq!(
            gateway.writes(),
            vec![r#"packed:{"picklistId":"PL-1"}:false"#.to_string()]
        );
    }

    #[tokio::test]
    async fn test_admin_pack_without_sku_is_rejected() {
        let executor = FulfillmentExecutor::new(Arc::new(gateway()));
        let err = executor
            .mark_packed("ORD-1", &admin(), MarkPackedRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, FulfillmentError::Validation(_)));
    }

    #[tokio::test]
    async fn test_inspection_finds_staff_picklist() {
        let gateway = Arc::new(gateway());
        let executor = FulfillmentExecutor::new(gateway.clone());

        executor
            .inspect(
                "ORD-1",
                &staff(),
                InspectionRequest {
                    sku: "B".into(),
                    picklist_id: None,
                },
            )
            .await
            .unwrap();
        executor
            .stop_inspection(
                "ORD-1",
                &staff(),
                InspectionRequest {
                    sku: "B".into(),
                    picklist_id: Some("PL-1".into()),
                },
            )
            .await
            .unwrap();

        assert_eq!(
            gateway.writes(),
            vec!["inspect:PL-1:B".to_string(), "stop:PL-1:B".to_string()]
        );
    }

    #[tokio::test]
    async fn test_inspection_requires_employee_id() {
        let executor = FulfillmentExecutor::new(Arc::new(gateway()));
        let err = executor
            .inspect(
                "ORD-1",
                &claims(UserRole::FulfillmentStaff, None),
                InspectionRequest {
                    sku: "B".into(),
                    picklist_id: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FulfillmentError::Validation(_)));
    }

    #[tokio::test]
    async fn test_duplicate_action_in_flight_is_ignored() {
        let gate = Arc::new(Notify::new());
        let gateway = Arc::new(FakeGateway {
            gate: Some(gate.clone()),
            ..gateway()
        });
        let executor = FulfillmentExecutor::new(gateway.clone());
        let request = || MarkPackedRequest {
            sku: Some("B".into()),
            weight: None,
        };

        let first = {
            let executor = executor.clone();
            let request = request();
            tokio::spawn(async move { executor.mark_packed("ORD-1", &admin(), request).await })
        };

        while gateway.writes().is_empty() {
            tokio::task::yield_now().await;
        }

        let second = executor
            .mark_packed("ORD-1", &admin(), request())
            .await
            .unwrap();
        assert_eq!(second.outcome, ActionOutcome::AlreadyInFlight);
        assert!(second.view.is_none());

        gate.notify_one();
        let first = first.await.unwrap().unwrap();
        assert_eq!(first.outcome, ActionOutcome::Completed);
        assert!(first.view.is_some());
        assert_eq!(gateway.writes().len(), 1);
    }

    #[tokio::test]
    async fn test_action_completes_when_caller_goes_away() {
        let gate = Arc::new(Notify::new());
        let gateway = Arc::new(FakeGateway {
            gate: Some(gate.clone()),
            ..gateway()
        });
        let executor = FulfillmentExecutor::new(gateway.clone());

        let caller = {
            let executor = executor.clone();
            tokio::spawn(async move {
                executor
                    .mark_packed(
                        "ORD-1",
                        &admin(),
                        MarkPackedRequest {
                            sku: Some("B".into()),
                            weight: None,
                        },
                    )
                    .await
            })
        };
        while gateway.writes().is_empty() {
            tokio::task::yield_now().await;
        }

        caller.abort();
        gate.notify_one();

        let key = ActionKey::new("ORD-1", FulfillmentAction::MarkPacked, "sku:B");
        while executor.in_flight.is_in_flight(&key) {
            tokio::task::yield_now().await;
        }
        // запись и перечитывание прошли без вызывающей стороны
        assert_eq!(gateway.order_reads(), 2);
    }
}
