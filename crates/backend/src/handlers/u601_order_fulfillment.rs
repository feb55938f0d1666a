use axum::{extract::Path, http::StatusCode, Json};
use contracts::usecases::common::UseCaseError;
use contracts::usecases::u601_order_fulfillment::{
    ActionResponse, AssignDealersRequest, CreatePicklistRequest, InspectionRequest,
    MarkPackedRequest, OrderFulfillmentView,
};
use once_cell::sync::OnceCell;

use crate::system::auth::CurrentUser;
use crate::usecases::u601_order_fulfillment::{FulfillmentError, FulfillmentExecutor};

static FULFILLMENT_EXECUTOR: OnceCell<FulfillmentExecutor> = OnceCell::new();

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<UseCaseError>)>;

/// Установить executor (вызывается один раз при старте)
pub fn initialize(executor: FulfillmentExecutor) -> anyhow::Result<()> {
    FULFILLMENT_EXECUTOR
        .set(executor)
        .map_err(|_| anyhow::anyhow!("Fulfillment executor already initialized"))
}

fn executor() -> Result<&'static FulfillmentExecutor, (StatusCode, Json<UseCaseError>)> {
    FULFILLMENT_EXECUTOR.get().ok_or_else(|| {
        tracing::error!("Fulfillment executor is not initialized");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(UseCaseError::internal("Service is not initialized")),
        )
    })
}

fn into_api_error(e: FulfillmentError) -> (StatusCode, Json<UseCaseError>) {
    (e.status_code(), Json(e.to_use_case_error()))
}

/// GET /api/u601/orders/:id/fulfillment
pub async fn get_fulfillment(
    CurrentUser(user): CurrentUser,
    Path(order_id): Path<String>,
) -> ApiResult<OrderFulfillmentView> {
    match executor()?.view(&order_id, &user).await {
        Ok(view) => Ok(Json(view)),
        Err(e) => {
            tracing::error!("Failed to build fulfillment view for {}: {}", order_id, e);
            Err(into_api_error(e))
        }
    }
}

/// POST /api/u601/orders/:id/assign-dealers
pub async fn assign_dealers(
    CurrentUser(user): CurrentUser,
    Path(order_id): Path<String>,
    Json(request): Json<AssignDealersRequest>,
) -> ApiResult<ActionResponse> {
    executor()?
        .assign_dealers(&order_id, &user, request)
        .await
        .map(Json)
        .map_err(into_api_error)
}

/// POST /api/u601/orders/:id/picklists
pub async fn create_picklist(
    CurrentUser(user): CurrentUser,
    Path(order_id): Path<String>,
    Json(request): Json<CreatePicklistRequest>,
) -> ApiResult<ActionResponse> {
    executor()?
        .create_picklist(&order_id, &user, request)
        .await
        .map(Json)
        .map_err(into_api_error)
}

/// POST /api/u601/orders/:id/inspect
pub async fn inspect(
    CurrentUser(user): CurrentUser,
    Path(order_id): Path<String>,
    Json(request): Json<InspectionRequest>,
) -> ApiResult<ActionResponse> {
    executor()?
        .inspect(&order_id, &user, request)
        .await
        .map(Json)
        .map_err(into_api_error)
}

/// POST /api/u601/orders/:id/stop-inspection
pub async fn stop_inspection(
    CurrentUser(user): CurrentUser,
    Path(order_id): Path<String>,
    Json(request): Json<InspectionRequest>,
) -> ApiResult<ActionResponse> {
    executor()?
        .stop_inspection(&order_id, &user, request)
        .await
        .map(Json)
        .map_err(into_api_error)
}

/// POST /api/u601/orders/:id/mark-packed
pub async fn mark_packed(
    CurrentUser(user): CurrentUser,
    Path(order_id): Path<String>,
    Json(request): Json<MarkPackedRequest>,
) -> ApiResult<ActionResponse> {
    executor()?
        .mark_packed(&order_id, &user, request)
        .await
        .map(Json)
        .map_err(into_api_error)
}
