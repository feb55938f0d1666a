use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u601_order_fulfillment::OrderFulfillment;
use tower_http::cors::{Any, CorsLayer};

use crate::{handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(u601_routes())
        .layer(middleware::from_fn(system::middleware::request_logger))
        .layer(cors)
}

/// UseCase u601: исполнение заказа (все маршруты требуют JWT)
fn u601_routes() -> Router {
    let prefix = OrderFulfillment::route_prefix();

    Router::new()
        .route(
            &format!("{}/orders/:id/fulfillment", prefix),
            get(handlers::u601_order_fulfillment::get_fulfillment),
        )
        .route(
            &format!("{}/orders/:id/assign-dealers", prefix),
            post(handlers::u601_order_fulfillment::assign_dealers),
        )
        .route(
            &format!("{}/orders/:id/picklists", prefix),
            post(handlers::u601_order_fulfillment::create_picklist),
        )
        .route(
            &format!("{}/orders/:id/inspect", prefix),
            post(handlers::u601_order_fulfillment::inspect),
        )
        .route(
            &format!("{}/orders/:id/stop-inspection", prefix),
            post(handlers::u601_order_fulfillment::stop_inspection),
        )
        .route(
            &format!("{}/orders/:id/mark-packed", prefix),
            post(handlers::u601_order_fulfillment::mark_packed),
        )
        .layer(middleware::from_fn(system::auth::middleware::require_auth))
}
