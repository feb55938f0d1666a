use backend::usecases::u601_order_fulfillment::{FulfillmentExecutor, OrderServiceClient};
use backend::{handlers, routes, shared, system};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    system::auth::jwt::initialize(&config.auth.jwt_secret);

    let client = OrderServiceClient::new(&config.order_service)?;
    handlers::u601_order_fulfillment::initialize(FulfillmentExecutor::new(Arc::new(client)))?;
    tracing::info!("Order service: {}", config.order_service.base_url);

    let app = routes::configure_routes();

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
