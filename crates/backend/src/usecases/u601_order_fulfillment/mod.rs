pub mod dealer_directory;
pub mod errors;
pub mod executor;
pub mod gateway;
pub mod in_flight;
pub mod order_service_client;
pub mod snapshot;

pub use errors::FulfillmentError;
pub use executor::FulfillmentExecutor;
pub use gateway::{GatewayError, OrderServiceGateway};
pub use order_service_client::OrderServiceClient;
