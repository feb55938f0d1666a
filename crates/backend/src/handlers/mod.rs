pub mod u601_order_fulfillment;
