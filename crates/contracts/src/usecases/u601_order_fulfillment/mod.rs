pub mod request;
pub mod response;

pub use request::{
    AssignDealersRequest, CreatePicklistRequest, InspectionRequest, MarkPackedRequest,
};
pub use response::{
    ActionOutcome, ActionResponse, DealerGroupView, LineFulfillmentView, OrderFulfillmentView,
    StaffPanelView,
};

use crate::usecases::common::UseCaseMetadata;

pub struct OrderFulfillment;

impl UseCaseMetadata for OrderFulfillment {
    fn usecase_index() -> &'static str {
        "u601"
    }

    fn usecase_name() -> &'static str {
        "order_fulfillment"
    }

    fn display_name() -> &'static str {
        "Order fulfillment"
    }

    fn description() -> &'static str {
        "Dealer routing, picklists, inspection and packing of order lines"
    }
}
