mod discount_service;
mod errors;
mod order_service;

pub use discount_service::DiscountService;
pub use errors::{OrderApplicationError, Result};
pub use order_service::OrderService;
