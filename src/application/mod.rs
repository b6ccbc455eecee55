pub mod member;
pub mod order;
