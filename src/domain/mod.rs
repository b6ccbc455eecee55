pub mod discount;
pub mod member;
pub mod order;
pub mod value_objects;

pub use discount::*;
pub use member::*;
pub use order::*;
pub use value_objects::*;
