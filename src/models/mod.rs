pub mod order_field;
pub mod position;

pub use order_field::{OrderField, UnknownOrderField};
pub use position::{InvalidUpdated, Position, Updated};
