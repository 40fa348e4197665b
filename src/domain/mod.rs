//! Domain values exposed by the orders service layer.

pub mod order;
pub mod query;
pub mod types;
