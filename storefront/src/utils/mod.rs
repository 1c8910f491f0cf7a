//! Utility modules

pub mod logger;
pub mod order_link;
pub mod validation;

pub use order_link::order_link;
