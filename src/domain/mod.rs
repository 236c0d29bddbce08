pub mod dish;
pub mod errors;
pub mod order;
pub mod ports;
