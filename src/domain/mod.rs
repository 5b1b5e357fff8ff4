pub mod account;
pub mod money;
pub mod ports;
pub mod scenario;
