pub mod account;
pub mod forest;
pub mod transaction;
