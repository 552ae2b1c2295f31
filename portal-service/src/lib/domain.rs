pub mod account;
pub mod dashboard;
