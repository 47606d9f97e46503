pub mod profiles;
pub mod reporting;
pub mod transactions;
