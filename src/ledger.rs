pub mod factory;
pub mod service;

pub use service::Ledger;
