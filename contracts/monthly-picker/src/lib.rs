pub mod contract;
pub mod engine;
pub mod error;
pub mod execute;
pub mod ledger;
pub mod msg;
pub mod query;
pub mod roster;
pub mod state;

pub use crate::error::ContractError;
