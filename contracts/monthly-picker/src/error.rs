use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("invalid participant name: {reason}")]
    InvalidName { reason: String },

    #[error("participant {name} already exists")]
    DuplicateName { name: String },

    #[error("a winner is already recorded for {month}")]
    AlreadyRecorded { month: String },

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("roster is empty; add participants before picking")]
    EmptyRoster,

    #[error("roster is full ({max} participants)")]
    RosterFull { max: u32 },

    #[error("invalid month key: {value} (expected YYYY-M)")]
    InvalidMonthKey { value: String },

    #[error("invalid config: {field} {reason}")]
    InvalidConfig { field: String, reason: String },
}
