use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("invalid hex input: {field}")]
    InvalidHex { field: String },

    #[error("raffle is not open for entries")]
    NotOpen,

    #[error("expected a single coin of the entrance denom")]
    InvalidFunds,

    #[error("wrong denom: {denom}")]
    WrongDenom { denom: String },

    #[error("insufficient entrance fee: sent {sent}, required {required}")]
    InsufficientFunds { sent: Uint128, required: Uint128 },

    #[error(
        "upkeep not needed: balance {balance}, players {num_players}, state {raffle_state}"
    )]
    UpkeepNotNeeded {
        balance: Uint128,
        num_players: u32,
        raffle_state: String,
    },

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("unknown randomness request {request_id}")]
    UnknownRequest { request_id: u64 },

    #[error("randomness callback delivered no words")]
    EmptyRandomWords,

    #[error("cannot settle payout of {amount} to {winner}")]
    PayoutFailed { winner: String, amount: Uint128 },
}
