use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("subscription {subscription_id} not found")]
    SubscriptionNotFound { subscription_id: u64 },

    #[error("{consumer} is not a registered consumer of the subscription")]
    ConsumerNotRegistered { consumer: String },

    #[error("request {request_id} already exists for this consumer")]
    RequestAlreadyExists { request_id: u64 },

    #[error("request {request_id} not found for this consumer")]
    RequestNotFound { request_id: u64 },

    #[error("insufficient subscription balance: need {needed}, have {available}")]
    InsufficientSubscriptionBalance { needed: Uint128, available: Uint128 },

    #[error("override must supply exactly {expected} words, got {got}")]
    InvalidWordCount { expected: u32, got: u32 },
}
