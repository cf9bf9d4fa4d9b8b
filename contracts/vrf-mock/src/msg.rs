use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Uint128, Uint256};
use raffle_common::RandomnessRequest;

use crate::state::{CoordinatorConfig, PendingRequest, Subscription};

#[cw_serde]
pub struct InstantiateMsg {
    pub base_fee: Uint128,
    pub gas_price: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Open a new subscription owned by the sender.
    CreateSubscription {},
    /// Credit a subscription's virtual balance. Anyone can fund.
    FundSubscription {
        subscription_id: u64,
        amount: Uint128,
    },
    /// Register a consumer contract on a subscription. Owner only.
    AddConsumer {
        subscription_id: u64,
        consumer: String,
    },
    /// Store a randomness request from a registered consumer.
    RequestRandomWords { request: RandomnessRequest },
    /// Deliver derived words for an outstanding request. Anyone can call;
    /// the caller stands in for the VRF network.
    FulfillRandomWords { consumer: String, request_id: u64 },
    /// Deliver caller-chosen words instead of derived ones.
    FulfillRandomWordsWithOverride {
        consumer: String,
        request_id: u64,
        words: Vec<Uint256>,
    },
}

/// Callback message sent to the requesting consumer.
/// Mirrors the FulfillRandomness variant of the raffle's ExecuteMsg.
#[cw_serde]
pub enum ConsumerExecuteMsg {
    FulfillRandomness {
        request_id: u64,
        random_words: Vec<Uint256>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(CoordinatorConfig)]
    Config {},

    #[returns(Option<Subscription>)]
    Subscription { subscription_id: u64 },

    #[returns(Option<PendingRequest>)]
    Request { consumer: String, request_id: u64 },
}
