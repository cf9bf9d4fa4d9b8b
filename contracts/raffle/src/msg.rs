use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Timestamp, Uint128, Uint256};
use raffle_common::RandomnessRequest;

use crate::state::{RaffleConfig, RaffleState};

#[cw_serde]
pub struct InstantiateMsg {
    pub vrf_oracle: String,
    pub denom: String,
    pub entrance_fee: Uint128,
    /// Gas-lane key hash, hex-encoded.
    pub key_hash: String,
    pub subscription_id: u64,
    pub request_confirmations: u64,
    pub callback_gas_limit: u64,
    pub interval_seconds: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Enter the current round. The entrance fee is attached as funds;
    /// anything above the fee stays in the pool.
    Enter {},
    /// Trigger a draw if the upkeep conditions hold. Anyone can call.
    PerformUpkeep {},
    /// Randomness callback. Coordinator only.
    FulfillRandomness {
        request_id: u64,
        random_words: Vec<Uint256>,
    },
}

/// Execute message for the VRF coordinator.
/// Mirrors the RequestRandomWords variant of the coordinator's ExecuteMsg.
#[cw_serde]
pub enum OracleExecuteMsg {
    RequestRandomWords { request: RandomnessRequest },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(RaffleConfig)]
    Config {},

    #[returns(RaffleState)]
    RaffleState {},

    #[returns(RoundResponse)]
    Round {},

    #[returns(Option<Addr>)]
    Player { index: u32 },

    #[returns(u32)]
    NumPlayers {},

    #[returns(Option<Addr>)]
    RecentWinner {},

    #[returns(UpkeepResponse)]
    CheckUpkeep {},
}

#[cw_serde]
pub struct RoundResponse {
    pub state: RaffleState,
    pub start_time: Timestamp,
    pub num_players: u32,
    pub pending_request_id: Option<u64>,
}

/// Upkeep probe result. `upkeep_needed` is the conjunction of the four
/// flags; the rest is diagnostic context for keepers and dashboards.
#[cw_serde]
pub struct UpkeepResponse {
    pub upkeep_needed: bool,
    pub is_open: bool,
    pub interval_elapsed: bool,
    pub has_players: bool,
    pub has_balance: bool,
    pub pool_balance: Uint128,
    pub num_players: u32,
}
