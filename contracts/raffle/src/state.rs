use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::Item;

pub const CONFIG: Item<RaffleConfig> = Item::new("config");
pub const ROUND: Item<Round> = Item::new("round");
/// Winner of the last settled round. Observability only, overwritten each
/// round; absent until the first settlement.
pub const RECENT_WINNER: Item<Addr> = Item::new("recent_winner");
/// Monotonic source of randomness request ids. The raffle assigns the id
/// and the coordinator echoes it back in the callback.
pub const REQUEST_SEQ: Item<u64> = Item::new("request_seq");

#[cw_serde]
pub struct RaffleConfig {
    pub vrf_oracle: Addr,
    /// Native denom the pool is held in.
    pub denom: String,
    pub entrance_fee: Uint128,
    /// Minimum seconds between draws.
    pub interval_seconds: u64,
    /// Gas-lane key hash forwarded to the coordinator, hex-encoded.
    pub key_hash: String,
    pub subscription_id: u64,
    pub request_confirmations: u64,
    pub callback_gas_limit: u64,
}

/// The raffle is Open for entries until a draw is triggered, then
/// Calculating until the coordinator delivers randomness.
#[cw_serde]
pub enum RaffleState {
    Open,
    Calculating,
}

#[cw_serde]
pub struct Round {
    pub state: RaffleState,
    /// Entrants in insertion order. One slot per paid deposit, so the same
    /// address may appear more than once.
    pub players: Vec<Addr>,
    pub start_time: Timestamp,
    /// Set exactly while a randomness request is outstanding.
    pub pending_request_id: Option<u64>,
}
