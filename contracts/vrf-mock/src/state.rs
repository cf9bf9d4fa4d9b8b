use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<CoordinatorConfig> = Item::new("config");
pub const NEXT_SUB_ID: Item<u64> = Item::new("next_sub_id");
pub const SUBSCRIPTIONS: Map<u64, Subscription> = Map::new("subscriptions");
/// Outstanding requests keyed by (consumer, request_id). A request is
/// removed when fulfilled, so it can fire at most once.
pub const REQUESTS: Map<(&Addr, u64), PendingRequest> = Map::new("requests");

#[cw_serde]
pub struct CoordinatorConfig {
    /// Flat charge deducted from the subscription per fulfilled request.
    pub base_fee: Uint128,
    /// Per-gas price used by the real coordinator's fee formula; the mock
    /// keeps it for deploy parity but only charges the base fee.
    pub gas_price: Uint128,
}

#[cw_serde]
pub struct Subscription {
    pub owner: Addr,
    /// Virtual payment balance. The mock tracks a plain number; no real
    /// token moves.
    pub balance: Uint128,
    pub consumers: Vec<Addr>,
}

#[cw_serde]
pub struct PendingRequest {
    pub subscription_id: u64,
    pub key_hash: String,
    pub num_words: u32,
    pub callback_gas_limit: u64,
}
