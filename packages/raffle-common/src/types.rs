use cosmwasm_schema::cw_serde;

/// A randomness request as forwarded from a consumer contract to the VRF
/// coordinator. The consumer assigns `request_id` and the coordinator echoes
/// it back in the fulfillment callback, so the two sides correlate request
/// and response without a synchronous return value.
#[cw_serde]
pub struct RandomnessRequest {
    pub request_id: u64,
    /// Gas-lane key hash identifying the oracle job, hex-encoded.
    pub key_hash: String,
    /// Subscription paying for this request.
    pub subscription_id: u64,
    /// Blocks the oracle waits before responding.
    pub request_confirmations: u64,
    /// Gas limit the oracle attaches to the callback.
    pub callback_gas_limit: u64,
    /// Number of random words to deliver.
    pub num_words: u32,
}
