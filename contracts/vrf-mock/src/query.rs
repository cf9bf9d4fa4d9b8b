use cosmwasm_std::{to_json_binary, Binary, Deps, StdResult};

use crate::state::{CONFIG, REQUESTS, SUBSCRIPTIONS};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_subscription(deps: Deps, subscription_id: u64) -> StdResult<Binary> {
    let subscription = SUBSCRIPTIONS.may_load(deps.storage, subscription_id)?;
    to_json_binary(&subscription)
}

pub fn query_request(deps: Deps, consumer: String, request_id: u64) -> StdResult<Binary> {
    let consumer = deps.api.addr_validate(&consumer)?;
    let request = REQUESTS.may_load(deps.storage, (&consumer, request_id))?;
    to_json_binary(&request)
}
