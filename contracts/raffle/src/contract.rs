use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::query;
use crate::state::{RaffleConfig, RaffleState, Round, CONFIG, REQUEST_SEQ, ROUND};

const CONTRACT_NAME: &str = "crates.io:raffle";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.entrance_fee.is_zero() {
        return Err(ContractError::InvalidConfig {
            reason: "entrance_fee must be positive".to_string(),
        });
    }
    if msg.interval_seconds == 0 {
        return Err(ContractError::InvalidConfig {
            reason: "interval_seconds must be positive".to_string(),
        });
    }
    if msg.denom.is_empty() {
        return Err(ContractError::InvalidConfig {
            reason: "denom must not be empty".to_string(),
        });
    }
    hex::decode(&msg.key_hash).map_err(|_| ContractError::InvalidHex {
        field: "key_hash".to_string(),
    })?;

    let config = RaffleConfig {
        vrf_oracle: deps.api.addr_validate(&msg.vrf_oracle)?,
        denom: msg.denom,
        entrance_fee: msg.entrance_fee,
        interval_seconds: msg.interval_seconds,
        key_hash: msg.key_hash,
        subscription_id: msg.subscription_id,
        request_confirmations: msg.request_confirmations,
        callback_gas_limit: msg.callback_gas_limit,
    };
    CONFIG.save(deps.storage, &config)?;

    ROUND.save(
        deps.storage,
        &Round {
            state: RaffleState::Open,
            players: Vec::new(),
            start_time: env.block.time,
            pending_request_id: None,
        },
    )?;
    REQUEST_SEQ.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "raffle")
        .add_attribute("vrf_oracle", config.vrf_oracle.to_string())
        .add_attribute("entrance_fee", config.entrance_fee.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Enter {} => execute::enter(deps, env, info),
        ExecuteMsg::PerformUpkeep {} => execute::perform_upkeep(deps, env, info),
        ExecuteMsg::FulfillRandomness {
            request_id,
            random_words,
        } => execute::fulfill_randomness(deps, env, info, request_id, random_words),
    }
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::RaffleState {} => query::query_raffle_state(deps),
        QueryMsg::Round {} => query::query_round(deps),
        QueryMsg::Player { index } => query::query_player(deps, index),
        QueryMsg::NumPlayers {} => query::query_num_players(deps),
        QueryMsg::RecentWinner {} => query::query_recent_winner(deps),
        QueryMsg::CheckUpkeep {} => query::query_check_upkeep(deps, env),
    }
}
