use cosmwasm_std::{to_json_binary, Binary, Deps, Env, StdResult};

use crate::msg::{RoundResponse, UpkeepResponse};
use crate::state::{RaffleState, CONFIG, RECENT_WINNER, ROUND};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_raffle_state(deps: Deps) -> StdResult<Binary> {
    let round = ROUND.load(deps.storage)?;
    to_json_binary(&round.state)
}

pub fn query_round(deps: Deps) -> StdResult<Binary> {
    let round = ROUND.load(deps.storage)?;
    to_json_binary(&RoundResponse {
        state: round.state,
        start_time: round.start_time,
        num_players: round.players.len() as u32,
        pending_request_id: round.pending_request_id,
    })
}

pub fn query_player(deps: Deps, index: u32) -> StdResult<Binary> {
    let round = ROUND.load(deps.storage)?;
    to_json_binary(&round.players.get(index as usize).cloned())
}

pub fn query_num_players(deps: Deps) -> StdResult<Binary> {
    let round = ROUND.load(deps.storage)?;
    to_json_binary(&(round.players.len() as u32))
}

pub fn query_recent_winner(deps: Deps) -> StdResult<Binary> {
    let winner = RECENT_WINNER.may_load(deps.storage)?;
    to_json_binary(&winner)
}

pub fn query_check_upkeep(deps: Deps, env: Env) -> StdResult<Binary> {
    to_json_binary(&evaluate_upkeep(deps, &env)?)
}

/// The four upkeep conditions: round open, interval elapsed, at least one
/// player, positive pool balance. Read-only; perform_upkeep re-runs the
/// same evaluation before transitioning.
pub fn evaluate_upkeep(deps: Deps, env: &Env) -> StdResult<UpkeepResponse> {
    let config = CONFIG.load(deps.storage)?;
    let round = ROUND.load(deps.storage)?;

    let pool_balance = deps
        .querier
        .query_balance(env.contract.address.clone(), config.denom)?
        .amount;

    let is_open = round.state == RaffleState::Open;
    let interval_elapsed =
        env.block.time >= round.start_time.plus_seconds(config.interval_seconds);
    let has_players = !round.players.is_empty();
    let has_balance = !pool_balance.is_zero();

    Ok(UpkeepResponse {
        upkeep_needed: is_open && interval_elapsed && has_players && has_balance,
        is_open,
        interval_elapsed,
        has_players,
        has_balance,
        pool_balance,
        num_players: round.players.len() as u32,
    })
}
