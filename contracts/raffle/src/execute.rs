use cosmwasm_std::{
    coins, to_json_binary, BankMsg, DepsMut, Env, Event, MessageInfo, Response, StdError,
    Uint128, Uint256, WasmMsg,
};
use raffle_common::RandomnessRequest;

use crate::error::ContractError;
use crate::msg::OracleExecuteMsg;
use crate::query::evaluate_upkeep;
use crate::state::{RaffleState, CONFIG, RECENT_WINNER, REQUEST_SEQ, ROUND};

/// Words requested per draw. One is enough to pick a single winner.
pub const NUM_WORDS: u32 = 1;

/// Enter the current round with the entrance fee attached as funds.
pub fn enter(deps: DepsMut, _env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut round = ROUND.load(deps.storage)?;

    if round.state != RaffleState::Open {
        return Err(ContractError::NotOpen);
    }

    // Validate funds: a single coin of the pool denom
    if info.funds.len() > 1 {
        return Err(ContractError::InvalidFunds);
    }
    let sent = match info.funds.first() {
        Some(coin) if coin.denom != config.denom => {
            return Err(ContractError::WrongDenom {
                denom: coin.denom.clone(),
            });
        }
        Some(coin) => coin.amount,
        None => Uint128::zero(),
    };
    if sent < config.entrance_fee {
        return Err(ContractError::InsufficientFunds {
            sent,
            required: config.entrance_fee,
        });
    }

    // Overpayment stays in the pool; the excess is not refunded.
    round.players.push(info.sender.clone());
    ROUND.save(deps.storage, &round)?;

    Ok(Response::new()
        .add_attribute("action", "enter")
        .add_attribute("player", info.sender.to_string())
        .add_event(
            Event::new("raffle_enter")
                .add_attribute("player", info.sender.to_string())
                .add_attribute("amount", sent.to_string())
                .add_attribute("num_players", round.players.len().to_string()),
        ))
}

/// Trigger a draw. Re-checks the upkeep conditions, moves the round to
/// Calculating and issues exactly one randomness request to the
/// coordinator. The callback arrives later as a separate transaction.
pub fn perform_upkeep(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
) -> Result<Response, ContractError> {
    let upkeep = evaluate_upkeep(deps.as_ref(), &env)?;
    let config = CONFIG.load(deps.storage)?;
    let mut round = ROUND.load(deps.storage)?;

    if !upkeep.upkeep_needed {
        let raffle_state = match round.state {
            RaffleState::Open => "open",
            RaffleState::Calculating => "calculating",
        };
        return Err(ContractError::UpkeepNotNeeded {
            balance: upkeep.pool_balance,
            num_players: upkeep.num_players,
            raffle_state: raffle_state.to_string(),
        });
    }

    let request_id = REQUEST_SEQ.load(deps.storage)? + 1;
    REQUEST_SEQ.save(deps.storage, &request_id)?;

    round.state = RaffleState::Calculating;
    round.pending_request_id = Some(request_id);
    ROUND.save(deps.storage, &round)?;

    let request = RandomnessRequest {
        request_id,
        key_hash: config.key_hash.clone(),
        subscription_id: config.subscription_id,
        request_confirmations: config.request_confirmations,
        callback_gas_limit: config.callback_gas_limit,
        num_words: NUM_WORDS,
    };
    let request_msg = WasmMsg::Execute {
        contract_addr: config.vrf_oracle.to_string(),
        msg: to_json_binary(&OracleExecuteMsg::RequestRandomWords { request })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(request_msg)
        .add_attribute("action", "perform_upkeep")
        .add_attribute("request_id", request_id.to_string())
        .add_event(
            Event::new("raffle_winner_requested")
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("num_players", upkeep.num_players.to_string())
                .add_attribute("pool_balance", upkeep.pool_balance.to_string()),
        ))
}

/// Randomness callback from the coordinator: pick the winner, pay out the
/// whole pool and reset the round.
///
/// Winner selection is `random_words[0] mod num_players`. The modulo maps an
/// unbounded 256-bit word onto the player list with a negligible bias for
/// pool sizes that are not a power of two.
pub fn fulfill_randomness(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request_id: u64,
    random_words: Vec<Uint256>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.vrf_oracle {
        return Err(ContractError::Unauthorized {
            reason: "only the vrf coordinator can fulfill randomness".to_string(),
        });
    }

    let mut round = ROUND.load(deps.storage)?;
    // Rejects stale ids, replays and callbacks with no outstanding request.
    if round.pending_request_id != Some(request_id) {
        return Err(ContractError::UnknownRequest { request_id });
    }

    let word = *random_words.first().ok_or(ContractError::EmptyRandomWords)?;

    // A pending request implies perform_upkeep succeeded, so players is
    // non-empty and the modulus is never zero.
    let num_players = round.players.len();
    let winner_index = Uint128::try_from(word % Uint256::from(num_players as u128))
        .map_err(StdError::from)?
        .u128() as usize;
    let winner = round.players[winner_index].clone();

    let payout = deps
        .querier
        .query_balance(env.contract.address.clone(), config.denom.clone())?
        .amount;
    if payout.is_zero() {
        // Leave the round in Calculating so the stuck settlement is visible
        // and retryable; never re-open with funds unaccounted for.
        return Err(ContractError::PayoutFailed {
            winner: winner.to_string(),
            amount: payout,
        });
    }

    RECENT_WINNER.save(deps.storage, &winner)?;

    round.players.clear();
    round.state = RaffleState::Open;
    round.start_time = env.block.time;
    round.pending_request_id = None;
    ROUND.save(deps.storage, &round)?;

    // The bank send executes after this call returns; if it fails the whole
    // transaction reverts and the round stays in Calculating.
    let send_msg = BankMsg::Send {
        to_address: winner.to_string(),
        amount: coins(payout.u128(), config.denom),
    };

    Ok(Response::new()
        .add_message(send_msg)
        .add_attribute("action", "fulfill_randomness")
        .add_attribute("winner", winner.to_string())
        .add_attribute("payout", payout.to_string())
        .add_event(
            Event::new("raffle_winner_picked")
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("winner", winner.to_string())
                .add_attribute("payout", payout.to_string())
                .add_attribute("randomness", word.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}
