use cosmwasm_std::{
    to_json_binary, DepsMut, Env, Event, MessageInfo, Response, Uint128, Uint256, WasmMsg,
};
use raffle_common::{derive_random_words, RandomnessRequest};

use crate::error::ContractError;
use crate::msg::ConsumerExecuteMsg;
use crate::state::{PendingRequest, Subscription, CONFIG, NEXT_SUB_ID, REQUESTS, SUBSCRIPTIONS};

/// Open a new subscription owned by the sender.
pub fn create_subscription(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let subscription_id = NEXT_SUB_ID.load(deps.storage)? + 1;
    NEXT_SUB_ID.save(deps.storage, &subscription_id)?;

    let subscription = Subscription {
        owner: info.sender.clone(),
        balance: Uint128::zero(),
        consumers: Vec::new(),
    };
    SUBSCRIPTIONS.save(deps.storage, subscription_id, &subscription)?;

    Ok(Response::new()
        .add_attribute("action", "create_subscription")
        .add_attribute("subscription_id", subscription_id.to_string())
        .add_event(
            Event::new("vrf_subscription_created")
                .add_attribute("subscription_id", subscription_id.to_string())
                .add_attribute("owner", info.sender.to_string()),
        ))
}

/// Credit a subscription's virtual balance.
pub fn fund_subscription(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    subscription_id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let mut subscription = SUBSCRIPTIONS
        .may_load(deps.storage, subscription_id)?
        .ok_or(ContractError::SubscriptionNotFound { subscription_id })?;

    subscription.balance += amount;
    SUBSCRIPTIONS.save(deps.storage, subscription_id, &subscription)?;

    Ok(Response::new()
        .add_attribute("action", "fund_subscription")
        .add_attribute("subscription_id", subscription_id.to_string())
        .add_attribute("amount", amount.to_string())
        .add_attribute("new_balance", subscription.balance.to_string()))
}

/// Register a consumer contract on a subscription. Owner only.
pub fn add_consumer(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    subscription_id: u64,
    consumer: String,
) -> Result<Response, ContractError> {
    let mut subscription = SUBSCRIPTIONS
        .may_load(deps.storage, subscription_id)?
        .ok_or(ContractError::SubscriptionNotFound { subscription_id })?;

    if info.sender != subscription.owner {
        return Err(ContractError::Unauthorized {
            reason: "only the subscription owner can add consumers".to_string(),
        });
    }

    let consumer = deps.api.addr_validate(&consumer)?;
    if !subscription.consumers.contains(&consumer) {
        subscription.consumers.push(consumer.clone());
    }
    SUBSCRIPTIONS.save(deps.storage, subscription_id, &subscription)?;

    Ok(Response::new()
        .add_attribute("action", "add_consumer")
        .add_attribute("subscription_id", subscription_id.to_string())
        .add_attribute("consumer", consumer.to_string()))
}

/// Store a randomness request. The sender must be a registered consumer of
/// the subscription named in the request; the words are delivered later by
/// a separate fulfill call.
pub fn request_random_words(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    request: RandomnessRequest,
) -> Result<Response, ContractError> {
    let subscription = SUBSCRIPTIONS
        .may_load(deps.storage, request.subscription_id)?
        .ok_or(ContractError::SubscriptionNotFound {
            subscription_id: request.subscription_id,
        })?;

    if !subscription.consumers.contains(&info.sender) {
        return Err(ContractError::ConsumerNotRegistered {
            consumer: info.sender.to_string(),
        });
    }

    if REQUESTS.has(deps.storage, (&info.sender, request.request_id)) {
        return Err(ContractError::RequestAlreadyExists {
            request_id: request.request_id,
        });
    }

    let pending = PendingRequest {
        subscription_id: request.subscription_id,
        key_hash: request.key_hash.clone(),
        num_words: request.num_words,
        callback_gas_limit: request.callback_gas_limit,
    };
    REQUESTS.save(deps.storage, (&info.sender, request.request_id), &pending)?;

    Ok(Response::new()
        .add_attribute("action", "request_random_words")
        .add_attribute("request_id", request.request_id.to_string())
        .add_attribute("consumer", info.sender.to_string())
        .add_event(
            Event::new("vrf_words_requested")
                .add_attribute("request_id", request.request_id.to_string())
                .add_attribute("consumer", info.sender.to_string())
                .add_attribute("subscription_id", request.subscription_id.to_string())
                .add_attribute("num_words", request.num_words.to_string()),
        ))
}

/// Deliver words for an outstanding request and call the consumer back.
/// With `words: None` the words are derived from the request id; an
/// override must supply exactly the requested number of words.
pub fn fulfill_random_words(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    consumer: String,
    request_id: u64,
    words: Option<Vec<Uint256>>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let consumer = deps.api.addr_validate(&consumer)?;

    let request = REQUESTS
        .may_load(deps.storage, (&consumer, request_id))?
        .ok_or(ContractError::RequestNotFound { request_id })?;

    let random_words = match words {
        Some(words) => {
            if words.len() as u32 != request.num_words {
                return Err(ContractError::InvalidWordCount {
                    expected: request.num_words,
                    got: words.len() as u32,
                });
            }
            words
        }
        None => derive_random_words(request_id, request.num_words),
    };

    let mut subscription = SUBSCRIPTIONS
        .may_load(deps.storage, request.subscription_id)?
        .ok_or(ContractError::SubscriptionNotFound {
            subscription_id: request.subscription_id,
        })?;

    if subscription.balance < config.base_fee {
        return Err(ContractError::InsufficientSubscriptionBalance {
            needed: config.base_fee,
            available: subscription.balance,
        });
    }
    subscription.balance -= config.base_fee;
    SUBSCRIPTIONS.save(deps.storage, request.subscription_id, &subscription)?;

    // Removing the request before queueing the callback makes fulfillment
    // exactly-once: a second call cannot find it.
    REQUESTS.remove(deps.storage, (&consumer, request_id));

    let callback = WasmMsg::Execute {
        contract_addr: consumer.to_string(),
        msg: to_json_binary(&ConsumerExecuteMsg::FulfillRandomness {
            request_id,
            random_words: random_words.clone(),
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(callback)
        .add_attribute("action", "fulfill_random_words")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("consumer", consumer.to_string())
        .add_event(
            Event::new("vrf_words_fulfilled")
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("consumer", consumer.to_string())
                .add_attribute(
                    "first_word",
                    random_words
                        .first()
                        .map(|w| w.to_string())
                        .unwrap_or_default(),
                )
                .add_attribute("fee_charged", config.base_fee.to_string()),
        ))
}
