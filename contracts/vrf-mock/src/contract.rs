use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::query;
use crate::state::{CoordinatorConfig, CONFIG, NEXT_SUB_ID};

const CONTRACT_NAME: &str = "crates.io:vrf-mock";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = CoordinatorConfig {
        base_fee: msg.base_fee,
        gas_price: msg.gas_price,
    };
    CONFIG.save(deps.storage, &config)?;
    NEXT_SUB_ID.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "vrf-mock")
        .add_attribute("creator", info.sender.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateSubscription {} => execute::create_subscription(deps, env, info),
        ExecuteMsg::FundSubscription {
            subscription_id,
            amount,
        } => execute::fund_subscription(deps, env, info, subscription_id, amount),
        ExecuteMsg::AddConsumer {
            subscription_id,
            consumer,
        } => execute::add_consumer(deps, env, info, subscription_id, consumer),
        ExecuteMsg::RequestRandomWords { request } => {
            execute::request_random_words(deps, env, info, request)
        }
        ExecuteMsg::FulfillRandomWords {
            consumer,
            request_id,
        } => execute::fulfill_random_words(deps, env, info, consumer, request_id, None),
        ExecuteMsg::FulfillRandomWordsWithOverride {
            consumer,
            request_id,
            words,
        } => execute::fulfill_random_words(deps, env, info, consumer, request_id, Some(words)),
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Subscription { subscription_id } => {
            query::query_subscription(deps, subscription_id)
        }
        QueryMsg::Request {
            consumer,
            request_id,
        } => query::query_request(deps, consumer, request_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi};
    use cosmwasm_std::{to_json_binary, CosmosMsg, Uint128, Uint256, WasmMsg};
    use raffle_common::{derive_random_words, RandomnessRequest};

    use crate::msg::ConsumerExecuteMsg;
    use crate::state::{PendingRequest, Subscription, SUBSCRIPTIONS};

    const BASE_FEE: u128 = 25;
    const KEY_HASH: &str = "474e34a077df58807dbe9c96d3c009b23b3c6d0cce433e59bbf5b34f823bc56c";

    fn setup_contract(deps: DepsMut) {
        let creator = MockApi::default().addr_make("creator");
        let msg = InstantiateMsg {
            base_fee: Uint128::new(BASE_FEE),
            gas_price: Uint128::new(1_000_000_000),
        };
        let info = message_info(&creator, &[]);
        instantiate(deps, mock_env(), info, msg).unwrap();
    }

    /// Subscription 1 owned by "owner", funded with 1000, with "consumer"
    /// registered on it.
    fn setup_subscription(deps: DepsMut<'_>) {
        let mock_api = MockApi::default();
        let owner = mock_api.addr_make("owner");
        let consumer = mock_api.addr_make("consumer");

        let mut deps = deps;
        execute(
            deps.branch(),
            mock_env(),
            message_info(&owner, &[]),
            ExecuteMsg::CreateSubscription {},
        )
        .unwrap();
        execute(
            deps.branch(),
            mock_env(),
            message_info(&owner, &[]),
            ExecuteMsg::FundSubscription {
                subscription_id: 1,
                amount: Uint128::new(1000),
            },
        )
        .unwrap();
        execute(
            deps,
            mock_env(),
            message_info(&owner, &[]),
            ExecuteMsg::AddConsumer {
                subscription_id: 1,
                consumer: consumer.to_string(),
            },
        )
        .unwrap();
    }

    fn randomness_request(request_id: u64) -> RandomnessRequest {
        RandomnessRequest {
            request_id,
            key_hash: KEY_HASH.to_string(),
            subscription_id: 1,
            request_confirmations: 3,
            callback_gas_limit: 500_000,
            num_words: 1,
        }
    }

    fn send_request(deps: DepsMut, request_id: u64) {
        let consumer = MockApi::default().addr_make("consumer");
        execute(
            deps,
            mock_env(),
            message_info(&consumer, &[]),
            ExecuteMsg::RequestRandomWords {
                request: randomness_request(request_id),
            },
        )
        .unwrap();
    }

    #[test]
    fn test_instantiate() {
        let mut deps = mock_dependencies();
        setup_contract(deps.as_mut());

        let config = CONFIG.load(deps.as_ref().storage).unwrap();
        assert_eq!(config.base_fee, Uint128::new(BASE_FEE));
        assert_eq!(NEXT_SUB_ID.load(deps.as_ref().storage).unwrap(), 0);
    }

    #[test]
    fn test_create_subscription_assigns_incrementing_ids() {
        let mut deps = mock_dependencies();
        setup_contract(deps.as_mut());

        let owner = deps.api.addr_make("owner");
        let res = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&owner, &[]),
            ExecuteMsg::CreateSubscription {},
        )
        .unwrap();
        assert_eq!(res.events[0].ty, "vrf_subscription_created");
        assert_eq!(res.events[0].attributes[0].value, "1");

        let other = deps.api.addr_make("other");
        execute(
            deps.as_mut(),
            mock_env(),
            message_info(&other, &[]),
            ExecuteMsg::CreateSubscription {},
        )
        .unwrap();

        let sub = SUBSCRIPTIONS.load(deps.as_ref().storage, 2).unwrap();
        assert_eq!(sub.owner, other);
        assert!(sub.balance.is_zero());
        assert!(sub.consumers.is_empty());
    }

    #[test]
    fn test_fund_subscription() {
        let mut deps = mock_dependencies();
        setup_contract(deps.as_mut());

        let owner = deps.api.addr_make("owner");
        execute(
            deps.as_mut(),
            mock_env(),
            message_info(&owner, &[]),
            ExecuteMsg::CreateSubscription {},
        )
        .unwrap();
        execute(
            deps.as_mut(),
            mock_env(),
            message_info(&owner, &[]),
            ExecuteMsg::FundSubscription {
                subscription_id: 1,
                amount: Uint128::new(300),
            },
        )
        .unwrap();
        execute(
            deps.as_mut(),
            mock_env(),
            message_info(&owner, &[]),
            ExecuteMsg::FundSubscription {
                subscription_id: 1,
                amount: Uint128::new(200),
            },
        )
        .unwrap();

        let sub = SUBSCRIPTIONS.load(deps.as_ref().storage, 1).unwrap();
        assert_eq!(sub.balance, Uint128::new(500));

        let err = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&owner, &[]),
            ExecuteMsg::FundSubscription {
                subscription_id: 9,
                amount: Uint128::new(1),
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ContractError::SubscriptionNotFound { subscription_id: 9 }
        ));
    }

    #[test]
    fn test_add_consumer_owner_only() {
        let mut deps = mock_dependencies();
        setup_contract(deps.as_mut());

        let owner = deps.api.addr_make("owner");
        execute(
            deps.as_mut(),
            mock_env(),
            message_info(&owner, &[]),
            ExecuteMsg::CreateSubscription {},
        )
        .unwrap();

        let stranger = deps.api.addr_make("stranger");
        let consumer = deps.api.addr_make("consumer");
        let err = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&stranger, &[]),
            ExecuteMsg::AddConsumer {
                subscription_id: 1,
                consumer: consumer.to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::Unauthorized { .. }));

        // Adding twice keeps a single registration.
        for _ in 0..2 {
            execute(
                deps.as_mut(),
                mock_env(),
                message_info(&owner, &[]),
                ExecuteMsg::AddConsumer {
                    subscription_id: 1,
                    consumer: consumer.to_string(),
                },
            )
            .unwrap();
        }
        let sub = SUBSCRIPTIONS.load(deps.as_ref().storage, 1).unwrap();
        assert_eq!(sub.consumers, vec![consumer]);
    }

    #[test]
    fn test_request_requires_known_subscription() {
        let mut deps = mock_dependencies();
        setup_contract(deps.as_mut());

        let consumer = deps.api.addr_make("consumer");
        let err = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&consumer, &[]),
            ExecuteMsg::RequestRandomWords {
                request: randomness_request(1),
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ContractError::SubscriptionNotFound { subscription_id: 1 }
        ));
    }

    #[test]
    fn test_request_requires_registered_consumer() {
        let mut deps = mock_dependencies();
        setup_contract(deps.as_mut());
        setup_subscription(deps.as_mut());

        let stranger = deps.api.addr_make("stranger");
        let err = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&stranger, &[]),
            ExecuteMsg::RequestRandomWords {
                request: randomness_request(1),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::ConsumerNotRegistered { .. }));
    }

    #[test]
    fn test_request_duplicate_id_rejected() {
        let mut deps = mock_dependencies();
        setup_contract(deps.as_mut());
        setup_subscription(deps.as_mut());
        send_request(deps.as_mut(), 7);

        let consumer = deps.api.addr_make("consumer");
        let err = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&consumer, &[]),
            ExecuteMsg::RequestRandomWords {
                request: randomness_request(7),
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ContractError::RequestAlreadyExists { request_id: 7 }
        ));
    }

    #[test]
    fn test_fulfill_sends_derived_words_and_charges_fee() {
        let mut deps = mock_dependencies();
        setup_contract(deps.as_mut());
        setup_subscription(deps.as_mut());
        send_request(deps.as_mut(), 7);

        let consumer = deps.api.addr_make("consumer");
        let anyone = deps.api.addr_make("anyone");
        let res = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&anyone, &[]),
            ExecuteMsg::FulfillRandomWords {
                consumer: consumer.to_string(),
                request_id: 7,
            },
        )
        .unwrap();

        assert_eq!(res.messages.len(), 1);
        match &res.messages[0].msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr,
                msg,
                funds,
            }) => {
                assert_eq!(contract_addr, &consumer.to_string());
                assert!(funds.is_empty());
                let expected = to_json_binary(&ConsumerExecuteMsg::FulfillRandomness {
                    request_id: 7,
                    random_words: derive_random_words(7, 1),
                })
                .unwrap();
                assert_eq!(msg, &expected);
            }
            other => panic!("unexpected message: {:?}", other),
        }

        let sub = SUBSCRIPTIONS.load(deps.as_ref().storage, 1).unwrap();
        assert_eq!(sub.balance, Uint128::new(1000 - BASE_FEE));

        // The request is consumed: asking again finds nothing.
        let bin = query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::Request {
                consumer: consumer.to_string(),
                request_id: 7,
            },
        )
        .unwrap();
        let pending: Option<PendingRequest> = serde_json::from_slice(&bin).unwrap();
        assert!(pending.is_none());

        let err = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&anyone, &[]),
            ExecuteMsg::FulfillRandomWords {
                consumer: consumer.to_string(),
                request_id: 7,
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::RequestNotFound { request_id: 7 }));
    }

    #[test]
    fn test_fulfill_unknown_request() {
        let mut deps = mock_dependencies();
        setup_contract(deps.as_mut());
        setup_subscription(deps.as_mut());

        let consumer = deps.api.addr_make("consumer");
        let anyone = deps.api.addr_make("anyone");
        let err = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&anyone, &[]),
            ExecuteMsg::FulfillRandomWords {
                consumer: consumer.to_string(),
                request_id: 42,
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::RequestNotFound { request_id: 42 }));
    }

    #[test]
    fn test_fulfill_insufficient_subscription_balance() {
        let mut deps = mock_dependencies();
        setup_contract(deps.as_mut());

        // Subscription exists and has a consumer but was never funded.
        let owner = deps.api.addr_make("owner");
        let consumer = deps.api.addr_make("consumer");
        execute(
            deps.as_mut(),
            mock_env(),
            message_info(&owner, &[]),
            ExecuteMsg::CreateSubscription {},
        )
        .unwrap();
        execute(
            deps.as_mut(),
            mock_env(),
            message_info(&owner, &[]),
            ExecuteMsg::AddConsumer {
                subscription_id: 1,
                consumer: consumer.to_string(),
            },
        )
        .unwrap();
        send_request(deps.as_mut(), 1);

        let anyone = deps.api.addr_make("anyone");
        let err = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&anyone, &[]),
            ExecuteMsg::FulfillRandomWords {
                consumer: consumer.to_string(),
                request_id: 1,
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ContractError::InsufficientSubscriptionBalance { .. }
        ));
    }

    #[test]
    fn test_fulfill_with_override_uses_given_words() {
        let mut deps = mock_dependencies();
        setup_contract(deps.as_mut());
        setup_subscription(deps.as_mut());
        send_request(deps.as_mut(), 1);

        let consumer = deps.api.addr_make("consumer");
        let anyone = deps.api.addr_make("anyone");
        let res = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&anyone, &[]),
            ExecuteMsg::FulfillRandomWordsWithOverride {
                consumer: consumer.to_string(),
                request_id: 1,
                words: vec![Uint256::from(7u128)],
            },
        )
        .unwrap();

        match &res.messages[0].msg {
            CosmosMsg::Wasm(WasmMsg::Execute { msg, .. }) => {
                let expected = to_json_binary(&ConsumerExecuteMsg::FulfillRandomness {
                    request_id: 1,
                    random_words: vec![Uint256::from(7u128)],
                })
                .unwrap();
                assert_eq!(msg, &expected);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_fulfill_override_enforces_word_count() {
        let mut deps = mock_dependencies();
        setup_contract(deps.as_mut());
        setup_subscription(deps.as_mut());
        send_request(deps.as_mut(), 1);

        let consumer = deps.api.addr_make("consumer");
        let anyone = deps.api.addr_make("anyone");
        let err = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&anyone, &[]),
            ExecuteMsg::FulfillRandomWordsWithOverride {
                consumer: consumer.to_string(),
                request_id: 1,
                words: vec![Uint256::from(7u128), Uint256::from(8u128)],
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ContractError::InvalidWordCount { expected: 1, got: 2 }
        ));

        // The failed override leaves the request outstanding.
        let bin = query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::Request {
                consumer: consumer.to_string(),
                request_id: 1,
            },
        )
        .unwrap();
        let pending: Option<PendingRequest> = serde_json::from_slice(&bin).unwrap();
        assert_eq!(pending.unwrap().subscription_id, 1);
    }

    #[test]
    fn test_query_subscription() {
        let mut deps = mock_dependencies();
        setup_contract(deps.as_mut());
        setup_subscription(deps.as_mut());

        let bin = query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::Subscription { subscription_id: 1 },
        )
        .unwrap();
        let sub: Option<Subscription> = serde_json::from_slice(&bin).unwrap();
        let sub = sub.unwrap();
        assert_eq!(sub.owner, deps.api.addr_make("owner"));
        assert_eq!(sub.balance, Uint128::new(1000));

        let bin = query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::Subscription { subscription_id: 2 },
        )
        .unwrap();
        let sub: Option<Subscription> = serde_json::from_slice(&bin).unwrap();
        assert!(sub.is_none());
    }
}
