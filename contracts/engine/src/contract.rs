#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    attr, to_binary, Addr, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdError, StdResult, Uint128, WasmMsg,
};
use cw2::set_contract_version;

use ballast::engine::{
    CallbackMsg, Config, ExecuteMsg, InstantiateMsg, PostCheck, QueryMsg,
};

use crate::error::ContractError;
use crate::liquidations::liquidate;
use crate::oracle::FeedQuerier;
use crate::positions::{
    burn_synthetic, deposit_collateral, deposit_collateral_and_mint, mint_synthetic,
    redeem_collateral, redeem_collateral_for_synthetic, COLLATERAL_PULL_REPLY_ID,
    COLLATERAL_PUSH_REPLY_ID, SYNTHETIC_BURN_REPLY_ID, SYNTHETIC_MINT_REPLY_ID,
    SYNTHETIC_PULL_REPLY_ID,
};
use crate::query::{
    query_account_information, query_amount_of, query_collateral_assets,
    query_collateral_balance, query_collateral_value, query_health_factor, query_policy,
    query_price_feed, query_value_of,
};
use crate::reply::{handle_mint_reply, handle_transfer_reply};
use crate::risk_engine::{calculate_health_factor, is_insolvent};
use crate::state::{
    acquire_lock, release_lock, validate_asset, COLLATERAL_ASSETS, CONFIG, PRICE_FEEDS, TRANSITION_LOCK,
};
use crate::valuation::Valuation;

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:ballast-engine";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

//Policy defaults
const PRECISION: u128 = 1_000_000_000_000_000_000;
const LIQUIDATION_PRECISION: u128 = 100;
const DEFAULT_LIQUIDATION_THRESHOLD: u128 = 50;
const DEFAULT_LIQUIDATION_BONUS: u128 = 10;
const DEFAULT_FEED_DECIMALS: u32 = 8;
const DEFAULT_ORACLE_TIME_LIMIT: u64 = 3 * 60 * 60;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    if msg.collateral_assets.len() != msg.price_feeds.len() {
        return Err(ContractError::ConfigurationMismatch {});
    }

    let config = Config {
        synthetic_token: deps.api.addr_validate(&msg.synthetic_token)?,
        liquidation_threshold: msg.liquidation_threshold.unwrap_or(Uint128::new(DEFAULT_LIQUIDATION_THRESHOLD)),
        liquidation_bonus: msg.liquidation_bonus.unwrap_or(Uint128::new(DEFAULT_LIQUIDATION_BONUS)),
        liquidation_precision: Uint128::new(LIQUIDATION_PRECISION),
        min_health_factor: Uint128::new(PRECISION),
        precision: Uint128::new(PRECISION),
        feed_decimals: msg.feed_decimals.unwrap_or(DEFAULT_FEED_DECIMALS),
        oracle_time_limit: msg.oracle_time_limit.unwrap_or(DEFAULT_ORACLE_TIME_LIMIT),
    };

    //Threshold can't be 0% or count more than 100% of collateral
    if config.liquidation_threshold.is_zero() || config.liquidation_threshold > config.liquidation_precision {
        return Err(ContractError::InvalidParameters {});
    }
    //A bonus of 100% or more would seize more than it repays
    if config.liquidation_bonus >= config.liquidation_precision {
        return Err(ContractError::InvalidParameters {});
    }
    if config.feed_decimals > 18 {
        return Err(ContractError::InvalidParameters {});
    }

    //Build the asset registry, order kept & duplicates skipped
    let mut collateral_assets: Vec<Addr> = vec![];
    for (asset, feed) in msg.collateral_assets.iter().zip(msg.price_feeds.iter()) {
        let asset = deps.api.addr_validate(asset)?;
        let feed = deps.api.addr_validate(feed)?;

        PRICE_FEEDS.save(deps.storage, &asset, &feed)?;
        if !collateral_assets.contains(&asset) {
            collateral_assets.push(asset);
        }
    }
    COLLATERAL_ASSETS.save(deps.storage, &collateral_assets)?;

    CONFIG.save(deps.storage, &config)?;
    TRANSITION_LOCK.save(deps.storage, &false)?;

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "instantiate"),
        attr("creator", info.sender.to_string()),
        attr("synthetic_token", config.synthetic_token.to_string()),
        attr("collateral_assets", format!("{:?}", collateral_assets)),
    ]))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    //Callbacks run inside the transition that sent them
    if let ExecuteMsg::Callback(msg) = msg {
        if info.sender == env.contract.address {
            return callback_handler(deps, env, msg);
        } else {
            return Err(ContractError::Unauthorized {});
        }
    }

    //Held until the transition's Settle callback
    acquire_lock(deps.storage)?;

    let user = info.sender.clone();
    match msg {
        ExecuteMsg::DepositCollateral { asset, amount } => {
            let asset = validate_asset(deps.api, &asset)?;
            let response = deposit_collateral(deps.storage, &env, &user, &asset, amount)?;

            settle(&env, response, vec![])
        }
        ExecuteMsg::MintSynthetic { amount } => {
            let response = mint_synthetic(deps.storage, deps.querier, &env, &user, amount)?;

            settle(&env, response, vec![])
        }
        ExecuteMsg::DepositCollateralAndMint {
            asset,
            collateral_amount,
            mint_amount,
        } => {
            let asset = validate_asset(deps.api, &asset)?;
            let response = deposit_collateral_and_mint(
                deps.storage,
                deps.querier,
                &env,
                &user,
                &asset,
                collateral_amount,
                mint_amount,
            )?;

            settle(&env, response, vec![])
        }
        ExecuteMsg::RedeemCollateral { asset, amount } => {
            let asset = validate_asset(deps.api, &asset)?;
            let response = redeem_collateral(deps.storage, &asset, amount, &user, &user)?;

            settle(&env, response, vec![PostCheck::Solvent { user }])
        }
        ExecuteMsg::RedeemCollateralForSynthetic {
            asset,
            collateral_amount,
            debt_amount,
        } => {
            let asset = validate_asset(deps.api, &asset)?;
            let response = redeem_collateral_for_synthetic(
                deps.storage,
                &env,
                &user,
                &asset,
                collateral_amount,
                debt_amount,
            )?;

            settle(&env, response, vec![PostCheck::Solvent { user }])
        }
        ExecuteMsg::BurnSynthetic { amount } => {
            let response = burn_synthetic(deps.storage, &env, amount, &user, &user)?;

            //Burning can only raise the health factor, checked anyway
            settle(&env, response, vec![PostCheck::Solvent { user }])
        }
        ExecuteMsg::Liquidate {
            user: position_owner,
            asset,
            debt_to_cover,
        } => {
            let position_owner = deps.api.addr_validate(&position_owner)?;
            let asset = validate_asset(deps.api, &asset)?;
            let (response, starting_health_factor) = liquidate(
                deps.storage,
                deps.querier,
                &env,
                &user,
                &position_owner,
                &asset,
                debt_to_cover,
            )?;

            settle(
                &env,
                response,
                vec![
                    PostCheck::Improved {
                        user: position_owner,
                        starting_health_factor,
                    },
                    PostCheck::Solvent { user },
                ],
            )
        }
        ExecuteMsg::Callback(_) => Err(ContractError::Unauthorized {}),
    }
}

/// Appends the Settle callback so it runs after every external call of the transition
fn settle(env: &Env, response: Response, checks: Vec<PostCheck>) -> Result<Response, ContractError> {
    let settle_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: env.contract.address.to_string(),
        msg: to_binary(&ExecuteMsg::Callback(CallbackMsg::Settle { checks }))?,
        funds: vec![],
    });

    Ok(response.add_message(settle_msg))
}

pub fn callback_handler(
    deps: DepsMut,
    env: Env,
    msg: CallbackMsg,
) -> Result<Response, ContractError> {
    match msg {
        CallbackMsg::Settle { checks } => settle_transition(deps, env, checks),
    }
}

/// Runs the post-transition checks in order, then releases the transition lock
fn settle_transition(
    deps: DepsMut,
    env: Env,
    checks: Vec<PostCheck>,
) -> Result<Response, ContractError> {
    let config: Config = CONFIG.load(deps.storage)?;
    let source = FeedQuerier::new(deps.querier);
    let mut attrs = vec![attr("method", "settle")];

    {
        let valuation = Valuation::new(deps.storage, &source, &config, &env);

        for check in checks {
            match check {
                PostCheck::Solvent { user } => {
                    let health_factor = valuation.health_factor(&user)?;
                    if is_insolvent(&config, health_factor) {
                        return Err(ContractError::BreaksHealthFactor { health_factor });
                    }
                    attrs.push(attr(format!("{}_health_factor", user), health_factor));
                }
                PostCheck::Improved {
                    user,
                    starting_health_factor,
                } => {
                    let health_factor = valuation.health_factor(&user)?;
                    if health_factor <= starting_health_factor {
                        return Err(ContractError::HealthFactorNotImproved {});
                    }
                    attrs.push(attr(format!("{}_health_factor", user), health_factor));
                }
            }
        }
    }

    release_lock(deps.storage)?;

    Ok(Response::new().add_attributes(attrs))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        COLLATERAL_PULL_REPLY_ID
        | COLLATERAL_PUSH_REPLY_ID
        | SYNTHETIC_PULL_REPLY_ID
        | SYNTHETIC_BURN_REPLY_ID => handle_transfer_reply(msg),
        SYNTHETIC_MINT_REPLY_ID => handle_mint_reply(msg),
        id => Err(ContractError::Std(StdError::generic_err(format!("invalid reply id: {}", id)))),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Policy {} => to_binary(&query_policy(deps)?),
        QueryMsg::AccountInformation { user } => {
            to_binary(&query_account_information(deps, env, user)?)
        }
        QueryMsg::CollateralValue { user } => to_binary(&query_collateral_value(deps, env, user)?),
        QueryMsg::CollateralBalance { user, asset } => {
            to_binary(&query_collateral_balance(deps, user, asset)?)
        }
        QueryMsg::CollateralAssets {} => to_binary(&query_collateral_assets(deps)?),
        QueryMsg::PriceFeed { asset } => to_binary(&query_price_feed(deps, asset)?),
        QueryMsg::HealthFactor { user } => to_binary(&query_health_factor(deps, env, user)?),
        QueryMsg::CalculateHealthFactor {
            total_debt,
            collateral_value,
        } => {
            let config: Config = CONFIG.load(deps.storage)?;
            to_binary(&calculate_health_factor(&config, total_debt, collateral_value))
        }
        QueryMsg::ValueOf { asset, amount } => to_binary(&query_value_of(deps, env, asset, amount)?),
        QueryMsg::AmountOf { asset, value } => to_binary(&query_amount_of(deps, env, asset, value)?),
    }
}
