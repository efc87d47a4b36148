use cosmwasm_std::{Addr, Deps, Env, StdError, StdResult, Uint128};

use ballast::engine::{AccountInformationResponse, Config, PolicyResponse};

use crate::oracle::FeedQuerier;
use crate::state::{assert_registered, collateral_balance, validate_asset, COLLATERAL_ASSETS, CONFIG};
use crate::valuation::Valuation;
use crate::ContractError;

/// Queries surface engine errors as generic StdErrors
fn to_std(err: ContractError) -> StdError {
    match err {
        ContractError::Std(err) => err,
        err => StdError::generic_err(err.to_string()),
    }
}

pub fn query_policy(deps: Deps) -> StdResult<PolicyResponse> {
    let config: Config = CONFIG.load(deps.storage)?;

    Ok(PolicyResponse {
        liquidation_threshold: config.liquidation_threshold,
        liquidation_bonus: config.liquidation_bonus,
        liquidation_precision: config.liquidation_precision,
        min_health_factor: config.min_health_factor,
        precision: config.precision,
        additional_feed_precision: config.additional_feed_precision(),
    })
}

pub fn query_account_information(
    deps: Deps,
    env: Env,
    user: String,
) -> StdResult<AccountInformationResponse> {
    let config: Config = CONFIG.load(deps.storage)?;
    let user = deps.api.addr_validate(&user)?;

    let source = FeedQuerier::new(deps.querier);
    let (total_synthetic_minted, collateral_value) = Valuation::new(deps.storage, &source, &config, &env)
        .account_information(&user)
        .map_err(to_std)?;

    Ok(AccountInformationResponse {
        total_synthetic_minted,
        collateral_value,
    })
}

pub fn query_collateral_value(deps: Deps, env: Env, user: String) -> StdResult<Uint128> {
    let config: Config = CONFIG.load(deps.storage)?;
    let user = deps.api.addr_validate(&user)?;

    let source = FeedQuerier::new(deps.querier);
    Valuation::new(deps.storage, &source, &config, &env)
        .total_collateral_value(&user)
        .map_err(to_std)
}

pub fn query_collateral_balance(deps: Deps, user: String, asset: String) -> StdResult<Uint128> {
    let user = deps.api.addr_validate(&user)?;
    let asset = validate_asset(deps.api, &asset).map_err(to_std)?;

    collateral_balance(deps.storage, &user, &asset)
}

pub fn query_collateral_assets(deps: Deps) -> StdResult<Vec<Addr>> {
    Ok(COLLATERAL_ASSETS.may_load(deps.storage)?.unwrap_or_default())
}

/// Errors for assets outside the registry
pub fn query_price_feed(deps: Deps, asset: String) -> StdResult<Addr> {
    let asset = validate_asset(deps.api, &asset).map_err(to_std)?;

    assert_registered(deps.storage, &asset).map_err(to_std)
}

pub fn query_health_factor(deps: Deps, env: Env, user: String) -> StdResult<Uint128> {
    let config: Config = CONFIG.load(deps.storage)?;
    let user = deps.api.addr_validate(&user)?;

    let source = FeedQuerier::new(deps.querier);
    Valuation::new(deps.storage, &source, &config, &env)
        .health_factor(&user)
        .map_err(to_std)
}

pub fn query_value_of(deps: Deps, env: Env, asset: String, amount: Uint128) -> StdResult<Uint128> {
    let config: Config = CONFIG.load(deps.storage)?;
    let asset = validate_asset(deps.api, &asset).map_err(to_std)?;

    let source = FeedQuerier::new(deps.querier);
    Valuation::new(deps.storage, &source, &config, &env)
        .value_of(&asset, amount)
        .map_err(to_std)
}

pub fn query_amount_of(deps: Deps, env: Env, asset: String, value: Uint128) -> StdResult<Uint128> {
    let config: Config = CONFIG.load(deps.storage)?;
    let asset = validate_asset(deps.api, &asset).map_err(to_std)?;

    let source = FeedQuerier::new(deps.querier);
    Valuation::new(deps.storage, &source, &config, &env)
        .amount_of(&asset, value)
        .map_err(to_std)
}
