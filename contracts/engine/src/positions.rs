use cosmwasm_std::{
    attr, Addr, Env, Event, QuerierWrapper, Response, Storage, SubMsg, Uint128,
};

use ballast::engine::Config;
use ballast::helpers::TokenContract;

use crate::oracle::FeedQuerier;
use crate::risk_engine::is_insolvent;
use crate::state::{
    assert_registered, decrease_collateral, decrease_debt, increase_collateral, increase_debt, CONFIG,
};
use crate::valuation::Valuation;
use crate::ContractError;

//Reply ids, all sub-messages are reply on error
pub const COLLATERAL_PULL_REPLY_ID: u64 = 1u64;
pub const COLLATERAL_PUSH_REPLY_ID: u64 = 2u64;
pub const SYNTHETIC_MINT_REPLY_ID: u64 = 3u64;
pub const SYNTHETIC_PULL_REPLY_ID: u64 = 4u64;
pub const SYNTHETIC_BURN_REPLY_ID: u64 = 5u64;


/// Credits `amount` of `asset` to the user, then pulls it from them.
/// The balance is increased before the pull, the transition lock keeps the pull from re-entering.
pub fn deposit_collateral(
    storage: &mut dyn Storage,
    env: &Env,
    user: &Addr,
    asset: &Addr,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    assert_registered(storage, asset)?;

    let balance = increase_collateral(storage, user, asset, amount)?;

    //Pull the deposit from the user
    let pull_msg = TokenContract(asset.clone()).transfer_from(user, &env.contract.address, amount)?;

    Ok(Response::new()
        .add_event(
            Event::new("collateral_deposited")
                .add_attribute("user", user)
                .add_attribute("asset", asset)
                .add_attribute("amount", amount),
        )
        .add_submessage(SubMsg::reply_on_error(pull_msg, COLLATERAL_PULL_REPLY_ID))
        .add_attributes(vec![
            attr("method", "deposit_collateral"),
            attr("user", user),
            attr("asset", asset),
            attr("amount", amount),
            attr("new_balance", balance),
        ]))
}

/// Adds debt, asserts the user stays solvent, then mints to the user
pub fn mint_synthetic(
    storage: &mut dyn Storage,
    querier: QuerierWrapper,
    env: &Env,
    user: &Addr,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    let config: Config = CONFIG.load(storage)?;

    let debt = increase_debt(storage, user, amount)?;

    //Check solvency with the new debt
    let source = FeedQuerier::new(querier);
    let health_factor = Valuation::new(storage, &source, &config, env).health_factor(user)?;
    if is_insolvent(&config, health_factor) {
        return Err(ContractError::BreaksHealthFactor { health_factor });
    }

    let mint_msg = TokenContract(config.synthetic_token).mint(user, amount)?;

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_error(mint_msg, SYNTHETIC_MINT_REPLY_ID))
        .add_attributes(vec![
            attr("method", "mint_synthetic"),
            attr("user", user),
            attr("amount", amount),
            attr("total_debt", debt),
            attr("health_factor", health_factor),
        ]))
}

pub fn deposit_collateral_and_mint(
    storage: &mut dyn Storage,
    querier: QuerierWrapper,
    env: &Env,
    user: &Addr,
    asset: &Addr,
    collateral_amount: Uint128,
    mint_amount: Uint128,
) -> Result<Response, ContractError> {
    let deposit_response = deposit_collateral(storage, env, user, asset, collateral_amount)?;
    let mint_response = mint_synthetic(storage, querier, env, user, mint_amount)?;

    Ok(merge_responses(deposit_response, mint_response))
}

/// Moves `amount` of `asset` out of `from`'s balance and sends it to `to`.
/// Solvency of `from` is asserted once the transfer has returned, in the Settle callback.
pub fn redeem_collateral(
    storage: &mut dyn Storage,
    asset: &Addr,
    amount: Uint128,
    from: &Addr,
    to: &Addr,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    assert_registered(storage, asset)?;

    let balance = decrease_collateral(storage, from, asset, amount)?;

    let push_msg = TokenContract(asset.clone()).transfer(to, amount)?;

    Ok(Response::new()
        .add_event(
            Event::new("collateral_redeemed")
                .add_attribute("from", from)
                .add_attribute("to", to)
                .add_attribute("asset", asset)
                .add_attribute("amount", amount),
        )
        .add_submessage(SubMsg::reply_on_error(push_msg, COLLATERAL_PUSH_REPLY_ID))
        .add_attributes(vec![
            attr("method", "redeem_collateral"),
            attr("from", from),
            attr("to", to),
            attr("asset", asset),
            attr("amount", amount),
            attr("new_balance", balance),
        ]))
}

/// Removes `amount` of `on_behalf_of`'s debt, pulls the synthetic units from `payer` & burns them
pub fn burn_synthetic(
    storage: &mut dyn Storage,
    env: &Env,
    amount: Uint128,
    on_behalf_of: &Addr,
    payer: &Addr,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    let config: Config = CONFIG.load(storage)?;

    let debt = decrease_debt(storage, on_behalf_of, amount)?;

    //The token burns from the caller's own balance, so pull first
    let synthetic = TokenContract(config.synthetic_token);
    let pull_msg = synthetic.transfer_from(payer, &env.contract.address, amount)?;
    let burn_msg = synthetic.burn(amount)?;

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_error(pull_msg, SYNTHETIC_PULL_REPLY_ID))
        .add_submessage(SubMsg::reply_on_error(burn_msg, SYNTHETIC_BURN_REPLY_ID))
        .add_attributes(vec![
            attr("method", "burn_synthetic"),
            attr("on_behalf_of", on_behalf_of),
            attr("payer", payer),
            attr("amount", amount),
            attr("total_debt", debt),
        ]))
}

/// Burns first so the redemption is checked against the lowered debt
pub fn redeem_collateral_for_synthetic(
    storage: &mut dyn Storage,
    env: &Env,
    user: &Addr,
    asset: &Addr,
    collateral_amount: Uint128,
    debt_amount: Uint128,
) -> Result<Response, ContractError> {
    let burn_response = burn_synthetic(storage, env, debt_amount, user, user)?;
    let redeem_response = redeem_collateral(storage, asset, collateral_amount, user, user)?;

    Ok(merge_responses(burn_response, redeem_response))
}

/// Appends `next`'s messages, attributes & events to `first`, keeping their order
pub fn merge_responses(first: Response, next: Response) -> Response {
    first
        .add_submessages(next.messages)
        .add_attributes(next.attributes)
        .add_events(next.events)
}
