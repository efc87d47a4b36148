use cosmwasm_std::{Addr, Api, Storage, Uint128, StdResult};
use cw_storage_plus::{Item, Map};

use ballast::engine::Config;

use crate::ContractError;

pub const CONFIG: Item<Config> = Item::new("config");

/// Asset registry, asset -> price feed. Immutable after instantiate.
pub const PRICE_FEEDS: Map<&Addr, Addr> = Map::new("price_feeds");
/// Registered assets in registration order, no duplicates
pub const COLLATERAL_ASSETS: Item<Vec<Addr>> = Item::new("collateral_assets");

/// (user, asset) -> amount held for the user
pub const COLLATERAL_DEPOSITED: Map<(&Addr, &Addr), Uint128> = Map::new("collateral_deposited");
/// user -> synthetic units minted against their collateral
pub const SYNTHETIC_MINTED: Map<&Addr, Uint128> = Map::new("synthetic_minted");

/// Set while a transition is in flight, cleared by the Settle callback
pub const TRANSITION_LOCK: Item<bool> = Item::new("transition_lock");


//Helper functions
/// Errors with InvalidCollateralToken if the asset isn't in the registry
pub fn assert_registered(storage: &dyn Storage, asset: &Addr) -> Result<Addr, ContractError> {
    match PRICE_FEEDS.may_load(storage, asset)? {
        Some(feed) => Ok(feed),
        None => Err(ContractError::InvalidCollateralToken { asset: asset.to_string() }),
    }
}

/// Malformed asset identifiers can't be in the registry either
pub fn validate_asset(api: &dyn Api, asset: &str) -> Result<Addr, ContractError> {
    api.addr_validate(asset)
        .map_err(|_| ContractError::InvalidCollateralToken { asset: asset.to_string() })
}

pub fn collateral_balance(storage: &dyn Storage, user: &Addr, asset: &Addr) -> StdResult<Uint128> {
    Ok(COLLATERAL_DEPOSITED.may_load(storage, (user, asset))?.unwrap_or_default())
}

pub fn synthetic_minted(storage: &dyn Storage, user: &Addr) -> StdResult<Uint128> {
    Ok(SYNTHETIC_MINTED.may_load(storage, user)?.unwrap_or_default())
}

pub fn increase_collateral(storage: &mut dyn Storage, user: &Addr, asset: &Addr, amount: Uint128) -> Result<Uint128, ContractError> {
    let balance = collateral_balance(storage, user, asset)?.checked_add(amount)?;
    COLLATERAL_DEPOSITED.save(storage, (user, asset), &balance)?;

    Ok(balance)
}

/// Underflow is an invariant violation and aborts the transition
pub fn decrease_collateral(storage: &mut dyn Storage, user: &Addr, asset: &Addr, amount: Uint128) -> Result<Uint128, ContractError> {
    let balance = collateral_balance(storage, user, asset)?.checked_sub(amount)?;
    COLLATERAL_DEPOSITED.save(storage, (user, asset), &balance)?;

    Ok(balance)
}

pub fn increase_debt(storage: &mut dyn Storage, user: &Addr, amount: Uint128) -> Result<Uint128, ContractError> {
    let debt = synthetic_minted(storage, user)?.checked_add(amount)?;
    SYNTHETIC_MINTED.save(storage, user, &debt)?;

    Ok(debt)
}

pub fn decrease_debt(storage: &mut dyn Storage, user: &Addr, amount: Uint128) -> Result<Uint128, ContractError> {
    let debt = synthetic_minted(storage, user)?.checked_sub(amount)?;
    SYNTHETIC_MINTED.save(storage, user, &debt)?;

    Ok(debt)
}

/// Takes the transition lock, erroring if another transition holds it
pub fn acquire_lock(storage: &mut dyn Storage) -> Result<(), ContractError> {
    if TRANSITION_LOCK.may_load(storage)?.unwrap_or(false) {
        return Err(ContractError::Reentrancy {});
    }
    TRANSITION_LOCK.save(storage, &true)?;

    Ok(())
}

pub fn release_lock(storage: &mut dyn Storage) -> StdResult<()> {
    TRANSITION_LOCK.save(storage, &false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{mock_dependencies, MockStorage};
    use cosmwasm_std::StdError;

    #[test]
    fn malformed_asset_is_unregistered() {
        let deps = mock_dependencies();

        assert_eq!(validate_asset(&deps.api, "weth").unwrap(), Addr::unchecked("weth"));
        assert_eq!(
            validate_asset(&deps.api, "WETH").unwrap_err(),
            ContractError::InvalidCollateralToken { asset: String::from("WETH") }
        );
    }

    #[test]
    fn collateral_never_underflows() {
        let mut storage = MockStorage::new();
        let user = Addr::unchecked("user");
        let asset = Addr::unchecked("weth");

        increase_collateral(&mut storage, &user, &asset, Uint128::new(5)).unwrap();
        let err = decrease_collateral(&mut storage, &user, &asset, Uint128::new(6)).unwrap_err();
        assert!(matches!(err, ContractError::Std(StdError::Overflow { .. })));
        //Balance untouched
        assert_eq!(collateral_balance(&storage, &user, &asset).unwrap(), Uint128::new(5));

        assert_eq!(decrease_collateral(&mut storage, &user, &asset, Uint128::new(5)).unwrap(), Uint128::zero());
    }

    #[test]
    fn debt_never_underflows() {
        let mut storage = MockStorage::new();
        let user = Addr::unchecked("user");

        assert!(decrease_debt(&mut storage, &user, Uint128::one()).is_err());
        increase_debt(&mut storage, &user, Uint128::new(100)).unwrap();
        assert_eq!(decrease_debt(&mut storage, &user, Uint128::new(40)).unwrap(), Uint128::new(60));
        assert_eq!(synthetic_minted(&storage, &user).unwrap(), Uint128::new(60));
    }

    #[test]
    fn lock_is_exclusive() {
        let mut storage = MockStorage::new();

        acquire_lock(&mut storage).unwrap();
        assert_eq!(acquire_lock(&mut storage).unwrap_err(), ContractError::Reentrancy {});

        release_lock(&mut storage).unwrap();
        acquire_lock(&mut storage).unwrap();
    }
}
