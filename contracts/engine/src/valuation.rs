use cosmwasm_std::{Addr, Env, Storage, Uint128};

use ballast::engine::Config;

use crate::oracle::{checked_price, PriceSource};
use crate::risk_engine::calculate_health_factor;
use crate::state::{assert_registered, collateral_balance, synthetic_minted, COLLATERAL_ASSETS};
use crate::ContractError;

/// Converts between collateral amounts and debt-denominated value.
/// Every conversion prices the asset through its feed and rounds toward zero.
pub struct Valuation<'a> {
    pub storage: &'a dyn Storage,
    pub source: &'a dyn PriceSource,
    pub config: &'a Config,
    pub env: &'a Env,
}

impl<'a> Valuation<'a> {
    pub fn new(storage: &'a dyn Storage, source: &'a dyn PriceSource, config: &'a Config, env: &'a Env) -> Self {
        Valuation { storage, source, config, env }
    }

    /// Feed price scaled up to `config.precision`
    fn scaled_price(&self, asset: &Addr) -> Result<Uint128, ContractError> {
        let feed = assert_registered(self.storage, asset)?;
        let price = checked_price(self.source, self.config, self.env, &feed)?;

        Ok(price.checked_mul(self.config.additional_feed_precision())?)
    }

    /// amount * price / precision
    pub fn value_of(&self, asset: &Addr, amount: Uint128) -> Result<Uint128, ContractError> {
        let price = self.scaled_price(asset)?;

        Ok(amount.checked_multiply_ratio(price, self.config.precision)?)
    }

    /// value * precision / price
    pub fn amount_of(&self, asset: &Addr, value: Uint128) -> Result<Uint128, ContractError> {
        let price = self.scaled_price(asset)?;

        Ok(value.checked_multiply_ratio(self.config.precision, price)?)
    }

    /// Sums the value of every registered asset the user holds.
    /// Each asset is priced once per call, zero balances included.
    pub fn total_collateral_value(&self, user: &Addr) -> Result<Uint128, ContractError> {
        let assets = COLLATERAL_ASSETS.may_load(self.storage)?.unwrap_or_default();

        let mut total_value = Uint128::zero();
        for asset in assets.iter() {
            let amount = collateral_balance(self.storage, user, asset)?;
            total_value = total_value.checked_add(self.value_of(asset, amount)?)?;
        }

        Ok(total_value)
    }

    /// Returns (debt, collateral value)
    pub fn account_information(&self, user: &Addr) -> Result<(Uint128, Uint128), ContractError> {
        let debt = synthetic_minted(self.storage, user)?;
        let collateral_value = self.total_collateral_value(user)?;

        Ok((debt, collateral_value))
    }

    pub fn health_factor(&self, user: &Addr) -> Result<Uint128, ContractError> {
        let (debt, collateral_value) = self.account_information(user)?;

        Ok(calculate_health_factor(self.config, debt, collateral_value))
    }
}
