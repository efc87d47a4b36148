use cosmwasm_std::{Addr, Uint128};
use cosmwasm_schema::{cw_serde, QueryResponses};

#[cw_serde]
pub struct InstantiateMsg {
    /// Collateral cw20 contracts accepted by the engine
    pub collateral_assets: Vec<String>,
    /// Price feed contracts, index-matched to `collateral_assets`
    pub price_feeds: Vec<String>,
    /// Synthetic cw20 contract, the engine must be its minter
    pub synthetic_token: String,
    /// Percent of collateral value counted toward solvency.
    /// Defaults to 50.
    pub liquidation_threshold: Option<Uint128>,
    /// Percent of seized collateral awarded to liquidators on top of the repaid value.
    /// Defaults to 10.
    pub liquidation_bonus: Option<Uint128>,
    /// Decimals of every feed answer.
    /// Defaults to 8.
    pub feed_decimals: Option<u32>,
    /// Seconds until a feed answer is considered stale.
    /// Defaults to 3 hours.
    pub oracle_time_limit: Option<u64>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Deposit collateral the engine is approved to pull from the sender
    DepositCollateral {
        /// Collateral cw20 contract
        asset: String,
        amount: Uint128,
    },
    /// Mint synthetic units against the sender's collateral
    MintSynthetic {
        amount: Uint128,
    },
    /// Deposit collateral and mint in one transition
    DepositCollateralAndMint {
        asset: String,
        collateral_amount: Uint128,
        mint_amount: Uint128,
    },
    /// Withdraw collateral back to the sender
    RedeemCollateral {
        asset: String,
        amount: Uint128,
    },
    /// Burn debt, then withdraw collateral
    RedeemCollateralForSynthetic {
        asset: String,
        collateral_amount: Uint128,
        debt_amount: Uint128,
    },
    /// Burn synthetic units the engine is approved to pull from the sender
    BurnSynthetic {
        amount: Uint128,
    },
    /// Repay an insolvent user's debt in exchange for their collateral plus a bonus
    Liquidate {
        /// Insolvent position owner
        user: String,
        /// Collateral to seize
        asset: String,
        /// Synthetic units to repay on the user's behalf
        debt_to_cover: Uint128,
    },
    //Callbacks; Only callable by the contract
    Callback(CallbackMsg),
}

/// Note: Since CallbackMsg are always sent by the contract itself, we assume all types are already
/// validated and don't do additional checks. E.g. user addresses are Addr instead of String
#[cw_serde]
pub enum CallbackMsg {
    /// Runs post-transition checks once every external call has returned,
    /// then releases the transition lock
    Settle {
        checks: Vec<PostCheck>,
    },
}

#[cw_serde]
pub enum PostCheck {
    /// User must be at or above the minimum health factor
    Solvent { user: Addr },
    /// User's health factor must be strictly above the starting value
    Improved {
        user: Addr,
        starting_health_factor: Uint128,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns the contract's config
    #[returns(Config)]
    Config {},
    /// Returns the liquidation & precision parameters
    #[returns(PolicyResponse)]
    Policy {},
    /// Returns a user's debt and total collateral value
    #[returns(AccountInformationResponse)]
    AccountInformation { user: String },
    /// Returns a user's total collateral value
    #[returns(Uint128)]
    CollateralValue { user: String },
    /// Returns a user's deposited amount of one asset
    #[returns(Uint128)]
    CollateralBalance { user: String, asset: String },
    /// Returns the registered collateral assets in registration order
    #[returns(Vec<Addr>)]
    CollateralAssets {},
    /// Returns the price feed of a collateral asset
    #[returns(Addr)]
    PriceFeed { asset: String },
    /// Returns a user's current health factor
    #[returns(Uint128)]
    HealthFactor { user: String },
    /// Health factor for an arbitrary debt & collateral value pair
    #[returns(Uint128)]
    CalculateHealthFactor {
        total_debt: Uint128,
        collateral_value: Uint128,
    },
    /// Debt-denominated value of an asset amount
    #[returns(Uint128)]
    ValueOf { asset: String, amount: Uint128 },
    /// Asset amount worth a debt-denominated value
    #[returns(Uint128)]
    AmountOf { asset: String, value: Uint128 },
}

#[cw_serde]
pub struct Config {
    /// Synthetic cw20 contract
    pub synthetic_token: Addr,
    /// Percent of collateral value counted toward solvency
    pub liquidation_threshold: Uint128,
    /// Percent bonus paid to liquidators
    pub liquidation_bonus: Uint128,
    /// Denominator of threshold & bonus
    pub liquidation_precision: Uint128,
    /// Health factor of 1.0
    pub min_health_factor: Uint128,
    /// Fixed-point scale of every value
    pub precision: Uint128,
    /// Decimals of feed answers
    pub feed_decimals: u32,
    /// Seconds until a feed answer is stale
    pub oracle_time_limit: u64,
}

impl Config {
    /// Scale from feed decimals to `precision`
    pub fn additional_feed_precision(&self) -> Uint128 {
        Uint128::new(10u128.pow(18u32.saturating_sub(self.feed_decimals)))
    }
}

#[cw_serde]
pub struct PolicyResponse {
    pub liquidation_threshold: Uint128,
    pub liquidation_bonus: Uint128,
    pub liquidation_precision: Uint128,
    pub min_health_factor: Uint128,
    pub precision: Uint128,
    pub additional_feed_precision: Uint128,
}

#[cw_serde]
pub struct AccountInformationResponse {
    pub total_synthetic_minted: Uint128,
    pub collateral_value: Uint128,
}
