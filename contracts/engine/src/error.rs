use cosmwasm_std::{CheckedMultiplyRatioError, OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    MultiplyRatio(#[from] CheckedMultiplyRatioError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Amount must be more than zero")]
    ZeroAmount {},

    #[error("Invalid collateral token: {asset}")]
    InvalidCollateralToken { asset: String },

    #[error("Token addresses and price feed addresses must be the same length")]
    ConfigurationMismatch {},

    #[error("Invalid function parameters")]
    InvalidParameters {},

    #[error("Transfer failed: {reason}")]
    TransferFailed { reason: String },

    #[error("Mint failed: {reason}")]
    MintFailed { reason: String },

    #[error("Breaks health factor: {health_factor}")]
    BreaksHealthFactor { health_factor: Uint128 },

    #[error("Health factor is OK, position can't be liquidated")]
    HealthFactorOk {},

    #[error("Health factor not improved by liquidation")]
    HealthFactorNotImproved {},

    #[error("Invalid price from feed: {feed}")]
    InvalidPrice { feed: String },

    #[error("Stale price from feed {feed}, last updated at {updated_at}")]
    StalePrice { feed: String, updated_at: u64 },

    #[error("Transition already in progress")]
    Reentrancy {},
}

impl From<OverflowError> for ContractError {
    fn from(o: OverflowError) -> Self {
        StdError::from(o).into()
    }
}
