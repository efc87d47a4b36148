use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::Int128;

/// Interface of a per-asset price feed contract
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeedQueryMsg {
    LatestPrice {},
}

// Latest answer of a feed, decimals are fixed per deployment
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct LatestPriceResponse {
    pub price: Int128,
    /// Unix seconds of the answer
    pub updated_at: u64,
}
