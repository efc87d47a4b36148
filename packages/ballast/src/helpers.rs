use cosmwasm_std::{to_binary, Addr, CosmosMsg, StdResult, Uint128, WasmMsg, QuerierWrapper, QueryRequest, WasmQuery};
use cosmwasm_schema::cw_serde;
use cw20::Cw20ExecuteMsg;

use crate::oracle::{FeedQueryMsg, LatestPriceResponse};

/// TokenContract is a wrapper around a cw20 Addr that builds
/// the messages the engine sends to collateral & synthetic tokens.
#[cw_serde]
pub struct TokenContract(pub Addr);

impl TokenContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call(&self, msg: Cw20ExecuteMsg) -> StdResult<CosmosMsg> {
        let msg = to_binary(&msg)?;
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg,
            funds: vec![],
        }
        .into())
    }

    /// Pull `amount` from `owner` to `recipient` using the owner's allowance
    pub fn transfer_from(&self, owner: &Addr, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
        self.call(Cw20ExecuteMsg::TransferFrom {
            owner: owner.to_string(),
            recipient: recipient.to_string(),
            amount,
        })
    }

    /// Send `amount` of the caller's balance to `recipient`
    pub fn transfer(&self, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
        self.call(Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        })
    }

    pub fn mint(&self, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
        self.call(Cw20ExecuteMsg::Mint {
            recipient: recipient.to_string(),
            amount,
        })
    }

    /// Burns from the caller's own balance
    pub fn burn(&self, amount: Uint128) -> StdResult<CosmosMsg> {
        self.call(Cw20ExecuteMsg::Burn { amount })
    }
}

/// Returns the latest answer of a price feed contract
pub fn query_latest_price(
    querier: QuerierWrapper,
    feed: &Addr,
) -> StdResult<LatestPriceResponse> {
    querier.query::<LatestPriceResponse>(&QueryRequest::Wasm(WasmQuery::Smart {
        contract_addr: feed.to_string(),
        msg: to_binary(&FeedQueryMsg::LatestPrice {})?,
    }))
}
