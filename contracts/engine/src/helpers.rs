use cosmwasm_std::{to_binary, Addr, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg, WasmQuery};
use cosmwasm_schema::cw_serde;

use ballast::engine::{ExecuteMsg, QueryMsg};

/// EngineContract is a wrapper around Addr that provides helpers
/// for calling the engine from other contracts & tests

#[cw_serde]
pub struct EngineContract(pub Addr);

impl EngineContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call<T: Into<ExecuteMsg>>(&self, msg: T) -> StdResult<CosmosMsg> {
        let msg = to_binary(&msg.into())?;
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg,
            funds: vec![],
        }
        .into())
    }

    pub fn health_factor(&self, querier: QuerierWrapper, user: impl Into<String>) -> StdResult<Uint128> {
        querier.query(
            &WasmQuery::Smart {
                contract_addr: self.addr().into(),
                msg: to_binary(&QueryMsg::HealthFactor { user: user.into() })?,
            }
            .into(),
        )
    }
}
