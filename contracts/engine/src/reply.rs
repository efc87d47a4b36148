use cosmwasm_std::{Reply, Response};

use crate::ContractError;

//Token movement failed, the whole transition is reverted
pub fn handle_transfer_reply(msg: Reply) -> Result<Response, ContractError> {
    match msg.result.into_result() {
        Ok(_result) => {
            //Its reply on error only
            Ok(Response::new())
        }
        Err(reason) => Err(ContractError::TransferFailed { reason }),
    }
}

//The synthetic token refused to mint, the debt increase is reverted with the rest of the transition
pub fn handle_mint_reply(msg: Reply) -> Result<Response, ContractError> {
    match msg.result.into_result() {
        Ok(_result) => Ok(Response::new()),
        Err(reason) => Err(ContractError::MintFailed { reason }),
    }
}
