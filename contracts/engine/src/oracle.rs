use cosmwasm_std::{Addr, Env, QuerierWrapper, Uint128};

use ballast::engine::Config;
use ballast::helpers::query_latest_price;
use ballast::oracle::LatestPriceResponse;

use crate::ContractError;

/// Read-only access to per-asset price feeds
pub trait PriceSource {
    fn latest_price(&self, feed: &Addr) -> Result<LatestPriceResponse, ContractError>;
}

/// Queries feed contracts through the chain querier
pub struct FeedQuerier<'a> {
    pub querier: QuerierWrapper<'a>,
}

impl<'a> FeedQuerier<'a> {
    pub fn new(querier: QuerierWrapper<'a>) -> Self {
        FeedQuerier { querier }
    }
}

impl<'a> PriceSource for FeedQuerier<'a> {
    fn latest_price(&self, feed: &Addr) -> Result<LatestPriceResponse, ContractError> {
        //If the feed is down, error
        Ok(query_latest_price(self.querier, feed)?)
    }
}

/// Returns the feed's price as an unsigned integer in feed decimals.
/// Non-positive and stale answers are errors, never zero.
pub fn checked_price(
    source: &dyn PriceSource,
    config: &Config,
    env: &Env,
    feed: &Addr,
) -> Result<Uint128, ContractError> {
    let answer = source.latest_price(feed)?;

    if answer.price.i128() <= 0 {
        return Err(ContractError::InvalidPrice { feed: feed.to_string() });
    }

    let now = env.block.time.seconds();
    if answer.updated_at > now || now - answer.updated_at > config.oracle_time_limit {
        return Err(ContractError::StalePrice {
            feed: feed.to_string(),
            updated_at: answer.updated_at,
        });
    }

    Ok(Uint128::new(answer.price.i128() as u128))
}
