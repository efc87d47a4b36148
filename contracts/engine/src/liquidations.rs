use cosmwasm_std::{attr, Addr, Env, QuerierWrapper, Response, Storage, Uint128};

use ballast::engine::Config;

use crate::error::ContractError;
use crate::oracle::FeedQuerier;
use crate::positions::{burn_synthetic, merge_responses, redeem_collateral};
use crate::risk_engine::is_insolvent;
use crate::state::{assert_registered, CONFIG};
use crate::valuation::Valuation;

/// Collateral owed to a liquidator for covering `debt_to_cover`: the debt-equivalent amount plus the bonus.
/// Returns (seized_amount, bonus).
pub fn liquidation_amounts(
    valuation: &Valuation,
    asset: &Addr,
    debt_to_cover: Uint128,
) -> Result<(Uint128, Uint128), ContractError> {
    let config = valuation.config;

    let seized_amount = valuation.amount_of(asset, debt_to_cover)?;
    let bonus = seized_amount.checked_multiply_ratio(config.liquidation_bonus, config.liquidation_precision)?;

    Ok((seized_amount, bonus))
}

//Confirms insolvency and calculates the seized amount
//Then moves the collateral to the liquidator & burns the covered debt, paid by the liquidator
//Returns the target's starting health factor for the post-liquidation checks
pub fn liquidate(
    storage: &mut dyn Storage,
    querier: QuerierWrapper,
    env: &Env,
    liquidator: &Addr,
    user: &Addr,
    asset: &Addr,
    debt_to_cover: Uint128,
) -> Result<(Response, Uint128), ContractError> {
    if debt_to_cover.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    assert_registered(storage, asset)?;
    let config: Config = CONFIG.load(storage)?;

    let source = FeedQuerier::new(querier);
    let (starting_health_factor, seized_amount, bonus) = {
        let valuation = Valuation::new(storage, &source, &config, env);

        //Check position health
        let starting_health_factor = valuation.health_factor(user)?;
        if !is_insolvent(&config, starting_health_factor) {
            return Err(ContractError::HealthFactorOk {});
        }

        let (seized_amount, bonus) = liquidation_amounts(&valuation, asset, debt_to_cover)?;

        (starting_health_factor, seized_amount, bonus)
    };
    let total_collateral_to_redeem = seized_amount.checked_add(bonus)?;

    //Send the user's collateral to the liquidator
    let redeem_response = redeem_collateral(storage, asset, total_collateral_to_redeem, user, liquidator)?;
    //Burn the user's debt using the liquidator's synthetic units
    let burn_response = burn_synthetic(storage, env, debt_to_cover, user, liquidator)?;

    let response = merge_responses(redeem_response, burn_response).add_attributes(vec![
        attr("method", "liquidate"),
        attr("liquidator", liquidator),
        attr("user", user),
        attr("asset", asset),
        attr("debt_covered", debt_to_cover),
        attr("seized_amount", seized_amount),
        attr("bonus", bonus),
        attr("starting_health_factor", starting_health_factor),
    ]);

    Ok((response, starting_health_factor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::mock::FixedPrices;
    use crate::state::PRICE_FEEDS;
    use cosmwasm_std::testing::{mock_env, MockStorage};

    const E18: u128 = 1_000_000_000_000_000_000;

    fn config() -> Config {
        Config {
            synthetic_token: Addr::unchecked("synthetic"),
            liquidation_threshold: Uint128::new(50),
            liquidation_bonus: Uint128::new(10),
            liquidation_precision: Uint128::new(100),
            min_health_factor: Uint128::new(E18),
            precision: Uint128::new(E18),
            feed_decimals: 8,
            oracle_time_limit: 10_800,
        }
    }

    #[test]
    fn bonus_on_top_of_debt_equivalent() {
        let mut storage = MockStorage::new();
        PRICE_FEEDS.save(&mut storage, &Addr::unchecked("weth"), &Addr::unchecked("eth_feed")).unwrap();
        let env = mock_env();
        let prices = FixedPrices::default().with_price("eth_feed", 18_00000000, env.block.time.seconds());
        let config = config();
        let valuation = Valuation::new(&storage, &prices, &config, &env);

        let (seized_amount, bonus) =
            liquidation_amounts(&valuation, &Addr::unchecked("weth"), Uint128::new(100 * E18)).unwrap();

        //100 / 18 rounded down, 10% of that rounded down
        assert_eq!(seized_amount, Uint128::new(5_555_555_555_555_555_555));
        assert_eq!(bonus, Uint128::new(555_555_555_555_555_555));
    }
}
