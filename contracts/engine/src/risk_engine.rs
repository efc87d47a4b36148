use std::convert::TryFrom;

use cosmwasm_std::{Uint128, Uint256};

use ballast::engine::Config;

/// Solvency ratio of a (debt, collateral value) pair, scaled by `config.precision`.
///
/// No debt means the position can't be undercollateralized, so the ratio is `Uint128::MAX`.
/// Otherwise the collateral value is haircut by the liquidation threshold and divided by the debt.
/// Intermediates are 256-bit, every division rounds toward zero and the result saturates at `Uint128::MAX`.
pub fn calculate_health_factor(
    config: &Config,
    total_debt: Uint128,
    collateral_value: Uint128,
) -> Uint128 {
    if total_debt.is_zero() {
        return Uint128::MAX;
    }
    //Guarded at instantiate, kept so this stays total
    if config.liquidation_precision.is_zero() {
        return Uint128::zero();
    }

    let adjusted_collateral = Uint256::from(collateral_value)
        * Uint256::from(config.liquidation_threshold)
        / Uint256::from(config.liquidation_precision);

    let ratio = adjusted_collateral
        .checked_mul(Uint256::from(config.precision))
        .map(|scaled| scaled / Uint256::from(total_debt));

    match ratio {
        Ok(ratio) => Uint128::try_from(ratio).unwrap_or(Uint128::MAX),
        Err(_) => Uint128::MAX,
    }
}

/// Below the minimum health factor means liquidatable
pub fn is_insolvent(config: &Config, health_factor: Uint128) -> bool {
    health_factor < config.min_health_factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::Addr;

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
    fn no_debt_is_max() {
        let config = config();

        assert_eq!(calculate_health_factor(&config, Uint128::zero(), Uint128::zero()), Uint128::MAX);
        assert_eq!(calculate_health_factor(&config, Uint128::zero(), Uint128::new(1_000 * E18)), Uint128::MAX);
    }

    #[test]
    fn threshold_haircut() {
        let config = config();

        //20_000 of value, 5_000 of debt: 10_000 / 5_000 = 2.0
        assert_eq!(
            calculate_health_factor(&config, Uint128::new(5_000 * E18), Uint128::new(20_000 * E18)),
            Uint128::new(2 * E18)
        );
        //150 of value, 100 of debt: 75 / 100 = 0.75
        let health_factor = calculate_health_factor(&config, Uint128::new(100 * E18), Uint128::new(150 * E18));
        assert_eq!(health_factor, Uint128::new(75 * E18 / 100));
        assert!(is_insolvent(&config, health_factor));
        //Exactly 1.0 is solvent
        assert!(!is_insolvent(&config, calculate_health_factor(&config, Uint128::new(100 * E18), Uint128::new(200 * E18))));
    }

    #[test]
    fn rounds_down() {
        let config = config();

        //3 * 50 / 100 = 1 (1.5 truncated), 1 * 1e18 / 1
        assert_eq!(calculate_health_factor(&config, Uint128::one(), Uint128::new(3)), Uint128::new(E18));
        //1e18 / 3 truncated
        assert_eq!(
            calculate_health_factor(&config, Uint128::new(3), Uint128::new(2)),
            Uint128::new(333_333_333_333_333_333)
        );
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let config = config();

        assert_eq!(calculate_health_factor(&config, Uint128::one(), Uint128::MAX), Uint128::MAX);
    }

    #[test]
    fn monotonic() {
        let config = config();
        let values = [0u128, 1, 7, 100 * E18, 15_000 * E18, 20_000 * E18, u128::MAX / 3];
        let debts = [1u128, 3, 100 * E18, 5_000 * E18, 10_000 * E18];

        for debt in debts.iter() {
            for pair in values.windows(2) {
                let lower = calculate_health_factor(&config, Uint128::new(*debt), Uint128::new(pair[0]));
                let higher = calculate_health_factor(&config, Uint128::new(*debt), Uint128::new(pair[1]));
                assert!(lower <= higher);
            }
        }
        for value in values.iter() {
            for pair in debts.windows(2) {
                let more_healthy = calculate_health_factor(&config, Uint128::new(pair[0]), Uint128::new(*value));
                let less_healthy = calculate_health_factor(&config, Uint128::new(pair[1]), Uint128::new(*value));
                assert!(less_healthy <= more_healthy);
            }
        }
    }
}
