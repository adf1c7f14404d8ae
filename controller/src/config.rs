multiversx_sc::imports!();

use crate::{cache::MarketCache, market, rewards, storage, validation};
use common_constants::{RAY_PRECISION, WAD_PRECISION};
use common_errors::*;
use common_structs::{MarketParams, RewardPoolInfo, SystemParams};

/// Owner-controlled configuration of the controller.
///
/// Markets are listed here with their risk and rate parameters, the global risk settings and
/// the price oracle are set here, and the protocol's share of the interest is collected here.
/// Every ratio argument is a raw RAY value (1e27 = 100%).
#[multiversx_sc::module]
pub trait ConfigModule:
    storage::Storage
    + validation::ValidationModule
    + market::MarketModule
    + rewards::RewardsModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + common_rewards::RewardsMath
    + multiversx_sc_modules::pause::PauseModule
{
    /// Lists a new market with empty pools, indexes at one and no reward stream.
    ///
    /// # Errors
    /// - `ERROR_ASSET_ALREADY_SUPPORTED`: If the asset already has a market.
    /// - `ERROR_INVALID_TICKER`: If the asset identifier is invalid.
    /// - `ERROR_INVALID_MARKET_PARAMS`: If the parameters fail validation.
    #[allow_multiple_var_args]
    #[only_owner]
    #[endpoint(createMarket)]
    fn create_market(
        &self,
        asset: EgldOrEsdtTokenIdentifier,
        asset_decimals: usize,
        base_borrow_rate: BigUint,
        first_slope: BigUint,
        second_slope: BigUint,
        utilization_breaking_point: BigUint,
        max_utilization_ratio: BigUint,
        reserve_factor: BigUint,
        liquidation_discount: BigUint,
        collateralization_ratio: BigUint,
        min_supply_distribution_part: BigUint,
        min_borrow_distribution_part: BigUint,
        can_be_collateral: bool,
    ) {
        require!(!self.markets().contains(&asset), ERROR_ASSET_ALREADY_SUPPORTED);
        require!(asset.is_valid(), ERROR_INVALID_TICKER);

        let params = MarketParams {
            asset_id: asset.clone(),
            asset_decimals,
            base_borrow_rate: self.to_decimal_ray(base_borrow_rate),
            first_slope: self.to_decimal_ray(first_slope),
            second_slope: self.to_decimal_ray(second_slope),
            utilization_breaking_point: self.to_decimal_ray(utilization_breaking_point),
            max_utilization_ratio: self.to_decimal_ray(max_utilization_ratio),
            reserve_factor: self.to_decimal_ray(reserve_factor),
            liquidation_discount: self.to_decimal_ray(liquidation_discount),
            collateralization_ratio: self.to_decimal_ray(collateralization_ratio),
            min_supply_distribution_part: self.to_decimal_ray(min_supply_distribution_part),
            min_borrow_distribution_part: self.to_decimal_ray(min_borrow_distribution_part),
            can_be_collateral,
        };
        self.validate_market_params(&params);

        let asset_zero = self.to_decimal(BigUint::zero(), asset_decimals);
        self.market_params(&asset).set(&params);
        self.supplied(&asset).set(self.ray_zero());
        self.borrowed(&asset).set(self.ray_zero());
        self.aggregated_borrowed(&asset).set(&asset_zero);
        self.borrow_index(&asset).set(self.ray());
        self.supply_index(&asset).set(self.ray());
        self.reserves(&asset).set(self.ray_zero());
        self.cash(&asset).set(&asset_zero);
        self.last_timestamp(&asset)
            .set(self.blockchain().get_block_timestamp());
        self.reward_pool(&asset).set(RewardPoolInfo {
            supply_cumulative_sum: self.ray_zero(),
            borrow_cumulative_sum: self.ray_zero(),
            last_update_block: self.blockchain().get_block_nonce(),
            reward_per_block: self.to_decimal(BigUint::zero(), self.reward_decimals().get()),
        });
        self.markets().insert(asset.clone());

        self.create_market_event(&asset, &params);
    }

    /// Replaces the parameters of a market. Interest and rewards up to now are settled with
    /// the old parameters first. The asset decimals never change.
    #[allow_multiple_var_args]
    #[only_owner]
    #[endpoint(setMarketParams)]
    fn set_market_params(
        &self,
        asset: EgldOrEsdtTokenIdentifier,
        base_borrow_rate: BigUint,
        first_slope: BigUint,
        second_slope: BigUint,
        utilization_breaking_point: BigUint,
        max_utilization_ratio: BigUint,
        reserve_factor: BigUint,
        liquidation_discount: BigUint,
        collateralization_ratio: BigUint,
        min_supply_distribution_part: BigUint,
        min_borrow_distribution_part: BigUint,
        can_be_collateral: bool,
    ) {
        self.require_asset_supported(&asset);

        let params = {
            let mut market = MarketCache::new(self, &asset);
            self.global_sync(&mut market);
            self.sync_reward_pool(&market);

            MarketParams {
                asset_id: asset.clone(),
                asset_decimals: market.params.asset_decimals,
                base_borrow_rate: self.to_decimal_ray(base_borrow_rate),
                first_slope: self.to_decimal_ray(first_slope),
                second_slope: self.to_decimal_ray(second_slope),
                utilization_breaking_point: self.to_decimal_ray(utilization_breaking_point),
                max_utilization_ratio: self.to_decimal_ray(max_utilization_ratio),
                reserve_factor: self.to_decimal_ray(reserve_factor),
                liquidation_discount: self.to_decimal_ray(liquidation_discount),
                collateralization_ratio: self.to_decimal_ray(collateralization_ratio),
                min_supply_distribution_part: self.to_decimal_ray(min_supply_distribution_part),
                min_borrow_distribution_part: self.to_decimal_ray(min_borrow_distribution_part),
                can_be_collateral,
            }
        };
        self.validate_market_params(&params);

        self.market_params(&asset).set(&params);
        self.update_market_params_event(&asset, &params);
    }

    /// # Arguments
    /// - `liquidation_boundary`: Target borrow limit usage after a liquidation (RAY).
    /// - `min_currency_amount`: Dust threshold in whole token units (WAD).
    #[only_owner]
    #[endpoint(setSystemParams)]
    fn set_system_params(&self, liquidation_boundary: BigUint, min_currency_amount: BigUint) {
        let params = SystemParams {
            liquidation_boundary: self.to_decimal(liquidation_boundary, RAY_PRECISION),
            min_currency_amount: self.to_decimal(min_currency_amount, WAD_PRECISION),
        };
        self.validate_system_params(&params);

        self.system_params().set(&params);
        self.update_system_params_event(&params);
    }

    #[only_owner]
    #[endpoint(setPriceOracle)]
    fn set_price_oracle(&self, oracle_address: ManagedAddress) {
        require!(!oracle_address.is_zero(), ERROR_PRICE_ORACLE_NOT_SET);
        self.price_oracle_address().set(oracle_address);
    }

    /// Sends the protocol's accrued reserves of a market to the owner, as far as the market's
    /// cash allows.
    #[only_owner]
    #[endpoint(claimReserves)]
    fn claim_reserves(&self, asset: EgldOrEsdtTokenIdentifier) {
        self.require_asset_supported(&asset);

        let amount = {
            let mut market = MarketCache::new(self, &asset);
            self.global_sync(&mut market);

            let claimable = self.get_min(
                market.reserves.rescale(market.params.asset_decimals),
                market.cash.clone(),
            );
            market.reserves = self.sub_or_zero(&market.reserves, &claimable);
            market.remove_cash(&claimable);
            claimable
        };

        self.claim_reserves_event(&asset, &amount);
        self.tx()
            .to(ToCaller)
            .payment(EgldOrEsdtTokenPayment::new(
                asset,
                0,
                amount.into_raw_units().clone(),
            ))
            .transfer_if_not_empty();
    }
}
