use common_errors::{
    ERROR_EXCEEDS_MAX_LIQUIDATION, ERROR_LIQUIDATION_WORSENS_POSITION,
    ERROR_NOT_ELIGIBLE_FOR_LIQUIDATION, ERROR_NO_COLLATERAL_IN_ASSET, ERROR_NO_DEBT_IN_ASSET,
    ERROR_SELF_LIQUIDATION, ERROR_TOKEN_MISMATCH,
};
use common_structs::AccountHealth;

use crate::{
    cache::{Cache, MarketCache},
    helpers, market, oracle, rewards, storage, utils, validation,
};

use super::account;

multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait PositionLiquidationModule:
    storage::Storage
    + validation::ValidationModule
    + market::MarketModule
    + rewards::RewardsModule
    + common_rewards::RewardsMath
    + multiversx_sc_modules::pause::PauseModule
    + oracle::OracleModule
    + utils::LendingUtilsModule
    + helpers::math::MathsModule
    + account::PositionAccountModule
    + common_rates::InterestRates
    + common_math::SharedMathModule
    + common_events::EventsModule
{
    /// Largest amount of `debt_asset` a liquidator may repay for `borrower` in one call,
    /// seizing `collateral_asset`.
    ///
    /// The account must be above 100% usage, and at or below `(1 - d) * CR` of the
    /// collateral, or no seizure of it could avoid raising the usage.
    ///
    /// **Bounds** (in USD, converted to debt tokens at the end, floored):
    /// 1. The borrower's debt in `debt_asset`.
    /// 2. The collateral value after the liquidation discount.
    /// 3. The repayment restoring the liquidation boundary, when one exists.
    ///
    /// Markets are expected to be synced, or the cache to simulate their indexes.
    ///
    /// # Returns
    /// - `(max_quantity, health)`: the quantity in debt asset decimals and the account health
    ///   it was computed from.
    fn calculate_max_liquidation(
        &self,
        borrower: &ManagedAddress,
        debt_asset: &EgldOrEsdtTokenIdentifier,
        collateral_asset: &EgldOrEsdtTokenIdentifier,
        cache: &mut Cache<Self>,
    ) -> (ManagedDecimal<Self::Api, NumDecimals>, AccountHealth<Self::Api>) {
        let debt_position = match self.borrow_positions(borrower).get(debt_asset) {
            Some(position) => position,
            None => sc_panic!(ERROR_NO_DEBT_IN_ASSET),
        };
        let collateral_position = match self.supply_positions(borrower).get(collateral_asset) {
            Some(position) if position.is_collateral => position,
            _ => sc_panic!(ERROR_NO_COLLATERAL_IN_ASSET),
        };

        let health = self.calculate_account_health(borrower, cache);
        require!(health.is_liquidatable(), ERROR_NOT_ELIGIBLE_FOR_LIQUIDATION);

        let debt_feed = cache.get_cached_price(debt_asset);
        let collateral_feed = cache.get_cached_price(collateral_asset);
        let collateral_params = cache.get_cached_market_params(collateral_asset);
        require!(
            self.can_seizure_lower_usage(
                &health,
                &collateral_params.liquidation_discount,
                &collateral_params.collateralization_ratio,
            ),
            ERROR_NOT_ELIGIBLE_FOR_LIQUIDATION
        );

        let debt_amount =
            self.get_borrow_amount(debt_asset, &debt_position.normalized_amount, cache);
        let collateral_amount = self.get_supply_amount(
            collateral_asset,
            &collateral_position.scaled_amount,
            cache,
        );
        let debt_usd = self.get_token_usd_value(&debt_amount, &debt_feed.price);
        let collateral_usd = self.get_token_usd_value(&collateral_amount, &collateral_feed.price);

        let boundary_cap = self.calc_liquidation_boundary_cap(
            &health,
            &self.system_params().get().liquidation_boundary,
            &collateral_params.liquidation_discount,
            &collateral_params.collateralization_ratio,
        );
        let max_usd = self.calc_max_liquidation_usd(
            &debt_usd,
            &collateral_usd,
            &collateral_params.liquidation_discount,
            boundary_cap,
        );

        let max_quantity = self.get_min(
            self.convert_usd_to_tokens(&max_usd, &debt_feed),
            debt_amount,
        );

        (max_quantity, health)
    }

    /// Repays part of an unhealthy account's debt and hands the liquidator the matching
    /// collateral, discounted, as a supply position.
    ///
    /// **Steps**:
    /// 1. Validate the payment and sync every market of the borrower.
    /// 2. Size the liquidation; the payment must not exceed the maximum quantity.
    /// 3. Repay the debt, then move the seized collateral shares to the liquidator.
    /// 4. The borrower's borrow limit usage must not increase.
    ///
    /// # Returns
    /// - The part of the payment not needed to repay the debt, refunded to the liquidator.
    fn process_liquidation(
        &self,
        liquidator: &ManagedAddress,
        borrower: &ManagedAddress,
        debt_asset: &EgldOrEsdtTokenIdentifier,
        collateral_asset: &EgldOrEsdtTokenIdentifier,
        payment: &EgldOrEsdtTokenPayment<Self::Api>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        require!(liquidator != borrower, ERROR_SELF_LIQUIDATION);
        require!(
            &payment.token_identifier == debt_asset,
            ERROR_TOKEN_MISMATCH
        );
        self.validate_payment(payment);
        self.require_asset_supported(collateral_asset);

        self.sync_account_markets(borrower);

        let mut cache = Cache::new(self);
        let (max_quantity, health_before) =
            self.calculate_max_liquidation(borrower, debt_asset, collateral_asset, &mut cache);

        let debt_params = cache.get_cached_market_params(debt_asset);
        let repay_amount = self.to_decimal(payment.amount.clone(), debt_params.asset_decimals);
        require!(repay_amount <= max_quantity, ERROR_EXCEEDS_MAX_LIQUIDATION);

        let repaid = self.repay_liquidated_debt(borrower, debt_asset, &repay_amount);

        let debt_feed = cache.get_cached_price(debt_asset);
        let collateral_feed = cache.get_cached_price(collateral_asset);
        let collateral_params = cache.get_cached_market_params(collateral_asset);
        let seized_amount = self.calc_seized_collateral(
            &repaid,
            &debt_feed,
            &collateral_feed,
            &collateral_params.liquidation_discount,
        );
        let seized = self.seize_collateral(borrower, liquidator, collateral_asset, &seized_amount);

        let health_after = self.calculate_account_health(borrower, &mut cache);
        require!(
            self.is_borrow_limit_used_not_increased(&health_before, &health_after),
            ERROR_LIQUIDATION_WORSENS_POSITION
        );

        self.liquidation_event(
            liquidator,
            borrower,
            debt_asset,
            &repaid,
            collateral_asset,
            &seized,
        );

        self.sub_or_zero(&repay_amount, &repaid)
    }

    /// Reduces the borrower's debt by `amount`; a dust remainder is written off.
    ///
    /// # Returns
    /// - The amount actually used to repay the debt.
    fn repay_liquidated_debt(
        &self,
        borrower: &ManagedAddress,
        debt_asset: &EgldOrEsdtTokenIdentifier,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mut market = MarketCache::new(self, debt_asset);
        self.global_sync(&mut market);
        self.checkpoint_account_rewards(&market, borrower);

        let mut position = match self.borrow_positions(borrower).get(debt_asset) {
            Some(position) => position,
            None => sc_panic!(ERROR_NO_DEBT_IN_ASSET),
        };
        let (used_amount, normalized, written_off) =
            self.split_borrow_repayment(&market, &position.normalized_amount, amount);

        position.normalized_amount = self.sub_or_zero(&position.normalized_amount, &normalized);
        position.last_seen_index = market.borrow_index.clone();
        market.remove_borrowed(&normalized);
        market.add_cash(&used_amount);

        self.store_borrow_position(borrower, debt_asset, &position);
        self.update_borrow_position_event(debt_asset, borrower, &used_amount, &position);
        if written_off > market.zero {
            self.write_off_dust_debt_event(debt_asset, borrower, &written_off);
        }

        used_amount
    }

    /// Moves the supply shares worth `amount` from the borrower to the liquidator. The
    /// market's total supply is unchanged.
    ///
    /// # Returns
    /// - The collateral amount moved, capped at the borrower's position.
    fn seize_collateral(
        &self,
        borrower: &ManagedAddress,
        liquidator: &ManagedAddress,
        collateral_asset: &EgldOrEsdtTokenIdentifier,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mut market = MarketCache::new(self, collateral_asset);
        self.global_sync(&mut market);
        self.checkpoint_account_rewards(&market, borrower);
        self.checkpoint_account_rewards(&market, liquidator);

        let mut borrower_position = self.require_supply_position(borrower, collateral_asset);
        let (seized, shares) =
            self.split_supply_shares(&market, &borrower_position.scaled_amount, amount);

        let mut liquidator_position = self.get_or_new_supply_position(liquidator, &market);
        borrower_position.scaled_amount =
            self.sub_or_zero(&borrower_position.scaled_amount, &shares);
        liquidator_position.scaled_amount = liquidator_position.scaled_amount.clone() + shares;

        self.store_supply_position(borrower, collateral_asset, &borrower_position);
        self.store_supply_position(liquidator, collateral_asset, &liquidator_position);

        self.update_supply_position_event(collateral_asset, borrower, &seized, &borrower_position);
        self.update_supply_position_event(
            collateral_asset,
            liquidator,
            &seized,
            &liquidator_position,
        );

        seized
    }
}
