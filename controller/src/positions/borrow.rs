use common_errors::{ERROR_INSUFFICIENT_LIQUIDITY, ERROR_MAX_UTILIZATION_EXCEEDED};

use crate::{cache::MarketCache, market, rewards, storage, validation};

use super::account;

multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait PositionBorrowModule:
    storage::Storage
    + validation::ValidationModule
    + market::MarketModule
    + rewards::RewardsModule
    + common_rewards::RewardsMath
    + multiversx_sc_modules::pause::PauseModule
    + account::PositionAccountModule
    + common_rates::InterestRates
    + common_math::SharedMathModule
    + common_events::EventsModule
{
    /// Opens or grows a borrow position and takes the tokens out of the market's cash.
    ///
    /// **Checks**:
    /// - The market holds `amount` of available liquidity.
    /// - Utilization after the borrow stays within `max_utilization_ratio`.
    ///
    /// The borrow limit is checked by the caller once the market state is committed.
    fn process_borrow(
        &self,
        borrower: &ManagedAddress,
        asset: &EgldOrEsdtTokenIdentifier,
        requested_amount: &BigUint,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mut market = MarketCache::new(self, asset);
        self.global_sync(&mut market);

        let amount = market.get_decimal_value(requested_amount);
        require!(market.has_liquidity(&amount), ERROR_INSUFFICIENT_LIQUIDITY);
        require!(
            market.get_utilization_after_borrow(&amount) <= market.params.max_utilization_ratio,
            ERROR_MAX_UTILIZATION_EXCEEDED
        );

        self.checkpoint_account_rewards(&market, borrower);

        let normalized = market.get_scaled_borrow_amount(&amount);
        let mut position = self.get_or_new_borrow_position(borrower, &market);
        position.normalized_amount = position.normalized_amount.clone() + normalized.clone();
        position.last_seen_index = market.borrow_index.clone();

        market.add_borrowed(&normalized);
        market.remove_cash(&amount);

        self.store_borrow_position(borrower, asset, &position);
        self.update_borrow_position_event(asset, borrower, &amount, &position);

        amount
    }
}
