use common_errors::ERROR_NO_DEBT_IN_ASSET;

use crate::{cache::MarketCache, market, rewards, storage, validation};

use super::account;

multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait PositionRepayModule:
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
    /// Repays `borrower`'s debt in the payment's market.
    ///
    /// A payment above the debt closes the position and the excess is refunded to the payer.
    /// A payment leaving less than the dust threshold closes the position too; the unpaid
    /// remainder is written off.
    ///
    /// # Returns
    /// - The amount to refund to the payer, in asset decimals.
    fn process_repayment(
        &self,
        borrower: &ManagedAddress,
        payment: &EgldOrEsdtTokenPayment<Self::Api>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let asset = &payment.token_identifier;
        let mut position = match self.borrow_positions(borrower).get(asset) {
            Some(position) => position,
            None => sc_panic!(ERROR_NO_DEBT_IN_ASSET),
        };

        let mut market = MarketCache::new(self, asset);
        self.global_sync(&mut market);
        self.checkpoint_account_rewards(&market, borrower);

        let amount = market.get_decimal_value(&payment.amount);
        let (used_amount, normalized, written_off) =
            self.split_borrow_repayment(&market, &position.normalized_amount, &amount);

        position.normalized_amount = self.sub_or_zero(&position.normalized_amount, &normalized);
        position.last_seen_index = market.borrow_index.clone();
        market.remove_borrowed(&normalized);
        market.add_cash(&used_amount);

        self.store_borrow_position(borrower, asset, &position);
        self.update_borrow_position_event(asset, borrower, &used_amount, &position);
        if written_off > market.zero {
            self.write_off_dust_debt_event(asset, borrower, &written_off);
        }

        self.sub_or_zero(&amount, &used_amount)
    }
}
