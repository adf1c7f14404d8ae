use crate::{cache::MarketCache, market, rewards, storage, validation};

use super::account;

multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait PositionDepositModule:
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
    /// Mints supply shares for a payment at the current supply index.
    ///
    /// **Steps**:
    /// 1. Sync the market and checkpoint the supplier's rewards.
    /// 2. `shares = amount / supply_index`, added to the position and the market total.
    /// 3. The payment joins the market's cash.
    fn process_supply(
        &self,
        supplier: &ManagedAddress,
        payment: &EgldOrEsdtTokenPayment<Self::Api>,
    ) {
        let asset = &payment.token_identifier;
        let mut market = MarketCache::new(self, asset);
        self.global_sync(&mut market);
        self.checkpoint_account_rewards(&market, supplier);

        let amount = market.get_decimal_value(&payment.amount);
        let shares = market.get_scaled_supply_amount(&amount);

        let mut position = self.get_or_new_supply_position(supplier, &market);
        position.scaled_amount = position.scaled_amount.clone() + shares.clone();

        market.add_supplied(&shares);
        market.add_cash(&amount);

        self.store_supply_position(supplier, asset, &position);
        self.update_supply_position_event(asset, supplier, &amount, &position);
    }
}
