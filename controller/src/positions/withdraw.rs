use common_errors::ERROR_INSUFFICIENT_LIQUIDITY;

use crate::{cache::MarketCache, market, rewards, storage, validation};

use super::account;

multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait PositionWithdrawModule:
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
    /// Burns the supply shares backing `requested_amount` and releases the tokens from the
    /// market's cash.
    ///
    /// Requests above the position are capped to the full credit; a remainder below the dust
    /// threshold is withdrawn too. The caller still has to check the borrow limit and send
    /// the returned amount.
    ///
    /// # Returns
    /// - The token amount leaving the market, in asset decimals.
    fn process_withdrawal(
        &self,
        account: &ManagedAddress,
        asset: &EgldOrEsdtTokenIdentifier,
        requested_amount: &BigUint,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mut position = self.require_supply_position(account, asset);

        let mut market = MarketCache::new(self, asset);
        self.global_sync(&mut market);
        self.checkpoint_account_rewards(&market, account);

        let (amount, shares) = self.split_supply_shares(
            &market,
            &position.scaled_amount,
            &market.get_decimal_value(requested_amount),
        );
        require!(market.has_liquidity(&amount), ERROR_INSUFFICIENT_LIQUIDITY);

        position.scaled_amount = self.sub_or_zero(&position.scaled_amount, &shares);
        market.remove_supplied(&shares);
        market.remove_cash(&amount);

        self.store_supply_position(account, asset, &position);
        self.update_supply_position_event(asset, account, &amount, &position);

        amount
    }
}
