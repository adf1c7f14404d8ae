use common_errors::ERROR_SELF_TRANSFER;

use crate::{cache::MarketCache, market, rewards, storage, validation};

use super::account;

multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait PositionTransferModule:
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
    /// Moves supply shares worth `requested_amount` from `sender` to `receiver`.
    ///
    /// Both accounts are checkpointed for rewards before the shares move. The market totals
    /// do not change. Requests above the position, or leaving dust behind, move the whole
    /// position. The sender's borrow limit is checked by the caller.
    fn process_supply_transfer(
        &self,
        sender: &ManagedAddress,
        receiver: &ManagedAddress,
        asset: &EgldOrEsdtTokenIdentifier,
        requested_amount: &BigUint,
    ) {
        require!(sender != receiver, ERROR_SELF_TRANSFER);
        let mut sender_position = self.require_supply_position(sender, asset);

        let mut market = MarketCache::new(self, asset);
        self.global_sync(&mut market);
        self.checkpoint_account_rewards(&market, sender);
        self.checkpoint_account_rewards(&market, receiver);

        let (amount, shares) = self.split_supply_shares(
            &market,
            &sender_position.scaled_amount,
            &market.get_decimal_value(requested_amount),
        );

        let mut receiver_position = self.get_or_new_supply_position(receiver, &market);
        sender_position.scaled_amount = self.sub_or_zero(&sender_position.scaled_amount, &shares);
        receiver_position.scaled_amount = receiver_position.scaled_amount.clone() + shares;

        self.store_supply_position(sender, asset, &sender_position);
        self.store_supply_position(receiver, asset, &receiver_position);

        self.update_supply_position_event(asset, sender, &amount, &sender_position);
        self.update_supply_position_event(asset, receiver, &amount, &receiver_position);
    }
}
