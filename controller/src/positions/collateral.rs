use common_errors::ERROR_ASSET_NOT_COLLATERAL;

use crate::{storage, validation};

use super::account;

multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait PositionCollateralModule:
    storage::Storage
    + validation::ValidationModule
    + account::PositionAccountModule
    + crate::market::MarketModule
    + common_rates::InterestRates
    + common_math::SharedMathModule
    + common_events::EventsModule
{
    /// Sets whether a supply position counts toward the borrow limit. Balances do not move,
    /// so neither interest nor rewards need a checkpoint.
    fn process_collateral_toggle(
        &self,
        account: &ManagedAddress,
        asset: &EgldOrEsdtTokenIdentifier,
        is_collateral: bool,
    ) {
        let mut position = self.require_supply_position(account, asset);
        if is_collateral {
            require!(
                self.market_params(asset).get().can_be_collateral,
                ERROR_ASSET_NOT_COLLATERAL
            );
        }

        position.is_collateral = is_collateral;
        self.store_supply_position(account, asset, &position);

        let zero = self.to_decimal(BigUint::zero(), self.market_params(asset).get().asset_decimals);
        self.update_supply_position_event(asset, account, &zero, &position);
    }
}
