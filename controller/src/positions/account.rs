use common_constants::WAD_PRECISION;
use common_errors::ERROR_POSITION_NOT_FOUND;
use common_structs::{BorrowPosition, SupplyPosition};

use crate::{cache::MarketCache, market, storage};

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

#[multiversx_sc::module]
pub trait PositionAccountModule:
    storage::Storage
    + market::MarketModule
    + common_rates::InterestRates
    + common_math::SharedMathModule
    + common_events::EventsModule
{
    fn require_supply_position(
        &self,
        account: &ManagedAddress,
        asset: &EgldOrEsdtTokenIdentifier,
    ) -> SupplyPosition<Self::Api> {
        match self.supply_positions(account).get(asset) {
            Some(position) => position,
            None => sc_panic!(ERROR_POSITION_NOT_FOUND),
        }
    }

    /// Supply position of an account, or an empty one that follows the market's collateral
    /// setting.
    fn get_or_new_supply_position(
        &self,
        account: &ManagedAddress,
        market: &MarketCache<Self>,
    ) -> SupplyPosition<Self::Api> {
        match self.supply_positions(account).get(market.asset()) {
            Some(position) => position,
            None => SupplyPosition::new(self.ray_zero(), market.params.can_be_collateral),
        }
    }

    fn get_or_new_borrow_position(
        &self,
        account: &ManagedAddress,
        market: &MarketCache<Self>,
    ) -> BorrowPosition<Self::Api> {
        match self.borrow_positions(account).get(market.asset()) {
            Some(position) => position,
            None => BorrowPosition::new(self.ray_zero(), market.borrow_index.clone()),
        }
    }

    /// Stores a supply position, dropping it once no shares are left.
    fn store_supply_position(
        &self,
        account: &ManagedAddress,
        asset: &EgldOrEsdtTokenIdentifier,
        position: &SupplyPosition<Self::Api>,
    ) {
        let mut positions = self.supply_positions(account);
        if position.scaled_amount == self.ray_zero() {
            positions.remove(asset);
        } else {
            positions.insert(asset.clone(), position.clone());
        }
    }

    fn store_borrow_position(
        &self,
        account: &ManagedAddress,
        asset: &EgldOrEsdtTokenIdentifier,
        position: &BorrowPosition<Self::Api>,
    ) {
        let mut positions = self.borrow_positions(account);
        if position.normalized_amount == self.ray_zero() {
            positions.remove(asset);
        } else {
            positions.insert(asset.clone(), position.clone());
        }
    }

    /// An amount is dust when, normalized to 18 decimals, it is below the system's
    /// `min_currency_amount`.
    fn is_dust(&self, amount: &ManagedDecimal<Self::Api, NumDecimals>) -> bool {
        let threshold = self.system_params().get().min_currency_amount;
        amount.rescale(WAD_PRECISION) < threshold.rescale(WAD_PRECISION)
    }

    /// Every market where the account holds a supply or a borrow position.
    fn get_account_markets(&self, account: &ManagedAddress) -> ManagedVec<EgldOrEsdtTokenIdentifier> {
        let mut assets = ManagedVec::new();
        for asset in self.supply_positions(account).keys() {
            assets.push(asset);
        }
        for asset in self.borrow_positions(account).keys() {
            if !self.supply_positions(account).contains_key(&asset) {
                assets.push(asset);
            }
        }

        assets
    }

    /// Brings every market the account participates in up to the current timestamp.
    fn sync_account_markets(&self, account: &ManagedAddress) {
        for asset in self.get_account_markets(account).iter() {
            let mut market = MarketCache::new(self, &asset);
            self.global_sync(&mut market);
        }
    }

    /// Token amount and shares taken out of a supply position for a request.
    ///
    /// # Returns
    /// - `(amount, shares)`: the whole position when the request covers it or would leave
    ///   dust behind, otherwise the request and its shares capped at the position.
    fn split_supply_shares(
        &self,
        market: &MarketCache<Self>,
        position_shares: &ManagedDecimal<Self::Api, NumDecimals>,
        requested_amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> (
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let credit = market.get_original_supply_amount(position_shares);
        if *requested_amount >= credit {
            return (credit, position_shares.clone());
        }

        let remaining = credit.clone() - requested_amount.clone();
        if self.is_dust(&remaining) {
            return (credit, position_shares.clone());
        }

        let shares = self.get_min(
            market.get_scaled_supply_amount(requested_amount),
            position_shares.clone(),
        );
        (requested_amount.clone(), shares)
    }

    /// Token amount used and normalized debt removed when `amount` is repaid.
    ///
    /// # Returns
    /// - `(used_amount, normalized_removed, written_off)`: a payment covering the debt closes
    ///   it and uses only the debt; a payment leaving dust behind closes it too and the dust is
    ///   written off; otherwise the payment is used in full.
    fn split_borrow_repayment(
        &self,
        market: &MarketCache<Self>,
        position_normalized: &ManagedDecimal<Self::Api, NumDecimals>,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> (
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let debt = market.get_original_borrow_amount(position_normalized);
        if *amount >= debt {
            return (debt, position_normalized.clone(), market.zero.clone());
        }

        let remaining = debt - amount.clone();
        if self.is_dust(&remaining) {
            return (amount.clone(), position_normalized.clone(), remaining);
        }

        let normalized = self.get_min(
            market.get_scaled_borrow_amount(amount),
            position_normalized.clone(),
        );
        (amount.clone(), normalized, market.zero.clone())
    }
}
