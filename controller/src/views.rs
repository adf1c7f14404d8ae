multiversx_sc::imports!();

use common_structs::AccountHealth;

use crate::{
    cache::{Cache, MarketCache},
    helpers, market, oracle, positions, rewards, storage, utils, validation,
};

/// Read-only queries. Indexes are simulated up to the current block timestamp without
/// writing the accrual, so the answers match what the next transaction would see.
#[multiversx_sc::module]
pub trait ViewsModule:
    storage::Storage
    + validation::ValidationModule
    + market::MarketModule
    + oracle::OracleModule
    + utils::LendingUtilsModule
    + helpers::math::MathsModule
    + positions::account::PositionAccountModule
    + positions::liquidation::PositionLiquidationModule
    + rewards::RewardsModule
    + common_rewards::RewardsMath
    + multiversx_sc_modules::pause::PauseModule
    + common_rates::InterestRates
    + common_math::SharedMathModule
    + common_events::EventsModule
{
    /// Borrow index (RAY) of a market.
    #[view(getCurrentIndex)]
    fn get_current_index(&self, asset: EgldOrEsdtTokenIdentifier) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_asset_supported(&asset);
        self.get_market_index(&asset).borrow_index
    }

    #[view(getSupplyIndex)]
    fn get_supply_index(&self, asset: EgldOrEsdtTokenIdentifier) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_asset_supported(&asset);
        self.get_market_index(&asset).supply_index
    }

    #[view(getUtilization)]
    fn get_market_utilization(
        &self,
        asset: EgldOrEsdtTokenIdentifier,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_asset_supported(&asset);
        self.simulated_market(&asset).get_utilization()
    }

    /// Annual borrow rate (RAY) at the market's current utilization.
    #[view(getBorrowRate)]
    fn get_borrow_rate(&self, asset: EgldOrEsdtTokenIdentifier) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_asset_supported(&asset);
        let market = self.simulated_market(&asset);
        self.calc_annual_borrow_rate(&market.get_utilization(), &market.params)
    }

    /// Annual rate (RAY) earned by suppliers at the market's current utilization.
    #[view(getDepositRate)]
    fn get_deposit_rate(&self, asset: EgldOrEsdtTokenIdentifier) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_asset_supported(&asset);
        let market = self.simulated_market(&asset);
        let utilization = market.get_utilization();
        let borrow_rate = self.calc_annual_borrow_rate(&utilization, &market.params);
        self.calc_deposit_rate(&utilization, &borrow_rate, &market.params.reserve_factor)
    }

    /// Debt of an account in a market, in asset decimals.
    #[view(getUserDebt)]
    fn get_user_debt(
        &self,
        asset: EgldOrEsdtTokenIdentifier,
        account: ManagedAddress,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_asset_supported(&asset);
        let market = self.simulated_market(&asset);
        match self.borrow_positions(&account).get(&asset) {
            Some(position) => market.get_original_borrow_amount(&position.normalized_amount),
            None => market.zero.clone(),
        }
    }

    /// Supply credit of an account in a market, in asset decimals.
    #[view(getUserSupply)]
    fn get_user_supply(
        &self,
        asset: EgldOrEsdtTokenIdentifier,
        account: ManagedAddress,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_asset_supported(&asset);
        let market = self.simulated_market(&asset);
        match self.supply_positions(&account).get(&asset) {
            Some(position) => market.get_original_supply_amount(&position.scaled_amount),
            None => market.zero.clone(),
        }
    }

    #[view(getAccountHealth)]
    fn get_account_health(&self, account: ManagedAddress) -> AccountHealth<Self::Api> {
        let mut cache = Cache::new(self);
        self.calculate_account_health(&account, &mut cache)
    }

    /// Borrowing power of an account in USD (WAD).
    #[view(getBorrowLimit)]
    fn get_borrow_limit(&self, account: ManagedAddress) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.get_account_health(account).borrow_limit_usd
    }

    #[view(getTotalBorrowValue)]
    fn get_total_borrow_value(&self, account: ManagedAddress) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.get_account_health(account).total_borrow_usd
    }

    /// `total_borrow_value / borrow_limit` (RAY). Above one the account can be liquidated.
    #[view(getBorrowLimitUsed)]
    fn get_borrow_limit_used(&self, account: ManagedAddress) -> ManagedDecimal<Self::Api, NumDecimals> {
        let health = self.get_account_health(account);
        self.calc_borrow_limit_used(&health)
    }

    /// Largest repayment of `debt_asset` a liquidation against `collateral_asset` accepts
    /// right now, in debt asset decimals.
    #[view(getMaxLiquidationQuantity)]
    fn get_max_liquidation_quantity(
        &self,
        borrower: ManagedAddress,
        debt_asset: EgldOrEsdtTokenIdentifier,
        collateral_asset: EgldOrEsdtTokenIdentifier,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_asset_supported(&debt_asset);
        self.require_asset_supported(&collateral_asset);

        let mut cache = Cache::new(self);
        let (max_quantity, _) =
            self.calculate_max_liquidation(&borrower, &debt_asset, &collateral_asset, &mut cache);
        max_quantity
    }

    fn simulated_market(&self, asset: &EgldOrEsdtTokenIdentifier) -> MarketCache<Self> {
        let mut market = MarketCache::read_only(self, asset);
        self.apply_accrual(&mut market);
        market
    }
}
