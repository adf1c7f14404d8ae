multiversx_sc::imports!();

use common_errors::ERROR_INSUFFICIENT_COLLATERAL;
use common_structs::AccountHealth;

use crate::{cache::Cache, helpers, market, oracle, storage};

#[multiversx_sc::module]
pub trait LendingUtilsModule:
    storage::Storage
    + oracle::OracleModule
    + market::MarketModule
    + helpers::math::MathsModule
    + common_rates::InterestRates
    + common_math::SharedMathModule
    + common_events::EventsModule
{
    /// Supply credit of `scaled_amount` shares at the market's current supply index.
    fn get_supply_amount(
        &self,
        asset: &EgldOrEsdtTokenIdentifier,
        scaled_amount: &ManagedDecimal<Self::Api, NumDecimals>,
        cache: &mut Cache<Self>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let index = cache.get_cached_market_index(asset);
        let params = cache.get_cached_market_params(asset);
        self.to_amount(scaled_amount, &index.supply_index, params.asset_decimals)
    }

    /// Debt owed for `normalized_amount` at the market's current borrow index.
    fn get_borrow_amount(
        &self,
        asset: &EgldOrEsdtTokenIdentifier,
        normalized_amount: &ManagedDecimal<Self::Api, NumDecimals>,
        cache: &mut Cache<Self>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let index = cache.get_cached_market_index(asset);
        let params = cache.get_cached_market_params(asset);
        self.to_amount(normalized_amount, &index.borrow_index, params.asset_decimals)
    }

    /// USD totals of every position of an account, at current indexes and oracle prices.
    ///
    /// Only collateral-enabled supply positions count toward the collateral value and the
    /// borrow limit.
    fn calculate_account_health(
        &self,
        account: &ManagedAddress,
        cache: &mut Cache<Self>,
    ) -> AccountHealth<Self::Api> {
        let mut total_collateral_usd = self.wad_zero();
        let mut borrow_limit_usd = self.wad_zero();
        let mut total_borrow_usd = self.wad_zero();

        for (asset, position) in self.supply_positions(account).iter() {
            if !position.is_collateral {
                continue;
            }

            let amount = self.get_supply_amount(&asset, &position.scaled_amount, cache);
            let feed = cache.get_cached_price(&asset);
            let value = self.get_token_usd_value(&amount, &feed.price);
            let params = cache.get_cached_market_params(&asset);

            borrow_limit_usd =
                borrow_limit_usd + self.calc_borrow_limit(&value, &params.collateralization_ratio);
            total_collateral_usd = total_collateral_usd + value;
        }

        for (asset, position) in self.borrow_positions(account).iter() {
            let amount = self.get_borrow_amount(&asset, &position.normalized_amount, cache);
            let feed = cache.get_cached_price(&asset);
            total_borrow_usd = total_borrow_usd + self.get_token_usd_value(&amount, &feed.price);
        }

        AccountHealth {
            total_collateral_usd,
            borrow_limit_usd,
            total_borrow_usd,
        }
    }

    /// Fails unless the account's debt fits within its borrow limit. Accounts without debt
    /// pass without touching the oracle.
    fn require_within_borrow_limit(&self, account: &ManagedAddress, cache: &mut Cache<Self>) {
        if self.borrow_positions(account).is_empty() {
            return;
        }

        let health = self.calculate_account_health(account, cache);
        require!(
            health.total_borrow_usd <= health.borrow_limit_usd,
            ERROR_INSUFFICIENT_COLLATERAL
        );
    }
}
