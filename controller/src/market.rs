multiversx_sc::imports!();

use common_structs::MarketIndex;

use crate::{cache::MarketCache, storage};

#[multiversx_sc::module]
pub trait MarketModule:
    storage::Storage
    + common_rates::InterestRates
    + common_math::SharedMathModule
    + common_events::EventsModule
{
    /// Brings the cached market up to the current block timestamp and emits the new state.
    ///
    /// Every operation that reads or changes balances of a market calls this first, so
    /// interest for the elapsed interval is always computed on the state that held during it.
    fn global_sync(&self, cache: &mut MarketCache<Self>) {
        if !self.apply_accrual(cache) {
            return;
        }

        self.update_market_state_event(
            cache.asset(),
            cache.timestamp,
            &cache.supply_index,
            &cache.borrow_index,
            &cache.reserves,
            &cache.supplied,
            &cache.borrowed,
        );
    }

    /// Accrues interest in memory. Returns `false` when no time has passed.
    fn apply_accrual(&self, cache: &mut MarketCache<Self>) -> bool {
        if cache.timestamp <= cache.last_timestamp {
            return false;
        }

        let elapsed = cache.timestamp - cache.last_timestamp;
        let accrual = self.accrue_market(
            &cache.params,
            &cache.borrowed,
            &cache.borrow_index,
            &cache.supplied,
            &cache.supply_index,
            &cache.get_available_liquidity(),
            elapsed,
        );

        cache.borrow_index = accrual.borrow_index;
        cache.supply_index = accrual.supply_index;
        cache.reserves = cache.reserves.clone() + accrual.protocol_fee;
        cache.last_timestamp = cache.timestamp;

        true
    }

    /// Indexes of a market as they would be after a sync at the current timestamp.
    fn get_market_index(&self, asset: &EgldOrEsdtTokenIdentifier) -> MarketIndex<Self::Api> {
        let mut cache = MarketCache::read_only(self, asset);
        self.apply_accrual(&mut cache);

        MarketIndex {
            borrow_index: cache.borrow_index.clone(),
            supply_index: cache.supply_index.clone(),
        }
    }
}
