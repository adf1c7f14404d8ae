use common_constants::RAY_PRECISION;
use common_structs::{MarketIndex, MarketParams, PriceFeed};

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// A snapshot of one market's pool state, loaded from storage and written back on drop.
///
/// **Fields**:
/// - `supplied` (supply shares) and `borrowed` (normalized debt) are RAY-based.
/// - `reserves` is RAY-based token units, `cash` uses the asset decimals.
/// - Indexes use RAY precision, timestamps are seconds since the Unix epoch.
///
/// A cache built with `read_only` never persists; views use it to simulate accrual.
pub struct MarketCache<'a, C>
where
    C: crate::storage::Storage + common_rates::InterestRates,
{
    sc_ref: &'a C,
    persist: bool,
    pub params: MarketParams<C::Api>,
    pub supplied: ManagedDecimal<C::Api, NumDecimals>,
    pub borrowed: ManagedDecimal<C::Api, NumDecimals>,
    pub borrow_index: ManagedDecimal<C::Api, NumDecimals>,
    pub supply_index: ManagedDecimal<C::Api, NumDecimals>,
    pub reserves: ManagedDecimal<C::Api, NumDecimals>,
    pub cash: ManagedDecimal<C::Api, NumDecimals>,
    /// Zero at the asset decimals.
    pub zero: ManagedDecimal<C::Api, NumDecimals>,
    pub timestamp: u64,
    pub last_timestamp: u64,
}

impl<'a, C> MarketCache<'a, C>
where
    C: crate::storage::Storage + common_rates::InterestRates,
{
    pub fn new(sc_ref: &'a C, asset: &EgldOrEsdtTokenIdentifier<C::Api>) -> Self {
        Self::load(sc_ref, asset, true)
    }

    pub fn read_only(sc_ref: &'a C, asset: &EgldOrEsdtTokenIdentifier<C::Api>) -> Self {
        Self::load(sc_ref, asset, false)
    }

    fn load(sc_ref: &'a C, asset: &EgldOrEsdtTokenIdentifier<C::Api>, persist: bool) -> Self {
        let params = sc_ref.market_params(asset).get();
        MarketCache {
            zero: sc_ref.to_decimal(BigUint::zero(), params.asset_decimals),
            supplied: sc_ref.supplied(asset).get(),
            borrowed: sc_ref.borrowed(asset).get(),
            borrow_index: sc_ref.borrow_index(asset).get(),
            supply_index: sc_ref.supply_index(asset).get(),
            reserves: sc_ref.reserves(asset).get(),
            cash: sc_ref.cash(asset).get(),
            timestamp: sc_ref.blockchain().get_block_timestamp(),
            last_timestamp: sc_ref.last_timestamp(asset).get(),
            params,
            persist,
            sc_ref,
        }
    }
}

impl<C> Drop for MarketCache<'_, C>
where
    C: crate::storage::Storage + common_rates::InterestRates,
{
    fn drop(&mut self) {
        if !self.persist {
            return;
        }

        // commit changes to storage for the mutable fields
        let asset = &self.params.asset_id;
        self.sc_ref.supplied(asset).set(&self.supplied);
        self.sc_ref.borrowed(asset).set(&self.borrowed);
        self.sc_ref.borrow_index(asset).set(&self.borrow_index);
        self.sc_ref.supply_index(asset).set(&self.supply_index);
        self.sc_ref.reserves(asset).set(&self.reserves);
        self.sc_ref.cash(asset).set(&self.cash);
        self.sc_ref.last_timestamp(asset).set(self.last_timestamp);
        self.sc_ref
            .aggregated_borrowed(asset)
            .set(self.get_total_borrowed_amount());
    }
}

impl<C> MarketCache<'_, C>
where
    C: crate::storage::Storage + common_rates::InterestRates,
{
    pub fn asset(&self) -> &EgldOrEsdtTokenIdentifier<C::Api> {
        &self.params.asset_id
    }

    /// Wraps a raw token amount into the market's asset decimals.
    pub fn get_decimal_value(&self, value: &BigUint<C::Api>) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref.to_decimal(value.clone(), self.params.asset_decimals)
    }

    /// Reserves in asset decimals, rounded half-up.
    pub fn get_reserves_amount(&self) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref
            .rescale_half_up(&self.reserves, self.params.asset_decimals)
    }

    /// Cash the market can still lend or pay out: `cash - reserves`, floored at zero.
    pub fn get_available_liquidity(&self) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref.sub_or_zero(&self.cash, &self.get_reserves_amount())
    }

    pub fn has_liquidity(&self, amount: &ManagedDecimal<C::Api, NumDecimals>) -> bool {
        self.get_available_liquidity() >= *amount
    }

    pub fn get_total_borrowed_amount(&self) -> ManagedDecimal<C::Api, NumDecimals> {
        self.get_original_borrow_amount(&self.borrowed)
    }

    pub fn get_total_supplied_amount(&self) -> ManagedDecimal<C::Api, NumDecimals> {
        self.get_original_supply_amount(&self.supplied)
    }

    /// `total_borrowed / (total_borrowed + available)`, RAY-based.
    pub fn get_utilization(&self) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref.get_utilization(
            &self.get_total_borrowed_amount(),
            &self.get_available_liquidity(),
        )
    }

    /// Utilization after `amount` more tokens are lent out of the available liquidity.
    pub fn get_utilization_after_borrow(
        &self,
        amount: &ManagedDecimal<C::Api, NumDecimals>,
    ) -> ManagedDecimal<C::Api, NumDecimals> {
        let borrowed = self.get_total_borrowed_amount() + amount.clone();
        let available = self
            .sc_ref
            .sub_or_zero(&self.get_available_liquidity(), amount);
        self.sc_ref.get_utilization(&borrowed, &available)
    }

    pub fn get_scaled_supply_amount(
        &self,
        amount: &ManagedDecimal<C::Api, NumDecimals>,
    ) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref.to_shares(amount, &self.supply_index)
    }

    pub fn get_scaled_borrow_amount(
        &self,
        amount: &ManagedDecimal<C::Api, NumDecimals>,
    ) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref.to_shares(amount, &self.borrow_index)
    }

    pub fn get_original_supply_amount(
        &self,
        scaled_amount: &ManagedDecimal<C::Api, NumDecimals>,
    ) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref
            .to_amount(scaled_amount, &self.supply_index, self.params.asset_decimals)
    }

    pub fn get_original_borrow_amount(
        &self,
        scaled_amount: &ManagedDecimal<C::Api, NumDecimals>,
    ) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref
            .to_amount(scaled_amount, &self.borrow_index, self.params.asset_decimals)
    }

    pub fn add_supplied(&mut self, shares: &ManagedDecimal<C::Api, NumDecimals>) {
        self.supplied = self.supplied.clone() + shares.rescale(RAY_PRECISION);
    }

    pub fn remove_supplied(&mut self, shares: &ManagedDecimal<C::Api, NumDecimals>) {
        self.supplied = self.sc_ref.sub_or_zero(&self.supplied, shares);
    }

    pub fn add_borrowed(&mut self, normalized: &ManagedDecimal<C::Api, NumDecimals>) {
        self.borrowed = self.borrowed.clone() + normalized.rescale(RAY_PRECISION);
    }

    pub fn remove_borrowed(&mut self, normalized: &ManagedDecimal<C::Api, NumDecimals>) {
        self.borrowed = self.sc_ref.sub_or_zero(&self.borrowed, normalized);
    }

    pub fn add_cash(&mut self, amount: &ManagedDecimal<C::Api, NumDecimals>) {
        self.cash = self.cash.clone() + amount.rescale(self.params.asset_decimals);
    }

    pub fn remove_cash(&mut self, amount: &ManagedDecimal<C::Api, NumDecimals>) {
        self.cash = self.sc_ref.sub_or_zero(&self.cash, amount);
    }
}

/// Per-transaction cache of prices and market indexes.
///
/// An account-wide computation touches every market of the account; each price is read from
/// the oracle once and each index simulated once per transaction.
pub struct Cache<'a, C>
where
    C: crate::oracle::OracleModule + crate::market::MarketModule,
{
    sc_ref: &'a C,
    pub prices_cache:
        ManagedMapEncoded<C::Api, EgldOrEsdtTokenIdentifier<C::Api>, PriceFeed<C::Api>>,
    pub market_indexes:
        ManagedMapEncoded<C::Api, EgldOrEsdtTokenIdentifier<C::Api>, MarketIndex<C::Api>>,
    pub market_params:
        ManagedMapEncoded<C::Api, EgldOrEsdtTokenIdentifier<C::Api>, MarketParams<C::Api>>,
}

impl<'a, C> Cache<'a, C>
where
    C: crate::oracle::OracleModule + crate::market::MarketModule,
{
    pub fn new(sc_ref: &'a C) -> Self {
        Cache {
            sc_ref,
            prices_cache: ManagedMapEncoded::new(),
            market_indexes: ManagedMapEncoded::new(),
            market_params: ManagedMapEncoded::new(),
        }
    }

    pub fn get_cached_price(
        &mut self,
        asset: &EgldOrEsdtTokenIdentifier<C::Api>,
    ) -> PriceFeed<C::Api> {
        if self.prices_cache.contains(asset) {
            return self.prices_cache.get(asset);
        }

        let feed = self.sc_ref.fetch_price_feed(asset);
        self.prices_cache.put(asset, &feed);
        feed
    }

    /// Indexes of a market as of the current block, without persisting the accrual.
    pub fn get_cached_market_index(
        &mut self,
        asset: &EgldOrEsdtTokenIdentifier<C::Api>,
    ) -> MarketIndex<C::Api> {
        if self.market_indexes.contains(asset) {
            return self.market_indexes.get(asset);
        }

        let index = self.sc_ref.get_market_index(asset);
        self.market_indexes.put(asset, &index);
        index
    }

    pub fn get_cached_market_params(
        &mut self,
        asset: &EgldOrEsdtTokenIdentifier<C::Api>,
    ) -> MarketParams<C::Api> {
        if self.market_params.contains(asset) {
            return self.market_params.get(asset);
        }

        let params = self.sc_ref.market_params(asset).get();
        self.market_params.put(asset, &params);
        params
    }
}
