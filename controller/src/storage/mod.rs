multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use common_structs::{
    BorrowPosition, MarketParams, RewardPoolInfo, SupplyPosition, SystemParams, UserRewardInfo,
};

/// On-chain state of the controller: market configuration, per-market pool state, account
/// positions and reward bookkeeping. Pool state is keyed by asset and is only mutated through
/// `cache::MarketCache`.
#[multiversx_sc::module]
pub trait Storage {
    /// Every asset with a market.
    #[view(getMarkets)]
    #[storage_mapper("markets")]
    fn markets(&self) -> UnorderedSetMapper<EgldOrEsdtTokenIdentifier>;

    #[view(getMarketParams)]
    #[storage_mapper("market_params")]
    fn market_params(
        &self,
        asset: &EgldOrEsdtTokenIdentifier,
    ) -> SingleValueMapper<MarketParams<Self::Api>>;

    #[view(getSystemParams)]
    #[storage_mapper("system_params")]
    fn system_params(&self) -> SingleValueMapper<SystemParams<Self::Api>>;

    /// Contract answering `getPrice(asset) -> (price, decimals)`.
    #[view(getPriceOracleAddress)]
    #[storage_mapper("price_oracle_address")]
    fn price_oracle_address(&self) -> SingleValueMapper<ManagedAddress>;

    /// Total supply shares of a market (RAY).
    #[view(getTotalSupplyShares)]
    #[storage_mapper("supplied")]
    fn supplied(
        &self,
        asset: &EgldOrEsdtTokenIdentifier,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Aggregated normalized borrow of a market (RAY).
    #[view(getTotalNormalizedBorrow)]
    #[storage_mapper("borrowed")]
    fn borrowed(
        &self,
        asset: &EgldOrEsdtTokenIdentifier,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Absolute debt of a market at its last update, in asset decimals.
    #[view(getAggregatedBorrowed)]
    #[storage_mapper("aggregated_borrowed")]
    fn aggregated_borrowed(
        &self,
        asset: &EgldOrEsdtTokenIdentifier,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[storage_mapper("borrow_index")]
    fn borrow_index(
        &self,
        asset: &EgldOrEsdtTokenIdentifier,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[storage_mapper("supply_index")]
    fn supply_index(
        &self,
        asset: &EgldOrEsdtTokenIdentifier,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[view(getLastTimestamp)]
    #[storage_mapper("last_timestamp")]
    fn last_timestamp(&self, asset: &EgldOrEsdtTokenIdentifier) -> SingleValueMapper<u64>;

    /// Protocol share of the accrued interest (RAY, token units).
    #[view(getReserves)]
    #[storage_mapper("reserves")]
    fn reserves(
        &self,
        asset: &EgldOrEsdtTokenIdentifier,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Tokens of the market held by the contract, in asset decimals.
    #[view(getCash)]
    #[storage_mapper("cash")]
    fn cash(
        &self,
        asset: &EgldOrEsdtTokenIdentifier,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[storage_mapper("supply_positions")]
    fn supply_positions(
        &self,
        account: &ManagedAddress,
    ) -> MapMapper<EgldOrEsdtTokenIdentifier, SupplyPosition<Self::Api>>;

    #[storage_mapper("borrow_positions")]
    fn borrow_positions(
        &self,
        account: &ManagedAddress,
    ) -> MapMapper<EgldOrEsdtTokenIdentifier, BorrowPosition<Self::Api>>;

    #[view(getRewardToken)]
    #[storage_mapper("reward_token")]
    fn reward_token(&self) -> SingleValueMapper<EgldOrEsdtTokenIdentifier>;

    #[view(getRewardDecimals)]
    #[storage_mapper("reward_decimals")]
    fn reward_decimals(&self) -> SingleValueMapper<usize>;

    /// Funded reward tokens not yet claimed.
    #[view(getRewardReserve)]
    #[storage_mapper("reward_reserve")]
    fn reward_reserve(&self) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[storage_mapper("reward_pool")]
    fn reward_pool(
        &self,
        asset: &EgldOrEsdtTokenIdentifier,
    ) -> SingleValueMapper<RewardPoolInfo<Self::Api>>;

    #[storage_mapper("user_rewards")]
    fn user_rewards(
        &self,
        asset: &EgldOrEsdtTokenIdentifier,
        account: &ManagedAddress,
    ) -> SingleValueMapper<UserRewardInfo<Self::Api>>;

    /// Markets where an account has ever been checkpointed for rewards.
    #[view(getRewardMarkets)]
    #[storage_mapper("reward_markets")]
    fn reward_markets(
        &self,
        account: &ManagedAddress,
    ) -> UnorderedSetMapper<EgldOrEsdtTokenIdentifier>;
}
