#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// Risk and rate configuration of a single market, owned by the contract owner.
///
/// Every ratio is RAY-scaled (1e27 = 100%). `first_slope` is the annual borrow rate reached
/// at `utilization_breaking_point`, `second_slope` the annual rate at 100% utilization.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct MarketParams<M: ManagedTypeApi> {
    pub asset_id: EgldOrEsdtTokenIdentifier<M>,
    pub asset_decimals: usize,
    pub base_borrow_rate: ManagedDecimal<M, NumDecimals>,
    pub first_slope: ManagedDecimal<M, NumDecimals>,
    pub second_slope: ManagedDecimal<M, NumDecimals>,
    pub utilization_breaking_point: ManagedDecimal<M, NumDecimals>,
    pub max_utilization_ratio: ManagedDecimal<M, NumDecimals>,
    pub reserve_factor: ManagedDecimal<M, NumDecimals>,
    pub liquidation_discount: ManagedDecimal<M, NumDecimals>,
    pub collateralization_ratio: ManagedDecimal<M, NumDecimals>,
    pub min_supply_distribution_part: ManagedDecimal<M, NumDecimals>,
    pub min_borrow_distribution_part: ManagedDecimal<M, NumDecimals>,
    pub can_be_collateral: bool,
}

/// Global risk settings.
///
/// `liquidation_boundary` is the borrow limit usage (RAY) a liquidation restores the account
/// to. `min_currency_amount` is the dust threshold in whole token units (WAD).
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct SystemParams<M: ManagedTypeApi> {
    pub liquidation_boundary: ManagedDecimal<M, NumDecimals>,
    pub min_currency_amount: ManagedDecimal<M, NumDecimals>,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct MarketIndex<M: ManagedTypeApi> {
    pub borrow_index: ManagedDecimal<M, NumDecimals>,
    pub supply_index: ManagedDecimal<M, NumDecimals>,
}

/// Result of bringing a market's indexes forward in time.
pub struct MarketAccrual<M: ManagedTypeApi> {
    pub borrow_index: ManagedDecimal<M, NumDecimals>,
    pub supply_index: ManagedDecimal<M, NumDecimals>,
    /// Interest routed to reserves over the interval (RAY, token units)
    pub protocol_fee: ManagedDecimal<M, NumDecimals>,
}

/// Supply shares of an account in one market. Credit is `scaled_amount * supply_index`.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct SupplyPosition<M: ManagedTypeApi> {
    pub scaled_amount: ManagedDecimal<M, NumDecimals>,
    pub is_collateral: bool,
}

impl<M: ManagedTypeApi> SupplyPosition<M> {
    pub fn new(scaled_amount: ManagedDecimal<M, NumDecimals>, is_collateral: bool) -> Self {
        SupplyPosition {
            scaled_amount,
            is_collateral,
        }
    }
}

/// Debt of an account in one market, stored normalized by the borrow index.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct BorrowPosition<M: ManagedTypeApi> {
    pub normalized_amount: ManagedDecimal<M, NumDecimals>,
    /// Borrow index at the last change of this position
    pub last_seen_index: ManagedDecimal<M, NumDecimals>,
}

impl<M: ManagedTypeApi> BorrowPosition<M> {
    pub fn new(
        normalized_amount: ManagedDecimal<M, NumDecimals>,
        last_seen_index: ManagedDecimal<M, NumDecimals>,
    ) -> Self {
        BorrowPosition {
            normalized_amount,
            last_seen_index,
        }
    }
}

/// Price of an asset in USD (WAD) together with the asset's token decimals.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct PriceFeed<M: ManagedTypeApi> {
    pub price: ManagedDecimal<M, NumDecimals>,
    pub asset_decimals: usize,
}

/// Reward distribution state of one market.
///
/// The cumulative sums are the reward earned by one share (supply side) or one normalized
/// borrow unit (borrow side) since the market was created, RAY-scaled. They only grow.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct RewardPoolInfo<M: ManagedTypeApi> {
    pub supply_cumulative_sum: ManagedDecimal<M, NumDecimals>,
    pub borrow_cumulative_sum: ManagedDecimal<M, NumDecimals>,
    pub last_update_block: u64,
    pub reward_per_block: ManagedDecimal<M, NumDecimals>,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct UserRewardInfo<M: ManagedTypeApi> {
    pub last_supply_cumulative_sum: ManagedDecimal<M, NumDecimals>,
    pub last_borrow_cumulative_sum: ManagedDecimal<M, NumDecimals>,
    pub aggregated_reward: ManagedDecimal<M, NumDecimals>,
}

/// USD totals of an account, all WAD-scaled.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct AccountHealth<M: ManagedTypeApi> {
    pub total_collateral_usd: ManagedDecimal<M, NumDecimals>,
    pub borrow_limit_usd: ManagedDecimal<M, NumDecimals>,
    pub total_borrow_usd: ManagedDecimal<M, NumDecimals>,
}

impl<M: ManagedTypeApi> AccountHealth<M> {
    /// An account is liquidatable once its debt is worth more than its borrow limit.
    pub fn is_liquidatable(&self) -> bool {
        self.total_borrow_usd > self.borrow_limit_usd
    }
}
