#![no_std]

use common_constants::RAY_PRECISION;
use common_structs::{MarketParams, RewardPoolInfo, UserRewardInfo};

multiversx_sc::imports!();

/// Cumulative-sum reward distribution.
///
/// Each market streams `reward_per_block` reward tokens, split between suppliers and
/// borrowers. Per side the market keeps the reward earned by one unit of balance since
/// inception; an account's reward is its balance times the growth of that sum since its last
/// checkpoint. Checkpoints run before every balance change, so a user's claimable reward is
/// exactly the sum of the increments earned at each balance.
///
/// Supply balances are supply shares, borrow balances are normalized borrow amounts, so the
/// totals used as denominators are the same quantities the positions hold.
#[multiversx_sc::module]
pub trait RewardsMath: common_math::SharedMathModule {
    /// Share of the block reward paid to suppliers.
    ///
    /// **Formula**:
    /// - `supply_part = min_supply + (1 - min_supply - min_borrow) * (1 - utilization)`
    ///
    /// An idle market pays suppliers everything but the borrowers' floor, a fully utilized
    /// one pays borrowers everything but the suppliers' floor.
    fn calc_supply_distribution_part(
        &self,
        utilization: &ManagedDecimal<Self::Api, NumDecimals>,
        min_supply_part: &ManagedDecimal<Self::Api, NumDecimals>,
        min_borrow_part: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let floors = min_supply_part.clone() + min_borrow_part.clone();
        let flexible_part = self.sub_or_zero(&self.ray(), &floors);
        let idle_ratio = self.sub_or_zero(&self.ray(), utilization);

        min_supply_part.clone() + self.mul_half_up(&flexible_part, &idle_ratio, RAY_PRECISION)
    }

    /// Splits a block reward into `(supply_side, borrow_side)`.
    ///
    /// The supply side is floored and the borrow side takes the rest, so both add up to the
    /// block reward exactly.
    fn split_reward_per_block(
        &self,
        reward_per_block: &ManagedDecimal<Self::Api, NumDecimals>,
        supply_part: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> (
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let supply_side = self.mul_down(reward_per_block, supply_part, reward_per_block.scale());
        let borrow_side = self.sub_or_zero(reward_per_block, &supply_side);

        (supply_side, borrow_side)
    }

    /// `sum + side_reward_per_block * blocks / total_balance`, floored.
    ///
    /// A side without participants keeps its sum; the reward streamed to it over the interval
    /// is not distributed.
    fn advance_cumulative_sum(
        &self,
        cumulative_sum: &ManagedDecimal<Self::Api, NumDecimals>,
        side_reward_per_block: &ManagedDecimal<Self::Api, NumDecimals>,
        blocks: u64,
        total_balance: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if blocks == 0 || total_balance.into_raw_units() == &BigUint::zero() {
            return cumulative_sum.clone();
        }

        let streamed = self.to_decimal(
            side_reward_per_block.into_raw_units() * &BigUint::from(blocks),
            side_reward_per_block.scale(),
        );
        let increment = self.div_down(&streamed, total_balance, RAY_PRECISION);

        cumulative_sum.rescale(RAY_PRECISION) + increment
    }

    /// Reward earned by `balance` while the cumulative sum moved from `last_sum` to
    /// `current_sum`, floored to the reward token decimals.
    fn calc_pending_reward(
        &self,
        balance: &ManagedDecimal<Self::Api, NumDecimals>,
        current_sum: &ManagedDecimal<Self::Api, NumDecimals>,
        last_sum: &ManagedDecimal<Self::Api, NumDecimals>,
        reward_decimals: usize,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let sum_delta = self.sub_or_zero(current_sum, last_sum);
        let pending = self.mul_down(balance, &sum_delta, RAY_PRECISION);

        pending.rescale(reward_decimals)
    }

    /// Advances both cumulative sums of a market up to `current_block`.
    ///
    /// `total_supplied` and `total_borrowed` must be the totals before the action that
    /// triggered the update is applied.
    fn accrue_reward_pool(
        &self,
        pool: &RewardPoolInfo<Self::Api>,
        params: &MarketParams<Self::Api>,
        utilization: &ManagedDecimal<Self::Api, NumDecimals>,
        total_supplied: &ManagedDecimal<Self::Api, NumDecimals>,
        total_borrowed: &ManagedDecimal<Self::Api, NumDecimals>,
        current_block: u64,
    ) -> RewardPoolInfo<Self::Api> {
        if current_block <= pool.last_update_block {
            return pool.clone();
        }

        let blocks = current_block - pool.last_update_block;
        let supply_part = self.calc_supply_distribution_part(
            utilization,
            &params.min_supply_distribution_part,
            &params.min_borrow_distribution_part,
        );
        let (supply_reward, borrow_reward) =
            self.split_reward_per_block(&pool.reward_per_block, &supply_part);

        RewardPoolInfo {
            supply_cumulative_sum: self.advance_cumulative_sum(
                &pool.supply_cumulative_sum,
                &supply_reward,
                blocks,
                total_supplied,
            ),
            borrow_cumulative_sum: self.advance_cumulative_sum(
                &pool.borrow_cumulative_sum,
                &borrow_reward,
                blocks,
                total_borrowed,
            ),
            last_update_block: current_block,
            reward_per_block: pool.reward_per_block.clone(),
        }
    }

    /// Moves an account's pending reward on both sides into `aggregated_reward` and
    /// checkpoints it at the market's current sums.
    fn accrue_user_reward(
        &self,
        pool: &RewardPoolInfo<Self::Api>,
        user: &UserRewardInfo<Self::Api>,
        supply_balance: &ManagedDecimal<Self::Api, NumDecimals>,
        borrow_balance: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> UserRewardInfo<Self::Api> {
        let reward_decimals = user.aggregated_reward.scale();
        let supply_reward = self.calc_pending_reward(
            supply_balance,
            &pool.supply_cumulative_sum,
            &user.last_supply_cumulative_sum,
            reward_decimals,
        );
        let borrow_reward = self.calc_pending_reward(
            borrow_balance,
            &pool.borrow_cumulative_sum,
            &user.last_borrow_cumulative_sum,
            reward_decimals,
        );

        UserRewardInfo {
            last_supply_cumulative_sum: pool.supply_cumulative_sum.clone(),
            last_borrow_cumulative_sum: pool.borrow_cumulative_sum.clone(),
            aggregated_reward: user.aggregated_reward.clone() + supply_reward + borrow_reward,
        }
    }
}
