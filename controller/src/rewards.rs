multiversx_sc::imports!();

use common_errors::{
    ERROR_INSUFFICIENT_REWARD_RESERVE, ERROR_INVALID_REWARD_TOKEN, ERROR_NOTHING_TO_CLAIM,
};
use common_structs::{RewardPoolInfo, UserRewardInfo};

use crate::{cache::MarketCache, market, storage, validation};

/// Incentive streams of the markets, paid in a single reward token.
///
/// Every balance change runs `checkpoint_account_rewards` on the touched market first, with
/// the market totals still at their pre-change values.
#[multiversx_sc::module]
pub trait RewardsModule:
    storage::Storage
    + market::MarketModule
    + validation::ValidationModule
    + common_rewards::RewardsMath
    + common_rates::InterestRates
    + common_math::SharedMathModule
    + common_events::EventsModule
    + multiversx_sc_modules::pause::PauseModule
{
    /// Adds reward tokens to the reserve rewards are paid from. Open to anyone.
    #[payable]
    #[endpoint(fundRewards)]
    fn fund_rewards(&self) {
        let payment = self.call_value().egld_or_single_esdt();
        require!(
            payment.token_identifier == self.reward_token().get(),
            ERROR_INVALID_REWARD_TOKEN
        );
        self.require_amount_greater_than_zero(&payment.amount);

        let amount = self.to_decimal(payment.amount, self.reward_decimals().get());
        self.reward_reserve()
            .update(|reserve| *reserve = reserve.clone() + amount.clone());

        self.fund_rewards_event(&self.blockchain().get_caller(), &amount);
    }

    /// Changes the reward stream of a market. Rewards up to the current block are settled at
    /// the old rate first.
    #[only_owner]
    #[endpoint(setRewardPerBlock)]
    fn set_reward_per_block(&self, asset: EgldOrEsdtTokenIdentifier, reward_per_block: BigUint) {
        self.require_asset_supported(&asset);

        let mut market = MarketCache::new(self, &asset);
        self.global_sync(&mut market);
        let mut pool = self.sync_reward_pool(&market);

        pool.reward_per_block = self.to_decimal(reward_per_block, self.reward_decimals().get());
        self.reward_pool(&asset).set(&pool);
        self.update_reward_pool_event(&asset, &pool);
    }

    #[endpoint(claimReward)]
    fn claim_reward(&self, asset: EgldOrEsdtTokenIdentifier) {
        self.require_not_paused();
        self.require_asset_supported(&asset);
        let caller = self.blockchain().get_caller();

        let amount = self.settle_claim(&asset, &caller);
        require!(amount > self.reward_zero(), ERROR_NOTHING_TO_CLAIM);

        self.send_reward(&caller, &amount);
    }

    /// Claims the reward of every market the caller ever took part in.
    #[endpoint(claimAllRewards)]
    fn claim_all_rewards(&self) {
        self.require_not_paused();
        let caller = self.blockchain().get_caller();

        let mut total = self.reward_zero();
        for asset in self.reward_markets(&caller).iter() {
            let amount = self.settle_claim(&asset, &caller);
            total = total + amount;
        }
        require!(total > self.reward_zero(), ERROR_NOTHING_TO_CLAIM);

        self.send_reward(&caller, &total);
    }

    /// Reward claimable by `account` in one market as of the current block.
    #[view(getUserReward)]
    fn get_user_reward(
        &self,
        asset: EgldOrEsdtTokenIdentifier,
        account: ManagedAddress,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_asset_supported(&asset);

        let mut market = MarketCache::read_only(self, &asset);
        self.apply_accrual(&mut market);
        let pool = self.accrue_pool(&market);

        self.accrue_account(&pool, &asset, &account).aggregated_reward
    }

    /// Reward pool of a market as of the current block.
    #[view(getRewardPoolInfo)]
    fn get_reward_pool_info(&self, asset: EgldOrEsdtTokenIdentifier) -> RewardPoolInfo<Self::Api> {
        self.require_asset_supported(&asset);

        let mut market = MarketCache::read_only(self, &asset);
        self.apply_accrual(&mut market);
        self.accrue_pool(&market)
    }

    /// Settles the reward of `account` in the cached market. Must run after `global_sync` and
    /// before the market totals or the account's balances change.
    fn checkpoint_account_rewards(&self, market: &MarketCache<Self>, account: &ManagedAddress) {
        let pool = self.sync_reward_pool(market);
        let asset = market.asset();

        let info = self.accrue_account(&pool, asset, account);
        self.user_rewards(asset, account).set(&info);
        self.reward_markets(account).insert(asset.clone());
    }

    /// Advances the stored reward pool of the cached market to the current block.
    fn sync_reward_pool(&self, market: &MarketCache<Self>) -> RewardPoolInfo<Self::Api> {
        let pool = self.accrue_pool(market);
        let mapper = self.reward_pool(market.asset());
        if mapper.get().last_update_block != pool.last_update_block {
            mapper.set(&pool);
            self.update_reward_pool_event(market.asset(), &pool);
        }

        pool
    }

    fn accrue_pool(&self, market: &MarketCache<Self>) -> RewardPoolInfo<Self::Api> {
        self.accrue_reward_pool(
            &self.reward_pool(market.asset()).get(),
            &market.params,
            &market.get_utilization(),
            &market.supplied,
            &market.borrowed,
            self.blockchain().get_block_nonce(),
        )
    }

    fn accrue_account(
        &self,
        pool: &RewardPoolInfo<Self::Api>,
        asset: &EgldOrEsdtTokenIdentifier,
        account: &ManagedAddress,
    ) -> UserRewardInfo<Self::Api> {
        let supply_balance = match self.supply_positions(account).get(asset) {
            Some(position) => position.scaled_amount,
            None => self.ray_zero(),
        };
        let borrow_balance = match self.borrow_positions(account).get(asset) {
            Some(position) => position.normalized_amount,
            None => self.ray_zero(),
        };

        let mapper = self.user_rewards(asset, account);
        let info = if mapper.is_empty() {
            UserRewardInfo {
                last_supply_cumulative_sum: self.ray_zero(),
                last_borrow_cumulative_sum: self.ray_zero(),
                aggregated_reward: self.reward_zero(),
            }
        } else {
            mapper.get()
        };

        self.accrue_user_reward(pool, &info, &supply_balance, &borrow_balance)
    }

    /// Checkpoints the account, zeroes its aggregated reward and returns it.
    fn settle_claim(
        &self,
        asset: &EgldOrEsdtTokenIdentifier,
        account: &ManagedAddress,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mut market = MarketCache::new(self, asset);
        self.global_sync(&mut market);
        self.checkpoint_account_rewards(&market, account);

        let mapper = self.user_rewards(asset, account);
        let mut info = mapper.get();
        let amount = info.aggregated_reward.clone();
        if amount == self.reward_zero() {
            return amount;
        }

        info.aggregated_reward = self.reward_zero();
        mapper.set(&info);
        self.claim_reward_event(asset, account, &amount);

        amount
    }

    fn send_reward(&self, to: &ManagedAddress, amount: &ManagedDecimal<Self::Api, NumDecimals>) {
        let reserve = self.reward_reserve().get();
        require!(reserve >= *amount, ERROR_INSUFFICIENT_REWARD_RESERVE);
        self.reward_reserve().set(reserve - amount.clone());

        self.tx()
            .to(to)
            .payment(EgldOrEsdtTokenPayment::new(
                self.reward_token().get(),
                0,
                amount.into_raw_units().clone(),
            ))
            .transfer_if_not_empty();
    }

    fn reward_zero(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(BigUint::zero(), self.reward_decimals().get())
    }
}
