#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

pub mod cache;
pub mod config;
pub mod helpers;
pub mod market;
pub mod oracle;
pub mod positions;
pub mod rewards;
pub mod storage;
pub mod utils;
pub mod validation;
pub mod views;

use cache::Cache;
use common_constants::{RAY_PRECISION, WAD_PRECISION};
pub use common_errors::*;
pub use common_structs::*;

#[multiversx_sc::contract]
pub trait Controller:
    positions::account::PositionAccountModule
    + positions::supply::PositionDepositModule
    + positions::withdraw::PositionWithdrawModule
    + positions::borrow::PositionBorrowModule
    + positions::repay::PositionRepayModule
    + positions::transfer::PositionTransferModule
    + positions::collateral::PositionCollateralModule
    + positions::liquidation::PositionLiquidationModule
    + config::ConfigModule
    + rewards::RewardsModule
    + market::MarketModule
    + common_events::EventsModule
    + storage::Storage
    + oracle::OracleModule
    + validation::ValidationModule
    + utils::LendingUtilsModule
    + views::ViewsModule
    + helpers::math::MathsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + common_rewards::RewardsMath
    + multiversx_sc_modules::pause::PauseModule
{
    /// Initializes the controller.
    ///
    /// # Arguments
    /// - `price_oracle_address`: Contract answering `getPrice(asset) -> (price, decimals)`.
    /// - `reward_token`: Token paid out by the reward streams.
    /// - `reward_decimals`: Decimals of the reward token.
    /// - `liquidation_boundary`: Target borrow limit usage after a liquidation (RAY).
    /// - `min_currency_amount`: Dust threshold in whole token units (WAD).
    #[init]
    fn init(
        &self,
        price_oracle_address: ManagedAddress,
        reward_token: EgldOrEsdtTokenIdentifier,
        reward_decimals: usize,
        liquidation_boundary: BigUint,
        min_currency_amount: BigUint,
    ) {
        require!(reward_token.is_valid(), ERROR_INVALID_TICKER);

        self.price_oracle_address().set(price_oracle_address);
        self.reward_token().set(reward_token);
        self.reward_decimals().set(reward_decimals);
        self.reward_reserve()
            .set(self.to_decimal(BigUint::zero(), reward_decimals));

        let params = SystemParams {
            liquidation_boundary: self.to_decimal(liquidation_boundary, RAY_PRECISION),
            min_currency_amount: self.to_decimal(min_currency_amount, WAD_PRECISION),
        };
        self.validate_system_params(&params);
        self.system_params().set(&params);
    }

    #[upgrade]
    fn upgrade(&self) {}

    /// Supplies the paid tokens to their market. New positions count as collateral when the
    /// market allows it.
    #[payable]
    #[endpoint(supply)]
    fn supply(&self) {
        self.require_not_paused();
        let payment = self.call_value().egld_or_single_esdt();
        self.validate_payment(&payment);

        let caller = self.blockchain().get_caller();
        self.process_supply(&caller, &payment);
    }

    /// Withdraws up to `amount` of the caller's supply. The account must stay within its
    /// borrow limit.
    #[endpoint(withdraw)]
    fn withdraw(&self, asset: EgldOrEsdtTokenIdentifier, amount: BigUint) {
        self.require_not_paused();
        self.require_asset_supported(&asset);
        self.require_amount_greater_than_zero(&amount);

        let caller = self.blockchain().get_caller();
        let withdrawn = self.process_withdrawal(&caller, &asset, &amount);

        let mut cache = Cache::new(self);
        self.require_within_borrow_limit(&caller, &mut cache);

        self.send_tokens(&caller, &asset, &withdrawn);
    }

    #[endpoint(borrow)]
    fn borrow(&self, asset: EgldOrEsdtTokenIdentifier, amount: BigUint) {
        self.require_not_paused();
        self.require_asset_supported(&asset);
        self.require_amount_greater_than_zero(&amount);

        let caller = self.blockchain().get_caller();
        let borrowed = self.process_borrow(&caller, &asset, &amount);

        let mut cache = Cache::new(self);
        self.require_within_borrow_limit(&caller, &mut cache);

        self.send_tokens(&caller, &asset, &borrowed);
    }

    /// Repays the caller's debt in the paid asset. Any excess is sent back.
    #[payable]
    #[endpoint(repay)]
    fn repay(&self) {
        let caller = self.blockchain().get_caller();
        self.repay_debt_of(&caller);
    }

    /// Repays `borrower`'s debt in the paid asset. Any excess is sent back to the payer.
    #[payable]
    #[endpoint(repayFor)]
    fn repay_for(&self, borrower: ManagedAddress) {
        self.repay_debt_of(&borrower);
    }

    /// Moves supply worth up to `amount` to another account. The sender must stay within its
    /// borrow limit.
    #[endpoint(transferSupply)]
    fn transfer_supply(&self, asset: EgldOrEsdtTokenIdentifier, to: ManagedAddress, amount: BigUint) {
        self.require_not_paused();
        self.require_asset_supported(&asset);
        self.require_amount_greater_than_zero(&amount);

        let caller = self.blockchain().get_caller();
        self.process_supply_transfer(&caller, &to, &asset, &amount);

        let mut cache = Cache::new(self);
        self.require_within_borrow_limit(&caller, &mut cache);
    }

    #[endpoint(enableCollateral)]
    fn enable_collateral(&self, asset: EgldOrEsdtTokenIdentifier) {
        self.require_not_paused();
        self.require_asset_supported(&asset);

        let caller = self.blockchain().get_caller();
        self.process_collateral_toggle(&caller, &asset, true);
    }

    /// Stops a supply position from backing debt. The account must stay within its borrow
    /// limit without it.
    #[endpoint(disableCollateral)]
    fn disable_collateral(&self, asset: EgldOrEsdtTokenIdentifier) {
        self.require_not_paused();
        self.require_asset_supported(&asset);

        let caller = self.blockchain().get_caller();
        self.process_collateral_toggle(&caller, &asset, false);

        let mut cache = Cache::new(self);
        self.require_within_borrow_limit(&caller, &mut cache);
    }

    /// Liquidates an unhealthy account: the payment repays `borrower`'s debt in
    /// `debt_asset` and the caller receives `collateral_asset` supply at a discount.
    #[payable]
    #[endpoint(liquidate)]
    fn liquidate(
        &self,
        borrower: ManagedAddress,
        debt_asset: EgldOrEsdtTokenIdentifier,
        collateral_asset: EgldOrEsdtTokenIdentifier,
    ) {
        self.require_not_paused();
        let payment = self.call_value().egld_or_single_esdt();
        let caller = self.blockchain().get_caller();

        let refund = self.process_liquidation(
            &caller,
            &borrower,
            &debt_asset,
            &collateral_asset,
            &payment,
        );

        self.send_tokens(&caller, &debt_asset, &refund);
    }

    /// Accrues interest of a market up to the current block.
    #[endpoint(accrueInterest)]
    fn accrue_interest(&self, asset: EgldOrEsdtTokenIdentifier) {
        self.require_asset_supported(&asset);

        let mut market = cache::MarketCache::new(self, &asset);
        self.global_sync(&mut market);
    }

    fn repay_debt_of(&self, borrower: &ManagedAddress) {
        self.require_not_paused();
        let payment = self.call_value().egld_or_single_esdt();
        self.validate_payment(&payment);

        let refund = self.process_repayment(borrower, &payment);

        let caller = self.blockchain().get_caller();
        self.send_tokens(&caller, &payment.token_identifier, &refund);
    }

    fn send_tokens(
        &self,
        to: &ManagedAddress,
        asset: &EgldOrEsdtTokenIdentifier,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        self.tx()
            .to(to)
            .payment(EgldOrEsdtTokenPayment::new(
                asset.clone(),
                0,
                amount.into_raw_units().clone(),
            ))
            .transfer_if_not_empty();
    }
}
