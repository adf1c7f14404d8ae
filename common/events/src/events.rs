#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();
pub use common_structs::*;

#[multiversx_sc::module]
pub trait EventsModule {
    #[event("create_market")]
    fn create_market_event(
        &self,
        #[indexed] asset: &EgldOrEsdtTokenIdentifier,
        #[indexed] params: &MarketParams<Self::Api>,
    );

    #[event("update_market_params")]
    fn update_market_params_event(
        &self,
        #[indexed] asset: &EgldOrEsdtTokenIdentifier,
        #[indexed] params: &MarketParams<Self::Api>,
    );

    #[event("update_system_params")]
    fn update_system_params_event(&self, #[indexed] params: &SystemParams<Self::Api>);

    /// Emitted after every interest accrual of a market.
    #[event("update_market_state")]
    fn update_market_state_event(
        &self,
        #[indexed] asset: &EgldOrEsdtTokenIdentifier,
        #[indexed] timestamp: u64,
        #[indexed] supply_index: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] borrow_index: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] reserves: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] supplied: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] borrowed: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    // Emitted for every supply position change:
    // 1. Supply / withdraw -> amount is the tokens moved by the caller
    // 2. Transfer -> emitted once for each side
    // 3. Liquidation -> the seized collateral on the borrower and on the liquidator
    #[event("update_supply_position")]
    fn update_supply_position_event(
        &self,
        #[indexed] asset: &EgldOrEsdtTokenIdentifier,
        #[indexed] account: &ManagedAddress,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] position: &SupplyPosition<Self::Api>,
    );

    #[event("update_borrow_position")]
    fn update_borrow_position_event(
        &self,
        #[indexed] asset: &EgldOrEsdtTokenIdentifier,
        #[indexed] account: &ManagedAddress,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] position: &BorrowPosition<Self::Api>,
    );

    /// Debt below the dust threshold closed without payment.
    #[event("write_off_dust_debt")]
    fn write_off_dust_debt_event(
        &self,
        #[indexed] asset: &EgldOrEsdtTokenIdentifier,
        #[indexed] account: &ManagedAddress,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("liquidation")]
    fn liquidation_event(
        &self,
        #[indexed] liquidator: &ManagedAddress,
        #[indexed] borrower: &ManagedAddress,
        #[indexed] debt_asset: &EgldOrEsdtTokenIdentifier,
        #[indexed] repaid_amount: &ManagedDecimal<Self::Api, NumDecimals>,
        #[indexed] collateral_asset: &EgldOrEsdtTokenIdentifier,
        #[indexed] seized_amount: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("update_reward_pool")]
    fn update_reward_pool_event(
        &self,
        #[indexed] asset: &EgldOrEsdtTokenIdentifier,
        #[indexed] pool: &RewardPoolInfo<Self::Api>,
    );

    #[event("claim_reward")]
    fn claim_reward_event(
        &self,
        #[indexed] asset: &EgldOrEsdtTokenIdentifier,
        #[indexed] account: &ManagedAddress,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("fund_rewards")]
    fn fund_rewards_event(
        &self,
        #[indexed] caller: &ManagedAddress,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
    );

    #[event("claim_reserves")]
    fn claim_reserves_event(
        &self,
        #[indexed] asset: &EgldOrEsdtTokenIdentifier,
        #[indexed] amount: &ManagedDecimal<Self::Api, NumDecimals>,
    );
}
