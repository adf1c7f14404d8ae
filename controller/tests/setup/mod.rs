use crate::constants::*;

use lending_controller::storage::Storage;
use multiversx_sc::codec::TopDecode;
use multiversx_sc_scenario::imports::*;

pub fn world() -> ScenarioWorld {
    let mut blockchain = ScenarioWorld::new();

    blockchain.register_contract(CONTROLLER_PATH, lending_controller::ContractBuilder);
    blockchain.register_contract(PRICE_ORACLE_PATH, aggregator_mock::ContractBuilder);

    blockchain
}

pub fn token_id(token: TestTokenIdentifier) -> EgldOrEsdtTokenIdentifier<StaticApi> {
    EgldOrEsdtTokenIdentifier::esdt(token.to_token_identifier())
}

/// `amount` whole tokens expressed in the smallest unit.
pub fn units(amount: u64, decimals: usize) -> BigUint<StaticApi> {
    BigUint::from(amount) * BigUint::from(10u64).pow(decimals as u32)
}

pub fn raw(value: u128) -> BigUint<StaticApi> {
    BigUint::from(value)
}

pub fn to_u128(value: &ManagedDecimal<StaticApi, usize>) -> u128 {
    let bytes = value.into_raw_units().to_bytes_be();
    u128::try_from(num_bigint::BigUint::from_bytes_be(bytes.as_slice()))
        .expect("value does not fit u128")
}

fn decode_decimal(
    results: ManagedVec<StaticApi, ManagedBuffer<StaticApi>>,
) -> ManagedDecimal<StaticApi, usize> {
    let first = (*results.get(0)).clone();
    ManagedDecimal::<StaticApi, usize>::top_decode(first).expect("view did not return a decimal")
}

pub struct ControllerTestState {
    pub world: ScenarioWorld,
}

impl ControllerTestState {
    /// Deploys the price oracle and the controller, lists the WEGLD, XEGLD and USDC markets
    /// and prices them.
    pub fn new() -> Self {
        let mut world = world();
        world.current_block().block_timestamp(0).block_nonce(0);

        for address in [
            OWNER_ADDRESS,
            SUPPLIER_ADDRESS,
            BORROWER_ADDRESS,
            LIQUIDATOR_ADDRESS,
            RECEIVER_ADDRESS,
        ] {
            world
                .account(address)
                .nonce(1)
                .esdt_balance(EGLD_TOKEN, units(INITIAL_BALANCE, EGLD_DECIMALS))
                .esdt_balance(XEGLD_TOKEN, units(INITIAL_BALANCE, XEGLD_DECIMALS))
                .esdt_balance(USDC_TOKEN, units(INITIAL_BALANCE, USDC_DECIMALS))
                .esdt_balance(UNLISTED_TOKEN, units(INITIAL_BALANCE, 18))
                .esdt_balance(REWARD_TOKEN, units(INITIAL_BALANCE, REWARD_DECIMALS));
        }

        world
            .tx()
            .from(OWNER_ADDRESS)
            .raw_deploy()
            .code(PRICE_ORACLE_PATH)
            .new_address(PRICE_ORACLE_ADDRESS)
            .run();

        world
            .tx()
            .from(OWNER_ADDRESS)
            .raw_deploy()
            .code(CONTROLLER_PATH)
            .new_address(CONTROLLER_ADDRESS)
            .argument(&PRICE_ORACLE_ADDRESS.to_address())
            .argument(&token_id(REWARD_TOKEN))
            .argument(&REWARD_DECIMALS)
            .argument(&raw(LIQUIDATION_BOUNDARY))
            .argument(&raw(MIN_CURRENCY_AMOUNT))
            .run();

        let mut state = Self { world };
        state.create_market(EGLD_TOKEN, EGLD_DECIMALS, true);
        state.create_market(XEGLD_TOKEN, XEGLD_DECIMALS, true);
        state.create_market(USDC_TOKEN, USDC_DECIMALS, true);

        state.set_price(EGLD_TOKEN, EGLD_PRICE_IN_DOLLARS);
        state.set_price(XEGLD_TOKEN, XEGLD_PRICE_IN_DOLLARS);
        state.set_price(USDC_TOKEN, USDC_PRICE_IN_DOLLARS);

        state
    }

    pub fn change_timestamp(&mut self, timestamp: u64) {
        self.world.current_block().block_timestamp(timestamp);
    }

    pub fn change_block(&mut self, nonce: u64) {
        self.world.current_block().block_nonce(nonce);
    }

    // Owner configuration
    pub fn create_market(&mut self, token: TestTokenIdentifier, decimals: usize, can_be_collateral: bool) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(CONTROLLER_ADDRESS)
            .raw_call("createMarket")
            .argument(&token_id(token))
            .argument(&decimals)
            .argument(&raw(BASE_BORROW_RATE))
            .argument(&raw(FIRST_SLOPE))
            .argument(&raw(SECOND_SLOPE))
            .argument(&raw(UTILIZATION_BREAKING_POINT))
            .argument(&raw(MAX_UTILIZATION_RATIO))
            .argument(&raw(RESERVE_FACTOR))
            .argument(&raw(LIQUIDATION_DISCOUNT))
            .argument(&raw(COLLATERALIZATION_RATIO))
            .argument(&raw(MIN_SUPPLY_DISTRIBUTION_PART))
            .argument(&raw(MIN_BORROW_DISTRIBUTION_PART))
            .argument(&can_be_collateral)
            .run();
    }

    pub fn create_market_error(
        &mut self,
        token: TestTokenIdentifier,
        decimals: usize,
        breaking_point: u128,
        error_message: &[u8],
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(CONTROLLER_ADDRESS)
            .raw_call("createMarket")
            .argument(&token_id(token))
            .argument(&decimals)
            .argument(&raw(BASE_BORROW_RATE))
            .argument(&raw(FIRST_SLOPE))
            .argument(&raw(SECOND_SLOPE))
            .argument(&raw(breaking_point))
            .argument(&raw(MAX_UTILIZATION_RATIO))
            .argument(&raw(RESERVE_FACTOR))
            .argument(&raw(LIQUIDATION_DISCOUNT))
            .argument(&raw(COLLATERALIZATION_RATIO))
            .argument(&raw(MIN_SUPPLY_DISTRIBUTION_PART))
            .argument(&raw(MIN_BORROW_DISTRIBUTION_PART))
            .argument(&true)
            .returns(ExpectMessage(core::str::from_utf8(error_message).unwrap()))
            .run();
    }

    /// Prices `token` at `price` whole dollars.
    pub fn set_price(&mut self, token: TestTokenIdentifier, price: u64) {
        self.set_price_raw(token, units(price, 18), 18);
    }

    pub fn set_price_raw(&mut self, token: TestTokenIdentifier, price: BigUint<StaticApi>, decimals: u8) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(PRICE_ORACLE_ADDRESS)
            .raw_call("setPrice")
            .argument(&token_id(token))
            .argument(&price)
            .argument(&decimals)
            .run();
    }

    pub fn clear_price(&mut self, token: TestTokenIdentifier) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(PRICE_ORACLE_ADDRESS)
            .raw_call("clearPrice")
            .argument(&token_id(token))
            .run();
    }

    pub fn pause(&mut self) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(CONTROLLER_ADDRESS)
            .raw_call("pause")
            .run();
    }

    pub fn claim_reserves(&mut self, token: TestTokenIdentifier) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(CONTROLLER_ADDRESS)
            .raw_call("claimReserves")
            .argument(&token_id(token))
            .run();
    }

    pub fn accrue_interest(&mut self, token: TestTokenIdentifier) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(CONTROLLER_ADDRESS)
            .raw_call("accrueInterest")
            .argument(&token_id(token))
            .run();
    }

    // Core lending operations
    pub fn supply(&mut self, from: &TestAddress, token: TestTokenIdentifier, amount: BigUint<StaticApi>) {
        self.world
            .tx()
            .from(*from)
            .to(CONTROLLER_ADDRESS)
            .raw_call("supply")
            .single_esdt(&token.to_token_identifier(), 0, &amount)
            .run();
    }

    pub fn supply_error(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        amount: BigUint<StaticApi>,
        error_message: &[u8],
    ) {
        self.world
            .tx()
            .from(*from)
            .to(CONTROLLER_ADDRESS)
            .raw_call("supply")
            .single_esdt(&token.to_token_identifier(), 0, &amount)
            .returns(ExpectMessage(core::str::from_utf8(error_message).unwrap()))
            .run();
    }

    pub fn withdraw(&mut self, from: &TestAddress, token: TestTokenIdentifier, amount: BigUint<StaticApi>) {
        self.world
            .tx()
            .from(*from)
            .to(CONTROLLER_ADDRESS)
            .raw_call("withdraw")
            .argument(&token_id(token))
            .argument(&amount)
            .run();
    }

    pub fn withdraw_error(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        amount: BigUint<StaticApi>,
        error_message: &[u8],
    ) {
        self.world
            .tx()
            .from(*from)
            .to(CONTROLLER_ADDRESS)
            .raw_call("withdraw")
            .argument(&token_id(token))
            .argument(&amount)
            .returns(ExpectMessage(core::str::from_utf8(error_message).unwrap()))
            .run();
    }

    pub fn borrow(&mut self, from: &TestAddress, token: TestTokenIdentifier, amount: BigUint<StaticApi>) {
        self.world
            .tx()
            .from(*from)
            .to(CONTROLLER_ADDRESS)
            .raw_call("borrow")
            .argument(&token_id(token))
            .argument(&amount)
            .run();
    }

    pub fn borrow_error(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        amount: BigUint<StaticApi>,
        error_message: &[u8],
    ) {
        self.world
            .tx()
            .from(*from)
            .to(CONTROLLER_ADDRESS)
            .raw_call("borrow")
            .argument(&token_id(token))
            .argument(&amount)
            .returns(ExpectMessage(core::str::from_utf8(error_message).unwrap()))
            .run();
    }

    pub fn repay(&mut self, from: &TestAddress, token: TestTokenIdentifier, amount: BigUint<StaticApi>) {
        self.world
            .tx()
            .from(*from)
            .to(CONTROLLER_ADDRESS)
            .raw_call("repay")
            .single_esdt(&token.to_token_identifier(), 0, &amount)
            .run();
    }

    pub fn repay_error(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        amount: BigUint<StaticApi>,
        error_message: &[u8],
    ) {
        self.world
            .tx()
            .from(*from)
            .to(CONTROLLER_ADDRESS)
            .raw_call("repay")
            .single_esdt(&token.to_token_identifier(), 0, &amount)
            .returns(ExpectMessage(core::str::from_utf8(error_message).unwrap()))
            .run();
    }

    pub fn repay_for(
        &mut self,
        from: &TestAddress,
        borrower: &TestAddress,
        token: TestTokenIdentifier,
        amount: BigUint<StaticApi>,
    ) {
        self.world
            .tx()
            .from(*from)
            .to(CONTROLLER_ADDRESS)
            .raw_call("repayFor")
            .argument(&borrower.to_address())
            .single_esdt(&token.to_token_identifier(), 0, &amount)
            .run();
    }

    pub fn transfer_supply(
        &mut self,
        from: &TestAddress,
        to: &TestAddress,
        token: TestTokenIdentifier,
        amount: BigUint<StaticApi>,
    ) {
        self.world
            .tx()
            .from(*from)
            .to(CONTROLLER_ADDRESS)
            .raw_call("transferSupply")
            .argument(&token_id(token))
            .argument(&to.to_address())
            .argument(&amount)
            .run();
    }

    pub fn transfer_supply_error(
        &mut self,
        from: &TestAddress,
        to: &TestAddress,
        token: TestTokenIdentifier,
        amount: BigUint<StaticApi>,
        error_message: &[u8],
    ) {
        self.world
            .tx()
            .from(*from)
            .to(CONTROLLER_ADDRESS)
            .raw_call("transferSupply")
            .argument(&token_id(token))
            .argument(&to.to_address())
            .argument(&amount)
            .returns(ExpectMessage(core::str::from_utf8(error_message).unwrap()))
            .run();
    }

    pub fn toggle_collateral(&mut self, from: &TestAddress, token: TestTokenIdentifier, enable: bool) {
        let endpoint = if enable { "enableCollateral" } else { "disableCollateral" };
        self.world
            .tx()
            .from(*from)
            .to(CONTROLLER_ADDRESS)
            .raw_call(endpoint)
            .argument(&token_id(token))
            .run();
    }

    pub fn toggle_collateral_error(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        enable: bool,
        error_message: &[u8],
    ) {
        let endpoint = if enable { "enableCollateral" } else { "disableCollateral" };
        self.world
            .tx()
            .from(*from)
            .to(CONTROLLER_ADDRESS)
            .raw_call(endpoint)
            .argument(&token_id(token))
            .returns(ExpectMessage(core::str::from_utf8(error_message).unwrap()))
            .run();
    }

    pub fn liquidate(
        &mut self,
        from: &TestAddress,
        borrower: &TestAddress,
        debt_token: TestTokenIdentifier,
        collateral_token: TestTokenIdentifier,
        amount: BigUint<StaticApi>,
    ) {
        self.world
            .tx()
            .from(*from)
            .to(CONTROLLER_ADDRESS)
            .raw_call("liquidate")
            .argument(&borrower.to_address())
            .argument(&token_id(debt_token))
            .argument(&token_id(collateral_token))
            .single_esdt(&debt_token.to_token_identifier(), 0, &amount)
            .run();
    }

    pub fn liquidate_error(
        &mut self,
        from: &TestAddress,
        borrower: &TestAddress,
        debt_token: TestTokenIdentifier,
        collateral_token: TestTokenIdentifier,
        payment_token: TestTokenIdentifier,
        amount: BigUint<StaticApi>,
        error_message: &[u8],
    ) {
        self.world
            .tx()
            .from(*from)
            .to(CONTROLLER_ADDRESS)
            .raw_call("liquidate")
            .argument(&borrower.to_address())
            .argument(&token_id(debt_token))
            .argument(&token_id(collateral_token))
            .single_esdt(&payment_token.to_token_identifier(), 0, &amount)
            .returns(ExpectMessage(core::str::from_utf8(error_message).unwrap()))
            .run();
    }

    // Rewards
    pub fn fund_rewards(&mut self, token: TestTokenIdentifier, amount: BigUint<StaticApi>) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(CONTROLLER_ADDRESS)
            .raw_call("fundRewards")
            .single_esdt(&token.to_token_identifier(), 0, &amount)
            .run();
    }

    pub fn fund_rewards_error(
        &mut self,
        token: TestTokenIdentifier,
        amount: BigUint<StaticApi>,
        error_message: &[u8],
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(CONTROLLER_ADDRESS)
            .raw_call("fundRewards")
            .single_esdt(&token.to_token_identifier(), 0, &amount)
            .returns(ExpectMessage(core::str::from_utf8(error_message).unwrap()))
            .run();
    }

    pub fn set_reward_per_block(&mut self, token: TestTokenIdentifier, reward_per_block: BigUint<StaticApi>) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(CONTROLLER_ADDRESS)
            .raw_call("setRewardPerBlock")
            .argument(&token_id(token))
            .argument(&reward_per_block)
            .run();
    }

    pub fn claim_reward(&mut self, from: &TestAddress, token: TestTokenIdentifier) {
        self.world
            .tx()
            .from(*from)
            .to(CONTROLLER_ADDRESS)
            .raw_call("claimReward")
            .argument(&token_id(token))
            .run();
    }

    pub fn claim_reward_error(&mut self, from: &TestAddress, token: TestTokenIdentifier, error_message: &[u8]) {
        self.world
            .tx()
            .from(*from)
            .to(CONTROLLER_ADDRESS)
            .raw_call("claimReward")
            .argument(&token_id(token))
            .returns(ExpectMessage(core::str::from_utf8(error_message).unwrap()))
            .run();
    }

    pub fn claim_all_rewards(&mut self, from: &TestAddress) {
        self.world
            .tx()
            .from(*from)
            .to(CONTROLLER_ADDRESS)
            .raw_call("claimAllRewards")
            .run();
    }

    // Views
    fn market_view(&mut self, function: &str, token: TestTokenIdentifier) -> ManagedDecimal<StaticApi, usize> {
        let results = self
            .world
            .tx()
            .from(OWNER_ADDRESS)
            .to(CONTROLLER_ADDRESS)
            .raw_call(function)
            .argument(&token_id(token))
            .returns(ReturnsRawResult)
            .run();

        decode_decimal(results)
    }

    fn account_market_view(
        &mut self,
        function: &str,
        token: TestTokenIdentifier,
        account: &TestAddress,
    ) -> ManagedDecimal<StaticApi, usize> {
        let results = self
            .world
            .tx()
            .from(OWNER_ADDRESS)
            .to(CONTROLLER_ADDRESS)
            .raw_call(function)
            .argument(&token_id(token))
            .argument(&account.to_address())
            .returns(ReturnsRawResult)
            .run();

        decode_decimal(results)
    }

    fn account_view(&mut self, function: &str, account: &TestAddress) -> ManagedDecimal<StaticApi, usize> {
        let results = self
            .world
            .tx()
            .from(OWNER_ADDRESS)
            .to(CONTROLLER_ADDRESS)
            .raw_call(function)
            .argument(&account.to_address())
            .returns(ReturnsRawResult)
            .run();

        decode_decimal(results)
    }

    pub fn get_borrow_index(&mut self, token: TestTokenIdentifier) -> ManagedDecimal<StaticApi, usize> {
        self.market_view("getCurrentIndex", token)
    }

    pub fn get_supply_index(&mut self, token: TestTokenIdentifier) -> ManagedDecimal<StaticApi, usize> {
        self.market_view("getSupplyIndex", token)
    }

    pub fn get_utilization(&mut self, token: TestTokenIdentifier) -> ManagedDecimal<StaticApi, usize> {
        self.market_view("getUtilization", token)
    }

    pub fn get_borrow_rate(&mut self, token: TestTokenIdentifier) -> ManagedDecimal<StaticApi, usize> {
        self.market_view("getBorrowRate", token)
    }

    pub fn get_deposit_rate(&mut self, token: TestTokenIdentifier) -> ManagedDecimal<StaticApi, usize> {
        self.market_view("getDepositRate", token)
    }

    /// Stored reserves, not simulated: run `accrue_interest` first for an up to date value.
    pub fn get_reserves(&mut self, token: TestTokenIdentifier) -> ManagedDecimal<StaticApi, usize> {
        self.market_view("getReserves", token)
    }

    pub fn get_user_debt(&mut self, token: TestTokenIdentifier, account: &TestAddress) -> ManagedDecimal<StaticApi, usize> {
        self.account_market_view("getUserDebt", token, account)
    }

    pub fn get_user_supply(&mut self, token: TestTokenIdentifier, account: &TestAddress) -> ManagedDecimal<StaticApi, usize> {
        self.account_market_view("getUserSupply", token, account)
    }

    pub fn get_user_reward(&mut self, token: TestTokenIdentifier, account: &TestAddress) -> ManagedDecimal<StaticApi, usize> {
        self.account_market_view("getUserReward", token, account)
    }

    pub fn get_borrow_limit(&mut self, account: &TestAddress) -> ManagedDecimal<StaticApi, usize> {
        self.account_view("getBorrowLimit", account)
    }

    pub fn get_total_borrow_value(&mut self, account: &TestAddress) -> ManagedDecimal<StaticApi, usize> {
        self.account_view("getTotalBorrowValue", account)
    }

    pub fn get_borrow_limit_used(&mut self, account: &TestAddress) -> ManagedDecimal<StaticApi, usize> {
        self.account_view("getBorrowLimitUsed", account)
    }

    pub fn get_max_liquidation_quantity(
        &mut self,
        borrower: &TestAddress,
        debt_token: TestTokenIdentifier,
        collateral_token: TestTokenIdentifier,
    ) -> ManagedDecimal<StaticApi, usize> {
        let results = self
            .world
            .tx()
            .from(OWNER_ADDRESS)
            .to(CONTROLLER_ADDRESS)
            .raw_call("getMaxLiquidationQuantity")
            .argument(&borrower.to_address())
            .argument(&token_id(debt_token))
            .argument(&token_id(collateral_token))
            .returns(ReturnsRawResult)
            .run();

        decode_decimal(results)
    }

    pub fn get_max_liquidation_quantity_error(
        &mut self,
        borrower: &TestAddress,
        debt_token: TestTokenIdentifier,
        collateral_token: TestTokenIdentifier,
        error_message: &[u8],
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(CONTROLLER_ADDRESS)
            .raw_call("getMaxLiquidationQuantity")
            .argument(&borrower.to_address())
            .argument(&token_id(debt_token))
            .argument(&token_id(collateral_token))
            .returns(ExpectMessage(core::str::from_utf8(error_message).unwrap()))
            .run();
    }

    pub fn has_supply_position(&mut self, account: &TestAddress, token: TestTokenIdentifier) -> bool {
        let mut found = false;
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(CONTROLLER_ADDRESS)
            .whitebox(lending_controller::contract_obj, |sc| {
                let asset = EgldOrEsdtTokenIdentifier::esdt(token.to_token_identifier());
                found = sc
                    .supply_positions(&account.to_managed_address())
                    .contains_key(&asset);
            });

        found
    }

    pub fn has_borrow_position(&mut self, account: &TestAddress, token: TestTokenIdentifier) -> bool {
        let mut found = false;
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(CONTROLLER_ADDRESS)
            .whitebox(lending_controller::contract_obj, |sc| {
                let asset = EgldOrEsdtTokenIdentifier::esdt(token.to_token_identifier());
                found = sc
                    .borrow_positions(&account.to_managed_address())
                    .contains_key(&asset);
            });

        found
    }

    pub fn check_balance(&mut self, account: &TestAddress, token: TestTokenIdentifier, expected: BigUint<StaticApi>) {
        self.world.check_account(*account).esdt_balance(token, expected);
    }
}

/// Supplier provides liquidity in every market; the borrower backs its loans with XEGLD.
pub fn setup_liquidity(state: &mut ControllerTestState) {
    state.supply(&SUPPLIER_ADDRESS, EGLD_TOKEN, units(1_000, EGLD_DECIMALS));
    state.supply(&SUPPLIER_ADDRESS, XEGLD_TOKEN, units(1_000, XEGLD_DECIMALS));
    state.supply(&SUPPLIER_ADDRESS, USDC_TOKEN, units(100_000, USDC_DECIMALS));
}
