use multiversx_sc::types::{TestAddress, TestSCAddress};
use multiversx_sc_scenario::imports::{MxscPath, TestTokenIdentifier};

pub const SECONDS_PER_YEAR: u64 = 31_536_000;
pub const SECONDS_PER_DAY: u64 = 86_400; // 24 * 60 * 60

pub const RAY: u128 = 1_000_000_000_000_000_000_000_000_000;
pub const WAD: u128 = 1_000_000_000_000_000_000;
pub const PERCENT: u128 = RAY / 100;

pub const BASE_BORROW_RATE: u128 = 0;
pub const FIRST_SLOPE: u128 = 5 * PERCENT;
pub const SECOND_SLOPE: u128 = 100 * PERCENT;
pub const UTILIZATION_BREAKING_POINT: u128 = 70 * PERCENT;
pub const MAX_UTILIZATION_RATIO: u128 = 95 * PERCENT;
pub const RESERVE_FACTOR: u128 = 10 * PERCENT;
pub const LIQUIDATION_DISCOUNT: u128 = 8 * PERCENT;
pub const COLLATERALIZATION_RATIO: u128 = 150 * PERCENT;
pub const MIN_SUPPLY_DISTRIBUTION_PART: u128 = 30 * PERCENT;
pub const MIN_BORROW_DISTRIBUTION_PART: u128 = 20 * PERCENT;

pub const LIQUIDATION_BOUNDARY: u128 = RAY; // 100%
pub const MIN_CURRENCY_AMOUNT: u128 = WAD / 100; // 0.01 tokens

pub const EGLD_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("WEGLD-abcdef");
pub const EGLD_PRICE_IN_DOLLARS: u64 = 20; // $20
pub const EGLD_DECIMALS: usize = 18;

pub const XEGLD_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("XEGLD-abcdef");
pub const XEGLD_PRICE_IN_DOLLARS: u64 = 30; // $30
pub const XEGLD_DECIMALS: usize = 18;

pub const USDC_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("USDC-abcdef");
pub const USDC_PRICE_IN_DOLLARS: u64 = 1; // $1
pub const USDC_DECIMALS: usize = 6;

pub const UNLISTED_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("UNLISTED-abcdef");

pub const REWARD_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("XOXNO-abcdef");
pub const REWARD_DECIMALS: usize = 18;

pub const CONTROLLER_ADDRESS: TestSCAddress = TestSCAddress::new("controller");
pub const PRICE_ORACLE_ADDRESS: TestSCAddress = TestSCAddress::new("price-oracle");

pub const OWNER_ADDRESS: TestAddress = TestAddress::new("owner");
pub const SUPPLIER_ADDRESS: TestAddress = TestAddress::new("supplier");
pub const BORROWER_ADDRESS: TestAddress = TestAddress::new("borrower");
pub const LIQUIDATOR_ADDRESS: TestAddress = TestAddress::new("liquidator");
pub const RECEIVER_ADDRESS: TestAddress = TestAddress::new("receiver");

pub const CONTROLLER_PATH: MxscPath = MxscPath::new("output/lending-controller.mxsc.json");
pub const PRICE_ORACLE_PATH: MxscPath =
    MxscPath::new("../aggregator_mock/output/aggregator-mock.mxsc.json");

/// Starting balance of every test account, in whole tokens.
pub const INITIAL_BALANCE: u64 = 100_000;
