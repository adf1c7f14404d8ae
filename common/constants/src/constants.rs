#![no_std]

pub const SECONDS_PER_YEAR: u64 = 31_536_000;

pub const RAY: u128 = 1_000_000_000_000_000_000_000_000_000;
pub const RAY_PRECISION: usize = 27;

/// Represents 1 USD, also the unit of the dust threshold
pub const WAD: u128 = 1_000_000_000_000_000_000;
pub const WAD_PRECISION: usize = 18;

/// Distance between two entries of the per-second rate table (1% annual, RAY)
pub const RATE_TABLE_STEP: u128 = 10_000_000_000_000_000_000_000_000;

/// Highest annual rate the converter accepts (210%, RAY)
pub const MAX_SUPPORTED_ANNUAL_RATE: u128 = 2_100_000_000_000_000_000_000_000_000;

/// Number of entries in the per-second rate table (0% ..= 210%)
pub const RATE_TABLE_LEN: usize = 211;

/// Reported as `borrowLimitUsed` when an account has debt but no borrow limit left (RAY raw units)
pub const UNBOUNDED_BORROW_LIMIT_USED: u128 = u128::MAX;
