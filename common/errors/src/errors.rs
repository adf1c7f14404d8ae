#![no_std]

pub static ERROR_ASSET_NOT_SUPPORTED: &[u8] = b"Asset not supported.";

pub static ERROR_ASSET_ALREADY_SUPPORTED: &[u8] = b"Asset already supported.";

pub static ERROR_INVALID_TICKER: &[u8] = b"Invalid ticker provided.";

pub static ERROR_INVALID_MARKET_PARAMS: &[u8] = b"Invalid market parameters.";

pub static ERROR_INVALID_SYSTEM_PARAMS: &[u8] = b"Invalid system parameters.";

pub static ERROR_PRICE_ORACLE_NOT_SET: &[u8] = b"Price oracle not set.";

pub static ERROR_ORACLE_UNAVAILABLE: &[u8] = b"Oracle price unavailable.";

pub static ERROR_UNSUPPORTED_RATE: &[u8] = b"Annual rate is outside the supported range.";

pub static ERROR_INSUFFICIENT_LIQUIDITY: &[u8] = b"Insufficient liquidity in the pool.";

pub static ERROR_MAX_UTILIZATION_EXCEEDED: &[u8] =
    b"Borrow would exceed the maximum utilization of the pool.";

pub static ERROR_INSUFFICIENT_COLLATERAL: &[u8] = b"Not enough collateral available for this loan.";

pub static ERROR_ASSET_NOT_COLLATERAL: &[u8] = b"Asset can not be used as collateral.";

pub static ERROR_POSITION_NOT_FOUND: &[u8] = b"Position not found.";

pub static ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO: &[u8] = b"Amount must be greater than zero.";

pub static ERROR_NOT_ELIGIBLE_FOR_LIQUIDATION: &[u8] = b"Health not low enough for liquidation.";

pub static ERROR_EXCEEDS_MAX_LIQUIDATION: &[u8] =
    b"Liquidation amount exceeds the maximum liquidatable quantity.";

pub static ERROR_NO_DEBT_IN_ASSET: &[u8] = b"Account has no debt in this asset.";

pub static ERROR_NO_COLLATERAL_IN_ASSET: &[u8] =
    b"Liquidatee user doesn't have this token as collateral.";

pub static ERROR_TOKEN_MISMATCH: &[u8] = b"Token sent is not the same as the liquidation token.";

pub static ERROR_LIQUIDATION_WORSENS_POSITION: &[u8] =
    b"Liquidation would increase the borrow limit used.";

pub static ERROR_SELF_LIQUIDATION: &[u8] = b"Account can not liquidate itself.";

pub static ERROR_SELF_TRANSFER: &[u8] = b"Account can not transfer to itself.";

pub static ERROR_INSUFFICIENT_REWARD_RESERVE: &[u8] = b"Not enough reward tokens funded.";

pub static ERROR_INVALID_REWARD_TOKEN: &[u8] = b"Payment is not the reward token.";

pub static ERROR_NOTHING_TO_CLAIM: &[u8] = b"Nothing to claim.";
