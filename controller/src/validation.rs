multiversx_sc::imports!();

use common_constants::{MAX_SUPPORTED_ANNUAL_RATE, RAY_PRECISION};
use common_errors::{
    ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO, ERROR_ASSET_NOT_SUPPORTED,
    ERROR_INVALID_MARKET_PARAMS, ERROR_INVALID_SYSTEM_PARAMS,
};
use common_structs::{MarketParams, SystemParams};

use crate::storage;

#[multiversx_sc::module]
pub trait ValidationModule: storage::Storage + common_math::SharedMathModule {
    /// Ensures the payment is in a listed market and carries a non-zero amount.
    fn validate_payment(&self, payment: &EgldOrEsdtTokenPayment<Self::Api>) {
        self.require_asset_supported(&payment.token_identifier);
        self.require_amount_greater_than_zero(&payment.amount);
    }

    fn require_asset_supported(&self, asset: &EgldOrEsdtTokenIdentifier) {
        require!(self.markets().contains(asset), ERROR_ASSET_NOT_SUPPORTED);
    }

    fn require_amount_greater_than_zero(&self, amount: &BigUint) {
        require!(
            amount > &BigUint::zero(),
            ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO
        );
    }

    /// Checks a market configuration before it is stored.
    ///
    /// **Rules**:
    /// - Every ratio is RAY-based.
    /// - `0 < utilization_breaking_point < 1` and `base <= first_slope <= second_slope`, which
    ///   keeps the rate curve continuous and non-decreasing.
    /// - `second_slope` stays within the rate conversion table.
    /// - `0 < max_utilization_ratio <= 1`, `reserve_factor < 1`, `liquidation_discount < 1`.
    /// - `collateralization_ratio >= 1`.
    /// - The reward floors add up to at most one.
    fn validate_market_params(&self, params: &MarketParams<Self::Api>) {
        let one = self.ray();
        let zero = self.ray_zero();
        let ratios = [
            &params.base_borrow_rate,
            &params.first_slope,
            &params.second_slope,
            &params.utilization_breaking_point,
            &params.max_utilization_ratio,
            &params.reserve_factor,
            &params.liquidation_discount,
            &params.collateralization_ratio,
            &params.min_supply_distribution_part,
            &params.min_borrow_distribution_part,
        ];
        for ratio in ratios {
            require!(ratio.scale() == RAY_PRECISION, ERROR_INVALID_MARKET_PARAMS);
        }

        require!(
            params.asset_decimals <= RAY_PRECISION,
            ERROR_INVALID_MARKET_PARAMS
        );
        require!(
            params.utilization_breaking_point > zero && params.utilization_breaking_point < one,
            ERROR_INVALID_MARKET_PARAMS
        );
        require!(
            params.base_borrow_rate <= params.first_slope
                && params.first_slope <= params.second_slope,
            ERROR_INVALID_MARKET_PARAMS
        );
        require!(
            params.second_slope <= self.to_decimal_ray(BigUint::from(MAX_SUPPORTED_ANNUAL_RATE)),
            ERROR_INVALID_MARKET_PARAMS
        );
        require!(
            params.max_utilization_ratio > zero && params.max_utilization_ratio <= one,
            ERROR_INVALID_MARKET_PARAMS
        );
        require!(params.reserve_factor < one, ERROR_INVALID_MARKET_PARAMS);
        require!(params.liquidation_discount < one, ERROR_INVALID_MARKET_PARAMS);
        require!(
            params.collateralization_ratio >= one,
            ERROR_INVALID_MARKET_PARAMS
        );
        require!(
            params.min_supply_distribution_part.clone()
                + params.min_borrow_distribution_part.clone()
                <= one,
            ERROR_INVALID_MARKET_PARAMS
        );
    }

    /// `0 < liquidation_boundary <= 1` (RAY); the dust threshold is WAD-based.
    fn validate_system_params(&self, params: &SystemParams<Self::Api>) {
        require!(
            params.liquidation_boundary.scale() == RAY_PRECISION,
            ERROR_INVALID_SYSTEM_PARAMS
        );
        require!(
            params.liquidation_boundary > self.ray_zero()
                && params.liquidation_boundary <= self.ray(),
            ERROR_INVALID_SYSTEM_PARAMS
        );
        require!(
            params.min_currency_amount.scale() == common_constants::WAD_PRECISION,
            ERROR_INVALID_SYSTEM_PARAMS
        );
    }
}
