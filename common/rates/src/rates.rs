#![no_std]

use common_constants::{MAX_SUPPORTED_ANNUAL_RATE, RATE_TABLE_STEP, RAY_PRECISION};
use common_errors::ERROR_UNSUPPORTED_RATE;
use common_structs::{MarketAccrual, MarketParams};

pub mod table;

use table::PER_SECOND_RATES;

multiversx_sc::imports!();

/// The InterestRates module provides the rate model, the annual to per-second rate converter,
/// index compounding and the share ledger conversions of a market.
///
/// **Scope**: Pure functions over pool state; nothing here reads or writes storage.
///
/// **Goal**: Let every balance grow with a single per-market index, updated lazily in O(1)
/// on each interaction regardless of how many positions exist.
#[multiversx_sc::module]
pub trait InterestRates: common_math::SharedMathModule {
    /// Calculates the annual borrow rate for the given utilization (kinked linear model).
    ///
    /// **Formula**:
    /// - If `utilization <= breaking_point`:
    ///   `base + (first_slope - base) * utilization / breaking_point`.
    /// - Otherwise:
    ///   `first_slope + (second_slope - first_slope) * (utilization - breaking_point) / (1 - breaking_point)`.
    ///
    /// Both branches give `first_slope` at the breaking point, so the curve is continuous.
    /// With `base <= first_slope <= second_slope` (enforced when the market is configured)
    /// it is also non-decreasing in `utilization`.
    ///
    /// # Arguments
    /// - `utilization`: Pool utilization, RAY-based, in `[0, 1]`.
    /// - `params`: Market parameters holding the curve.
    ///
    /// # Returns
    /// - `ManagedDecimal<Self::Api, NumDecimals>`: Annual borrow rate (RAY-based).
    fn calc_annual_borrow_rate(
        &self,
        utilization: &ManagedDecimal<Self::Api, NumDecimals>,
        params: &MarketParams<Self::Api>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let breaking_point = &params.utilization_breaking_point;

        if utilization <= breaking_point {
            let slope_range = params.first_slope.clone() - params.base_borrow_rate.clone();
            let contribution = self.div_half_up(
                &self.mul_half_up(&slope_range, utilization, RAY_PRECISION),
                breaking_point,
                RAY_PRECISION,
            );
            params.base_borrow_rate.clone() + contribution
        } else {
            let slope_range = params.second_slope.clone() - params.first_slope.clone();
            let excess_utilization = utilization.clone() - breaking_point.clone();
            let remaining_range = self.ray() - breaking_point.clone();
            let contribution = self.div_half_up(
                &self.mul_half_up(&slope_range, &excess_utilization, RAY_PRECISION),
                &remaining_range,
                RAY_PRECISION,
            );
            params.first_slope.clone() + contribution
        }
    }

    /// Converts an annual rate into the per-second rate that compounds to it over a year.
    ///
    /// Uses the precomputed table of exact conversions for every whole percent between 0%
    /// and 210%. A rate between two entries is interpolated linearly, which underestimates
    /// the exact conversion because it is concave. The error is at most
    /// `step^2 / (8 * SECONDS_PER_YEAR)`, about 3.97e-13 per second or 1.25e-5 of annual rate
    /// (0.00125 percentage points), largest in the first bucket and zero on table entries.
    ///
    /// Rates above 210% fail with `ERROR_UNSUPPORTED_RATE`; they are never clamped.
    fn convert_annual_rate(
        &self,
        annual_rate: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let annual_ray = annual_rate.rescale(RAY_PRECISION);
        let annual_raw = annual_ray.into_raw_units();
        require!(
            annual_raw <= &BigUint::from(MAX_SUPPORTED_ANNUAL_RATE),
            ERROR_UNSUPPORTED_RATE
        );

        let step = BigUint::from(RATE_TABLE_STEP);
        let index = match (annual_raw / &step).to_u64() {
            Some(index) => index as usize,
            None => sc_panic!(ERROR_UNSUPPORTED_RATE),
        };
        let remainder = annual_raw % &step;

        let lower = BigUint::from(PER_SECOND_RATES[index]);
        if remainder == BigUint::zero() {
            return self.to_decimal_ray(lower);
        }

        let upper = BigUint::from(PER_SECOND_RATES[index + 1]);
        let gap = upper - &lower;
        let half_step = &step / 2u64;
        let interpolated = lower + (gap * remainder + half_step) / step;

        self.to_decimal_ray(interpolated)
    }

    /// Per-second borrow rate for the given utilization.
    fn calc_borrow_rate(
        &self,
        utilization: &ManagedDecimal<Self::Api, NumDecimals>,
        params: &MarketParams<Self::Api>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let annual_rate = self.calc_annual_borrow_rate(utilization, params);
        self.convert_annual_rate(&annual_rate)
    }

    /// Calculates the annual deposit rate based on utilization, borrow rate, and reserve factor.
    ///
    /// **Formula**:
    /// - `deposit_rate = utilization * borrow_rate * (1 - reserve_factor)`.
    /// - If `utilization` is zero, `deposit_rate` is zero.
    fn calc_deposit_rate(
        &self,
        utilization: &ManagedDecimal<Self::Api, NumDecimals>,
        annual_borrow_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        reserve_factor: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if utilization == &self.ray_zero() {
            return self.ray_zero();
        }

        self.mul_half_up(
            &self.mul_half_up(utilization, annual_borrow_rate, RAY_PRECISION),
            &(self.ray() - reserve_factor.clone()),
            RAY_PRECISION,
        )
    }

    /// Interest growth factor `(1 + rate)^elapsed` for a per-second rate.
    ///
    /// Computed by binary exponentiation, so a long idle period costs `O(log elapsed)`
    /// multiplications and compounding over `a` then `b` seconds matches compounding over
    /// `a + b` seconds up to rounding.
    fn calc_compound_factor(
        &self,
        rate_per_second: &ManagedDecimal<Self::Api, NumDecimals>,
        elapsed: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if elapsed == 0 {
            return self.ray();
        }

        let base = self.ray() + rate_per_second.rescale(RAY_PRECISION);
        self.pow_half_up(&base, elapsed, RAY_PRECISION)
    }

    /// Applies an interest factor to the borrow index.
    ///
    /// # Returns
    /// - `(new_borrow_index, old_borrow_index)`, both RAY-based.
    fn update_borrow_index(
        &self,
        old_borrow_index: ManagedDecimal<Self::Api, NumDecimals>,
        interest_factor: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> (
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let new_borrow_index = self.mul_half_up(&old_borrow_index, interest_factor, RAY_PRECISION);

        (new_borrow_index, old_borrow_index)
    }

    /// Updates the supply index with the interest earned by suppliers.
    ///
    /// **Formula**:
    /// - `total_supplied = supplied * old_supply_index`
    /// - `new_supply_index = old_supply_index * (1 + supplier_interest / total_supplied)`
    ///
    /// Returns the old index unchanged when there are no supply shares.
    fn update_supply_index(
        &self,
        supplied: &ManagedDecimal<Self::Api, NumDecimals>,
        old_supply_index: ManagedDecimal<Self::Api, NumDecimals>,
        supplier_interest: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if supplied == &self.ray_zero() {
            return old_supply_index;
        }

        let total_supplied = self.mul_half_up(supplied, &old_supply_index, RAY_PRECISION);
        let interest_ratio = self.div_half_up(supplier_interest, &total_supplied, RAY_PRECISION);
        let interest_factor = self.ray() + interest_ratio;

        self.mul_half_up(&old_supply_index, &interest_factor, RAY_PRECISION)
    }

    /// Splits the interest accrued on the aggregated normalized debt between suppliers and
    /// the protocol.
    ///
    /// # Returns
    /// - `(supplier_interest, protocol_fee)`, RAY-based token units.
    fn split_accrued_interest(
        &self,
        reserve_factor: &ManagedDecimal<Self::Api, NumDecimals>,
        borrowed: &ManagedDecimal<Self::Api, NumDecimals>,
        new_borrow_index: &ManagedDecimal<Self::Api, NumDecimals>,
        old_borrow_index: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> (
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let old_total_debt = self.mul_half_up(borrowed, old_borrow_index, RAY_PRECISION);
        let new_total_debt = self.mul_half_up(borrowed, new_borrow_index, RAY_PRECISION);
        let accrued_interest = self.sub_or_zero(&new_total_debt, &old_total_debt);

        let protocol_fee = self.mul_half_up(&accrued_interest, reserve_factor, RAY_PRECISION);
        let supplier_interest = self.sub_or_zero(&accrued_interest, &protocol_fee);

        (supplier_interest, protocol_fee)
    }

    /// `borrowed / (borrowed + available)`, zero for an empty pool. Both amounts share the
    /// asset's scale; the result is RAY-based and never above one.
    fn get_utilization(
        &self,
        borrowed: &ManagedDecimal<Self::Api, NumDecimals>,
        available: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let total = borrowed.clone() + available.rescale(borrowed.scale());
        if total.into_raw_units() == &BigUint::zero() {
            return self.ray_zero();
        }

        let utilization = self.div_half_up(borrowed, &total, RAY_PRECISION);
        self.get_min(utilization, self.ray())
    }

    /// Normalizes a token amount by an index: `amount / index`, RAY-based.
    fn to_shares(
        &self,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        index: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.div_half_up(amount, index, RAY_PRECISION)
    }

    /// Converts shares back to a token amount at the asset's decimals: `shares * index`.
    fn to_amount(
        &self,
        shares: &ManagedDecimal<Self::Api, NumDecimals>,
        index: &ManagedDecimal<Self::Api, NumDecimals>,
        asset_decimals: usize,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let amount = self.mul_half_up(shares, index, RAY_PRECISION);
        self.rescale_half_up(&amount, asset_decimals)
    }

    /// Adds or removes the shares worth `amount` at `index`. Removal saturates at zero.
    fn apply_share_delta(
        &self,
        shares: &ManagedDecimal<Self::Api, NumDecimals>,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        index: &ManagedDecimal<Self::Api, NumDecimals>,
        is_increase: bool,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let delta = self.to_shares(amount, index);
        let current = shares.rescale(RAY_PRECISION);
        if is_increase {
            current + delta
        } else {
            self.sub_or_zero(&current, &delta)
        }
    }

    /// Brings a market's indexes forward by `elapsed` seconds.
    ///
    /// **Steps**:
    /// 1. Utilization from the state at the start of the interval.
    /// 2. Annual rate from the curve, converted to a per-second rate.
    /// 3. Borrow index compounded over the interval.
    /// 4. Accrued interest split by the reserve factor; the supplier share raises the supply
    ///    index. Without supply shares the whole interest is routed to the protocol.
    ///
    /// # Arguments
    /// - `borrowed`: Aggregated normalized borrow (RAY).
    /// - `supplied`: Total supply shares (RAY).
    /// - `available`: Liquidity the pool can still lend, in asset decimals.
    fn accrue_market(
        &self,
        params: &MarketParams<Self::Api>,
        borrowed: &ManagedDecimal<Self::Api, NumDecimals>,
        borrow_index: &ManagedDecimal<Self::Api, NumDecimals>,
        supplied: &ManagedDecimal<Self::Api, NumDecimals>,
        supply_index: &ManagedDecimal<Self::Api, NumDecimals>,
        available: &ManagedDecimal<Self::Api, NumDecimals>,
        elapsed: u64,
    ) -> MarketAccrual<Self::Api> {
        if elapsed == 0 {
            return MarketAccrual {
                borrow_index: borrow_index.clone(),
                supply_index: supply_index.clone(),
                protocol_fee: self.ray_zero(),
            };
        }

        let borrowed_amount = self.to_amount(borrowed, borrow_index, params.asset_decimals);
        let utilization = self.get_utilization(&borrowed_amount, available);
        let rate_per_second = self.calc_borrow_rate(&utilization, params);
        let factor = self.calc_compound_factor(&rate_per_second, elapsed);
        let (new_borrow_index, old_borrow_index) =
            self.update_borrow_index(borrow_index.clone(), &factor);

        let (supplier_interest, protocol_fee) = self.split_accrued_interest(
            &params.reserve_factor,
            borrowed,
            &new_borrow_index,
            &old_borrow_index,
        );

        if supplied == &self.ray_zero() {
            return MarketAccrual {
                borrow_index: new_borrow_index,
                supply_index: supply_index.clone(),
                protocol_fee: protocol_fee + supplier_interest,
            };
        }

        let new_supply_index =
            self.update_supply_index(supplied, supply_index.clone(), &supplier_interest);

        MarketAccrual {
            borrow_index: new_borrow_index,
            supply_index: new_supply_index,
            protocol_fee,
        }
    }
}
