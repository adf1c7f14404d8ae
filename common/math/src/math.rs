#![no_std]

use core::cmp::Ordering;

use common_constants::{RAY, RAY_PRECISION, WAD, WAD_PRECISION};

multiversx_sc::imports!();

/// Fixed-point helpers shared by every crate of the engine.
///
/// All operands are rescaled to the requested `precision` before the raw `BigUint` math runs.
/// The `_half_up` variants round to nearest, the `_down` variants floor. Flooring is used
/// wherever a result is paid out (rewards, seized amounts), so the protocol never
/// distributes more than it holds.
#[multiversx_sc::module]
pub trait SharedMathModule {
    fn mul_half_up(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let scaled_a = a.rescale(precision);
        let scaled_b = b.rescale(precision);

        let product = scaled_a.into_raw_units() * scaled_b.into_raw_units();

        let scaled = BigUint::from(10u64).pow(precision as u32);
        let half_scaled = &scaled / &BigUint::from(2u64);

        let rounded_product = (product + half_scaled) / scaled;

        self.to_decimal(rounded_product, precision)
    }

    fn div_half_up(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let scaled_a = a.rescale(precision);
        let scaled_b = b.rescale(precision);

        let scaled = BigUint::from(10u64).pow(precision as u32);
        let numerator = scaled_a.into_raw_units() * &scaled;
        let denominator = scaled_b.into_raw_units();

        let half_denominator = denominator / &BigUint::from(2u64);
        let rounded_quotient = (numerator + half_denominator) / denominator;

        self.to_decimal(rounded_quotient, precision)
    }

    fn mul_down(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let scaled_a = a.rescale(precision);
        let scaled_b = b.rescale(precision);

        let product = scaled_a.into_raw_units() * scaled_b.into_raw_units();
        let scaled = BigUint::from(10u64).pow(precision as u32);

        self.to_decimal(product / scaled, precision)
    }

    fn div_down(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let scaled_a = a.rescale(precision);
        let scaled_b = b.rescale(precision);

        let scaled = BigUint::from(10u64).pow(precision as u32);
        let numerator = scaled_a.into_raw_units() * &scaled;

        self.to_decimal(numerator / scaled_b.into_raw_units(), precision)
    }

    /// Raises `base` to an integer power by binary exponentiation.
    ///
    /// Runs `O(log exponent)` multiplications, each rounded half-up at `precision`.
    /// `base^0` is one.
    fn pow_half_up(
        &self,
        base: &ManagedDecimal<Self::Api, NumDecimals>,
        exponent: u64,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mut result = self.to_decimal(BigUint::from(10u64).pow(precision as u32), precision);
        let mut square = base.rescale(precision);
        let mut remaining = exponent;

        while remaining > 0 {
            if remaining & 1 == 1 {
                result = self.mul_half_up(&result, &square, precision);
            }
            remaining >>= 1;
            if remaining > 0 {
                square = self.mul_half_up(&square, &square, precision);
            }
        }

        result
    }

    /// `a - b`, or zero when `b` is larger. Both sides are compared at `a`'s scale.
    fn sub_or_zero(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let b = b.rescale(a.scale());
        if a.into_raw_units() > b.into_raw_units() {
            a.clone() - b
        } else {
            self.to_decimal(BigUint::zero(), a.scale())
        }
    }

    fn to_decimal_wad(&self, value: BigUint) -> ManagedDecimal<<Self as ContractBase>::Api, usize> {
        self.to_decimal(value, WAD_PRECISION)
    }

    fn wad_zero(&self) -> ManagedDecimal<<Self as ContractBase>::Api, usize> {
        self.to_decimal_wad(BigUint::zero())
    }

    fn ray_zero(&self) -> ManagedDecimal<<Self as ContractBase>::Api, usize> {
        self.to_decimal_ray(BigUint::zero())
    }

    fn to_decimal_ray(&self, value: BigUint) -> ManagedDecimal<<Self as ContractBase>::Api, usize> {
        self.to_decimal(value, RAY_PRECISION)
    }

    fn ray(&self) -> ManagedDecimal<<Self as ContractBase>::Api, usize> {
        self.to_decimal(BigUint::from(RAY), RAY_PRECISION)
    }

    fn wad(&self) -> ManagedDecimal<<Self as ContractBase>::Api, usize> {
        self.to_decimal(BigUint::from(WAD), WAD_PRECISION)
    }

    fn to_decimal(
        &self,
        value: BigUint,
        precision: NumDecimals,
    ) -> ManagedDecimal<<Self as ContractBase>::Api, usize> {
        ManagedDecimal::from_raw_units(value, precision)
    }

    fn rescale_half_up(
        &self,
        value: &ManagedDecimal<Self::Api, NumDecimals>,
        new_precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let old_precision = value.scale();
        let raw_value = value.into_raw_units();

        match new_precision.cmp(&old_precision) {
            Ordering::Equal => value.clone(),
            Ordering::Less => {
                let precision_diff = old_precision - new_precision;
                let factor = BigUint::from(10u64).pow(precision_diff as u32);
                let half_factor = &factor / 2u64;

                let rounded_downscaled_value = (raw_value + &half_factor) / factor;
                ManagedDecimal::from_raw_units(rounded_downscaled_value, new_precision)
            },
            Ordering::Greater => value.rescale(new_precision),
        }
    }

    fn get_min(
        &self,
        a: ManagedDecimal<Self::Api, NumDecimals>,
        b: ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if a < b {
            a
        } else {
            b
        }
    }
}
