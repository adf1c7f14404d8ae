// Standalone tests for the individual fixed-point helpers.
// Run with: cargo test --test test_individual_functions test_name

use multiversx_sc::types::{BigUint, ManagedDecimal};
use multiversx_sc_scenario::api::StaticApi;

use common_math::SharedMathModule;

pub struct MathTester;

impl multiversx_sc::contract_base::ContractBase for MathTester {
    type Api = StaticApi;
}

impl SharedMathModule for MathTester {}

fn dec(raw: u128, scale: usize) -> ManagedDecimal<StaticApi, usize> {
    ManagedDecimal::from_raw_units(BigUint::from(raw), scale)
}

#[test]
fn test_to_decimal_wad() {
    let tester = MathTester;

    let value = BigUint::<StaticApi>::from(1_000_000_000_000_000_000u64);
    let result = tester.to_decimal_wad(value.clone());

    assert_eq!(result.into_raw_units(), &value);
    assert_eq!(result.scale(), 18);
}

#[test]
fn test_ray_and_zeros() {
    let tester = MathTester;

    assert_eq!(tester.ray().scale(), 27);
    assert_eq!(
        tester.ray().into_raw_units(),
        &BigUint::<StaticApi>::from(common_constants::RAY)
    );
    assert_eq!(tester.ray_zero().into_raw_units(), &BigUint::<StaticApi>::zero());
    assert_eq!(tester.wad_zero().scale(), 18);
}

#[test]
fn test_mul_half_up() {
    let tester = MathTester;

    // 1.5 * 2.0 = 3.0
    let result = tester.mul_half_up(
        &dec(1_500_000_000_000_000_000, 18),
        &dec(2_000_000_000_000_000_000, 18),
        18,
    );

    assert_eq!(
        result.into_raw_units(),
        &BigUint::<StaticApi>::from(3_000_000_000_000_000_000u64)
    );
}

#[test]
fn test_mul_half_up_rounding() {
    let tester = MathTester;

    // 1.5 * 1.3 = 1.95 rounds to 2.0
    let result = tester.mul_half_up(&dec(15, 1), &dec(13, 1), 1);
    assert_eq!(result.into_raw_units(), &BigUint::<StaticApi>::from(20u64));
}

#[test]
fn test_div_half_up_rounding() {
    let tester = MathTester;

    // 5.0 / 3.0 = 1.666... rounds to 1.7
    let result = tester.div_half_up(&dec(50, 1), &dec(30, 1), 1);
    assert_eq!(result.into_raw_units(), &BigUint::<StaticApi>::from(17u64));
}

#[test]
fn test_mul_down_truncates() {
    let tester = MathTester;

    // 1.5 * 1.3 = 1.95 floors to 1.9
    let result = tester.mul_down(&dec(15, 1), &dec(13, 1), 1);
    assert_eq!(result.into_raw_units(), &BigUint::<StaticApi>::from(19u64));
}

#[test]
fn test_div_down_truncates() {
    let tester = MathTester;

    // 5.0 / 3.0 = 1.666... floors to 1.6
    let result = tester.div_down(&dec(50, 1), &dec(30, 1), 1);
    assert_eq!(result.into_raw_units(), &BigUint::<StaticApi>::from(16u64));
}

#[test]
fn test_mixed_scales_are_aligned() {
    let tester = MathTester;

    // 2 (6 decimals) * 0.5 (RAY) at RAY precision = 1.0
    let two = dec(2_000_000, 6);
    let half = dec(500_000_000_000_000_000_000_000_000, 27);
    let result = tester.mul_half_up(&two, &half, 27);

    assert_eq!(result, tester.ray());
}

#[test]
fn test_rescale_half_up() {
    let tester = MathTester;

    let value = dec(1_234_567_890_123_456_789, 18);
    let result = tester.rescale_half_up(&value, 4);

    assert_eq!(result.scale(), 4);
    assert_eq!(result, dec(12346, 4));
}

#[test]
fn test_sub_or_zero() {
    let tester = MathTester;

    assert_eq!(tester.sub_or_zero(&dec(500, 2), &dec(200, 2)), dec(300, 2));
    assert_eq!(tester.sub_or_zero(&dec(200, 2), &dec(500, 2)), dec(0, 2));
    assert_eq!(tester.sub_or_zero(&dec(200, 2), &dec(200, 2)), dec(0, 2));
}

#[test]
fn test_get_min() {
    let tester = MathTester;

    let a = dec(100, 2);
    let b = dec(200, 2);

    assert_eq!(tester.get_min(a.clone(), b.clone()), a);
    assert_eq!(tester.get_min(b, a.clone()), a);
}
