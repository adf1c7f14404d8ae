use common_structs::{AccountHealth, BorrowPosition, SupplyPosition};
use multiversx_sc::types::{BigUint, ManagedDecimal, NumDecimals};
use multiversx_sc_scenario::api::StaticApi;

fn wad(units: u64) -> ManagedDecimal<StaticApi, NumDecimals> {
    ManagedDecimal::from_raw_units(BigUint::from(units) * BigUint::from(10u64).pow(18), 18)
}

#[test]
fn account_health_liquidatable_only_above_limit() {
    let healthy = AccountHealth::<StaticApi> {
        total_collateral_usd: wad(300),
        borrow_limit_usd: wad(200),
        total_borrow_usd: wad(150),
    };
    assert!(!healthy.is_liquidatable());

    let at_limit = AccountHealth::<StaticApi> {
        total_collateral_usd: wad(300),
        borrow_limit_usd: wad(200),
        total_borrow_usd: wad(200),
    };
    assert!(!at_limit.is_liquidatable());

    let unhealthy = AccountHealth::<StaticApi> {
        total_collateral_usd: wad(300),
        borrow_limit_usd: wad(200),
        total_borrow_usd: wad(201),
    };
    assert!(unhealthy.is_liquidatable());
}

#[test]
fn positions_keep_constructor_values() {
    let supply = SupplyPosition::<StaticApi>::new(wad(5), true);
    assert!(supply.is_collateral);
    assert_eq!(supply.scaled_amount, wad(5));

    let borrow = BorrowPosition::<StaticApi>::new(wad(7), wad(1));
    assert_eq!(borrow.normalized_amount, wad(7));
    assert_eq!(borrow.last_seen_index, wad(1));
}
