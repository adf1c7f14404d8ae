#![no_std]

multiversx_sc::imports!();

/// Price oracle stand-in: the owner sets a USD price per asset and the controller reads it
/// back through `getPrice`.
#[multiversx_sc::contract]
pub trait AggregatorMock {
    #[init]
    fn init(&self) {}

    #[upgrade]
    fn upgrade(&self) {}

    /// `price` is expressed with `decimals` decimals.
    #[only_owner]
    #[endpoint(setPrice)]
    fn set_price(&self, asset: EgldOrEsdtTokenIdentifier, price: BigUint, decimals: u8) {
        self.prices(&asset).set((price, decimals));
    }

    #[only_owner]
    #[endpoint(clearPrice)]
    fn clear_price(&self, asset: EgldOrEsdtTokenIdentifier) {
        self.prices(&asset).clear();
    }

    /// Returns `(0, 0)` for assets without a price.
    #[view(getPrice)]
    fn get_price(&self, asset: EgldOrEsdtTokenIdentifier) -> MultiValue2<BigUint, u8> {
        let mapper = self.prices(&asset);
        if mapper.is_empty() {
            return (BigUint::zero(), 0u8).into();
        }

        mapper.get().into()
    }

    #[storage_mapper("prices")]
    fn prices(&self, asset: &EgldOrEsdtTokenIdentifier) -> SingleValueMapper<(BigUint, u8)>;
}
