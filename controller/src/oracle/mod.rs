multiversx_sc::imports!();
use common_constants::WAD_PRECISION;
use common_errors::{ERROR_ORACLE_UNAVAILABLE, ERROR_PRICE_ORACLE_NOT_SET};
use common_structs::PriceFeed;

use crate::storage;

#[multiversx_sc::module]
pub trait OracleModule: storage::Storage + common_math::SharedMathModule {
    /// Reads the USD price of an asset from the price oracle.
    ///
    /// The oracle answers `(price, decimals)`; the price is normalized to WAD. A zero price
    /// means the oracle has no price for the asset and aborts the transaction.
    fn fetch_price_feed(&self, asset: &EgldOrEsdtTokenIdentifier) -> PriceFeed<Self::Api> {
        let oracle_mapper = self.price_oracle_address();
        require!(!oracle_mapper.is_empty(), ERROR_PRICE_ORACLE_NOT_SET);

        let (price, decimals) = self
            .price_oracle_proxy(oracle_mapper.get())
            .get_price(asset.clone())
            .returns(ReturnsResult)
            .sync_call_readonly()
            .into_tuple();
        require!(price > 0, ERROR_ORACLE_UNAVAILABLE);

        let price = self.to_decimal(price, decimals as usize);
        PriceFeed {
            price: self.rescale_half_up(&price, WAD_PRECISION),
            asset_decimals: self.market_params(asset).get().asset_decimals,
        }
    }

    #[proxy]
    fn price_oracle_proxy(&self, sc_address: ManagedAddress)
        -> price_oracle_proxy::ProxyTo<Self::Api>;
}

mod price_oracle_proxy {
    multiversx_sc::imports!();

    #[multiversx_sc::proxy]
    pub trait PriceOracle {
        #[view(getPrice)]
        fn get_price(&self, asset: EgldOrEsdtTokenIdentifier) -> MultiValue2<BigUint, u8>;
    }
}
