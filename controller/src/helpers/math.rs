use common_constants::{RAY_PRECISION, UNBOUNDED_BORROW_LIMIT_USED, WAD_PRECISION};
use common_structs::{AccountHealth, PriceFeed};

multiversx_sc::imports!();

/// # Controller Math Helpers Module
///
/// USD valuation of positions and the liquidation sizing math.
///
/// ## Borrow limit
/// - **Formula**: `borrow_limit = Σ collateral_value / collateralization_ratio`
/// - `borrow_limit_used = total_borrow_value / borrow_limit` (RAY)
///
/// ## Liquidation sizing
/// - **Formula**: `max_repay_value = min(debt_value, collateral_value * (1 - d), boundary_cap)`
/// - `boundary_cap` restores `borrow_limit_used` to the liquidation boundary `t`:
///   `X = (B - t * L) / (1 - t / ((1 - d) * CR))`
/// - Repaying `X` of debt seizes `X / (1 - d)` of collateral value, which removes
///   `X / ((1 - d) * CR)` of borrow limit.
/// - Accounts above `(1 - d) * CR` usage lose more borrow limit than debt on every seizure
///   of that collateral and are not liquidated against it.
///
/// ## Precision Standards
/// - **RAY**: intermediate products and ratios
/// - **WAD**: USD values
/// - Amounts paid out (seized collateral, max quantities) are floored.
#[multiversx_sc::module]
pub trait MathsModule: common_math::SharedMathModule {
    /// USD value (WAD) of a token amount at a WAD price.
    fn get_token_usd_value(
        &self,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        token_price: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.mul_half_up(amount, token_price, RAY_PRECISION)
            .rescale(WAD_PRECISION)
    }

    /// Token amount worth `amount_in_usd`, floored to the token decimals.
    fn convert_usd_to_tokens(
        &self,
        amount_in_usd: &ManagedDecimal<Self::Api, NumDecimals>,
        token_data: &PriceFeed<Self::Api>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.div_down(amount_in_usd, &token_data.price, RAY_PRECISION)
            .rescale(token_data.asset_decimals)
    }

    /// Borrowing power granted by a collateral value.
    fn calc_borrow_limit(
        &self,
        collateral_usd: &ManagedDecimal<Self::Api, NumDecimals>,
        collateralization_ratio: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.div_down(collateral_usd, collateralization_ratio, RAY_PRECISION)
            .rescale(WAD_PRECISION)
    }

    /// `total_borrow / borrow_limit` (RAY). Debt without any borrow limit reports the
    /// unbounded sentinel, no debt reports zero.
    fn calc_borrow_limit_used(
        &self,
        health: &AccountHealth<Self::Api>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if health.total_borrow_usd == self.wad_zero() {
            return self.ray_zero();
        }
        if health.borrow_limit_usd == self.wad_zero() {
            return self.to_decimal_ray(BigUint::from(UNBOUNDED_BORROW_LIMIT_USED));
        }

        self.div_half_up(
            &health.total_borrow_usd,
            &health.borrow_limit_usd,
            RAY_PRECISION,
        )
    }

    /// `(1 - discount) * collateralization_ratio` (RAY): debt repaid per unit of borrow limit
    /// the matching seizure removes.
    fn calc_repaid_per_limit(
        &self,
        liquidation_discount: &ManagedDecimal<Self::Api, NumDecimals>,
        collateralization_ratio: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let discount_factor = self.sub_or_zero(&self.ray(), liquidation_discount);
        self.mul_half_up(&discount_factor, collateralization_ratio, RAY_PRECISION)
    }

    /// Whether seizing this collateral can keep `borrow_limit_used` from rising.
    ///
    /// Repaying `X` moves the usage from `B / L` to `(B - X) / (L - X / k)` with
    /// `k = (1 - d) * CR`, which never increases exactly when `B <= k * L`.
    fn can_seizure_lower_usage(
        &self,
        health: &AccountHealth<Self::Api>,
        liquidation_discount: &ManagedDecimal<Self::Api, NumDecimals>,
        collateralization_ratio: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> bool {
        let repaid_per_limit =
            self.calc_repaid_per_limit(liquidation_discount, collateralization_ratio);
        let covered_borrow =
            self.mul_half_up(&health.borrow_limit_usd, &repaid_per_limit, RAY_PRECISION);

        health.total_borrow_usd.rescale(RAY_PRECISION) <= covered_borrow
    }

    /// Repaid value that brings the account back to `liquidation_boundary` usage.
    ///
    /// # Returns
    /// - `None` when a liquidation against this collateral can never lower the usage to the
    ///   boundary (non-positive denominator); the other bounds apply alone.
    fn calc_liquidation_boundary_cap(
        &self,
        health: &AccountHealth<Self::Api>,
        liquidation_boundary: &ManagedDecimal<Self::Api, NumDecimals>,
        liquidation_discount: &ManagedDecimal<Self::Api, NumDecimals>,
        collateralization_ratio: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> Option<ManagedDecimal<Self::Api, NumDecimals>> {
        let limit_per_seized =
            self.calc_repaid_per_limit(liquidation_discount, collateralization_ratio);
        if limit_per_seized <= liquidation_boundary.rescale(RAY_PRECISION) {
            return None;
        }

        let boundary_ratio = self.div_half_up(liquidation_boundary, &limit_per_seized, RAY_PRECISION);
        let denominator = self.ray() - boundary_ratio;

        let target_borrow =
            self.mul_half_up(&health.borrow_limit_usd, liquidation_boundary, RAY_PRECISION);
        let excess_borrow = self.sub_or_zero(
            &health.total_borrow_usd.rescale(RAY_PRECISION),
            &target_borrow,
        );

        Some(
            self.div_half_up(&excess_borrow, &denominator, RAY_PRECISION)
                .rescale(WAD_PRECISION),
        )
    }

    /// `min(debt_value, collateral_value * (1 - discount), boundary_cap)` in USD (WAD).
    fn calc_max_liquidation_usd(
        &self,
        debt_usd: &ManagedDecimal<Self::Api, NumDecimals>,
        collateral_usd: &ManagedDecimal<Self::Api, NumDecimals>,
        liquidation_discount: &ManagedDecimal<Self::Api, NumDecimals>,
        boundary_cap: Option<ManagedDecimal<Self::Api, NumDecimals>>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let discount_factor = self.sub_or_zero(&self.ray(), liquidation_discount);
        let discounted_collateral = self
            .mul_down(collateral_usd, &discount_factor, RAY_PRECISION)
            .rescale(WAD_PRECISION);

        let max_usd = self.get_min(debt_usd.rescale(WAD_PRECISION), discounted_collateral);
        match boundary_cap {
            Some(cap) => self.get_min(max_usd, cap.rescale(WAD_PRECISION)),
            None => max_usd,
        }
    }

    /// Collateral released for a repayment:
    /// `repaid * debt_price / (collateral_price * (1 - discount))`, floored.
    fn calc_seized_collateral(
        &self,
        repaid_amount: &ManagedDecimal<Self::Api, NumDecimals>,
        debt_feed: &PriceFeed<Self::Api>,
        collateral_feed: &PriceFeed<Self::Api>,
        liquidation_discount: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let repaid_value = self.mul_down(repaid_amount, &debt_feed.price, RAY_PRECISION);
        let discount_factor = self.sub_or_zero(&self.ray(), liquidation_discount);
        let discounted_price =
            self.mul_half_up(&collateral_feed.price, &discount_factor, RAY_PRECISION);

        self.div_down(&repaid_value, &discounted_price, RAY_PRECISION)
            .rescale(collateral_feed.asset_decimals)
    }

    /// `after.borrow / after.limit <= before.borrow / before.limit`, cross-multiplied so an
    /// empty borrow limit needs no division.
    fn is_borrow_limit_used_not_increased(
        &self,
        before: &AccountHealth<Self::Api>,
        after: &AccountHealth<Self::Api>,
    ) -> bool {
        if after.total_borrow_usd == self.wad_zero() {
            return true;
        }

        let after_side =
            after.total_borrow_usd.into_raw_units() * before.borrow_limit_usd.into_raw_units();
        let before_side =
            before.total_borrow_usd.into_raw_units() * after.borrow_limit_usd.into_raw_units();

        after_side <= before_side
    }
}
