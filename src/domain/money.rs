//! Monetary conversions between fiat amounts and native-asset units.

use alloy_primitives::U256;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::PriceError;

/// USD amount represented as a Decimal for precision.
pub type Usd = Decimal;

/// Fractional digits kept when converting USD into the native asset.
pub const NATIVE_PRECISION: u32 = 10;

/// Decimals of the native asset's smallest unit (wei).
pub const NATIVE_DECIMALS: u32 = 18;

/// Convert a USD amount into native-asset wei at the given average price.
///
/// The quotient is rounded half away from zero to [`NATIVE_PRECISION`]
/// fractional digits before scaling to wei, so the result is always a whole
/// multiple of `10^(NATIVE_DECIMALS - NATIVE_PRECISION)`.
pub fn usd_to_native(usd: Usd, price: Decimal) -> Result<U256, PriceError> {
    if price <= Decimal::ZERO {
        return Err(PriceError::NonPositive(price));
    }
    let overflow = || PriceError::Overflow { usd, price };

    let mut native = usd
        .checked_div(price)
        .ok_or_else(overflow)?
        .round_dp_with_strategy(NATIVE_PRECISION, RoundingStrategy::MidpointAwayFromZero);
    native.rescale(NATIVE_PRECISION);

    let units = u128::try_from(native.mantissa()).map_err(|_| overflow())?;
    let scale = U256::from(10u64).pow(U256::from(NATIVE_DECIMALS - NATIVE_PRECISION));
    Ok(U256::from(units) * scale)
}
