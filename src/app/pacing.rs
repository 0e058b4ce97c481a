//! Random wallet ordering and per-wallet pacing draws.

use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::{OrderMode, Usd};

/// Apply the order mode to `items` once, before processing starts.
///
/// `Random` is a uniform Fisher-Yates permutation.
pub fn arrange<T, R: Rng + ?Sized>(items: &mut [T], mode: OrderMode, rng: &mut R) {
    if mode == OrderMode::Random {
        items.shuffle(rng);
    }
}

/// Draw a delay uniformly from the inclusive millisecond range.
pub fn draw_delay_ms<R: Rng + ?Sized>(min: u64, max: u64, rng: &mut R) -> u64 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Draw a USD amount uniformly over whole cents in `[min, max]`.
///
/// The result never leaves the bounds and normally has exactly two decimal
/// places. When no whole cent lies inside the range, `min` is returned
/// unchanged, keeping its own scale. A `max` too large to count in cents is
/// capped at the largest representable cent amount.
pub fn draw_swap_usd<R: Rng + ?Sized>(min: Usd, max: Usd, rng: &mut R) -> Usd {
    let hundred = Decimal::ONE_HUNDRED;
    let lo = min
        .checked_mul(hundred)
        .and_then(|cents| cents.ceil().to_i64());
    let hi = max
        .checked_mul(hundred)
        .and_then(|cents| cents.floor().to_i64())
        .unwrap_or(i64::MAX);

    match lo {
        Some(lo) if lo <= hi => Decimal::new(rng.gen_range(lo..=hi), 2),
        _ => min,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;

    #[test]
    fn delay_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let delay = draw_delay_ms(250, 1250, &mut rng);
            assert!((250..=1250).contains(&delay));
        }
        assert_eq!(draw_delay_ms(100, 100, &mut rng), 100);
    }

    #[test]
    fn delay_reaches_both_ends() {
        let mut rng = StdRng::seed_from_u64(11);
        let draws: Vec<u64> = (0..500).map(|_| draw_delay_ms(1, 3, &mut rng)).collect();
        assert!(draws.contains(&1));
        assert!(draws.contains(&3));
    }

    #[test]
    fn swap_amount_stays_within_bounds_with_two_decimals() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let usd = draw_swap_usd(dec!(1.005), dec!(7.499), &mut rng);
            assert!(usd >= dec!(1.005) && usd <= dec!(7.499), "{usd} out of range");
            assert_eq!(usd.scale(), 2);
        }
    }

    #[test]
    fn equal_bounds_yield_that_amount() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(draw_swap_usd(dec!(5), dec!(5), &mut rng), dec!(5.00));
        assert_eq!(draw_swap_usd(dec!(5), dec!(5), &mut rng).to_string(), "5.00");
    }

    #[test]
    fn sub_cent_range_falls_back_to_minimum() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(draw_swap_usd(dec!(5.001), dec!(5.009), &mut rng), dec!(5.001));
    }

    #[test]
    fn sub_cent_fallback_keeps_minimum_scale() {
        let mut rng = StdRng::seed_from_u64(1);
        let usd = draw_swap_usd(dec!(5.001), dec!(5.009), &mut rng);
        assert_eq!(usd.scale(), 3);
        assert_eq!(usd.to_string(), "5.001");
    }

    #[test]
    fn huge_maximum_is_drawn_without_overflow() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let usd = draw_swap_usd(dec!(1), Decimal::MAX, &mut rng);
            assert!(usd >= dec!(1));
            assert_eq!(usd.scale(), 2);
        }
    }

    #[test]
    fn huge_minimum_falls_back_to_itself() {
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(draw_swap_usd(Decimal::MAX, Decimal::MAX, &mut rng), Decimal::MAX);
    }

    #[test]
    fn sequential_keeps_order() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut items = vec![1, 2, 3, 4, 5];
        arrange(&mut items, OrderMode::Sequential, &mut rng);
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn random_is_a_permutation_that_sometimes_reorders() {
        let mut rng = StdRng::seed_from_u64(9);
        let original: Vec<u32> = (0..6).collect();
        let mut reordered = false;

        for _ in 0..50 {
            let mut items = original.clone();
            arrange(&mut items, OrderMode::Random, &mut rng);

            let mut sorted = items.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, original);
            reordered |= items != original;
        }

        assert!(reordered);
    }

    #[test]
    fn random_reorders_pairs_over_many_trials() {
        let mut rng = StdRng::seed_from_u64(21);
        let reordered = (0..100).any(|_| {
            let mut items = ["a", "b"];
            arrange(&mut items, OrderMode::Random, &mut rng);
            items == ["b", "a"]
        });
        assert!(reordered);
    }
}
