//! Exact size accounting between base-256 buffers and base-N strings.
//!
//! For a base `B`:
//!
//! - `max_char_count(n)` is the least `k` with `B^k >= 256^n`, i.e.
//!   `ceil(8n / log2(B))`.
//! - `max_byte_count(c)` is the least `m` with `256^m >= B^c`, i.e.
//!   `ceil(c * log2(B) / 8)`.
//!
//! Power-of-two bases reduce to integer arithmetic. Every other base has an
//! irrational `log2(B)`, which is bracketed once per [`SizeModel`] by a
//! rigorous fixed-point interval. When the interval is too wide to decide a
//! ceiling, the answer is settled from the exact bit length of `B^k`.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use tracing::trace;

/// Fractional bits kept for `log2(base)`.
const LOG2_FRACTION_BITS: usize = 192;

/// Fixed-point precision of the squaring loop. The surplus over
/// `LOG2_FRACTION_BITS` absorbs the rounding drift, which doubles per step.
const WORKING_BITS: usize = LOG2_FRACTION_BITS + 64;

/// `lower <= log2(base) * 2^LOG2_FRACTION_BITS <= upper`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Log2Bounds {
    lower: BigUint,
    upper: BigUint,
}

impl Log2Bounds {
    /// Bit-by-bit binary logarithm: normalize to `y` in `[1, 2)`, then each
    /// squaring shifts one fractional bit of `log2(y)` into the integer part.
    /// Both ends are tracked with directed rounding so the result is an
    /// enclosure, not an estimate.
    fn of(base: usize) -> Self {
        let integer_part = (usize::BITS - 1 - base.leading_zeros()) as usize;
        let two = BigUint::one() << (WORKING_BITS + 1);

        // y = base / 2^integer_part, exact in fixed point
        let scaled = (BigUint::from(base) << WORKING_BITS) >> integer_part;
        let mut low = scaled.clone();
        let mut high = scaled;

        let mut bits = BigUint::from(integer_part);
        let mut determined = 0;

        while determined < LOG2_FRACTION_BITS {
            low = (&low * &low) >> WORKING_BITS;
            high = shr_ceil(&high * &high, WORKING_BITS);

            let low_doubled = low >= two;
            if low_doubled != (high >= two) {
                break;
            }

            bits <<= 1;
            if low_doubled {
                bits += 1u32;
                low >>= 1;
                high = shr_ceil(high, 1);
            }
            determined += 1;
        }

        let slack = LOG2_FRACTION_BITS - determined;
        let lower = bits << slack;
        let upper = &lower + (BigUint::one() << slack);
        Log2Bounds { lower, upper }
    }
}

fn shr_ceil(value: BigUint, shift: usize) -> BigUint {
    let floor = &value >> shift;
    if (&floor << shift) == value {
        floor
    } else {
        floor + 1u32
    }
}

fn div_ceil(numerator: &BigUint, denominator: &BigUint) -> BigUint {
    let (quotient, remainder) = numerator.div_rem(denominator);
    if remainder.is_zero() {
        quotient
    } else {
        quotient + 1u32
    }
}

/// Sizing functions for one base, with the base's logarithm precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeModel {
    base: usize,
    log2: Option<Log2Bounds>,
}

impl SizeModel {
    /// # Panics
    ///
    /// Panics if `base < 2`; alphabets enforce this before a model is built.
    pub fn new(base: usize) -> Self {
        assert!(base >= 2, "radix must be at least 2, got {}", base);
        let log2 = if base.is_power_of_two() {
            None
        } else {
            Some(Log2Bounds::of(base))
        };
        SizeModel { base, log2 }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    /// `true` when every byte length survives `max_byte_count(max_char_count(n))`
    /// unchanged, i.e. the base is `2^b` with `b` dividing 8.
    pub fn preserves_length(&self) -> bool {
        self.base.is_power_of_two() && 8 % self.base.trailing_zeros() == 0
    }

    /// Symbols needed for any `byte_count`-byte magnitude, or `None` if that
    /// count does not fit in `usize`.
    pub fn checked_max_char_count(&self, byte_count: usize) -> Option<usize> {
        if byte_count == 0 {
            return Some(0);
        }

        let Some(bounds) = &self.log2 else {
            let bits_per_char = self.base.trailing_zeros() as u128;
            return usize::try_from((byte_count as u128 * 8).div_ceil(bits_per_char)).ok();
        };

        // 8n / log2(B): the larger logarithm bound gives the smaller count
        let scaled_bits = BigUint::from(byte_count) << (LOG2_FRACTION_BITS + 3);
        let fewest = div_ceil(&scaled_bits, &bounds.upper);
        let most = div_ceil(&scaled_bits, &bounds.lower);

        let chars = if fewest == most {
            fewest
        } else {
            trace!(base = self.base, byte_count, "settling char count exactly");
            self.exact_char_count(byte_count, fewest, most)
        };
        chars.to_usize()
    }

    /// Bytes needed for any `char_count`-symbol magnitude, or `None` if that
    /// count does not fit in `usize`.
    pub fn checked_max_byte_count(&self, char_count: usize) -> Option<usize> {
        if char_count == 0 {
            return Some(0);
        }

        let Some(bounds) = &self.log2 else {
            let bits_per_char = self.base.trailing_zeros() as u128;
            return usize::try_from((char_count as u128 * bits_per_char).div_ceil(8)).ok();
        };

        let chars = BigUint::from(char_count);
        let scale = BigUint::one() << (LOG2_FRACTION_BITS + 3);
        let fewest = div_ceil(&(&chars * &bounds.lower), &scale);
        let most = div_ceil(&(&chars * &bounds.upper), &scale);

        let bytes = if fewest == most {
            fewest
        } else {
            trace!(base = self.base, char_count, "settling byte count exactly");
            self.exact_byte_count(char_count, most)
        };
        bytes.to_usize()
    }

    /// # Panics
    ///
    /// Panics if the count overflows `usize`.
    pub fn max_char_count(&self, byte_count: usize) -> usize {
        self.checked_max_char_count(byte_count).unwrap_or_else(|| {
            panic!(
                "max_char_count({}) overflows usize for base {}",
                byte_count, self.base
            )
        })
    }

    /// # Panics
    ///
    /// Panics if the count overflows `usize`.
    pub fn max_byte_count(&self, char_count: usize) -> usize {
        self.checked_max_byte_count(char_count).unwrap_or_else(|| {
            panic!(
                "max_byte_count({}) overflows usize for base {}",
                char_count, self.base
            )
        })
    }

    /// Least `k` in `[fewest, most]` with `B^k >= 2^(8n)`.
    fn exact_char_count(&self, byte_count: usize, fewest: BigUint, most: BigUint) -> BigUint {
        let (Some(mut lo), Some(mut hi)) = (fewest.to_u32(), most.to_u32()) else {
            // Far beyond any materializable buffer; `most` is still sufficient.
            return most;
        };
        let base = BigUint::from(self.base);
        let target_bits = byte_count as u64 * 8 + 1;

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if base.pow(mid).bits() >= target_bits {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        BigUint::from(lo)
    }

    /// `ceil(bits(B^c - 1) / 8)`, the byte length of the largest `c`-digit value.
    fn exact_byte_count(&self, char_count: usize, most: BigUint) -> BigUint {
        let Ok(exponent) = u32::try_from(char_count) else {
            return most;
        };
        let largest = BigUint::from(self.base).pow(exponent) - 1u32;
        BigUint::from(largest.bits().div_ceil(8))
    }
}

/// Symbols a base-`base` string needs for any `byte_count`-byte buffer.
///
/// # Panics
///
/// Panics if `base < 2` or the count overflows `usize`.
pub fn max_char_count(base: usize, byte_count: usize) -> usize {
    SizeModel::new(base).max_char_count(byte_count)
}

/// Bytes a buffer needs for any `char_count`-symbol base-`base` string.
///
/// # Panics
///
/// Panics if `base < 2` or the count overflows `usize`.
pub fn max_byte_count(base: usize, char_count: usize) -> usize {
    SizeModel::new(base).max_byte_count(char_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Definition-level answers, by brute force over powers.
    fn brute_char_count(base: usize, byte_count: usize) -> usize {
        let limit = BigUint::one() << (byte_count * 8);
        let base = BigUint::from(base);
        let mut k = 0;
        let mut power = BigUint::one();
        while power < limit {
            power *= &base;
            k += 1;
        }
        k
    }

    fn brute_byte_count(base: usize, char_count: usize) -> usize {
        let power = BigUint::from(base).pow(char_count as u32);
        let mut m = 0;
        let mut capacity = BigUint::one();
        while capacity < power {
            capacity <<= 8;
            m += 1;
        }
        m
    }

    #[test]
    fn test_log2_bounds_enclose() {
        for base in [3usize, 10, 58, 85, 1000, 0x10FFFF] {
            let bounds = Log2Bounds::of(base);
            assert!(bounds.lower < bounds.upper);
            let scale = (LOG2_FRACTION_BITS as f64).exp2();
            let lower = bounds.lower.to_f64().unwrap() / scale;
            let upper = bounds.upper.to_f64().unwrap() / scale;
            let reference = (base as f64).log2();
            assert!((lower - reference).abs() < 1e-12, "base {}", base);
            assert!((upper - reference).abs() < 1e-12, "base {}", base);
        }
    }

    #[test]
    fn test_log2_bounds_are_tight() {
        let bounds = Log2Bounds::of(10);
        let width = &bounds.upper - &bounds.lower;
        assert!(width.bits() <= 32, "interval unexpectedly wide");
    }

    #[test]
    fn test_matches_brute_force() {
        for base in [2usize, 3, 7, 8, 10, 16, 32, 36, 58, 64, 85, 255, 256, 1000] {
            let model = SizeModel::new(base);
            for n in 0..=80 {
                assert_eq!(
                    model.max_char_count(n),
                    brute_char_count(base, n),
                    "max_char_count base {} n {}",
                    base,
                    n
                );
                assert_eq!(
                    model.max_byte_count(n),
                    brute_byte_count(base, n),
                    "max_byte_count base {} n {}",
                    base,
                    n
                );
            }
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(max_char_count(2, 1), 8);
        assert_eq!(max_char_count(16, 2), 4);
        assert_eq!(max_char_count(10, 1), 3);
        assert_eq!(max_char_count(10, 16), 39);
        assert_eq!(max_char_count(58, 32), 44);
        assert_eq!(max_char_count(64, 3), 4);
        assert_eq!(max_byte_count(10, 3), 2);
        assert_eq!(max_byte_count(64, 2), 2);
        assert_eq!(max_byte_count(32, 8), 5);
    }

    #[test]
    fn test_overflow_is_reported() {
        let binary = SizeModel::new(2);
        assert_eq!(binary.checked_max_char_count(usize::MAX), None);
        assert_eq!(binary.checked_max_byte_count(usize::MAX), Some(usize::MAX / 8 + 1));

        let decimal = SizeModel::new(10);
        assert_eq!(decimal.checked_max_char_count(usize::MAX), None);
        assert!(decimal.checked_max_byte_count(usize::MAX).is_some());

        let wide = SizeModel::new(0x10FFFF);
        assert!(wide.checked_max_char_count(usize::MAX).is_some());
        assert_eq!(wide.checked_max_byte_count(usize::MAX), None);
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn test_unchecked_panics_on_overflow() {
        SizeModel::new(2).max_char_count(usize::MAX);
    }

    #[test]
    fn test_preserves_length() {
        assert!(SizeModel::new(2).preserves_length());
        assert!(SizeModel::new(4).preserves_length());
        assert!(SizeModel::new(16).preserves_length());
        assert!(SizeModel::new(256).preserves_length());
        assert!(!SizeModel::new(8).preserves_length());
        assert!(!SizeModel::new(32).preserves_length());
        assert!(!SizeModel::new(64).preserves_length());
        assert!(!SizeModel::new(10).preserves_length());
    }
}
