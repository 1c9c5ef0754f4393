use crate::r#type::IndexableNum;

/// Widen a coordinate to `f64`.
///
/// Every [`IndexableNum`] fits into `f64` exactly, so the fallback is never hit in practice.
#[inline]
pub(crate) fn to_f64<N: IndexableNum>(value: N) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// The median of a sorted run of values.
///
/// For an even number of values this is the mean of the two middle ones; for an odd number it is
/// the middle value itself.
#[inline]
pub(crate) fn median_of_sorted(lower_middle: f64, upper_middle: f64, len: usize) -> f64 {
    if len % 2 == 0 {
        // Halve before adding so that large magnitudes cannot overflow to infinity
        lower_middle / 2.0 + upper_middle / 2.0
    } else {
        upper_middle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_even_is_mean_of_middle_values() {
        assert_eq!(median_of_sorted(1.0, 2.0, 4), 1.5);
        assert_eq!(median_of_sorted(f64::MAX, f64::MAX, 2), f64::MAX);
    }

    #[test]
    fn median_odd_is_middle_value() {
        assert_eq!(median_of_sorted(1.0, 2.0, 3), 2.0);
    }

    #[test]
    fn integer_coords_widen_exactly() {
        assert_eq!(to_f64(u32::MAX), 4294967295.0);
        assert_eq!(to_f64(-7i8), -7.0);
    }
}
