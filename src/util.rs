//! Miscellaneous utilities.

/// Clamps `val` to the `[low, high]` range.
///
/// Unlike `f64::clamp` this never panics, and a NaN passes through unchanged.
pub fn clamp<T: PartialOrd>(val: T, low: T, high: T) -> T {
    if val < low {
        return low;
    }

    if val > high {
        return high;
    }

    val
}

/// Implements `Default` for an enum by naming its default variant.
#[macro_export]
macro_rules! enum_default {
    ($enum:ident, $variant:expr) => {
        impl Default for $enum {
            #[inline]
            fn default() -> $enum {
                $variant
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_range() {
        assert_eq!(clamp(-0.5, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
        assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
    }

    #[test]
    fn nan_passes_through() {
        assert!(clamp(f64::NAN, 0.0, 1.0).is_nan());
    }
}
