use crate::error::{Error, Result};

/// Extends functionality for slices of float arrays
pub trait SliceExt<T> {
    /// Find the minimum value in float arrays
    ///
    /// Only provides the minimum value from a collection of valid numbers. Any
    /// NAN values, infinite values, or empty slices will return an error.
    ///
    /// ```rust
    /// # use quicklook_utils::SliceExt;
    /// # use quicklook_utils::Error;
    /// // Successful cases
    /// assert_eq!([1.1, 0.5, 2.2].try_min(), Ok(0.5));
    /// assert_eq!([1.1, f32::MIN, 2.2].try_min(), Ok(f32::MIN));
    ///
    /// // Error cases
    /// assert_eq!([1.1, f32::NAN, 2.2].try_min(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!([1.1, f32::INFINITY, 2.2].try_min(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!(Vec::<f32>::new().try_min(), Err(Error::SliceContainsNoValues));
    /// ```
    ///
    /// The float primitives (`f32`/`f64`) do not implement `Ord` due to `NaN`
    /// being incomparable, so this uses `total_cmp` for the IEEE 754
    /// totalOrder predicate.
    fn try_min(&self) -> Result<T>;

    /// Find the maximum value in float arrays
    ///
    /// Only provides the maximum value from a collection of valid numbers. Any
    /// NAN values, infinite values, or empty slices will return an error.
    ///
    /// ```rust
    /// # use quicklook_utils::SliceExt;
    /// # use quicklook_utils::Error;
    /// // Successful cases
    /// assert_eq!([1.1, 0.5, 2.2].try_max(), Ok(2.2));
    /// assert_eq!([1.1, f64::MAX, 2.2].try_max(), Ok(f64::MAX));
    ///
    /// // Error cases
    /// assert_eq!([1.1, f64::NAN, 2.2].try_max(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!(Vec::<f64>::new().try_max(), Err(Error::SliceContainsNoValues));
    /// ```
    fn try_max(&self) -> Result<T>;

    /// Find index bin containing 'value', where bins are low <= value < high
    ///
    /// A value on a bin edge returns the bin above. Values equal to the highest
    /// bound are considered part of the last bin, so every point of a closed
    /// domain maps to a cell.
    ///
    /// Bin edges must be in ascending order.
    ///
    /// ```text
    ///     edges: 0.0 0.25 0.5 1.0
    ///
    ///     0.00 <= bin 0 <  0.25
    ///     0.25 <= bin 1 <  0.50
    ///     0.50 <= bin 2 <= 1.00
    /// ```
    ///
    /// ```rust
    /// # use quicklook_utils::SliceExt;
    /// let edges = vec![0.0, 0.25, 0.5, 1.0];
    ///
    /// // Find values in the array
    /// assert_eq!(edges.find_bin_exclusive(0.0), Ok(0));
    /// assert_eq!(edges.find_bin_exclusive(0.1), Ok(0));
    /// assert_eq!(edges.find_bin_exclusive(0.25), Ok(1));
    /// assert_eq!(edges.find_bin_exclusive(1.0), Ok(2));
    ///
    /// // Values outside the bin bounds are an error case
    /// assert!(edges.find_bin_exclusive(-0.1).is_err());
    /// assert!(edges.find_bin_exclusive(1.1).is_err());
    /// ```
    fn find_bin_exclusive(&self, value: T) -> Result<usize>;
}

macro_rules! impl_slice_ext {
    ($t:ty) => {
        impl SliceExt<$t> for [$t] {
            fn try_min(&self) -> Result<$t> {
                if self.iter().any(|v| !v.is_finite()) {
                    return Err(Error::SliceContainsUndefinedValues);
                };

                self.iter()
                    .min_by(|a, b| a.total_cmp(b))
                    .copied()
                    .ok_or(Error::SliceContainsNoValues)
            }

            fn try_max(&self) -> Result<$t> {
                if self.iter().any(|v| !v.is_finite()) {
                    return Err(Error::SliceContainsUndefinedValues);
                };

                self.iter()
                    .max_by(|a, b| a.total_cmp(b))
                    .copied()
                    .ok_or(Error::SliceContainsNoValues)
            }

            fn find_bin_exclusive(&self, value: $t) -> Result<usize> {
                // make sure there are bin edges to check against
                let (lower_bound, upper_bound) = match (self.first(), self.last()) {
                    (Some(low), Some(high)) if self.len() >= 2 => (*low, *high),
                    _ => {
                        return Err(Error::BelowMinimumSliceLength {
                            length: self.len(),
                            minimum_required: 2,
                        })
                    }
                };

                // is the value relevant?
                if value < lower_bound || value > upper_bound || value.is_nan() {
                    return Err(Error::ValueOutsideOfBounds {
                        value: value as f64,
                        lower_bound: lower_bound as f64,
                        upper_bound: upper_bound as f64,
                    });
                }

                // number of edges <= value, the last edge folds into the last bin
                let n_below = self.partition_point(|edge| *edge <= value);
                Ok(n_below.saturating_sub(1).min(self.len() - 2))
            }
        }
    };
}

impl_slice_ext!(f64);
impl_slice_ext!(f32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extrema_of_mixed_values() {
        let values = [3.0, -1.5, 7.25, 0.0];
        assert_eq!(values.try_min(), Ok(-1.5));
        assert_eq!(values.try_max(), Ok(7.25));
    }

    #[test]
    fn extrema_of_single_value() {
        assert_eq!([2.0_f64].try_min(), Ok(2.0));
        assert_eq!([2.0_f64].try_max(), Ok(2.0));
    }

    #[test]
    fn bin_lookup_on_uniform_edges() {
        let edges = [0.0, 1.0, 2.0, 3.0, 4.0];
        assert_eq!(edges.find_bin_exclusive(0.5), Ok(0));
        assert_eq!(edges.find_bin_exclusive(1.0), Ok(1));
        assert_eq!(edges.find_bin_exclusive(3.999), Ok(3));
        assert_eq!(edges.find_bin_exclusive(4.0), Ok(3));
    }

    #[test]
    fn bin_lookup_needs_two_edges() {
        assert_eq!(
            [1.0_f64].find_bin_exclusive(1.0),
            Err(Error::BelowMinimumSliceLength {
                length: 1,
                minimum_required: 2
            })
        );
        assert!(Vec::<f64>::new().find_bin_exclusive(0.0).is_err());
    }

    #[test]
    fn bin_lookup_rejects_nan() {
        assert!([0.0_f64, 1.0].find_bin_exclusive(f64::NAN).is_err());
    }
}
