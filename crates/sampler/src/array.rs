//! Sampled arrays at their storage precision

// crate modules
use crate::config::StorageDtype;

// external crates
use ndarray::Array3;

/// A sampled field grid, stored at either 32 or 64-bit precision
///
/// ```rust
/// # use quicklook_sampler::{SampledArray, StorageDtype};
/// # use ndarray::Array3;
/// let values = Array3::<f64>::from_elem((2, 3, 4), 0.1);
/// let array = SampledArray::cast(&values, StorageDtype::Float32);
///
/// assert_eq!(array.dtype(), StorageDtype::Float32);
/// assert_eq!(array.shape(), [2, 3, 4]);
/// assert_eq!(array.len(), 24);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SampledArray {
    /// Values stored as `f32`
    Float32(Array3<f32>),
    /// Values stored as `f64`
    Float64(Array3<f64>),
}

impl SampledArray {
    /// Convert raw sampled values to a storage precision
    pub fn cast(values: &Array3<f64>, dtype: StorageDtype) -> Self {
        match dtype {
            StorageDtype::Float32 => Self::Float32(values.mapv(|v| v as f32)),
            StorageDtype::Float64 => Self::Float64(values.clone()),
        }
    }

    /// Storage precision of the values
    pub fn dtype(&self) -> StorageDtype {
        match self {
            Self::Float32(_) => StorageDtype::Float32,
            Self::Float64(_) => StorageDtype::Float64,
        }
    }

    /// Number of cells along x, y, and z
    pub fn shape(&self) -> [usize; 3] {
        let (nx, ny, nz) = match self {
            Self::Float32(a) => a.dim(),
            Self::Float64(a) => a.dim(),
        };
        [nx, ny, nz]
    }

    /// Total number of values
    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    /// True if any dimension is zero
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values widened to `f64`
    pub fn to_f64(&self) -> Array3<f64> {
        match self {
            Self::Float32(a) => a.mapv(f64::from),
            Self::Float64(a) => a.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float32_rounds_values() {
        let values = Array3::from_elem((1, 1, 1), 0.1_f64);
        let array = SampledArray::cast(&values, StorageDtype::Float32);

        let widened = array.to_f64()[[0, 0, 0]];
        assert_ne!(widened, 0.1);
        assert!((widened - 0.1).abs() < 1e-7);
    }

    #[test]
    fn float64_is_unchanged() {
        let values = Array3::from_shape_fn((2, 2, 2), |(i, j, k)| (i + 2 * j + 4 * k) as f64);
        let array = SampledArray::cast(&values, StorageDtype::Float64);
        assert_eq!(array.to_f64(), values);
    }

    #[test]
    fn empty_array() {
        let values = Array3::<f64>::zeros((0, 4, 4));
        let array = SampledArray::cast(&values, StorageDtype::Float32);
        assert!(array.is_empty());
        assert_eq!(array.shape(), [0, 4, 4]);
    }
}
