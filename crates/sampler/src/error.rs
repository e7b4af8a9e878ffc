//! Result and Error types for the sampler module

// quicklook modules
use quicklook_dataset::Field;

/// Type alias for `Result<T, sampler::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `quicklook-sampler`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Failure to (de)serialise JSON
    #[error("failed serde JSON operation")]
    Json(#[from] serde_json::Error),

    /// Failure raised by the dataset engine, passed through untouched
    #[error(transparent)]
    Dataset(#[from] quicklook_dataset::Error),

    /// Array data that does not fit the expected shape
    #[error("failed to shape array data")]
    Shape(#[from] ndarray::ShapeError),

    /// Storage precision name that is not a supported float type
    #[error("unsupported storage dtype \"{0}\"")]
    UnsupportedDtype(String),

    /// Resampled field with a shape other than the resolution
    #[error("unexpected shape for {field} (expected {expected:?}, found {found:?})")]
    UnexpectedShape {
        field: Field,
        expected: [usize; 3],
        found: Vec<usize>,
    },

    /// Resampling strategy did not produce a configured field
    #[error("no sampled values for {0}")]
    MissingSampledField(Field),

    /// Dataset returned extrema for a different number of fields
    #[error("inconsistent number of extrema (expected {expected:?}, found {found:?})")]
    UnexpectedExtremaCount { expected: usize, found: usize },

    /// An `.npy` file that does not hold a float32/float64 array
    #[error("unsupported npy dtype {0}")]
    UnsupportedNpyDtype(String),

    /// An `.npy` file that does not hold a 3D array
    #[error("expected a 3D array, found {0} dimensions")]
    UnexpectedNpyDimensions(usize),
}
