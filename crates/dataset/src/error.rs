//! Result and Error types for the dataset module

// standard library
use std::path::PathBuf;

// crate modules
use crate::field::Field;

/// Type alias for `Result<T, dataset::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `quicklook-dataset`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Failure to (de)serialise JSON
    #[error("failed serde JSON operation")]
    Json(#[from] serde_json::Error),

    /// Failure in float slice operations
    #[error("failed slice operation: {0}")]
    Utils(#[from] quicklook_utils::Error),

    /// Nothing exists at the path given
    #[error("no dataset found at {0:?}")]
    NotFound(PathBuf),

    /// Something exists at the path but is not a readable dataset
    #[error("unrecognised dataset format at {path:?} ({reason})")]
    UnrecognizedFormat { path: PathBuf, reason: String },

    /// Identifier is neither a dataset path nor a known sample name
    #[error("dataset \"{0}\" not identified as a path or sample name")]
    DatasetNotIdentified(String),

    /// Requested field does not exist in the dataset
    #[error("field {0} not found in dataset")]
    FieldNotFound(Field),

    /// Field values do not match the number of cells
    #[error("inconsistent data length for {field} (expected {expected:?}, found {found:?})")]
    InvalidFieldData {
        field: Field,
        expected: usize,
        found: usize,
    },

    /// Domain edges or cell counts that can not describe a mesh
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// Grid request that can not be evaluated
    #[error("invalid grid request: {0}")]
    InvalidGrid(String),
}

impl Error {
    /// True for failures where the identifier simply was not a dataset path
    ///
    /// Only [Error::NotFound] and [Error::UnrecognizedFormat] qualify, so
    /// anything else (permissions, bad data in a recognised file) is never
    /// mistaken for a sample name.
    pub fn is_unidentified(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::UnrecognizedFormat { .. })
    }
}
