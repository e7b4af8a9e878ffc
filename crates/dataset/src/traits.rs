//! Interfaces a data engine implements to be sampled
//!
//! Samplers only ever talk to datasets through these traits. The engine may be
//! the in-memory [MemoryDataset](crate::MemoryDataset), or anything wrapping a
//! real simulation reader.
//!
//! All calls are blocking, and may do significant I/O or computation.

// crate modules
use crate::error::Result;
use crate::field::{Extrema, Field};

// external crates
use nalgebra::Vector3;
use ndarray::Array3;

/// An opened simulation dataset
pub trait Dataset: std::fmt::Debug {
    /// Name used in log messages
    fn name(&self) -> &str;

    /// Lower corner of the full spatial domain
    fn domain_left_edge(&self) -> Vector3<f64>;

    /// Upper corner of the full spatial domain
    fn domain_right_edge(&self) -> Vector3<f64>;

    /// Units of the domain edges, e.g. "cm"
    fn length_units(&self) -> &str;

    /// Select every cell of the dataset
    fn select_all(&self) -> Box<dyn Region + '_>;

    /// Axis-aligned uniform grid between `left` and `right`
    ///
    /// `dimensions` are the number of cells along x, y, and z.
    fn uniform_grid(
        &self,
        left: Vector3<f64>,
        right: Vector3<f64>,
        dimensions: [usize; 3],
    ) -> Result<Box<dyn UniformGrid + '_>>;
}

/// A selection of cells from a [Dataset]
pub trait Region {
    /// Global `[min, max]` of each field, in the order requested
    ///
    /// Fails on the first field not present in the dataset.
    fn extrema(&self, fields: &[Field]) -> Result<Vec<Extrema>>;
}

/// A uniform grid view over a [Dataset]
pub trait UniformGrid {
    /// Number of cells along x, y, and z
    fn dimensions(&self) -> [usize; 3];

    /// Unit-stripped field values with shape equal to [UniformGrid::dimensions]
    fn field(&self, field: &Field) -> Result<Array3<f64>>;
}

/// Resolves dataset identifiers to opened datasets
pub trait Loader {
    /// Open the identifier as a path
    ///
    /// Fails with [Error::NotFound](crate::Error::NotFound) if nothing exists
    /// at the path, or [Error::UnrecognizedFormat](crate::Error::UnrecognizedFormat)
    /// if it is not a readable dataset.
    fn open(&self, identifier: &str) -> Result<Box<dyn Dataset>>;

    /// Open the identifier as the name of a known sample dataset
    fn open_named_sample(&self, identifier: &str) -> Result<Box<dyn Dataset>>;
}
