//! Dataset access for quicklook sampling
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod catalog;
mod error;
mod field;
mod io;
mod loader;
mod memory;
mod traits;

// Inline anything important for a nice public API
#[doc(inline)]
pub use traits::{Dataset, Loader, Region, UniformGrid};

#[doc(inline)]
pub use field::{Extrema, Field};

#[doc(inline)]
pub use memory::{FieldData, MemoryDataset};

#[doc(inline)]
pub use io::{read_dataset_file, write_dataset_file};

#[doc(inline)]
pub use catalog::{SampleBuilder, SampleCatalog, SAMPLE_DIR_ENV};

#[doc(inline)]
pub use loader::FileLoader;

#[doc(inline)]
pub use error::{Error, Result};
