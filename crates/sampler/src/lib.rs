//! Sample datasets onto uniform grids for quicklook inspection
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod array;
mod config;
mod error;
mod field_map;
mod grid;
mod metadata;
mod reader;
mod registry;
mod sampler;
mod writer;

// standard library
use std::path::Path;

// quicklook modules
use quicklook_dataset::{FileLoader, Loader};

// external crates
use log::info;

// Inline anything important for a nice public API
#[doc(inline)]
pub use config::{
    default_fields, SamplerConfig, SamplerConfigBuilder, StorageDtype, DEFAULT_RESOLUTION,
    DEFAULT_STORAGE_DTYPE,
};

#[doc(inline)]
pub use field_map::FieldKeyMap;

#[doc(inline)]
pub use array::SampledArray;

#[doc(inline)]
pub use grid::{GridSampler, ResampledValues, ResamplingStrategy};

#[doc(inline)]
pub use sampler::{Sample, Sampler};

#[doc(inline)]
pub use metadata::Metadata;

#[doc(inline)]
pub use registry::{samplers, SamplerRegistry, StrategyFactory};

#[doc(inline)]
pub use writer::{field_file_name, write_metadata, write_npy, write_sample, METADATA_FILE};

#[doc(inline)]
pub use reader::{read_field, read_field_in, read_metadata};

#[doc(inline)]
pub use error::{Error, Result};

/// Sample a dataset with default settings and write it to `output_dir`
///
/// The strategy comes from the process-wide [samplers()] registry, and the
/// dataset is opened with a [FileLoader] using any sample directory set in the
/// environment.
///
/// Outputs are written to `output_dir/sample`.
///
/// ```rust, no_run
/// # use quicklook_sampler::sample_a_ds;
/// sample_a_ds("toy_dataset", "./quicklook").unwrap();
/// ```
pub fn sample_a_ds<P: AsRef<Path>>(sample: &str, output_dir: P) -> Result<()> {
    sample_a_ds_with(&FileLoader::from_env(), samplers(), sample, output_dir)
}

/// [sample_a_ds()] with an explicit loader and registry
pub fn sample_a_ds_with<P: AsRef<Path>>(
    loader: &dyn Loader,
    registry: &SamplerRegistry,
    sample: &str,
    output_dir: P,
) -> Result<()> {
    let config = SamplerConfig::new(sample, output_dir.as_ref());
    let sampler = registry.build(config);

    let result = sampler.sample(loader)?;
    let written = result.write()?;
    info!("wrote \"{sample}\" quicklook to {written:?}");
    Ok(())
}
