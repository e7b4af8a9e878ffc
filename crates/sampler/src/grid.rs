//! Resampling strategies

// crate modules
use crate::config::SamplerConfig;
use crate::error::{Error, Result};

// quicklook modules
use quicklook_dataset::{Dataset, Field};

// external crates
use indexmap::IndexMap;
use log::debug;
use ndarray::Array3;

/// Raw resampled values for each field, in configured order
pub type ResampledValues = IndexMap<Field, Array3<f64>>;

/// How a dataset is turned into regular arrays
///
/// Implementations must return an array for every configured field. Extrema
/// and units are not their concern, these are always taken from the full
/// dataset by the [Sampler](crate::Sampler).
pub trait ResamplingStrategy: std::fmt::Debug {
    /// Short name used in logs and registry checks
    fn name(&self) -> &'static str;

    /// Sample every configured field from an opened dataset
    fn create_resampled_view(
        &self,
        dataset: &dyn Dataset,
        config: &SamplerConfig,
    ) -> Result<ResampledValues>;
}

/// Samples fields on a uniform grid spanning the full domain
///
/// The grid has `resolution` cells along each axis between the domain edges
/// reported by the dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridSampler;

impl GridSampler {
    /// Name reported by [ResamplingStrategy::name]
    pub const NAME: &'static str = "grid";
}

impl ResamplingStrategy for GridSampler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn create_resampled_view(
        &self,
        dataset: &dyn Dataset,
        config: &SamplerConfig,
    ) -> Result<ResampledValues> {
        let left = dataset.domain_left_edge();
        let right = dataset.domain_right_edge();
        debug!(
            "uniform {:?} grid from {:?} to {:?} {}",
            config.resolution,
            left.as_slice(),
            right.as_slice(),
            dataset.length_units()
        );

        let grid = dataset.uniform_grid(left, right, config.resolution)?;

        let mut values = ResampledValues::with_capacity(config.fields.len());
        for field in &config.fields {
            let array = grid.field(field)?;

            if array.shape() != &config.resolution[..] {
                return Err(Error::UnexpectedShape {
                    field: field.clone(),
                    expected: config.resolution,
                    found: array.shape().to_vec(),
                });
            }

            values.insert(field.clone(), array);
        }

        Ok(values)
    }
}
