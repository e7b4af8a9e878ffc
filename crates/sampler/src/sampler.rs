//! The sample -> extrema -> cast pipeline

// standard library
use std::collections::BTreeMap;
use std::path::PathBuf;

// crate modules
use crate::array::SampledArray;
use crate::config::{SamplerConfig, StorageDtype};
use crate::error::{Error, Result};
use crate::field_map::FieldKeyMap;
use crate::grid::{GridSampler, ResamplingStrategy};
use crate::metadata::Metadata;
use crate::writer;

// quicklook modules
use quicklook_dataset::{Dataset, Field, Loader};
use quicklook_utils::ValueExt;

// external crates
use indexmap::IndexMap;
use log::{debug, info};

/// Samples a single dataset with one [ResamplingStrategy]
///
/// A sampler holds only configuration. Every call to [Sampler::sample()]
/// starts from scratch and returns a fresh [Sample], so repeated calls give
/// identical results for a deterministic dataset.
///
/// ```rust
/// # use quicklook_sampler::{Sampler, SamplerConfig};
/// # use quicklook_dataset::{Field, FileLoader};
/// let config = SamplerConfig::builder("toy_dataset", "/tmp/quicklook")
///     .resolution([4, 4, 4])
///     .fields(vec![Field::new("gas", "density")])
///     .build();
///
/// let sampler = Sampler::grid(config);
/// let sample = sampler.sample(&FileLoader::default()).unwrap();
///
/// assert_eq!(sample.field_extrema[&0], [2.0, 2.0]);
/// assert_eq!(sample.field_units[&0], "g/cm**3");
/// ```
#[derive(Debug)]
pub struct Sampler {
    config: SamplerConfig,
    key_map: FieldKeyMap,
    strategy: Box<dyn ResamplingStrategy>,
}

impl Sampler {
    /// New sampler, no I/O is done until sampling
    pub fn new(config: SamplerConfig, strategy: Box<dyn ResamplingStrategy>) -> Self {
        let key_map = FieldKeyMap::from_fields(&config.fields);
        Self {
            config,
            key_map,
            strategy,
        }
    }

    /// New sampler using the [GridSampler] strategy
    pub fn grid(config: SamplerConfig) -> Self {
        Self::new(config, Box::new(GridSampler))
    }

    /// Configuration this sampler was built with
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Field index lookup for the configured fields
    pub fn key_map(&self) -> &FieldKeyMap {
        &self.key_map
    }

    /// Name of the resampling strategy
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Open the dataset, as a path first and a named sample second
    ///
    /// Only a path that does not exist, or exists but is not a recognised
    /// dataset, falls back to the named samples. Any other failure on the path
    /// is returned immediately. If the named sample also fails that error is
    /// returned instead.
    pub fn load_dataset(&self, loader: &dyn Loader) -> Result<Box<dyn Dataset>> {
        let identifier = &self.config.sample_name;

        match loader.open(identifier) {
            Ok(dataset) => Ok(dataset),
            Err(e) if e.is_unidentified() => {
                info!("\"{identifier}\" is not a dataset path, trying sample datasets");
                debug!("path load failed: {e}");
                Ok(loader.open_named_sample(identifier)?)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Run the full pipeline for the configured dataset
    ///
    /// 1. load the dataset
    /// 2. resample every field with the strategy
    /// 3. compute extrema and units over the entire dataset
    /// 4. cast every sampled array to the storage precision
    pub fn sample(&self, loader: &dyn Loader) -> Result<Sample> {
        info!(
            "sampling \"{}\" with the {} strategy",
            self.config.sample_name,
            self.strategy.name()
        );

        let dataset = self.load_dataset(loader)?;
        debug!("loaded dataset \"{}\"", dataset.name());

        let resampled = self
            .strategy
            .create_resampled_view(dataset.as_ref(), &self.config)?;

        if let Some(missing) = self
            .config
            .fields
            .iter()
            .find(|field| !resampled.contains_key(*field))
        {
            return Err(Error::MissingSampledField(missing.clone()));
        }

        let (field_extrema, field_units) = self.compute_extrema(dataset.as_ref())?;

        let dtype: StorageDtype = self.config.storage_dtype.parse()?;
        let values: IndexMap<Field, SampledArray> = resampled
            .iter()
            .map(|(field, raw)| (field.clone(), SampledArray::cast(raw, dtype)))
            .collect();
        debug!("cast {} arrays to {dtype}", values.len());

        Ok(Sample {
            config: self.config.clone(),
            key_map: self.key_map.clone(),
            values,
            field_extrema,
            field_units,
        })
    }

    /// Extrema and units of every field over the full dataset, by field index
    fn compute_extrema(
        &self,
        dataset: &dyn Dataset,
    ) -> Result<(BTreeMap<usize, [f64; 2]>, BTreeMap<usize, String>)> {
        let extrema = dataset.select_all().extrema(&self.config.fields)?;

        if extrema.len() != self.key_map.len() {
            return Err(Error::UnexpectedExtremaCount {
                expected: self.key_map.len(),
                found: extrema.len(),
            });
        }

        let mut field_extrema = BTreeMap::new();
        let mut field_units = BTreeMap::new();
        for ((index, field), extrema) in self.key_map.iter().zip(extrema) {
            debug!("{field} extrema {extrema}");
            field_extrema.insert(index, extrema.values());
            field_units.insert(index, extrema.units);
        }

        Ok((field_extrema, field_units))
    }
}

/// The result of sampling a dataset
///
/// Every configured field is present in `values`, `field_extrema`, and
/// `field_units`, and every array has shape equal to the resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Configuration the sample was taken with
    pub config: SamplerConfig,
    /// Field index lookup
    pub key_map: FieldKeyMap,
    /// Sampled arrays at storage precision, in configured order
    pub values: IndexMap<Field, SampledArray>,
    /// Global `[min, max]` for each field index
    pub field_extrema: BTreeMap<usize, [f64; 2]>,
    /// Unit string for each field index
    pub field_units: BTreeMap<usize, String>,
}

impl Sample {
    /// Metadata record for the current state of the sample
    pub fn metadata(&self) -> Metadata {
        Metadata {
            field_extrema: self.field_extrema.clone(),
            field_units: self.field_units.clone(),
            sample_name: self.config.sample_name.clone(),
            resolution: self.config.resolution,
            storage_dtype: self.config.storage_dtype.clone(),
            fields: self.config.fields.clone(),
            field_key_map: self.key_map.clone(),
        }
    }

    /// Directory the sample is written to
    pub fn output_dir(&self) -> PathBuf {
        self.config.output_dir()
    }

    /// Write metadata and arrays, returning the output directory
    ///
    /// See [write_sample()](crate::write_sample) for the layout.
    pub fn write(&self) -> Result<PathBuf> {
        writer::write_sample(self)
    }
}

impl std::fmt::Display for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Sample \"{}\" {{", self.config.sample_name)?;
        writeln!(f, "    resolution: {:?}", self.config.resolution)?;
        writeln!(f, "    storage dtype: {}", self.config.storage_dtype)?;
        for (index, field) in self.key_map.iter() {
            let [min, max] = self.field_extrema.get(&index).copied().unwrap_or_default();
            let units = self.field_units.get(&index).map_or("", |u| u.as_str());
            writeln!(
                f,
                "    [{index}] {field}: {} to {} {units}",
                min.sci(5, 2),
                max.sci(5, 2)
            )?;
        }
        write!(f, "}}")
    }
}
