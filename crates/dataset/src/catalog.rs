//! Named sample datasets

// standard library
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// crate modules
use crate::error::{Error, Result};
use crate::field::Field;
use crate::io::read_dataset_file;
use crate::memory::MemoryDataset;

// quicklook modules
use quicklook_utils::f;

// external crates
use log::debug;

/// Environment variable naming a directory of sample dataset files
pub const SAMPLE_DIR_ENV: &str = "QUICKLOOK_SAMPLE_DIR";

/// Function building a bundled sample dataset on demand
pub type SampleBuilder = fn() -> MemoryDataset;

/// Collection of datasets that can be opened by name alone
///
/// Names resolve in two stages:
/// - Bundled samples built in code (see [SampleCatalog::default()])
/// - `<sample_dir>/<name>.json` dataset files, if a sample directory is set
///
/// ```rust
/// # use quicklook_dataset::SampleCatalog;
/// let catalog = SampleCatalog::default();
/// let dataset = catalog.load("toy_dataset").unwrap();
/// assert_eq!(dataset.name, "toy_dataset");
///
/// assert!(catalog.load("not_a_sample").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SampleCatalog {
    bundled: BTreeMap<String, SampleBuilder>,
    sample_dir: Option<PathBuf>,
}

impl SampleCatalog {
    /// A catalog with nothing in it
    pub fn empty() -> Self {
        Self {
            bundled: BTreeMap::new(),
            sample_dir: None,
        }
    }

    /// Bundled samples plus the directory named by [SAMPLE_DIR_ENV], if set
    pub fn from_env() -> Self {
        match std::env::var_os(SAMPLE_DIR_ENV) {
            Some(dir) => Self::default().with_sample_dir(dir),
            None => Self::default(),
        }
    }

    /// Look for `<dir>/<name>.json` when a name is not bundled
    pub fn with_sample_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.sample_dir = Some(dir.into());
        self
    }

    /// Register a bundled sample, replacing any of the same name
    pub fn register(&mut self, name: impl Into<String>, builder: SampleBuilder) {
        self.bundled.insert(name.into(), builder);
    }

    /// Names of all bundled samples, sorted
    pub fn bundled_names(&self) -> Vec<&str> {
        self.bundled.keys().map(|k| k.as_str()).collect()
    }

    /// Directory searched for sample files
    pub fn sample_dir(&self) -> Option<&Path> {
        self.sample_dir.as_deref()
    }

    /// Build or read the sample dataset called `name`
    pub fn load(&self, name: &str) -> Result<MemoryDataset> {
        if let Some(builder) = self.bundled.get(name) {
            debug!("building bundled sample \"{name}\"");
            return Ok(builder());
        }

        if let Some(dir) = &self.sample_dir {
            let path = dir.join(f!("{name}.json"));
            if path.is_file() {
                debug!("reading sample \"{name}\" from {path:?}");
                let mut dataset = read_dataset_file(&path)?;
                dataset.name = name.to_string();
                return Ok(dataset);
            }
        }

        Err(Error::DatasetNotIdentified(name.to_string()))
    }
}

impl Default for SampleCatalog {
    /// Catalog of the bundled analytic samples
    ///
    /// | Name          | Fields                          | Notes                       |
    /// | ------------- | ------------------------------- | --------------------------- |
    /// | `toy_dataset` | gas density, gas temperature    | constant 2.0 and 1.0e4      |
    /// | `linear_ramp` | gas density, gas temperature    | density = 1 + 9x along x    |
    fn default() -> Self {
        let mut catalog = Self::empty();
        catalog.register("toy_dataset", toy_dataset);
        catalog.register("linear_ramp", linear_ramp);
        catalog
    }
}

/// Unit cube with uniform gas density and temperature
fn toy_dataset() -> MemoryDataset {
    MemoryDataset::new("toy_dataset", [0.0; 3], [1.0; 3], [8, 8, 8])
        .with_length_units("cm")
        .with_constant_field(Field::new("gas", "density"), "g/cm**3", 2.0)
        .with_constant_field(Field::new("gas", "temperature"), "K", 1.0e4)
}

/// Unit cube with gas density rising linearly along x
fn linear_ramp() -> MemoryDataset {
    MemoryDataset::new("linear_ramp", [0.0; 3], [1.0; 3], [16, 4, 4])
        .with_length_units("cm")
        .with_field_fn(Field::new("gas", "density"), "g/cm**3", |x| {
            1.0 + 9.0 * x[0]
        })
        .with_field_fn(Field::new("gas", "temperature"), "K", |x| {
            1.0e4 * (1.0 + x[1] + x[2])
        })
}
