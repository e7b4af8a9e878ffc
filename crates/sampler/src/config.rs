//! Sampler configuration and storage precision

// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// crate modules
use crate::error::{Error, Result};

// quicklook modules
use quicklook_dataset::Field;

// external crates
use serde::{Deserialize, Serialize};

/// Grid resolution used when none is given
pub const DEFAULT_RESOLUTION: [usize; 3] = [128, 128, 128];

/// Storage precision used when none is given
pub const DEFAULT_STORAGE_DTYPE: &str = "float32";

/// Fields sampled when none are given
pub fn default_fields() -> Vec<Field> {
    vec![Field::new("gas", "density"), Field::new("gas", "temperature")]
}

fn default_resolution() -> [usize; 3] {
    DEFAULT_RESOLUTION
}

fn default_storage_dtype() -> String {
    DEFAULT_STORAGE_DTYPE.to_string()
}

/// Everything needed to sample one dataset
///
/// Nothing is validated on construction. A resolution with zero cells, an
/// empty field list, or an unknown precision name only fails once sampling
/// reaches the step that uses it.
///
/// Configurations can be built in code, with optional values left at their
/// defaults:
///
/// ```rust
/// # use quicklook_sampler::SamplerConfig;
/// # use quicklook_dataset::Field;
/// let config = SamplerConfig::builder("toy_dataset", "/tmp/out")
///     .resolution([4, 4, 4])
///     .fields(vec![Field::new("gas", "density")])
///     .build();
///
/// assert_eq!(config.storage_dtype, "float32");
/// assert_eq!(config.output_dir().to_str(), Some("/tmp/out/toy_dataset"));
/// ```
///
/// or read from JSON, where only `sample_name` and `storage_dir` are required.
///
/// ```rust
/// # use quicklook_sampler::SamplerConfig;
/// let config: SamplerConfig = serde_json::from_str(
///     r#"{"sample_name": "toy_dataset", "storage_dir": "/tmp/out"}"#,
/// ).unwrap();
///
/// assert_eq!(config.resolution, [128, 128, 128]);
/// assert_eq!(config.fields.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Dataset path or sample name
    pub sample_name: String,
    /// Root directory for all quicklook outputs
    pub storage_dir: PathBuf,
    /// Number of grid cells along x, y, and z
    #[serde(default = "default_resolution")]
    pub resolution: [usize; 3],
    /// Fields to sample, in index order
    #[serde(default = "default_fields")]
    pub fields: Vec<Field>,
    /// Float precision name for stored arrays, e.g. "float32"
    #[serde(default = "default_storage_dtype")]
    pub storage_dtype: String,
}

impl SamplerConfig {
    /// Configuration with every optional value at its default
    pub fn new(sample_name: impl Into<String>, storage_dir: impl Into<PathBuf>) -> Self {
        Self::builder(sample_name, storage_dir).build()
    }

    /// Start a [SamplerConfigBuilder]
    pub fn builder(
        sample_name: impl Into<String>,
        storage_dir: impl Into<PathBuf>,
    ) -> SamplerConfigBuilder {
        SamplerConfigBuilder::new(sample_name, storage_dir)
    }

    /// Read a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Directory all outputs are written to, `storage_dir/sample_name`
    ///
    /// This is a plain path join, so an absolute `sample_name` replaces
    /// `storage_dir` entirely. Sampling a dataset file by absolute path
    /// therefore targets the file itself and writing will fail.
    ///
    /// ```rust
    /// # use quicklook_sampler::SamplerConfig;
    /// let config = SamplerConfig::new("/data/run.json", "/tmp/out");
    /// assert_eq!(config.output_dir().to_str(), Some("/data/run.json"));
    /// ```
    pub fn output_dir(&self) -> PathBuf {
        self.storage_dir.join(&self.sample_name)
    }
}

/// Builder implementation for [SamplerConfig]
///
/// Any value not set keeps its default:
///
/// | Value           | Default                                      |
/// | --------------- | -------------------------------------------- |
/// | `resolution`    | `[128, 128, 128]`                            |
/// | `fields`        | `("gas", "density")`, `("gas", "temperature")` |
/// | `storage_dtype` | `"float32"`                                  |
#[derive(Debug, Clone)]
pub struct SamplerConfigBuilder {
    sample_name: String,
    storage_dir: PathBuf,
    resolution: Option<[usize; 3]>,
    fields: Option<Vec<Field>>,
    storage_dtype: Option<String>,
}

impl SamplerConfigBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new(sample_name: impl Into<String>, storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            sample_name: sample_name.into(),
            storage_dir: storage_dir.into(),
            resolution: None,
            fields: None,
            storage_dtype: None,
        }
    }

    /// Build the [SamplerConfig] type
    pub fn build(self) -> SamplerConfig {
        SamplerConfig {
            sample_name: self.sample_name,
            storage_dir: self.storage_dir,
            resolution: self.resolution.unwrap_or(DEFAULT_RESOLUTION),
            fields: self.fields.unwrap_or_else(default_fields),
            storage_dtype: self.storage_dtype.unwrap_or_else(default_storage_dtype),
        }
    }

    /// Number of grid cells along x, y, and z
    pub fn resolution(mut self, resolution: [usize; 3]) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Fields to sample
    pub fn fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Float precision name for stored arrays
    pub fn storage_dtype(mut self, storage_dtype: impl Into<String>) -> Self {
        self.storage_dtype = Some(storage_dtype.into());
        self
    }
}

/// Float precision of stored arrays
///
/// Parsed from the numpy-style names "float32" and "float64".
///
/// ```rust
/// # use quicklook_sampler::StorageDtype;
/// let dtype: StorageDtype = "float64".parse().unwrap();
/// assert_eq!(dtype, StorageDtype::Float64);
/// assert_eq!(dtype.to_string(), "float64");
///
/// assert!("float128".parse::<StorageDtype>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageDtype {
    /// 32-bit IEEE 754 float
    Float32,
    /// 64-bit IEEE 754 float
    Float64,
}

impl StorageDtype {
    /// Numpy-style name, i.e. "float32"
    pub fn name(&self) -> &'static str {
        match self {
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }
}

impl FromStr for StorageDtype {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "float32" | "f4" => Ok(Self::Float32),
            "float64" | "f8" | "float" => Ok(Self::Float64),
            _ => Err(Error::UnsupportedDtype(s.to_string())),
        }
    }
}

impl std::fmt::Display for StorageDtype {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
