//! Default [Loader] for dataset files and named samples

// crate modules
use crate::catalog::SampleCatalog;
use crate::error::Result;
use crate::io::read_dataset_file;
use crate::traits::{Dataset, Loader};

/// Opens JSON dataset files by path, and samples by name
///
/// ```rust
/// # use quicklook_dataset::{FileLoader, Loader};
/// let loader = FileLoader::default();
///
/// // not a file, so opening as a path fails
/// let error = loader.open("toy_dataset").unwrap_err();
/// assert!(error.is_unidentified());
///
/// // but it is a bundled sample
/// let dataset = loader.open_named_sample("toy_dataset").unwrap();
/// assert_eq!(dataset.name(), "toy_dataset");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    catalog: SampleCatalog,
}

impl FileLoader {
    /// Loader using a specific sample catalog
    pub fn new(catalog: SampleCatalog) -> Self {
        Self { catalog }
    }

    /// Loader using [SampleCatalog::from_env()]
    pub fn from_env() -> Self {
        Self::new(SampleCatalog::from_env())
    }

    /// The catalog used for named samples
    pub fn catalog(&self) -> &SampleCatalog {
        &self.catalog
    }
}

impl Loader for FileLoader {
    fn open(&self, identifier: &str) -> Result<Box<dyn Dataset>> {
        Ok(Box::new(read_dataset_file(identifier)?))
    }

    fn open_named_sample(&self, identifier: &str) -> Result<Box<dyn Dataset>> {
        Ok(Box::new(self.catalog.load(identifier)?))
    }
}
