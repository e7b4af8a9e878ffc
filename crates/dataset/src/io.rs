//! Read and write JSON dataset files

// standard library
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::memory::MemoryDataset;

// external crates
use log::debug;
use serde_json::error::Category;

/// Read a [MemoryDataset] from a JSON dataset file
///
/// Missing paths and files that are not JSON datasets are reported as
/// [Error::NotFound] and [Error::UnrecognizedFormat] respectively. Anything
/// else, such as a permission error, is returned as is.
///
/// If the file does not name the dataset, the file stem is used.
///
/// ```rust, no_run
/// # use quicklook_dataset::read_dataset_file;
/// let dataset = read_dataset_file("./data/sedov.json").unwrap();
/// println!("{}", dataset.name);
/// ```
pub fn read_dataset_file<P: AsRef<Path>>(path: P) -> Result<MemoryDataset> {
    let path = path.as_ref();

    if path.is_dir() {
        return Err(Error::UnrecognizedFormat {
            path: path.to_path_buf(),
            reason: "path is a directory".to_string(),
        });
    }

    let reader = match File::open(path) {
        Ok(file) => BufReader::new(file),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };

    let mut dataset: MemoryDataset = match serde_json::from_reader(reader) {
        Ok(dataset) => dataset,
        Err(e) if e.classify() == Category::Io => return Err(e.into()),
        Err(e) => {
            return Err(Error::UnrecognizedFormat {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    };

    if dataset.name.is_empty() {
        if let Some(stem) = path.file_stem() {
            dataset.name = stem.to_string_lossy().into_owned();
        }
    }

    dataset.validate()?;
    debug!(
        "read dataset \"{}\" with {} fields from {path:?}",
        dataset.name,
        dataset.fields.len()
    );
    Ok(dataset)
}

/// Write a [MemoryDataset] to a JSON dataset file
///
/// Any dataset written this way can be opened again with
/// [read_dataset_file()], or placed in a sample directory for use by name.
pub fn write_dataset_file<P: AsRef<Path>>(dataset: &MemoryDataset, path: P) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, dataset)?;
    Ok(())
}
