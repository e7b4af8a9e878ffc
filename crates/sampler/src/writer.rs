//! Write operations for sampled data
//!
//! Outputs for a dataset are written to `<storage_dir>/<sample_name>/`:
//!
//! ```text
//! metadata.json                  structured metadata, 4-space indented
//! field_<category>_<name>.npy    one self-describing array per field
//! ```
//!
//! Existing files of the same name are overwritten, anything else in the
//! directory is left alone.

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

// crate modules
use crate::array::SampledArray;
use crate::error::Result;
use crate::metadata::Metadata;
use crate::sampler::Sample;

// quicklook modules
use quicklook_dataset::Field;
use quicklook_utils::f;

// external crates
use log::debug;
use ndarray::Array3;
use npyz::WriterBuilder;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Name of the metadata file in every output directory
pub const METADATA_FILE: &str = "metadata.json";

/// File name for a field array, i.e. `field_gas_density.npy`
///
/// ```rust
/// # use quicklook_sampler::field_file_name;
/// # use quicklook_dataset::Field;
/// let field = Field::new("gas", "density");
/// assert_eq!(field_file_name(&field), "field_gas_density.npy");
/// ```
pub fn field_file_name(field: &Field) -> String {
    f!("field_{}_{}.npy", field.category, field.name)
}

/// Write the metadata and every array of a [Sample]
///
/// Creates `storage_dir` and then `storage_dir/sample_name` if either is
/// missing. The directory containing `storage_dir` must already exist.
///
/// The output directory comes from
/// [SamplerConfig::output_dir()](crate::SamplerConfig::output_dir), so an
/// absolute sample name is written under itself rather than `storage_dir`.
///
/// Returns the output directory.
pub fn write_sample(sample: &Sample) -> Result<PathBuf> {
    ensure_dir(&sample.config.storage_dir)?;
    let output_dir = sample.output_dir();
    ensure_dir(&output_dir)?;

    write_metadata(&sample.metadata(), output_dir.join(METADATA_FILE))?;

    for (field, values) in &sample.values {
        let path = output_dir.join(field_file_name(field));
        debug!("writing {field} to {path:?}");
        write_npy(values, path)?;
    }

    Ok(output_dir)
}

/// Write [Metadata] as JSON with 4-space indentation
pub fn write_metadata<P: AsRef<Path>>(metadata: &Metadata, path: P) -> Result<()> {
    let mut writer = init_writer(path)?;
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    metadata.serialize(&mut serializer)?;
    writer.flush()?;
    Ok(())
}

/// Write a [SampledArray] to a `.npy` file
///
/// The header records the little-endian float dtype, the C (row-major)
/// ordering, and the shape, so the file can be read without any metadata.
pub fn write_npy<P: AsRef<Path>>(array: &SampledArray, path: P) -> Result<()> {
    match array {
        SampledArray::Float32(values) => write_array(values, path),
        SampledArray::Float64(values) => write_array(values, path),
    }
}

fn write_array<T, P>(values: &Array3<T>, path: P) -> Result<()>
where
    T: npyz::AutoSerialize,
    P: AsRef<Path>,
{
    let shape: Vec<u64> = values.shape().iter().map(|&n| n as u64).collect();

    let mut writer = npyz::WriteOptions::<T>::new()
        .default_dtype()
        .shape(&shape)
        .writer(init_writer(path)?)
        .begin_nd()?;

    // logical iteration order is row-major regardless of memory layout
    for value in values.iter() {
        writer.push(value)?;
    }

    writer.finish()?;
    Ok(())
}

/// Create a single directory level if it does not exist yet
fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    match std::fs::create_dir(path) {
        Ok(()) => {
            debug!("created {path:?}");
            Ok(())
        }
        // another writer got there first
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Initialise a writer from anything that can be turned into a path
fn init_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_map::FieldKeyMap;
    use std::collections::BTreeMap;

    #[test]
    fn metadata_is_four_space_indented() {
        let fields = vec![Field::new("gas", "density")];
        let metadata = Metadata {
            field_extrema: BTreeMap::from([(0, [2.0, 2.0])]),
            field_units: BTreeMap::from([(0, "g/cm**3".to_string())]),
            sample_name: "toy_dataset".to_string(),
            resolution: [4, 4, 4],
            storage_dtype: "float32".to_string(),
            field_key_map: FieldKeyMap::from_fields(&fields),
            fields,
        };

        let path = std::env::temp_dir().join("quicklook-writer-metadata.json");
        write_metadata(&metadata, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();

        let expected = r#"{
    "field_extrema": {
        "0": [
            2.0,
            2.0
        ]
    },
    "field_units": {
        "0": "g/cm**3"
    },
    "sample_name": "toy_dataset",
    "resolution": [
        4,
        4,
        4
    ],
    "storage_dtype": "float32",
    "fields": [
        [
            "gas",
            "density"
        ]
    ],
    "field_key_map": {
        "0": [
            "gas",
            "density"
        ]
    }
}"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn missing_parent_is_an_error() {
        let path = std::env::temp_dir()
            .join("quicklook-writer-missing")
            .join("nested")
            .join("storage");
        assert!(ensure_dir(&path).is_err());
    }
}
