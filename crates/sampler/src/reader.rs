//! Read quicklook outputs back in

// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// crate modules
use crate::array::SampledArray;
use crate::error::{Error, Result};
use crate::metadata::Metadata;
use crate::writer::{field_file_name, METADATA_FILE};

// quicklook modules
use quicklook_dataset::Field;
use quicklook_utils::f;

// external crates
use ndarray::{Array3, ShapeBuilder};
use npyz::{AutoSerialize, NpyFile, Order};

/// Read `metadata.json` from an output directory
///
/// ```rust, no_run
/// # use quicklook_sampler::read_metadata;
/// let metadata = read_metadata("./quicklook/toy_dataset").unwrap();
/// println!("{:?}", metadata.field_extrema);
/// ```
pub fn read_metadata<P: AsRef<Path>>(output_dir: P) -> Result<Metadata> {
    let reader = init_reader(output_dir.as_ref().join(METADATA_FILE))?;
    Ok(serde_json::from_reader(reader)?)
}

/// Read the array for a field from an output directory
pub fn read_field_in<P: AsRef<Path>>(output_dir: P, field: &Field) -> Result<SampledArray> {
    read_field(output_dir.as_ref().join(field_file_name(field)))
}

/// Read a 3D float32 or float64 `.npy` file
///
/// Both C and Fortran ordered files are accepted.
pub fn read_field<P: AsRef<Path>>(path: P) -> Result<SampledArray> {
    let npy = NpyFile::new(init_reader(path)?)?;

    let shape = match npy.shape() {
        [nx, ny, nz] => (*nx as usize, *ny as usize, *nz as usize),
        other => return Err(Error::UnexpectedNpyDimensions(other.len())),
    };
    let order = npy.order();
    let dtype = npy.dtype();

    if dtype == f32::default_dtype() {
        let data = npy.into_vec::<f32>()?;
        Ok(SampledArray::Float32(shape_array(data, shape, order)?))
    } else if dtype == f64::default_dtype() {
        let data = npy.into_vec::<f64>()?;
        Ok(SampledArray::Float64(shape_array(data, shape, order)?))
    } else {
        Err(Error::UnsupportedNpyDtype(f!("{dtype:?}")))
    }
}

fn shape_array<T>(data: Vec<T>, shape: (usize, usize, usize), order: Order) -> Result<Array3<T>> {
    let array = match order {
        Order::C => Array3::from_shape_vec(shape, data)?,
        Order::Fortran => Array3::from_shape_vec(shape.f(), data)?,
    };
    Ok(array)
}

/// Initialise a reader from anything that can be turned into a path
fn init_reader<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageDtype;
    use crate::writer::write_npy;

    fn scratch(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("quicklook-reader");
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn non_uniform_array() {
        let values = Array3::from_shape_fn((2, 3, 4), |(i, j, k)| (100 * i + 10 * j + k) as f64);
        let array = SampledArray::cast(&values, StorageDtype::Float64);

        let path = scratch("non_uniform.npy");
        write_npy(&array, &path).unwrap();

        let read = read_field(&path).unwrap();
        assert_eq!(read.shape(), [2, 3, 4]);
        assert_eq!(read.to_f64()[[1, 2, 3]], 123.0);
        assert_eq!(read, array);
    }

    #[test]
    fn header_is_little_endian_f4() {
        let values = Array3::from_elem((1, 2, 3), 1.5);
        let path = scratch("header.npy");
        write_npy(&SampledArray::cast(&values, StorageDtype::Float32), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..6], b"\x93NUMPY");

        let header = String::from_utf8_lossy(&bytes[10..]);
        assert!(header.contains("<f4"));
    }

    #[test]
    fn wrong_dimensions() {
        let path = scratch("flat.npy");
        let mut buffer = Vec::new();
        {
            use npyz::WriterBuilder;
            let mut writer = npyz::WriteOptions::<f64>::new()
                .default_dtype()
                .shape(&[4])
                .writer(&mut buffer)
                .begin_nd()
                .unwrap();
            for value in [1.0, 2.0, 3.0, 4.0] {
                writer.push(&value).unwrap();
            }
            writer.finish().unwrap();
        }
        std::fs::write(&path, buffer).unwrap();

        assert!(matches!(
            read_field(&path),
            Err(Error::UnexpectedNpyDimensions(1))
        ));
    }
}
