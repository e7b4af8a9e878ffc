//! In-memory rectilinear datasets

// crate modules
use crate::error::{Error, Result};
use crate::field::{Extrema, Field};
use crate::traits::{Dataset, Region, UniformGrid};

// quicklook modules
use quicklook_utils::{f, SliceExt};

// external crates
use nalgebra::Vector3;
use ndarray::Array3;
use serde::{Deserialize, Serialize};

/// A dataset held entirely in memory on a uniform native mesh
///
/// The native mesh spans `left_edge` to `right_edge` with `dimensions` cells
/// along each axis. Every field stores one value per native cell in row-major
/// order, with x varying slowest.
///
/// ```text
///     flat index = (i * ny + j) * nz + k
/// ```
///
/// This is the reference implementation of the [Dataset] traits and is also
/// the JSON dataset file format read by [read_dataset_file](crate::read_dataset_file).
///
/// ```rust
/// # use quicklook_dataset::{Dataset, Field, MemoryDataset};
/// let dataset = MemoryDataset::new("box", [0.0; 3], [1.0; 3], [4, 4, 4])
///     .with_constant_field(Field::new("gas", "density"), "g/cm**3", 2.0);
///
/// let extrema = dataset
///     .select_all()
///     .extrema(&[Field::new("gas", "density")])
///     .unwrap();
///
/// assert_eq!(extrema[0].values(), [2.0, 2.0]);
/// assert_eq!(extrema[0].units, "g/cm**3");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryDataset {
    /// Dataset name
    #[serde(default)]
    pub name: String,
    /// Lower corner of the domain
    pub left_edge: [f64; 3],
    /// Upper corner of the domain
    pub right_edge: [f64; 3],
    /// Number of native cells along x, y, and z
    pub dimensions: [usize; 3],
    /// Units of the domain edges
    #[serde(default = "default_length_units")]
    pub length_units: String,
    /// Field data, one entry per field
    #[serde(default)]
    pub fields: Vec<FieldData>,
}

/// Values of a single field on the native mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldData {
    /// Field identifier
    pub field: Field,
    /// Unit string for every value
    pub units: String,
    /// Row-major values, one per native cell
    pub values: Vec<f64>,
}

fn default_length_units() -> String {
    "code_length".to_string()
}

impl MemoryDataset {
    /// New dataset with no fields
    pub fn new(
        name: impl Into<String>,
        left_edge: [f64; 3],
        right_edge: [f64; 3],
        dimensions: [usize; 3],
    ) -> Self {
        Self {
            name: name.into(),
            left_edge,
            right_edge,
            dimensions,
            length_units: default_length_units(),
            fields: Vec::new(),
        }
    }

    /// Set the units of the domain edges
    pub fn with_length_units(mut self, units: impl Into<String>) -> Self {
        self.length_units = units.into();
        self
    }

    /// Add a field from explicit values
    ///
    /// Values must be row-major with exactly one value per native cell.
    pub fn with_field(
        mut self,
        field: Field,
        units: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self> {
        let data = FieldData {
            field,
            units: units.into(),
            values,
        };
        self.check_field_length(&data)?;
        self.insert(data);
        Ok(self)
    }

    /// Add a field holding the same value everywhere
    pub fn with_constant_field(mut self, field: Field, units: impl Into<String>, value: f64) -> Self {
        let values = vec![value; self.number_of_cells()];
        self.insert(FieldData {
            field,
            units: units.into(),
            values,
        });
        self
    }

    /// Add a field evaluated at every native cell centre
    ///
    /// ```rust
    /// # use quicklook_dataset::{Field, MemoryDataset};
    /// let dataset = MemoryDataset::new("ramp", [0.0; 3], [1.0; 3], [2, 1, 1])
    ///     .with_field_fn(Field::new("gas", "density"), "g/cm**3", |x| x[0]);
    ///
    /// let data = dataset.field_data(&Field::new("gas", "density")).unwrap();
    /// assert_eq!(data.values, vec![0.25, 0.75]);
    /// ```
    pub fn with_field_fn<F>(mut self, field: Field, units: impl Into<String>, function: F) -> Self
    where
        F: Fn(Vector3<f64>) -> f64,
    {
        let [nx, ny, nz] = self.dimensions;
        let mut values = Vec::with_capacity(self.number_of_cells());
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    values.push(function(self.cell_centre([i, j, k])));
                }
            }
        }

        self.insert(FieldData {
            field,
            units: units.into(),
            values,
        });
        self
    }

    /// Total number of native cells
    pub fn number_of_cells(&self) -> usize {
        self.dimensions.iter().product()
    }

    /// Native cell width along each axis
    pub fn cell_width(&self) -> Vector3<f64> {
        Vector3::from_fn(|axis, _| {
            (self.right_edge[axis] - self.left_edge[axis]) / self.dimensions[axis] as f64
        })
    }

    /// Centre of the native cell at `(i, j, k)`
    pub fn cell_centre(&self, index: [usize; 3]) -> Vector3<f64> {
        let width = self.cell_width();
        Vector3::from_fn(|axis, _| self.left_edge[axis] + (index[axis] as f64 + 0.5) * width[axis])
    }

    /// Native cell boundaries along one axis
    pub fn cell_edges(&self, axis: usize) -> Vec<f64> {
        let n = self.dimensions[axis];
        let width = self.cell_width()[axis];
        (0..=n)
            .map(|i| match i {
                // avoid accumulated rounding on the outer boundary
                i if i == n => self.right_edge[axis],
                i => self.left_edge[axis] + i as f64 * width,
            })
            .collect()
    }

    /// Find the data for a field
    pub fn field_data(&self, field: &Field) -> Result<&FieldData> {
        self.fields
            .iter()
            .find(|data| &data.field == field)
            .ok_or_else(|| Error::FieldNotFound(field.clone()))
    }

    /// Check the domain and every field are consistent
    ///
    /// Datasets built in code are always consistent, but anything deserialised
    /// from a file should be checked before use.
    pub fn validate(&self) -> Result<()> {
        if self.dimensions.contains(&0) {
            return Err(Error::InvalidDomain(f!(
                "zero cells in dimensions {:?}",
                self.dimensions
            )));
        }

        for axis in 0..3 {
            let (low, high) = (self.left_edge[axis], self.right_edge[axis]);
            if !(low.is_finite() && high.is_finite() && low < high) {
                return Err(Error::InvalidDomain(f!(
                    "axis {axis} edges [{low}, {high}] are not increasing"
                )));
            }
        }

        self.fields
            .iter()
            .try_for_each(|data| self.check_field_length(data))
    }

    fn check_field_length(&self, data: &FieldData) -> Result<()> {
        let expected = self.number_of_cells();
        if data.values.len() != expected {
            return Err(Error::InvalidFieldData {
                field: data.field.clone(),
                expected,
                found: data.values.len(),
            });
        }
        Ok(())
    }

    /// Replace any existing field of the same identifier
    fn insert(&mut self, data: FieldData) {
        match self.fields.iter_mut().find(|d| d.field == data.field) {
            Some(existing) => *existing = data,
            None => self.fields.push(data),
        }
    }

    fn flat_index(&self, [i, j, k]: [usize; 3]) -> usize {
        let [_, ny, nz] = self.dimensions;
        (i * ny + j) * nz + k
    }
}

impl Dataset for MemoryDataset {
    fn name(&self) -> &str {
        &self.name
    }

    fn domain_left_edge(&self) -> Vector3<f64> {
        Vector3::from(self.left_edge)
    }

    fn domain_right_edge(&self) -> Vector3<f64> {
        Vector3::from(self.right_edge)
    }

    fn length_units(&self) -> &str {
        &self.length_units
    }

    fn select_all(&self) -> Box<dyn Region + '_> {
        Box::new(AllData { dataset: self })
    }

    fn uniform_grid(
        &self,
        left: Vector3<f64>,
        right: Vector3<f64>,
        dimensions: [usize; 3],
    ) -> Result<Box<dyn UniformGrid + '_>> {
        if dimensions.contains(&0) {
            return Err(Error::InvalidGrid(f!(
                "zero cells in grid dimensions {dimensions:?}"
            )));
        }

        // native cell containing each grid cell centre, per axis
        let mut native = [Vec::new(), Vec::new(), Vec::new()];
        for (axis, indices) in native.iter_mut().enumerate() {
            let edges = self.cell_edges(axis);
            let width = (right[axis] - left[axis]) / dimensions[axis] as f64;

            *indices = (0..dimensions[axis])
                .map(|i| {
                    let centre = left[axis] + (i as f64 + 0.5) * width;
                    edges.find_bin_exclusive(centre).map_err(|_| {
                        Error::InvalidGrid(f!(
                            "sample point {centre} on axis {axis} is outside the domain"
                        ))
                    })
                })
                .collect::<Result<Vec<usize>>>()?;
        }

        Ok(Box::new(MemoryGrid {
            dataset: self,
            dimensions,
            native,
        }))
    }
}

/// Every cell of a [MemoryDataset]
struct AllData<'a> {
    dataset: &'a MemoryDataset,
}

impl Region for AllData<'_> {
    fn extrema(&self, fields: &[Field]) -> Result<Vec<Extrema>> {
        fields
            .iter()
            .map(|field| {
                let data = self.dataset.field_data(field)?;
                Ok(Extrema {
                    min: data.values.try_min()?,
                    max: data.values.try_max()?,
                    units: data.units.clone(),
                })
            })
            .collect()
    }
}

/// Nearest-cell view of a [MemoryDataset] on a uniform grid
struct MemoryGrid<'a> {
    dataset: &'a MemoryDataset,
    dimensions: [usize; 3],
    native: [Vec<usize>; 3],
}

impl UniformGrid for MemoryGrid<'_> {
    fn dimensions(&self) -> [usize; 3] {
        self.dimensions
    }

    fn field(&self, field: &Field) -> Result<Array3<f64>> {
        let data = self.dataset.field_data(field)?;
        // fields are public and may have changed since construction
        self.dataset.check_field_length(data)?;
        let [nx, ny, nz] = self.dimensions;

        Ok(Array3::from_shape_fn((nx, ny, nz), |(i, j, k)| {
            let index = [self.native[0][i], self.native[1][j], self.native[2][k]];
            data.values[self.dataset.flat_index(index)]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn density() -> Field {
        Field::new("gas", "density")
    }

    fn ramp() -> MemoryDataset {
        // density = index along x, 4 cells in x
        MemoryDataset::new("ramp", [0.0; 3], [4.0, 1.0, 1.0], [4, 1, 1])
            .with_field(density(), "g/cm**3", vec![0.0, 1.0, 2.0, 3.0])
            .unwrap()
    }

    #[test]
    fn wrong_field_length() {
        let result = MemoryDataset::new("bad", [0.0; 3], [1.0; 3], [2, 2, 2]).with_field(
            density(),
            "g/cm**3",
            vec![1.0; 7],
        );

        match result {
            Err(Error::InvalidFieldData {
                expected, found, ..
            }) => {
                assert_eq!(expected, 8);
                assert_eq!(found, 7);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn replacing_a_field() {
        let dataset = ramp().with_constant_field(density(), "kg/m**3", 5.0);
        assert_eq!(dataset.fields.len(), 1);
        assert_eq!(dataset.field_data(&density()).unwrap().units, "kg/m**3");
    }

    #[test]
    fn cell_edges_end_on_domain() {
        let dataset = MemoryDataset::new("thirds", [0.0; 3], [1.0; 3], [3, 1, 1]);
        let edges = dataset.cell_edges(0);
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[0], 0.0);
        assert_eq!(edges[3], 1.0);
    }

    #[test]
    fn extrema_over_all_cells() {
        let extrema = ramp().select_all().extrema(&[density()]).unwrap();
        assert_eq!(extrema.len(), 1);
        assert_eq!(extrema[0].values(), [0.0, 3.0]);
    }

    #[test]
    fn extrema_of_missing_field() {
        let result = ramp()
            .select_all()
            .extrema(&[density(), Field::new("gas", "pressure")]);
        assert!(matches!(result, Err(Error::FieldNotFound(f)) if f.name == "pressure"));
    }

    #[test]
    fn coarse_grid_picks_containing_cells() {
        let dataset = ramp();
        let grid = dataset
            .uniform_grid(
                dataset.domain_left_edge(),
                dataset.domain_right_edge(),
                [2, 1, 1],
            )
            .unwrap();

        // centres at x = 1.0 and x = 3.0
        let values = grid.field(&density()).unwrap();
        assert_eq!(values.shape(), &[2, 1, 1]);
        assert_eq!(values[[0, 0, 0]], 1.0);
        assert_eq!(values[[1, 0, 0]], 3.0);
    }

    #[test]
    fn fine_grid_repeats_cells() {
        let dataset = ramp();
        let grid = dataset
            .uniform_grid(
                dataset.domain_left_edge(),
                dataset.domain_right_edge(),
                [8, 2, 3],
            )
            .unwrap();

        let values = grid.field(&density()).unwrap();
        assert_eq!(values.shape(), &[8, 2, 3]);
        assert_eq!(values[[0, 1, 2]], 0.0);
        assert_eq!(values[[1, 0, 0]], 0.0);
        assert_eq!(values[[2, 0, 0]], 1.0);
        assert_eq!(values[[7, 1, 1]], 3.0);
    }

    #[test]
    fn grid_with_zero_cells() {
        let dataset = ramp();
        let result = dataset.uniform_grid(
            dataset.domain_left_edge(),
            dataset.domain_right_edge(),
            [0, 4, 4],
        );
        assert!(matches!(result, Err(Error::InvalidGrid(_))));
    }

    #[test]
    fn grid_outside_domain() {
        let dataset = ramp();
        let result = dataset.uniform_grid(
            Vector3::new(10.0, 0.0, 0.0),
            Vector3::new(12.0, 1.0, 1.0),
            [2, 1, 1],
        );
        assert!(matches!(result, Err(Error::InvalidGrid(_))));
    }

    #[test]
    fn grid_of_truncated_field() {
        let mut dataset = ramp();
        dataset.fields.push(FieldData {
            field: Field::new("gas", "temperature"),
            units: "K".to_string(),
            values: vec![1.0],
        });

        let grid = dataset
            .uniform_grid(
                dataset.domain_left_edge(),
                dataset.domain_right_edge(),
                [4, 1, 1],
            )
            .unwrap();

        assert!(matches!(
            grid.field(&Field::new("gas", "temperature")),
            Err(Error::InvalidFieldData {
                expected: 4,
                found: 1,
                ..
            })
        ));
        assert!(grid.field(&density()).is_ok());
    }

    #[test]
    fn validate_rejects_inverted_domain() {
        let dataset = MemoryDataset::new("inverted", [1.0, 0.0, 0.0], [0.0, 1.0, 1.0], [1, 1, 1]);
        assert!(matches!(dataset.validate(), Err(Error::InvalidDomain(_))));
    }
}
