//! Metadata record written alongside sampled arrays

// standard library
use std::collections::BTreeMap;

// crate modules
use crate::field_map::FieldKeyMap;

// quicklook modules
use quicklook_dataset::Field;

// external crates
use serde::{Deserialize, Serialize};

/// Everything needed to interpret a set of quicklook arrays
///
/// Written as `metadata.json` with exactly these keys, in this order. Maps
/// keyed by field index serialise their keys as strings.
///
/// ```json
/// {
///     "field_extrema": { "0": [2.0, 2.0] },
///     "field_units": { "0": "g/cm**3" },
///     "sample_name": "toy_dataset",
///     "resolution": [4, 4, 4],
///     "storage_dtype": "float32",
///     "fields": [["gas", "density"]],
///     "field_key_map": { "0": ["gas", "density"] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Global `[min, max]` for each field index
    pub field_extrema: BTreeMap<usize, [f64; 2]>,
    /// Unit string for each field index
    pub field_units: BTreeMap<usize, String>,
    /// Dataset path or sample name
    pub sample_name: String,
    /// Grid cells along x, y, and z
    pub resolution: [usize; 3],
    /// Float precision name of stored arrays
    pub storage_dtype: String,
    /// Configured fields, in index order
    pub fields: Vec<Field>,
    /// Field index lookup
    pub field_key_map: FieldKeyMap,
}

impl Metadata {
    /// Extrema of a field by identifier rather than index
    pub fn extrema_of(&self, field: &Field) -> Option<[f64; 2]> {
        self.field_key_map
            .index_of(field)
            .and_then(|index| self.field_extrema.get(&index).copied())
    }

    /// Units of a field by identifier rather than index
    pub fn units_of(&self, field: &Field) -> Option<&str> {
        self.field_key_map
            .index_of(field)
            .and_then(|index| self.field_units.get(&index))
            .map(|units| units.as_str())
    }
}
