//! Index <-> field identifier lookups

// standard library
use std::collections::{BTreeMap, HashMap};

// quicklook modules
use quicklook_dataset::Field;

// external crates
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Bidirectional map between field indices and field identifiers
///
/// Indices are assigned in the order fields were configured, starting at 0.
/// Metadata and extrema are keyed by these indices rather than by the field
/// identifiers themselves.
///
/// ```rust
/// # use quicklook_sampler::FieldKeyMap;
/// # use quicklook_dataset::Field;
/// let fields = vec![Field::new("gas", "density"), Field::new("gas", "temperature")];
/// let key_map = FieldKeyMap::from_fields(&fields);
///
/// assert_eq!(key_map.index_of(&fields[1]), Some(1));
/// assert_eq!(key_map.field(0), Some(&fields[0]));
/// assert_eq!(key_map.field(2), None);
/// ```
///
/// If the same field is configured twice it keeps both indices in the forward
/// map, and the reverse lookup gives the later index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldKeyMap {
    forward: BTreeMap<usize, Field>,
    reverse: HashMap<Field, usize>,
}

impl FieldKeyMap {
    /// Assign indices to fields in order
    pub fn from_fields(fields: &[Field]) -> Self {
        Self::from_map(fields.iter().cloned().enumerate().collect())
    }

    fn from_map(forward: BTreeMap<usize, Field>) -> Self {
        let reverse = forward
            .iter()
            .map(|(index, field)| (field.clone(), *index))
            .collect();
        Self { forward, reverse }
    }

    /// Index assigned to a field
    pub fn index_of(&self, field: &Field) -> Option<usize> {
        self.reverse.get(field).copied()
    }

    /// Field assigned to an index
    pub fn field(&self, index: usize) -> Option<&Field> {
        self.forward.get(&index)
    }

    /// Number of indices
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// True if no fields are mapped
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterate over `(index, field)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Field)> {
        self.forward.iter().map(|(index, field)| (*index, field))
    }
}

// Serialised as {"0": ["gas", "density"], ...}, the reverse map is derived
impl Serialize for FieldKeyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.forward.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FieldKeyMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<usize, Field>::deserialize(deserializer).map(Self::from_map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<Field> {
        vec![
            Field::new("gas", "density"),
            Field::new("gas", "temperature"),
            Field::new("index", "x"),
        ]
    }

    #[test]
    fn round_trip_every_field() {
        let fields = fields();
        let key_map = FieldKeyMap::from_fields(&fields);

        assert_eq!(key_map.len(), fields.len());
        for (expected_index, field) in fields.iter().enumerate() {
            let index = key_map.index_of(field).unwrap();
            assert_eq!(index, expected_index);
            assert_eq!(key_map.field(index), Some(field));
        }
    }

    #[test]
    fn iteration_in_configured_order() {
        let key_map = FieldKeyMap::from_fields(&fields());
        let indices: Vec<usize> = key_map.iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn empty_field_list() {
        let key_map = FieldKeyMap::from_fields(&[]);
        assert!(key_map.is_empty());
        assert_eq!(key_map.index_of(&Field::new("gas", "density")), None);
    }

    #[test]
    fn duplicate_field_keeps_later_index() {
        let density = Field::new("gas", "density");
        let key_map = FieldKeyMap::from_fields(&[density.clone(), density.clone()]);
        assert_eq!(key_map.len(), 2);
        assert_eq!(key_map.index_of(&density), Some(1));
    }

    #[test]
    fn json_uses_string_indices() {
        let key_map = FieldKeyMap::from_fields(&fields()[..2]);
        let json = serde_json::to_string(&key_map).unwrap();
        assert_eq!(json, r#"{"0":["gas","density"],"1":["gas","temperature"]}"#);

        let parsed: FieldKeyMap = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, key_map);
    }
}
