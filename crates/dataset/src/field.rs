//! Field identifiers and extrema

// quicklook modules
use quicklook_utils::ValueExt;

// external crates
use serde::{Deserialize, Serialize};

/// Identifier for a physical quantity, i.e. `("gas", "density")`
///
/// A field is uniquely identified within a dataset by its category and name.
/// It serialises as a two element array to keep JSON output compact.
///
/// ```rust
/// # use quicklook_dataset::Field;
/// let field = Field::new("gas", "density");
/// assert_eq!(serde_json::to_string(&field).unwrap(), r#"["gas","density"]"#);
/// assert_eq!(field.to_string(), r#"("gas", "density")"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Field {
    /// Field category, e.g. "gas", "index", "all"
    pub category: String,
    /// Field name within the category, e.g. "density"
    pub name: String,
}

impl Field {
    /// New field from anything string-like
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
        }
    }
}

impl From<(String, String)> for Field {
    fn from((category, name): (String, String)) -> Self {
        Self { category, name }
    }
}

impl From<(&str, &str)> for Field {
    fn from((category, name): (&str, &str)) -> Self {
        Self::new(category, name)
    }
}

impl From<Field> for (String, String) {
    fn from(field: Field) -> Self {
        (field.category, field.name)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "(\"{}\", \"{}\")", self.category, self.name)
    }
}

/// Minimum and maximum of a field, with units attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extrema {
    /// Smallest value of the field
    pub min: f64,
    /// Largest value of the field
    pub max: f64,
    /// Unit string, e.g. "g/cm**3"
    pub units: String,
}

impl Extrema {
    /// Plain `[min, max]` with the units stripped
    pub fn values(&self) -> [f64; 2] {
        [self.min, self.max]
    }
}

impl std::fmt::Display for Extrema {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}] {}",
            self.min.sci(5, 2),
            self.max.sci(5, 2),
            self.units
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_from_tuple() {
        let field: Field = ("gas", "temperature").into();
        assert_eq!(field, Field::new("gas", "temperature"));
    }

    #[test]
    fn field_json_round_trip() {
        let field: Field = serde_json::from_str(r#"["index", "x"]"#).unwrap();
        assert_eq!(field.category, "index");
        assert_eq!(field.name, "x");
    }

    #[test]
    fn extrema_display() {
        let extrema = Extrema {
            min: 2.0,
            max: 4.5,
            units: "K".to_string(),
        };
        assert_eq!(extrema.to_string(), "[2.00000e+00, 4.50000e+00] K");
        assert_eq!(extrema.values(), [2.0, 4.5]);
    }
}
