//! District to facility catalog.
//!
//! The catalog is supplied once by the host as a JSON object mapping a district name to an
//! array of facility names, and is immutable afterwards. District order follows the source
//! document, which makes owner lookup deterministic even when a facility is listed under more
//! than one district: the first district in document order wins.

use crate::{IntakeError, IntakeResult};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
struct District {
    name: String,
    facilities: Vec<String>,
}

/// Ordered mapping from district name to its facility names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    districts: Vec<District>,
}

impl Catalog {
    /// Builds a catalog from `(district, facilities)` pairs.
    ///
    /// A repeated district replaces the earlier entry in place, matching how a JSON object with
    /// duplicate keys is read.
    pub fn new<I, D, F>(entries: I) -> Self
    where
        I: IntoIterator<Item = (D, Vec<F>)>,
        D: Into<String>,
        F: Into<String>,
    {
        let mut catalog = Catalog::default();
        for (name, facilities) in entries {
            catalog.insert(
                name.into(),
                facilities.into_iter().map(Into::into).collect(),
            );
        }
        catalog
    }

    /// Parses catalog JSON, failing on malformed input.
    pub fn from_json(text: &str) -> IntakeResult<Self> {
        serde_json::from_str(text).map_err(IntakeError::CatalogParse)
    }

    /// Parses catalog JSON, falling back to an empty catalog on malformed input.
    pub fn from_json_lenient(text: &str) -> Self {
        if text.trim().is_empty() {
            return Catalog::default();
        }
        match Self::from_json(text) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!("catalog ignored, using empty catalog: {}", e);
                Catalog::default()
            }
        }
    }

    fn insert(&mut self, name: String, facilities: Vec<String>) {
        match self.districts.iter_mut().find(|d| d.name == name) {
            Some(existing) => existing.facilities = facilities,
            None => self.districts.push(District { name, facilities }),
        }
    }

    /// Facilities of `district`, or `None` if the district is not in the catalog.
    pub fn facilities(&self, district: &str) -> Option<&[String]> {
        self.districts
            .iter()
            .find(|d| d.name == district)
            .map(|d| d.facilities.as_slice())
    }

    /// First district, in document order, whose list contains `facility`.
    pub fn district_of(&self, facility: &str) -> Option<&str> {
        self.districts
            .iter()
            .find(|d| d.facilities.iter().any(|f| f == facility))
            .map(|d| d.name.as_str())
    }

    pub fn contains_district(&self, district: &str) -> bool {
        self.facilities(district).is_some()
    }

    pub fn districts(&self) -> impl Iterator<Item = &str> {
        self.districts.iter().map(|d| d.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.districts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }
}

impl Serialize for Catalog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.districts.len()))?;
        for district in &self.districts {
            map.serialize_entry(&district.name, &district.facilities)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping district names to arrays of facility names")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut catalog = Catalog::default();
                while let Some((name, facilities)) =
                    access.next_entry::<String, Vec<String>>()?
                {
                    catalog.insert(name, facilities);
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Peñalolén": ["CESFAM Carol Urzúa", "CESFAM La Faena"],
        "Macul": ["CESFAM Santa Julia"],
        "Ñuñoa": ["CESFAM Rosita Renard", "CESFAM La Faena"]
    }"#;

    #[test]
    fn parses_in_document_order() {
        let catalog = Catalog::from_json(SAMPLE).expect("valid catalog");
        let districts: Vec<&str> = catalog.districts().collect();
        assert_eq!(districts, vec!["Peñalolén", "Macul", "Ñuñoa"]);
        assert_eq!(
            catalog.facilities("Macul"),
            Some(&["CESFAM Santa Julia".to_string()][..])
        );
    }

    #[test]
    fn district_of_returns_first_match_in_document_order() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.district_of("CESFAM La Faena"), Some("Peñalolén"));
        assert_eq!(catalog.district_of("CESFAM Rosita Renard"), Some("Ñuñoa"));
        assert_eq!(catalog.district_of("Hospital X"), None);
    }

    #[test]
    fn duplicate_district_keys_replace_in_place() {
        let catalog = Catalog::from_json(r#"{"A": ["x"], "B": ["y"], "A": ["z"]}"#).unwrap();
        let districts: Vec<&str> = catalog.districts().collect();
        assert_eq!(districts, vec!["A", "B"]);
        assert_eq!(catalog.facilities("A"), Some(&["z".to_string()][..]));
    }

    #[test]
    fn strict_parse_rejects_malformed_json() {
        let err = Catalog::from_json(r#"{"A": "not a list"}"#).expect_err("should fail");
        assert!(matches!(err, IntakeError::CatalogParse(_)));

        assert!(Catalog::from_json("[1, 2]").is_err());
        assert!(Catalog::from_json(r#"{"A": [1]}"#).is_err());
    }

    #[test]
    fn lenient_parse_falls_back_to_empty() {
        assert!(Catalog::from_json_lenient("{not json").is_empty());
        assert!(Catalog::from_json_lenient("").is_empty());
        assert!(Catalog::from_json_lenient("null").is_empty());
        assert_eq!(Catalog::from_json_lenient(SAMPLE).len(), 3);
    }

    #[test]
    fn new_builds_from_pairs() {
        let catalog = Catalog::new([("A", vec!["x", "y"]), ("B", vec!["z"])]);
        assert!(catalog.contains_district("A"));
        assert!(!catalog.contains_district("C"));
        assert_eq!(catalog.district_of("z"), Some("B"));
    }

    #[test]
    fn serializes_back_to_object() {
        let catalog = Catalog::new([("A", vec!["x"]), ("B", vec![])]);
        let json = serde_json::to_string(&catalog).unwrap();
        assert_eq!(json, r#"{"A":["x"],"B":[]}"#);
    }
}
