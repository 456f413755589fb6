use crate::{Error, Result, Type, Version};
use serde_json::{Map, Value};

/// The result of identifying a STAC document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identification {
    /// The kind of STAC object.
    pub r#type: Type,

    /// The maximum STAC version the document structurally supports, if it
    /// can be determined.
    pub version: Option<Version>,
}

/// A parsed STAC document along with its identification.
#[derive(Debug, Clone)]
pub struct Document {
    value: Value,
    identification: Identification,
}

/// Identifies the kind and version of a STAC document.
///
/// Documents written against STAC v1.0.0 or later carry a `type` field. Older
/// catalogs and collections don't, so they are told apart by their fields: a
/// collection has an `extent` (or a `license`), an item has a `geometry`,
/// `properties`, or `assets`, and everything else is a catalog.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stac_core::Type;
///
/// let identification = stac_core::identify(&json!({
///     "stac_version": "0.8.1",
///     "id": "a-collection",
///     "description": "A collection",
///     "license": "CC-BY-4.0",
///     "extent": {},
///     "links": [],
/// }))
/// .unwrap();
/// assert_eq!(identification.r#type, Type::Collection);
/// assert_eq!(identification.version.unwrap(), "v0.8.1");
/// ```
pub fn identify(value: &Value) -> Result<Identification> {
    let object = value
        .as_object()
        .ok_or_else(|| Error::NotAnObject(value.clone()))?;
    let r#type = match object.get("type").and_then(Value::as_str) {
        Some(s) => s.parse()?,
        None => infer_type(object),
    };
    let version = object
        .get("stac_version")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(Version::new);
    Ok(Identification { r#type, version })
}

fn infer_type(object: &Map<String, Value>) -> Type {
    if object.contains_key("extent") || object.contains_key("license") {
        Type::Collection
    } else if ["geometry", "properties", "assets"]
        .iter()
        .any(|key| object.contains_key(*key))
    {
        Type::Item
    } else {
        Type::Catalog
    }
}

impl Document {
    /// Identifies a JSON value and wraps it in a document.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use stac_core::{Document, Type};
    ///
    /// let document = Document::new(json!({"type": "Catalog"})).unwrap();
    /// assert_eq!(document.r#type(), Type::Catalog);
    /// assert!(document.version().is_none());
    /// ```
    pub fn new(value: Value) -> Result<Document> {
        let identification = identify(&value)?;
        Ok(Document {
            value,
            identification,
        })
    }

    /// Returns the kind of this document.
    pub fn r#type(&self) -> Type {
        self.identification.r#type
    }

    /// Returns the version this document declares, if any.
    pub fn version(&self) -> Option<&Version> {
        self.identification.version.as_ref()
    }

    /// Returns a reference to the underlying JSON value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, identify};
    use crate::{Error, Type};
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case(json!({"type": "Feature", "stac_version": "1.0.0"}), Type::Item)]
    #[case(json!({"type": "Catalog", "stac_version": "1.0.0"}), Type::Catalog)]
    #[case(json!({"type": "Collection", "stac_version": "1.0.0"}), Type::Collection)]
    #[case(json!({"stac_version": "0.9.0", "id": "c", "extent": {}}), Type::Collection)]
    #[case(json!({"stac_version": "0.6.0", "id": "c", "license": "MIT"}), Type::Collection)]
    #[case(json!({"id": "i", "geometry": null, "properties": {}}), Type::Item)]
    #[case(json!({"stac_version": "0.9.0", "id": "c", "description": "d", "links": []}), Type::Catalog)]
    fn identify_type(#[case] value: Value, #[case] expected: Type) {
        assert_eq!(identify(&value).unwrap().r#type, expected);
    }

    #[test]
    fn identify_version() {
        let identification = identify(&json!({"type": "Feature", "stac_version": "0.9.0"})).unwrap();
        assert_eq!(identification.version.unwrap(), "v0.9.0");
        let identification = identify(&json!({"type": "Feature"})).unwrap();
        assert!(identification.version.is_none());
        let identification = identify(&json!({"type": "Feature", "stac_version": ""})).unwrap();
        assert!(identification.version.is_none());
    }

    #[test]
    fn not_an_object() {
        assert!(matches!(
            identify(&json!([1, 2])).unwrap_err(),
            Error::NotAnObject(_)
        ));
    }

    #[test]
    fn item_collection() {
        assert!(matches!(
            identify(&json!({"type": "FeatureCollection", "features": []})).unwrap_err(),
            Error::UnsupportedType(_)
        ));
    }

    #[test]
    fn document() {
        let document = Document::new(json!({
            "type": "Feature",
            "stac_version": "1.0.0",
            "id": "an-id",
        }))
        .unwrap();
        assert_eq!(document.r#type(), Type::Item);
        assert_eq!(*document.version().unwrap(), "v1.0.0");
        assert_eq!(document.value()["id"], "an-id");
    }
}
