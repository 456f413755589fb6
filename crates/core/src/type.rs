use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// The kind of a STAC object.
///
/// Each kind has its own JSON Schema, named after the lower-cased kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    /// A STAC Item, a GeoJSON feature.
    Item,

    /// A STAC Catalog.
    Catalog,

    /// A STAC Collection.
    Collection,
}

impl Type {
    /// Returns the lower-cased name of this type.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_core::Type;
    ///
    /// assert_eq!(Type::Collection.as_str(), "collection");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Type::Item => "item",
            Type::Catalog => "catalog",
            Type::Collection => "collection",
        }
    }

    /// Returns the file name of this type's schema.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_core::Type;
    ///
    /// assert_eq!(Type::Item.schema_file_name(), "item.json");
    /// ```
    pub fn schema_file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Type {
    type Err = Error;

    /// Parses either a `type` field value (`Feature`, `Catalog`,
    /// `Collection`) or a lower-cased type name.
    fn from_str(s: &str) -> Result<Type> {
        match s {
            "Feature" | "item" => Ok(Type::Item),
            "Catalog" | "catalog" => Ok(Type::Catalog),
            "Collection" | "collection" => Ok(Type::Collection),
            "FeatureCollection" => Err(Error::UnsupportedType(s.to_string())),
            _ => Err(Error::UnknownType(s.to_string())),
        }
    }
}
